use nalgebra::{self as na, vector};

use crate::{QuadTreeError, P2, V2};

/// Represents an axis-aligned rectangle defined by an origin (its minimum corner) and a size.
/// It is used to define boundaries for quadtree nodes, to describe query regions and
/// element bounds, and provides utility functions for geometric calculations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    origin: P2,
    size: V2,
}

impl Rect {
    /// Create a new rect from its minimum corner and its width and height
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: na::point![x, y],
            size: vector![width, height],
        }
    }

    /// Create a new rect from an origin point and a size vector
    pub fn from_origin_size(origin: P2, size: V2) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// Get the minimum corner of the rect
    pub fn origin(&self) -> P2 {
        self.origin
    }

    /// Get the width and height of the rect as a vector
    pub fn size(&self) -> V2 {
        self.size
    }

    /// Half of the size. Children of a subdivided node are exactly this big.
    pub fn extents(&self) -> V2 {
        self.size / 2.
    }

    pub fn center(&self) -> P2 {
        self.origin + self.extents()
    }

    pub fn x_max(&self) -> f64 {
        self.origin.x + self.size.x
    }

    pub fn y_max(&self) -> f64 {
        self.origin.y + self.size.y
    }

    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Check that the rect has a finite origin and a finite, non-negative size
    pub fn validate(&self) -> Result<(), QuadTreeError> {
        let finite = self
            .origin
            .coords
            .iter()
            .chain(self.size.iter())
            .all(|v| v.is_finite());
        if finite && self.size.x >= 0. && self.size.y >= 0. {
            Ok(())
        } else {
            Err(QuadTreeError::InvalidRect {
                x: self.origin.x,
                y: self.origin.y,
                width: self.size.x,
                height: self.size.y,
            })
        }
    }

    /// Check if a point exists within the rect.
    ///
    /// The minimum edges are inclusive and the maximum edges exclusive, so the quarters
    /// of a rect never both contain a point on their shared edge.
    pub fn contains(&self, point: &P2) -> bool {
        point.x >= self.origin.x
            && point.x < self.x_max()
            && point.y >= self.origin.y
            && point.y < self.y_max()
    }

    /// Check if the rect shares a non-empty area with another rect. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        other.x_max() > self.origin.x
            && other.origin.x < self.x_max()
            && other.y_max() > self.origin.y
            && other.origin.y < self.y_max()
    }

    /// Quarter the rect to produce four smaller rects, ordered NW, NE, SE, SW.
    ///
    /// North is the half with the larger y.
    pub fn quarter(&self) -> [Self; 4] {
        let extents = self.extents();
        let diff_x = vector![extents.x, 0.];
        let diff_y = vector![0., extents.y];

        [
            Rect::from_origin_size(self.origin + diff_y, extents),
            Rect::from_origin_size(self.origin + extents, extents),
            Rect::from_origin_size(self.origin + diff_x, extents),
            Rect::from_origin_size(self.origin, extents),
        ]
    }
}
