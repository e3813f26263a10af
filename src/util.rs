use crate::shapes::Rect;

/// One of the four children of a subdivided node. The discriminant is the index into the
/// node's child array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthEast = 2,
    SouthWest = 3,
}

impl Quadrant {
    /// All quadrants in child array order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
    ];

    /// Index of this quadrant's child in a node's child array
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bit of this quadrant in a [`QuadrantMask`]
    pub fn bit(self) -> u8 {
        match self {
            Quadrant::NorthWest => 1,
            Quadrant::NorthEast => 2,
            Quadrant::SouthWest => 4,
            Quadrant::SouthEast => 8,
        }
    }
}

/// Set of quadrants touched by a query rect.
///
/// Bits: NW = 1, NE = 2, SW = 4, SE = 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct QuadrantMask(u8);

impl QuadrantMask {
    pub const EMPTY: QuadrantMask = QuadrantMask(0);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, quadrant: Quadrant) {
        self.0 |= quadrant.bit();
    }

    pub fn contains(self, quadrant: Quadrant) -> bool {
        self.0 & quadrant.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Quadrants in the mask, in child array order
    pub fn iter(self) -> impl Iterator<Item = Quadrant> {
        Quadrant::ALL.into_iter().filter(move |&q| self.contains(q))
    }
}

/// Find the single quadrant of `bounds` that strictly holds `query`.
///
/// Returns `None` when the query touches or crosses either midpoint, in which case the
/// caller treats its elements as belonging to the node itself.
pub(crate) fn single_quadrant(bounds: &Rect, query: &Rect) -> Option<Quadrant> {
    let vertical_midpoint = bounds.x() + bounds.width() / 2.;
    let horizontal_midpoint = bounds.y() + bounds.height() / 2.;

    let north = query.y() > horizontal_midpoint && query.y_max() > horizontal_midpoint;
    let south = query.y_max() < horizontal_midpoint;

    if query.x() < vertical_midpoint && query.x_max() < vertical_midpoint {
        if north {
            return Some(Quadrant::NorthWest);
        } else if south {
            return Some(Quadrant::SouthWest);
        }
    } else if query.x() > vertical_midpoint {
        if north {
            return Some(Quadrant::NorthEast);
        } else if south {
            return Some(Quadrant::SouthEast);
        }
    }
    None
}

/// Find every quadrant of `bounds` that `query` reaches into.
///
/// An empty mask means the query has no extent past the midpoint on some axis, e.g. a
/// zero-sized query sitting exactly on a midpoint.
pub(crate) fn overlap_quadrants(bounds: &Rect, query: &Rect) -> QuadrantMask {
    let vertical_midpoint = bounds.x() + bounds.width() / 2.;
    let horizontal_midpoint = bounds.y() + bounds.height() / 2.;

    let north = query.y_max() > horizontal_midpoint;
    let south = query.y() < horizontal_midpoint;
    let west = query.x() < vertical_midpoint;
    let east = query.x_max() > vertical_midpoint;

    let mut mask = QuadrantMask::EMPTY;
    if north && west {
        mask.insert(Quadrant::NorthWest);
    }
    if north && east {
        mask.insert(Quadrant::NorthEast);
    }
    if south && west {
        mask.insert(Quadrant::SouthWest);
    }
    if south && east {
        mask.insert(Quadrant::SouthEast);
    }
    mask
}
