//! A region quadtree used as a broad-phase filter over moving rectangular elements.
//!
//! Every mutation rebuilds the subdivision from the root, so the tree stays consistent
//! with element positions that change between frames. Call [`QuadTree::subdivide`]
//! after moving elements without adding or removing any.

use std::{rc::Rc, sync::Arc};

use nalgebra::{Point2, Vector2};

mod config;
mod error;
mod node;
mod quadtree;
mod shapes;
mod util;

pub use config::{DepthLimitPolicy, QuadTreeConfig};
pub use error::QuadTreeError;
pub use node::Node;
pub use quadtree::QuadTree;
pub use shapes::Rect;
pub use util::{Quadrant, QuadrantMask};

pub type P2 = Point2<f64>;
pub type V2 = Vector2<f64>;

/// Capability of anything that can be indexed by the [`QuadTree`].
///
/// Nodes assign elements by their position only. The bounds are for callers doing the
/// exact overlap test after a broad-phase retrieval.
pub trait Element {
    /// Get 2d point position
    fn position(&self) -> P2;

    /// Get the bounding rect, a zero-sized rect at the position unless overridden
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), V2::zeros())
    }
}

impl Element for P2 {
    fn position(&self) -> P2 {
        *self
    }
}

impl Element for Rect {
    fn position(&self) -> P2 {
        self.origin()
    }

    fn bounds(&self) -> Rect {
        *self
    }
}

impl<E: Element + ?Sized> Element for &E {
    fn position(&self) -> P2 {
        (**self).position()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<E: Element + ?Sized> Element for Rc<E> {
    fn position(&self) -> P2 {
        (**self).position()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<E: Element + ?Sized> Element for Arc<E> {
    fn position(&self) -> P2 {
        (**self).position()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}
