use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    #[error("Invalid rect at ({x}, {y}) with size {width}x{height}")]
    InvalidRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    #[error("Node at depth {depth} holds {elements} elements but the depth limit is {max_depth}")]
    DepthLimitExceeded {
        depth: usize,
        max_depth: usize,
        elements: usize,
    },
}
