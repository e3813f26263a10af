//! Subdivision settings for a [`QuadTree`](crate::QuadTree).

/// What to do when a node over capacity already sits at the maximum depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DepthLimitPolicy {
    /// Keep the node as a leaf holding all of its elements
    #[default]
    Leaf,
    /// Abort the rebuild with [`QuadTreeError::DepthLimitExceeded`](crate::QuadTreeError)
    Reject,
}

/// Settings controlling when and how deep nodes subdivide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuadTreeConfig {
    /// The maximum number of elements a node can hold before subdividing
    pub node_capacity: usize,
    /// The deepest a node may be before it stops subdividing. The root is depth 0.
    pub max_depth: usize,
    pub depth_limit: DepthLimitPolicy,
}

impl QuadTreeConfig {
    pub const DEFAULT_NODE_CAPACITY: usize = 4;
    pub const DEFAULT_MAX_DEPTH: usize = 16;

    pub fn with_node_capacity(mut self, node_capacity: usize) -> Self {
        self.node_capacity = node_capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_depth_limit(mut self, depth_limit: DepthLimitPolicy) -> Self {
        self.depth_limit = depth_limit;
        self
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            node_capacity: Self::DEFAULT_NODE_CAPACITY,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            depth_limit: DepthLimitPolicy::Leaf,
        }
    }
}
