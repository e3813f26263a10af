use tracing::{trace, warn};

use crate::{
    config::{DepthLimitPolicy, QuadTreeConfig},
    shapes::Rect,
    util::{overlap_quadrants, single_quadrant, Quadrant, QuadrantMask},
    Element, QuadTreeError, V2,
};

/// A rectangular region of the indexed space.
///
/// A node keeps every element it was built with, including after it subdivides. Its
/// children hold copies of the elements whose positions fall inside them, so an internal
/// node can still answer for the whole region when a query does not fit one quadrant.
#[derive(Clone, Debug)]
pub struct Node<T> {
    bounds: Rect,
    depth: usize,
    elements: Vec<T>,
    children: Option<[Box<Self>; 4]>,
}

impl<T> Node<T> {
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Distance from the root, which has depth 0
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut Vec<T> {
        &mut self.elements
    }

    /// Children in NW, NE, SE, SW order, or `None` for a leaf
    pub fn children(&self) -> Option<&[Box<Self>; 4]> {
        self.children.as_ref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children
            .as_ref()
            .map(|children| &*children[quadrant.index()])
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn size(&self) -> V2 {
        self.bounds.size()
    }

    pub fn extents(&self) -> V2 {
        self.bounds.extents()
    }

    /// Every node below this one, depth first in pre-order. The node itself is excluded.
    pub fn descendants(&self) -> Vec<&Self> {
        let mut nodes = Vec::new();
        self.collect_descendants(&mut nodes);
        nodes
    }

    fn collect_descendants<'a>(&'a self, nodes: &mut Vec<&'a Self>) {
        if let Some(children) = &self.children {
            for child in children {
                nodes.push(child);
                child.collect_descendants(nodes);
            }
        }
    }

    /// The single quadrant strictly holding `query`, see [`Node::retrieve`]
    pub fn single_quadrant(&self, query: &Rect) -> Option<Quadrant> {
        single_quadrant(&self.bounds, query)
    }

    /// Every quadrant `query` reaches into, see [`Node::retrieve_adv`]
    pub fn overlap_quadrants(&self, query: &Rect) -> QuadrantMask {
        overlap_quadrants(&self.bounds, query)
    }
}

impl<T: Element + Clone> Node<T> {
    /// Create a leaf node. The bounds are stored as given; callers validate them.
    pub fn new(bounds: Rect, elements: Vec<T>, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            elements,
            children: None,
        }
    }

    /// Elements of this node whose position lies inside `bounds`
    pub fn contained(&self, bounds: Rect) -> impl Iterator<Item = &T> + '_ {
        self.elements
            .iter()
            .filter(move |item| bounds.contains(&item.position()))
    }

    /// Rebuild the children of this node from its current elements.
    ///
    /// A node over capacity gets four fresh children, each subdivided in turn; any other
    /// node becomes a leaf. The new hierarchy is built before it replaces the old one, so
    /// on error the node is left as it was.
    pub fn subdivide(&mut self, config: &QuadTreeConfig) -> Result<(), QuadTreeError> {
        self.children = self.split(config)?;
        Ok(())
    }

    fn split(&self, config: &QuadTreeConfig) -> Result<Option<[Box<Self>; 4]>, QuadTreeError> {
        if self.elements.len() <= config.node_capacity {
            return Ok(None);
        }

        if self.depth >= config.max_depth {
            match config.depth_limit {
                DepthLimitPolicy::Leaf => {
                    warn!(
                        depth = self.depth,
                        elements = self.elements.len(),
                        "Depth limit reached, keeping node as a leaf"
                    );
                    return Ok(None);
                }
                DepthLimitPolicy::Reject => {
                    return Err(QuadTreeError::DepthLimitExceeded {
                        depth: self.depth,
                        max_depth: config.max_depth,
                        elements: self.elements.len(),
                    })
                }
            }
        }

        trace!(depth = self.depth, elements = self.elements.len(), "Splitting node");

        let [nw, ne, se, sw] = self.bounds.quarter();
        Ok(Some([
            self.build_child(nw, config)?,
            self.build_child(ne, config)?,
            self.build_child(se, config)?,
            self.build_child(sw, config)?,
        ]))
    }

    fn build_child(
        &self,
        bounds: Rect,
        config: &QuadTreeConfig,
    ) -> Result<Box<Self>, QuadTreeError> {
        let elements = self.contained(bounds).cloned().collect();
        let mut child = Self::new(bounds, elements, self.depth + 1);
        child.children = child.split(config)?;
        Ok(Box::new(child))
    }

    /// Narrow retrieval: descend while the query fits strictly inside one quadrant.
    ///
    /// Once it doesn't, or a leaf is reached, every element of the current node is pushed,
    /// whether or not it lies in the query.
    pub fn retrieve(&self, query: &Rect, results: &mut Vec<T>) {
        match (self.single_quadrant(query), &self.children) {
            (Some(quadrant), Some(children)) => {
                children[quadrant.index()].retrieve(query, results)
            }
            _ => results.extend(self.elements.iter().cloned()),
        }
    }

    /// Broad-phase retrieval: descend into every quadrant the query reaches and push the
    /// elements of each leaf reached.
    ///
    /// No element whose position lies inside the query is missed. Elements outside it may
    /// be included and must be filtered by the caller.
    pub fn retrieve_adv(&self, query: &Rect, results: &mut Vec<T>) {
        let mask = self.overlap_quadrants(query);
        match &self.children {
            Some(children) if !mask.is_empty() => {
                for quadrant in mask.iter() {
                    children[quadrant.index()].retrieve_adv(query, results);
                }
            }
            _ => results.extend(self.elements.iter().cloned()),
        }
    }
}
