use tracing::debug;

use crate::{config::QuadTreeConfig, node::Node, shapes::Rect, Element, QuadTreeError};

/// A region quadtree over a dynamic set of elements.
///
/// Elements are only ever added to the root. After each mutation the whole hierarchy is
/// rebuilt from the root, so the shape of the tree depends only on the current elements
/// and their positions.
#[derive(Clone, Debug)]
pub struct QuadTree<T> {
    root: Node<T>,
    config: QuadTreeConfig,
}

impl<T: Element + Clone> QuadTree<T> {
    /// Create an empty quadtree covering `(0, 0)` to `(width, height)` with the default
    /// config
    pub fn new(width: f64, height: f64) -> Result<Self, QuadTreeError> {
        Self::with_config(Rect::new(0., 0., width, height), QuadTreeConfig::default())
    }

    /// Create an empty quadtree
    ///
    /// ## Arguments
    /// - `boundary`: The area indexed by the quadtree
    /// - `config`: Node capacity and depth limit used by every rebuild
    pub fn with_config(boundary: Rect, config: QuadTreeConfig) -> Result<Self, QuadTreeError> {
        boundary.validate()?;
        Ok(Self {
            root: Node::new(boundary, Vec::new(), 0),
            config,
        })
    }

    /// Add a single element and rebuild the tree.
    ///
    /// Prefer [`QuadTree::extend`] when adding several elements at once.
    pub fn insert(&mut self, item: T) -> Result<(), QuadTreeError> {
        self.extend(std::iter::once(item))
    }

    /// Add all `items` and rebuild the tree once.
    ///
    /// If the rebuild fails the added items are removed again and the tree is unchanged.
    pub fn extend<I>(&mut self, items: I) -> Result<(), QuadTreeError>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.root.elements().len();
        self.root.elements_mut().extend(items);
        if let Err(err) = self.subdivide() {
            self.root.elements_mut().truncate(len);
            return Err(err);
        }
        Ok(())
    }

    /// Remove every element, collapsing the tree to an empty root
    pub fn clear(&mut self) {
        self.root.elements_mut().clear();
        // An empty root never needs to split, so this cannot fail
        let _ = self.root.subdivide(&self.config);
    }

    /// Rebuild the tree from the current element positions.
    ///
    /// Call this after elements have moved. On error the previous hierarchy is kept.
    pub fn subdivide(&mut self) -> Result<(), QuadTreeError> {
        self.root.subdivide(&self.config)?;
        debug!(
            elements = self.root.elements().len(),
            nodes = self.root.descendants().len() + 1,
            "Rebuilt quadtree"
        );
        Ok(())
    }

    /// Queries the quadtree for the elements of the deepest node whose single quadrant
    /// strictly holds `query`. This method populates a passed mutable vector.
    ///
    /// Results are not filtered by `query`.
    pub fn retrieve(&self, query: &Rect, results: &mut Vec<T>) -> Result<(), QuadTreeError> {
        query.validate()?;
        self.root.retrieve(query, results);
        Ok(())
    }

    /// Queries the quadtree for the elements of every leaf `query` reaches. This method
    /// populates a passed mutable vector.
    ///
    /// Every element positioned inside `query` is found; elements outside it may be too.
    pub fn retrieve_adv(&self, query: &Rect, results: &mut Vec<T>) -> Result<(), QuadTreeError> {
        query.validate()?;
        // An unsplit root or an empty mask yields the root's own elements
        self.root.retrieve_adv(query, results);
        Ok(())
    }
}

impl<T> QuadTree<T> {
    /// The root followed by all of its descendants, depth first in pre-order
    pub fn nodes(&self) -> Vec<&Node<T>> {
        let mut nodes = vec![&self.root];
        nodes.extend(self.root.descendants());
        nodes
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Get the boundary rect of the quadtree
    pub fn boundary(&self) -> &Rect {
        self.root.bounds()
    }

    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Number of elements in the tree
    pub fn len(&self) -> usize {
        self.root.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.elements().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::point;

    use crate::{util::tests::make_rect, DepthLimitPolicy, Quadrant, P2};

    use super::*;

    fn make_tree(points: &[(f64, f64)]) -> QuadTree<P2> {
        let mut qt = QuadTree::new(100.0, 100.0).unwrap();
        qt.extend(points.iter().map(|&(x, y)| point![x, y])).unwrap();
        qt
    }

    #[test]
    fn new_tree_is_empty() {
        let qt = QuadTree::<P2>::new(100.0, 100.0).unwrap();
        assert!(qt.is_empty());
        assert_eq!(qt.boundary(), &make_rect(0.0, 0.0, 100.0, 100.0));
        assert_eq!(qt.nodes().len(), 1, "Only the root should exist");
        assert_eq!(qt.root().depth(), 0);
    }

    #[test]
    fn new_tree_rejects_negative_size() {
        assert_eq!(
            QuadTree::<P2>::new(-1.0, 100.0).unwrap_err(),
            QuadTreeError::InvalidRect {
                x: 0.0,
                y: 0.0,
                width: -1.0,
                height: 100.0,
            }
        );
    }

    #[test]
    fn insert_single_item() {
        let mut qt = QuadTree::new(100.0, 100.0).unwrap();
        qt.insert(point![25.0, 25.0]).unwrap();
        assert_eq!(qt.len(), 1);
        assert!(qt.root().is_leaf());
    }

    #[test]
    fn insert_past_capacity_subdivides() {
        let mut qt = make_tree(&[(10.0, 10.0), (20.0, 20.0), (30.0, 30.0), (40.0, 40.0)]);
        assert!(qt.root().is_leaf());

        qt.insert(point![60.0, 60.0]).unwrap();
        assert_eq!(qt.nodes().len(), 5, "Root and four children");
        assert_eq!(
            qt.root()
                .child(Quadrant::NorthEast)
                .map(|n| n.elements().len()),
            Some(1)
        );
    }

    #[test]
    fn clear_collapses_tree() {
        let mut qt = make_tree(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (5.0, 5.0)]);
        assert!(!qt.root().is_leaf());

        qt.clear();
        assert!(qt.root().is_leaf());
        assert!(qt.is_empty());
        assert_eq!(qt.nodes().len(), 1);
    }

    #[test]
    fn failed_extend_rolls_back() {
        let config = QuadTreeConfig::default()
            .with_max_depth(1)
            .with_depth_limit(DepthLimitPolicy::Reject);
        let mut qt = QuadTree::with_config(make_rect(0.0, 0.0, 100.0, 100.0), config).unwrap();
        qt.extend([point![10.0, 10.0], point![60.0, 60.0], point![10.0, 60.0]])
            .unwrap();

        let result = qt.extend([point![1.0, 1.0]; 5]);
        assert!(matches!(
            result,
            Err(QuadTreeError::DepthLimitExceeded { depth: 1, .. })
        ));
        assert_eq!(qt.len(), 3, "Rejected items should be removed again");
        assert!(qt.root().is_leaf());
    }

    #[test]
    fn retrieve_rejects_invalid_query() {
        let qt = make_tree(&[(10.0, 10.0)]);
        let mut results = Vec::new();
        assert!(qt
            .retrieve(&make_rect(0.0, 0.0, -5.0, 5.0), &mut results)
            .is_err());
        assert!(qt
            .retrieve_adv(&make_rect(0.0, 0.0, 5.0, f64::NAN), &mut results)
            .is_err());
        assert!(results.is_empty());
    }

    #[test]
    fn retrieve_empty_quadtree() {
        let qt = QuadTree::<P2>::new(100.0, 100.0).unwrap();
        let mut results = Vec::new();
        qt.retrieve(&make_rect(10.0, 10.0, 40.0, 40.0), &mut results)
            .unwrap();
        assert!(results.is_empty(), "Should be empty for an empty tree");
        qt.retrieve_adv(&make_rect(10.0, 10.0, 40.0, 40.0), &mut results)
            .unwrap();
        assert!(results.is_empty(), "Should be empty for an empty tree");
    }

    #[test]
    fn retrieve_on_leaf_root_returns_everything() {
        let qt = make_tree(&[(10.0, 10.0), (90.0, 90.0)]);
        let mut results = Vec::new();
        qt.retrieve(&make_rect(5.0, 5.0, 10.0, 10.0), &mut results)
            .unwrap();
        assert_eq!(results.len(), 2, "Unsplit root returns all of its elements");
    }

    #[test]
    fn retrieve_narrows_to_quadrant() {
        let qt = make_tree(&[
            (10.0, 10.0),
            (20.0, 20.0),
            (70.0, 70.0),
            (80.0, 80.0),
            (90.0, 10.0),
        ]);
        let mut results = Vec::new();
        qt.retrieve(&make_rect(5.0, 5.0, 10.0, 10.0), &mut results)
            .unwrap();
        assert_eq!(results, [point![10.0, 10.0], point![20.0, 20.0]]);
    }

    #[test]
    fn retrieve_adv_spanning_query() {
        let qt = make_tree(&[
            (10.0, 10.0),
            (20.0, 80.0),
            (70.0, 70.0),
            (80.0, 80.0),
            (90.0, 10.0),
        ]);
        let mut results = Vec::new();
        qt.retrieve_adv(&make_rect(5.0, 60.0, 70.0, 30.0), &mut results)
            .unwrap();
        assert_eq!(
            results,
            [point![20.0, 80.0], point![70.0, 70.0], point![80.0, 80.0]],
            "Query across the northern half should reach NW and NE only"
        );
    }

    #[test]
    fn retrieve_adv_empty_mask_returns_root_elements() {
        let qt = make_tree(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (95.0, 95.0)]);
        let mut results = Vec::new();
        qt.retrieve_adv(&make_rect(50.0, 50.0, 0.0, 0.0), &mut results)
            .unwrap();
        assert_eq!(results.len(), 5);
    }

    #[test]
    fn retrieve_appends_to_results() {
        let qt = make_tree(&[(10.0, 10.0)]);
        let mut results = vec![point![0.0, 0.0]];
        qt.retrieve_adv(&make_rect(0.0, 0.0, 20.0, 20.0), &mut results)
            .unwrap();
        assert_eq!(results, [point![0.0, 0.0], point![10.0, 10.0]]);
    }
}
