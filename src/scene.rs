use tracing::debug;

use crate::geometry::Rect;

/// The queries obstacle collection needs from a diagram's node tree.
pub trait SceneGraph {
    /// Handle to a node in the tree.
    type Node: Copy + Eq;

    /// The deepest node containing both `a` and `b`, if any.
    fn common_ancestor(&self, a: Self::Node, b: Self::Node) -> Option<Self::Node>;

    /// All nodes below `node`, in drawing order.
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Returns `true` if `node` should not be treated as an obstacle for a
    /// link between `source` and `target`.
    fn excludes_from_routing(
        &self,
        node: Self::Node,
        source: Self::Node,
        target: Self::Node,
    ) -> bool;

    /// Returns `true` if `node` is a strict ancestor of `of`.
    fn is_ancestor(&self, node: Self::Node, of: Self::Node) -> bool;

    /// Bounding box of `node` in diagram coordinates.
    fn bounds(&self, node: Self::Node) -> Rect;
}

/// The obstacles a link routes around.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleSet {
    /// Bounds of the region routing happens in.
    pub container: Rect,
    pub boxes: Vec<Rect>,
    /// Index of the source entity's box in `boxes`.
    pub source: usize,
    /// Index of the target entity's box in `boxes`.
    pub target: usize,
}

impl ObstacleSet {
    #[must_use]
    pub fn new(container: Rect, boxes: Vec<Rect>, source: usize, target: usize) -> Self {
        Self {
            container,
            boxes,
            source,
            target,
        }
    }

    /// Gathers the obstacles for a link between `source` and `target`.
    ///
    /// The container is their common ancestor. Its descendants become boxes,
    /// except nodes excluded from routing and ancestors of either end.
    /// Returns `None` without a common ancestor or when an end is filtered out.
    pub fn collect<S: SceneGraph>(scene: &S, source: S::Node, target: S::Node) -> Option<Self> {
        let container = scene.common_ancestor(source, target)?;
        let mut boxes = Vec::new();
        let (mut source_index, mut target_index) = (None, None);
        for node in scene.descendants(container) {
            if scene.excludes_from_routing(node, source, target)
                || scene.is_ancestor(node, source)
                || scene.is_ancestor(node, target)
            {
                continue;
            }
            if node == source {
                source_index = Some(boxes.len());
            }
            if node == target {
                target_index = Some(boxes.len());
            }
            boxes.push(scene.bounds(node));
        }
        debug!(boxes = boxes.len(), "collected routing obstacles");
        Some(Self::new(
            scene.bounds(container),
            boxes,
            source_index?,
            target_index?,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A flat arena tree: `parent[i]` is the parent of node `i`.
    struct Tree {
        parent: Vec<Option<usize>>,
        bounds: Vec<Rect>,
        hidden: Vec<usize>,
    }

    impl Tree {
        fn ancestors(&self, node: usize) -> Vec<usize> {
            let mut out = Vec::new();
            let mut cur = self.parent[node];
            while let Some(p) = cur {
                out.push(p);
                cur = self.parent[p];
            }
            out
        }
    }

    impl SceneGraph for Tree {
        type Node = usize;

        fn common_ancestor(&self, a: usize, b: usize) -> Option<usize> {
            let of_b = self.ancestors(b);
            self.ancestors(a).into_iter().find(|n| of_b.contains(n))
        }

        fn descendants(&self, node: usize) -> Vec<usize> {
            (0..self.parent.len())
                .filter(|&n| self.is_ancestor(node, n))
                .collect()
        }

        fn excludes_from_routing(&self, node: usize, _source: usize, _target: usize) -> bool {
            self.hidden.contains(&node)
        }

        fn is_ancestor(&self, node: usize, of: usize) -> bool {
            self.ancestors(of).contains(&node)
        }

        fn bounds(&self, node: usize) -> Rect {
            self.bounds[node]
        }
    }

    fn r(left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect::from_edges(left, top, right, bottom).unwrap()
    }

    /// 0: root; 1: group holding 2 (source); 3: obstacle; 4: target;
    /// 5: hidden; 6: child of the obstacle.
    fn tree() -> Tree {
        Tree {
            parent: vec![None, Some(0), Some(1), Some(0), Some(0), Some(0), Some(3)],
            bounds: vec![
                r(-100.0, -100.0, 240.0, 200.0),
                r(-50.0, -30.0, 10.0, 30.0),
                r(-40.0, -20.0, 0.0, 20.0),
                r(40.0, -10.0, 60.0, 60.0),
                r(100.0, 30.0, 140.0, 70.0),
                r(0.0, 150.0, 10.0, 160.0),
                r(45.0, 0.0, 55.0, 10.0),
            ],
            hidden: vec![5],
        }
    }

    #[test]
    fn collects_filtered_boxes_with_terminal_indices() {
        let scene = tree();
        let set = ObstacleSet::collect(&scene, 2, 4).unwrap();
        assert_eq!(set.container, scene.bounds[0]);
        assert_eq!(
            set.boxes,
            vec![scene.bounds[2], scene.bounds[3], scene.bounds[4], scene.bounds[6]]
        );
        assert_eq!((set.source, set.target), (0, 2));
    }

    #[test]
    fn no_common_ancestor_yields_none() {
        let scene = tree();
        assert!(ObstacleSet::collect(&scene, 0, 4).is_none());
    }

    #[test]
    fn excluded_terminal_yields_none() {
        let scene = tree();
        assert!(ObstacleSet::collect(&scene, 2, 5).is_none());
    }
}
