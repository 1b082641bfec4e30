//! Tree layout.
//!
//! Every node without incoming edges (or the configured root) starts a tree
//! built by following outgoing edges. A node reachable along several paths
//! is attached once, under the first parent that reaches it. Two passes then
//! place the tree: allocation (post-order) sizes each subtree along the
//! breadth axis, resolution (pre-order) centers each node over its subtree.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GraphLayout, LayoutCore};
use crate::error::LayoutError;
use crate::geometry::{Point, Rect};
use crate::scene::Scene;
use crate::view::GraphView;

/// Direction a tree grows in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Root on top, children below it.
    #[default]
    Vertical,
    /// Root on the left, children to its right.
    Horizontal,
}

/// Outcome of the tree layout for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreePlacement {
    /// Reached from a root and placed within its tree.
    Resolved(Point),
    /// Never reached from any root (e.g. it only sits on a cycle); parked at the origin.
    Unresolved(Point),
}

impl TreePlacement {
    pub fn location(&self) -> Point {
        match self {
            TreePlacement::Resolved(p) | TreePlacement::Unresolved(p) => *p,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, TreePlacement::Resolved(_))
    }
}

// ─── Tree ─────────────────────────────────────────────────────────────────────

struct TreeNode<N> {
    node: N,
    bounds: Rect,
    children: Vec<usize>,
    /// Breadth taken by the children and the gaps between them.
    space: i64,
    /// Breadth of the whole subtree.
    total_space: i64,
}

/// One tree stored as an arena in pre-order: the root is at index 0 and
/// every parent comes before its children.
struct Tree<N> {
    nodes: Vec<TreeNode<N>>,
}

impl<N: Clone + Eq + Hash + Debug> Tree<N> {
    fn build<G, S>(view: &G, scene: &S, root: N, loaded: &mut IndexSet<N>) -> Self
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let mut tree = Tree { nodes: Vec::new() };
        // (arena index, outgoing edges, next edge to visit)
        let mut stack: Vec<(usize, Vec<G::Edge>, usize)> = Vec::new();
        let edges = view.node_edges(&root, true, false);
        stack.push((tree.attach(scene, root, loaded), edges, 0));

        while let Some((parent, edges, next)) = stack.last_mut() {
            let Some(edge) = edges.get(*next) else {
                stack.pop();
                continue;
            };
            *next += 1;
            let parent = *parent;
            let Some(child) = view.edge_target(edge) else {
                continue;
            };
            if loaded.contains(&child) {
                continue;
            }
            let edges = view.node_edges(&child, true, false);
            let index = tree.attach(scene, child, loaded);
            tree.nodes[parent].children.push(index);
            stack.push((index, edges, 0));
        }
        tree
    }

    fn attach<S: Scene<N>>(&mut self, scene: &S, node: N, loaded: &mut IndexSet<N>) -> usize {
        loaded.insert(node.clone());
        let bounds = scene.bounds(&node).unwrap_or_default();
        self.nodes.push(TreeNode {
            node,
            bounds,
            children: Vec::new(),
            space: 0,
            total_space: 0,
        });
        self.nodes.len() - 1
    }

    fn root(&self) -> &TreeNode<N> {
        &self.nodes[0]
    }

    /// Post-order sizing; returns the breadth of the whole tree.
    fn allocate(&mut self, orientation: Orientation, breadth_gap: i64) -> i64 {
        for i in (0..self.nodes.len()).rev() {
            let node = &self.nodes[i];
            let mut space = 0;
            for (k, &child) in node.children.iter().enumerate() {
                if k > 0 {
                    space += breadth_gap;
                }
                space += self.nodes[child].total_space;
            }
            let own = match orientation {
                Orientation::Vertical => node.bounds.width,
                Orientation::Horizontal => node.bounds.height,
            };
            let node = &mut self.nodes[i];
            node.space = space;
            node.total_space = space.max(own);
        }
        self.root().total_space
    }

    /// Pre-order placement of every node, starting at `(breadth, depth)`.
    fn resolve(
        &self,
        breadth: i64,
        depth: i64,
        layout: &TreeGraphLayout<N>,
        placements: &mut IndexMap<N, TreePlacement>,
    ) {
        let mut starts = vec![(breadth, depth); self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            let (breadth, depth) = starts[i];
            let b = node.bounds;
            let (location, child_depth) = match layout.orientation {
                Orientation::Vertical => (
                    Point::new(breadth + (node.total_space - b.width) / 2 - b.x, depth - b.y),
                    depth + b.height + layout.vertical_gap,
                ),
                Orientation::Horizontal => (
                    Point::new(depth - b.x, breadth + (node.total_space - b.height) / 2 - b.y),
                    depth + b.width + layout.horizontal_gap,
                ),
            };
            placements.insert(node.node.clone(), TreePlacement::Resolved(location));

            let mut child_breadth = breadth + (node.total_space - node.space) / 2;
            for &child in &node.children {
                starts[child] = (child_breadth, child_depth);
                child_breadth += self.nodes[child].total_space + layout.breadth_gap();
            }
        }
    }
}

// ─── TreeGraphLayout ──────────────────────────────────────────────────────────

pub struct TreeGraphLayout<N> {
    core: LayoutCore<N>,
    origin: Point,
    horizontal_gap: i64,
    vertical_gap: i64,
    orientation: Orientation,
    root: Option<N>,
}

impl<N> Default for TreeGraphLayout<N> {
    fn default() -> Self {
        Self {
            core: LayoutCore::default(),
            origin: Point::ORIGIN,
            horizontal_gap: 0,
            vertical_gap: 0,
            orientation: Orientation::Vertical,
            root: None,
        }
    }
}

impl<N: Clone + Eq + Hash + Debug> TreeGraphLayout<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_gaps(mut self, horizontal_gap: i64, vertical_gap: i64) -> Self {
        self.horizontal_gap = horizontal_gap;
        self.vertical_gap = vertical_gap;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Lay out only the tree hanging from `root` instead of one tree per source node.
    pub fn with_root(mut self, root: N) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.core.set_animated(animated);
        self
    }

    /// Gap between siblings.
    fn breadth_gap(&self) -> i64 {
        match self.orientation {
            Orientation::Vertical => self.horizontal_gap,
            Orientation::Horizontal => self.vertical_gap,
        }
    }

    fn roots<G: GraphView<Node = N>>(&self, view: &G, nodes: &[N]) -> Result<Vec<N>, LayoutError> {
        match &self.root {
            Some(root) if nodes.contains(root) => Ok(vec![root.clone()]),
            Some(root) => Err(LayoutError::UnknownNode(format!("{root:?}"))),
            None => Ok(nodes
                .iter()
                .filter(|n| view.node_edges(n, false, true).is_empty())
                .cloned()
                .collect()),
        }
    }

    /// Compute the placement of every node of `view` without committing it.
    pub fn resolve<G, S>(
        &self,
        view: &G,
        scene: &S,
    ) -> Result<IndexMap<N, TreePlacement>, LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let nodes = view.nodes();
        let roots = self.roots(view, &nodes)?;

        let mut loaded: IndexSet<N> = IndexSet::new();
        let mut resolved: IndexMap<N, TreePlacement> = IndexMap::new();
        let (mut breadth, depth) = match self.orientation {
            Orientation::Vertical => (self.origin.x, self.origin.y),
            Orientation::Horizontal => (self.origin.y, self.origin.x),
        };
        for root in roots {
            if loaded.contains(&root) {
                continue;
            }
            let mut tree = Tree::build(view, scene, root, &mut loaded);
            let span = tree.allocate(self.orientation, self.breadth_gap());
            tree.resolve(breadth, depth, self, &mut resolved);
            breadth += span + self.breadth_gap();
        }

        let placements: IndexMap<N, TreePlacement> = nodes
            .into_iter()
            .map(|n| {
                let placement = resolved
                    .get(&n)
                    .copied()
                    .unwrap_or(TreePlacement::Unresolved(self.origin));
                (n, placement)
            })
            .collect();
        let unresolved = placements.values().filter(|p| !p.is_resolved()).count();
        debug!(
            nodes = placements.len(),
            unresolved,
            orientation = ?self.orientation,
            "tree layout resolved"
        );
        Ok(placements)
    }
}

impl<N: Clone + Eq + Hash + Debug> GraphLayout<N> for TreeGraphLayout<N> {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn core(&self) -> &LayoutCore<N> {
        &self.core
    }

    fn perform_graph_layout<G, S>(&self, view: &G, scene: &mut S) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let placements = self.resolve(view, &*scene)?;
        for (node, placement) in &placements {
            self.core.set_resolved_location(scene, node, placement.location());
        }
        Ok(())
    }

    fn perform_nodes_layout<G, S>(
        &self,
        _view: &G,
        _scene: &mut S,
        _nodes: &[N],
    ) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        Err(LayoutError::unsupported("tree", "partial node layout"))
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_tree.rs"]
mod tests;
