//! Sub-view induced by a node subset.

use indexmap::IndexSet;

use super::GraphView;

/// The nodes of `subset` plus every edge whose both endpoints are in it.
pub struct SubsetView<'a, G: GraphView> {
    view: &'a G,
    subset: IndexSet<G::Node>,
}

impl<'a, G: GraphView> SubsetView<'a, G> {
    pub fn new(view: &'a G, nodes: &[G::Node]) -> Self {
        Self {
            view,
            subset: nodes.iter().cloned().collect(),
        }
    }

    fn keeps(&self, edge: &G::Edge) -> bool {
        let inside = |n: Option<G::Node>| n.is_some_and(|n| self.subset.contains(&n));
        inside(self.view.edge_source(edge)) && inside(self.view.edge_target(edge))
    }
}

impl<G: GraphView> GraphView for SubsetView<'_, G> {
    type Node = G::Node;
    type Edge = G::Edge;

    fn nodes(&self) -> Vec<G::Node> {
        self.view
            .nodes()
            .into_iter()
            .filter(|n| self.subset.contains(n))
            .collect()
    }

    fn edges(&self) -> Vec<G::Edge> {
        self.view
            .edges()
            .into_iter()
            .filter(|e| self.keeps(e))
            .collect()
    }

    fn node_edges(&self, node: &G::Node, outgoing: bool, incoming: bool) -> Vec<G::Edge> {
        assert!(
            self.subset.contains(node),
            "node {node:?} is not part of the view"
        );
        self.view
            .node_edges(node, outgoing, incoming)
            .into_iter()
            .filter(|e| self.keeps(e))
            .collect()
    }

    fn edge_source(&self, edge: &G::Edge) -> Option<G::Node> {
        self.view.edge_source(edge)
    }

    fn edge_target(&self, edge: &G::Edge) -> Option<G::Node> {
        self.view.edge_target(edge)
    }
}
