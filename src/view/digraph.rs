//! `GraphView` over a petgraph `DiGraph`.

use petgraph::graph::{EdgeIndex, Graph, IndexType, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use super::GraphView;

impl<N, E, Ix: IndexType> GraphView for Graph<N, E, Directed, Ix> {
    type Node = NodeIndex<Ix>;
    type Edge = EdgeIndex<Ix>;

    fn nodes(&self) -> Vec<NodeIndex<Ix>> {
        self.node_indices().collect()
    }

    fn edges(&self) -> Vec<EdgeIndex<Ix>> {
        self.edge_indices().collect()
    }

    fn node_edges(&self, node: &NodeIndex<Ix>, outgoing: bool, incoming: bool) -> Vec<EdgeIndex<Ix>> {
        assert!(
            node.index() < self.node_count(),
            "node {node:?} is not part of the view"
        );
        let mut edges: Vec<EdgeIndex<Ix>> = Vec::new();
        if outgoing {
            edges.extend(self.edges_directed(*node, Direction::Outgoing).map(|e| e.id()));
        }
        if incoming {
            edges.extend(self.edges_directed(*node, Direction::Incoming).map(|e| e.id()));
        }
        // petgraph walks adjacency lists newest-first; report insertion order.
        edges.sort();
        edges.dedup();
        edges
    }

    fn edge_source(&self, edge: &EdgeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        Some(self.raw_edges()[edge.index()].source())
    }

    fn edge_target(&self, edge: &EdgeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        Some(self.raw_edges()[edge.index()].target())
    }
}
