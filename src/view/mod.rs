//! Universal graph view: the read-only face every layout consumes.
//!
//! A view presents some underlying node/edge collection as a directed
//! multigraph. Layouts never mutate it; positions go to a [`crate::scene::Scene`].

mod digraph;
mod pin;
mod subset;

use std::fmt::Debug;
use std::hash::Hash;

pub use pin::PinGraph;
pub use subset::SubsetView;

/// Uniform directed-multigraph access.
///
/// Asking about a node or edge that does not belong to the view is a caller
/// bug; implementations panic instead of answering with an empty result.
pub trait GraphView {
    type Node: Clone + Eq + Hash + Debug;
    type Edge: Clone + Eq + Hash + Debug;

    /// All nodes, in a stable view order.
    fn nodes(&self) -> Vec<Self::Node>;

    /// All edges, in a stable view order.
    fn edges(&self) -> Vec<Self::Edge>;

    /// Edges leaving (`outgoing`) and/or entering (`incoming`) `node`.
    fn node_edges(&self, node: &Self::Node, outgoing: bool, incoming: bool) -> Vec<Self::Edge>;

    /// Source node of `edge`, `None` if the edge is not attached at that end.
    fn edge_source(&self, edge: &Self::Edge) -> Option<Self::Node>;

    /// Target node of `edge`, `None` if the edge is not attached at that end.
    fn edge_target(&self, edge: &Self::Edge) -> Option<Self::Node>;
}

impl<G: GraphView + ?Sized> GraphView for &G {
    type Node = G::Node;
    type Edge = G::Edge;

    fn nodes(&self) -> Vec<Self::Node> {
        (**self).nodes()
    }

    fn edges(&self) -> Vec<Self::Edge> {
        (**self).edges()
    }

    fn node_edges(&self, node: &Self::Node, outgoing: bool, incoming: bool) -> Vec<Self::Edge> {
        (**self).node_edges(node, outgoing, incoming)
    }

    fn edge_source(&self, edge: &Self::Edge) -> Option<Self::Node> {
        (**self).edge_source(edge)
    }

    fn edge_target(&self, edge: &Self::Edge) -> Option<Self::Node> {
        (**self).edge_target(edge)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_view.rs"]
mod tests;
