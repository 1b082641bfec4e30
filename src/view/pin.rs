//! Node+pin graph: edges attach to pins, pins belong to nodes.
//!
//! Seen through [`GraphView`], a pin graph is a plain node graph: the edges of
//! a node are the edges of all its pins, and an edge endpoint resolves to the
//! node owning the pin.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use super::GraphView;

#[derive(Debug, Clone)]
struct PinEdge<P> {
    source: Option<P>,
    target: Option<P>,
}

#[derive(Debug, Clone)]
pub struct PinGraph<N, P, E> {
    node_pins: IndexMap<N, Vec<P>>,
    pin_owner: IndexMap<P, N>,
    edges: IndexMap<E, PinEdge<P>>,
}

impl<N, P, E> Default for PinGraph<N, P, E> {
    fn default() -> Self {
        Self {
            node_pins: IndexMap::new(),
            pin_owner: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }
}

impl<N, P, E> PinGraph<N, P, E>
where
    N: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
    E: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. No-op if it already exists.
    pub fn add_node(&mut self, node: N) {
        self.node_pins.entry(node).or_default();
    }

    /// Attach `pin` to `node`, creating the node if needed.
    /// A pin that already has an owner is moved to `node`.
    pub fn add_pin(&mut self, node: N, pin: P) {
        if let Some(previous) = self.pin_owner.insert(pin.clone(), node.clone()) {
            if let Some(pins) = self.node_pins.get_mut(&previous) {
                pins.retain(|p| p != &pin);
            }
        }
        self.node_pins.entry(node).or_default().push(pin);
    }

    /// Add or re-wire an edge between two pins; either end may be dangling.
    pub fn add_edge(&mut self, edge: E, source: Option<P>, target: Option<P>) {
        self.edges.insert(edge, PinEdge { source, target });
    }

    pub fn pin_node(&self, pin: &P) -> Option<&N> {
        self.pin_owner.get(pin)
    }

    pub fn node_count(&self) -> usize {
        self.node_pins.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<N, P, E> GraphView for PinGraph<N, P, E>
where
    N: Clone + Eq + Hash + Debug,
    P: Clone + Eq + Hash + Debug,
    E: Clone + Eq + Hash + Debug,
{
    type Node = N;
    type Edge = E;

    fn nodes(&self) -> Vec<N> {
        self.node_pins.keys().cloned().collect()
    }

    fn edges(&self) -> Vec<E> {
        self.edges.keys().cloned().collect()
    }

    fn node_edges(&self, node: &N, outgoing: bool, incoming: bool) -> Vec<E> {
        let Some(pins) = self.node_pins.get(node) else {
            panic!("node {node:?} is not part of the view");
        };
        let mut found: IndexSet<E> = IndexSet::new();
        for pin in pins {
            for (edge, ends) in &self.edges {
                let leaves = outgoing && ends.source.as_ref() == Some(pin);
                let enters = incoming && ends.target.as_ref() == Some(pin);
                if leaves || enters {
                    found.insert(edge.clone());
                }
            }
        }
        found.into_iter().collect()
    }

    fn edge_source(&self, edge: &E) -> Option<N> {
        let Some(ends) = self.edges.get(edge) else {
            panic!("edge {edge:?} is not part of the view");
        };
        ends.source.as_ref().and_then(|p| self.pin_owner.get(p)).cloned()
    }

    fn edge_target(&self, edge: &E) -> Option<N> {
        let Some(ends) = self.edges.get(edge) else {
            panic!("edge {edge:?} is not part of the view");
        };
        ends.target.as_ref().and_then(|p| self.pin_owner.get(p)).cloned()
    }
}
