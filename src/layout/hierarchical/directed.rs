//! Directed graph model the hierarchical pipeline works on.
//!
//! One vertex per view node plus the dummy vertices later stages add. Edges
//! always point from the upper vertex to the lower one: self loops are
//! dropped and the feedback edges of a greedy-FAS ordering are reversed, so
//! the graph handed to layering is acyclic.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use tracing::debug;

use crate::geometry::Size;
use crate::scene::Scene;
use crate::view::GraphView;

pub type VertexId = NodeIndex;
pub type EdgeId = EdgeIndex;

// ─── Vertex ───────────────────────────────────────────────────────────────────

/// Why a dummy vertex exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyKind {
    /// Marks an edge crossing.
    Crossing,
    /// Joins several edges into one.
    Hyperedge,
    /// Bend point of an edge spanning several layers.
    Bend,
    /// Scratch vertex removed before the layout is committed.
    Temporary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexKind<N> {
    Real(N),
    Dummy(DummyKind),
}

#[derive(Debug, Clone)]
pub struct Vertex<N> {
    pub kind: VertexKind<N>,
    /// Layer index, -1 while unassigned.
    pub layer: i32,
    /// Rank within the layer during crossing minimization, horizontal
    /// coordinate after coordinate assignment.
    pub x: i32,
    pub size: Size,
}

impl<N> Vertex<N> {
    pub fn real(node: N, size: Size) -> Self {
        Self {
            kind: VertexKind::Real(node),
            layer: -1,
            x: 0,
            size,
        }
    }

    pub fn dummy(kind: DummyKind) -> Self {
        Self {
            kind: VertexKind::Dummy(kind),
            layer: -1,
            x: 0,
            size: Size::ZERO,
        }
    }

    pub fn node(&self) -> Option<&N> {
        match &self.kind {
            VertexKind::Real(node) => Some(node),
            VertexKind::Dummy(_) => None,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, VertexKind::Dummy(_))
    }

    /// Vertical coordinate; the layer index.
    pub fn y(&self) -> i32 {
        self.layer
    }
}

// ─── LayoutEdge ───────────────────────────────────────────────────────────────

/// The edge a chain of dummy-vertex segments replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitEdge<E> {
    pub source: VertexId,
    pub target: VertexId,
    pub edge: E,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeOrigin<E> {
    /// Built straight from a view edge.
    View(E),
    /// One segment of a longer edge subdivided by dummy vertices.
    Split(SplitEdge<E>),
}

#[derive(Debug, Clone)]
pub struct LayoutEdge<E> {
    pub origin: EdgeOrigin<E>,
    /// Points against the view edge's direction (cycle breaking).
    pub reversed: bool,
}

impl<E> LayoutEdge<E> {
    pub fn new(edge: E) -> Self {
        Self {
            origin: EdgeOrigin::View(edge),
            reversed: false,
        }
    }

    /// The view edge this internal edge stands for.
    pub fn view_edge(&self) -> &E {
        match &self.origin {
            EdgeOrigin::View(edge) => edge,
            EdgeOrigin::Split(split) => &split.edge,
        }
    }
}

// ─── DirectedGraph ────────────────────────────────────────────────────────────

pub struct DirectedGraph<N, E> {
    graph: StableDiGraph<Vertex<N>, LayoutEdge<E>>,
    node_vertex: IndexMap<N, VertexId>,
}

impl<N, E> DirectedGraph<N, E>
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_vertex: IndexMap::new(),
        }
    }

    /// Build the model from a view, measuring each node in `scene`.
    pub fn build<G, S>(view: &G, scene: &S) -> Self
    where
        G: GraphView<Node = N, Edge = E>,
        S: Scene<N>,
    {
        let mut dg = Self::new();
        for node in view.nodes() {
            let size = if scene.contains(&node) {
                scene.bounds(&node).map(|b| b.size()).unwrap_or(Size::ZERO)
            } else {
                Size::ZERO
            };
            dg.add_node(node, size);
        }
        for edge in view.edges() {
            let (Some(source), Some(target)) = (view.edge_source(&edge), view.edge_target(&edge))
            else {
                continue;
            };
            let (Some(&s), Some(&t)) = (dg.node_vertex.get(&source), dg.node_vertex.get(&target))
            else {
                continue;
            };
            if s == t {
                continue;
            }
            dg.graph.add_edge(s, t, LayoutEdge::new(edge));
        }
        let reversed = dg.break_cycles();
        debug!(
            vertices = dg.vertex_count(),
            edges = dg.edge_count(),
            reversed,
            "directed graph built"
        );
        dg
    }

    fn add_node(&mut self, node: N, size: Size) -> VertexId {
        self.add_vertex(Vertex::real(node, size))
    }

    /// Add a vertex. A real vertex for a node that already has one is not
    /// duplicated; the existing id is returned.
    pub fn add_vertex(&mut self, vertex: Vertex<N>) -> VertexId {
        if let VertexKind::Real(node) = &vertex.kind {
            if let Some(&v) = self.node_vertex.get(node) {
                return v;
            }
            let node = node.clone();
            let v = self.graph.add_node(vertex);
            self.node_vertex.insert(node, v);
            return v;
        }
        self.graph.add_node(vertex)
    }

    pub fn add_edge(&mut self, source: VertexId, target: VertexId, edge: LayoutEdge<E>) -> EdgeId {
        self.graph.add_edge(source, target, edge)
    }

    pub fn remove_edge(&mut self, edge: EdgeId) -> Option<LayoutEdge<E>> {
        self.graph.remove_edge(edge)
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex<N> {
        &self.graph[v]
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> &mut Vertex<N> {
        &mut self.graph[v]
    }

    pub fn vertex_of(&self, node: &N) -> Option<VertexId> {
        self.node_vertex.get(node).copied()
    }

    /// All vertices in creation order.
    pub fn vertices(&self) -> Vec<VertexId> {
        self.graph.node_indices().collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edges(&self) -> Vec<EdgeId> {
        self.graph.edge_indices().collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edge(&self, e: EdgeId) -> &LayoutEdge<E> {
        &self.graph[e]
    }

    pub fn endpoints(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        self.graph.edge_endpoints(e)
    }

    /// Vertices with an edge into `v`, one entry per edge.
    pub fn upper_neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.graph.neighbors_directed(v, Direction::Incoming).collect()
    }

    /// Vertices `v` has an edge to, one entry per edge.
    pub fn lower_neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.graph.neighbors_directed(v, Direction::Outgoing).collect()
    }

    /// Vertices without upper neighbors.
    pub fn roots(&self) -> Vec<VertexId> {
        self.graph
            .node_indices()
            .filter(|&v| {
                self.graph
                    .neighbors_directed(v, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect()
    }

    pub(crate) fn graph(&self) -> &StableDiGraph<Vertex<N>, LayoutEdge<E>> {
        &self.graph
    }

    /// Reverse every edge pointing backwards in the greedy-FAS ordering.
    /// Returns how many edges were reversed.
    fn break_cycles(&mut self) -> usize {
        let ordering = self.greedy_fas_ordering();
        let position: HashMap<VertexId, usize> =
            ordering.iter().enumerate().map(|(i, v)| (*v, i)).collect();

        let backwards: Vec<EdgeId> = self
            .graph
            .edge_indices()
            .filter(|&e| {
                self.graph
                    .edge_endpoints(e)
                    .is_some_and(|(s, t)| position[&s] > position[&t])
            })
            .collect();
        for e in &backwards {
            let Some((s, t)) = self.graph.edge_endpoints(*e) else {
                continue;
            };
            if let Some(mut edge) = self.graph.remove_edge(*e) {
                edge.reversed = !edge.reversed;
                self.graph.add_edge(t, s, edge);
            }
        }
        backwards.len()
    }

    /// Eades–Lin–Smyth ordering: sinks go to the back, sources to the front,
    /// otherwise the vertex with the largest out-in degree difference goes next.
    fn greedy_fas_ordering(&self) -> Vec<VertexId> {
        let mut active: IndexSet<VertexId> = self.graph.node_indices().collect();
        let mut out_deg: HashMap<VertexId, i64> = HashMap::new();
        let mut in_deg: HashMap<VertexId, i64> = HashMap::new();
        for &v in &active {
            out_deg.insert(v, self.graph.edges_directed(v, Direction::Outgoing).count() as i64);
            in_deg.insert(v, self.graph.edges_directed(v, Direction::Incoming).count() as i64);
        }

        let mut s1: Vec<VertexId> = Vec::new();
        let mut s2: Vec<VertexId> = Vec::new();

        while !active.is_empty() {
            loop {
                let sinks: Vec<VertexId> = active
                    .iter()
                    .filter(|v| out_deg[*v] == 0)
                    .copied()
                    .collect();
                if sinks.is_empty() {
                    break;
                }
                for sink in sinks {
                    active.shift_remove(&sink);
                    s2.push(sink);
                    for pred in self.graph.neighbors_directed(sink, Direction::Incoming) {
                        if active.contains(&pred) {
                            *out_deg.entry(pred).or_insert(0) -= 1;
                        }
                    }
                }
            }

            loop {
                let sources: Vec<VertexId> = active
                    .iter()
                    .filter(|v| in_deg[*v] == 0)
                    .copied()
                    .collect();
                if sources.is_empty() {
                    break;
                }
                for source in sources {
                    active.shift_remove(&source);
                    s1.push(source);
                    for succ in self.graph.neighbors_directed(source, Direction::Outgoing) {
                        if active.contains(&succ) {
                            *in_deg.entry(succ).or_insert(0) -= 1;
                        }
                    }
                }
            }

            let mut best: Option<(VertexId, i64)> = None;
            for &v in &active {
                let delta = out_deg[&v] - in_deg[&v];
                if best.is_none_or(|(_, d)| delta > d) {
                    best = Some((v, delta));
                }
            }
            if let Some((best, _)) = best {
                active.shift_remove(&best);
                s1.push(best);
                for succ in self.graph.neighbors_directed(best, Direction::Outgoing) {
                    if active.contains(&succ) {
                        *in_deg.entry(succ).or_insert(0) -= 1;
                    }
                }
                for pred in self.graph.neighbors_directed(best, Direction::Incoming) {
                    if active.contains(&pred) {
                        *out_deg.entry(pred).or_insert(0) -= 1;
                    }
                }
            }
        }

        s2.reverse();
        s1.extend(s2);
        s1
    }
}

impl<N, E> Default for DirectedGraph<N, E>
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../tests/rust/test_hierarchical_directed.rs"]
mod tests;
