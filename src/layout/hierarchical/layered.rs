//! Layering: longest-path layer assignment and dummy-vertex insertion.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::algo::toposort;
use tracing::debug;

use super::directed::{
    DirectedGraph, DummyKind, EdgeOrigin, LayoutEdge, SplitEdge, Vertex, VertexId,
};
use crate::error::LayoutError;

/// A directed graph whose vertices are organised in ordered layers.
///
/// Layer 0 is nearest the roots. Within a layer, a vertex's `x` is its
/// 1-based position in the layer list whenever the layer was last
/// (re)ordered.
pub struct LayeredGraph<N, E> {
    graph: DirectedGraph<N, E>,
    layers: Vec<Vec<VertexId>>,
}

impl<N, E> LayeredGraph<N, E>
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    /// Layer `graph` and subdivide every edge spanning several layers.
    pub fn create(graph: DirectedGraph<N, E>) -> Result<Self, LayoutError> {
        let mut layered = Self::layer(graph)?;
        layered.insert_dummy_vertices();
        Ok(layered)
    }

    /// Assign every vertex to its longest-path layer, without dummy insertion.
    pub fn layer(graph: DirectedGraph<N, E>) -> Result<Self, LayoutError> {
        let order = toposort(graph.graph(), None).map_err(|cycle| {
            LayoutError::Internal(format!(
                "layering reached a cycle through vertex {:?}",
                cycle.node_id()
            ))
        })?;

        let mut depth: HashMap<VertexId, usize> =
            graph.roots().into_iter().map(|root| (root, 0)).collect();
        for v in order {
            let here = depth.get(&v).copied().unwrap_or(0);
            for lower in graph.lower_neighbors(v) {
                let slot = depth.entry(lower).or_insert(0);
                // only ever deeper, never shallower
                if *slot < here + 1 {
                    *slot = here + 1;
                }
            }
        }

        let mut layered = Self {
            graph,
            layers: Vec::new(),
        };
        for v in layered.graph.vertices() {
            let layer = depth.get(&v).copied().unwrap_or(0);
            layered.assign_layer(v, layer);
        }
        debug!(
            layers = layered.layers.len(),
            vertices = layered.graph.vertex_count(),
            "layers assigned"
        );
        Ok(layered)
    }

    pub fn graph(&self) -> &DirectedGraph<N, E> {
        &self.graph
    }

    pub fn into_graph(self) -> DirectedGraph<N, E> {
        self.graph
    }

    pub fn layers(&self) -> &[Vec<VertexId>] {
        &self.layers
    }

    pub fn layer_vertices(&self, layer: usize) -> &[VertexId] {
        &self.layers[layer]
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex<N> {
        self.graph.vertex(v)
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> &mut Vertex<N> {
        self.graph.vertex_mut(v)
    }

    /// Move `v` to the end of `layer`, renumbering the layer it leaves.
    pub fn assign_layer(&mut self, v: VertexId, layer: usize) {
        let old = self.graph.vertex(v).layer;
        if old >= 0 {
            let old = old as usize;
            self.layers[old].retain(|&u| u != v);
            self.renumber(old);
        }
        if self.layers.len() <= layer {
            self.layers.resize_with(layer + 1, Vec::new);
        }
        self.layers[layer].push(v);
        let rank = self.layers[layer].len() as i32;
        let vertex = self.graph.vertex_mut(v);
        vertex.layer = layer as i32;
        vertex.x = rank;
    }

    /// Replace the order of `layer` and renumber it.
    pub fn set_layer_order(&mut self, layer: usize, order: Vec<VertexId>) {
        self.layers[layer] = order;
        self.renumber(layer);
    }

    fn renumber(&mut self, layer: usize) {
        for (i, &v) in self.layers[layer].iter().enumerate() {
            self.graph.vertex_mut(v).x = i as i32 + 1;
        }
    }

    /// Split every edge spanning more than one layer into a chain of bend
    /// dummies, one per intermediate layer. Returns how many dummies were added.
    pub fn insert_dummy_vertices(&mut self) -> usize {
        let mut inserted = 0;
        for e in self.graph.edges() {
            let Some((source, target)) = self.graph.endpoints(e) else {
                continue;
            };
            let top = self.graph.vertex(source).layer;
            let bottom = self.graph.vertex(target).layer;
            if bottom - top <= 1 {
                continue;
            }
            let Some(original) = self.graph.remove_edge(e) else {
                continue;
            };
            let split = SplitEdge {
                source,
                target,
                edge: original.view_edge().clone(),
            };
            let segment = || LayoutEdge {
                origin: EdgeOrigin::Split(split.clone()),
                reversed: original.reversed,
            };

            let mut previous = source;
            for layer in (top + 1)..bottom {
                let dummy = self.graph.add_vertex(Vertex::dummy(DummyKind::Bend));
                self.assign_layer(dummy, layer as usize);
                self.graph.add_edge(previous, dummy, segment());
                previous = dummy;
                inserted += 1;
            }
            self.graph.add_edge(previous, target, segment());
        }
        debug!(dummies = inserted, "dummy vertices inserted");
        inserted
    }
}

#[cfg(test)]
#[path = "../../../tests/rust/test_hierarchical_layered.rs"]
mod tests;
