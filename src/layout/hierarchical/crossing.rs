//! Crossing minimization by the barycenter heuristic.
//!
//! Phase I sweeps the layers down and then up twice, sorting each layer by
//! the mean rank of its neighbors in the layer just fixed. Phase II revisits
//! every layer boundary with ties sorted in reverse to escape local optima,
//! re-running Phase I after each step. Iteration counts are fixed; the
//! heuristic has no convergence test.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::directed::VertexId;
use super::layered::LayeredGraph;

const PHASE_ONE_REPETITIONS: usize = 2;

/// Which neighbors a barycenter is taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Upper,
    Lower,
}

/// How equal barycenters are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ties {
    Keep,
    Reverse,
}

pub trait CrossingMinimizer {
    fn minimize_crossings<N, E>(&self, graph: &mut LayeredGraph<N, E>)
    where
        N: Clone + Eq + Hash + Debug,
        E: Clone + Debug;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BarycenterCrossingMinimizer;

impl CrossingMinimizer for BarycenterCrossingMinimizer {
    fn minimize_crossings<N, E>(&self, graph: &mut LayeredGraph<N, E>)
    where
        N: Clone + Eq + Hash + Debug,
        E: Clone + Debug,
    {
        let before = count_crossings(graph);
        phase_one(graph);
        phase_two(graph);
        debug!(before, after = count_crossings(graph), "crossings minimized");
    }
}

fn phase_one<N, E>(graph: &mut LayeredGraph<N, E>)
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    let layers = graph.layer_count();
    for _ in 0..PHASE_ONE_REPETITIONS {
        for lower in 1..layers {
            reorder(graph, lower, Side::Upper, Ties::Keep);
        }
        for upper in (0..layers.saturating_sub(1)).rev() {
            reorder(graph, upper, Side::Lower, Ties::Keep);
        }
    }
}

fn phase_two<N, E>(graph: &mut LayeredGraph<N, E>)
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    let layers = graph.layer_count();
    for upper in (0..layers.saturating_sub(1)).rev() {
        reorder(graph, upper, Side::Lower, Ties::Reverse);
        phase_one(graph);
    }
    for lower in 1..layers {
        reorder(graph, lower, Side::Upper, Ties::Reverse);
        phase_one(graph);
    }
}

/// Mean `x` of the neighbors of `v` on `side`, `None` if it has none.
pub(crate) fn barycenter<N, E>(graph: &LayeredGraph<N, E>, v: VertexId, side: Side) -> Option<f64>
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    let neighbors = match side {
        Side::Upper => graph.graph().upper_neighbors(v),
        Side::Lower => graph.graph().lower_neighbors(v),
    };
    if neighbors.is_empty() {
        return None;
    }
    let sum: f64 = neighbors.iter().map(|&n| graph.vertex(n).x as f64).sum();
    Some(sum / neighbors.len() as f64)
}

/// Sort `layer` by barycenter and renumber it. A vertex without neighbors on
/// `side` keeps its current rank as its key.
fn reorder<N, E>(graph: &mut LayeredGraph<N, E>, layer: usize, side: Side, ties: Ties)
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    let keyed: Vec<(VertexId, f64)> = graph
        .layer_vertices(layer)
        .iter()
        .map(|&v| {
            let key = barycenter(graph, v, side).unwrap_or(graph.vertex(v).x as f64);
            (v, key)
        })
        .collect();
    let order = bubble_sort(keyed, ties);
    graph.set_layer_order(layer, order);
}

/// Stable bubble sort by key. With `Ties::Reverse` equal keys come out in
/// the reverse of their incoming order.
fn bubble_sort(mut items: Vec<(VertexId, f64)>, ties: Ties) -> Vec<VertexId> {
    if ties == Ties::Reverse {
        items.reverse();
    }
    let n = items.len();
    for pass in 0..n {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if items[j].1 > items[j + 1].1 {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    items.into_iter().map(|(v, _)| v).collect()
}

/// Number of pairwise edge crossings between consecutive layers, by rank.
pub fn count_crossings<N, E>(graph: &LayeredGraph<N, E>) -> usize
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    let mut total = 0usize;
    for layer in graph.layers() {
        let mut edges: Vec<(i32, i32)> = Vec::new();
        for &v in layer {
            let top = graph.vertex(v).x;
            for lower in graph.graph().lower_neighbors(v) {
                edges.push((top, graph.vertex(lower).x));
            }
        }
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (a0, a1) = edges[i];
                let (b0, b1) = edges[j];
                if (a0 < b0 && a1 > b1) || (a0 > b0 && a1 < b1) {
                    total += 1;
                }
            }
        }
    }
    total
}

#[cfg(test)]
#[path = "../../../tests/rust/test_hierarchical_crossing.rs"]
mod tests;
