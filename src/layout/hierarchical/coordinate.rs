//! Horizontal coordinate assignment by the priority method.
//!
//! Starting from the ranks left by crossing minimization, each layer is
//! pulled toward the barycenters of its neighbors in the layer just placed.
//! Vertices move in descending priority; a vertex never passes a vertex of
//! the same or higher priority on its right and pushes lower-priority ones
//! along, keeping order and a spacing of at least one unit.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::crossing::{Side, barycenter};
use super::layered::LayeredGraph;

const ITERATIONS: usize = 1;

pub trait XCoordinateAssigner {
    fn assign_coordinates<N, E>(&self, graph: &mut LayeredGraph<N, E>)
    where
        N: Clone + Eq + Hash + Debug,
        E: Clone + Debug;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BarycenterXCoordinateAssigner;

impl XCoordinateAssigner for BarycenterXCoordinateAssigner {
    fn assign_coordinates<N, E>(&self, graph: &mut LayeredGraph<N, E>)
    where
        N: Clone + Eq + Hash + Debug,
        E: Clone + Debug,
    {
        let layers = graph.layer_count();
        for _ in 0..ITERATIONS {
            for lower in 1..layers {
                place_layer(graph, lower, Side::Upper);
            }
            for upper in (0..layers.saturating_sub(1)).rev() {
                place_layer(graph, upper, Side::Lower);
            }
        }
        let width = graph
            .layers()
            .iter()
            .filter_map(|l| l.last())
            .map(|&v| graph.vertex(v).x)
            .max()
            .unwrap_or(0);
        debug!(layers, width, "x coordinates assigned");
    }
}

/// Priority of each vertex in `layer`: its neighbor count on `side`, or for
/// dummies one more than the highest real priority in the layer.
pub(crate) fn priorities<N, E>(
    graph: &LayeredGraph<N, E>,
    layer: usize,
    side: Side,
) -> Vec<usize>
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    let order = graph.layer_vertices(layer);
    let degree: Vec<usize> = order
        .iter()
        .map(|&v| match side {
            Side::Upper => graph.graph().upper_neighbors(v).len(),
            Side::Lower => graph.graph().lower_neighbors(v).len(),
        })
        .collect();
    let max_real = order
        .iter()
        .zip(&degree)
        .filter(|(v, _)| !graph.vertex(**v).is_dummy())
        .map(|(_, d)| *d)
        .max()
        .unwrap_or(0);
    order
        .iter()
        .zip(degree)
        .map(|(&v, d)| if graph.vertex(v).is_dummy() { max_real + 1 } else { d })
        .collect()
}

fn place_layer<N, E>(graph: &mut LayeredGraph<N, E>, layer: usize, side: Side)
where
    N: Clone + Eq + Hash + Debug,
    E: Clone + Debug,
{
    let order = graph.layer_vertices(layer).to_vec();
    let n = order.len();
    let mut xs: Vec<i32> = order.iter().map(|&v| graph.vertex(v).x).collect();
    let targets: Vec<Option<f64>> = order.iter().map(|&v| barycenter(graph, v, side)).collect();
    let priority = priorities(graph, layer, side);

    // highest priority first, left to right among equals
    let mut by_priority: Vec<usize> = (0..n).collect();
    by_priority.sort_by(|&a, &b| priority[b].cmp(&priority[a]));

    for j in by_priority {
        // no neighbors on this side: stay put
        let Some(target) = targets[j] else {
            continue;
        };
        let target = target as i32;
        if target <= xs[j] {
            continue;
        }
        let mut limit = target;
        for k in (j + 1)..n {
            if priority[k] >= priority[j] {
                limit = limit.min(xs[k] - (k - j) as i32);
                break;
            }
        }
        if limit <= xs[j] {
            continue;
        }
        xs[j] = limit;
        for k in (j + 1)..n {
            if xs[k] > xs[k - 1] {
                break;
            }
            xs[k] = xs[k - 1] + 1;
        }
    }

    for (v, x) in order.into_iter().zip(xs) {
        graph.vertex_mut(v).x = x;
    }
}

#[cfg(test)]
#[path = "../../../tests/rust/test_hierarchical_coordinate.rs"]
mod tests;
