//! Hierarchical (Sugiyama) layout.
//!
//! Stages, each in its own module:
//!   directed:   the view as a vertex/edge model, cycles broken
//!   layered:    longest-path layers, long edges split by dummy vertices
//!   crossing:   barycenter crossing minimization
//!   coordinate: barycenter x-coordinate assignment
//!
//! This module runs the stages and turns layers and x coordinates into
//! pixels: one band per layer, one column per distinct x, each as large as
//! its largest vertex, with every vertex centered in its column.

pub mod coordinate;
pub mod crossing;
pub mod directed;
pub mod layered;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::{GraphLayout, LayoutCore, band_offsets};
use crate::error::LayoutError;
use crate::geometry::Point;
use crate::scene::Scene;
use crate::view::{GraphView, SubsetView};

pub use coordinate::{BarycenterXCoordinateAssigner, XCoordinateAssigner};
pub use crossing::{BarycenterCrossingMinimizer, CrossingMinimizer, count_crossings};
pub use directed::{DirectedGraph, DummyKind, Vertex, VertexId, VertexKind};
pub use layered::LayeredGraph;

pub struct HierarchicalLayout<N> {
    core: LayoutCore<N>,
    origin: Point,
    horizontal_gap: i64,
    vertical_gap: i64,
    inverted: bool,
}

impl<N> Default for HierarchicalLayout<N> {
    fn default() -> Self {
        Self {
            core: LayoutCore::default(),
            origin: Point::ORIGIN,
            horizontal_gap: 0,
            vertical_gap: 0,
            inverted: false,
        }
    }
}

impl<N: Clone + Eq + Hash + Debug> HierarchicalLayout<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Pixel gaps between columns and between layers.
    pub fn with_gaps(mut self, horizontal_gap: i64, vertical_gap: i64) -> Self {
        self.horizontal_gap = horizontal_gap;
        self.vertical_gap = vertical_gap;
        self
    }

    /// Put the root layer at the bottom instead of the top.
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.core.set_animated(animated);
        self
    }

    /// Run every stage up to and including coordinate assignment.
    pub fn build_layered<G, S>(
        &self,
        view: &G,
        scene: &S,
    ) -> Result<LayeredGraph<N, G::Edge>, LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let directed = DirectedGraph::build(view, scene);
        let mut layered = LayeredGraph::create(directed)?;
        BarycenterCrossingMinimizer.minimize_crossings(&mut layered);
        BarycenterXCoordinateAssigner.assign_coordinates(&mut layered);
        Ok(layered)
    }

    /// Pixel location of every real vertex.
    pub fn resolve<G, S>(&self, view: &G, scene: &S) -> Result<Vec<(N, Point)>, LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let layered = self.build_layered(view, scene)?;
        let layer_count = layered.layer_count();
        let band = |layer: usize| {
            if self.inverted {
                layer_count - 1 - layer
            } else {
                layer
            }
        };

        let mut band_height = vec![0i64; layer_count];
        let mut column_width: BTreeMap<i32, i64> = BTreeMap::new();
        for (layer, vertices) in layered.layers().iter().enumerate() {
            for &v in vertices {
                let vertex = layered.vertex(v);
                let height = &mut band_height[band(layer)];
                *height = (*height).max(vertex.size.height);
                let width = column_width.entry(vertex.x).or_insert(0);
                *width = (*width).max(vertex.size.width);
            }
        }

        let band_offset = band_offsets(&band_height, self.vertical_gap);
        let widths: Vec<i64> = column_width.values().copied().collect();
        let column_offset: BTreeMap<i32, (i64, i64)> = column_width
            .keys()
            .copied()
            .zip(band_offsets(&widths, self.horizontal_gap).into_iter().zip(widths))
            .collect();

        let mut placements = Vec::new();
        for (layer, vertices) in layered.layers().iter().enumerate() {
            for &v in vertices {
                let vertex = layered.vertex(v);
                let Some(node) = vertex.node() else {
                    continue;
                };
                let (offset, width) = column_offset.get(&vertex.x).copied().unwrap_or((0, 0));
                let (dx, dy) = scene.bounds(node).map_or((0, 0), |b| (b.x, b.y));
                let location = Point::new(
                    self.origin.x + offset + (width - vertex.size.width) / 2 - dx,
                    self.origin.y + band_offset[band(layer)] - dy,
                );
                placements.push((node.clone(), location));
            }
        }
        debug!(
            layers = layer_count,
            columns = column_offset.len(),
            nodes = placements.len(),
            inverted = self.inverted,
            "hierarchical layout resolved"
        );
        Ok(placements)
    }

    fn commit<S: Scene<N>>(&self, scene: &mut S, placements: Vec<(N, Point)>) {
        for (node, location) in placements {
            self.core.set_resolved_location(scene, &node, location);
        }
    }
}

impl<N: Clone + Eq + Hash + Debug> GraphLayout<N> for HierarchicalLayout<N> {
    fn name(&self) -> &'static str {
        "hierarchical"
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
        self.commit(scene, placements);
        Ok(())
    }

    fn perform_nodes_layout<G, S>(
        &self,
        view: &G,
        scene: &mut S,
        nodes: &[N],
    ) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let subset = SubsetView::new(view, nodes);
        let placements = self.resolve(&subset, &*scene)?;
        self.commit(scene, placements);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../tests/rust/test_layout_hierarchical.rs"]
mod tests;
