//! Layout strategies and the contract they share.
//!
//! Strategies:
//!   grid:         greedy lattice placement around the most connected node
//!   tree:         two-pass subtree allocation, one tree per root
//!   hierarchical: Sugiyama pipeline (layering, crossing minimization,
//!                 coordinate assignment)
//!
//! Every strategy commits positions through [`LayoutCore::set_resolved_location`],
//! which is the only place a scene is written and listeners hear about moves.

pub mod grid;
pub mod hierarchical;
pub mod listener;
pub mod tree;

use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::LayoutError;
use crate::geometry::Point;
use crate::scene::Scene;
use crate::view::GraphView;

pub use grid::GridGraphLayout;
pub use hierarchical::HierarchicalLayout;
pub use listener::{GraphLayoutListener, ListenerRegistry, SharedListener};
pub use tree::{TreeGraphLayout, TreePlacement};

// ─── LayoutCore ───────────────────────────────────────────────────────────────

/// State every strategy carries: its listeners and the animation flag.
pub struct LayoutCore<N> {
    listeners: ListenerRegistry<N>,
    animated: bool,
}

impl<N> Default for LayoutCore<N> {
    fn default() -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            animated: false,
        }
    }
}

impl<N: Debug> LayoutCore<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listeners(&self) -> &ListenerRegistry<N> {
        &self.listeners
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    /// Commit `location` for `node`.
    ///
    /// Nodes without a representation in `scene` are skipped silently.
    pub fn set_resolved_location<S: Scene<N>>(&self, scene: &mut S, node: &N, location: Point) {
        if !scene.contains(node) {
            trace!(?node, "no visual representation, skipping commit");
            return;
        }
        let previous = scene.location(node);
        if self.animated {
            scene.animate_location(node, location);
        } else {
            scene.set_location(node, location);
        }
        for listener in self.listeners.snapshot() {
            listener.node_location_changed(node, previous, location);
        }
    }
}

// ─── GraphLayout ──────────────────────────────────────────────────────────────

pub trait GraphLayout<N: Clone + Eq + Hash + Debug> {
    /// Short strategy name, used in logs and errors.
    fn name(&self) -> &'static str;

    fn core(&self) -> &LayoutCore<N>;

    /// Lay out every node of `view`.
    fn perform_graph_layout<G, S>(&self, view: &G, scene: &mut S) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>;

    /// Lay out only `nodes`. Strategies for which a partial layout makes no
    /// sense return [`LayoutError::Unsupported`].
    fn perform_nodes_layout<G, S>(
        &self,
        view: &G,
        scene: &mut S,
        nodes: &[N],
    ) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>;

    fn add_listener(&self, listener: SharedListener<N>) {
        self.core().listeners().add(listener);
    }

    fn remove_listener(&self, listener: &SharedListener<N>) {
        self.core().listeners().remove(listener);
    }

    /// Run the full-graph layout, bracketed by started/finished notifications.
    ///
    /// On error the finished notification is not sent.
    fn layout_graph<G, S>(&self, view: &G, scene: &mut S) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let listeners = self.core().listeners().snapshot();
        debug!(layout = self.name(), listeners = listeners.len(), "graph layout started");
        for listener in &listeners {
            listener.graph_layout_started();
        }
        self.perform_graph_layout(view, scene)?;
        for listener in &listeners {
            listener.graph_layout_finished();
        }
        debug!(layout = self.name(), "graph layout finished");
        Ok(())
    }

    /// Run the partial layout of `nodes`, bracketed by started/finished notifications.
    fn layout_nodes<G, S>(&self, view: &G, scene: &mut S, nodes: &[N]) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let listeners = self.core().listeners().snapshot();
        debug!(layout = self.name(), nodes = nodes.len(), "nodes layout started");
        for listener in &listeners {
            listener.nodes_layout_started(nodes);
        }
        self.perform_nodes_layout(view, scene, nodes)?;
        for listener in &listeners {
            listener.nodes_layout_finished(nodes);
        }
        debug!(layout = self.name(), "nodes layout finished");
        Ok(())
    }
}

/// Running start offset of each band, with `gap` between consecutive bands.
pub(crate) fn band_offsets(sizes: &[i64], gap: i64) -> Vec<i64> {
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut offset = 0;
    for size in sizes {
        offsets.push(offset);
        offset += size + gap;
    }
    offsets
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_core.rs"]
mod tests;
