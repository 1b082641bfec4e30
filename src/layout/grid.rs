//! Grid layout.
//!
//! Nodes are placed on an integer lattice by greedy expansion from the most
//! connected node: each expanded node pulls its unplaced neighbors onto the
//! free lattice points closest to it, walking square rings outward. The
//! lattice is then turned into pixels, one band per lattice row and column,
//! each band as wide (tall) as its largest node.

use std::collections::{HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::{GraphLayout, LayoutCore, band_offsets};
use crate::error::LayoutError;
use crate::geometry::{Point, Rect};
use crate::scene::Scene;
use crate::view::GraphView;

// ─── Lattice ──────────────────────────────────────────────────────────────────

/// A point of the integer lattice nodes are first placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lattice {
    pub x: i64,
    pub y: i64,
}

impl Lattice {
    pub const CENTER: Lattice = Lattice { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Black square of a chessboard.
    pub fn is_even(&self) -> bool {
        (self.x + self.y).rem_euclid(2) == 0
    }
}

impl Add for Lattice {
    type Output = Lattice;

    fn add(self, rhs: Lattice) -> Lattice {
        Lattice::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Map a spiral index to a lattice offset from the center.
///
/// Index 0 is the center. Ring `r` holds the `8r` indices from `(2r-1)²` to
/// `(2r+1)² - 1`, walked clockwise from its top-left corner: top edge, right
/// edge, bottom edge, left edge, `2r` points each.
pub fn ring_point(index: usize) -> Result<Lattice, LayoutError> {
    if index == 0 {
        return Ok(Lattice::CENTER);
    }
    let mut ring: usize = 1;
    while (2 * ring + 1) * (2 * ring + 1) <= index {
        ring += 1;
    }
    let offset = index - (2 * ring - 1) * (2 * ring - 1);
    let side_len = 2 * ring;
    let side = offset / side_len;
    let step = (offset % side_len) as i64;
    let r = ring as i64;
    match side {
        0 => Ok(Lattice::new(-r + step, -r)),
        1 => Ok(Lattice::new(r, -r + step)),
        2 => Ok(Lattice::new(r - step, r)),
        3 => Ok(Lattice::new(-r, r - step)),
        _ => Err(LayoutError::Internal(format!(
            "ring index {index} derived side {side} on ring {ring}"
        ))),
    }
}

// ─── GridGraphLayout ──────────────────────────────────────────────────────────

pub struct GridGraphLayout<N> {
    core: LayoutCore<N>,
    checker: bool,
    horizontal_gap: i64,
    vertical_gap: i64,
}

impl<N> Default for GridGraphLayout<N> {
    fn default() -> Self {
        Self {
            core: LayoutCore::default(),
            checker: false,
            horizontal_gap: 0,
            vertical_gap: 0,
        }
    }
}

impl<N: Clone + Eq + Hash + Debug> GridGraphLayout<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only use even lattice points (one color of a chessboard).
    pub fn with_checker(mut self, checker: bool) -> Self {
        self.checker = checker;
        self
    }

    /// Pixel gaps inserted between lattice columns and rows.
    pub fn with_gaps(mut self, horizontal_gap: i64, vertical_gap: i64) -> Self {
        self.horizontal_gap = horizontal_gap;
        self.vertical_gap = vertical_gap;
        self
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.core.set_animated(animated);
        self
    }

    /// Place every node of `view` on the lattice.
    ///
    /// Pure function of the view and the checker flag: a fresh lattice is
    /// built on every call.
    pub fn resolve_lattice<G>(&self, view: &G) -> Result<IndexMap<N, Lattice>, LayoutError>
    where
        G: GraphView<Node = N>,
    {
        let adjacency = undirected_adjacency(view);
        let grade = |n: &N| adjacency.get(n).map_or(0, IndexSet::len);

        let mut unresolved: IndexSet<N> = adjacency.keys().cloned().collect();
        let mut placed: IndexMap<N, Lattice> = IndexMap::new();
        let mut occupied: HashSet<Lattice> = HashSet::new();
        let mut queue: VecDeque<N> = VecDeque::new();
        let mut center = Lattice::CENTER;

        while !unresolved.is_empty() {
            let node = match queue.pop_front() {
                Some(node) => node,
                None => {
                    let mut best: Option<(&N, usize)> = None;
                    for n in &unresolved {
                        let g = grade(n);
                        if best.is_none_or(|(_, bg)| g > bg) {
                            best = Some((n, g));
                        }
                    }
                    let Some((node, _)) = best else { break };
                    let node = node.clone();
                    let point = self.free_point(center, 0, &occupied)?;
                    unresolved.shift_remove(&node);
                    occupied.insert(point);
                    placed.insert(node.clone(), point);
                    node
                }
            };
            let Some(&node_point) = placed.get(&node) else {
                return Err(LayoutError::Internal(format!(
                    "expanding {node:?} before it was placed"
                )));
            };
            center = node_point;

            let mut neighbors: Vec<N> = adjacency
                .get(&node)
                .map(|c| c.iter().filter(|n| unresolved.contains(*n)).cloned().collect())
                .unwrap_or_default();
            neighbors.sort_by_key(|n| grade(n));
            for neighbor in neighbors {
                let point = self.free_point(center, 1, &occupied)?;
                unresolved.shift_remove(&neighbor);
                occupied.insert(point);
                placed.insert(neighbor.clone(), point);
                queue.push_back(neighbor);
            }
        }

        debug!(nodes = placed.len(), checker = self.checker, "grid lattice resolved");
        Ok(placed)
    }

    /// First free (and, in checker mode, even) point around `center`,
    /// scanning ring indices from `start`.
    fn free_point(
        &self,
        center: Lattice,
        start: usize,
        occupied: &HashSet<Lattice>,
    ) -> Result<Lattice, LayoutError> {
        let mut index = start;
        loop {
            let point = center + ring_point(index)?;
            if !occupied.contains(&point) && (!self.checker || point.is_even()) {
                return Ok(point);
            }
            index += 1;
        }
    }

    /// Convert lattice points into pixels and commit them.
    fn commit<S: Scene<N>>(&self, scene: &mut S, lattice: &IndexMap<N, Lattice>) {
        let (Some(min_x), Some(max_x)) = (
            lattice.values().map(|p| p.x).min(),
            lattice.values().map(|p| p.x).max(),
        ) else {
            return;
        };
        let min_y = lattice.values().map(|p| p.y).min().unwrap_or(0);
        let max_y = lattice.values().map(|p| p.y).max().unwrap_or(0);

        let measured: Vec<(&N, Lattice, Rect)> = lattice
            .iter()
            .filter(|(n, _)| scene.contains(n))
            .filter_map(|(n, p)| scene.bounds(n).map(|b| (n, *p, b)))
            .collect();

        let mut column_width = vec![0i64; (max_x - min_x + 1) as usize];
        let mut row_height = vec![0i64; (max_y - min_y + 1) as usize];
        for (_, p, bounds) in &measured {
            let col = (p.x - min_x) as usize;
            let row = (p.y - min_y) as usize;
            column_width[col] = column_width[col].max(bounds.width);
            row_height[row] = row_height[row].max(bounds.height);
        }

        let column_offset = band_offsets(&column_width, self.horizontal_gap);
        let row_offset = band_offsets(&row_height, self.vertical_gap);

        for (node, p, bounds) in measured {
            let location = Point::new(
                column_offset[(p.x - min_x) as usize] - bounds.x,
                row_offset[(p.y - min_y) as usize],
            );
            self.core.set_resolved_location(scene, node, location);
        }
    }
}

/// node → neighbors, edge direction ignored, self loops dropped.
fn undirected_adjacency<G: GraphView>(view: &G) -> IndexMap<G::Node, IndexSet<G::Node>> {
    let nodes: IndexSet<G::Node> = view.nodes().into_iter().collect();
    let mut adjacency = IndexMap::new();
    for node in &nodes {
        let mut connected: IndexSet<G::Node> = IndexSet::new();
        for edge in view.node_edges(node, true, false) {
            if let Some(target) = view.edge_target(&edge) {
                connected.insert(target);
            }
        }
        for edge in view.node_edges(node, false, true) {
            if let Some(source) = view.edge_source(&edge) {
                connected.insert(source);
            }
        }
        connected.retain(|n| n != node && nodes.contains(n));
        adjacency.insert(node.clone(), connected);
    }
    adjacency
}

impl<N: Clone + Eq + Hash + Debug> GraphLayout<N> for GridGraphLayout<N> {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn core(&self) -> &LayoutCore<N> {
        &self.core
    }

    fn perform_graph_layout<G, S>(&self, view: &G, scene: &mut S) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        let lattice = self.resolve_lattice(view)?;
        self.commit(scene, &lattice);
        Ok(())
    }

    fn perform_nodes_layout<G, S>(
        &self,
        _view: &G,
        _scene: &mut S,
        _nodes: &[N],
    ) -> Result<(), LayoutError>
    where
        G: GraphView<Node = N>,
        S: Scene<N>,
    {
        Err(LayoutError::unsupported("grid", "partial node layout"))
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_grid.rs"]
mod tests;
