//! Scene: the visual side a layout reads sizes from and commits positions to.
//!
//! The graph view and the scene may disagree transiently: a node can exist in
//! the view while the scene has no representation for it. Layouts treat such
//! nodes as size 0 and skip their commits.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::geometry::{Point, Rect};

pub trait Scene<N> {
    /// Whether `node` has a visual representation at all.
    fn contains(&self, node: &N) -> bool;

    /// Measured preferred bounds of `node`, `None` if not (yet) measured.
    fn bounds(&self, node: &N) -> Option<Rect>;

    /// Current preferred location of `node`, `None` if never placed.
    fn location(&self, node: &N) -> Option<Point>;

    /// Move `node` immediately.
    fn set_location(&mut self, node: &N, location: Point);

    /// Move `node` through an animated transition.
    fn animate_location(&mut self, node: &N, location: Point) {
        self.set_location(node, location);
    }
}

#[derive(Debug, Clone, Default)]
struct SceneEntry {
    bounds: Option<Rect>,
    location: Option<Point>,
    animated: bool,
}

/// In-memory scene keyed by node handle.
#[derive(Debug, Clone)]
pub struct MemoryScene<N: Eq + Hash> {
    entries: IndexMap<N, SceneEntry>,
}

impl<N: Eq + Hash> Default for MemoryScene<N> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash + Debug> MemoryScene<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or re-measure) a node with the given bounds.
    pub fn insert(&mut self, node: N, bounds: Rect) {
        self.entries.entry(node).or_default().bounds = Some(bounds);
    }

    /// Add a node that has a representation but no measured bounds.
    pub fn insert_unmeasured(&mut self, node: N) {
        self.entries.entry(node).or_default();
    }

    pub fn remove(&mut self, node: &N) {
        self.entries.shift_remove(node);
    }

    /// Whether the last commit for `node` went through `animate_location`.
    pub fn was_animated(&self, node: &N) -> bool {
        self.entries.get(node).is_some_and(|e| e.animated)
    }

    /// All placed nodes and their locations, in insertion order.
    pub fn locations(&self) -> impl Iterator<Item = (&N, Point)> {
        self.entries
            .iter()
            .filter_map(|(n, e)| e.location.map(|p| (n, p)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Clone + Eq + Hash + Debug> Scene<N> for MemoryScene<N> {
    fn contains(&self, node: &N) -> bool {
        self.entries.contains_key(node)
    }

    fn bounds(&self, node: &N) -> Option<Rect> {
        self.entries.get(node).and_then(|e| e.bounds)
    }

    fn location(&self, node: &N) -> Option<Point> {
        self.entries.get(node).and_then(|e| e.location)
    }

    fn set_location(&mut self, node: &N, location: Point) {
        if let Some(entry) = self.entries.get_mut(node) {
            entry.location = Some(location);
            entry.animated = false;
        }
    }

    fn animate_location(&mut self, node: &N, location: Point) {
        if let Some(entry) = self.entries.get_mut(node) {
            entry.location = Some(location);
            entry.animated = true;
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_scene.rs"]
mod tests;
