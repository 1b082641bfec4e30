//! graph-layout: automatic layout of directed graphs.
//!
//! Three strategies place the nodes of any [`view::GraphView`] and commit
//! their positions to a [`scene::Scene`]:
//!
//!   grid:         greedy placement on an integer lattice
//!   tree:         classic two-pass tree layout
//!   hierarchical: Sugiyama layering with crossing minimization
//!
//! Public API: the strategies in [`layout`], plus [`layout_text`], which
//! parses the line-oriented text format of [`parser`] and returns positions.

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod parser;
pub mod scene;
pub mod view;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::Serialize;

use crate::config::{LayoutConfig, LayoutKind};
use crate::layout::{GraphLayout, GridGraphLayout, HierarchicalLayout, TreeGraphLayout};
use crate::parser::ParsedGraph;
use crate::scene::Scene;

pub use crate::error::{Error, LayoutError};
pub use crate::geometry::{Point, Rect, Size};

/// Final position and size of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodePosition {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Run the layout selected by `config` on a parsed description.
pub fn run_layout(parsed: &mut ParsedGraph, config: &LayoutConfig) -> Result<(), Error> {
    let root = match config.root.as_deref() {
        Some(name) => Some(
            parsed
                .node(name)
                .ok_or_else(|| Error::UnknownRoot(name.to_string()))?,
        ),
        None => None,
    };
    let graph = &parsed.graph;
    let scene = &mut parsed.scene;
    match config.kind {
        LayoutKind::Grid => GridGraphLayout::new()
            .with_checker(config.checker)
            .with_gaps(config.horizontal_gap, config.vertical_gap)
            .with_animated(config.animated)
            .layout_graph(graph, scene)?,
        LayoutKind::Tree => {
            let mut layout = TreeGraphLayout::new()
                .with_origin(config.origin)
                .with_gaps(config.horizontal_gap, config.vertical_gap)
                .with_orientation(config.orientation)
                .with_animated(config.animated);
            if let Some(root) = root {
                layout = layout.with_root(root);
            }
            layout.layout_graph(graph, scene)?
        }
        LayoutKind::Hierarchical => HierarchicalLayout::new()
            .with_origin(config.origin)
            .with_gaps(config.horizontal_gap, config.vertical_gap)
            .with_inverted(config.inverted)
            .with_animated(config.animated)
            .layout_graph(graph, scene)?,
    }
    Ok(())
}

/// Every placed node of `parsed`, in declaration order.
pub fn positions(parsed: &ParsedGraph) -> Vec<NodePosition> {
    parsed
        .names()
        .filter_map(|name| {
            let node = parsed.node(name)?;
            let location = parsed.scene.location(&node)?;
            let bounds = parsed.scene.bounds(&node).unwrap_or_default();
            Some(NodePosition {
                name: name.to_string(),
                x: location.x,
                y: location.y,
                width: bounds.width,
                height: bounds.height,
            })
        })
        .collect()
}

/// Read a graph description from `path`, or from stdin when there is none.
pub fn read_input(path: Option<&Path>) -> Result<String, Error> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| Error::Io {
                    path: "stdin".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

/// Parse a graph description, lay it out and return every node's position.
pub fn layout_text(src: &str, config: &LayoutConfig) -> Result<Vec<NodePosition>, Error> {
    let mut parsed = parser::parse(src, config)?;
    run_layout(&mut parsed, config)?;
    Ok(positions(&parsed))
}

/// One `name x y width height` line per node.
pub fn format_text(positions: &[NodePosition]) -> String {
    positions
        .iter()
        .map(|p| format!("{} {} {} {} {}\n", p.name, p.x, p.y, p.width, p.height))
        .collect()
}

pub fn format_json(positions: &[NodePosition]) -> Result<String, Error> {
    serde_json::to_string_pretty(positions).map_err(Error::Output)
}

#[cfg(test)]
#[path = "../tests/rust/test_api.rs"]
mod tests;
