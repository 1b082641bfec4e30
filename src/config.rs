//! Layout configuration.
//!
//! Every field has a default, so a JSON config file only needs the keys it
//! overrides.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::geometry::Point;
use crate::layout::tree::Orientation;

/// Which layout strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Grid,
    Tree,
    #[default]
    Hierarchical,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub kind: LayoutKind,
    /// Where the tree and hierarchical layouts start placing nodes.
    pub origin: Point,
    pub horizontal_gap: i64,
    pub vertical_gap: i64,
    /// Tree layout growth direction.
    pub orientation: Orientation,
    /// Grid layout: use only one color of a chessboard.
    pub checker: bool,
    /// Hierarchical layout: roots at the bottom.
    pub inverted: bool,
    /// Commit positions through the scene's animation path.
    pub animated: bool,
    /// Tree layout: name of the single root. `None` = every node without
    /// incoming edges.
    pub root: Option<String>,
    /// Size given to nodes used in edges but never declared.
    pub default_node_width: i64,
    pub default_node_height: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::default(),
            origin: Point::ORIGIN,
            horizontal_gap: 20,
            vertical_gap: 40,
            orientation: Orientation::default(),
            checker: false,
            inverted: false,
            animated: false,
            root: None,
            default_node_width: 80,
            default_node_height: 30,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config, filling missing keys with defaults.
    pub fn from_json(src: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(src)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_json(&src)?)
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
