//! Line-oriented graph description parser.
//!
//! ```text
//! # comment
//! A [120x40]      node with a measured size
//! B               node with the default size
//! A -> B -> C     edges, `-->` also accepted
//! ```
//!
//! Nodes that only ever appear in edges get the configured default size.

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::geometry::Rect;
use crate::scene::MemoryScene;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl ParseError {
    fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// A parsed description: the graph, a scene holding every node's size, and
/// the name of each node.
#[derive(Debug, Clone)]
pub struct ParsedGraph {
    pub graph: DiGraph<String, ()>,
    pub scene: MemoryScene<NodeIndex>,
    names: IndexMap<String, NodeIndex>,
}

impl ParsedGraph {
    pub fn node(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }

    pub fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// Node names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}

struct Grammar {
    declaration: Regex,
    arrow: Regex,
    name: Regex,
}

impl Grammar {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            declaration: Regex::new(r"^([\w.]+)(?:\s*\[\s*(\d+)\s*x\s*(\d+)\s*\])?$")?,
            arrow: Regex::new(r"\s*--?>\s*")?,
            name: Regex::new(r"^[\w.]+$")?,
        })
    }
}

struct Builder<'c> {
    config: &'c LayoutConfig,
    parsed: ParsedGraph,
}

impl Builder<'_> {
    fn default_bounds(&self) -> Rect {
        Rect::sized(self.config.default_node_width, self.config.default_node_height)
    }

    /// Index of `name`, creating it with the default size on first sight.
    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.parsed.names.get(name) {
            return idx;
        }
        let idx = self.parsed.graph.add_node(name.to_string());
        self.parsed.names.insert(name.to_string(), idx);
        let bounds = self.default_bounds();
        self.parsed.scene.insert(idx, bounds);
        idx
    }

    fn declare(&mut self, name: &str, bounds: Option<Rect>) {
        let idx = self.node(name);
        if let Some(bounds) = bounds {
            self.parsed.scene.insert(idx, bounds);
        }
    }
}

fn parse_size(line: usize, digits: &str) -> Result<i64, ParseError> {
    digits
        .parse()
        .map_err(|_| ParseError::syntax(line, format!("size '{digits}' is out of range")))
}

/// Parse `src` into a graph and a scene of node sizes.
pub fn parse(src: &str, config: &LayoutConfig) -> Result<ParsedGraph, ParseError> {
    let grammar = Grammar::new()?;
    let mut builder = Builder {
        config,
        parsed: ParsedGraph {
            graph: DiGraph::new(),
            scene: MemoryScene::new(),
            names: IndexMap::new(),
        },
    };

    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        if grammar.arrow.is_match(text) {
            let names: Vec<&str> = grammar.arrow.split(text).collect();
            for name in &names {
                if !grammar.name.is_match(name) {
                    let message = if name.contains('[') {
                        "sizes are only allowed on node declarations".to_string()
                    } else if name.is_empty() {
                        "edge is missing an endpoint".to_string()
                    } else {
                        format!("invalid node name '{name}'")
                    };
                    return Err(ParseError::syntax(line, message));
                }
            }
            for pair in names.windows(2) {
                let source = builder.node(pair[0]);
                let target = builder.node(pair[1]);
                builder.parsed.graph.add_edge(source, target, ());
            }
            continue;
        }

        let Some(caps) = grammar.declaration.captures(text) else {
            return Err(ParseError::syntax(line, format!("cannot parse '{text}'")));
        };
        let bounds = match (caps.get(2), caps.get(3)) {
            (Some(w), Some(h)) => Some(Rect::sized(
                parse_size(line, w.as_str())?,
                parse_size(line, h.as_str())?,
            )),
            _ => None,
        };
        builder.declare(&caps[1], bounds);
    }

    let parsed = builder.parsed;
    debug!(
        nodes = parsed.graph.node_count(),
        edges = parsed.graph.edge_count(),
        "graph description parsed"
    );
    Ok(parsed)
}

#[cfg(test)]
#[path = "../tests/rust/test_parser.rs"]
mod tests;
