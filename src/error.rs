//! Error types.
//!
//! `LayoutError` covers failures of the layout algorithms themselves;
//! `Error` is what the text-driven entry points return.

use thiserror::Error;

use crate::parser::ParseError;

/// Failure of a layout strategy.
///
/// None of these is recoverable: `Unsupported` means the caller asked for a
/// combination the strategy does not implement, `Internal` means an
/// algorithm invariant broke, `UnknownNode` means the layout was configured
/// with a node the view does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{layout} layout does not support {operation}")]
    Unsupported {
        layout: &'static str,
        operation: &'static str,
    },

    #[error("internal layout error: {0}")]
    Internal(String),

    #[error("node {0} is not part of the graph")]
    UnknownNode(String),
}

impl LayoutError {
    pub fn unsupported(layout: &'static str, operation: &'static str) -> Self {
        Self::Unsupported { layout, operation }
    }
}

/// Top-level error returned by [`crate::layout_text`], the loaders and the CLI.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("cannot serialize positions: {0}")]
    Output(#[source] serde_json::Error),

    #[error("unknown root node '{0}'")]
    UnknownRoot(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
