//! graph-layout CLI entry point.
//!
//! Reads a graph description, lays it out and prints one position per node.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

use graph_layout::config::{LayoutConfig, LayoutKind};
use graph_layout::{format_json, format_text, layout_text, read_input};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Grid,
    Tree,
    Hierarchical,
}

impl From<Kind> for LayoutKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Grid => LayoutKind::Grid,
            Kind::Tree => LayoutKind::Tree,
            Kind::Hierarchical => LayoutKind::Hierarchical,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

/// Lay out a directed graph and print node positions.
#[derive(Parser, Debug)]
#[command(
    name = "graph-layout",
    version = env!("GRAPH_LAYOUT_VERSION"),
    about = "Lay out a directed graph and print node positions"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<String>,

    /// Layout strategy (overrides the config file)
    #[arg(short = 'l', long = "layout", value_enum)]
    layout: Option<Kind>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn fail(message: String) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut config = match cli.config {
        Some(ref path) => LayoutConfig::load(path).unwrap_or_else(|e| fail(e.to_string())),
        None => LayoutConfig::new(),
    };
    if let Some(kind) = cli.layout {
        config.kind = kind.into();
    }
    debug!(?config, "configuration loaded");

    // Read input from file or stdin
    let text = read_input(cli.input.as_deref().map(Path::new))
        .unwrap_or_else(|e| fail(e.to_string()));

    let positions = layout_text(&text, &config).unwrap_or_else(|e| fail(e.to_string()));
    let rendered = match cli.format {
        Format::Text => format_text(&positions),
        Format::Json => format_json(&positions).unwrap_or_else(|e| fail(e.to_string())),
    };

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            fail(format!("cannot write '{}': {}", path, e));
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            fail(format!("cannot flush stdout: {}", e));
        }
    }
}
