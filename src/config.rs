//! Run configuration resolved from command-line arguments and environment.

use crate::error::Result;
use crate::graph::{Algorithm, Graph};
use crate::input::{self, InputFormat};
use crate::presets;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable consulted for the default algorithm.
pub const ALGORITHM_ENV: &str = "TOPO_ALGORITHM";

/// Environment variable consulted for the default output format.
pub const FORMAT_ENV: &str = "TOPO_FORMAT";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON, as consumed by a renderer
    Json,
}

/// Where the graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    Stdin,
    File(PathBuf),
    Preset(String),
}

impl GraphSource {
    /// `-` or no path means stdin; a preset name wins over both.
    pub fn from_args(file: Option<PathBuf>, preset: Option<String>) -> Self {
        match (preset, file) {
            (Some(name), _) => GraphSource::Preset(name),
            (None, Some(path)) if path != Path::new("-") => GraphSource::File(path),
            (None, _) => GraphSource::Stdin,
        }
    }

    fn path(&self) -> Option<&Path> {
        match self {
            GraphSource::File(path) => Some(path.as_path()),
            GraphSource::Stdin | GraphSource::Preset(_) => None,
        }
    }
}

/// Everything a command needs to load a graph and run an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: GraphSource,
    pub input_format: InputFormat,
    pub algorithm: Algorithm,
    pub output: OutputFormat,
}

impl Config {
    /// Read and parse the configured graph.
    pub fn load_graph(&self) -> Result<Graph<String>> {
        let (text, format) = match &self.source {
            GraphSource::Preset(name) => (presets::get(name)?.source.to_string(), InputFormat::Text),
            GraphSource::File(path) => (fs::read_to_string(path)?, self.input_format),
            GraphSource::Stdin => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                (buffer, self.input_format)
            }
        };

        let format = format.resolve(self.source.path());
        let graph = input::parse(&text, format)?;
        debug!(
            source = ?self.source,
            ?format,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "graph loaded"
        );
        Ok(graph)
    }
}
