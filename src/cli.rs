use crate::config::{ALGORITHM_ENV, Config, FORMAT_ENV, GraphSource, OutputFormat};
use crate::graph::Algorithm;
use crate::input::InputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "topo")]
#[command(about = "Topological ordering with replayable step traces")]
#[command(version)]
pub struct Cli {
    /// Log engine decisions to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the graph from.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Edge list file (`-` or omitted reads stdin)
    pub file: Option<PathBuf>,

    /// Use a bundled example graph instead of a file
    #[arg(long, conflicts_with = "file")]
    pub preset: Option<String>,

    /// Input encoding
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    pub input_format: InputFormat,
}

/// Engine and output selection.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Ordering engine
    #[arg(short, long, value_enum, env = ALGORITHM_ENV, default_value_t = Algorithm::Kahn)]
    pub algorithm: Algorithm,

    /// Output format
    #[arg(short, long, value_enum, env = FORMAT_ENV, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a topological order, or report a cycle (exit code 2)
    Sort {
        #[command(flatten)]
        graph: GraphArgs,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Print every step the engine took
    Trace {
        #[command(flatten)]
        graph: GraphArgs,
        #[command(flatten)]
        run: RunArgs,
    },

    /// Print a single trace step by index
    Step {
        #[command(flatten)]
        graph: GraphArgs,
        #[command(flatten)]
        run: RunArgs,
        /// Zero-based step index
        #[arg(short, long)]
        index: usize,
    },

    /// Run both engines and print their orders side by side
    Compare {
        #[command(flatten)]
        graph: GraphArgs,
        /// Output format
        #[arg(short, long, value_enum, env = FORMAT_ENV, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the bundled example graphs
    Presets,
}

impl GraphArgs {
    pub fn into_config(self, algorithm: Algorithm, output: OutputFormat) -> Config {
        Config {
            source: GraphSource::from_args(self.file, self.preset),
            input_format: self.input_format,
            algorithm,
            output,
        }
    }
}
