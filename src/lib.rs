//! # topo - traced topological ordering
//!
//! Orders the vertices of a directed graph with either Kahn's algorithm or a
//! depth-first postorder walk, reporting cycles instead of failing. Every
//! decision either engine makes is recorded as a self-contained trace step
//! that a renderer can replay.

pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod playback;
pub mod presets;
pub mod trace;

pub use error::{Error, Result};
pub use graph::{Algorithm, Graph, Report, Vertex, dfs_sort, kahn_sort};
pub use playback::Playback;
pub use trace::{DfsStep, KahnStep, SortOutcome, Step, TraceRecord, VisitStatus};
