use thiserror::Error;

/// All possible errors outside the ordering engines.
///
/// The engines themselves never fail: a cycle is reported through the
/// returned outcome, not through this type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Line {line}: cannot read edge from `{content}`")]
    MalformedEdge { line: usize, content: String },

    #[error("Invalid graph JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Unknown preset `{name}`. Available: {available}", available = format_names(available))]
    UnknownPreset {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("Unknown algorithm `{0}`. Use `kahn` or `dfs`.")]
    UnknownAlgorithm(String),

    #[error("Step {index} is out of range: trace has {len} steps")]
    StepOutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_names(names: &[&str]) -> String {
    names.join(", ")
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
