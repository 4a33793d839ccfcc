//! Turning edge lists into a [`Graph`].
//!
//! Two encodings are understood. The text form has one entry per line:
//!
//! ```text
//! # comment
//! A -> B
//! B,C ; C D
//! X
//! ```
//!
//! where a lone identifier declares an isolated vertex. The JSON form is either
//! `{"edges": [["A", "B"]], "nodes": ["X"]}` or a bare array of pairs.

use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Encoding of graph input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick from the file extension: `.json` is JSON, anything else text
    #[default]
    Auto,
    Text,
    Json,
}

impl InputFormat {
    /// Settle `Auto` using the path's extension.
    pub fn resolve(self, path: Option<&Path>) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_json = path
                    .and_then(Path::extension)
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                if is_json {
                    InputFormat::Json
                } else {
                    InputFormat::Text
                }
            }
            other => other,
        }
    }
}

/// Structured graph description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub nodes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Document(GraphDocument),
    Pairs(Vec<(String, String)>),
}

impl GraphDocument {
    /// Build the graph: edges first, in order, then isolated vertices.
    pub fn into_graph(self) -> Graph<String> {
        let mut graph = Graph::from_edges(self.edges);
        for node in self.nodes {
            graph.add_isolated_vertex(node);
        }
        graph
    }
}

/// Parse `source` in the given format. `Auto` is treated as text.
pub fn parse(source: &str, format: InputFormat) -> Result<Graph<String>> {
    let doc = match format {
        InputFormat::Json => parse_json(source)?,
        InputFormat::Auto | InputFormat::Text => parse_text(source)?,
    };
    Ok(doc.into_graph())
}

/// Parse the line-oriented text form.
pub fn parse_text(source: &str) -> Result<GraphDocument> {
    let mut doc = GraphDocument::default();

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        for entry in line.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            match parse_entry(entry) {
                Some(Entry::Edge(source, target)) => doc.edges.push((source, target)),
                Some(Entry::Node(node)) => doc.nodes.push(node),
                None => {
                    return Err(Error::MalformedEdge {
                        line: line_no,
                        content: entry.to_string(),
                    });
                }
            }
        }
    }

    Ok(doc)
}

/// Parse the JSON form.
pub fn parse_json(source: &str) -> Result<GraphDocument> {
    if source.trim().is_empty() {
        return Ok(GraphDocument::default());
    }

    match serde_json::from_str(source).map_err(Error::InvalidJson)? {
        JsonInput::Document(doc) => Ok(doc),
        JsonInput::Pairs(edges) => Ok(GraphDocument {
            edges,
            nodes: Vec::new(),
        }),
    }
}

enum Entry {
    Edge(String, String),
    Node(String),
}

fn parse_entry(entry: &str) -> Option<Entry> {
    let (source, target) = if let Some((s, t)) = entry.split_once("->") {
        (s.trim(), t.trim())
    } else if let Some((s, t)) = entry.split_once(',') {
        (s.trim(), t.trim())
    } else {
        let mut tokens = entry.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(node), None, None) => return Some(Entry::Node(node.to_string())),
            (Some(s), Some(t), None) => (s, t),
            _ => return None,
        }
    };

    if !is_identifier(source) || !is_identifier(target) {
        return None;
    }
    Some(Entry::Edge(source.to_string(), target.to_string()))
}

fn is_identifier(token: &str) -> bool {
    !token.is_empty()
        && !token.contains("->")
        && !token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | ';'))
}
