//! Plain-text fort graph format.
//!
//! One declaration per line:
//!
//! - `label:value` declares a fort;
//! - `label1:value1 label2:value2` declares an edge, declaring either fort
//!   if it is new;
//! - blank lines and lines starting with `//` are ignored.
//!
//! Flags travel inside labels as marker characters: `!` self-alert,
//! `#` shield, `*` immune. The same file pasted into an online graph editor
//! renders the fort graph directly.

use std::fs;
use std::path::Path;

use crate::graph::{Fort, FortFlags, FortGraph, GraphError};

/// Errors that can occur while reading a graph description.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 1 or 2 forts, got '{text}'")]
    MalformedLine { line: usize, text: String },

    #[error("line {line}: fort '{token}' is not in label:value format")]
    MalformedFort { line: usize, token: String },

    #[error("line {line}: invalid value in '{token}'")]
    InvalidValue { line: usize, token: String },

    #[error("line {line}: fort '{label}' declared with value {found}, already has {existing}")]
    ValueMismatch {
        line: usize,
        label: String,
        existing: u32,
        found: u32,
    },

    #[error("line {line}: {source}")]
    Graph { line: usize, source: GraphError },
}

/// Errors that can occur while writing a graph description.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("failed to write graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("label '{0}' is empty, starts with '//' or holds ':' or whitespace")]
    UnwritableLabel(String),

    #[error("label '{label}' carries markers for flags the fort does not have")]
    StrayMarker { label: String },
}

/// Header written at the top of every formatted graph.
const HEADER: &str = concat!(
    "//To visualize and edit small graphs, copy/paste these lines into ",
    "https://csacademy.com/app/graph_editor/",
);

/// Parses a graph description.
pub fn parse_graph(text: &str) -> Result<FortGraph, ParseError> {
    let mut graph = FortGraph::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match tokens.as_slice() {
            [fort] => {
                declare_fort(&mut graph, line, fort)?;
            }
            [a, b] => {
                let a = declare_fort(&mut graph, line, a)?;
                let b = declare_fort(&mut graph, line, b)?;
                graph
                    .add_edge(a, b)
                    .map_err(|source| ParseError::Graph { line, source })?;
            }
            _ => {
                return Err(ParseError::MalformedLine {
                    line,
                    text: trimmed.to_string(),
                })
            }
        }
    }
    Ok(graph)
}

/// Declares the fort in a `label:value` token unless it already exists with
/// the same value. Returns the label.
fn declare_fort<'t>(
    graph: &mut FortGraph,
    line: usize,
    token: &'t str,
) -> Result<&'t str, ParseError> {
    let (label, value) = token
        .split_once(':')
        .filter(|(label, _)| !label.is_empty())
        .ok_or_else(|| ParseError::MalformedFort {
            line,
            token: token.to_string(),
        })?;
    let value: u32 = value.parse().map_err(|_| ParseError::InvalidValue {
        line,
        token: token.to_string(),
    })?;

    match graph.value(label) {
        Ok(existing) if existing == value => Ok(label),
        Ok(existing) => Err(ParseError::ValueMismatch {
            line,
            label: label.to_string(),
            existing,
            found: value,
        }),
        Err(_) => {
            graph
                .add_fort(label, value, FortFlags::from_label_markers(label))
                .map_err(|source| ParseError::Graph { line, source })?;
            Ok(label)
        }
    }
}

/// Formats a graph: a comment header, every fort in insertion order, then
/// every edge once, listed from its lexicographically larger endpoint.
///
/// Labels missing the marker for one of their flags get it appended, so the
/// flags survive a round trip even when the label itself is renamed. Labels
/// the parser would split, skip or read back with other flags are refused.
pub fn format_graph(graph: &FortGraph) -> Result<String, FormatError> {
    let tokens = graph
        .forts()
        .map(fort_token)
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for token in &tokens {
        out.push_str(token);
        out.push('\n');
    }
    for (id, fort) in graph.forts().enumerate() {
        for &other in graph.adjacent_ids(id) {
            if fort.label > graph.fort_at(other).label {
                out.push_str(&tokens[id]);
                out.push(' ');
                out.push_str(&tokens[other]);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

/// Renders one fort as `label:value`, with missing flag markers appended.
fn fort_token(fort: &Fort) -> Result<String, FormatError> {
    let label = fort.label.as_str();
    if label.is_empty()
        || label.starts_with("//")
        || label.contains(':')
        || label.contains(char::is_whitespace)
    {
        return Err(FormatError::UnwritableLabel(label.to_string()));
    }
    let marked = fort.flags.mark_label(label);
    if FortFlags::from_label_markers(&marked) != fort.flags {
        return Err(FormatError::StrayMarker {
            label: label.to_string(),
        });
    }
    Ok(format!("{}:{}", marked, fort.value))
}

/// Reads and parses a graph file.
pub fn read_graph_file<P: AsRef<Path>>(path: P) -> Result<FortGraph, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_graph(&text)
}

/// Writes a graph to `path` in the text format.
pub fn write_graph_file<P: AsRef<Path>>(path: P, graph: &FortGraph) -> Result<(), FormatError> {
    fs::write(path, format_graph(graph)?)?;
    Ok(())
}
