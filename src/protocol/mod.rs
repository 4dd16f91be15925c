//! Graph description formats.
//!
//! Reading and writing fort graphs as line-oriented text.

pub mod graph_text;

pub use graph_text::{
    format_graph, parse_graph, read_graph_file, write_graph_file, FormatError, ParseError,
};
