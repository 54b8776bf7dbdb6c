//! Lenient parsing of the JSON graph exchange format.
//!
//! Graph producers are not perfectly trustworthy: text generators wrap JSON in
//! Markdown fences, surround it with prose, or leave fields out. This module
//! accepts
//!
//! ```text
//! { "nodes": [{ "id", "label", "x", "y" }], "edges": [{ "from", "to", "label"? }] }
//! ```
//!
//! and repairs what it can:
//!
//! - Markdown code fences and surrounding whitespace are stripped.
//! - When the text is not valid JSON, the outermost `{ ... }` span is parsed instead.
//! - A missing node `id` becomes `node{index}`, a missing `label` becomes
//!   `Node {index + 1}`, and missing coordinates are spread on a three-column grid.
//! - A missing edge `from`/`to` falls back to the first/second node.
//!
//! Only text that contains no usable JSON object, or an object without
//! `nodes` and `edges` arrays, is rejected.

use std::collections::HashSet;

use log::{debug, trace, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use trellis_core::{
    graph::{Edge, Graph, Node},
    identifier::Id,
};

/// Reasons a graph text cannot be turned into a [`Graph`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text holds no parseable JSON object.
    ///
    /// `line` and `column` are 1-based positions within `snippet`, the exact
    /// text handed to the JSON parser after cleanup.
    #[error("Invalid graph JSON: {message} at line {line} column {column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        snippet: String,
    },

    /// The JSON is well formed but is not a graph.
    #[error("Invalid graph structure: {0}")]
    Structure(String),
}

impl ParseError {
    fn syntax(err: &serde_json::Error, snippet: &str) -> Self {
        // serde_json appends the position, which the variant already carries
        let message = err.to_string();
        let position = format!(" at line {} column {}", err.line(), err.column());
        let message = message.strip_suffix(&position).unwrap_or(&message).to_string();

        Self::Syntax {
            message,
            line: err.line(),
            column: err.column(),
            snippet: snippet.to_string(),
        }
    }

    /// Byte offset of a syntax error within its snippet.
    ///
    /// Returns `None` for structure errors.
    pub fn offset(&self) -> Option<usize> {
        let Self::Syntax {
            line,
            column,
            snippet,
            ..
        } = self
        else {
            return None;
        };

        let line_start: usize = snippet
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        Some((line_start + column.saturating_sub(1)).min(snippet.len()))
    }
}

/// Parse graph text into a [`Graph`], repairing missing fields.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when no JSON object can be found and
/// [`ParseError::Structure`] when `nodes` or `edges` is not an array.
///
/// # Examples
///
/// ```
/// use trellis::input::parse_graph;
///
/// let text = "```json\n{\"nodes\": [{\"label\": \"Idea\"}], \"edges\": []}\n```";
/// let graph = parse_graph(text).unwrap();
///
/// assert_eq!(graph.nodes()[0].id(), "node0");
/// assert_eq!(graph.nodes()[0].label(), "Idea");
/// ```
pub fn parse_graph(source: &str) -> Result<Graph, ParseError> {
    let cleaned = strip_code_fences(source);
    let value = parse_object(&cleaned)?;

    let Value::Object(object) = value else {
        return Err(ParseError::Structure(
            "expected a JSON object with `nodes` and `edges`".to_string(),
        ));
    };

    let nodes = array_field(&object, "nodes")?;
    let edges = array_field(&object, "edges")?;

    let nodes: Vec<Node> = nodes
        .iter()
        .enumerate()
        .map(|(index, value)| repair_node(index, value))
        .collect();
    report_duplicate_ids(&nodes);

    let edges: Vec<Edge> = edges.iter().map(|value| repair_edge(&nodes, value)).collect();

    debug!(node_count = nodes.len(), edge_count = edges.len(); "Graph parsed");
    let graph = Graph::new(nodes, edges);
    trace!(graph:?; "Parsed graph");
    Ok(graph)
}

fn strip_code_fences(source: &str) -> String {
    source
        .trim()
        .replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn parse_object(text: &str) -> Result<Value, ParseError> {
    let first_err = match serde_json::from_str(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let embedded = text
        .find('{')
        .zip(text.rfind('}'))
        .filter(|(start, end)| start < end)
        .map(|(start, end)| &text[start..=end]);

    match embedded {
        Some(candidate) => {
            debug!("Graph text is not plain JSON, parsing embedded object");
            serde_json::from_str(candidate).map_err(|err| ParseError::syntax(&err, candidate))
        }
        None => Err(ParseError::syntax(&first_err, text)),
    }
}

fn array_field<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a [Value], ParseError> {
    match object.get(name) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ParseError::Structure(format!("`{name}` must be an array"))),
        None => Err(ParseError::Structure(format!("missing `{name}` array"))),
    }
}

/// Reads a string-like field; numbers are accepted and empty strings are not.
fn text_field(value: &Value, name: &str) -> Option<String> {
    match value.get(name)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn number_field(value: &Value, name: &str) -> Option<f32> {
    value.get(name)?.as_f64().map(|number| number as f32)
}

fn repair_node(index: usize, value: &Value) -> Node {
    let id = text_field(value, "id")
        .map(|id| Id::new(&id))
        .unwrap_or_else(|| Id::from_index(index));
    let label = text_field(value, "label").unwrap_or_else(|| format!("Node {}", index + 1));
    let x = number_field(value, "x").unwrap_or(((index % 3) * 300 + 100) as f32);
    let y = number_field(value, "y").unwrap_or(((index / 3) * 200 + 100) as f32);

    Node::new(id, label).with_position(x, y)
}

fn repair_edge(nodes: &[Node], value: &Value) -> Edge {
    let endpoint = |name: &str, fallback_index: usize| {
        text_field(value, name)
            .map(|id| Id::new(&id))
            .or_else(|| nodes.get(fallback_index).map(Node::id))
            .unwrap_or_else(|| Id::from_index(fallback_index + 1))
    };

    let edge = Edge::new(endpoint("from", 0), endpoint("to", 1));
    match text_field(value, "label") {
        Some(label) => edge.with_label(label),
        None => edge,
    }
}

fn report_duplicate_ids(nodes: &[Node]) {
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.id()) {
            warn!(id = node.id().to_string(); "Duplicate node id, edges bind to its last occurrence");
        }
    }
}
