//! Input graph model.
//!
//! A [`Graph`] is the logical diagram handed to Trellis by whatever produced
//! it: labelled nodes and directed, optionally labelled edges. Node
//! coordinates are carried along for completeness but are advisory only; the
//! layout engine recomputes every position.

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// A labelled diagram entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: Id,
    label: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

impl Node {
    /// Creates a node with advisory coordinates at the origin.
    pub fn new(id: impl Into<Id>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x: 0.0,
            y: 0.0,
        }
    }

    /// Sets the advisory coordinates (builder style).
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Advisory x-coordinate supplied by the producer.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Advisory y-coordinate supplied by the producer.
    pub fn y(&self) -> f32 {
        self.y
    }
}

/// A directed relationship between two nodes, referenced by id.
///
/// Nothing guarantees that `from` and `to` name existing nodes; consumers
/// drop such dangling edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    from: Id,
    to: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<Id>, to: impl Into<Id>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    /// Sets the edge label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` if both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// The logical diagram: nodes and edges in producer order.
///
/// # Examples
///
/// ```
/// use trellis_core::graph::{Edge, Graph, Node};
///
/// let graph = Graph::new(
///     vec![Node::new("a", "A"), Node::new("b", "B")],
///     vec![Edge::new("a", "b").with_label("leads to")],
/// );
/// assert_eq!(graph.nodes().len(), 2);
/// assert!(graph.node(graph.edges()[0].to()).is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the first node carrying `id`, if any.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
