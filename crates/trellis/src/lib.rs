//! Trellis - Force-directed layout for node and edge diagrams.
//!
//! Trellis turns a logical graph (labelled nodes joined by directed edges)
//! into a drawable skeleton: one rectangle per node at a non-overlapping
//! position and one arrow per edge anchored on the facing sides of its two
//! rectangles. Rendering the skeleton is left to the consumer.

pub mod config;
pub mod input;
pub mod layout;
pub mod structure;

mod error;
mod export;

pub use trellis_core::{color, geometry, graph, identifier, skeleton};

pub use error::TrellisError;

use log::{debug, info, trace};

use trellis_core::{graph::Graph, skeleton::Skeleton};

use config::AppConfig;
use export::SkeletonBuilder;
use layout::{PositionedNode, force::Engine};
use structure::LayoutGraph;

/// Builder for parsing and laying out Trellis diagrams.
///
/// This provides an API for processing graphs through parsing, layout and
/// skeleton assembly stages.
///
/// # Examples
///
/// ```rust
/// use trellis::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "nodes": [{"id": "a", "label": "A"}, {"id": "b", "label": "B"}],
///     "edges": [{"from": "a", "to": "b", "label": "leads to"}]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let graph = builder.parse(source).expect("Failed to parse");
/// let skeleton = builder.build(&graph);
///
/// assert_eq!(skeleton.rectangles().count(), 2);
/// assert_eq!(skeleton.arrows().count(), 1);
///
/// let json = builder.render_json(&skeleton, false).expect("Failed to export");
/// assert!(json.starts_with('['));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse graph JSON text into a [`Graph`].
    ///
    /// Parsing is lenient; see [`input::parse_graph`] for the repairs applied.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Parse`] when the text holds no usable graph.
    pub fn parse(&self, source: &str) -> Result<Graph, TrellisError> {
        info!("Parsing graph");

        let graph =
            input::parse_graph(source).map_err(|err| TrellisError::new_parse_error(err, source))?;

        debug!(
            node_count = graph.nodes().len(),
            edge_count = graph.edges().len();
            "Graph parsed successfully"
        );
        Ok(graph)
    }

    /// Compute a position for every node of `graph`, in input order.
    pub fn layout(&self, graph: &Graph) -> Vec<PositionedNode> {
        self.engine().layout(&LayoutGraph::new(graph))
    }

    /// Lay out `graph` and assemble its drawable skeleton.
    ///
    /// Rectangles come first in node order, followed by one arrow per edge
    /// whose endpoints both exist. Edges naming unknown nodes are left out.
    pub fn build(&self, graph: &Graph) -> Skeleton {
        info!("Building skeleton");

        let layout_graph = LayoutGraph::new(graph);
        let nodes = self.engine().layout(&layout_graph);
        let skeleton =
            SkeletonBuilder::new(self.config.layout(), self.config.style()).build(&layout_graph, &nodes);

        info!(elements = skeleton.len(); "Skeleton built");
        trace!(skeleton:?; "Built skeleton");
        skeleton
    }

    /// Serialize a skeleton to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Export`] if serialization fails.
    pub fn render_json(&self, skeleton: &Skeleton, pretty: bool) -> Result<String, TrellisError> {
        Ok(export::to_json(skeleton, pretty)?)
    }

    fn engine(&self) -> Engine {
        let layout = self.config.layout();
        Engine::new(layout.force().clone(), layout.node_size())
    }
}
