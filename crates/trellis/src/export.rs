//! Skeleton assembly and JSON export.

use log::debug;

use trellis_core::{
    geometry::Bounds,
    skeleton::{Arrow, Rectangle, Skeleton},
};

use crate::{
    config::{LayoutConfig, StyleConfig},
    layout::PositionedNode,
    structure::LayoutGraph,
};

/// Turns positioned nodes and resolved edges into a [`Skeleton`].
pub struct SkeletonBuilder<'a> {
    layout: &'a LayoutConfig,
    style: &'a StyleConfig,
}

impl<'a> SkeletonBuilder<'a> {
    pub fn new(layout: &'a LayoutConfig, style: &'a StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Emit one rectangle per node, then one arrow per edge whose endpoints exist.
    ///
    /// `nodes` must be the layout of `graph`, in the same order.
    pub fn build(&self, graph: &LayoutGraph, nodes: &[PositionedNode]) -> Skeleton {
        let mut skeleton = Skeleton::new();

        for node in nodes {
            skeleton.push_rectangle(Rectangle::new(
                node.id(),
                node.position().round(),
                node.size(),
                node.label(),
                self.style.rectangle().clone(),
            ));
        }

        for resolved in graph.edges() {
            let source = &nodes[resolved.source()];
            let target = &nodes[resolved.target()];
            let geometry = self.layout.anchor().resolve(
                rounded_bounds(source),
                rounded_bounds(target),
                self.layout.anchor_offset(),
            );

            let edge = resolved.edge();
            skeleton.push_arrow(Arrow::new(
                edge.from(),
                edge.to(),
                geometry.start(),
                geometry.relative_end(),
                edge.label().map(str::to_string),
                self.style.arrow().clone(),
            ));
        }

        debug!(
            elements = skeleton.len(),
            dropped_edges = graph.dangling_count();
            "Skeleton assembled"
        );
        skeleton
    }
}

/// Anchors are resolved against the rectangles as exported.
fn rounded_bounds(node: &PositionedNode) -> Bounds {
    node.position().round().to_bounds(node.size())
}

/// Serialize a skeleton as a JSON array.
pub fn to_json(skeleton: &Skeleton, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(skeleton)
    } else {
        serde_json::to_string(skeleton)
    }
}
