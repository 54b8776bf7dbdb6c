//! Diagram layout.
//!
//! Two stages turn a logical [`Graph`](trellis_core::graph::Graph) into
//! geometry:
//!
//! 1. [`force::Engine`] places every node: a force simulation seeds a good
//!    configuration, then a correction pass enforces a minimum distance
//!    between node centers.
//! 2. [`AnchorPolicy`] resolves, per edge, where the arrow meets the two node
//!    rectangles.

mod anchor;
pub mod force;
mod separation;

pub use anchor::{AnchorPolicy, EdgeGeometry};

use trellis_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

/// A node after layout: top-left corner plus the run's uniform size.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    id: Id,
    label: String,
    position: Point,
    size: Size,
}

impl PositionedNode {
    pub fn new(id: Id, label: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id,
            label: label.into(),
            position,
            size,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}
