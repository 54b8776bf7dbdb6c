//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis layout
//! engine and its consumers:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Colors**: Validated CSS colors for style hints ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds ([`geometry`] module)
//! - **Graph**: The logical input graph ([`graph`] module)
//! - **Skeleton**: The drawable output descriptors ([`skeleton`] module)

pub mod color;
pub mod geometry;
pub mod graph;
pub mod identifier;
pub mod skeleton;
