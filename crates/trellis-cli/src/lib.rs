//! CLI logic for the Trellis layout tool.
//!
//! This module contains the core CLI logic: read a graph file, lay it out,
//! and write the drawable skeleton as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use trellis::{DiagramBuilder, TrellisError};

/// Run the Trellis CLI application
///
/// This function processes the input file through the Trellis pipeline
/// and writes the resulting skeleton JSON to the output file.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let graph = builder.parse(&source)?;
    let skeleton = builder.build(&graph);
    let json = builder.render_json(&skeleton, args.pretty)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output, elements = skeleton.len(); "Skeleton exported successfully");

    Ok(())
}
