//! CLI logic for the Glyphwork template renderer.
//!
//! Loads a configuration, renders a template document and writes the
//! resulting SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use glyphwork::{GlyphworkError, TemplateRenderer};

/// Run the Glyphwork CLI application
///
/// Reads the template at `args.input`, draws every glyph tree it describes
/// and exports the scene as SVG to `args.output`.
///
/// # Errors
///
/// Returns `GlyphworkError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed template documents
/// - Unknown glyph types and drawing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), GlyphworkError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing template"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let renderer = TemplateRenderer::new(app_config);
    let template = renderer.parse(&source)?;
    let rendering = renderer.render(&template)?;
    renderer.export_svg(&rendering, &args.output)?;

    info!(output_file = args.output, glyphs = rendering.glyphs().len(); "SVG exported successfully");

    Ok(())
}
