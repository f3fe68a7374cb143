//! Error types for Glyphwork operations.
//!
//! [`GlyphError`] covers the glyph object model: every variant signals a
//! programming or state error (never a transient condition), so nothing is
//! retried. [`GlyphworkError`] is the facade error returned by the template
//! renderer and the CLI.

use std::io;

use thiserror::Error;

use glyphwork_core::surface::{LayerId, NodeId, SurfaceError};

use crate::export;

/// Errors raised by glyph nodes, their path registries and hierarchies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlyphError {
    #[error("cannot draw glyph `{glyph}`: no layer is bound")]
    LayerUnbound { glyph: String },

    #[error("glyph `{glyph}` is bound to layer {layer} but the active layer is {active:?}")]
    InactiveLayer {
        glyph: String,
        layer: LayerId,
        active: Option<LayerId>,
    },

    #[error(
        "child `{child}` is bound to layer {child_layer:?}, which differs from parent `{parent}` on layer {parent_layer:?}"
    )]
    LayerMismatch {
        child: String,
        child_layer: Option<LayerId>,
        parent: String,
        parent_layer: Option<LayerId>,
    },

    #[error("glyph `{glyph}` tracks path `{path}` as {tracked:?}, but no such node is on the surface")]
    PathNotFound {
        glyph: String,
        path: String,
        tracked: Option<NodeId>,
    },

    #[error("glyph `{glyph}` has no child named `{child}`")]
    ChildNotFound { glyph: String, child: String },

    #[error("cannot scale by ({factor_x}, {factor_y}): factors must lie between 0 and 1")]
    InvalidScale { factor_x: f32, factor_y: f32 },

    #[error("glyph `{glyph}` has no drawable element `{element}`")]
    UnknownElement { glyph: String, element: String },

    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// The main error type for template rendering and other facade operations.
#[derive(Debug, Error)]
pub enum GlyphworkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid template document: {err}")]
    Template {
        #[source]
        err: serde_json::Error,
        /// Source text the error points into; empty when serializing.
        src: String,
    },

    #[error("unknown glyph type `{0}`")]
    UnknownKind(String),

    #[error("glyph error: {0}")]
    Glyph(#[from] GlyphError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("export error: {0}")]
    Export(#[from] export::Error),
}

impl GlyphworkError {
    /// Wraps a JSON error together with the text it was raised on.
    pub fn new_template_error(err: serde_json::Error, src: &str) -> Self {
        Self::Template {
            err,
            src: src.to_string(),
        }
    }
}
