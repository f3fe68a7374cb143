//! The extension point concrete glyph types plug into.

use std::fmt;

use glyphwork_core::surface::Surface;

use super::{
    GlyphNode,
    element::{BASE_ELEMENTS, ElementDescriptor},
    layout::LayoutOptions,
    parameters::Parameters,
};
use crate::error::GlyphError;

/// Canonical shape names of a glyph kind.
///
/// `main` names the kind's primary path and is the default glyph name.
/// `children` lists the names given, in order, to unnamed child glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalShapes {
    pub main: &'static str,
    pub children: &'static [&'static str],
}

impl CanonicalShapes {
    pub const fn new(main: &'static str, children: &'static [&'static str]) -> Self {
        Self { main, children }
    }

    /// Name of the `index`-th declared child, if any.
    pub fn child(&self, index: usize) -> Option<&'static str> {
        self.children.get(index).copied()
    }
}

/// Shape-specific behavior of a glyph.
///
/// Implementations decide *what* to draw. The [`GlyphNode`] passed in owns the
/// registry, box and children; kinds create their paths on `surface` and
/// record them with [`GlyphNode::register_path`].
pub trait GlyphKind: fmt::Debug {
    /// Type name used in template documents.
    fn type_name(&self) -> &'static str;

    fn shapes(&self) -> CanonicalShapes;

    fn elements(&self) -> &'static [ElementDescriptor] {
        &BASE_ELEMENTS
    }

    /// Options a new glyph of this kind starts with, before caller overrides.
    fn default_parameters(&self) -> Parameters {
        Parameters::base()
    }

    /// Draws the kind's shapes. Called by [`GlyphNode::draw`] once the box is
    /// computed and the drawing box registered.
    fn draw(
        &self,
        glyph: &mut GlyphNode,
        surface: &mut dyn Surface,
        layout: &LayoutOptions,
    ) -> Result<(), GlyphError>;

    /// Draws a single named element on demand.
    fn draw_element(
        &self,
        glyph: &mut GlyphNode,
        element: &str,
        _surface: &mut dyn Surface,
    ) -> Result<(), GlyphError> {
        Err(GlyphError::UnknownElement {
            glyph: glyph.name().to_string(),
            element: element.to_string(),
        })
    }
}
