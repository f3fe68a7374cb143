//! Reference glyph kinds and the registry that maps type names to them.
//!
//! - [`Ellipse`]: a filled ellipse with an optional halo
//! - [`Polygon`]: a regular polygon with a configurable number of sides
//! - [`Nested`]: a composite body holding an ellipse nucleus and a polygon marker

mod ellipse;
mod nested;
mod polygon;

pub use ellipse::Ellipse;
pub use nested::Nested;
pub use polygon::Polygon;

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, warn};

use glyphwork_core::{
    color::Color,
    style::{DashPattern, PathStyle, StrokeDefinition},
};

use crate::{
    error::GlyphworkError,
    glyph::{GlyphKind, Parameters},
};

/// Glyph kinds available by type name.
///
/// # Examples
///
/// ```
/// use glyphwork::kinds::KindRegistry;
///
/// let kinds = KindRegistry::default();
/// assert_eq!(kinds.get("Nested").unwrap().type_name(), "Nested");
/// assert!(kinds.get("Spiral").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kinds: IndexMap<&'static str, Rc<dyn GlyphKind>>,
}

impl Default for KindRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Rc::new(Ellipse));
        registry.register(Rc::new(Polygon));
        registry.register(Rc::new(Nested));
        registry
    }
}

impl KindRegistry {
    /// A registry without any kinds.
    pub fn empty() -> Self {
        Self {
            kinds: IndexMap::new(),
        }
    }

    /// Adds `kind`, replacing any kind with the same type name.
    pub fn register(&mut self, kind: Rc<dyn GlyphKind>) {
        debug!(kind = kind.type_name(); "Registering glyph kind");
        self.kinds.insert(kind.type_name(), kind);
    }

    pub fn get(&self, type_name: &str) -> Result<Rc<dyn GlyphKind>, GlyphworkError> {
        self.kinds
            .get(type_name)
            .cloned()
            .ok_or_else(|| GlyphworkError::UnknownKind(type_name.to_string()))
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.keys().copied()
    }
}

/// Outline style read from `strokeColor` and `strokeWidth`, filled with the color under `fill_key`.
fn outline_style(parameters: &Parameters, fill_key: &str) -> PathStyle {
    let stroke = StrokeDefinition::new(
        parameters.color("strokeColor").unwrap_or_default(),
        parameters.number("strokeWidth").unwrap_or(1.0) as f32,
    )
    .with_dash(dash_pattern(parameters));
    let style = PathStyle::stroked(stroke);
    match parameters.color(fill_key) {
        Some(fill) => style.with_fill(fill),
        None => style,
    }
}

/// Unfilled style for accent strokes such as halos.
fn accent_style(parameters: &Parameters, color_key: &str, width_key: &str) -> PathStyle {
    PathStyle::stroked(
        StrokeDefinition::new(
            parameters.color(color_key).unwrap_or_else(Color::default),
            parameters.number(width_key).unwrap_or(1.0) as f32,
        )
        .with_dash(dash_pattern(parameters)),
    )
}

/// The `dashPattern` option; missing or unparsable patterns draw solid lines.
fn dash_pattern(parameters: &Parameters) -> DashPattern {
    let Some(pattern) = parameters.text("dashPattern") else {
        return DashPattern::Solid;
    };
    pattern.parse().unwrap_or_else(|err| {
        warn!(pattern; "Ignoring dash pattern: {err}");
        DashPattern::Solid
    })
}

/// Reads a count parameter, falling back to `default` and never going below `min`.
fn count_parameter(parameters: &Parameters, key: &str, default: usize, min: usize) -> usize {
    parameters
        .number(key)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map_or(default, |n| n.round() as usize)
        .max(min)
}
