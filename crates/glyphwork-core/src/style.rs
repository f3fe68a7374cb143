//! Stroke and fill styling for drawable paths.
//!
//! - [`StrokeDefinition`]: color, width and dash pattern of an outline
//! - [`DashPattern`]: line pattern (solid, dashed, dotted, custom dasharray)
//! - [`PathStyle`]: everything a surface needs to paint one path
//!
//! Glyph kinds build a [`PathStyle`] from their parameters (`strokeColor`,
//! `strokeWidth`, `primaryColor`, ...) and hand it to the surface together with
//! the path geometry.

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke, mapped to SVG `stroke-dasharray`.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum DashPattern {
    #[default]
    Solid,
    /// 5px dash, 5px gap
    Dashed,
    /// 2px dot, 3px gap
    Dotted,
    /// Raw dasharray, e.g. `"10,5,2,5"`
    Custom(String),
}

impl FromStr for DashPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "" => Err("empty dash pattern".to_string()),
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl DashPattern {
    /// Returns the SVG dasharray value, or `None` for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// Outline definition of a path.
///
/// # Examples
///
/// ```
/// use glyphwork_core::{color::Color, style::{DashPattern, StrokeDefinition}};
///
/// let stroke = StrokeDefinition::new(Color::new("#78909C").unwrap(), 1.0)
///     .with_dash(DashPattern::Dotted);
/// assert_eq!(stroke.dash().to_svg_value().as_deref(), Some("2,3"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    dash: DashPattern,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: DashPattern::Solid,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn dash(&self) -> &DashPattern {
        &self.dash
    }

    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Paint information attached to a path node.
///
/// A path is only rendered when `visible` is set; invisible paths still take
/// part in lookups, grouping and scaling (the glyph `drawingBox` is one).
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    stroke: Option<StrokeDefinition>,
    fill: Option<Color>,
    visible: bool,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke: Some(StrokeDefinition::default()),
            fill: None,
            visible: true,
        }
    }
}

impl PathStyle {
    /// A stroked, unfilled, visible style.
    pub fn stroked(stroke: StrokeDefinition) -> Self {
        Self {
            stroke: Some(stroke),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Apply a [`StrokeDefinition`] to an SVG element.
///
/// ```
/// use glyphwork_core::{color::Color, style::StrokeDefinition};
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let path = glyphwork_core::apply_stroke!(svg_element::Path::new(), &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.dash().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_pattern_from_str() {
        assert_eq!(DashPattern::from_str("solid").unwrap(), DashPattern::Solid);
        assert_eq!(DashPattern::from_str("dashed").unwrap(), DashPattern::Dashed);
        assert_eq!(
            DashPattern::from_str("4,1").unwrap(),
            DashPattern::Custom("4,1".to_string())
        );
        assert!(DashPattern::from_str("").is_err());
    }

    #[test]
    fn test_dash_pattern_svg_values() {
        assert_eq!(DashPattern::Solid.to_svg_value(), None);
        assert_eq!(DashPattern::Dashed.to_svg_value(), Some("5,5".to_string()));
    }

    #[test]
    fn test_path_style_defaults() {
        let style = PathStyle::default();
        assert!(style.is_visible());
        assert!(style.fill().is_none());
        assert_eq!(style.stroke().map(|s| s.width()), Some(1.0));
    }

    #[test]
    fn test_path_style_builders() {
        let fill = Color::new("teal").unwrap();
        let style = PathStyle::stroked(StrokeDefinition::new(Color::default(), 5.0))
            .with_fill(fill)
            .with_visible(false);

        assert!(!style.is_visible());
        assert_eq!(style.fill(), Some(fill));
        assert_eq!(style.stroke().map(|s| s.width()), Some(5.0));
    }
}
