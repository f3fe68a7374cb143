//! Configuration types for Glyphwork rendering.
//!
//! These structures control the surface glyphs are drawn on, how the SVG
//! output is styled and how templates are rendered. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`SurfaceConfig`] - Size of the drawing surface in device pixels.
//! - [`StyleConfig`] - Visual styling options such as background color.
//! - [`RenderConfig`] - Template rendering options.
//!
//! # Example
//!
//! ```
//! # use glyphwork::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.surface().width(), 800.0);
//! assert!(config.style().background_color().is_ok());
//! assert!(config.render().group_paths());
//! ```

use serde::Deserialize;

use glyphwork_core::{color::Color, geometry::Bounds};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Surface configuration section.
    #[serde(default)]
    surface: SurfaceConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    pub fn new(surface: SurfaceConfig, style: StyleConfig, render: RenderConfig) -> Self {
        Self {
            surface,
            style,
            render,
        }
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// Size of the drawing surface.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    width: f32,
    height: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl SurfaceConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// The surface rectangle, anchored at the origin.
    pub fn rect(&self) -> Bounds {
        Bounds::from_ltwh(0.0, 0.0, self.width, self.height)
    }
}

/// Visual styling configuration for SVG output.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`], as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Template rendering options.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Wrap every glyph's paths into its group after drawing.
    group_paths: bool,

    /// Upper bound on rendered glyph trees when the template sets none.
    max_glyphs: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            group_paths: true,
            max_glyphs: None,
        }
    }
}

impl RenderConfig {
    pub fn new(group_paths: bool, max_glyphs: Option<usize>) -> Self {
        Self {
            group_paths,
            max_glyphs,
        }
    }

    pub fn group_paths(&self) -> bool {
        self.group_paths
    }

    pub fn max_glyphs(&self) -> Option<usize> {
        self.max_glyphs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"surface": {"width": 320}, "render": {"max_glyphs": 2}}"#)
                .unwrap();

        assert_eq!(config.surface().width(), 320.0);
        assert_eq!(config.surface().height(), 600.0);
        assert!(config.render().group_paths());
        assert_eq!(config.render().max_glyphs(), Some(2));
        assert_eq!(config.style().background_color(), Ok(None));
    }

    #[test]
    fn test_background_color_errors_are_reported() {
        let style: StyleConfig = serde_json::from_str(r##"{"background_color": "#zz"}"##).unwrap();
        assert!(style.background_color().is_err());
    }

    #[test]
    fn test_surface_rect() {
        let rect = SurfaceConfig::new(100.0, 50.0).rect();
        assert_eq!(rect, Bounds::from_ltwh(0.0, 0.0, 100.0, 50.0));
    }
}
