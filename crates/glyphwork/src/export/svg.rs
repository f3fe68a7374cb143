//! SVG rendering of a [`Scene`].
//!
//! Layers become `<g data-layer="…">` elements in z-order, groups become
//! `<g>` elements carrying their node name as a class, and visible paths
//! become `<path>` elements. Invisible paths (such as drawing boxes) are skipped.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{
    Document, Node,
    node::element::{Group, Path, Rectangle},
};

use glyphwork_core::{
    apply_stroke,
    color::Color,
    surface::{NodeId, NodeKind, Scene, Surface},
};

use super::{Error, Exporter};
use crate::config::StyleConfig;

/// SVG exporter writing to a file.
#[derive(Debug, Clone)]
pub struct Svg {
    file_name: String,
    background_color: Option<Color>,
}

impl Svg {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            background_color: None,
        }
    }

    /// Applies the configured style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the background color cannot be parsed.
    pub fn with_style(mut self, style: &StyleConfig) -> Result<Self, Error> {
        self.background_color = style.background_color().map_err(Error::Render)?;
        Ok(self)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Builds the SVG document for `scene`, sized to the surface rectangle.
    pub fn render_document(&self, scene: &Scene) -> Document {
        let rect = scene.surface_rect();
        let (width, height) = (rect.width(), rect.height());
        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height));

        if let Some(color) = &self.background_color {
            doc = doc.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", color),
            );
        }

        for layer in scene.layer_ids() {
            let mut group = Group::new().set("data-layer", scene.layer_name(layer).unwrap_or_default());
            for node in scene.layer_children(layer).unwrap_or_default() {
                if let Some(rendered) = render_node(scene, node) {
                    group = group.add(rendered);
                }
            }
            doc = doc.add(group);
        }

        debug!(layers = scene.layer_ids().len(), nodes = scene.node_count(); "SVG document rendered");
        doc
    }

    /// Writes an SVG document to the exporter's file.
    pub fn write_document(&self, doc: &Document) -> Result<(), Error> {
        info!(file_name = self.file_name; "Creating SVG file");
        let f = match File::create(&self.file_name) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = self.file_name, err:err; "Failed to create SVG file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(file_name = self.file_name, err:err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for Svg {
    fn export_scene(&self, scene: &Scene) -> Result<(), Error> {
        let doc = self.render_document(scene);
        self.write_document(&doc)
    }
}

/// Renders `scene` to an SVG document using `style`.
pub fn render_scene(scene: &Scene, style: &StyleConfig) -> Result<Document, Error> {
    Ok(Svg::new("").with_style(style)?.render_document(scene))
}

fn render_node(scene: &Scene, id: NodeId) -> Option<Box<dyn Node>> {
    let node = scene.node(id)?;
    match node.kind() {
        NodeKind::Path { geometry, style } => {
            if !style.is_visible() || geometry.is_empty() {
                return None;
            }
            let mut path = Path::new().set("d", geometry.to_svg_data());
            if let Some(name) = node.name() {
                path = path.set("class", name);
            }
            path = match style.stroke() {
                Some(stroke) => apply_stroke!(path, stroke),
                None => path.set("stroke", "none"),
            };
            path = match style.fill() {
                Some(fill) => path
                    .set("fill", &fill)
                    .set("fill-opacity", fill.alpha()),
                None => path.set("fill", "none"),
            };
            Some(Box::new(path) as Box<dyn Node>)
        }
        NodeKind::Group => {
            let mut group = Group::new().set("id", format!("node-{}", id.raw()));
            if let Some(name) = node.name() {
                group = group.set("class", name);
            }
            for child in node.children() {
                if let Some(rendered) = render_node(scene, *child) {
                    group = group.add(rendered);
                }
            }
            Some(Box::new(group) as Box<dyn Node>)
        }
    }
}

#[cfg(test)]
mod tests {
    use glyphwork_core::{
        geometry::{Bounds, Point, Size},
        path::PathGeometry,
        style::{DashPattern, PathStyle, StrokeDefinition},
        surface::PathSpec,
    };

    use super::*;

    fn scene() -> Scene {
        let mut scene = Scene::new(Bounds::from_ltwh(0.0, 0.0, 120.0, 80.0));
        scene.add_layer("glyph-0");
        let visible = scene
            .create_path(PathSpec::new(
                PathGeometry::rectangle(Point::new(20.0, 20.0), Size::new(10.0, 10.0)),
                PathStyle::default().with_fill(Color::new("teal").unwrap()),
            ))
            .unwrap();
        scene.set_node_name(visible, "body").unwrap();
        scene
            .create_path(PathSpec::new(
                PathGeometry::rectangle(Point::new(50.0, 50.0), Size::new(10.0, 10.0)),
                PathStyle::default().with_visible(false),
            ))
            .unwrap();
        let group = scene.create_group(&[visible]).unwrap();
        scene.set_node_name(group, "bodyGroup").unwrap();
        scene
    }

    #[test]
    fn test_render_scene_structure() {
        let svg = render_scene(&scene(), &StyleConfig::default())
            .unwrap()
            .to_string();

        assert!(svg.contains("viewBox=\"0 0 120 80\""));
        assert!(svg.contains("data-layer=\"glyph-0\""));
        assert!(svg.contains("class=\"bodyGroup\""));
        assert!(svg.contains("class=\"body\""));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_dashed_stroke_is_rendered() {
        let mut scene = scene();
        let stroke = StrokeDefinition::new(Color::default(), 2.0).with_dash(DashPattern::Dashed);
        scene
            .create_path(PathSpec::new(
                PathGeometry::rectangle(Point::new(80.0, 40.0), Size::new(10.0, 10.0)),
                PathStyle::stroked(stroke),
            ))
            .unwrap();

        let svg = render_scene(&scene, &StyleConfig::default()).unwrap().to_string();
        assert_eq!(svg.matches("stroke-dasharray=\"5,5\"").count(), 1);
    }

    #[test]
    fn test_background_color() {
        let style: StyleConfig = serde_json::from_str(r#"{"background_color": "white"}"#).unwrap();
        let svg = render_scene(&scene(), &style).unwrap().to_string();
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_invalid_background_color() {
        let style: StyleConfig = serde_json::from_str(r#"{"background_color": "nope"}"#).unwrap();
        assert!(matches!(render_scene(&scene(), &style), Err(Error::Render(_))));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.svg");
        let exporter = Svg::new(file.to_str().unwrap());

        exporter.export_scene(&scene()).unwrap();
        let written = std::fs::read_to_string(&file).unwrap();
        assert!(written.contains("<svg"));
        assert!(written.contains("data-layer=\"glyph-0\""));
    }
}
