//! Glyphwork - Composable, parameterized vector glyphs on a layered surface.
//!
//! A glyph is a named tree of drawable paths computed from a bounding box
//! and a set of parameters. This crate provides the glyph object model
//! ([`glyph`]), a handful of reference glyph kinds ([`kinds`]), template
//! documents describing saved designs ([`template`]) and SVG export.

pub mod config;
pub mod export;
pub mod glyph;
pub mod kinds;
pub mod template;

mod error;

pub use glyphwork_core::{color, geometry, path, style, surface};

pub use error::{GlyphError, GlyphworkError};

use std::rc::Rc;

use log::{debug, info, trace, warn};

use config::AppConfig;
use export::Exporter;
use glyph::{GlyphNode, LayoutOptions};
use kinds::KindRegistry;
use surface::Scene;
use template::{BoxRecord, GlyphBoxes, TemplateDocument};

/// The glyph trees drawn for a template, together with the scene they were drawn on.
#[derive(Debug)]
pub struct Rendering {
    scene: Scene,
    glyphs: Vec<GlyphNode>,
}

impl Rendering {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Root glyphs, one per layer, in layer order.
    pub fn glyphs(&self) -> &[GlyphNode] {
        &self.glyphs
    }

    pub fn glyphs_mut(&mut self) -> &mut [GlyphNode] {
        &mut self.glyphs
    }

    /// Splits the rendering so a glyph can be mutated against the scene.
    pub fn parts_mut(&mut self) -> (&mut Scene, &mut [GlyphNode]) {
        (&mut self.scene, &mut self.glyphs)
    }

    /// Snapshots the drawn glyphs as a new template.
    pub fn capture(&self) -> TemplateDocument {
        TemplateDocument::capture(&self.glyphs)
    }
}

/// Renders template documents into glyph scenes and SVG.
///
/// # Examples
///
/// ```
/// use glyphwork::TemplateRenderer;
///
/// let source = r##"{
///     "topGlyph": {"name": "body", "type": "Nested", "children": []},
///     "glyphParameters": {"body": {"lightColor": "#FFF8E1"}},
///     "glyphBoxes": [
///         {"_id": "a", "body": {
///             "drawingBounds": {"left": 10, "top": 10, "width": 120, "height": 80},
///             "bounds": {"left": 10, "top": 10, "width": 120, "height": 80}}}
///     ]
/// }"##;
///
/// let renderer = TemplateRenderer::default();
/// let template = renderer.parse(source).expect("Failed to parse");
/// let rendering = renderer.render(&template).expect("Failed to render");
/// assert_eq!(rendering.glyphs().len(), 1);
///
/// let svg = renderer.render_svg(&template).expect("Failed to render SVG");
/// assert!(svg.contains("data-layer=\"glyph-0\""));
/// ```
#[derive(Debug, Default)]
pub struct TemplateRenderer {
    config: AppConfig,
    kinds: KindRegistry,
}

impl TemplateRenderer {
    /// Creates a renderer with the given configuration and the reference kinds.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            kinds: KindRegistry::default(),
        }
    }

    /// Replaces the kinds templates may refer to.
    pub fn with_kinds(mut self, kinds: KindRegistry) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    /// Parses a template document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphworkError::Template`] if the source is not a valid template.
    pub fn parse(&self, source: &str) -> Result<TemplateDocument, GlyphworkError> {
        info!("Parsing template");
        let template = TemplateDocument::from_json(source)?;
        debug!(
            top_glyph = template.top_glyph.name.as_str(),
            kind = template.top_glyph.type_name.as_str(),
            trees = template.glyph_boxes.len();
            "Template parsed successfully"
        );
        trace!(template:?; "Parsed template");
        Ok(template)
    }

    /// Draws one glyph tree per box table of `template`, each on its own layer.
    ///
    /// Layers are named `glyph-{index}`. The number of trees is capped by the
    /// template's `numDisplayedGlyphs`, falling back to the configured
    /// maximum. A template without box tables draws a single tree filling
    /// the surface.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphworkError::UnknownKind`] if the top glyph's type is not
    /// registered, or [`GlyphworkError::Glyph`] if drawing fails.
    pub fn render(&self, template: &TemplateDocument) -> Result<Rendering, GlyphworkError> {
        let kind = self.kinds.get(&template.top_glyph.type_name)?;
        let surface_rect = self.config.surface().rect();
        let mut scene = Scene::new(surface_rect);

        let limit = template
            .display
            .num_displayed_glyphs
            .or(self.config.render().max_glyphs())
            .unwrap_or(usize::MAX);
        let entries: Vec<Option<&GlyphBoxes>> = if template.glyph_boxes.is_empty() {
            vec![None]
        } else {
            template.glyph_boxes.iter().take(limit).map(Some).collect()
        };

        let name = template.top_glyph.name.as_str();
        let parameters = template.parameters_for(name).cloned().unwrap_or_default();

        info!(kind = kind.type_name(), trees = entries.len(); "Rendering template");
        let mut glyphs = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let layer = scene.add_layer(format!("glyph-{index}"));
            let id = entry
                .and_then(|boxes| boxes.id.clone())
                .unwrap_or_else(|| index.to_string());

            let mut glyph = GlyphNode::builder(Rc::clone(&kind))
                .layer(layer)
                .name(name)
                .id(id)
                .parameters(parameters.clone())
                .build(&mut scene)?;

            let record = entry.and_then(|boxes| {
                boxes
                    .boxes
                    .get(glyph.name())
                    .or_else(|| boxes.boxes.values().next())
            });
            let layout = match record {
                Some(record) => {
                    restore_box_settings(&mut glyph, record);
                    record.layout()
                }
                None => LayoutOptions::new(surface_rect),
            };

            glyph.draw(&mut scene, &layout)?;
            if self.config.render().group_paths() {
                glyph.build_path_groups(&mut scene)?;
            }
            check_outline(template, &glyph);

            debug!(glyph = glyph.name(), id:? = glyph.id(), layer = index; "Glyph tree rendered");
            glyphs.push(glyph);
        }

        info!(glyphs = glyphs.len(), nodes = scene.node_count(); "Template rendered");
        Ok(Rendering { scene, glyphs })
    }

    /// Renders `template` straight to an SVG string.
    pub fn render_svg(&self, template: &TemplateDocument) -> Result<String, GlyphworkError> {
        let rendering = self.render(template)?;
        let doc = export::svg::render_scene(rendering.scene(), self.config.style())?;
        info!("SVG rendered successfully");
        Ok(doc.to_string())
    }

    /// Writes `rendering` to an SVG file at `path`.
    pub fn export_svg(&self, rendering: &Rendering, path: &str) -> Result<(), GlyphworkError> {
        let exporter = export::svg::Svg::new(path).with_style(self.config.style())?;
        exporter.export_scene(rendering.scene())?;
        Ok(())
    }
}

fn restore_box_settings(glyph: &mut GlyphNode, record: &BoxRecord) {
    let glyph_box = glyph.glyph_box_mut();
    glyph_box.set_max_hist_length(record.max_hist_length);
    glyph_box.set_apply_transforms(record.apply_transforms);
    for rect in &record.history {
        glyph_box.push_history((*rect).into());
    }
}

/// Warns when the drawn children differ from the hierarchy the template recorded.
fn check_outline(template: &TemplateDocument, glyph: &GlyphNode) {
    let recorded = &template.top_glyph.children;
    if recorded.is_empty() {
        return;
    }
    let matches = recorded.len() == glyph.children().len()
        && recorded
            .iter()
            .zip(glyph.children())
            .all(|(outline, child)| outline.name == child.name());
    if !matches {
        warn!(
            glyph = glyph.name(),
            recorded = recorded.len(),
            drawn = glyph.children().len();
            "Drawn children differ from the template hierarchy"
        );
    }
}
