//! Template documents: a serializable snapshot of a glyph design.
//!
//! A template records the glyph hierarchy (one level of children), the
//! parameters of every glyph by name, one box table per rendered glyph tree,
//! the bindings between glyph elements and data fields, and free-form shape
//! descriptions. The JSON form uses camelCase keys.
//!
//! # Example
//!
//! ```
//! use glyphwork::template::TemplateDocument;
//!
//! let json = r#"{
//!     "topGlyph": {"name": "body", "type": "Nested", "children": []},
//!     "glyphParameters": {"body": {"strokeWidth": 2}},
//!     "glyphBoxes": [],
//!     "elementFeatureBindings": [{"element": "Height", "field": "Length", "shape": "body"}],
//!     "shapes": {}
//! }"#;
//! let template = TemplateDocument::from_json(json).unwrap();
//! assert_eq!(template.top_glyph.type_name, "Nested");
//! assert_eq!(template.element_feature_bindings[0].field, "Length");
//! ```

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use glyphwork_core::geometry::{Bounds, Point};

use crate::{
    error::GlyphworkError,
    glyph::{GlyphBox, GlyphNode, LayoutOptions, Parameters, ShapePositions},
};

/// A glyph design that can be saved, loaded and rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    pub top_glyph: GlyphOutline,

    #[serde(default)]
    pub glyph_parameters: IndexMap<String, Parameters>,

    #[serde(default)]
    pub glyph_boxes: Vec<GlyphBoxes>,

    #[serde(default)]
    pub element_feature_bindings: Vec<ElementFeatureBinding>,

    #[serde(default)]
    pub shapes: IndexMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_file_name: Option<String>,

    /// Which shape each category of a categorical variable is drawn with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_assignment: Option<serde_json::Value>,

    #[serde(flatten)]
    pub display: DisplayOptions,
}

/// Node of the glyph hierarchy: a glyph name, its type and its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphOutline {
    pub name: String,

    #[serde(rename = "type", default)]
    pub type_name: String,

    #[serde(default)]
    pub children: Vec<GlyphOutline>,
}

/// Boxes of every glyph in one rendered tree, keyed by glyph name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphBoxes {
    /// Id of the root glyph, used to match boxes back to glyphs.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(flatten)]
    pub boxes: IndexMap<String, BoxRecord>,
}

/// Serialized form of a [`GlyphBox`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxRecord {
    pub drawing_bounds: RectRecord,
    #[serde(default)]
    pub drawing_center: Point,
    pub bounds: RectRecord,
    #[serde(default)]
    pub center: Point,
    #[serde(default)]
    pub shape_positions: ShapePositions,
    #[serde(default)]
    pub history: Vec<RectRecord>,
    #[serde(default)]
    pub max_hist_length: Option<usize>,
    #[serde(rename = "applyTransformsFlag", default)]
    pub apply_transforms: bool,
}

impl BoxRecord {
    /// The layout that reproduces this box when drawing.
    pub fn layout(&self) -> LayoutOptions {
        LayoutOptions::new(self.drawing_bounds.into()).with_shape_positions(self.shape_positions.clone())
    }
}

impl From<&GlyphBox> for BoxRecord {
    fn from(glyph_box: &GlyphBox) -> Self {
        Self {
            drawing_bounds: glyph_box.drawing_bounds().into(),
            drawing_center: glyph_box.drawing_center(),
            bounds: glyph_box.bounds().into(),
            center: glyph_box.center(),
            shape_positions: glyph_box.shape_positions().clone(),
            history: glyph_box.history().iter().map(|&b| b.into()).collect(),
            max_hist_length: glyph_box.max_hist_length(),
            apply_transforms: glyph_box.apply_transforms(),
        }
    }
}

/// Rectangle as stored in templates. Extra keys (`x`, `y`, `generator`) are ignored on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectRecord {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Bounds> for RectRecord {
    fn from(bounds: Bounds) -> Self {
        Self {
            left: bounds.left(),
            top: bounds.top(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

impl From<RectRecord> for Bounds {
    fn from(rect: RectRecord) -> Self {
        Bounds::from_ltwh(rect.left, rect.top, rect.width, rect.height)
    }
}

/// Binds a glyph element to a data field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementFeatureBinding {
    pub element: String,
    pub field: String,
    pub shape: String,
}

/// Display settings stored next to the design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order_field: Option<String>,

    /// Upper bound on the number of box tables rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_displayed_glyphs: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_rect_size_factor: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<usize>,
}

impl TemplateDocument {
    /// Builds a template from rendered glyph trees.
    ///
    /// The hierarchy and parameters come from the first tree; every tree
    /// contributes one box table. An empty slice yields an empty template.
    pub fn capture(glyphs: &[GlyphNode]) -> Self {
        let mut template = Self::default();
        template.update_glyph_information(glyphs);
        template
    }

    /// Replaces hierarchy, parameters and boxes with those of `glyphs`,
    /// keeping bindings, shapes and display settings. No-op for an empty slice.
    pub fn update_glyph_information(&mut self, glyphs: &[GlyphNode]) {
        let Some(top) = glyphs.first() else {
            return;
        };

        self.top_glyph = GlyphOutline {
            name: top.name().to_string(),
            type_name: top.kind().type_name().to_string(),
            children: top
                .children()
                .iter()
                .map(|child| GlyphOutline {
                    name: child.name().to_string(),
                    type_name: child.kind().type_name().to_string(),
                    children: Vec::new(),
                })
                .collect(),
        };

        self.glyph_parameters = top
            .iter()
            .map(|glyph| (glyph.name().to_string(), glyph.parameters().clone()))
            .collect();

        self.glyph_boxes = glyphs
            .iter()
            .map(|root| GlyphBoxes {
                id: root.id().map(str::to_string),
                boxes: root
                    .iter()
                    .map(|glyph| (glyph.name().to_string(), BoxRecord::from(glyph.glyph_box())))
                    .collect(),
            })
            .collect();

        debug!(
            top_glyph = self.top_glyph.name.as_str(),
            trees = self.glyph_boxes.len();
            "Captured glyph information"
        );
    }

    pub fn from_json(source: &str) -> Result<Self, GlyphworkError> {
        serde_json::from_str(source).map_err(|err| GlyphworkError::new_template_error(err, source))
    }

    pub fn to_json(&self) -> Result<String, GlyphworkError> {
        serde_json::to_string_pretty(self).map_err(|err| GlyphworkError::new_template_error(err, ""))
    }

    /// Parameters recorded for the glyph called `name`.
    pub fn parameters_for(&self, name: &str) -> Option<&Parameters> {
        self.glyph_parameters.get(name)
    }
}
