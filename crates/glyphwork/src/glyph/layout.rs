//! Box calculation: from a caller's bounding rectangle to a glyph's own region.
//!
//! A composite glyph is usually laid out with a single bounding rectangle.
//! The [`ShapePositions`] table then carves an independent sub-region out of
//! that rectangle for every named shape, so each child lands in its own spot
//! without the caller computing child rectangles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use glyphwork_core::geometry::{Bounds, Point};

/// Proportional placement of one named shape inside a bounding rectangle.
///
/// All values are fractions of the *unscaled* bounding rectangle, typically in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePosition {
    pub top_shift: f32,
    pub left_shift: f32,
    pub width_proportion: f32,
    pub height_proportion: f32,
}

impl ShapePosition {
    pub fn new(
        top_shift: f32,
        left_shift: f32,
        width_proportion: f32,
        height_proportion: f32,
    ) -> Self {
        Self {
            top_shift,
            left_shift,
            width_proportion,
            height_proportion,
        }
    }

    /// Shifts `rect` by the shift fractions, then scales its size by the proportions.
    ///
    /// The shift is computed from the original size, before scaling.
    pub fn apply(&self, rect: Bounds) -> Bounds {
        let left = rect.left() + self.left_shift * rect.width();
        let top = rect.top() + self.top_shift * rect.height();
        Bounds::from_ltwh(
            left,
            top,
            rect.width() * self.width_proportion,
            rect.height() * self.height_proportion,
        )
    }
}

/// Shape placements keyed by lowercase glyph name.
pub type ShapePositions = IndexMap<String, ShapePosition>;

/// Caller-supplied layout description passed to `draw`.
///
/// # Examples
///
/// ```
/// use glyphwork::glyph::{LayoutOptions, ShapePosition};
/// use glyphwork_core::geometry::Bounds;
///
/// let options = LayoutOptions::new(Bounds::from_ltwh(0.0, 0.0, 200.0, 200.0))
///     .with_shape_position("nucleus", ShapePosition::new(0.25, 0.25, 0.5, 0.5));
/// assert!(options.shape_positions().contains_key("nucleus"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOptions {
    bounding_rect: Bounds,
    shape_positions: ShapePositions,
}

impl LayoutOptions {
    pub fn new(bounding_rect: Bounds) -> Self {
        Self {
            bounding_rect,
            shape_positions: ShapePositions::new(),
        }
    }

    /// Adds a placement; the name is lowercased to match lookup.
    pub fn with_shape_position(mut self, name: &str, position: ShapePosition) -> Self {
        self.shape_positions.insert(name.to_lowercase(), position);
        self
    }

    pub fn with_shape_positions(mut self, positions: ShapePositions) -> Self {
        self.shape_positions = positions;
        self
    }

    pub fn bounding_rect(&self) -> Bounds {
        self.bounding_rect
    }

    pub fn shape_positions(&self) -> &ShapePositions {
        &self.shape_positions
    }
}

/// The region a glyph occupies, as computed by its last draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphBox {
    surface_rect: Bounds,
    drawing_bounds: Bounds,
    drawing_center: Point,
    bounds: Bounds,
    center: Point,
    shape_positions: ShapePositions,
    history: Vec<Bounds>,
    max_hist_length: Option<usize>,
    apply_transforms: bool,
}

impl GlyphBox {
    /// Physical rectangle of the surface element at computation time.
    pub fn surface_rect(&self) -> Bounds {
        self.surface_rect
    }

    /// The bounding rectangle as supplied by the caller, before placement.
    pub fn drawing_bounds(&self) -> Bounds {
        self.drawing_bounds
    }

    /// Center of [`GlyphBox::drawing_bounds`], relative to the surface origin.
    pub fn drawing_center(&self) -> Point {
        self.drawing_center
    }

    /// Device-space rectangle of this glyph.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Center of [`GlyphBox::bounds`], relative to the surface origin.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn shape_positions(&self) -> &ShapePositions {
        &self.shape_positions
    }

    /// Previous bounds recorded by the glyph kind, oldest first.
    pub fn history(&self) -> &[Bounds] {
        &self.history
    }

    pub fn max_hist_length(&self) -> Option<usize> {
        self.max_hist_length
    }

    pub fn apply_transforms(&self) -> bool {
        self.apply_transforms
    }

    /// Records `bounds` in the history, dropping the oldest entries beyond the maximum length.
    pub fn push_history(&mut self, bounds: Bounds) {
        self.history.push(bounds);
        if let Some(max) = self.max_hist_length {
            let excess = self.history.len().saturating_sub(max);
            self.history.drain(..excess);
        }
    }

    pub fn set_max_hist_length(&mut self, max: Option<usize>) {
        self.max_hist_length = max;
        if let Some(max) = max {
            let excess = self.history.len().saturating_sub(max);
            self.history.drain(..excess);
        }
    }

    pub fn set_apply_transforms(&mut self, apply: bool) {
        self.apply_transforms = apply;
    }

    /// Keeps the kind-owned fields (history and transform settings) of a previous box.
    pub(crate) fn inherit_history(mut self, previous: &GlyphBox) -> Self {
        self.history = previous.history.clone();
        self.max_hist_length = previous.max_hist_length;
        self.apply_transforms = previous.apply_transforms;
        self
    }
}

/// Computes the box of the glyph called `glyph_name`.
///
/// If `options` holds a placement keyed by the lowercase glyph name, the
/// bounding rectangle is shifted and scaled by it; otherwise it is used as is.
/// Centers are expressed relative to `surface_rect`'s top-left corner.
pub fn compute_box(surface_rect: Bounds, options: &LayoutOptions, glyph_name: &str) -> GlyphBox {
    let drawing_bounds = options.bounding_rect();
    let bounds = match options.shape_positions().get(&glyph_name.to_lowercase()) {
        Some(position) => position.apply(drawing_bounds),
        None => drawing_bounds,
    };

    GlyphBox {
        surface_rect,
        drawing_bounds,
        drawing_center: center_in_surface(drawing_bounds, surface_rect),
        bounds,
        center: center_in_surface(bounds, surface_rect),
        shape_positions: options.shape_positions().clone(),
        ..GlyphBox::default()
    }
}

fn center_in_surface(rect: Bounds, surface_rect: Bounds) -> Point {
    Point::new(
        rect.left() - surface_rect.left() + rect.width() / 2.0,
        rect.top() - surface_rect.top() + rect.height() / 2.0,
    )
}
