use std::rc::Rc;

use glyphwork_core::{
    path::PathGeometry,
    surface::{PathSpec, Surface},
};

use super::{Ellipse, Polygon, outline_style};
use crate::{
    error::GlyphError,
    glyph::{
        BASE_ELEMENTS, CanonicalShapes, ElementDescriptor, ElementTarget, GlyphKind, GlyphNode,
        LayoutOptions, ShapePosition,
    },
};

const SHAPES: CanonicalShapes = CanonicalShapes::new("body", &["nucleus", "marker"]);

static ELEMENTS: [ElementDescriptor; 5] = [
    BASE_ELEMENTS[0],
    BASE_ELEMENTS[1],
    ElementDescriptor::path("Body", &["strokeColor", "lightColor", "strokeWidth"]),
    ElementDescriptor::path("Ellipse", &["primaryColor"])
        .with_target(ElementTarget::Child("nucleus")),
    ElementDescriptor::path("Polygon", &["secondaryColor", "numSides"])
        .with_target(ElementTarget::Child("marker")),
];

/// Placement used for a child when the layout does not provide one.
const DEFAULT_POSITIONS: [(&str, ShapePosition); 2] = [
    (
        "nucleus",
        ShapePosition {
            top_shift: 0.25,
            left_shift: 0.25,
            width_proportion: 0.5,
            height_proportion: 0.5,
        },
    ),
    (
        "marker",
        ShapePosition {
            top_shift: 0.05,
            left_shift: 0.7,
            width_proportion: 0.25,
            height_proportion: 0.25,
        },
    ),
];

/// Composite glyph: a rectangular body holding an ellipse nucleus and a polygon marker.
///
/// Children inherit the body's parameters and are placed through the
/// layout's shape positions, keyed `nucleus` and `marker`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nested;

impl Nested {
    fn draw_body(glyph: &mut GlyphNode, surface: &mut dyn Surface) -> Result<(), GlyphError> {
        glyph.delete_path(surface, SHAPES.main)?;
        let glyph_box = glyph.glyph_box();
        let geometry = PathGeometry::rectangle(glyph_box.center(), glyph_box.bounds().to_size());
        let spec = PathSpec::new(geometry, outline_style(glyph.parameters(), "lightColor"));
        let node = surface.create_path(spec)?;
        glyph.set_main_path(surface, node)
    }

    fn child_layout(layout: &LayoutOptions) -> LayoutOptions {
        DEFAULT_POSITIONS
            .iter()
            .fold(layout.clone(), |child_layout, (name, position)| {
                if child_layout.shape_positions().contains_key(*name) {
                    child_layout
                } else {
                    child_layout.with_shape_position(name, *position)
                }
            })
    }
}

impl GlyphKind for Nested {
    fn type_name(&self) -> &'static str {
        "Nested"
    }

    fn shapes(&self) -> CanonicalShapes {
        SHAPES
    }

    fn elements(&self) -> &'static [ElementDescriptor] {
        &ELEMENTS
    }

    fn draw(
        &self,
        glyph: &mut GlyphNode,
        surface: &mut dyn Surface,
        layout: &LayoutOptions,
    ) -> Result<(), GlyphError> {
        glyph.remove_children(surface)?;
        Self::draw_body(glyph, surface)?;

        let child_layout = Self::child_layout(layout);
        let child_kinds: [Rc<dyn GlyphKind>; 2] = [Rc::new(Ellipse), Rc::new(Polygon)];
        for kind in child_kinds {
            let mut child = GlyphNode::builder(kind)
                .layer(glyph.layer())
                .parameters(glyph.parameters().clone())
                .child_of(glyph)
                .build(surface)?;
            child.draw(surface, &child_layout)?;
            glyph.register_child(child)?;
        }
        Ok(())
    }

    fn draw_element(
        &self,
        glyph: &mut GlyphNode,
        element: &str,
        surface: &mut dyn Surface,
    ) -> Result<(), GlyphError> {
        if element != "Body" {
            return Err(GlyphError::UnknownElement {
                glyph: glyph.name().to_string(),
                element: element.to_string(),
            });
        }
        Self::draw_body(glyph, surface)
    }
}
