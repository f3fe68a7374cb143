use glyphwork_core::{
    path::PathGeometry,
    surface::{PathSpec, Surface},
};

use super::{count_parameter, outline_style};
use crate::{
    error::GlyphError,
    glyph::{
        BASE_ELEMENTS, CanonicalShapes, ElementDescriptor, GlyphKind, GlyphNode, LayoutOptions,
        Parameters,
    },
};

const SHAPES: CanonicalShapes = CanonicalShapes::new("polygon", &[]);

static ELEMENTS: [ElementDescriptor; 3] = [
    BASE_ELEMENTS[0],
    BASE_ELEMENTS[1],
    ElementDescriptor::path("Polygon", &["strokeColor", "secondaryColor", "numSides"]),
];

const DEFAULT_SIDES: usize = 6;

/// A regular polygon inscribed in the glyph box, first vertex up.
///
/// The number of sides comes from the `numSides` parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Polygon;

impl Polygon {
    fn draw_main(glyph: &mut GlyphNode, surface: &mut dyn Surface) -> Result<(), GlyphError> {
        glyph.delete_path(surface, SHAPES.main)?;
        let glyph_box = glyph.glyph_box();
        let bounds = glyph_box.bounds();
        let geometry = PathGeometry::regular_polygon(
            glyph_box.center(),
            bounds.width() / 2.0,
            bounds.height() / 2.0,
            count_parameter(glyph.parameters(), "numSides", DEFAULT_SIDES, 3),
        );
        let spec = PathSpec::new(geometry, outline_style(glyph.parameters(), "secondaryColor"));
        let node = surface.create_path(spec)?;
        glyph.set_main_path(surface, node)
    }
}

impl GlyphKind for Polygon {
    fn type_name(&self) -> &'static str {
        "Polygon"
    }

    fn shapes(&self) -> CanonicalShapes {
        SHAPES
    }

    fn elements(&self) -> &'static [ElementDescriptor] {
        &ELEMENTS
    }

    fn default_parameters(&self) -> Parameters {
        let mut params = Parameters::base();
        params.set("numSides", DEFAULT_SIDES as f64);
        params
    }

    fn draw(
        &self,
        glyph: &mut GlyphNode,
        surface: &mut dyn Surface,
        _layout: &LayoutOptions,
    ) -> Result<(), GlyphError> {
        Self::draw_main(glyph, surface)
    }

    fn draw_element(
        &self,
        glyph: &mut GlyphNode,
        element: &str,
        surface: &mut dyn Surface,
    ) -> Result<(), GlyphError> {
        if element != "Polygon" {
            return Err(GlyphError::UnknownElement {
                glyph: glyph.name().to_string(),
                element: element.to_string(),
            });
        }
        Self::draw_main(glyph, surface)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use glyphwork_core::{geometry::Bounds, surface::Scene};

    use super::*;

    #[test]
    fn test_sides_follow_parameter() {
        let mut scene = Scene::new(Bounds::from_ltwh(0.0, 0.0, 200.0, 200.0));
        let layer = scene.add_layer("glyph-0");
        let overrides: Parameters = [("numSides", 5.0)].into_iter().collect();
        let mut glyph = GlyphNode::builder(Rc::new(Polygon))
            .layer(layer)
            .parameters(overrides)
            .build(&mut scene)
            .unwrap();
        glyph
            .draw(
                &mut scene,
                &LayoutOptions::new(Bounds::from_ltwh(0.0, 0.0, 40.0, 40.0)),
            )
            .unwrap();

        let main = glyph.main_path(&scene).unwrap();
        assert_eq!(scene.path_geometry(main).unwrap().len(), 5);

        glyph.parameters_mut().set("numSides", 8.0);
        Polygon.draw_element(&mut glyph, "Polygon", &mut scene).unwrap();
        let main = glyph.main_path(&scene).unwrap();
        assert_eq!(scene.path_geometry(main).unwrap().len(), 8);
    }
}
