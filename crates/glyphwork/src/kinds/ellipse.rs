use glyphwork_core::{
    path::PathGeometry,
    surface::{PathSpec, Surface},
};

use super::{accent_style, count_parameter, outline_style};
use crate::{
    error::GlyphError,
    glyph::{
        BASE_ELEMENTS, CanonicalShapes, ElementDescriptor, GlyphKind, GlyphNode, LayoutOptions,
        Parameters,
    },
};

const SHAPES: CanonicalShapes = CanonicalShapes::new("ellipse", &[]);

static ELEMENTS: [ElementDescriptor; 4] = [
    BASE_ELEMENTS[0],
    BASE_ELEMENTS[1],
    ElementDescriptor::path("Ellipse", &["strokeColor", "primaryColor", "strokeWidth"]),
    ElementDescriptor::path("Halo", &["lightColor", "narrowPathSize"]),
];

const HALO: &str = "halo";
const HALO_SCALE: f32 = 1.15;

/// A filled ellipse inscribed in the glyph box.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ellipse;

impl Ellipse {
    fn geometry(glyph: &GlyphNode, scale: f32) -> PathGeometry {
        let glyph_box = glyph.glyph_box();
        let bounds = glyph_box.bounds();
        PathGeometry::ellipse(
            glyph_box.center(),
            bounds.width() / 2.0 * scale,
            bounds.height() / 2.0 * scale,
            count_parameter(glyph.parameters(), "segments", 64, 3),
        )
    }

    fn draw_main(glyph: &mut GlyphNode, surface: &mut dyn Surface) -> Result<(), GlyphError> {
        glyph.delete_path(surface, SHAPES.main)?;
        let spec = PathSpec::new(
            Self::geometry(glyph, 1.0),
            outline_style(glyph.parameters(), "primaryColor"),
        );
        let node = surface.create_path(spec)?;
        glyph.set_main_path(surface, node)
    }

    fn draw_halo(glyph: &mut GlyphNode, surface: &mut dyn Surface) -> Result<(), GlyphError> {
        glyph.delete_path(surface, HALO)?;
        let spec = PathSpec::new(
            Self::geometry(glyph, HALO_SCALE),
            accent_style(glyph.parameters(), "lightColor", "narrowPathSize"),
        );
        let node = surface.create_path(spec)?;
        glyph.register_path(surface, node, HALO)
    }
}

impl GlyphKind for Ellipse {
    fn type_name(&self) -> &'static str {
        "Ellipse"
    }

    fn shapes(&self) -> CanonicalShapes {
        SHAPES
    }

    fn elements(&self) -> &'static [ElementDescriptor] {
        &ELEMENTS
    }

    fn default_parameters(&self) -> Parameters {
        let mut params = Parameters::base();
        params.set("segments", 64.0);
        params
    }

    fn draw(
        &self,
        glyph: &mut GlyphNode,
        surface: &mut dyn Surface,
        _layout: &LayoutOptions,
    ) -> Result<(), GlyphError> {
        Self::draw_main(glyph, surface)?;
        // A live halo follows the redrawn ellipse
        if glyph.registry().get(HALO).is_some() {
            Self::draw_halo(glyph, surface)?;
        }
        Ok(())
    }

    fn draw_element(
        &self,
        glyph: &mut GlyphNode,
        element: &str,
        surface: &mut dyn Surface,
    ) -> Result<(), GlyphError> {
        match element {
            "Ellipse" => Self::draw_main(glyph, surface),
            "Halo" => Self::draw_halo(glyph, surface),
            _ => Err(GlyphError::UnknownElement {
                glyph: glyph.name().to_string(),
                element: element.to_string(),
            }),
        }
    }
}
