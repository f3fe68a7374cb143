//! The glyph node: identity, layer binding, paths, box and lifecycle.

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, info, warn};

use glyphwork_core::{
    color::Color,
    path::PathGeometry,
    style::{PathStyle, StrokeDefinition},
    surface::{LayerId, NodeId, PathSpec, Surface},
};

use super::{
    element::ElementTarget,
    kind::{CanonicalShapes, GlyphKind},
    layout::{GlyphBox, LayoutOptions, compute_box},
    parameters::Parameters,
    registry::PathRegistry,
};
use crate::error::GlyphError;

/// Number of points used when cloning a path without an explicit count.
pub const DEFAULT_CLONE_POINTS: usize = 300;

/// Registry name of the invisible rectangle every draw creates.
pub const DRAWING_BOX: &str = "drawingBox";

/// Factor used in place of an exact zero when scaling.
const MIN_SCALE_FACTOR: f32 = 0.05;

const DRAWING_BOX_STROKE_WIDTH: f32 = 5.0;

/// Non-owning reference from a child glyph to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLink {
    name: String,
    id: Option<String>,
    layer: Option<LayerId>,
}

impl ParentLink {
    pub(super) fn of(parent: &GlyphNode) -> Self {
        Self {
            name: parent.name.clone(),
            id: parent.id.clone(),
            layer: parent.layer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }
}

/// A glyph instance bound to one surface layer.
///
/// Every operation touching drawables receives the surface explicitly. The
/// node keeps only identities of the paths it created, never references.
#[derive(Debug)]
pub struct GlyphNode {
    pub(super) kind: Rc<dyn GlyphKind>,
    pub(super) layer: Option<LayerId>,
    pub(super) id: Option<String>,
    pub(super) name: String,
    pub(super) parameters: Parameters,
    pub(super) registry: PathRegistry,
    pub(super) drawn: bool,
    pub(super) glyph_box: GlyphBox,
    pub(super) children: Vec<GlyphNode>,
    pub(super) parent: Option<ParentLink>,
    /// `(child name, element name)` to the conventional draw label.
    pub(super) dispatch: IndexMap<(String, String), String>,
}

/// Builder for [`GlyphNode`].
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use glyphwork::{glyph::GlyphNode, kinds::Ellipse};
/// use glyphwork_core::{geometry::Bounds, surface::{Scene, Surface}};
///
/// let mut scene = Scene::new(Bounds::from_ltwh(0.0, 0.0, 300.0, 300.0));
/// let layer = scene.add_layer("glyph-0");
///
/// let glyph = GlyphNode::builder(Rc::new(Ellipse))
///     .layer(layer)
///     .build(&mut scene)
///     .unwrap();
///
/// assert_eq!(glyph.name(), "ellipse");
/// assert!(glyph.group(&scene).is_some());
/// ```
#[derive(Debug)]
pub struct GlyphBuilder {
    kind: Rc<dyn GlyphKind>,
    layer: Option<LayerId>,
    name: Option<String>,
    id: Option<String>,
    overrides: Parameters,
    parent: Option<(ParentLink, CanonicalShapes, usize)>,
}

impl GlyphBuilder {
    pub fn layer(mut self, layer: impl Into<Option<LayerId>>) -> Self {
        self.layer = layer.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Options overlaid on the kind's defaults.
    pub fn parameters(mut self, overrides: Parameters) -> Self {
        self.overrides = overrides;
        self
    }

    /// Builds the glyph as the next child of `parent`.
    ///
    /// The child still has to be registered with
    /// [`GlyphNode::register_child`] once drawn.
    pub fn child_of(mut self, parent: &GlyphNode) -> Self {
        self.parent = Some((
            ParentLink::of(parent),
            parent.kind.shapes(),
            parent.children.len(),
        ));
        self
    }

    /// Resolves the name, checks the layer against the parent, merges the
    /// parameters and installs an empty `"{name}Group"` on the bound layer.
    pub fn build(self, surface: &mut dyn Surface) -> Result<GlyphNode, GlyphError> {
        let own_shapes = self.kind.shapes();
        let name = resolve_name(
            self.name.as_deref(),
            self.parent.as_ref().map(|(_, shapes, index)| (*shapes, *index)),
            own_shapes,
        );

        if let Some((link, _, _)) = &self.parent {
            if link.layer != self.layer {
                return Err(GlyphError::LayerMismatch {
                    child: name,
                    child_layer: self.layer,
                    parent: link.name.clone(),
                    parent_layer: link.layer,
                });
            }
        }

        let mut parameters = self.kind.default_parameters();
        parameters.merge(&self.overrides);

        let glyph = GlyphNode {
            kind: self.kind,
            layer: self.layer,
            id: self.id,
            name,
            parameters,
            registry: PathRegistry::new(),
            drawn: false,
            glyph_box: GlyphBox::default(),
            children: Vec::new(),
            parent: self.parent.map(|(link, _, _)| link),
            dispatch: IndexMap::new(),
        };

        if let Some(layer) = glyph.layer {
            surface.activate_layer(layer)?;
            let group = surface.create_group(&[])?;
            glyph.set_group(surface, group)?;
        }

        debug!(
            glyph:% = glyph.name,
            kind = glyph.kind.type_name(),
            layer:? = glyph.layer;
            "Built glyph"
        );
        Ok(glyph)
    }
}

/// Explicit name, else the parent kind's declared child name at `index`, else the kind's main name.
fn resolve_name(
    explicit: Option<&str>,
    parent: Option<(CanonicalShapes, usize)>,
    own: CanonicalShapes,
) -> String {
    if let Some(name) = explicit.filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    parent
        .and_then(|(shapes, index)| shapes.child(index))
        .unwrap_or(own.main)
        .to_string()
}

impl GlyphNode {
    pub fn builder(kind: Rc<dyn GlyphKind>) -> GlyphBuilder {
        GlyphBuilder {
            kind,
            layer: None,
            name: None,
            id: None,
            overrides: Parameters::new(),
            parent: None,
        }
    }

    pub fn kind(&self) -> &Rc<dyn GlyphKind> {
        &self.kind
    }

    pub fn layer(&self) -> Option<LayerId> {
        self.layer
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    pub fn registry(&self) -> &PathRegistry {
        &self.registry
    }

    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    pub fn glyph_box(&self) -> &GlyphBox {
        &self.glyph_box
    }

    /// Mutable box access for kinds maintaining history or transform settings.
    pub fn glyph_box_mut(&mut self) -> &mut GlyphBox {
        &mut self.glyph_box
    }

    pub fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn group_name(&self) -> String {
        format!("{}Group", self.name)
    }

    /// Returns the bound layer if it is the active one.
    fn require_active_layer(&self, surface: &dyn Surface) -> Result<LayerId, GlyphError> {
        let layer = self.require_layer()?;
        let active = surface.active_layer();
        if active != Some(layer) {
            return Err(GlyphError::InactiveLayer {
                glyph: self.name.clone(),
                layer,
                active,
            });
        }
        Ok(layer)
    }

    fn require_layer(&self) -> Result<LayerId, GlyphError> {
        self.layer.ok_or_else(|| GlyphError::LayerUnbound {
            glyph: self.name.clone(),
        })
    }

    /// Direct child of the bound layer carrying `name`.
    pub(super) fn find_in_layer(&self, surface: &dyn Surface, name: &str) -> Option<NodeId> {
        let layer = self.layer?;
        surface
            .layer_children(layer)
            .ok()?
            .into_iter()
            .find(|&node| surface.node_name(node) == Some(name))
    }

    /// The `"{name}Group"` node among the bound layer's direct children.
    pub fn group(&self, surface: &dyn Surface) -> Option<NodeId> {
        let group_name = self.group_name();
        let group = self.find_in_layer(surface, &group_name);
        if group.is_none() {
            warn!(glyph:% = self.name, layer:? = self.layer; "No group in layer matched `{group_name}`");
        }
        group
    }

    /// Makes `group` this glyph's group, replacing any previous one in place.
    pub fn set_group(&self, surface: &mut dyn Surface, group: NodeId) -> Result<(), GlyphError> {
        self.require_active_layer(surface)?;
        let group_name = self.group_name();
        if let Some(old) = self.find_in_layer(surface, &group_name) {
            if old != group {
                surface.replace_with(old, group)?;
            }
        }
        surface.set_node_name(group, &group_name)?;
        Ok(())
    }

    /// Computes the box, creates the drawing box and runs the kind's drawing.
    ///
    /// Nothing is committed when the layer preconditions fail. Drawing again
    /// replaces the previous drawing box.
    pub fn draw(
        &mut self,
        surface: &mut dyn Surface,
        layout: &LayoutOptions,
    ) -> Result<(), GlyphError> {
        let glyph_box = compute_box(surface.surface_rect(), layout, &self.name);
        self.require_active_layer(surface)?;
        self.delete_path(surface, DRAWING_BOX)?;

        let style = PathStyle::stroked(StrokeDefinition::new(
            Color::default(),
            DRAWING_BOX_STROKE_WIDTH,
        ))
        .with_visible(false);
        let geometry = PathGeometry::rectangle(glyph_box.center(), glyph_box.bounds().to_size());
        let drawing_box = surface.create_path(PathSpec::new(geometry, style))?;
        self.register_path(surface, drawing_box, DRAWING_BOX)?;

        self.glyph_box = glyph_box.inherit_history(&self.glyph_box);
        self.drawn = true;

        debug!(glyph:% = self.name, bounds:? = self.glyph_box.bounds(); "Drawing glyph");
        let kind = Rc::clone(&self.kind);
        kind.draw(self, surface, layout)
    }

    /// Names `node` after `name` and tracks it in the registry.
    pub fn register_path(
        &mut self,
        surface: &mut dyn Surface,
        node: NodeId,
        name: &str,
    ) -> Result<(), GlyphError> {
        surface.set_node_name(node, name)?;
        self.registry.insert(name, node);
        debug!(glyph:% = self.name, path = name, node:% = node; "Registered path");
        Ok(())
    }

    /// Resolves the tracked identity of `name` against the surface.
    ///
    /// Searches this glyph's group first, then the bound layer's direct
    /// children; a node only matches if both its identity and its name agree.
    pub fn get_path(&self, surface: &dyn Surface, name: &str) -> Result<NodeId, GlyphError> {
        let tracked = self.registry.get(name);
        let not_found = || GlyphError::PathNotFound {
            glyph: self.name.clone(),
            path: name.to_string(),
            tracked,
        };
        let target = tracked.ok_or_else(not_found)?;
        let matches = |node: &NodeId| *node == target && surface.node_name(*node) == Some(name);

        if let Some(group) = self.find_in_layer(surface, &self.group_name()) {
            if surface.node_children(group)?.iter().any(matches) {
                return Ok(target);
            }
        }
        if let Some(layer) = self.layer {
            if surface.layer_children(layer)?.iter().any(matches) {
                return Ok(target);
            }
        }
        Err(not_found())
    }

    /// Removes the tracked node of `name` from the surface and nulls the entry.
    ///
    /// Untracked or already deleted names are a no-op.
    pub fn delete_path(&mut self, surface: &mut dyn Surface, name: &str) -> Result<(), GlyphError> {
        let Some(target) = self.registry.get(name) else {
            return Ok(());
        };
        let layer = self.require_layer()?;
        if !surface.contains_in_layer(layer, target) {
            return Err(GlyphError::PathNotFound {
                glyph: self.name.clone(),
                path: name.to_string(),
                tracked: Some(target),
            });
        }
        surface.remove(target);
        self.registry.null_out(name);
        debug!(glyph:% = self.name, path = name, node:% = target; "Deleted path");
        Ok(())
    }

    /// The path registered under the kind's canonical main name.
    pub fn main_path(&self, surface: &dyn Surface) -> Result<NodeId, GlyphError> {
        self.get_path(surface, self.kind.shapes().main)
    }

    pub fn set_main_path(&mut self, surface: &mut dyn Surface, node: NodeId) -> Result<(), GlyphError> {
        let main = self.kind.shapes().main;
        self.register_path(surface, node, main)
    }

    /// The main path plus every drawn path element, keyed by lowercase element name.
    ///
    /// Child-targeted elements are keyed `"{child}-{element}"` and only
    /// included when `include_children` is set.
    pub fn named_paths(
        &self,
        surface: &dyn Surface,
        include_children: bool,
    ) -> Result<IndexMap<String, NodeId>, GlyphError> {
        let main = self.kind.shapes().main;
        let mut paths = IndexMap::new();
        paths.insert(main.to_string(), self.get_path(surface, main)?);

        for element in self.kind.elements() {
            let (owner, key_prefix) = match element.target {
                ElementTarget::Main => (self, None),
                ElementTarget::Child(child) if include_children => {
                    (self.get_child(child)?, Some(child))
                }
                ElementTarget::Child(_) => continue,
            };
            if element.is_scale() {
                continue;
            }
            let path_name = element.name.to_lowercase();
            if !owner.registry.is_drawn(&path_name) {
                continue;
            }
            let node = owner.get_path(surface, &path_name)?;
            let key = match key_prefix {
                Some(child) => format!("{child}-{path_name}"),
                None => path_name,
            };
            paths.insert(key, node);
        }
        Ok(paths)
    }

    /// Wraps this glyph's own named paths into a fresh group, then recurses into children.
    pub fn build_path_groups(&mut self, surface: &mut dyn Surface) -> Result<(), GlyphError> {
        let paths: Vec<NodeId> = self.named_paths(surface, false)?.into_values().collect();
        self.require_active_layer(surface)?;
        let group = surface.create_group(&paths)?;
        self.set_group(surface, group)?;
        debug!(glyph:% = self.name, paths = paths.len(); "Grouped paths");

        for child in &mut self.children {
            child.build_path_groups(surface)?;
        }
        Ok(())
    }

    /// Tears down everything this glyph drew and reinstalls an empty group.
    ///
    /// A root glyph clears its whole layer; a child deletes its tracked
    /// paths one by one. Teardown always runs to completion: if a tracked
    /// path had gone missing, the first such error is returned afterwards.
    pub fn reset(&mut self, surface: &mut dyn Surface) -> Result<(), GlyphError> {
        if !self.drawn {
            return Ok(());
        }
        let layer = self.require_layer()?;
        let mut first_error = None;

        if self.is_root() {
            surface.clear_layer(layer)?;
        } else {
            for name in self.registry.names() {
                if let Err(err) = self.delete_path(surface, &name) {
                    warn!(glyph:% = self.name, path:% = name; "Path out of sync during reset: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }

        self.registry.clear();
        self.children.clear();
        self.dispatch.clear();
        self.drawn = false;

        surface.activate_layer(layer)?;
        let group = surface.create_group(&[])?;
        self.set_group(surface, group)?;
        info!(glyph:% = self.name, root = self.is_root(); "Glyph reset");

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Scales the whole bound layer about its content center.
    ///
    /// Factors must lie in `[0, 1]`; an exact zero is replaced by 0.05.
    pub fn scale(
        &self,
        surface: &mut dyn Surface,
        factor_x: f32,
        factor_y: f32,
    ) -> Result<(), GlyphError> {
        let in_range = |factor: f32| (0.0..=1.0).contains(&factor);
        if !in_range(factor_x) || !in_range(factor_y) {
            return Err(GlyphError::InvalidScale { factor_x, factor_y });
        }
        let factor_x = if factor_x == 0.0 { MIN_SCALE_FACTOR } else { factor_x };
        let factor_y = if factor_y == 0.0 { MIN_SCALE_FACTOR } else { factor_y };

        let layer = self.require_layer()?;
        surface.activate_layer(layer)?;
        surface.scale_layer(layer, factor_x, factor_y)?;
        Ok(())
    }

    /// Creates an unregistered copy of path `name`, resampled to `num_points`
    /// points at equal arclength offsets. The copy goes to the active layer.
    pub fn clone_path(
        &self,
        surface: &mut dyn Surface,
        name: &str,
        num_points: usize,
    ) -> Result<NodeId, GlyphError> {
        let source = self.get_path(surface, name)?;
        let geometry = surface
            .path_geometry(source)
            .ok_or_else(|| GlyphError::PathNotFound {
                glyph: self.name.clone(),
                path: name.to_string(),
                tracked: Some(source),
            })?
            .resample(num_points);
        let clone = surface.create_path(PathSpec::new(geometry, PathStyle::default()))?;
        debug!(glyph:% = self.name, path = name, clone:% = clone, points = num_points; "Cloned path");
        Ok(clone)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use glyphwork_core::{
        geometry::{Bounds, Point, Size},
        surface::Scene,
    };

    use super::*;
    use crate::kinds::{Ellipse, Nested};

    fn scene() -> (Scene, LayerId) {
        let mut scene = Scene::new(Bounds::from_ltwh(0.0, 0.0, 400.0, 400.0));
        let layer = scene.add_layer("glyph-0");
        (scene, layer)
    }

    fn layout() -> LayoutOptions {
        LayoutOptions::new(Bounds::from_ltwh(100.0, 100.0, 80.0, 60.0))
    }

    fn ellipse(scene: &mut Scene, layer: LayerId) -> GlyphNode {
        GlyphNode::builder(Rc::new(Ellipse))
            .layer(layer)
            .build(scene)
            .unwrap()
    }

    fn square(scene: &mut Scene) -> NodeId {
        let geometry = PathGeometry::rectangle(Point::new(10.0, 10.0), Size::new(4.0, 4.0));
        scene
            .create_path(PathSpec::new(geometry, PathStyle::default()))
            .unwrap()
    }

    #[test]
    fn test_resolve_name_branches() {
        let own = CanonicalShapes::new("ellipse", &[]);
        let parent = CanonicalShapes::new("body", &["nucleus", "marker"]);

        assert_eq!(resolve_name(Some("custom"), Some((parent, 0)), own), "custom");
        assert_eq!(resolve_name(Some(""), Some((parent, 1)), own), "marker");
        assert_eq!(resolve_name(None, Some((parent, 2)), own), "ellipse");
        assert_eq!(resolve_name(None, None, own), "ellipse");
    }

    #[test]
    fn test_build_merges_parameters_and_installs_group() {
        let (mut scene, layer) = scene();
        let overrides: Parameters = [("strokeWidth", 3.0)].into_iter().collect();
        let glyph = GlyphNode::builder(Rc::new(Ellipse))
            .layer(layer)
            .id("g1")
            .parameters(overrides)
            .build(&mut scene)
            .unwrap();

        assert_eq!(glyph.parameters().number("strokeWidth"), Some(3.0));
        assert_eq!(glyph.parameters().text("primaryColor"), Some("#00897B"));
        assert_eq!(glyph.id(), Some("g1"));
        let group = glyph.group(&scene).unwrap();
        assert_eq!(scene.node_name(group), Some("ellipseGroup"));
        assert!(!glyph.is_drawn());
    }

    #[test]
    fn test_draw_without_layer_fails() {
        let (mut scene, _) = scene();
        let mut glyph = GlyphNode::builder(Rc::new(Ellipse)).build(&mut scene).unwrap();

        let err = glyph.draw(&mut scene, &layout()).unwrap_err();
        assert!(matches!(err, GlyphError::LayerUnbound { .. }));
        assert!(!glyph.is_drawn());
    }

    #[test]
    fn test_draw_on_inactive_layer_commits_nothing() {
        let (mut scene, layer) = scene();
        let other = scene.add_layer("glyph-1");
        let mut glyph = ellipse(&mut scene, layer);
        scene.activate_layer(other).unwrap();

        let err = glyph.draw(&mut scene, &layout()).unwrap_err();
        assert_eq!(
            err,
            GlyphError::InactiveLayer {
                glyph: "ellipse".to_string(),
                layer,
                active: Some(other),
            }
        );
        assert!(!glyph.is_drawn());
        assert!(glyph.registry().is_empty());
        assert_eq!(glyph.glyph_box(), &GlyphBox::default());
    }

    #[test]
    fn test_draw_registers_invisible_drawing_box() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        glyph.draw(&mut scene, &layout()).unwrap();

        let drawing_box = glyph.get_path(&scene, DRAWING_BOX).unwrap();
        let node = scene.node(drawing_box).unwrap();
        match node.kind() {
            glyphwork_core::surface::NodeKind::Path { geometry, style } => {
                assert!(!style.is_visible());
                assert_eq!(style.stroke().map(StrokeDefinition::width), Some(5.0));
                let bounds = geometry.bounds().unwrap();
                assert_approx_eq!(f32, bounds.width(), 80.0);
                assert_approx_eq!(f32, bounds.height(), 60.0);
            }
            other => panic!("expected a path, got {other:?}"),
        }
        assert!(glyph.is_drawn());
        assert_eq!(glyph.glyph_box().center(), Point::new(140.0, 130.0));
    }

    #[test]
    fn test_redraw_after_resize_recenters_and_replaces_drawing_box() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        glyph.draw(&mut scene, &layout()).unwrap();
        let first_box = glyph.get_path(&scene, DRAWING_BOX).unwrap();

        let resized = Bounds::from_ltwh(40.0, 20.0, 300.0, 300.0);
        scene.set_surface_rect(resized);
        glyph.draw(&mut scene, &layout()).unwrap();

        assert_eq!(glyph.glyph_box().surface_rect(), resized);
        assert_eq!(glyph.glyph_box().center(), Point::new(100.0, 110.0));
        assert!(scene.node(first_box).is_none());

        let drawing_boxes: Vec<_> = scene
            .layer_children(layer)
            .unwrap()
            .into_iter()
            .filter(|&node| scene.node_name(node) == Some(DRAWING_BOX))
            .collect();
        assert_eq!(drawing_boxes, vec![glyph.get_path(&scene, DRAWING_BOX).unwrap()]);
        assert_eq!(glyph.registry().len(), 2);
    }

    #[test]
    fn test_register_get_delete_round_trip() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        let node = square(&mut scene);

        glyph.register_path(&mut scene, node, "spike").unwrap();
        assert_eq!(glyph.get_path(&scene, "spike").unwrap(), node);
        assert_eq!(scene.node_name(node), Some("spike"));

        glyph.delete_path(&mut scene, "spike").unwrap();
        assert!(scene.node(node).is_none());
        assert!(matches!(
            glyph.get_path(&scene, "spike"),
            Err(GlyphError::PathNotFound { tracked: None, .. })
        ));

        // Deleting twice, or something never registered, is a no-op
        glyph.delete_path(&mut scene, "spike").unwrap();
        glyph.delete_path(&mut scene, "never").unwrap();
    }

    #[test]
    fn test_get_path_requires_matching_name() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        let node = square(&mut scene);
        glyph.register_path(&mut scene, node, "spike").unwrap();

        scene.set_node_name(node, "renamed").unwrap();
        assert!(matches!(
            glyph.get_path(&scene, "spike"),
            Err(GlyphError::PathNotFound { tracked: Some(_), .. })
        ));
    }

    #[test]
    fn test_delete_path_out_of_sync_errors() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        let node = square(&mut scene);
        glyph.register_path(&mut scene, node, "spike").unwrap();
        scene.remove(node);

        let err = glyph.delete_path(&mut scene, "spike").unwrap_err();
        assert_eq!(
            err,
            GlyphError::PathNotFound {
                glyph: "ellipse".to_string(),
                path: "spike".to_string(),
                tracked: Some(node),
            }
        );
    }

    #[test]
    fn test_set_group_replaces_in_place() {
        let (mut scene, layer) = scene();
        let glyph = ellipse(&mut scene, layer);
        let old = glyph.group(&scene).unwrap();
        let before = square(&mut scene);

        let new_group = scene.create_group(&[]).unwrap();
        glyph.set_group(&mut scene, new_group).unwrap();

        assert_eq!(glyph.group(&scene), Some(new_group));
        assert!(scene.node(old).is_none());
        assert_eq!(scene.layer_children(layer).unwrap(), vec![new_group, before]);
    }

    #[test]
    fn test_set_group_requires_active_layer() {
        let (mut scene, layer) = scene();
        let glyph = ellipse(&mut scene, layer);
        let other = scene.add_layer("glyph-1");
        scene.activate_layer(other).unwrap();
        let group = scene.create_group(&[]).unwrap();

        assert!(matches!(
            glyph.set_group(&mut scene, group),
            Err(GlyphError::InactiveLayer { .. })
        ));
    }

    #[test]
    fn test_build_path_groups_wraps_own_paths() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        glyph.draw(&mut scene, &layout()).unwrap();
        glyph.build_path_groups(&mut scene).unwrap();

        let group = glyph.group(&scene).unwrap();
        let main = glyph.main_path(&scene).unwrap();
        assert!(scene.node_children(group).unwrap().contains(&main));
        // The drawing box is not a named element and stays at layer level
        let drawing_box = glyph.get_path(&scene, DRAWING_BOX).unwrap();
        assert!(scene.layer_children(layer).unwrap().contains(&drawing_box));
    }

    #[test]
    fn test_reset_root_clears_layer_and_is_idempotent() {
        let (mut scene, layer) = scene();
        let mut glyph = GlyphNode::builder(Rc::new(Nested))
            .layer(layer)
            .build(&mut scene)
            .unwrap();
        glyph.draw(&mut scene, &layout()).unwrap();
        glyph.build_path_groups(&mut scene).unwrap();

        glyph.reset(&mut scene).unwrap();
        assert!(!glyph.is_drawn());
        assert!(glyph.registry().is_empty());
        assert!(glyph.children().is_empty());
        assert_eq!(glyph.dispatch_entries().count(), 0);
        let remaining = scene.layer_children(layer).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(scene.node_name(remaining[0]), Some("bodyGroup"));

        glyph.reset(&mut scene).unwrap();
        assert_eq!(scene.layer_children(layer).unwrap(), remaining);

        // A reset glyph draws again
        glyph.draw(&mut scene, &layout()).unwrap();
        assert_eq!(glyph.children().len(), 2);
    }

    #[test]
    fn test_reset_child_reports_desync_after_teardown() {
        let (mut scene, layer) = scene();
        let parent = GlyphNode::builder(Rc::new(Nested))
            .layer(layer)
            .build(&mut scene)
            .unwrap();
        let mut child = GlyphNode::builder(Rc::new(Ellipse))
            .layer(layer)
            .child_of(&parent)
            .build(&mut scene)
            .unwrap();
        child.draw(&mut scene, &layout()).unwrap();
        let main = child.main_path(&scene).unwrap();
        let drawing_box = child.get_path(&scene, DRAWING_BOX).unwrap();
        scene.remove(main);

        let err = child.reset(&mut scene).unwrap_err();
        assert!(matches!(err, GlyphError::PathNotFound { .. }));
        assert!(!child.is_drawn());
        assert!(child.registry().is_empty());
        assert!(scene.node(drawing_box).is_none());
        assert!(child.group(&scene).is_some());
    }

    #[test]
    fn test_scale_rejects_growth() {
        let (mut scene, layer) = scene();
        let glyph = ellipse(&mut scene, layer);

        assert_eq!(
            glyph.scale(&mut scene, 1.5, 0.5),
            Err(GlyphError::InvalidScale {
                factor_x: 1.5,
                factor_y: 0.5
            })
        );
        assert!(glyph.scale(&mut scene, 0.5, 1.01).is_err());
        assert!(glyph.scale(&mut scene, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_scale_rejects_negative_and_non_finite_factors() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        glyph.draw(&mut scene, &layout()).unwrap();
        let before = scene.layer_bounds(layer).unwrap();

        for (factor_x, factor_y) in [(f32::NAN, 0.5), (-0.5, 0.5), (0.5, f32::NEG_INFINITY)] {
            assert!(matches!(
                glyph.scale(&mut scene, factor_x, factor_y),
                Err(GlyphError::InvalidScale { .. })
            ));
        }
        assert_eq!(scene.layer_bounds(layer).unwrap(), before);
    }

    #[test]
    fn test_scale_zero_matches_minimum_factor() {
        let build = || {
            let (mut scene, layer) = scene();
            let mut glyph = ellipse(&mut scene, layer);
            glyph.draw(&mut scene, &layout()).unwrap();
            (scene, glyph)
        };
        let (mut zero_scene, zero) = build();
        let (mut min_scene, min) = build();

        zero.scale(&mut zero_scene, 0.0, 0.5).unwrap();
        min.scale(&mut min_scene, 0.05, 0.5).unwrap();

        let zero_bounds = zero_scene.layer_bounds(zero.layer().unwrap()).unwrap().unwrap();
        let min_bounds = min_scene.layer_bounds(min.layer().unwrap()).unwrap().unwrap();
        assert_approx_eq!(f32, zero_bounds.width(), min_bounds.width());
        assert_approx_eq!(f32, zero_bounds.height(), min_bounds.height());
        assert_approx_eq!(f32, zero_bounds.width(), 80.0 * 0.05, epsilon = 0.01);
    }

    #[test]
    fn test_scale_unbound_glyph_fails() {
        let (mut scene, _) = scene();
        let glyph = GlyphNode::builder(Rc::new(Ellipse)).build(&mut scene).unwrap();
        assert!(matches!(
            glyph.scale(&mut scene, 0.5, 0.5),
            Err(GlyphError::LayerUnbound { .. })
        ));
    }

    #[test]
    fn test_clone_path_resamples_into_new_node() {
        let (mut scene, layer) = scene();
        let mut glyph = ellipse(&mut scene, layer);
        glyph.draw(&mut scene, &layout()).unwrap();
        let main = glyph.main_path(&scene).unwrap();
        let original = scene.path_geometry(main).unwrap().clone();

        let clone = glyph.clone_path(&mut scene, "ellipse", 17).unwrap();
        assert_ne!(clone, main);
        assert_eq!(scene.path_geometry(clone).unwrap().len(), 17);
        assert_eq!(scene.path_geometry(main), Some(&original));
        assert!(!glyph.registry().entries().any(|(_, node)| node == Some(clone)));

        let default = glyph.clone_path(&mut scene, "ellipse", DEFAULT_CLONE_POINTS).unwrap();
        assert_eq!(scene.path_geometry(default).unwrap().len(), 300);
    }

    #[test]
    fn test_named_paths_include_children() {
        let (mut scene, layer) = scene();
        let mut glyph = GlyphNode::builder(Rc::new(Nested))
            .layer(layer)
            .build(&mut scene)
            .unwrap();
        glyph.draw(&mut scene, &layout()).unwrap();

        let own = glyph.named_paths(&scene, false).unwrap();
        assert_eq!(own.keys().collect::<Vec<_>>(), vec!["body"]);

        let all = glyph.named_paths(&scene, true).unwrap();
        assert!(all.contains_key("nucleus-ellipse"));
        assert!(all.contains_key("marker-polygon"));
        let nucleus = glyph.get_child("nucleus").unwrap();
        assert_eq!(all["nucleus-ellipse"], nucleus.main_path(&scene).unwrap());
    }
}
