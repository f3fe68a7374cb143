//! Drawable-surface contract.
//!
//! A surface exposes named *layers*, each holding an ordered tree of drawable
//! nodes (paths and groups). Every node has a stable [`NodeId`] and a mutable
//! display name. Exactly one layer is *active* at a time, and node creation
//! always targets the active layer.
//!
//! Glyphs never hold on to a surface: every operation that reads or mutates
//! drawables receives it explicitly as `&mut dyn Surface` (or `&dyn Surface`).
//! [`Scene`] is the in-memory implementation used by the renderer and tests.
//!
//! # Example
//!
//! ```
//! use glyphwork_core::{
//!     geometry::{Bounds, Point, Size},
//!     path::PathGeometry,
//!     style::PathStyle,
//!     surface::{PathSpec, Scene, Surface},
//! };
//!
//! let mut scene = Scene::new(Bounds::from_ltwh(0.0, 0.0, 400.0, 300.0));
//! let layer = scene.add_layer("glyph-0");
//! scene.activate_layer(layer).unwrap();
//!
//! let geometry = PathGeometry::rectangle(Point::new(50.0, 50.0), Size::new(20.0, 20.0));
//! let node = scene.create_path(PathSpec::new(geometry, PathStyle::default())).unwrap();
//! scene.set_node_name(node, "body").unwrap();
//!
//! assert_eq!(scene.layer_children(layer).unwrap(), vec![node]);
//! assert_eq!(scene.node_name(node), Some("body"));
//! ```

mod scene;

pub use scene::{NodeKind, Scene, SceneNode};

use std::fmt;

use thiserror::Error;

use crate::{geometry::Bounds, path::PathGeometry, style::PathStyle};

/// Identifier of a layer on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(usize);

impl LayerId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a drawable node. Identities are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything needed to create a path node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSpec {
    geometry: PathGeometry,
    style: PathStyle,
}

impl PathSpec {
    pub fn new(geometry: PathGeometry, style: PathStyle) -> Self {
        Self { geometry, style }
    }

    pub fn geometry(&self) -> &PathGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    pub fn into_parts(self) -> (PathGeometry, PathStyle) {
        (self.geometry, self.style)
    }
}

/// Failures reported by a surface implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("layer {0} does not exist on this surface")]
    UnknownLayer(LayerId),

    #[error("node {0} does not exist on this surface")]
    UnknownNode(NodeId),

    #[error("no layer is active")]
    NoActiveLayer,

    #[error("node {node} cannot be moved into {target}")]
    InvalidMove { node: NodeId, target: NodeId },
}

/// Capabilities a rendering surface offers to glyphs.
///
/// Child lists are returned in z-order, bottom first. Lookups by identity
/// (`node_name`, `path_geometry`) answer `None` for removed nodes.
pub trait Surface {
    /// Device-pixel rectangle of the surface element.
    fn surface_rect(&self) -> Bounds;

    /// Every layer, in z-order.
    fn layer_ids(&self) -> Vec<LayerId>;

    fn layer_name(&self, layer: LayerId) -> Option<&str>;

    fn active_layer(&self) -> Option<LayerId>;

    /// Makes `layer` the target of subsequent node creation.
    fn activate_layer(&mut self, layer: LayerId) -> Result<(), SurfaceError>;

    /// Creates a path at the top of the active layer.
    fn create_path(&mut self, spec: PathSpec) -> Result<NodeId, SurfaceError>;

    /// Creates a group at the top of the active layer and moves `children` into it, in order.
    fn create_group(&mut self, children: &[NodeId]) -> Result<NodeId, SurfaceError>;

    /// Removes a node and its descendants. Returns `false` if the node was unknown.
    fn remove(&mut self, node: NodeId) -> bool;

    /// Puts `replacement` at the position of `node` and removes `node`.
    fn replace_with(&mut self, node: NodeId, replacement: NodeId) -> Result<(), SurfaceError>;

    fn node_name(&self, node: NodeId) -> Option<&str>;

    fn set_node_name(&mut self, node: NodeId, name: &str) -> Result<(), SurfaceError>;

    /// Direct children of a layer.
    fn layer_children(&self, layer: LayerId) -> Result<Vec<NodeId>, SurfaceError>;

    /// Direct children of a group node; empty for paths.
    fn node_children(&self, node: NodeId) -> Result<Vec<NodeId>, SurfaceError>;

    /// Whether `node` lives anywhere inside `layer`, at any depth.
    fn contains_in_layer(&self, layer: LayerId, node: NodeId) -> bool;

    fn path_geometry(&self, node: NodeId) -> Option<&PathGeometry>;

    /// Removes every node of a layer.
    fn clear_layer(&mut self, layer: LayerId) -> Result<(), SurfaceError>;

    /// Scales every path of a layer about the center of the layer's content bounds.
    fn scale_layer(&mut self, layer: LayerId, factor_x: f32, factor_y: f32)
    -> Result<(), SurfaceError>;
}
