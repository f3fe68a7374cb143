//! In-memory [`Surface`] implementation.

use std::collections::HashMap;

use log::trace;

use super::{LayerId, NodeId, PathSpec, Surface, SurfaceError};
use crate::{
    geometry::{Bounds, Point},
    path::PathGeometry,
    style::PathStyle,
};

/// Payload of a scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Path {
        geometry: PathGeometry,
        style: PathStyle,
    },
    Group,
}

/// Where a node is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Layer(LayerId),
    Node(NodeId),
}

/// A drawable node stored in a [`Scene`].
#[derive(Debug, Clone)]
pub struct SceneNode {
    id: NodeId,
    name: Option<String>,
    kind: NodeKind,
    children: Vec<NodeId>,
    owner: Owner,
}

impl SceneNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Direct children in z-order; always empty for paths.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone)]
struct LayerEntry {
    name: String,
    children: Vec<NodeId>,
}

/// Arena-backed scene graph with ordered layers.
///
/// The first layer added becomes the active one, matching how a freshly
/// created canvas project behaves.
#[derive(Debug, Clone)]
pub struct Scene {
    rect: Bounds,
    layers: Vec<LayerEntry>,
    nodes: HashMap<NodeId, SceneNode>,
    next_id: u64,
    active: Option<LayerId>,
}

impl Scene {
    /// Creates an empty scene whose element occupies `rect` in device pixels.
    pub fn new(rect: Bounds) -> Self {
        Self {
            rect,
            layers: Vec::new(),
            nodes: HashMap::new(),
            next_id: 1,
            active: None,
        }
    }

    /// Appends a new layer on top of the existing ones.
    pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
        let layer = LayerId::new(self.layers.len());
        self.layers.push(LayerEntry {
            name: name.into(),
            children: Vec::new(),
        });
        if self.active.is_none() {
            self.active = Some(layer);
        }
        trace!(layer:% = layer; "Added layer");
        layer
    }

    /// Resizes the surface element; later box computations observe the new rectangle.
    pub fn set_surface_rect(&mut self, rect: Bounds) {
        self.rect = rect;
    }

    pub fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&node)
    }

    /// Number of live nodes across all layers
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn layer_entry(&self, layer: LayerId) -> Result<&LayerEntry, SurfaceError> {
        self.layers
            .get(layer.index())
            .ok_or(SurfaceError::UnknownLayer(layer))
    }

    fn active_or_err(&self) -> Result<LayerId, SurfaceError> {
        self.active.ok_or(SurfaceError::NoActiveLayer)
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn siblings_mut(&mut self, owner: Owner) -> Option<&mut Vec<NodeId>> {
        match owner {
            Owner::Layer(layer) => self
                .layers
                .get_mut(layer.index())
                .map(|entry| &mut entry.children),
            Owner::Node(parent) => self.nodes.get_mut(&parent).map(|node| &mut node.children),
        }
    }

    /// Unlinks `node` from its owner's child list, returning the owner and former index.
    fn detach(&mut self, node: NodeId) -> Option<(Owner, usize)> {
        let owner = self.nodes.get(&node)?.owner;
        let siblings = self.siblings_mut(owner)?;
        let index = siblings.iter().position(|&id| id == node)?;
        siblings.remove(index);
        Some((owner, index))
    }

    /// Drops `node` and its whole subtree from the arena; assumes it is already detached.
    fn drop_subtree(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                pending.extend(removed.children);
            }
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(&node).map(|n| n.owner);
        while let Some(Owner::Node(parent)) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(&parent).map(|n| n.owner);
        }
        false
    }

    fn collect_paths(&self, roots: &[NodeId], out: &mut Vec<NodeId>) {
        for id in roots {
            if let Some(node) = self.nodes.get(id) {
                match node.kind {
                    NodeKind::Path { .. } => out.push(*id),
                    NodeKind::Group => self.collect_paths(&node.children, out),
                }
            }
        }
    }

    /// Bounds of every path inside a layer, at any depth.
    pub fn layer_bounds(&self, layer: LayerId) -> Result<Option<Bounds>, SurfaceError> {
        let entry = self.layer_entry(layer)?;
        let mut paths = Vec::new();
        self.collect_paths(&entry.children, &mut paths);
        Ok(paths
            .iter()
            .filter_map(|id| match &self.nodes.get(id)?.kind {
                NodeKind::Path { geometry, .. } => geometry.bounds(),
                NodeKind::Group => None,
            })
            .reduce(|acc, bounds| acc.merge(&bounds)))
    }
}

impl Surface for Scene {
    fn surface_rect(&self) -> Bounds {
        self.rect
    }

    fn layer_ids(&self) -> Vec<LayerId> {
        (0..self.layers.len()).map(LayerId::new).collect()
    }

    fn layer_name(&self, layer: LayerId) -> Option<&str> {
        self.layers
            .get(layer.index())
            .map(|entry| entry.name.as_str())
    }

    fn active_layer(&self) -> Option<LayerId> {
        self.active
    }

    fn activate_layer(&mut self, layer: LayerId) -> Result<(), SurfaceError> {
        self.layer_entry(layer)?;
        self.active = Some(layer);
        Ok(())
    }

    fn create_path(&mut self, spec: PathSpec) -> Result<NodeId, SurfaceError> {
        let layer = self.active_or_err()?;
        let id = self.allocate_id();
        let (geometry, style) = spec.into_parts();
        self.nodes.insert(
            id,
            SceneNode {
                id,
                name: None,
                kind: NodeKind::Path { geometry, style },
                children: Vec::new(),
                owner: Owner::Layer(layer),
            },
        );
        self.layers[layer.index()].children.push(id);
        trace!(node:% = id, layer:% = layer; "Created path");
        Ok(id)
    }

    fn create_group(&mut self, children: &[NodeId]) -> Result<NodeId, SurfaceError> {
        let layer = self.active_or_err()?;
        if let Some(missing) = children.iter().find(|id| !self.nodes.contains_key(id)) {
            return Err(SurfaceError::UnknownNode(*missing));
        }

        let id = self.allocate_id();
        self.nodes.insert(
            id,
            SceneNode {
                id,
                name: None,
                kind: NodeKind::Group,
                children: Vec::new(),
                owner: Owner::Layer(layer),
            },
        );
        self.layers[layer.index()].children.push(id);

        for child in children {
            if self.detach(*child).is_none() {
                continue;
            }
            if let Some(node) = self.nodes.get_mut(child) {
                node.owner = Owner::Node(id);
            }
            if let Some(group) = self.nodes.get_mut(&id) {
                group.children.push(*child);
            }
        }
        trace!(node:% = id, layer:% = layer, children = children.len(); "Created group");
        Ok(id)
    }

    fn remove(&mut self, node: NodeId) -> bool {
        if !self.nodes.contains_key(&node) {
            return false;
        }
        self.detach(node);
        self.drop_subtree(node);
        trace!(node:% = node; "Removed node");
        true
    }

    fn replace_with(&mut self, node: NodeId, replacement: NodeId) -> Result<(), SurfaceError> {
        if !self.nodes.contains_key(&node) {
            return Err(SurfaceError::UnknownNode(node));
        }
        if !self.nodes.contains_key(&replacement) {
            return Err(SurfaceError::UnknownNode(replacement));
        }
        if node == replacement {
            return Ok(());
        }
        if self.is_ancestor(replacement, node) {
            return Err(SurfaceError::InvalidMove {
                node: replacement,
                target: node,
            });
        }

        self.detach(replacement);
        let (owner, index) = self.detach(node).ok_or(SurfaceError::UnknownNode(node))?;
        let siblings = self
            .siblings_mut(owner)
            .ok_or(SurfaceError::UnknownNode(node))?;
        siblings.insert(index, replacement);
        if let Some(moved) = self.nodes.get_mut(&replacement) {
            moved.owner = owner;
        }
        self.drop_subtree(node);
        trace!(node:% = node, replacement:% = replacement; "Replaced node");
        Ok(())
    }

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| n.name.as_deref())
    }

    fn set_node_name(&mut self, node: NodeId, name: &str) -> Result<(), SurfaceError> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(SurfaceError::UnknownNode(node))?;
        entry.name = Some(name.to_string());
        Ok(())
    }

    fn layer_children(&self, layer: LayerId) -> Result<Vec<NodeId>, SurfaceError> {
        Ok(self.layer_entry(layer)?.children.clone())
    }

    fn node_children(&self, node: NodeId) -> Result<Vec<NodeId>, SurfaceError> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .ok_or(SurfaceError::UnknownNode(node))
    }

    fn contains_in_layer(&self, layer: LayerId, node: NodeId) -> bool {
        let mut current = self.nodes.get(&node).map(|n| n.owner);
        loop {
            match current {
                Some(Owner::Layer(owner)) => return owner == layer,
                Some(Owner::Node(parent)) => current = self.nodes.get(&parent).map(|n| n.owner),
                None => return false,
            }
        }
    }

    fn path_geometry(&self, node: NodeId) -> Option<&PathGeometry> {
        match &self.nodes.get(&node)?.kind {
            NodeKind::Path { geometry, .. } => Some(geometry),
            NodeKind::Group => None,
        }
    }

    fn clear_layer(&mut self, layer: LayerId) -> Result<(), SurfaceError> {
        self.layer_entry(layer)?;
        let children = std::mem::take(&mut self.layers[layer.index()].children);
        for child in children {
            self.drop_subtree(child);
        }
        trace!(layer:% = layer; "Cleared layer");
        Ok(())
    }

    fn scale_layer(
        &mut self,
        layer: LayerId,
        factor_x: f32,
        factor_y: f32,
    ) -> Result<(), SurfaceError> {
        let Some(bounds) = self.layer_bounds(layer)? else {
            return Ok(());
        };
        let origin: Point = bounds.center();

        let mut paths = Vec::new();
        self.collect_paths(&self.layers[layer.index()].children, &mut paths);
        for id in paths {
            if let Some(SceneNode {
                kind: NodeKind::Path { geometry, .. },
                ..
            }) = self.nodes.get_mut(&id)
            {
                geometry.scale_about(origin, factor_x, factor_y);
            }
        }
        Ok(())
    }
}
