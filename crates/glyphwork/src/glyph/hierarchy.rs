//! Parent/child structure of glyph trees.
//!
//! A parent owns its children. Registering a child mirrors the child's path
//! identities into the parent's registry under `"{child}-{path}"` and records
//! one dispatch entry per drawable element of the child's kind, so element
//! drawing is reachable through the parent.

use std::rc::Rc;

use log::{debug, warn};
use thiserror::Error;

use glyphwork_core::surface::Surface;

use super::{
    GlyphNode,
    element::dispatch_name,
    node::ParentLink,
};
use crate::error::GlyphError;

/// A child refused by [`GlyphNode::register_child`], handed back with the reason.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RejectedChild {
    error: GlyphError,
    child: Box<GlyphNode>,
}

impl RejectedChild {
    pub fn error(&self) -> &GlyphError {
        &self.error
    }

    pub fn into_child(self) -> GlyphNode {
        *self.child
    }
}

impl From<RejectedChild> for GlyphError {
    fn from(rejected: RejectedChild) -> Self {
        rejected.error
    }
}

impl GlyphNode {
    /// Attaches `child` as the last child of this glyph.
    ///
    /// A child without an id gets its position among the siblings. The
    /// child should be drawn first; otherwise there are no paths to mirror.
    /// A child bound to another layer is returned untouched inside the error.
    pub fn register_child(&mut self, mut child: GlyphNode) -> Result<(), RejectedChild> {
        if child.layer != self.layer {
            let error = GlyphError::LayerMismatch {
                child: child.name.clone(),
                child_layer: child.layer,
                parent: self.name.clone(),
                parent_layer: self.layer,
            };
            return Err(RejectedChild {
                error,
                child: Box::new(child),
            });
        }
        if child.id.is_none() {
            child.id = Some(self.children.len().to_string());
        }
        child.parent = Some(ParentLink::of(self));

        for element in child.kind.elements().iter().filter(|e| !e.is_scale()) {
            self.dispatch.insert(
                (child.name.clone(), element.name.to_string()),
                dispatch_name(&child.name, element.name),
            );
        }

        if child.drawn {
            for (path, node) in child.registry.entries() {
                self.registry
                    .insert_mirror(format!("{}-{}", child.name, path), node);
            }
        } else {
            warn!(glyph:% = self.name, child:% = child.name; "Registered child has not been drawn");
        }

        debug!(glyph:% = self.name, child:% = child.name, id:? = child.id; "Registered child");
        self.children.push(child);
        Ok(())
    }

    pub fn children(&self) -> &[GlyphNode] {
        &self.children
    }

    pub fn get_child(&self, name: &str) -> Result<&GlyphNode, GlyphError> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .ok_or_else(|| self.child_not_found(name))
    }

    pub fn get_child_mut(&mut self, name: &str) -> Result<&mut GlyphNode, GlyphError> {
        let error = self.child_not_found(name);
        self.children
            .iter_mut()
            .find(|child| child.name == name)
            .ok_or(error)
    }

    /// Detaches the child called `name` and returns it.
    ///
    /// Its dispatch entries and mirrored path keys are dropped from this
    /// glyph; its drawables stay on the surface. The returned glyph has no parent.
    pub fn delete_child(&mut self, name: &str) -> Result<GlyphNode, GlyphError> {
        let index = self
            .children
            .iter()
            .position(|child| child.name == name)
            .ok_or_else(|| self.child_not_found(name))?;
        let mut child = self.children.remove(index);

        self.dispatch.retain(|(child_name, _), _| child_name != name);
        for (path, _) in child.registry.entries() {
            self.registry.remove(&format!("{name}-{path}"));
        }
        child.parent = None;

        debug!(glyph:% = self.name, child = name; "Deleted child");
        Ok(child)
    }

    /// Resets and detaches every child, removing their groups from the surface.
    ///
    /// Runs over all children even when one is out of sync with the surface;
    /// the first error is returned afterwards.
    pub fn remove_children(&mut self, surface: &mut dyn Surface) -> Result<(), GlyphError> {
        let mut first_error = None;
        for mut child in std::mem::take(&mut self.children) {
            for path in child.registry.names() {
                self.registry.remove(&format!("{}-{path}", child.name));
            }
            if let Err(err) = child.reset(surface) {
                warn!(glyph:% = self.name, child:% = child.name; "Child out of sync during removal: {err}");
                first_error.get_or_insert(err);
            }
            if let Some(group) = child.find_in_layer(surface, &child.group_name()) {
                surface.remove(group);
            }
            debug!(glyph:% = self.name, child:% = child.name; "Removed child");
        }
        self.dispatch.clear();

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Draws `element` of child `child` through the dispatch table.
    pub fn draw_child_element(
        &mut self,
        surface: &mut dyn Surface,
        child: &str,
        element: &str,
    ) -> Result<(), GlyphError> {
        if !self
            .dispatch
            .contains_key(&(child.to_string(), element.to_string()))
        {
            return Err(GlyphError::UnknownElement {
                glyph: self.name.clone(),
                element: dispatch_name(child, element),
            });
        }
        let target = self.get_child_mut(child)?;
        let kind = Rc::clone(&target.kind);
        kind.draw_element(target, element, surface)
    }

    /// `(child, element, label)` for every dispatch entry, in registration order.
    pub fn dispatch_entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.dispatch
            .iter()
            .map(|((child, element), label)| (child.as_str(), element.as_str(), label.as_str()))
    }

    /// Pre-order traversal of this glyph and all its descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    fn child_not_found(&self, child: &str) -> GlyphError {
        GlyphError::ChildNotFound {
            glyph: self.name.clone(),
            child: child.to_string(),
        }
    }
}

/// Pre-order iterator over a glyph tree, created by [`GlyphNode::iter`].
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a GlyphNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a GlyphNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a GlyphNode {
    type Item = &'a GlyphNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
