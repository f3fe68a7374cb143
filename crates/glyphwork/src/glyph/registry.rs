//! Per-glyph bookkeeping of named drawable paths.
//!
//! The registry only remembers identities. Resolving an identity against the
//! surface (and failing loudly when the two disagree) is done by the owning
//! [`GlyphNode`](super::GlyphNode), which knows its layer and group.

use indexmap::{IndexMap, IndexSet};

use glyphwork_core::surface::NodeId;

/// Mapping from path name to node identity, plus the names this glyph has drawn.
///
/// An entry holding `None` is a path that was registered and then deleted.
/// Mirrored child entries (`"{child}-{path}"`) live in the same map but are
/// never part of the drawn set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathRegistry {
    entries: IndexMap<String, Option<NodeId>>,
    drawn: IndexSet<String>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a path drawn by this glyph.
    pub fn insert(&mut self, name: &str, node: NodeId) {
        self.entries.insert(name.to_string(), Some(node));
        self.drawn.insert(name.to_string());
    }

    /// Records an identity owned by someone else, without marking it drawn.
    pub fn insert_mirror(&mut self, key: String, node: Option<NodeId>) {
        self.entries.insert(key, node);
    }

    /// Live identity tracked under `name`.
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.entries.get(name).copied().flatten()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Clears the identity of `name`, keeping the entry. Returns the previous identity.
    pub fn null_out(&mut self, name: &str) -> Option<NodeId> {
        self.entries.get_mut(name).and_then(Option::take)
    }

    /// Drops the entry of `name` entirely.
    pub fn remove(&mut self, name: &str) -> Option<NodeId> {
        self.drawn.shift_remove(name);
        self.entries.shift_remove(name).flatten()
    }

    pub fn is_drawn(&self, name: &str) -> bool {
        self.drawn.contains(name)
    }

    pub fn drawn(&self) -> impl Iterator<Item = &str> {
        self.drawn.iter().map(String::as_str)
    }

    /// Every entry in registration order, deleted ones included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<NodeId>)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), *node))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.drawn.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.drawn.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_marks_drawn() {
        let mut registry = PathRegistry::new();
        registry.insert("main", NodeId::new(4));

        assert_eq!(registry.get("main"), Some(NodeId::new(4)));
        assert!(registry.is_drawn("main"));
        assert_eq!(registry.drawn().collect::<Vec<_>>(), vec!["main"]);
    }

    #[test]
    fn test_mirror_is_not_drawn() {
        let mut registry = PathRegistry::new();
        registry.insert_mirror("nucleus-main".to_string(), Some(NodeId::new(9)));

        assert_eq!(registry.get("nucleus-main"), Some(NodeId::new(9)));
        assert!(!registry.is_drawn("nucleus-main"));
    }

    #[test]
    fn test_null_out_keeps_entry() {
        let mut registry = PathRegistry::new();
        registry.insert("outline", NodeId::new(2));

        assert_eq!(registry.null_out("outline"), Some(NodeId::new(2)));
        assert_eq!(registry.null_out("outline"), None);
        assert!(registry.contains("outline"));
        assert_eq!(registry.get("outline"), None);
        assert_eq!(registry.null_out("never"), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = PathRegistry::new();
        registry.insert("a", NodeId::new(1));
        registry.insert("b", NodeId::new(2));

        assert_eq!(registry.remove("a"), Some(NodeId::new(1)));
        assert_eq!(registry.names(), vec!["b".to_string()]);
        assert!(!registry.is_drawn("a"));

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
