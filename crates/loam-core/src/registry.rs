//! Identifier registry
//!
//! Two independent key spaces, one for document names and one for raw block
//! tokens. An identifier, once handed out, is returned for the same key for
//! the rest of the run.

use std::collections::HashMap;
use uuid::Uuid;

/// Which key space a lookup goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// Normalized document name
    Document,
    /// Raw `((token))` text
    Block,
}

/// Stable identifiers for documents and blocks
#[derive(Debug, Default)]
pub struct IdRegistry {
    documents: HashMap<String, Uuid>,
    blocks: HashMap<String, Uuid>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn space(&self, kind: IdKind) -> &HashMap<String, Uuid> {
        match kind {
            IdKind::Document => &self.documents,
            IdKind::Block => &self.blocks,
        }
    }

    /// Identifier for `key`, minting a fresh random one on first sight
    pub fn get_or_create(&mut self, key: &str, kind: IdKind) -> Uuid {
        let space = match kind {
            IdKind::Document => &mut self.documents,
            IdKind::Block => &mut self.blocks,
        };

        if let Some(id) = space.get(key) {
            return *id;
        }

        let id = Uuid::new_v4();
        space.insert(key.to_string(), id);
        tracing::trace!(key, ?kind, %id, "assigned identifier");
        id
    }

    /// Identifier for `key` if one was already assigned
    pub fn get(&self, key: &str, kind: IdKind) -> Option<Uuid> {
        self.space(kind).get(key).copied()
    }

    pub fn contains(&self, key: &str, kind: IdKind) -> bool {
        self.space(kind).contains_key(key)
    }

    /// Number of identifiers assigned in one key space
    pub fn len(&self, kind: IdKind) -> usize {
        self.space(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.blocks.is_empty()
    }
}
