//! Bookmark domain model.
//!
//! # Responsibility
//! - Define the group/item records owned by the store.
//! - Pin down item identity semantics used by move and remove operations.
//!
//! # Invariants
//! - Item equality is decided solely by the referenced asset; notes and
//!   stored identifiers never participate.
//! - An item with no live handle is inert: it stays in its group but cannot
//!   match any resolvable asset.

use crate::model::asset::{AssetGuid, AssetHandle};
use std::hash::{Hash, Hasher};

/// One bookmark: a referenced asset plus a free-text note.
#[derive(Debug, Clone)]
pub struct Item {
    /// Live handle to the referenced asset. `None` marks the item inert
    /// until its identifier resolves again.
    pub handle: Option<AssetHandle>,
    /// Last known stable identifier. Kept while unresolvable so the bookmark
    /// recovers when the asset reappears.
    pub guid: AssetGuid,
    /// Free-text annotation.
    pub note: String,
}

impl Item {
    /// Creates an item for a live asset with no note yet.
    ///
    /// The stored identifier starts unknown and is filled in when the owning
    /// store persists.
    pub fn new(handle: AssetHandle) -> Self {
        Self {
            handle: Some(handle),
            guid: AssetGuid::empty(),
            note: String::new(),
        }
    }

    /// Creates an inert item from persisted remains: no live handle, just
    /// the last known identifier and the note.
    pub fn inert(guid: AssetGuid, note: impl Into<String>) -> Self {
        Self {
            handle: None,
            guid,
            note: note.into(),
        }
    }

    /// Identity key used for equality, hashing and move deduplication.
    ///
    /// All inert items share the `None` key and therefore compare equal to
    /// each other.
    pub fn identity(&self) -> Option<AssetHandle> {
        self.handle
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// Named, ordered collection of bookmark items.
#[derive(Debug, Clone)]
pub struct Group {
    /// User-facing label.
    pub name: String,
    /// Free-text annotation.
    pub note: String,
    /// Items in display order.
    pub items: Vec<Item>,
}

impl Group {
    /// Creates an empty group with no note.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_note(name, "")
    }

    /// Creates an empty group with a note.
    pub fn with_note(name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            note: note.into(),
            items: Vec::new(),
        }
    }
}
