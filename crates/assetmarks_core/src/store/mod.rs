//! Bookmark store and its JSON persistence boundary.
//!
//! # Responsibility
//! - Own the ordered group/item collection and its mutation surface.
//! - Load and save the persisted document at explicit call sites.
//! - Implement the cross-group move sequence used by drag-and-drop.
//!
//! # Invariants
//! - Loading never fails: a missing or corrupt document falls back to one
//!   default group, persisted immediately.
//! - After any move, at most one item per asset identity exists store-wide.
//! - Mutations never reorder surviving items.

use crate::model::asset::AssetHandle;
use crate::model::bookmark::{Group, Item};
use crate::resolve::AssetResolver;
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub mod persisted;

pub use persisted::{PersistedGroup, PersistedItem, PersistedStore};

/// Well-known document file name inside the host project's local data
/// directory.
pub const DATA_FILE_NAME: &str = "assetmarks.json";

const DEFAULT_GROUP_NAME: &str = "Default";
const DEFAULT_GROUP_NOTE: &str = "The Default Group";

/// Result type used by store persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from reading or writing the persisted document.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem read/write failure.
    Io(io::Error),
    /// Document content does not parse as the persisted schema.
    Parse(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "bookmark document io error: {err}"),
            Self::Parse(err) => write!(f, "bookmark document is not valid: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Insertion position for a cross-group move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIndex {
    /// Insert before the item currently at this index, clamped to the
    /// target group's size.
    At(usize),
    /// Append after the last item.
    End,
}

/// Ordered collection of bookmark groups bound to one persisted document.
#[derive(Debug)]
pub struct BookmarkStore {
    groups: Vec<Group>,
    path: PathBuf,
}

impl BookmarkStore {
    /// Loads the well-known document under `dir`, bootstrapping a default
    /// store when it is missing or unreadable.
    pub fn open(dir: &Path, resolver: &impl AssetResolver) -> Self {
        Self::load_from(dir.join(DATA_FILE_NAME), resolver)
    }

    /// Loads an explicit document path.
    ///
    /// A missing document bootstraps silently; an unreadable or unparsable
    /// one is logged. Either way the store starts from one default group and
    /// persists immediately so the next load sees a valid document.
    pub fn load_from(path: impl Into<PathBuf>, resolver: &impl AssetResolver) -> Self {
        let path = path.into();
        match persisted::load_document(&path) {
            Ok(document) => {
                let groups = persisted::from_persisted(document, resolver);
                info!(
                    "event=store_load module=store status=ok path={} groups={}",
                    path.display(),
                    groups.len()
                );
                Self { groups, path }
            }
            Err(err) => {
                if is_missing_file(&err) {
                    info!(
                        "event=store_load module=store status=bootstrap path={}",
                        path.display()
                    );
                } else {
                    warn!(
                        "event=store_load module=store status=fallback path={} error={}",
                        path.display(),
                        err
                    );
                }
                let mut store = Self {
                    groups: vec![default_group()],
                    path,
                };
                store.save(resolver);
                store
            }
        }
    }

    /// Refreshes stored identifiers from live handles and writes the
    /// document.
    ///
    /// Write failures are logged and swallowed; in-memory state stays
    /// authoritative either way.
    pub fn save(&mut self, resolver: &impl AssetResolver) {
        persisted::refresh_guids(&mut self.groups, resolver);
        let document = persisted::to_persisted(&self.groups);
        match persisted::write_document(&self.path, &document) {
            Ok(()) => info!(
                "event=store_save module=store status=ok path={} groups={}",
                self.path.display(),
                self.groups.len()
            ),
            Err(err) => error!(
                "event=store_save module=store status=error path={} error={}",
                self.path.display(),
                err
            ),
        }
    }

    /// Returns the bound document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all groups in display order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns one group by index.
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// Appends a group.
    pub fn add_group(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Removes the group at `index` with everything in it. Returns whether
    /// the index was valid.
    pub fn remove_group(&mut self, index: usize) -> bool {
        if index >= self.groups.len() {
            return false;
        }
        self.groups.remove(index);
        true
    }

    /// Renames the group at `index` to the trimmed name.
    ///
    /// A name that is blank after trimming is rejected and the group keeps
    /// its current name.
    pub fn rename_group(&mut self, index: usize, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            warn!("event=group_rename module=store status=blank index={index}");
            return false;
        }
        match self.groups.get_mut(index) {
            Some(group) => {
                group.name = trimmed.to_string();
                true
            }
            None => false,
        }
    }

    /// Replaces the note of the group at `index`.
    pub fn set_group_note(&mut self, index: usize, note: impl Into<String>) -> bool {
        match self.groups.get_mut(index) {
            Some(group) => {
                group.note = note.into();
                true
            }
            None => false,
        }
    }

    /// Replaces the note of one item.
    pub fn set_item_note(&mut self, group: usize, item: usize, note: impl Into<String>) -> bool {
        match self.item_mut(group, item) {
            Some(item) => {
                item.note = note.into();
                true
            }
            None => false,
        }
    }

    /// Retargets one item to another asset, or to none.
    ///
    /// The stored identifier is left alone until the next save, so clearing
    /// the handle keeps the previous asset recoverable.
    pub fn set_item_asset(
        &mut self,
        group: usize,
        item: usize,
        handle: Option<AssetHandle>,
    ) -> bool {
        match self.item_mut(group, item) {
            Some(item) => {
                item.handle = handle;
                true
            }
            None => false,
        }
    }

    /// Removes every item matching `item` by asset identity from all
    /// groups. Returns the number of removed entries.
    pub fn remove_item(&mut self, item: &Item) -> usize {
        let mut removed = 0;
        for group in &mut self.groups {
            let before = group.items.len();
            group.items.retain(|existing| existing != item);
            removed += before - group.items.len();
        }
        removed
    }

    /// Moves `dragged` into the group at `target`, inserting at `at`.
    ///
    /// The full move sequence: duplicates within `dragged` collapse to the
    /// first occurrence, every identity match is stripped from all groups,
    /// the insertion index is clamped to the target group's new size, and
    /// the survivors are inserted keeping their relative order. An absent or
    /// out-of-range `target` falls back to the first group. Returns whether
    /// the store changed.
    pub fn move_items(&mut self, dragged: Vec<Item>, target: Option<usize>, at: DropIndex) -> bool {
        let mut dragged = dragged;
        let mut seen = HashSet::new();
        dragged.retain(|item| seen.insert(item.identity()));
        if dragged.is_empty() {
            return false;
        }

        let Some(target) = self.resolve_target_group(target) else {
            warn!("event=item_move module=store status=no_group");
            return false;
        };

        for group in &mut self.groups {
            group.items.retain(|existing| !dragged.contains(existing));
        }

        let items = &mut self.groups[target].items;
        match at {
            DropIndex::At(index) => {
                // Removal above may have shrunk the target, so clamp after it.
                let at = index.min(items.len());
                for (offset, item) in dragged.into_iter().enumerate() {
                    items.insert(at + offset, item);
                }
            }
            DropIndex::End => items.extend(dragged),
        }
        true
    }

    fn resolve_target_group(&self, target: Option<usize>) -> Option<usize> {
        if self.groups.is_empty() {
            return None;
        }
        match target {
            Some(index) if index < self.groups.len() => Some(index),
            _ => Some(0),
        }
    }

    fn item_mut(&mut self, group: usize, item: usize) -> Option<&mut Item> {
        self.groups.get_mut(group)?.items.get_mut(item)
    }
}

fn default_group() -> Group {
    Group::with_note(DEFAULT_GROUP_NAME, DEFAULT_GROUP_NOTE)
}

fn is_missing_file(err: &StoreError) -> bool {
    matches!(err, StoreError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound)
}
