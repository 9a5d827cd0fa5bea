//! In-memory asset catalog.
//!
//! # Responsibility
//! - Provide a self-contained [`AssetResolver`] for hosts without a native
//!   asset database, and for tests and tooling.
//! - Issue stable identifiers and session handles on registration.
//!
//! # Invariants
//! - Identifiers and handles survive path moves; only removal retires them.
//! - Registration is idempotent per path.
//! - Child listing is deterministic: files first, then folders, path order.

use crate::model::asset::{AssetGuid, AssetHandle, AssetPath};
use crate::resolve::{AssetResolver, FolderListing};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct CatalogEntry {
    handle: AssetHandle,
    guid: AssetGuid,
    is_folder: bool,
}

/// In-memory asset database keyed by project-relative path.
#[derive(Debug, Default)]
pub struct AssetCatalog {
    next_handle: u64,
    entries: BTreeMap<AssetPath, CatalogEntry>,
    paths_by_handle: HashMap<AssetHandle, AssetPath>,
    paths_by_guid: HashMap<AssetGuid, AssetPath>,
}

impl AssetCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file asset and returns its live handle.
    ///
    /// Registering an already known path returns the existing handle.
    pub fn register_asset(&mut self, path: impl Into<String>) -> AssetHandle {
        self.register(path, false)
    }

    /// Registers a folder asset and returns its live handle.
    pub fn register_folder(&mut self, path: impl Into<String>) -> AssetHandle {
        self.register(path, true)
    }

    /// Removes the asset at `path`. Its handle and identifier become stale
    /// and can never resolve again. Returns whether anything was removed.
    pub fn remove_asset(&mut self, path: &AssetPath) -> bool {
        let Some(entry) = self.entries.remove(path) else {
            return false;
        };
        self.paths_by_handle.remove(&entry.handle);
        self.paths_by_guid.remove(&entry.guid);
        true
    }

    /// Relocates the asset at `from` to a new path, keeping its handle and
    /// identifier. Fails when `from` is unknown or the destination is taken.
    pub fn move_asset(&mut self, from: &AssetPath, to: impl Into<String>) -> bool {
        let to = AssetPath::new(to);
        if self.entries.contains_key(&to) {
            return false;
        }
        let Some(entry) = self.entries.remove(from) else {
            return false;
        };
        self.paths_by_handle.insert(entry.handle, to.clone());
        self.paths_by_guid.insert(entry.guid.clone(), to.clone());
        self.entries.insert(to, entry);
        true
    }

    /// Returns the stable identifier issued for `path`.
    pub fn guid_of(&self, path: &AssetPath) -> Option<AssetGuid> {
        self.entries.get(path).map(|entry| entry.guid.clone())
    }

    fn register(&mut self, path: impl Into<String>, is_folder: bool) -> AssetHandle {
        let path = AssetPath::new(path);
        if let Some(entry) = self.entries.get(&path) {
            return entry.handle;
        }

        self.next_handle += 1;
        let handle = AssetHandle::new(self.next_handle);
        let guid = AssetGuid::new(Uuid::new_v4().simple().to_string());
        self.paths_by_handle.insert(handle, path.clone());
        self.paths_by_guid.insert(guid.clone(), path.clone());
        self.entries.insert(
            path,
            CatalogEntry {
                handle,
                guid,
                is_folder,
            },
        );
        handle
    }
}

impl AssetResolver for AssetCatalog {
    fn guid_and_local_id(&self, handle: AssetHandle) -> Option<(AssetGuid, i64)> {
        // Entries are whole assets, so the local file id is always zero.
        let path = self.paths_by_handle.get(&handle)?;
        let entry = self.entries.get(path)?;
        Some((entry.guid.clone(), 0))
    }

    fn asset_path(&self, guid: &AssetGuid) -> Option<AssetPath> {
        if guid.is_empty() {
            return None;
        }
        self.paths_by_guid.get(guid).cloned()
    }

    fn path_of(&self, handle: AssetHandle) -> Option<AssetPath> {
        self.paths_by_handle.get(&handle).cloned()
    }

    fn load_asset(&self, path: &AssetPath) -> Option<AssetHandle> {
        self.entries.get(path).map(|entry| entry.handle)
    }

    fn is_folder(&self, path: &AssetPath) -> bool {
        self.entries
            .get(path)
            .map_or(false, |entry| entry.is_folder)
    }
}

impl FolderListing for AssetCatalog {
    fn children(&self, path: &AssetPath) -> Vec<AssetPath> {
        if !self.is_folder(path) {
            return Vec::new();
        }

        let prefix = format!("{}/", path.as_str());
        let mut files = Vec::new();
        let mut folders = Vec::new();
        // BTreeMap iteration keeps each block in path order.
        for (candidate, entry) in &self.entries {
            let rest = match candidate.as_str().strip_prefix(prefix.as_str()) {
                Some(rest) if !rest.is_empty() => rest,
                _ => continue,
            };
            if rest.contains('/') {
                continue;
            }
            if entry.is_folder {
                folders.push(candidate.clone());
            } else {
                files.push(candidate.clone());
            }
        }
        files.append(&mut folders);
        files
    }
}
