//! Persisted document schema and load/save conversions.
//!
//! # Responsibility
//! - Mirror the on-disk JSON document shape exactly.
//! - Convert between persisted records and live items at the save/load
//!   boundary.
//!
//! # Invariants
//! - No live handle is ever serialized; only stable identifiers go to disk.
//! - Per-item resolution failures degrade that item only, never the load.
//! - Written documents are pretty-printed UTF-8 without a BOM; a leading BOM
//!   is tolerated on read.

use crate::model::asset::{AssetGuid, AssetHandle};
use crate::model::bookmark::{Group, Item};
use crate::resolve::AssetResolver;
use crate::store::StoreResult;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Top-level persisted document: `{ "groups": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedStore {
    /// Bookmark groups in display order.
    #[serde(default)]
    pub groups: Vec<PersistedGroup>,
}

/// One persisted bookmark group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedGroup {
    /// User-facing label.
    #[serde(default)]
    pub name: String,
    /// Free-text annotation.
    #[serde(default)]
    pub note: String,
    /// Items in display order.
    #[serde(default)]
    pub items: Vec<PersistedItem>,
}

/// One persisted bookmark item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedItem {
    /// Free-text annotation.
    #[serde(default)]
    pub note: String,
    /// Stable asset identifier; empty when it was unknown at save time.
    #[serde(default)]
    pub guid: AssetGuid,
}

/// Reads and parses a persisted document.
pub fn load_document(path: &Path) -> StoreResult<PersistedStore> {
    let bytes = fs::read(path)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    Ok(serde_json::from_slice(content)?)
}

/// Serializes and writes a persisted document, creating parent directories
/// as needed.
pub fn write_document(path: &Path, document: &PersistedStore) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

/// Resolves a persisted document into live groups.
///
/// Items whose identifier cannot be resolved stay in place as inert entries
/// with their identifier and note intact.
pub fn from_persisted(document: PersistedStore, resolver: &impl AssetResolver) -> Vec<Group> {
    document
        .groups
        .into_iter()
        .map(|group| Group {
            name: group.name,
            note: group.note,
            items: group
                .items
                .into_iter()
                .map(|item| resolve_item(item, resolver))
                .collect(),
        })
        .collect()
}

/// Snapshots live groups into the persisted document shape.
pub fn to_persisted(groups: &[Group]) -> PersistedStore {
    PersistedStore {
        groups: groups
            .iter()
            .map(|group| PersistedGroup {
                name: group.name.clone(),
                note: group.note.clone(),
                items: group
                    .items
                    .iter()
                    .map(|item| PersistedItem {
                        note: item.note.clone(),
                        guid: item.guid.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Refreshes each item's stored identifier from its live handle.
///
/// Items with no live handle keep their previous identifier so a deleted
/// asset resolves again once restored. A handle the resolver no longer
/// recognizes clears the identifier.
pub fn refresh_guids(groups: &mut [Group], resolver: &impl AssetResolver) {
    for group in groups {
        for item in &mut group.items {
            let Some(handle) = item.handle else {
                continue;
            };
            match resolver.guid_and_local_id(handle) {
                Some((guid, _local_id)) => item.guid = guid,
                None => {
                    error!(
                        "event=item_guid module=store status=unavailable handle={} note={}",
                        handle, item.note
                    );
                    item.guid = AssetGuid::empty();
                }
            }
        }
    }
}

fn resolve_item(record: PersistedItem, resolver: &impl AssetResolver) -> Item {
    let handle = resolve_handle(&record, resolver);
    Item {
        handle,
        guid: record.guid,
        note: record.note,
    }
}

fn resolve_handle(record: &PersistedItem, resolver: &impl AssetResolver) -> Option<AssetHandle> {
    if record.guid.is_empty() {
        warn!(
            "event=item_resolve module=store status=missing_guid note={}",
            record.note
        );
        return None;
    }
    let Some(path) = resolver.asset_path(&record.guid) else {
        warn!(
            "event=item_resolve module=store status=unresolved guid={} note={}",
            record.guid, record.note
        );
        return None;
    };
    match resolver.load_asset(&path) {
        Some(handle) => Some(handle),
        None => {
            warn!(
                "event=item_resolve module=store status=load_failed path={} note={}",
                path, record.note
            );
            None
        }
    }
}
