//! Drag-and-drop orchestration over the outline.
//!
//! # Responsibility
//! - Gate which selections may start a drag.
//! - Resolve drop anchors to target groups.
//! - Run the store move sequence and persist the result.
//!
//! # Invariants
//! - No drag starts while a filter is active or a synthetic row is selected.
//! - Dragged items keep row order; duplicates collapse to the first
//!   occurrence.
//! - A drop that cannot name a group lands in the first group.

use crate::model::asset::AssetHandle;
use crate::model::bookmark::Item;
use crate::outline::rows::{Outline, Row, RowId, RowKind};
use crate::resolve::AssetResolver;
use crate::store::{BookmarkStore, DropIndex};
use std::collections::HashSet;

/// Where a drop landed, before group resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAnchor {
    /// On or between rows; the nearest group header at or above this row
    /// receives the drop.
    Row(RowId),
    /// Below every row.
    Outside,
}

impl Outline {
    /// Returns whether `selection` may start a drag.
    ///
    /// Drags are refused while a filter is active, and when the selection
    /// contains any synthetic folder child.
    pub fn can_start_drag(&self, selection: &[RowId]) -> bool {
        if self.is_filtered() {
            return false;
        }
        !selection.iter().any(|id| {
            matches!(
                self.row(*id).map(|row| &row.kind),
                Some(RowKind::FolderAsset { .. }) | None
            )
        })
    }

    /// Expands `selection` into the concrete items it stands for, in row
    /// order.
    ///
    /// A selected group contributes all of its items. Duplicate identities
    /// collapse to the first occurrence.
    pub fn dragged_items(&self, store: &BookmarkStore, selection: &[RowId]) -> Vec<Item> {
        let selected: HashSet<RowId> = selection.iter().copied().collect();
        let mut dragged = Vec::new();
        for row in self.rows() {
            if !selected.contains(&row.id) {
                continue;
            }
            match row.kind {
                RowKind::Group { group } => {
                    if let Some(group) = store.group(group) {
                        dragged.extend(group.items.iter().cloned());
                    }
                }
                RowKind::Item { group, item } => {
                    if let Some(item) = store.group(group).and_then(|g| g.items.get(item)) {
                        dragged.push(item.clone());
                    }
                }
                RowKind::FolderAsset { .. } => {}
            }
        }

        let mut seen = HashSet::new();
        dragged.retain(|item| seen.insert(item.identity()));
        dragged
    }

    /// Resolves a drop anchor to a group index.
    ///
    /// Walks from the anchored row up through its ancestors to the nearest
    /// group header. `Outside` and anchors that resolve to nothing fall back
    /// to the first group. Returns `None` only when the outline has no group
    /// rows at all.
    pub fn drop_group(&self, anchor: DropAnchor) -> Option<usize> {
        if let DropAnchor::Row(start) = anchor {
            let mut cursor = Some(start);
            while let Some(id) = cursor {
                match self.row(id) {
                    Some(Row {
                        kind: RowKind::Group { group },
                        ..
                    }) => return Some(*group),
                    Some(row) => cursor = row.parent,
                    None => break,
                }
            }
        }
        self.first_group()
    }
}

/// Executes an internal drag of `selection` onto `anchor`.
///
/// Expands the selection to items, moves them through the store's move
/// sequence and persists on change. Returns whether the store changed.
pub fn perform_drop(
    store: &mut BookmarkStore,
    resolver: &impl AssetResolver,
    outline: &Outline,
    selection: &[RowId],
    anchor: DropAnchor,
    at: DropIndex,
) -> bool {
    if !outline.can_start_drag(selection) {
        return false;
    }
    let dragged = outline.dragged_items(store, selection);
    if dragged.is_empty() {
        return false;
    }
    finish_drop(store, resolver, outline, dragged, anchor, at)
}

/// Executes a drop of asset handles arriving from outside the outline, such
/// as a project-browser drag.
///
/// Each handle becomes a transient item, so identity matches already in the
/// store are stripped before insertion exactly like an internal move.
/// Refused while a filter is active. Returns whether the store changed.
pub fn perform_external_drop(
    store: &mut BookmarkStore,
    resolver: &impl AssetResolver,
    outline: &Outline,
    handles: &[AssetHandle],
    anchor: DropAnchor,
    at: DropIndex,
) -> bool {
    if outline.is_filtered() {
        return false;
    }
    let dragged: Vec<Item> = handles.iter().copied().map(Item::new).collect();
    if dragged.is_empty() {
        return false;
    }
    finish_drop(store, resolver, outline, dragged, anchor, at)
}

fn finish_drop(
    store: &mut BookmarkStore,
    resolver: &impl AssetResolver,
    outline: &Outline,
    dragged: Vec<Item>,
    anchor: DropAnchor,
    at: DropIndex,
) -> bool {
    let target = outline.drop_group(anchor);
    let changed = store.move_items(dragged, target, at);
    if changed {
        store.save(resolver);
    }
    changed
}
