//! Row projection of the bookmark collection.
//!
//! # Responsibility
//! - Flatten groups, items and expanded folder contents into display rows.
//! - Pin down which rows are real bookmarks and which are synthetic folder
//!   children.
//!
//! # Invariants
//! - Row ids are dense and only valid for the outline that produced them.
//! - Unfiltered outlines are hierarchical; filtered outlines are flat.
//! - Synthetic folder children are never draggable.

use crate::model::asset::{AssetHandle, AssetPath};
use crate::model::bookmark::{Group, Item};
use crate::resolve::{AssetResolver, FolderListing};
use crate::search::Filter;
use crate::store::BookmarkStore;
use std::fmt::{Display, Formatter};

/// Identifier of one row within one built outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(pub u32);

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// A bookmark group header.
    Group { group: usize },
    /// A bookmark item inside a group.
    Item { group: usize, item: usize },
    /// A synthetic row for an asset inside an expanded folder bookmark.
    FolderAsset { handle: AssetHandle },
}

/// One display row.
#[derive(Debug, Clone)]
pub struct Row {
    /// Outline-local identifier.
    pub id: RowId,
    /// Parent row for hierarchical outlines; `None` at top level.
    pub parent: Option<RowId>,
    /// Indentation level; 0 at top level.
    pub depth: u16,
    /// Primary display text.
    pub label: String,
    /// Full asset path for asset-backed rows, empty otherwise.
    pub path_label: String,
    /// Free-text annotation carried from the underlying record.
    pub note: String,
    /// What this row stands for.
    pub kind: RowKind,
    /// Whether this row may start a drag.
    pub draggable: bool,
}

/// Flattened view over a store, rebuilt whenever content or filter change.
#[derive(Debug)]
pub struct Outline {
    rows: Vec<Row>,
    filtered: bool,
}

impl Outline {
    /// Builds the row list for `store`.
    ///
    /// Without a filter the outline is hierarchical and folder bookmarks
    /// expand recursively into synthetic child rows. With a filter, only
    /// matching rows appear, flattened to one level and not draggable.
    pub fn build<C>(store: &BookmarkStore, catalog: &C, filter: Option<&Filter>) -> Self
    where
        C: AssetResolver + FolderListing,
    {
        let mut rows = Vec::new();
        match filter {
            None => build_tree(&mut rows, store, catalog),
            Some(filter) => build_filtered(&mut rows, store, catalog, filter),
        }
        Self {
            rows,
            filtered: filter.is_some(),
        }
    }

    /// Returns all rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns one row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.0 as usize)
    }

    /// Returns whether this outline was built with an active filter.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Returns whether the row may be renamed. Only group headers can.
    pub fn can_rename(&self, id: RowId) -> bool {
        matches!(
            self.row(id).map(|row| &row.kind),
            Some(RowKind::Group { .. })
        )
    }

    pub(crate) fn first_group(&self) -> Option<usize> {
        self.rows.iter().find_map(|row| match row.kind {
            RowKind::Group { group } => Some(group),
            _ => None,
        })
    }
}

fn build_tree<C>(rows: &mut Vec<Row>, store: &BookmarkStore, catalog: &C)
where
    C: AssetResolver + FolderListing,
{
    for (group_index, group) in store.groups().iter().enumerate() {
        let group_row = push_group_row(rows, group_index, group, true);
        for (item_index, item) in group.items.iter().enumerate() {
            let path = resolved_path(item, catalog);
            let (label, path_label) = item_labels(path.as_ref());
            let id = next_id(rows);
            rows.push(Row {
                id,
                parent: Some(group_row),
                depth: 1,
                label,
                path_label,
                note: item.note.clone(),
                kind: RowKind::Item {
                    group: group_index,
                    item: item_index,
                },
                draggable: true,
            });
            if let Some(path) = path {
                if catalog.is_folder(&path) {
                    expand_folder(rows, catalog, id, 2, &path);
                }
            }
        }
    }
}

fn expand_folder<C>(rows: &mut Vec<Row>, catalog: &C, parent: RowId, depth: u16, path: &AssetPath)
where
    C: AssetResolver + FolderListing,
{
    for child in catalog.children(path) {
        let Some(handle) = catalog.load_asset(&child) else {
            continue;
        };
        let id = next_id(rows);
        rows.push(Row {
            id,
            parent: Some(parent),
            depth,
            label: child.name().to_string(),
            path_label: child.as_str().to_string(),
            note: String::new(),
            kind: RowKind::FolderAsset { handle },
            draggable: false,
        });
        if catalog.is_folder(&child) {
            expand_folder(rows, catalog, id, depth + 1, &child);
        }
    }
}

fn build_filtered<C>(rows: &mut Vec<Row>, store: &BookmarkStore, catalog: &C, filter: &Filter)
where
    C: AssetResolver + FolderListing,
{
    for (group_index, group) in store.groups().iter().enumerate() {
        if filter.matches_group(group) {
            push_group_row(rows, group_index, group, false);
        }
        for (item_index, item) in group.items.iter().enumerate() {
            let path = resolved_path(item, catalog);
            if filter.matches_item(item, catalog) {
                let (label, path_label) = item_labels(path.as_ref());
                let id = next_id(rows);
                rows.push(Row {
                    id,
                    parent: None,
                    depth: 0,
                    label,
                    path_label,
                    note: item.note.clone(),
                    kind: RowKind::Item {
                        group: group_index,
                        item: item_index,
                    },
                    draggable: false,
                });
            }
            if let Some(path) = path {
                if catalog.is_folder(&path) {
                    collect_matching_children(rows, catalog, filter, &path);
                }
            }
        }
    }
}

fn collect_matching_children<C>(rows: &mut Vec<Row>, catalog: &C, filter: &Filter, path: &AssetPath)
where
    C: AssetResolver + FolderListing,
{
    for child in catalog.children(path) {
        let Some(handle) = catalog.load_asset(&child) else {
            continue;
        };
        if filter.matches_name(child.name()) || filter.matches_name(child.as_str()) {
            let id = next_id(rows);
            rows.push(Row {
                id,
                parent: None,
                depth: 0,
                label: child.name().to_string(),
                path_label: child.as_str().to_string(),
                note: String::new(),
                kind: RowKind::FolderAsset { handle },
                draggable: false,
            });
        }
        if catalog.is_folder(&child) {
            collect_matching_children(rows, catalog, filter, &child);
        }
    }
}

fn push_group_row(rows: &mut Vec<Row>, group_index: usize, group: &Group, draggable: bool) -> RowId {
    let id = next_id(rows);
    rows.push(Row {
        id,
        parent: None,
        depth: 0,
        label: group.name.clone(),
        path_label: String::new(),
        note: group.note.clone(),
        kind: RowKind::Group { group: group_index },
        draggable,
    });
    id
}

fn resolved_path(item: &Item, resolver: &impl AssetResolver) -> Option<AssetPath> {
    item.handle.and_then(|handle| resolver.path_of(handle))
}

fn item_labels(path: Option<&AssetPath>) -> (String, String) {
    match path {
        Some(path) => (path.name().to_string(), path.as_str().to_string()),
        None => (String::new(), String::new()),
    }
}

fn next_id(rows: &[Row]) -> RowId {
    RowId(rows.len() as u32)
}
