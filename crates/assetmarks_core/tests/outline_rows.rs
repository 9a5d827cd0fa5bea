use assetmarks_core::store::persisted::load_document;
use assetmarks_core::{
    perform_drop, perform_external_drop, AssetCatalog, AssetGuid, BookmarkStore, DropAnchor,
    DropIndex, Filter, Group, Item, Outline, RowId, RowKind, DATA_FILE_NAME,
};
use std::path::Path;

fn store_with(dir: &Path, catalog: &AssetCatalog, groups: Vec<Group>) -> BookmarkStore {
    let mut store = BookmarkStore::open(dir, catalog);
    store.remove_group(0);
    for group in groups {
        store.add_group(group);
    }
    store
}

fn group_with(name: &str, items: Vec<Item>) -> Group {
    let mut group = Group::new(name);
    group.items = items;
    group
}

fn find_row(outline: &Outline, label: &str) -> RowId {
    outline
        .rows()
        .iter()
        .find(|row| row.label == label)
        .map(|row| row.id)
        .unwrap_or_else(|| panic!("no row labeled `{label}`"))
}

#[test]
fn unfiltered_outline_nests_items_under_groups() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let grass = catalog.register_asset("Assets/Textures/Grass.png");
    let theme = catalog.register_asset("Assets/Audio/Theme.ogg");

    let mut grass_item = Item::new(grass);
    grass_item.note = "main tile".to_string();
    let store = store_with(
        dir.path(),
        &catalog,
        vec![
            group_with("Textures", vec![grass_item]),
            group_with("Audio", vec![Item::new(theme)]),
        ],
    );

    let outline = Outline::build(&store, &catalog, None);
    assert!(!outline.is_filtered());
    let rows = outline.rows();
    assert_eq!(rows.len(), 4);

    assert!(matches!(rows[0].kind, RowKind::Group { group: 0 }));
    assert_eq!(rows[0].label, "Textures");
    assert_eq!(rows[0].depth, 0);
    assert!(rows[0].parent.is_none());
    assert!(rows[0].draggable);

    assert!(matches!(rows[1].kind, RowKind::Item { group: 0, item: 0 }));
    assert_eq!(rows[1].label, "Grass");
    assert_eq!(rows[1].path_label, "Assets/Textures/Grass.png");
    assert_eq!(rows[1].note, "main tile");
    assert_eq!(rows[1].depth, 1);
    assert_eq!(rows[1].parent, Some(rows[0].id));
    assert!(rows[1].draggable);

    assert!(matches!(rows[2].kind, RowKind::Group { group: 1 }));
    assert!(matches!(rows[3].kind, RowKind::Item { group: 1, item: 0 }));
}

#[test]
fn inert_item_shows_empty_labels() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = AssetCatalog::new();

    let inert = Item::inert(AssetGuid::new("feedfacefeedfacefeedfacefeedface"), "dangling");
    let store = store_with(dir.path(), &catalog, vec![group_with("G", vec![inert])]);

    let outline = Outline::build(&store, &catalog, None);
    let row = &outline.rows()[1];
    assert_eq!(row.label, "");
    assert_eq!(row.path_label, "");
    assert_eq!(row.note, "dangling");
    assert!(row.draggable);
}

#[test]
fn folder_bookmark_expands_recursively() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let props = catalog.register_folder("Assets/Props");
    catalog.register_asset("Assets/Props/Crate.fbx");
    catalog.register_folder("Assets/Props/Barrels");
    catalog.register_asset("Assets/Props/Barrels/Old.fbx");

    let store = store_with(
        dir.path(),
        &catalog,
        vec![group_with("Props", vec![Item::new(props)])],
    );

    let outline = Outline::build(&store, &catalog, None);
    let rows = outline.rows();
    let labels: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["Props", "Props", "Crate", "Barrels", "Old"]);

    // Files come before subfolders at each level.
    assert_eq!(rows[2].depth, 2);
    assert_eq!(rows[3].depth, 2);
    assert_eq!(rows[4].depth, 3);
    assert_eq!(rows[2].parent, Some(rows[1].id));
    assert_eq!(rows[4].parent, Some(rows[3].id));
    assert!(matches!(rows[2].kind, RowKind::FolderAsset { .. }));
    assert!(!rows[2].draggable);
    assert!(!rows[4].draggable);
}

#[test]
fn drag_gating_rejects_synthetic_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let props = catalog.register_folder("Assets/Props");
    catalog.register_asset("Assets/Props/Crate.fbx");

    let store = store_with(
        dir.path(),
        &catalog,
        vec![group_with("Props", vec![Item::new(props)])],
    );
    let outline = Outline::build(&store, &catalog, None);

    let group_row = find_row(&outline, "Props");
    let crate_row = find_row(&outline, "Crate");
    let item_row = outline
        .rows()
        .iter()
        .find(|row| matches!(row.kind, RowKind::Item { .. }))
        .map(|row| row.id)
        .unwrap();

    assert!(outline.can_start_drag(&[group_row]));
    assert!(outline.can_start_drag(&[item_row]));
    assert!(!outline.can_start_drag(&[crate_row]));
    assert!(!outline.can_start_drag(&[item_row, crate_row]));
}

#[test]
fn dragged_items_expand_groups_in_row_order_and_dedup() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let a = catalog.register_asset("Assets/a.png");
    let b = catalog.register_asset("Assets/b.png");

    // The same asset appears in both groups; selecting both rows must yield
    // one copy.
    let store = store_with(
        dir.path(),
        &catalog,
        vec![
            group_with("First", vec![Item::new(a), Item::new(b)]),
            group_with("Second", vec![Item::new(a)]),
        ],
    );
    let outline = Outline::build(&store, &catalog, None);

    let first_group = find_row(&outline, "First");
    let second_item = outline
        .rows()
        .iter()
        .find(|row| matches!(row.kind, RowKind::Item { group: 1, item: 0 }))
        .map(|row| row.id)
        .unwrap();

    let dragged = outline.dragged_items(&store, &[second_item, first_group]);
    let dragged_handles: Vec<_> = dragged.iter().map(|item| item.handle).collect();
    assert_eq!(dragged_handles, vec![Some(a), Some(b)]);
}

#[test]
fn drop_group_walks_ancestors_to_group_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let props = catalog.register_folder("Assets/Props");
    catalog.register_folder("Assets/Props/Barrels");
    catalog.register_asset("Assets/Props/Barrels/Old.fbx");

    let store = store_with(
        dir.path(),
        &catalog,
        vec![
            group_with("Empty", vec![]),
            group_with("Props", vec![Item::new(props)]),
        ],
    );
    let outline = Outline::build(&store, &catalog, None);

    let deep_row = find_row(&outline, "Old");
    assert_eq!(outline.drop_group(DropAnchor::Row(deep_row)), Some(1));

    let group_row = find_row(&outline, "Props");
    assert_eq!(outline.drop_group(DropAnchor::Row(group_row)), Some(1));

    assert_eq!(outline.drop_group(DropAnchor::Outside), Some(0));
    assert_eq!(outline.drop_group(DropAnchor::Row(RowId(999))), Some(0));
}

#[test]
fn drop_group_is_none_without_any_group() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = AssetCatalog::new();
    let store = store_with(dir.path(), &catalog, vec![]);
    let outline = Outline::build(&store, &catalog, None);
    assert_eq!(outline.drop_group(DropAnchor::Outside), None);
}

#[test]
fn only_group_rows_can_be_renamed() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let props = catalog.register_folder("Assets/Props");
    catalog.register_asset("Assets/Props/Crate.fbx");

    let store = store_with(
        dir.path(),
        &catalog,
        vec![group_with("Props", vec![Item::new(props)])],
    );
    let outline = Outline::build(&store, &catalog, None);

    assert!(outline.can_rename(find_row(&outline, "Props")));
    assert!(!outline.can_rename(find_row(&outline, "Crate")));
    let item_row = outline
        .rows()
        .iter()
        .find(|row| matches!(row.kind, RowKind::Item { .. }))
        .map(|row| row.id)
        .unwrap();
    assert!(!outline.can_rename(item_row));
}

#[test]
fn perform_drop_moves_selection_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let a = catalog.register_asset("Assets/a.png");
    let b = catalog.register_asset("Assets/b.png");

    let mut store = store_with(
        dir.path(),
        &catalog,
        vec![
            group_with("A", vec![Item::new(a), Item::new(b)]),
            group_with("B", vec![]),
        ],
    );
    store.save(&catalog);
    let outline = Outline::build(&store, &catalog, None);

    let selection = [find_row(&outline, "a")];
    let anchor = DropAnchor::Row(find_row(&outline, "B"));
    assert!(perform_drop(
        &mut store,
        &catalog,
        &outline,
        &selection,
        anchor,
        DropIndex::End
    ));

    assert_eq!(store.groups()[0].items.len(), 1);
    assert_eq!(store.groups()[1].items[0].handle, Some(a));

    let document = load_document(&dir.path().join(DATA_FILE_NAME)).unwrap();
    assert_eq!(document.groups[0].items.len(), 1);
    assert_eq!(document.groups[1].items.len(), 1);
}

#[test]
fn perform_drop_refused_while_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let a = catalog.register_asset("Assets/a.png");

    let mut store = store_with(
        dir.path(),
        &catalog,
        vec![group_with("A", vec![Item::new(a)]), group_with("B", vec![])],
    );
    let filter = Filter::compile("a").unwrap().unwrap();
    let outline = Outline::build(&store, &catalog, Some(&filter));
    let selection: Vec<RowId> = outline.rows().iter().map(|row| row.id).collect();

    assert!(!perform_drop(
        &mut store,
        &catalog,
        &outline,
        &selection,
        DropAnchor::Outside,
        DropIndex::End
    ));
    assert_eq!(store.groups()[0].items.len(), 1);
}

#[test]
fn external_drop_inserts_transient_items_and_strips_copies() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let a = catalog.register_asset("Assets/a.png");
    let b = catalog.register_asset("Assets/b.png");
    let c = catalog.register_asset("Assets/c.png");

    let mut store = store_with(
        dir.path(),
        &catalog,
        vec![group_with("A", vec![Item::new(a), Item::new(b)])],
    );
    store.save(&catalog);
    let outline = Outline::build(&store, &catalog, None);

    let anchor = DropAnchor::Row(find_row(&outline, "A"));
    assert!(perform_external_drop(
        &mut store,
        &catalog,
        &outline,
        &[c, a],
        anchor,
        DropIndex::At(0)
    ));

    let handles: Vec<_> = store.groups()[0]
        .items
        .iter()
        .map(|item| item.handle)
        .collect();
    assert_eq!(handles, vec![Some(c), Some(a), Some(b)]);

    // The drop persisted, so every stored item now carries its identifier.
    let document = load_document(&dir.path().join(DATA_FILE_NAME)).unwrap();
    assert_eq!(document.groups[0].items.len(), 3);
    assert!(document.groups[0]
        .items
        .iter()
        .all(|item| !item.guid.is_empty()));
}

#[test]
fn external_drop_refused_while_filtered_or_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = AssetCatalog::new();
    let a = catalog.register_asset("Assets/a.png");
    let b = catalog.register_asset("Assets/b.png");

    let mut store = store_with(
        dir.path(),
        &catalog,
        vec![group_with("A", vec![Item::new(a)])],
    );

    let filter = Filter::compile("a").unwrap().unwrap();
    let filtered = Outline::build(&store, &catalog, Some(&filter));
    assert!(!perform_external_drop(
        &mut store,
        &catalog,
        &filtered,
        &[b],
        DropAnchor::Outside,
        DropIndex::End
    ));

    let outline = Outline::build(&store, &catalog, None);
    assert!(!perform_external_drop(
        &mut store,
        &catalog,
        &outline,
        &[],
        DropAnchor::Outside,
        DropIndex::End
    ));
    assert_eq!(store.groups()[0].items.len(), 1);
}
