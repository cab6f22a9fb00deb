use std::cell::Cell;
use std::rc::Rc;

use cellbook_store::{sidebar_tree, CellStore, NodeKind, NodeUpdate, StoreError};

#[test]
fn crud_rename_move_delete_workflow() {
    let mut store = CellStore::new();

    store.create(NodeKind::Folder, "/foo", None).unwrap();
    store.create(NodeKind::Folder, "/foo/bar", None).unwrap();
    store
        .create(NodeKind::Cell, "/foo/bar/baz.md", Some("# Hello"))
        .unwrap();

    let cell = store.read("/foo/bar/baz.md").unwrap();
    assert_eq!(cell.name, "baz.md");
    assert_eq!(cell.content.as_deref(), Some("# Hello"));

    store
        .update("/foo/bar/baz.md", NodeUpdate::content("Updated"))
        .unwrap();
    assert_eq!(
        store.read("/foo/bar/baz.md").unwrap().content.as_deref(),
        Some("Updated")
    );

    store
        .update("/foo/bar/baz.md", NodeUpdate::rename("qux.md"))
        .unwrap();
    let renamed = store.read("/foo/bar/qux.md").unwrap();
    assert_eq!(renamed.content.as_deref(), Some("Updated"));
    assert!(matches!(
        store.read("/foo/bar/baz.md"),
        Err(StoreError::NotFound(_))
    ));

    // moving to an absent /target auto-creates the folder
    store.move_node("/foo/bar/qux.md", "/target/qux.md").unwrap();
    assert_eq!(
        store.read("/target/qux.md").unwrap().content.as_deref(),
        Some("Updated")
    );
    assert_eq!(store.read("/target").unwrap().kind, NodeKind::Folder);
    assert!(matches!(
        store.read("/foo/bar/qux.md"),
        Err(StoreError::NotFound(_))
    ));

    store.delete("/target/qux.md").unwrap();
    assert!(matches!(
        store.read("/target/qux.md"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn move_equals_create_at_dest_plus_delete_at_src() {
    let mut moved = CellStore::new();
    moved
        .create(NodeKind::Cell, "/a/doc.md", Some("body"))
        .unwrap();
    moved.move_node("/a/doc.md", "/b/doc.md").unwrap();

    let mut rebuilt = CellStore::new();
    rebuilt.create(NodeKind::Folder, "/a", None).unwrap();
    rebuilt
        .create(NodeKind::Cell, "/b/doc.md", Some("body"))
        .unwrap();

    assert_eq!(
        moved.read("/b/doc.md").unwrap(),
        rebuilt.read("/b/doc.md").unwrap()
    );
    assert!(matches!(
        moved.read("/a/doc.md"),
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn sidebar_tree_includes_created_cells() {
    let mut store = CellStore::new();
    store.create(NodeKind::Cell, "/tree_test.md", None).unwrap();

    let entries = sidebar_tree(&store);
    assert!(entries.iter().any(|entry| entry.name == "tree_test.md"));
}

#[test]
fn every_successful_mutation_notifies_exactly_once() {
    let mut store = CellStore::new();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    let token = store.subscribe(move || seen.set(seen.get() + 1));

    store.create(NodeKind::Folder, "/foo", None).unwrap();
    assert_eq!(calls.get(), 1);
    store
        .create(NodeKind::Cell, "/foo/a.md", Some("x"))
        .unwrap();
    assert_eq!(calls.get(), 2);
    store.update("/foo/a.md", NodeUpdate::content("y")).unwrap();
    assert_eq!(calls.get(), 3);
    store.move_node("/foo/a.md", "/foo/b.md").unwrap();
    assert_eq!(calls.get(), 4);
    store.delete("/foo/b.md").unwrap();
    assert_eq!(calls.get(), 5);

    // failed operations stay silent
    assert!(store.create(NodeKind::Folder, "/foo", None).is_err());
    assert!(store.delete("/missing").is_err());
    assert_eq!(calls.get(), 5);

    store.unsubscribe(token);
    store.create(NodeKind::Cell, "/late.md", None).unwrap();
    assert_eq!(calls.get(), 5);
}

#[test]
fn notification_arrives_before_the_mutating_call_returns() {
    let mut store = CellStore::new();
    let notified = Rc::new(Cell::new(false));
    let seen = Rc::clone(&notified);
    store.subscribe(move || seen.set(true));

    store.create(NodeKind::Cell, "/sync.md", None).unwrap();
    assert!(notified.get());
}

#[test]
fn kind_tag_boundary_rejects_unknown_kinds() {
    let mut store = CellStore::new();
    let kind: Result<NodeKind, StoreError> = "widget".parse();
    assert_eq!(kind.unwrap_err(), StoreError::InvalidKind("widget".to_string()));

    // the accepted tags drive create as usual
    let folder: NodeKind = "folder".parse().unwrap();
    store.create(folder, "/from_tag", None).unwrap();
    assert_eq!(store.read("/from_tag").unwrap().kind, NodeKind::Folder);
}

#[test]
fn reset_between_scenarios_keeps_subscribers() {
    let mut store = CellStore::new();
    let calls = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&calls);
    store.subscribe(move || seen.set(seen.get() + 1));

    store.create(NodeKind::Cell, "/scenario1.md", None).unwrap();
    store.reset();
    assert!(sidebar_tree(&store).is_empty());

    store.create(NodeKind::Cell, "/scenario2.md", None).unwrap();
    // create + reset + create
    assert_eq!(calls.get(), 3);
}
