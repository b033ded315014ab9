use std::path::PathBuf;

use unitfile_core::{LineStore, StoreError};

fn store_path(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn fresh_store_over_a_new_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "todo.txt");

    let store = LineStore::open(&path).unwrap();
    assert!(path.exists());
    assert!(store.is_empty());
    assert_eq!(store.lines(), Vec::<String>::new());
}

#[test]
fn added_lines_round_trip_through_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "todo.txt");

    let mut store = LineStore::open(&path).unwrap();
    store.add("buy milk").unwrap();
    store.add("water plants").unwrap();

    let reopened = LineStore::open(&path).unwrap();
    assert_eq!(reopened.lines(), vec!["buy milk", "water plants"]);
    assert_eq!(reopened.size(), 2);
    assert!(!reopened.is_empty());
}

#[test]
fn file_image_is_one_line_per_entry_with_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "todo.txt");

    let mut store = LineStore::open(&path).unwrap();
    store.add("alpha").unwrap();
    store.add("beta").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\nbeta\n");
}

#[test]
fn remove_line_takes_first_match_and_ignores_absent_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LineStore::open(store_path(&dir, "todo.txt")).unwrap();

    store.add("dup").unwrap();
    store.add("keep").unwrap();
    store.add("dup").unwrap();

    store.remove_line("dup").unwrap();
    assert_eq!(store.lines(), vec!["keep", "dup"]);

    store.remove_line("never added").unwrap();
    assert_eq!(store.lines(), vec!["keep", "dup"]);
}

#[test]
fn remove_at_drops_by_position_and_checks_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LineStore::open(store_path(&dir, "todo.txt")).unwrap();

    store.add("a").unwrap();
    store.add("b").unwrap();
    store.remove_at(0).unwrap();
    assert_eq!(store.lines(), vec!["b"]);

    let err = store.remove_at(5).unwrap_err();
    assert!(matches!(
        err,
        StoreError::IndexOutOfBounds { index: 5, len: 1 }
    ));
    assert_eq!(store.lines(), vec!["b"]);
}

#[test]
fn clear_truncates_the_backing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "todo.txt");
    let mut store = LineStore::open(&path).unwrap();

    store.add("a").unwrap();
    store.clear().unwrap();

    assert!(store.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn lines_returns_a_detached_copy() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LineStore::open(store_path(&dir, "todo.txt")).unwrap();
    store.add("a").unwrap();

    let mut copy = store.lines();
    copy.push("b".to_string());
    assert_eq!(store.lines(), vec!["a"]);
}
