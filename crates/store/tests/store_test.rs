use canteen_store::mock::MemoryStore;
use canteen_store::{FileStore, SnapshotStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn test_file_store_roundtrip() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("snapshot.json"));

    assert_eq!(store.get("canteen.selected_table").unwrap(), None);

    store.set("canteen.selected_table", "{\"id\":5}").unwrap();
    assert_eq!(
        store.get("canteen.selected_table").unwrap().as_deref(),
        Some("{\"id\":5}")
    );

    store.remove("canteen.selected_table").unwrap();
    assert_eq!(store.get("canteen.selected_table").unwrap(), None);
}

#[test]
fn test_missing_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let store = FileStore::open(dir.path().join("never-written.json"));

    assert_eq!(store.get("anything").unwrap(), None);
}

#[test]
fn test_corrupt_file_reads_as_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = FileStore::open(&path);
    assert_eq!(store.get("anything").unwrap(), None);
}

#[test]
fn test_corrupt_file_is_overwritten_on_next_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let mut store = FileStore::open(&path);
    store.set("key", "value").unwrap();

    assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
}

#[test]
fn test_last_write_wins_across_handles() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let mut first = FileStore::open(&path);
    let mut second = FileStore::open(&path);

    first.set("key", "from-first").unwrap();
    second.set("key", "from-second").unwrap();

    // Both handles observe whichever write landed last
    assert_eq!(first.get("key").unwrap().as_deref(), Some("from-second"));
}

#[test]
fn test_set_creates_parent_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("snapshot.json");

    let mut store = FileStore::open(&path);
    store.set("key", "value").unwrap();

    assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
}

#[test]
fn test_memory_store_roundtrip() {
    let mut store = MemoryStore::new();

    store.set("key", "value").unwrap();
    assert!(store.contains("key"));
    assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));

    store.remove("key").unwrap();
    assert!(!store.contains("key"));
    assert_eq!(store.get("key").unwrap(), None);
}

#[test]
fn test_memory_store_seeding() {
    let store = MemoryStore::with_entry("key", "value");

    assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
}
