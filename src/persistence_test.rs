use super::*;
use crate::slot::SlotPatch;

// =============================================================
// Helpers
// =============================================================

/// Backend whose every call fails, for exercising error paths.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Err(io::Error::other("disk on fire").into())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Err(io::Error::other("disk on fire").into())
    }

    fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Err(io::Error::other("disk on fire").into())
    }
}

fn stamped_memory() -> LayoutPersistence<MemoryStore> {
    let mut p = LayoutPersistence::new(MemoryStore::new());
    assert!(p.stamp_version());
    p
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_set_get_remove() {
    let mut m = MemoryStore::new();
    assert!(m.is_empty());
    m.set("k", "v").unwrap();
    assert_eq!(m.get("k").unwrap().as_deref(), Some("v"));
    assert_eq!(m.len(), 1);
    m.remove("k").unwrap();
    assert_eq!(m.get("k").unwrap(), None);
    m.remove("k").unwrap();
}

// =============================================================
// FileStore
// =============================================================

#[test]
fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = FileStore::new(dir.path());
    f.set("badge_layout_data_v1", "[1,2]").unwrap();
    assert_eq!(f.get("badge_layout_data_v1").unwrap().as_deref(), Some("[1,2]"));
    f.set("badge_layout_data_v1", "[3]").unwrap();
    assert_eq!(f.get("badge_layout_data_v1").unwrap().as_deref(), Some("[3]"));
}

#[test]
fn file_store_missing_key_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let f = FileStore::new(dir.path().join("never-created"));
    assert_eq!(f.get("anything").unwrap(), None);
}

#[test]
fn file_store_creates_directory_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut f = FileStore::new(&nested);
    f.set("key", "value").unwrap();
    assert!(nested.join("key").is_file());
    assert_eq!(f.dir(), nested.as_path());
}

#[test]
fn file_store_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = FileStore::new(dir.path());
    f.set("key", "value").unwrap();
    assert!(!dir.path().join("key.tmp").exists());
}

#[test]
fn file_store_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = FileStore::new(dir.path());
    f.set("key", "value").unwrap();
    f.remove("key").unwrap();
    assert_eq!(f.get("key").unwrap(), None);
    f.remove("key").unwrap();
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut f = FileStore::new(dir.path());
    for key in ["", "../escape", "a/b", ".hidden", "sp ace"] {
        assert!(matches!(f.set(key, "x"), Err(PersistenceError::InvalidKey(_))), "{key:?}");
        assert!(matches!(f.get(key), Err(PersistenceError::InvalidKey(_))), "{key:?}");
    }
}

// =============================================================
// save / load / clear
// =============================================================

#[test]
fn save_then_load_returns_same_slots() {
    let mut p = LayoutPersistence::new(MemoryStore::new());
    let mut editor = EditorStore::new();
    let id = editor.slots()[0].id;
    editor.update_slot(id, &SlotPatch::content("Ana"));

    assert!(p.save(editor.slots()));
    let loaded = p.load().unwrap();
    assert_eq!(loaded, editor.slots());
}

#[test]
fn saved_json_uses_renderer_keys() {
    let mut p = LayoutPersistence::new(MemoryStore::new());
    p.save(&crate::slot::default_template());
    let raw = p.store().get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["max_w"], 1800);
    assert_eq!(first["max_h"], 400);
    assert_eq!(first["max_font_size"], 120);
    assert_eq!(first["rotation"], 90);
}

#[test]
fn load_missing_is_none() {
    let p = LayoutPersistence::new(MemoryStore::new());
    assert!(p.load().is_none());
}

#[test]
fn load_malformed_is_none() {
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, "{not json").unwrap();
    let p = LayoutPersistence::new(store);
    assert!(p.load().is_none());
}

#[test]
fn clear_keeps_version_tag() {
    let mut p = stamped_memory();
    p.save(&crate::slot::default_template());
    assert!(p.clear());
    assert!(p.load().is_none());
    assert!(p.is_current());
}

#[test]
fn custom_keys_are_used() {
    let mut p = LayoutPersistence::with_keys(MemoryStore::new(), "data", "ver", "9");
    p.stamp_version();
    p.save(&[]);
    let store = p.into_inner();
    assert_eq!(store.get("ver").unwrap().as_deref(), Some("9"));
    assert_eq!(store.get("data").unwrap().as_deref(), Some("[]"));
}

#[test]
fn broken_backend_reports_failure() {
    let mut p = LayoutPersistence::new(BrokenStore);
    assert!(!p.save(&crate::slot::default_template()));
    assert!(p.load().is_none());
    assert!(!p.clear());
    assert!(!p.stamp_version());
    assert!(p.stored_version().is_none());
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_without_version_resets() {
    let mut p = LayoutPersistence::new(MemoryStore::new());
    let mut editor = EditorStore::new();
    editor.add_slot(&SlotPatch::default());

    assert_eq!(p.restore(&mut editor), RestoreOutcome::VersionReset);
    assert_eq!(editor.slots().len(), 4);
    assert!(!editor.can_undo());
    assert_eq!(p.stored_version().as_deref(), Some(LAYOUT_VERSION));
}

#[test]
fn restore_old_version_discards_saved_layout() {
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY_VERSION, "4.2").unwrap();
    store.set(STORAGE_KEY, "[]").unwrap();
    let mut p = LayoutPersistence::new(store);
    let mut editor = EditorStore::new();

    assert_eq!(p.restore(&mut editor), RestoreOutcome::VersionReset);
    assert!(p.load().is_none());
    assert_eq!(editor.slots().len(), 4);
}

#[test]
fn restore_current_version_loads_layout() {
    let mut p = stamped_memory();
    let mut saved = EditorStore::new();
    let id = saved.slots()[1].id;
    saved.update_slot(id, &SlotPatch::position(10, 20));
    p.save(saved.slots());

    let mut editor = EditorStore::new();
    assert_eq!(p.restore(&mut editor), RestoreOutcome::Loaded { slots: 4 });
    assert_eq!(editor.slots(), saved.slots());
    assert!(!editor.can_undo());
}

#[test]
fn restore_current_version_without_data_keeps_editor() {
    let mut p = stamped_memory();
    let mut editor = EditorStore::new();
    let before = editor.slots().to_vec();
    assert_eq!(p.restore(&mut editor), RestoreOutcome::Defaulted);
    assert_eq!(editor.slots(), before.as_slice());
}

#[test]
fn restore_malformed_data_keeps_editor() {
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY_VERSION, LAYOUT_VERSION).unwrap();
    store.set(STORAGE_KEY, "[{\"x\": \"left\"}]").unwrap();
    let mut p = LayoutPersistence::new(store);
    let mut editor = EditorStore::new();
    assert_eq!(p.restore(&mut editor), RestoreOutcome::Defaulted);
    assert_eq!(editor.slots().len(), 4);
}

#[test]
fn restore_counts_slots_after_duplicates_dropped() {
    let mut saved = crate::slot::default_template();
    saved.push(saved[0].clone());
    let mut p = stamped_memory();
    assert!(p.save(&saved));

    let mut editor = EditorStore::new();
    assert_eq!(p.restore(&mut editor), RestoreOutcome::Loaded { slots: 4 });
    assert_eq!(editor.slots().len(), 4);
}

#[test]
fn restore_links_legacy_layout_by_position() {
    let legacy = r#"[
        {"id":"00000000-0000-4000-8000-000000000001","content":"A","x":944,"y":887,"rotation":90,"max_w":1800,"max_h":400,"fontSize":110},
        {"id":"00000000-0000-4000-8000-000000000002","content":"B","x":944,"y":2605,"rotation":90,"max_w":1800,"max_h":400},
        {"id":"00000000-0000-4000-8000-000000000003","content":"A","x":1613,"y":969,"rotation":-90,"max_w":1800,"max_h":400},
        {"id":"00000000-0000-4000-8000-000000000004","content":"B","x":1613,"y":2681,"rotation":-90,"max_w":1800,"max_h":400}
    ]"#;
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY_VERSION, LAYOUT_VERSION).unwrap();
    store.set(STORAGE_KEY, legacy).unwrap();
    let mut p = LayoutPersistence::new(store);
    let mut editor = EditorStore::new();

    assert_eq!(p.restore(&mut editor), RestoreOutcome::Loaded { slots: 4 });
    let slots = editor.slots();
    assert_eq!(slots[0].max_font_size, 110);
    assert_eq!(slots[1].max_font_size, 120);
    assert_eq!(slots[2].rotation, 270);
    assert_eq!(slots[0].mirror_partner, Some(slots[2].id));
    assert_eq!(slots[3].mirror_partner, Some(slots[1].id));

    let id = slots[1].id;
    let partner = slots[3].id;
    editor.update_slot(id, &SlotPatch::content("Caio"));
    assert_eq!(editor.slot(&partner).unwrap().content, "Caio");
}

#[test]
fn restore_through_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = EditorStore::new();
    let id = editor.slots()[0].id;
    editor.update_slot(id, &SlotPatch::content("Bia"));

    let mut first = LayoutPersistence::new(FileStore::new(dir.path()));
    first.stamp_version();
    assert!(first.save(editor.slots()));

    let mut second = LayoutPersistence::new(FileStore::new(dir.path()));
    let mut fresh = EditorStore::new();
    assert_eq!(second.restore(&mut fresh), RestoreOutcome::Loaded { slots: 4 });
    assert_eq!(fresh.slots()[0].content, "Bia");
    assert_eq!(fresh.slots()[2].content, "Bia");
}
