use std::collections::HashSet;
use triptest_core::db::{open_db, open_db_in_memory};
use triptest_core::{
    BucketId, CategoryId, MemoryKeyValueSurface, NewPackingItem, PackingStore, PersistOutcome,
    SqliteKeyValueSurface, SurfaceMode, PACKING_ITEMS_KEY,
};
use uuid::Uuid;

fn new_item(name: &str, category: CategoryId, bucket: BucketId) -> NewPackingItem {
    NewPackingItem::new(name, category, bucket).unwrap()
}

#[test]
fn add_item_trims_name_and_prepends() {
    let conn = open_db_in_memory().unwrap();
    let mut store = PackingStore::open(SqliteKeyValueSurface::new(&conn));

    let first = store
        .add_item(new_item("Kettle", CategoryId::Kitchen, BucketId::Keep))
        .into_value();
    let second = store.add_item(new_item("  Towel  ", CategoryId::Bathroom, BucketId::TakeAway));

    assert_eq!(second.persist, PersistOutcome::Persisted);
    assert_eq!(second.value.name, "Towel");
    assert_eq!(store.items()[0].id, second.value.id);
    assert_eq!(store.items()[1].id, first.id);
}

#[test]
fn ids_are_unique_across_single_and_batch_adds() {
    let surface = MemoryKeyValueSurface::new();
    let mut store = PackingStore::open(&surface);

    for index in 0..20 {
        store.add_item(new_item(&format!("item {index}"), CategoryId::Room, BucketId::Keep));
    }
    let batch = (0..20)
        .map(|index| new_item(&format!("batch {index}"), CategoryId::Work, BucketId::GiveAway))
        .collect();
    store.add_items(batch);

    let ids: HashSet<Uuid> = store.items().iter().map(|item| item.id).collect();
    assert_eq!(ids.len(), 40);
}

#[test]
fn move_item_is_idempotent_and_keeps_order() {
    let surface = MemoryKeyValueSurface::new();
    let mut store = PackingStore::open(&surface);
    let a = store
        .add_item(new_item("Lamp", CategoryId::LivingRoom, BucketId::Keep))
        .into_value();
    store.add_item(new_item("Litter box", CategoryId::Cats, BucketId::Keep));

    assert!(store.move_item(a.id, BucketId::GiveAway).value);
    let after_first = store.items().to_vec();
    assert!(store.move_item(a.id, BucketId::GiveAway).value);
    assert_eq!(store.items(), after_first.as_slice());
    assert_eq!(store.items()[1].id, a.id);
    assert_eq!(store.get(a.id).unwrap().bucket, BucketId::GiveAway);
}

#[test]
fn move_unknown_id_is_a_persisted_no_op() {
    let surface = MemoryKeyValueSurface::new();
    let mut store = PackingStore::open(&surface);
    store.add_item(new_item("Soap", CategoryId::Bathroom, BucketId::Keep));
    let before = store.items().to_vec();

    let write = store.move_item(Uuid::new_v4(), BucketId::TakeAway);

    assert!(!write.value);
    assert!(write.persist.is_persisted());
    assert_eq!(store.items(), before.as_slice());
}

#[test]
fn camera_moves_from_keep_to_take_away() {
    let surface = MemoryKeyValueSurface::new();
    let mut store = PackingStore::open(&surface);
    let camera = store
        .add_item(new_item("Camera", CategoryId::Personal, BucketId::Keep))
        .into_value();

    store.move_item(camera.id, BucketId::TakeAway);

    assert!(store.items_in(BucketId::Keep).is_empty());
    let take_away = store.items_in(BucketId::TakeAway);
    assert_eq!(take_away.len(), 1);
    assert_eq!(take_away[0].name, "Camera");
}

#[test]
fn reload_from_file_preserves_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triptest.db");

    let saved = {
        let conn = open_db(&path).unwrap();
        let mut store = PackingStore::open(SqliteKeyValueSurface::new(&conn));
        store.add_item(new_item("Shirt", CategoryId::Laundry, BucketId::TakeAway));
        store.add_items(vec![
            new_item("Laptop", CategoryId::Work, BucketId::TakeAway),
            new_item("Charger", CategoryId::Work, BucketId::Keep),
        ]);
        store.items().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let reloaded = PackingStore::open(SqliteKeyValueSurface::new(&conn));
    assert_eq!(reloaded.items(), saved.as_slice());
}

#[test]
fn reset_empties_memory_and_storage() {
    let conn = open_db_in_memory().unwrap();
    let mut store = PackingStore::open(SqliteKeyValueSurface::new(&conn));
    store.add_item(new_item("Pillow", CategoryId::Room, BucketId::GiveAway));

    assert!(store.reset().persist.is_persisted());
    assert!(store.items().is_empty());

    let reloaded = PackingStore::open(SqliteKeyValueSurface::new(&conn));
    assert!(reloaded.items().is_empty());
}

#[test]
fn write_failure_keeps_memory_state_and_reports_degraded_path() {
    let surface = MemoryKeyValueSurface::new();
    let mut store = PackingStore::open(&surface);
    store.add_item(new_item("Kept", CategoryId::Kitchen, BucketId::Keep));
    let persisted_before = surface.raw(PACKING_ITEMS_KEY);

    surface.set_mode(SurfaceMode::ReadOnly);
    let write = store.add_item(new_item("Unsaved", CategoryId::Kitchen, BucketId::Keep));

    assert!(matches!(write.persist, PersistOutcome::PersistFailed(_)));
    assert_eq!(store.last_persist(), Some(&write.persist));
    assert_eq!(store.items().len(), 2);
    assert_eq!(surface.raw(PACKING_ITEMS_KEY), persisted_before);
}

#[test]
fn unavailable_surface_opens_empty() {
    let surface = MemoryKeyValueSurface::new();
    surface.insert_raw(PACKING_ITEMS_KEY, "[]");
    surface.set_mode(SurfaceMode::Unavailable);

    let mut store = PackingStore::open(&surface);
    assert!(store.items().is_empty());
    assert!(store.last_persist().is_none());

    let write = store.add_item(new_item("Fan", CategoryId::Room, BucketId::Keep));
    assert!(!write.persist.is_persisted());
    assert_eq!(store.items().len(), 1);
}

#[test]
fn corrupt_snapshot_opens_empty() {
    let surface = MemoryKeyValueSurface::new();
    surface.insert_raw(PACKING_ITEMS_KEY, "{\"items\": oops");
    let store = PackingStore::open(&surface);
    assert!(store.items().is_empty());
}
