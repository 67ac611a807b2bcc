//! Packing board store.
//!
//! # Responsibility
//! - Own the ordered packing item collection for one session.
//! - Persist the full collection after every mutation.
//! - Derive the per-bucket board view.
//!
//! # Invariants
//! - New items are prepended; relocation keeps order.
//! - Each mutation performs exactly one snapshot write.

use crate::model::packing::{BucketId, ItemId, NewPackingItem, PackingItem};
use crate::repo::kv_repo::KeyValueSurface;
use crate::repo::snapshot::{
    decode_each, keep_first_by, load_snapshot, save_snapshot, PersistOutcome,
};
use crate::service::StoreWrite;
use log::{debug, info};
use serde_json::Value;

/// Storage record key for the packing collection.
pub const PACKING_ITEMS_KEY: &str = "trip-test:packing-items";

/// One column of the packing board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketView<'a> {
    pub bucket: BucketId,
    pub label: &'static str,
    pub description: &'static str,
    pub items: Vec<&'a PackingItem>,
}

/// Session-scoped packing store over a key-value surface.
pub struct PackingStore<S: KeyValueSurface> {
    surface: S,
    items: Vec<PackingItem>,
    last_persist: Option<PersistOutcome>,
}

impl<S: KeyValueSurface> PackingStore<S> {
    /// Loads the persisted collection, or starts empty when none is usable.
    pub fn open(surface: S) -> Self {
        let items: Vec<PackingItem> = load_snapshot(&surface, PACKING_ITEMS_KEY, decode_items);
        info!(
            "event=store_open module=packing status=ok items={}",
            items.len()
        );
        Self {
            surface,
            items,
            last_persist: None,
        }
    }

    /// Current collection, most recent first.
    pub fn items(&self) -> &[PackingItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&PackingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Outcome of the most recent write, `None` before the first mutation.
    pub fn last_persist(&self) -> Option<&PersistOutcome> {
        self.last_persist.as_ref()
    }

    /// Creates one item and prepends it.
    pub fn add_item(&mut self, input: NewPackingItem) -> StoreWrite<PackingItem> {
        let item = PackingItem::create(input);
        self.items.insert(0, item.clone());
        debug!("event=item_add module=packing status=ok bucket={}", item.bucket.as_str());
        let persist = self.persist();
        StoreWrite::new(item, persist)
    }

    /// Creates a batch of items and prepends them as one block in input order.
    pub fn add_items(&mut self, inputs: Vec<NewPackingItem>) -> StoreWrite<Vec<PackingItem>> {
        let created: Vec<PackingItem> = inputs.into_iter().map(PackingItem::create).collect();
        self.items.splice(0..0, created.iter().cloned());
        debug!("event=items_add module=packing status=ok count={}", created.len());
        let persist = self.persist();
        StoreWrite::new(created, persist)
    }

    /// Rewrites the bucket of `id`. Unknown ids are a no-op but still persist.
    ///
    /// Returns whether an item matched.
    pub fn move_item(&mut self, id: ItemId, bucket: BucketId) -> StoreWrite<bool> {
        let matched = match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.bucket = bucket;
                true
            }
            None => false,
        };
        debug!(
            "event=item_move module=packing status=ok matched={matched} bucket={}",
            bucket.as_str()
        );
        let persist = self.persist();
        StoreWrite::new(matched, persist)
    }

    /// Clears every item and persists the empty collection.
    pub fn reset(&mut self) -> StoreWrite<()> {
        self.items.clear();
        info!("event=store_reset module=packing status=ok");
        let persist = self.persist();
        StoreWrite::new((), persist)
    }

    /// Items currently in `bucket`, in store order.
    pub fn items_in(&self, bucket: BucketId) -> Vec<&PackingItem> {
        self.items.iter().filter(|item| item.bucket == bucket).collect()
    }

    /// Board columns in fixed bucket order.
    pub fn buckets(&self) -> Vec<BucketView<'_>> {
        BucketId::ALL
            .into_iter()
            .map(|bucket| BucketView {
                bucket,
                label: bucket.label(),
                description: bucket.description(),
                items: self.items_in(bucket),
            })
            .collect()
    }

    fn persist(&mut self) -> PersistOutcome {
        let outcome = save_snapshot(&self.surface, PACKING_ITEMS_KEY, self.items.as_slice());
        self.last_persist = Some(outcome.clone());
        outcome
    }
}

fn decode_items(value: Value) -> Option<Vec<PackingItem>> {
    let items = decode_each(value, |element| {
        serde_json::from_value::<PackingItem>(element)
            .ok()
            .filter(|item| item.validate().is_ok())
    })?;
    Some(keep_first_by(items, |item| item.id))
}

#[cfg(test)]
mod tests {
    use super::{PackingStore, PACKING_ITEMS_KEY};
    use crate::model::packing::{BucketId, CategoryId, NewPackingItem};
    use crate::repo::kv_repo::MemoryKeyValueSurface;

    fn input(name: &str, bucket: BucketId) -> NewPackingItem {
        NewPackingItem::new(name, CategoryId::Kitchen, bucket).unwrap()
    }

    #[test]
    fn add_items_prepends_batch_in_input_order() {
        let surface = MemoryKeyValueSurface::new();
        let mut store = PackingStore::open(&surface);
        store.add_item(input("Kettle", BucketId::Keep));
        store.add_items(vec![input("Fork", BucketId::Keep), input("Knife", BucketId::Keep)]);

        let names: Vec<&str> = store.items().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Fork", "Knife", "Kettle"]);
    }

    #[test]
    fn load_drops_only_malformed_records() {
        let surface = MemoryKeyValueSurface::new();
        surface.insert_raw(
            PACKING_ITEMS_KEY,
            r#"[
                {"id":"6f1c1c0e-4c36-4d8a-9c53-0a3c7f0f2d11","name":"Mug","category":"kitchen","bucket":"keep","createdAt":1},
                {"id":"not-a-uuid","name":"Pan","category":"kitchen","bucket":"keep","createdAt":2},
                {"id":"0b6b9f7e-2f4b-4f0b-8a5e-3b1f0c9a7d22","name":"Sofa","category":"garage","bucket":"keep","createdAt":3},
                {"id":"1a2b3c4d-5e6f-4a1b-8c2d-3e4f5a6b7c8d","name":"  ","category":"room","bucket":"keep","createdAt":4}
            ]"#,
        );

        let store = PackingStore::open(&surface);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].name, "Mug");
    }

    #[test]
    fn load_keeps_first_copy_of_repeated_id() {
        let surface = MemoryKeyValueSurface::new();
        surface.insert_raw(
            PACKING_ITEMS_KEY,
            r#"[
                {"id":"6f1c1c0e-4c36-4d8a-9c53-0a3c7f0f2d11","name":"Mug","category":"kitchen","bucket":"keep","createdAt":1},
                {"id":"6f1c1c0e-4c36-4d8a-9c53-0a3c7f0f2d11","name":"Mug copy","category":"kitchen","bucket":"keep","createdAt":2}
            ]"#,
        );

        let mut store = PackingStore::open(&surface);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].name, "Mug");

        let id = store.items()[0].id;
        assert!(store.move_item(id, BucketId::TakeAway).value);
        assert!(store.items_in(BucketId::Keep).is_empty());
        assert_eq!(store.items_in(BucketId::TakeAway).len(), 1);
    }

    #[test]
    fn buckets_view_lists_all_three_columns() {
        let surface = MemoryKeyValueSurface::new();
        let mut store = PackingStore::open(&surface);
        store.add_item(input("Plate", BucketId::GiveAway));

        let columns = store.buckets();
        let ids: Vec<BucketId> = columns.iter().map(|column| column.bucket).collect();
        assert_eq!(ids, BucketId::ALL);
        assert!(columns[0].items.is_empty());
        assert_eq!(columns[1].items.len(), 1);
        assert_eq!(columns[1].label, "Give Away");
    }
}
