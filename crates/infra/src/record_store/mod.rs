//! Record store contract consumed by the API layer.
//!
//! The analytics engine never talks to a store; callers fetch a snapshot with
//! [`RecordStore::list_all`] or [`RecordStore::list_by_category`] and hand it
//! to the pure functions in `medstock-inventory`.

pub mod in_memory;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use medstock_core::{DomainResult, ItemId};
use medstock_inventory::{Category, InventoryItem, ItemDraft, ItemPatch};

pub use in_memory::InMemoryRecordStore;

/// Key/value store of inventory records.
///
/// Listings are owned snapshots ordered newest-created first.
pub trait RecordStore: Send + Sync {
    fn list_all(&self) -> Vec<InventoryItem>;
    fn list_by_category(&self, category: Category) -> Vec<InventoryItem>;
    fn find_by_id(&self, id: &ItemId) -> Option<InventoryItem>;
    /// Validate and persist a draft, returning the assigned identifier.
    fn insert(&self, draft: ItemDraft, now: DateTime<Utc>) -> DomainResult<ItemId>;
    /// Apply a partial update; `NotFound` if the record does not exist.
    fn update(&self, id: &ItemId, patch: &ItemPatch, now: DateTime<Utc>) -> DomainResult<InventoryItem>;
    /// Apply a signed stock movement; `NotFound` if the record does not exist.
    fn adjust_quantity(&self, id: &ItemId, delta: i64, now: DateTime<Utc>) -> DomainResult<InventoryItem>;
    /// Remove a record permanently; `NotFound` if it does not exist.
    fn delete(&self, id: &ItemId) -> DomainResult<()>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn list_all(&self) -> Vec<InventoryItem> {
        (**self).list_all()
    }

    fn list_by_category(&self, category: Category) -> Vec<InventoryItem> {
        (**self).list_by_category(category)
    }

    fn find_by_id(&self, id: &ItemId) -> Option<InventoryItem> {
        (**self).find_by_id(id)
    }

    fn insert(&self, draft: ItemDraft, now: DateTime<Utc>) -> DomainResult<ItemId> {
        (**self).insert(draft, now)
    }

    fn update(&self, id: &ItemId, patch: &ItemPatch, now: DateTime<Utc>) -> DomainResult<InventoryItem> {
        (**self).update(id, patch, now)
    }

    fn adjust_quantity(&self, id: &ItemId, delta: i64, now: DateTime<Utc>) -> DomainResult<InventoryItem> {
        (**self).adjust_quantity(id, delta, now)
    }

    fn delete(&self, id: &ItemId) -> DomainResult<()> {
        (**self).delete(id)
    }
}
