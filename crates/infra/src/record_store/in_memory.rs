use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use medstock_core::{DomainError, DomainResult, ItemId};
use medstock_inventory::{Category, InventoryItem, ItemDraft, ItemPatch};

use super::RecordStore;

/// In-memory record store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<HashMap<ItemId, InventoryItem>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records (e.g. fixtures or an import).
    pub fn with_items(items: impl IntoIterator<Item = InventoryItem>) -> DomainResult<Self> {
        let store = Self::new();
        for item in items {
            store.put(item)?;
        }
        Ok(store)
    }

    /// Insert a fully-formed record, keeping its identifier.
    pub fn put(&self, item: InventoryItem) -> DomainResult<()> {
        item.validate()?;
        let mut map = self.write();
        if map.contains_key(&item.id) {
            return Err(DomainError::conflict(format!("item {} already exists", item.id)));
        }
        map.insert(item.id, item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a half-written record:
    // every mutation builds the new value before touching the map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ItemId, InventoryItem>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ItemId, InventoryItem>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self, keep: impl Fn(&InventoryItem) -> bool) -> Vec<InventoryItem> {
        let mut items: Vec<InventoryItem> = self.read().values().filter(|i| keep(i)).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        items
    }
}

impl RecordStore for InMemoryRecordStore {
    fn list_all(&self) -> Vec<InventoryItem> {
        self.snapshot(|_| true)
    }

    fn list_by_category(&self, category: Category) -> Vec<InventoryItem> {
        self.snapshot(|item| item.category == category)
    }

    fn find_by_id(&self, id: &ItemId) -> Option<InventoryItem> {
        self.read().get(id).cloned()
    }

    fn insert(&self, draft: ItemDraft, now: DateTime<Utc>) -> DomainResult<ItemId> {
        let item = InventoryItem::from_draft(ItemId::new(), draft, now)?;
        let id = item.id;
        self.put(item)?;
        tracing::info!(item_id = %id, "inventory item created");
        Ok(id)
    }

    fn update(&self, id: &ItemId, patch: &ItemPatch, now: DateTime<Utc>) -> DomainResult<InventoryItem> {
        let mut map = self.write();
        let current = map.get(id).ok_or_else(DomainError::not_found)?;
        let updated = patch.apply_to(current, now)?;
        map.insert(*id, updated.clone());
        tracing::info!(item_id = %id, "inventory item updated");
        Ok(updated)
    }

    fn adjust_quantity(&self, id: &ItemId, delta: i64, now: DateTime<Utc>) -> DomainResult<InventoryItem> {
        let mut map = self.write();
        let current = map.get(id).ok_or_else(DomainError::not_found)?;
        let mut updated = current.clone();
        updated.adjust_quantity(delta, now)?;
        map.insert(*id, updated.clone());
        tracing::info!(item_id = %id, delta, quantity = updated.quantity, "inventory stock adjusted");
        Ok(updated)
    }

    fn delete(&self, id: &ItemId) -> DomainResult<()> {
        match self.write().remove(id) {
            Some(_) => {
                tracing::info!(item_id = %id, "inventory item deleted");
                Ok(())
            }
            None => Err(DomainError::not_found()),
        }
    }
}
