use std::sync::Arc;

use chrono::{DateTime, Utc};

use medstock_core::{DomainError, DomainResult};
use medstock_infra::{AppConfig, InMemoryRecordStore, RecordStore};
use medstock_inventory::{InventoryItem, ItemDraft};

use crate::app::errors::ApiError;
use crate::context::AnalyticsContext;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn RecordStore>,
    config: AppConfig,
}

impl AppServices {
    pub fn new(store: Arc<dyn RecordStore>, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(InMemoryRecordStore::new()), config)
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolve the request's analytics context against configured defaults.
    pub fn context(
        &self,
        today: Option<&str>,
        horizon_days: Option<&str>,
    ) -> Result<AnalyticsContext, ApiError> {
        AnalyticsContext::resolve(today, horizon_days, self.config.expiry_horizon)
    }

    /// Insert a draft, filling in the configured default threshold.
    pub fn create_item(&self, mut draft: ItemDraft, now: DateTime<Utc>) -> DomainResult<InventoryItem> {
        if draft.min_quantity_threshold.is_none() {
            draft.min_quantity_threshold = Some(self.config.default_threshold);
        }

        let id = self.store.insert(draft, now)?;
        // The store only hands back the id; read the record it built.
        self.store.find_by_id(&id).ok_or_else(|| {
            DomainError::invariant(format!("item {id} vanished right after insert"))
        })
    }
}
