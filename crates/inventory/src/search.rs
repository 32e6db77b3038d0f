//! Free-text search and list filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medstock_core::DomainResult;

use crate::item::{Category, InventoryItem};
use crate::status::{ClassifiedItem, ItemStatus, classify};

/// Case-insensitive substring search over name, manufacturer and batch number.
///
/// The term is trimmed first; a blank term returns the whole snapshot.
/// Matches keep their input order.
pub fn search<'a>(items: &'a [InventoryItem], term: &str) -> Vec<&'a InventoryItem> {
    match Needle::new(term) {
        Some(needle) => items.iter().filter(|item| needle.matches(item)).collect(),
        None => items.iter().collect(),
    }
}

/// Lowercased, trimmed search term. `None` for a blank term.
struct Needle(String);

impl Needle {
    fn new(term: &str) -> Option<Self> {
        let term = term.trim();
        (!term.is_empty()).then(|| Self(term.to_lowercase()))
    }

    fn matches(&self, item: &InventoryItem) -> bool {
        [
            Some(item.name.as_str()),
            item.manufacturer.as_deref(),
            item.batch_number.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Explicit list criteria; every present criterion must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub status: Option<ItemStatus>,
}

impl ItemFilter {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Classify and filter a snapshot in one pass, preserving input order.
    ///
    /// Every record is classified, including ones the other criteria drop,
    /// so an invalid record fails the call regardless of the filter.
    pub fn apply<'a>(
        &self,
        items: &'a [InventoryItem],
        today: NaiveDate,
    ) -> DomainResult<Vec<ClassifiedItem<'a>>> {
        let needle = self.search.as_deref().and_then(Needle::new);
        let mut out = Vec::new();

        for item in items {
            let status = classify(item, today)?;

            if self.category.is_some_and(|c| c != item.category) {
                continue;
            }
            if self.status.is_some_and(|s| s != status) {
                continue;
            }
            if needle.as_ref().is_some_and(|n| !n.matches(item)) {
                continue;
            }
            out.push(ClassifiedItem { item, status });
        }

        Ok(out)
    }
}
