//! Dashboard totals over a snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medstock_core::{DomainError, DomainResult};

use crate::alerts::is_expiring_soon;
use crate::expiry::ExpiryHorizon;
use crate::item::{Category, InventoryItem};
use crate::status::{ItemStatus, classify};

/// Summary of a snapshot as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_items: usize,
    pub low_stock_items: usize,
    pub expired_items: usize,
    pub out_of_stock_items: usize,
    pub expiring_soon_items: usize,
    pub total_quantity: i64,
    /// Σ quantity × cost_per_unit; records without a cost add nothing.
    pub total_value: f64,
    /// Record count per category. Every category is present, possibly as zero.
    pub categories: BTreeMap<Category, usize>,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_items: 0,
            low_stock_items: 0,
            expired_items: 0,
            out_of_stock_items: 0,
            expiring_soon_items: 0,
            total_quantity: 0,
            total_value: 0.0,
            categories: Category::ALL.into_iter().map(|c| (c, 0)).collect(),
        }
    }
}

/// Reduce a snapshot to dashboard totals in a single pass.
///
/// Status counts use [`classify`], so they always agree with the alert
/// buckets built from the same snapshot and `today`. A `total_value` that
/// does not fit in an `f64` is an invariant violation.
pub fn aggregate(
    items: &[InventoryItem],
    today: NaiveDate,
    horizon: ExpiryHorizon,
) -> DomainResult<DashboardStats> {
    let mut stats = DashboardStats::default();

    for item in items {
        match classify(item, today)? {
            ItemStatus::LowStock => stats.low_stock_items += 1,
            ItemStatus::Expired => stats.expired_items += 1,
            ItemStatus::OutOfStock => stats.out_of_stock_items += 1,
            ItemStatus::Active => {}
        }
        if is_expiring_soon(item, today, horizon) {
            stats.expiring_soon_items += 1;
        }

        stats.total_items += 1;
        stats.total_quantity = stats.total_quantity.saturating_add(item.quantity);
        stats.total_value += item.stock_value();
        *stats.categories.entry(item.category).or_insert(0) += 1;
    }

    if !stats.total_value.is_finite() {
        return Err(DomainError::invariant("total stock value overflows"));
    }

    tracing::debug!(
        total_items = stats.total_items,
        low_stock = stats.low_stock_items,
        expired = stats.expired_items,
        %today,
        "aggregated dashboard snapshot"
    );

    Ok(stats)
}
