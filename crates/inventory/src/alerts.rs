//! Alert grouping: low stock, expired and expiring-soon buckets.

use chrono::NaiveDate;
use serde::Serialize;

use medstock_core::DomainResult;

use crate::expiry::ExpiryHorizon;
use crate::item::InventoryItem;
use crate::status::{ItemStatus, classify};

/// Actionable views over a snapshot.
///
/// The buckets are independent filters: a record can be both low on stock
/// and close to expiry. Only `expired` and `expiring_soon` exclude each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertBuckets<'a> {
    /// Input order.
    pub low_stock: Vec<&'a InventoryItem>,
    /// Expiry ascending, then id.
    pub expired: Vec<&'a InventoryItem>,
    /// Expiry ascending, then id.
    pub expiring_soon: Vec<&'a InventoryItem>,
}

impl AlertBuckets<'_> {
    /// Number of alert entries (an item in two buckets counts twice).
    pub fn total(&self) -> usize {
        self.low_stock.len() + self.expired.len() + self.expiring_soon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// `today <= expiry < today + horizon`, independent of stock level.
pub(crate) fn is_expiring_soon(item: &InventoryItem, today: NaiveDate, horizon: ExpiryHorizon) -> bool {
    item.expiry()
        .is_some_and(|expiry| horizon.contains(expiry, today))
}

/// Partition a snapshot into alert buckets as of `today`.
pub fn group_alerts(
    items: &[InventoryItem],
    today: NaiveDate,
    horizon: ExpiryHorizon,
) -> DomainResult<AlertBuckets<'_>> {
    let mut buckets = AlertBuckets::default();

    for item in items {
        match classify(item, today)? {
            ItemStatus::LowStock => buckets.low_stock.push(item),
            ItemStatus::Expired => buckets.expired.push(item),
            ItemStatus::Active | ItemStatus::OutOfStock => {}
        }
        if is_expiring_soon(item, today, horizon) {
            buckets.expiring_soon.push(item);
        }
    }

    sort_by_expiry(&mut buckets.expired);
    sort_by_expiry(&mut buckets.expiring_soon);

    tracing::debug!(
        low_stock = buckets.low_stock.len(),
        expired = buckets.expired.len(),
        expiring_soon = buckets.expiring_soon.len(),
        horizon_days = horizon.as_days(),
        "grouped inventory alerts"
    );

    Ok(buckets)
}

fn sort_by_expiry(bucket: &mut [&InventoryItem]) {
    bucket.sort_by_cached_key(|item| (item.expiry(), item.id));
}
