//! Shared fixtures for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use medstock_core::ItemId;

use crate::item::{Category, InventoryItem, ItemDraft};

pub fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn item(name: &str, quantity: i64) -> InventoryItem {
    InventoryItem::from_draft(
        ItemId::new(),
        ItemDraft::new(name, Category::Medication, quantity),
        ts(),
    )
    .unwrap()
}

pub fn expiring(name: &str, quantity: i64, expiry: &str) -> InventoryItem {
    let mut record = item(name, quantity);
    record.expiry_date = Some(expiry.to_string());
    record
}
