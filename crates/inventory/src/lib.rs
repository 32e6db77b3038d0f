//! Inventory domain module: medical-supply records and their analytics.
//!
//! This crate contains business rules for inventory, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). Every analytics
//! function takes the calendar day it should consider "today" as an explicit
//! argument; nothing in here reads the system clock.

pub mod alerts;
pub mod dashboard;
pub mod expiry;
pub mod item;
pub mod search;
pub mod status;

pub use alerts::{AlertBuckets, group_alerts};
pub use dashboard::{DashboardStats, aggregate};
pub use expiry::{ExpiryHorizon, parse_expiry_date};
pub use item::{
    Category, DEFAULT_MIN_QUANTITY_THRESHOLD, DEFAULT_UNIT, InventoryItem, ItemDraft, ItemPatch,
};
pub use search::{ItemFilter, search};
pub use status::{ClassifiedItem, ItemStatus, classify, classify_all};

#[cfg(test)]
mod testing;
