//! Status classification.
//!
//! A record's status is never stored. It is recomputed from four facts
//! (quantity, threshold, expiry date, today) every time it is needed, and this
//! module is the only place that knows the rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medstock_core::{DomainError, DomainResult};

use crate::item::InventoryItem;

/// Derived health of a stock record. Exactly one applies to every valid item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Active,
    LowStock,
    Expired,
    OutOfStock,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Active,
        ItemStatus::LowStock,
        ItemStatus::Expired,
        ItemStatus::OutOfStock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::LowStock => "low_stock",
            ItemStatus::Expired => "expired",
            ItemStatus::OutOfStock => "out_of_stock",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown status '{s}' (expected one of: active, low_stock, expired, out_of_stock)"
                ))
            })
    }
}

/// Classify one record as of `today`.
///
/// Precedence, first match wins:
/// 1. `OutOfStock` when quantity is zero,
/// 2. `Expired` when the expiry date is strictly before `today`,
/// 3. `LowStock` when quantity is at or below the threshold,
/// 4. `Active` otherwise.
///
/// Invalid records are rejected rather than classified.
pub fn classify(item: &InventoryItem, today: NaiveDate) -> DomainResult<ItemStatus> {
    item.validate()?;

    if item.quantity == 0 {
        return Ok(ItemStatus::OutOfStock);
    }
    if item.expiry().is_some_and(|expiry| expiry < today) {
        return Ok(ItemStatus::Expired);
    }
    if item.quantity <= item.min_quantity_threshold {
        return Ok(ItemStatus::LowStock);
    }
    Ok(ItemStatus::Active)
}

/// A record paired with the status computed for a given snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedItem<'a> {
    #[serde(flatten)]
    pub item: &'a InventoryItem,
    pub status: ItemStatus,
}

/// Classify a whole snapshot, failing on the first invalid record.
pub fn classify_all(items: &[InventoryItem], today: NaiveDate) -> DomainResult<Vec<ClassifiedItem<'_>>> {
    items
        .iter()
        .map(|item| {
            Ok(ClassifiedItem {
                item,
                status: classify(item, today)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{day, expiring, item};

    fn today() -> NaiveDate {
        day(2024, 1, 1)
    }

    #[test]
    fn zero_quantity_is_out_of_stock_even_when_expired() {
        let record = expiring("Insulin", 0, "2023-06-01");
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::OutOfStock);
    }

    #[test]
    fn expired_takes_precedence_over_low_stock() {
        let record = expiring("Insulin", 5, "2023-12-31");
        assert_eq!(record.min_quantity_threshold, 10);
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::Expired);
    }

    #[test]
    fn expiring_today_is_not_expired() {
        let record = expiring("Insulin", 50, "2024-01-01");
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::Active);
    }

    #[test]
    fn quantity_at_threshold_is_low_stock() {
        let record = item("Gauze", 10);
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::LowStock);

        let record = item("Gauze", 11);
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::Active);
    }

    #[test]
    fn zero_threshold_never_reports_low_stock() {
        let mut record = item("Scalpel", 1);
        record.min_quantity_threshold = 0;
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::Active);
    }

    #[test]
    fn missing_or_unparseable_expiry_never_expires() {
        let record = item("Gauze", 100);
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::Active);

        let record = expiring("Gauze", 100, "31/12/1999");
        assert_eq!(classify(&record, today()).unwrap(), ItemStatus::Active);
    }

    #[test]
    fn negative_quantity_is_a_validation_error() {
        let mut record = item("Gauze", 1);
        record.quantity = -2;
        assert!(matches!(
            classify(&record, today()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn blank_name_is_a_validation_error() {
        let mut record = item("Gauze", 1);
        record.name = " ".into();
        assert!(classify(&record, today()).is_err());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in ItemStatus::ALL {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn classified_item_serializes_flat_with_status() {
        let record = item("Gauze", 3);
        let classified = classify_all(std::slice::from_ref(&record), today()).unwrap();
        let json = serde_json::to_value(&classified[0]).unwrap();

        assert_eq!(json["name"], "Gauze");
        assert_eq!(json["status"], "low_stock");
        assert_eq!(json["id"], record.id.to_string());
    }

    #[test]
    fn classify_all_stops_at_first_invalid_record() {
        let good = item("Gauze", 30);
        let mut bad = item("Tape", 1);
        bad.min_quantity_threshold = -1;

        assert!(classify_all(&[good, bad], today()).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_item() -> impl Strategy<Value = InventoryItem> {
            (
                0i64..500,
                0i64..100,
                prop::option::of(-400i64..400),
            )
                .prop_map(|(quantity, threshold, offset)| {
                    let mut record = item("Generated", quantity);
                    record.min_quantity_threshold = threshold;
                    record.expiry_date = offset.map(|days| {
                        (today() + chrono::Duration::days(days))
                            .format("%Y-%m-%d")
                            .to_string()
                    });
                    record
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: every valid record classifies, and the result obeys the precedence rules.
            #[test]
            fn classification_is_total_and_ordered(record in arb_item()) {
                let status = classify(&record, today()).unwrap();
                let expired = record.expiry().is_some_and(|e| e < today());

                if record.quantity == 0 {
                    prop_assert_eq!(status, ItemStatus::OutOfStock);
                } else if expired {
                    prop_assert_eq!(status, ItemStatus::Expired);
                } else if record.quantity <= record.min_quantity_threshold {
                    prop_assert_eq!(status, ItemStatus::LowStock);
                } else {
                    prop_assert_eq!(status, ItemStatus::Active);
                }
            }

            /// Property: classification depends only on its inputs.
            #[test]
            fn classification_is_deterministic(record in arb_item()) {
                prop_assert_eq!(classify(&record, today()), classify(&record.clone(), today()));
            }
        }
    }
}
