use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use medstock_core::{DomainError, DomainResult, ItemId};

use crate::expiry::parse_expiry_date;

/// Unit label used when a draft leaves `unit` blank.
pub const DEFAULT_UNIT: &str = "pcs";

/// Low-stock trigger used when a draft does not set one.
pub const DEFAULT_MIN_QUANTITY_THRESHOLD: i64 = 10;

/// Closed set of supply categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medication,
    Equipment,
    Consumable,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Medication,
        Category::Equipment,
        Category::Consumable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Medication => "medication",
            Category::Equipment => "equipment",
            Category::Consumable => "consumable",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "medication" => Ok(Category::Medication),
            "equipment" => Ok(Category::Equipment),
            "consumable" => Ok(Category::Consumable),
            other => Err(DomainError::validation(format!(
                "unknown category '{other}' (expected one of: medication, equipment, consumable)"
            ))),
        }
    }
}

/// A stock record as held by the record store.
///
/// There is no `status` field; it is derived on read by [`crate::classify`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub quantity: i64,
    pub unit: String,
    pub manufacturer: Option<String>,
    pub batch_number: Option<String>,
    /// Raw calendar date as supplied; see [`InventoryItem::expiry`].
    pub expiry_date: Option<String>,
    pub purchase_date: NaiveDate,
    pub cost_per_unit: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub min_quantity_threshold: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Materialize a validated draft into a record.
    pub fn from_draft(id: ItemId, draft: ItemDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        draft.validate()?;

        let unit = draft
            .unit
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_UNIT.to_string());

        Ok(Self {
            id,
            name: draft.name.trim().to_string(),
            category: draft.category,
            quantity: draft.quantity,
            unit,
            manufacturer: draft.manufacturer,
            batch_number: draft.batch_number,
            expiry_date: draft.expiry_date,
            purchase_date: draft.purchase_date.unwrap_or_else(|| now.date_naive()),
            cost_per_unit: draft.cost_per_unit,
            supplier: draft.supplier,
            location: draft.location,
            description: draft.description,
            min_quantity_threshold: draft
                .min_quantity_threshold
                .unwrap_or(DEFAULT_MIN_QUANTITY_THRESHOLD),
            created_at: now,
            updated_at: now,
        })
    }

    /// Check the record invariants.
    ///
    /// Analytics call this before classifying so that a corrupt record is
    /// reported instead of being coerced into some status.
    pub fn validate(&self) -> DomainResult<()> {
        check_fields(
            &self.name,
            self.quantity,
            self.min_quantity_threshold,
            self.cost_per_unit,
        )
        .map_err(|e| match e {
            DomainError::Validation(msg) => {
                DomainError::validation(format!("item {}: {msg}", self.id))
            }
            other => other,
        })
    }

    /// Parsed expiry date; `None` when absent or not a calendar date.
    pub fn expiry(&self) -> Option<NaiveDate> {
        let raw = self.expiry_date.as_deref()?;
        let parsed = parse_expiry_date(raw);
        if parsed.is_none() {
            tracing::debug!(item_id = %self.id, raw, "ignoring unparseable expiry date");
        }
        parsed
    }

    /// `quantity × cost_per_unit`, or zero when no cost is recorded.
    pub fn stock_value(&self) -> f64 {
        self.cost_per_unit
            .map(|cost| self.quantity as f64 * cost)
            .unwrap_or(0.0)
    }

    /// Apply a signed stock movement.
    pub fn adjust_quantity(&mut self, delta: i64, now: DateTime<Utc>) -> DomainResult<()> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let new_quantity = self
            .quantity
            .checked_add(delta)
            .ok_or_else(|| DomainError::invariant("stock quantity overflow"))?;
        if new_quantity < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }

        self.quantity = new_quantity;
        self.updated_at = now;
        Ok(())
    }
}

fn check_fields(
    name: &str,
    quantity: i64,
    min_quantity_threshold: i64,
    cost_per_unit: Option<f64>,
) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if quantity < 0 {
        return Err(DomainError::validation("quantity cannot be negative"));
    }
    if min_quantity_threshold < 0 {
        return Err(DomainError::validation(
            "min_quantity_threshold cannot be negative",
        ));
    }
    if let Some(cost) = cost_per_unit {
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(DomainError::validation(
                "cost_per_unit must be a finite non-negative number",
            ));
        }
        if !(quantity as f64 * cost).is_finite() {
            return Err(DomainError::validation(
                "quantity * cost_per_unit is too large to represent",
            ));
        }
    }
    Ok(())
}

/// Input for creating a record: `name`, `category` and `quantity` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: Category,
    pub quantity: i64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub cost_per_unit: Option<f64>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_quantity_threshold: Option<i64>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, category: Category, quantity: i64) -> Self {
        Self {
            name: name.into(),
            category,
            quantity,
            unit: None,
            manufacturer: None,
            batch_number: None,
            expiry_date: None,
            purchase_date: None,
            cost_per_unit: None,
            supplier: None,
            location: None,
            description: None,
            min_quantity_threshold: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_batch_number(mut self, batch_number: impl Into<String>) -> Self {
        self.batch_number = Some(batch_number.into());
        self
    }

    pub fn with_expiry_date(mut self, expiry_date: impl Into<String>) -> Self {
        self.expiry_date = Some(expiry_date.into());
        self
    }

    pub fn with_cost_per_unit(mut self, cost_per_unit: f64) -> Self {
        self.cost_per_unit = Some(cost_per_unit);
        self
    }

    pub fn with_threshold(mut self, min_quantity_threshold: i64) -> Self {
        self.min_quantity_threshold = Some(min_quantity_threshold);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        check_fields(
            &self.name,
            self.quantity,
            self.min_quantity_threshold
                .unwrap_or(DEFAULT_MIN_QUANTITY_THRESHOLD),
            self.cost_per_unit,
        )
    }
}

/// Partial update. `None` means "leave unchanged"; there is no way to clear
/// an optional field and no way to set the derived status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub manufacturer: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub cost_per_unit: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub min_quantity_threshold: Option<i64>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Produce the updated record, leaving `item` untouched when the result
    /// would break an invariant.
    pub fn apply_to(&self, item: &InventoryItem, now: DateTime<Utc>) -> DomainResult<InventoryItem> {
        let mut next = item.clone();

        if let Some(name) = &self.name {
            next.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            next.category = category;
        }
        if let Some(quantity) = self.quantity {
            next.quantity = quantity;
        }
        if let Some(unit) = self.unit.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            next.unit = unit.to_string();
        }
        replace(&mut next.manufacturer, &self.manufacturer);
        replace(&mut next.batch_number, &self.batch_number);
        replace(&mut next.expiry_date, &self.expiry_date);
        if let Some(purchase_date) = self.purchase_date {
            next.purchase_date = purchase_date;
        }
        if let Some(cost) = self.cost_per_unit {
            next.cost_per_unit = Some(cost);
        }
        replace(&mut next.supplier, &self.supplier);
        replace(&mut next.location, &self.location);
        replace(&mut next.description, &self.description);
        if let Some(threshold) = self.min_quantity_threshold {
            next.min_quantity_threshold = threshold;
        }

        next.validate()?;
        next.updated_at = now;
        Ok(next)
    }
}

fn replace(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}
