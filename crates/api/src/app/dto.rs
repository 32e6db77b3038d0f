use serde::Deserialize;

use medstock_core::ItemId;
use medstock_inventory::{Category, ItemStatus};

use crate::app::errors::ApiError;

// -------------------------
// Query DTOs
// -------------------------

/// `GET /api/inventory` filters. Values are parsed by hand so that bad input
/// produces the same JSON error shape as every other failure.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub today: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub today: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub today: Option<String>,
    pub horizon_days: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub today: Option<String>,
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_item_id(raw: &str) -> Result<ItemId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("invalid_id", "invalid item id"))
}

pub fn parse_category(raw: Option<&str>) -> Result<Option<Category>, ApiError> {
    non_blank(raw)
        .map(|s| s.parse::<Category>())
        .transpose()
        .map_err(|e| ApiError::bad_request("invalid_category", e.to_string()))
}

pub fn parse_status(raw: Option<&str>) -> Result<Option<ItemStatus>, ApiError> {
    non_blank(raw)
        .map(|s| s.parse::<ItemStatus>())
        .transpose()
        .map_err(|e| ApiError::bad_request("invalid_status", e.to_string()))
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_ignored() {
        assert_eq!(parse_category(Some("  ")).unwrap(), None);
        assert_eq!(parse_status(None).unwrap(), None);
    }

    #[test]
    fn known_filters_parse() {
        assert_eq!(parse_category(Some("equipment")).unwrap(), Some(Category::Equipment));
        assert_eq!(parse_status(Some("low_stock")).unwrap(), Some(ItemStatus::LowStock));
    }

    #[test]
    fn unknown_filters_are_bad_requests() {
        assert!(matches!(
            parse_category(Some("furniture")),
            Err(ApiError::BadRequest { code: "invalid_category", .. })
        ));
        assert!(matches!(
            parse_status(Some("archived")),
            Err(ApiError::BadRequest { code: "invalid_status", .. })
        ));
        assert!(parse_item_id("42").is_err());
    }
}
