use chrono::{NaiveDate, Utc};

use medstock_inventory::ExpiryHorizon;

use crate::app::errors::ApiError;

/// Point of view for one analytics request.
///
/// `today` is fixed when the context is built, so every record in a single
/// response is judged against the same day.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnalyticsContext {
    today: NaiveDate,
    horizon: ExpiryHorizon,
}

impl AnalyticsContext {
    pub fn new(today: NaiveDate, horizon: ExpiryHorizon) -> Self {
        Self { today, horizon }
    }

    /// Build from optional `today` (YYYY-MM-DD) and `horizon_days` query values.
    ///
    /// Without an override the UTC clock is read once, here.
    pub fn resolve(
        today: Option<&str>,
        horizon_days: Option<&str>,
        default_horizon: ExpiryHorizon,
    ) -> Result<Self, ApiError> {
        let today = match today.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ApiError::bad_request("invalid_today", format!("today must be YYYY-MM-DD, got '{raw}'"))
            })?,
            None => Utc::now().date_naive(),
        };

        let horizon = match horizon_days.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<u32>().map(ExpiryHorizon::days).map_err(|_| {
                ApiError::bad_request(
                    "invalid_horizon",
                    format!("horizon_days must be a non-negative integer, got '{raw}'"),
                )
            })?,
            None => default_horizon,
        };

        Ok(Self { today, horizon })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn horizon(&self) -> ExpiryHorizon {
        self.horizon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let ctx = AnalyticsContext::resolve(Some("2024-01-01"), Some("7"), ExpiryHorizon::default()).unwrap();
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(ctx.horizon(), ExpiryHorizon::days(7));
    }

    #[test]
    fn defaults_apply_when_absent() {
        let ctx = AnalyticsContext::resolve(None, Some(" "), ExpiryHorizon::days(45)).unwrap();
        assert_eq!(ctx.horizon(), ExpiryHorizon::days(45));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(AnalyticsContext::resolve(Some("01/01/2024"), None, ExpiryHorizon::default()).is_err());
        assert!(AnalyticsContext::resolve(None, Some("-3"), ExpiryHorizon::default()).is_err());
    }
}
