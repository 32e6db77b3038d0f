//! Expiry-date interpretation and the "expiring soon" window.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Interpret a stored expiry value as a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive ISO timestamps
/// (the date part is kept). Anything else yields `None` and is treated
/// exactly like a record without expiry tracking.
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date())
}

/// Look-ahead window, in days, for flagging items as expiring soon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpiryHorizon(u32);

impl ExpiryHorizon {
    pub const DEFAULT_DAYS: u32 = 30;

    pub fn days(days: u32) -> Self {
        Self(days)
    }

    pub fn as_days(&self) -> u32 {
        self.0
    }

    /// First day that is no longer "soon" (exclusive bound).
    pub fn window_end(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.0)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// `today <= expiry < today + horizon`.
    pub fn contains(&self, expiry: NaiveDate, today: NaiveDate) -> bool {
        expiry >= today && expiry < self.window_end(today)
    }
}

impl Default for ExpiryHorizon {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::day;

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse_expiry_date("2024-01-15"), Some(day(2024, 1, 15)));
        assert_eq!(parse_expiry_date(" 2024-01-15 "), Some(day(2024, 1, 15)));
        assert_eq!(
            parse_expiry_date("2024-01-15T23:30:00+00:00"),
            Some(day(2024, 1, 15))
        );
        assert_eq!(parse_expiry_date("2024-01-15T10:00:00"), Some(day(2024, 1, 15)));
    }

    #[test]
    fn garbage_is_treated_as_absent() {
        assert_eq!(parse_expiry_date(""), None);
        assert_eq!(parse_expiry_date("next tuesday"), None);
        assert_eq!(parse_expiry_date("2024-02-30"), None);
    }

    #[test]
    fn horizon_window_is_half_open() {
        let today = day(2024, 1, 1);
        let horizon = ExpiryHorizon::default();

        assert_eq!(horizon.window_end(today), day(2024, 1, 31));
        assert!(horizon.contains(today, today));
        assert!(horizon.contains(day(2024, 1, 30), today));
        assert!(!horizon.contains(day(2024, 1, 31), today));
        assert!(!horizon.contains(day(2023, 12, 31), today));
    }

    #[test]
    fn zero_day_horizon_is_empty() {
        let today = day(2024, 1, 1);
        assert!(!ExpiryHorizon::days(0).contains(today, today));
    }

    #[test]
    fn window_end_saturates() {
        assert_eq!(
            ExpiryHorizon::days(u32::MAX).window_end(NaiveDate::MAX),
            NaiveDate::MAX
        );
    }
}
