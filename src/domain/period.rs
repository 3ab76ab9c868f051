//! Validated reporting periods and journal URLs

use crate::error::{DonsError, Result};
use chrono::NaiveDate;

/// Donation journal published by Wikimedia France
pub const DEFAULT_BASE_URL: &str = "https://dons.wikimedia.fr";

/// A year and month whose ranges have already been checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    year: u16,
    month: u8,
}

impl YearMonth {
    /// Validate a raw year (0-9999) and month (1-12)
    pub fn new(year: i64, month: i64) -> Result<Self> {
        let year = validate_year(year)?;
        if !(1..=12).contains(&month) {
            return Err(DonsError::Validation(format!(
                "month should be between 1 and 12 (instead of {})",
                month
            )));
        }
        Ok(YearMonth {
            year,
            month: month as u8,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// All twelve months of a year, January first
    pub fn months_of(year: u16) -> impl Iterator<Item = YearMonth> {
        (1..=12u8).map(move |month| YearMonth { year, month })
    }

    /// `https://<host>/journal/YYYY-MM`
    pub fn month_url(&self, base_url: &str) -> String {
        format!(
            "{}/journal/{:04}-{:02}",
            base_url.trim_end_matches('/'),
            self.year,
            self.month
        )
    }

    /// `https://<host>/journal/YYYY-MM-DD`, rejecting days the calendar does not have
    pub fn day_url(&self, base_url: &str, day: i64) -> Result<String> {
        let day = self.validate_day(day)?;
        Ok(format!("{}-{:02}", self.month_url(base_url), day))
    }

    /// Check that `day` exists in this month
    pub fn validate_day(&self, day: i64) -> Result<u8> {
        let valid = u32::try_from(day)
            .ok()
            .and_then(|d| NaiveDate::from_ymd_opt(self.year as i32, self.month as u32, d))
            .is_some();
        if !valid {
            return Err(DonsError::Validation(format!(
                "day {} does not exist in {:04}-{:02}",
                day, self.year, self.month
            )));
        }
        Ok(day as u8)
    }

    /// Full ISO date for a two-digit day key, e.g. `2014-01-05`
    pub fn date_key(&self, day_key: &str) -> String {
        format!("{:04}-{:02}-{}", self.year, self.month, day_key)
    }
}

/// Check a raw year against the 0-9999 range
pub fn validate_year(year: i64) -> Result<u16> {
    if !(0..=9999).contains(&year) {
        return Err(DonsError::Validation(format!(
            "year should be between 0 and 9999 (instead of {})",
            year
        )));
    }
    Ok(year as u16)
}

/// Month page URL on the default journal host
pub fn url_from_args(year: i64, month: i64) -> Result<String> {
    Ok(YearMonth::new(year, month)?.month_url(DEFAULT_BASE_URL))
}
