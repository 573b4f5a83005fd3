//! Transaction date parsing and month grouping keys
//!
//! Dates arrive either as ISO `YYYY-MM-DD` or as `DD/MM/YYYY`; the delimiter
//! decides the field order.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

use crate::error::{FinanceError, FinanceResult};

/// Parse a date in `YYYY-MM-DD` or `DD/MM/YYYY` form
pub fn parse_date(input: &str) -> FinanceResult<NaiveDate> {
    let s = input.trim();

    let (delimiter, day_first) = if s.contains('/') {
        ('/', true)
    } else if s.contains('-') {
        ('-', false)
    } else {
        return Err(FinanceError::MalformedRecord(format!(
            "Unrecognized date '{}': expected YYYY-MM-DD or DD/MM/YYYY",
            input
        )));
    };

    let parts: Vec<&str> = s.split(delimiter).map(str::trim).collect();
    if parts.len() != 3 {
        return Err(FinanceError::MalformedRecord(format!(
            "Date '{}' must have three parts",
            input
        )));
    }

    let numbers = parts
        .iter()
        .map(|p| p.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| {
            FinanceError::MalformedRecord(format!("Date '{}' has a non-numeric part", input))
        })?;

    let (year, month, day) = if day_first {
        (numbers[2], numbers[1], numbers[0])
    } else {
        (numbers[0], numbers[1], numbers[2])
    };

    let year = i32::try_from(year)
        .map_err(|_| FinanceError::MalformedRecord(format!("Year out of range in '{}'", input)))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        FinanceError::MalformedRecord(format!("'{}' is not a valid calendar date", input))
    })
}

/// `(year, month)` grouping identity for transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month containing the given date (the day is ignored)
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> FinanceResult<Self> {
        let invalid = || {
            FinanceError::InvalidArgument(format!("Invalid month '{}'. Use YYYY-MM (e.g., 2025-01)", s))
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Serde helpers so transaction files may carry either date form
pub mod serde_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
