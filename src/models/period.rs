//! Reporting period representation
//!
//! Supports the three period granularities used by the analytics screens:
//! a single day, a calendar month, and a calendar year. Every period
//! derives inclusive `[start, end]` date bounds.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reporting period selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ReportPeriod {
    /// Single day (e.g., "2025-06-15")
    Day { date: NaiveDate },

    /// Calendar month (e.g., "2025-06")
    Month { year: i32, month: u32 },

    /// Calendar year (e.g., "2025")
    Year { year: i32 },
}

/// Inclusive date bounds derived from a [`ReportPeriod`]
///
/// Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodBounds {
    /// First day of the period
    pub start: NaiveDate,
    /// Last day of the period (inclusive)
    pub end: NaiveDate,
}

impl PeriodBounds {
    /// Check if a date falls within these bounds
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl ReportPeriod {
    /// Create a day period
    pub fn day(date: NaiveDate) -> Self {
        Self::Day { date }
    }

    /// Create a month period
    pub fn month(year: i32, month: u32) -> Self {
        Self::Month { year, month }
    }

    /// Create a year period
    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// Get the month period containing today
    pub fn current_month() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Derive the inclusive date bounds of this period
    ///
    /// The month end is computed from the first day of the following month
    /// minus one day, which handles leap years and variable month lengths.
    pub fn bounds(&self) -> PeriodBounds {
        match self {
            Self::Day { date } => PeriodBounds {
                start: *date,
                end: *date,
            },
            Self::Month { year, month } => {
                let start = NaiveDate::from_ymd_opt(*year, *month, 1)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(*year, 1, 1).unwrap());
                let next_month = if *month == 12 {
                    NaiveDate::from_ymd_opt(*year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(*year, *month + 1, 1)
                };
                let end = next_month
                    .map(|d| d - Duration::days(1))
                    .unwrap_or(start);
                PeriodBounds { start, end }
            }
            Self::Year { year } => PeriodBounds {
                start: NaiveDate::from_ymd_opt(*year, 1, 1)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()),
                end: NaiveDate::from_ymd_opt(*year, 12, 31)
                    .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 12, 31).unwrap()),
            },
        }
    }

    /// Label used for report titles and artifact filenames
    ///
    /// Same text as `Display`: "2025-06-15", "2025-06" or "2025".
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Day: "2025-06-15"
    /// - Month: "2025-06"
    /// - Year: "2025"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        let parts: Vec<&str> = s.split('-').collect();
        match parts.len() {
            1 => {
                let year: i32 = parts[0]
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                Ok(Self::Year { year })
            }
            2 => {
                let year: i32 = parts[0]
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                let month: u32 = parts[1]
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

                if !(1..=12).contains(&month) {
                    return Err(PeriodParseError::InvalidMonth(month));
                }

                Ok(Self::Month { year, month })
            }
            3 => {
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                Ok(Self::Day { date })
            }
            _ => Err(PeriodParseError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { date } => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
