use chrono::{Local, NaiveDate};

use crate::models::{CardError, Result};

/// Source of "today" for request handling. Core functions never read the
/// system clock themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Local calendar day of the host
    System,
    Fixed(NaiveDate),
}

impl Clock {
    /// `Fixed` for a `YYYY-MM-DD` argument, `System` when none is given
    pub fn from_arg(date: Option<&str>) -> Result<Self> {
        match date {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(Clock::Fixed)
                .map_err(|e| CardError::InvalidDate(format!("{}: {}", raw, e))),
            None => Ok(Clock::System),
        }
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}
