use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::fmt;

use super::ActivityMap;

/// Shown wherever a scraped field could not be matched
pub const UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Value(String),
    Unavailable,
}

impl FieldValue {
    pub fn from_match(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => FieldValue::Value(v.to_string()),
            _ => FieldValue::Unavailable,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Value(v) => v.as_str(),
            FieldValue::Unavailable => UNAVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FieldValue::Value(_))
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Unavailable
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub rating: FieldValue,
    pub highest_rating: FieldValue,
    pub global_rank: FieldValue,
    pub country_rank: FieldValue,
}

impl ProfileFields {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn available_count(&self) -> usize {
        [&self.rating, &self.highest_rating, &self.global_rank, &self.country_rank]
            .iter()
            .filter(|f| f.is_available())
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivitySource {
    Scraped,
    Fallback,
}

impl ActivitySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivitySource::Scraped => "scraped",
            ActivitySource::Fallback => "fallback",
        }
    }
}

/// Everything the renderer needs for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCard {
    pub username: String,
    pub fields: ProfileFields,
    pub activity: ActivityMap,
    pub source: ActivitySource,
    pub today: NaiveDate,
}

impl ProfileCard {
    /// Uppercased first character of the username, used for the avatar
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}
