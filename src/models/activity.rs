use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Daily activity counts keyed by local calendar day.
///
/// Absent dates count as zero. The map is built once (from scraped data or the
/// fallback generator) and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMap {
    days: BTreeMap<NaiveDate, u32>,
}

impl ActivityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> u32 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    /// Number of distinct days with a non-zero count
    pub fn active_days(&self) -> usize {
        self.days.values().filter(|&&count| count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.days.values().map(|&count| count as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Entries in date order
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.days.iter().map(|(date, count)| (*date, *count))
    }
}

impl FromIterator<(NaiveDate, u32)> for ActivityMap {
    /// Duplicate dates are summed.
    fn from_iter<I: IntoIterator<Item = (NaiveDate, u32)>>(iter: I) -> Self {
        let mut days = BTreeMap::new();
        for (date, count) in iter {
            let entry = days.entry(date).or_insert(0u32);
            *entry = entry.saturating_add(count);
        }
        Self { days }
    }
}
