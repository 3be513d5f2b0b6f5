//! Best-effort extraction of profile numbers and daily activity from the
//! upstream profile HTML. Every pattern is optional; a miss yields
//! `FieldValue::Unavailable` or `None`, never an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ActivityMap, FieldValue, ProfileFields};

static RATING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)class="rating-number"[^>]*>\s*(\d+)"#).expect("valid rating pattern")
});

static HIGHEST_RATING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Highest\s+Rating\s*:?\s*(\d+)").expect("valid highest rating pattern")
});

static GLOBAL_RANK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)href="/ratings/all"[^>]*>\s*<strong>\s*(\d+)\s*</strong>"#)
        .expect("valid global rank pattern")
});

static COUNTRY_RANK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)href="/ratings/all\?filterBy=Country[^"]*"[^>]*>\s*<strong>\s*(\d+)\s*</strong>"#)
        .expect("valid country rank pattern")
});

static DAILY_STATS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)userDailySubmissionsStats\s*=\s*\[(.*?)\]").expect("valid daily stats pattern")
});

static DAILY_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""date"\s*:\s*"(\d{4})-(\d{1,2})-(\d{1,2})"\s*,\s*"value"\s*:\s*"?(\d+)"?"#)
        .expect("valid daily entry pattern")
});

fn capture<'h>(re: &Regex, html: &'h str) -> Option<&'h str> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn scrape_profile(html: &str) -> ProfileFields {
    ProfileFields {
        rating: FieldValue::from_match(capture(&RATING_RE, html)),
        highest_rating: FieldValue::from_match(capture(&HIGHEST_RATING_RE, html)),
        global_rank: FieldValue::from_match(capture(&GLOBAL_RANK_RE, html)),
        country_rank: FieldValue::from_match(capture(&COUNTRY_RANK_RE, html)),
    }
}

/// Daily submission counts embedded in the page's inline script.
///
/// Returns `None` when the stats array is missing or holds no parseable entry.
pub fn scrape_activity(html: &str) -> Option<ActivityMap> {
    let stats = capture(&DAILY_STATS_RE, html)?;

    let entries: Vec<(NaiveDate, u32)> = DAILY_ENTRY_RE
        .captures_iter(stats)
        .filter_map(|caps| {
            let year: i32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            let day: u32 = caps[3].parse().ok()?;
            let count: u32 = caps[4].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, count))
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries.into_iter().collect())
    }
}
