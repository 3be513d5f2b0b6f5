use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    heatmap::generate_fallback_activity,
    models::{ActivitySource, CardError, ProfileCard, ProfileFields, Result},
    upstream::{scrape_activity, scrape_profile, ProfileFetcher},
};

/// Turns a username into a fully populated `ProfileCard`.
///
/// Upstream failures never escape: a failed fetch yields unavailable fields
/// and fallback activity.
pub struct CardBuilder {
    fetcher: Arc<dyn ProfileFetcher>,
    min_active_days: usize,
}

impl CardBuilder {
    pub fn new(fetcher: Arc<dyn ProfileFetcher>, settings: &Settings) -> Self {
        Self {
            fetcher,
            min_active_days: settings.heatmap.min_active_days,
        }
    }

    pub async fn build(&self, username: &str, today: NaiveDate) -> ProfileCard {
        info!("Building card for user: {}", username);

        let html = match self.fetcher.fetch_profile(username).await {
            Ok(page) => {
                debug!("Fetched {} ({} bytes, status {})", page.url, page.body.len(), page.status);
                Some(page.body)
            }
            Err(e) => {
                warn!("Failed to fetch profile for {}: {}", username, e);
                None
            }
        };

        let card = assemble_card(username, html.as_deref(), today, self.min_active_days);

        info!(
            "Card for {} uses {} activity ({} active days, {} profile fields)",
            username,
            card.source.as_str(),
            card.activity.active_days(),
            card.fields.available_count()
        );

        card
    }
}

/// Trim a username taken from user input, rejecting one that is blank
pub fn normalize_username(raw: &str) -> Result<&str> {
    match raw.trim() {
        "" => Err(CardError::MissingUser),
        username => Ok(username),
    }
}

/// Scrape `html` when present and substitute fallback activity if the scraped
/// map is missing or has fewer than `min_active_days` active days.
pub fn assemble_card(
    username: &str,
    html: Option<&str>,
    today: NaiveDate,
    min_active_days: usize,
) -> ProfileCard {
    let fields = html.map(scrape_profile).unwrap_or_else(ProfileFields::unavailable);

    let scraped = html
        .and_then(scrape_activity)
        .filter(|activity| activity.active_days() >= min_active_days);

    let (activity, source) = match scraped {
        Some(activity) => (activity, ActivitySource::Scraped),
        None => (
            generate_fallback_activity(username, today),
            ActivitySource::Fallback,
        ),
    };

    ProfileCard {
        username: username.to_string(),
        fields,
        activity,
        source,
        today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;
    use crate::upstream::{FetchedPage, OfflineFetcher};
    use async_trait::async_trait;

    struct StaticFetcher {
        body: String,
    }

    #[async_trait]
    impl ProfileFetcher for StaticFetcher {
        async fn fetch_profile(&self, username: &str) -> Result<FetchedPage> {
            Ok(FetchedPage {
                url: format!("https://example.test/users/{}", username),
                status: 200,
                body: self.body.clone(),
            })
        }
    }

    struct TimeoutFetcher;

    #[async_trait]
    impl ProfileFetcher for TimeoutFetcher {
        async fn fetch_profile(&self, username: &str) -> Result<FetchedPage> {
            Err(CardError::UpstreamTimeout {
                url: format!("https://example.test/users/{}", username),
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn page_with_days(days: u32) -> String {
        let entries: Vec<String> = (1..=days)
            .map(|d| format!(r#"{{"date":"2024-6-{}","value":2}}"#, d))
            .collect();
        format!(
            r#"<div class="rating-number">1650</div><script>userDailySubmissionsStats = [{}];</script>"#,
            entries.join(",")
        )
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back() {
        let builder = CardBuilder::new(Arc::new(TimeoutFetcher), &Settings::default());
        let card = builder.build("testuser123", today()).await;

        assert_eq!(card.source, ActivitySource::Fallback);
        assert_eq!(card.fields, ProfileFields::unavailable());
        assert_eq!(card.activity, generate_fallback_activity("testuser123", today()));
    }

    #[tokio::test]
    async fn test_offline_fetcher_falls_back() {
        let builder = CardBuilder::new(Arc::new(OfflineFetcher), &Settings::default());
        let card = builder.build("someone", today()).await;
        assert_eq!(card.source, ActivitySource::Fallback);
    }

    #[tokio::test]
    async fn test_enough_scraped_days_are_used() {
        let fetcher = StaticFetcher { body: page_with_days(10) };
        let builder = CardBuilder::new(Arc::new(fetcher), &Settings::default());
        let card = builder.build("coder", today()).await;

        assert_eq!(card.source, ActivitySource::Scraped);
        assert_eq!(card.activity.active_days(), 10);
        assert_eq!(card.fields.rating, FieldValue::Value("1650".to_string()));
    }

    #[test]
    fn test_sparse_scraped_activity_is_replaced() {
        let html = page_with_days(4);
        let card = assemble_card("coder", Some(&html), today(), 5);

        assert_eq!(card.source, ActivitySource::Fallback);
        // Profile fields still come from the page
        assert_eq!(card.fields.rating, FieldValue::Value("1650".to_string()));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let html = page_with_days(5);
        let card = assemble_card("coder", Some(&html), today(), 5);
        assert_eq!(card.source, ActivitySource::Scraped);
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  tourist\t").unwrap(), "tourist");
        assert!(matches!(normalize_username(" \n "), Err(CardError::MissingUser)));
        assert!(matches!(normalize_username(""), Err(CardError::MissingUser)));
    }
}
