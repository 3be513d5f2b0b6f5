use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::{
    config::{UpstreamSettings, USER_PLACEHOLDER},
    models::{CardError, Result},
    upstream::{FetchedPage, ProfileFetcher},
};

/// Fetches profile pages over HTTPS with a single bounded attempt
pub struct HttpProfileFetcher {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpProfileFetcher {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| CardError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: profile_base_url(&settings.profile_url_template)?,
        })
    }

    /// The template's base with the username appended as one encoded path segment
    pub fn profile_url(&self, username: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(username);
        }
        url
    }

    fn map_send_error(url: &str, error: reqwest::Error) -> CardError {
        if error.is_timeout() {
            CardError::UpstreamTimeout { url: url.to_string() }
        } else {
            CardError::HttpError(error)
        }
    }
}

/// Parse everything before the trailing `{user}` placeholder of a profile URL template
pub fn profile_base_url(template: &str) -> Result<Url> {
    let base = template.strip_suffix(USER_PLACEHOLDER).ok_or_else(|| {
        CardError::ConfigError(format!(
            "Profile URL template must end with {}, got {}",
            USER_PLACEHOLDER, template
        ))
    })?;

    let url = Url::parse(base)
        .map_err(|e| CardError::ConfigError(format!("Invalid profile URL template {}: {}", template, e)))?;
    if url.cannot_be_a_base() {
        return Err(CardError::ConfigError(format!(
            "Profile URL template {} has no path to append to",
            template
        )));
    }

    Ok(url)
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch_profile(&self, username: &str) -> Result<FetchedPage> {
        let url = self.profile_url(username);
        let url_text = url.to_string();
        debug!("Fetching upstream profile {}", url_text);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&url_text, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CardError::UpstreamStatus {
                status: status.as_u16(),
                url: url_text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::map_send_error(&url_text, e))?;

        Ok(FetchedPage {
            url: url_text,
            status: status.as_u16(),
            body,
        })
    }
}
