use async_trait::async_trait;

use crate::models::{CardError, Result};

/// Raw response from the upstream profile page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch the public profile page for `username`.
    ///
    /// Implementations make a single attempt. A non-2xx status is an error.
    async fn fetch_profile(&self, username: &str) -> Result<FetchedPage>;
}

/// Fetcher used when the network must not be touched
#[derive(Debug, Clone, Default)]
pub struct OfflineFetcher;

#[async_trait]
impl ProfileFetcher for OfflineFetcher {
    async fn fetch_profile(&self, _username: &str) -> Result<FetchedPage> {
        Err(CardError::UpstreamDisabled)
    }
}
