pub mod client;
pub mod http;
pub mod scrape;

pub use client::{FetchedPage, OfflineFetcher, ProfileFetcher};
pub use http::{profile_base_url, HttpProfileFetcher};
pub use scrape::{scrape_activity, scrape_profile};
