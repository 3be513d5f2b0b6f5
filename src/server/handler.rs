use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, warn};

use crate::{models::CardError, render::render_card_svg};
use super::AppState;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Debug, Default)]
pub struct CardQuery {
    pub user: Option<String>,
}

impl CardQuery {
    /// First non-blank `user` among the decoded query pairs; other keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let user = pairs
            .into_iter()
            .filter(|(key, _)| key == "user")
            .map(|(_, value)| value)
            .find(|value| !value.trim().is_empty());
        Self { user }
    }

    /// Trimmed username, `None` when missing or blank
    pub fn username(&self) -> Option<&str> {
        self.user.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// `GET /?user=<name>`: the profile card as SVG.
///
/// The only failure is a missing `user`; upstream problems are absorbed by
/// the card builder. Pairs are decoded leniently so repeated keys or stray
/// escapes never reject the request.
pub async fn card(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = CardQuery::from_pairs(pairs);
    let Some(username) = query.username() else {
        warn!("Rejected card request without a user parameter");
        return (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
            CardError::MissingUser.to_string(),
        )
            .into_response();
    };

    let today = state.clock.today();
    let card = state.builder.build(username, today).await;
    let svg = render_card_svg(&card, state.settings.grid_geometry());
    let etag = format!("\"{:x}\"", md5::compute(svg.as_bytes()));

    let cache_control = state.settings.cache_control();

    if etag_matches(&headers, &etag) {
        debug!("Card for {} unchanged, answering 304", username);
        return (
            StatusCode::NOT_MODIFIED,
            [(header::CACHE_CONTROL, cache_control), (header::ETAG, etag)],
        )
            .into_response();
    }

    info!("Rendered card for {} ({} bytes)", username, svg.len());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, cache_control),
            (header::ETAG, etag),
        ],
        svg,
    )
        .into_response()
}

/// Weak comparison of `If-None-Match` against the current tag
fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_trimmed() {
        let query = CardQuery { user: Some("  tourist \n".to_string()) };
        assert_eq!(query.username(), Some("tourist"));
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_first_non_blank_user_wins() {
        let query = CardQuery::from_pairs(pairs(&[("user", "alice"), ("user", "bob")]));
        assert_eq!(query.username(), Some("alice"));

        let query = CardQuery::from_pairs(pairs(&[("user", " "), ("theme", "dark"), ("user", "bob")]));
        assert_eq!(query.username(), Some("bob"));

        let query = CardQuery::from_pairs(pairs(&[("username", "alice"), ("user", "")]));
        assert_eq!(query.username(), None);
    }

    #[test]
    fn test_if_none_match_comparison() {
        let etag = "\"abc\"";
        let mut headers = HeaderMap::new();
        assert!(!etag_matches(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, "\"other\", W/\"abc\"".parse().unwrap());
        assert!(etag_matches(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, "\"other\"".parse().unwrap());
        assert!(!etag_matches(&headers, etag));

        headers.insert(header::IF_NONE_MATCH, "*".parse().unwrap());
        assert!(etag_matches(&headers, etag));
    }

    #[test]
    fn test_blank_username_is_missing() {
        assert_eq!(CardQuery { user: Some("   ".to_string()) }.username(), None);
        assert_eq!(CardQuery::default().username(), None);
    }
}
