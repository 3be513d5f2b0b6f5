use cp_card::{
    config::{Settings, UpstreamSettings},
    models::{CardError, FieldValue},
    upstream::{scrape_activity, scrape_profile, HttpProfileFetcher, ProfileFetcher},
};
use httpmock::prelude::*;
use std::time::Duration as StdDuration;

fn upstream_settings(server: &MockServer, timeout_seconds: u64) -> UpstreamSettings {
    UpstreamSettings {
        profile_url_template: format!("{}/users/{{user}}", server.base_url()),
        timeout_seconds,
        ..Settings::default().upstream
    }
}

#[tokio::test]
async fn fetch_returns_body_and_status() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/tourist");
            then.status(200)
                .header("content-type", "text/html")
                .body(r#"<div class="rating-number">3250</div>"#);
        })
        .await;

    let fetcher = HttpProfileFetcher::new(&upstream_settings(&server, 5)).unwrap();
    let page = fetcher.fetch_profile("tourist").await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.status, 200);
    assert_eq!(page.url, format!("{}/users/tourist", server.base_url()));
    assert_eq!(scrape_profile(&page.body).rating, FieldValue::Value("3250".to_string()));
    assert!(scrape_activity(&page.body).is_none());
}

#[tokio::test]
async fn fetch_sends_configured_user_agent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/coder")
                .header("user-agent", "card-test/1.0");
            then.status(200).body("ok");
        })
        .await;

    let settings = UpstreamSettings {
        user_agent: "card-test/1.0".to_string(),
        ..upstream_settings(&server, 5)
    };
    let fetcher = HttpProfileFetcher::new(&settings).unwrap();
    fetcher.fetch_profile("coder").await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/ghost");
            then.status(404).body("not found");
        })
        .await;

    let fetcher = HttpProfileFetcher::new(&upstream_settings(&server, 5)).unwrap();
    let err = fetcher.fetch_profile("ghost").await.unwrap_err();

    match err {
        CardError::UpstreamStatus { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/users/ghost"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/users/slow");
            then.status(200).delay(StdDuration::from_secs(3)).body("late");
        })
        .await;

    let fetcher = HttpProfileFetcher::new(&upstream_settings(&server, 1)).unwrap();
    let err = fetcher.fetch_profile("slow").await.unwrap_err();

    assert!(matches!(err, CardError::UpstreamTimeout { .. }), "got {}", err);
}
