pub mod handler;

use axum::{routing::get, Router};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    card::{CardBuilder, Clock},
    config::Settings,
    models::Result,
    upstream::ProfileFetcher,
};

pub use handler::{CardQuery, SVG_CONTENT_TYPE, TEXT_CONTENT_TYPE};

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub builder: Arc<CardBuilder>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(settings: Settings, fetcher: Arc<dyn ProfileFetcher>, clock: Clock) -> Self {
        let builder = CardBuilder::new(fetcher, &settings);
        Self {
            settings: Arc::new(settings),
            builder: Arc::new(builder),
            clock,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::card))
        .route("/api/card", get(handler::card))
        .with_state(state)
}

/// Bind `host:port` and serve until Ctrl-C
pub async fn serve(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.settings.server.host, state.settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. If the handler cannot be installed the
/// server keeps running instead of stopping immediately.
async fn wait_for_shutdown<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
