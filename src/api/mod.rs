use axum::{Router, routing::get};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{self, CONFIG};
use crate::duckduckgo::DuckDuckGoClient;
use crate::wikipedia::WikipediaClient;

pub mod handlers;
pub mod models;

/// Read-only per-process state shared by every request: the two upstream
/// clients over one connection pool.
pub struct AppState {
    pub duckduckgo: DuckDuckGoClient,
    pub wikipedia: WikipediaClient,
}

impl AppState {
    pub fn new() -> anyhow::Result<AppState> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config::REQUEST_TIMEOUT_SECS))
            .user_agent(config::USER_AGENT)
            .build()?;

        Ok(AppState {
            duckduckgo: DuckDuckGoClient::new(
                http.clone(),
                CONFIG.duckduckgo_url.clone(),
                CONFIG.duckduckgo_html_url.clone(),
            ),
            wikipedia: WikipediaClient::new(http, CONFIG.wikipedia_api_url.clone()),
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/search", get(handlers::search_handler))
        .route("/news", get(handlers::news_handler))
        .route("/images", get(handlers::images_handler))
        .route("/wikipedia", get(handlers::wikipedia_handler))
        .with_state(state)
        .layer(cors)
}
