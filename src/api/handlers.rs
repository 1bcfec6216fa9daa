use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;

use crate::config;
use crate::error::ApiError;
use crate::normalizer;

use super::AppState;
use super::models::{
    EncyclopediaResponse, ImagesResponse, NewsResponse, SearchResponse,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    max_results: Option<i64>,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    q: Option<String>,
    max_results: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ImagesParams {
    q: Option<String>,
    max_results: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WikipediaParams {
    q: Option<String>,
    lang: Option<String>,
}

pub async fn index_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "forage search gateway",
        "engine": "DuckDuckGo + Wikipedia",
        "endpoints": {
            "/search": "general web search (?q=...&max_results=10&region=wt-wt)",
            "/news": "news search (?q=...&max_results=10)",
            "/images": "image search (?q=...&max_results=10)",
            "/wikipedia": "encyclopedia summary (?q=...&lang=en)",
        },
        "examples": [
            "/search?q=python+tutorial",
            "/news?q=artificial+intelligence",
            "/images?q=eiffel+tower",
            "/wikipedia?q=Paris&lang=fr",
        ],
    }))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = require_query(params.q.as_deref())?;
    let limit = bound_max_results(params.max_results);
    let region = params
        .region
        .unwrap_or_else(|| config::DEFAULT_REGION.to_string());

    let results = if limit == 0 {
        Vec::new()
    } else {
        let html = state.duckduckgo.text(&query, &region).await?;
        normalizer::search_hits(&html, limit)
    };

    Ok(Json(SearchResponse {
        count: results.len(),
        query,
        region,
        results,
    }))
}

pub async fn news_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> Result<Json<NewsResponse>, ApiError> {
    let query = require_query(params.q.as_deref())?;
    let limit = bound_max_results(params.max_results);

    let results = if limit == 0 {
        Vec::new()
    } else {
        let payload = state.duckduckgo.news(&query).await?;
        normalizer::news_hits(&payload, limit)
    };

    Ok(Json(NewsResponse {
        count: results.len(),
        query,
        results,
    }))
}

pub async fn images_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImagesParams>,
) -> Result<Json<ImagesResponse>, ApiError> {
    let query = require_query(params.q.as_deref())?;
    let limit = bound_max_results(params.max_results);

    let results = if limit == 0 {
        Vec::new()
    } else {
        let payload = state.duckduckgo.images(&query).await?;
        normalizer::image_hits(&payload, limit)
    };

    Ok(Json(ImagesResponse {
        count: results.len(),
        query,
        results,
    }))
}

pub async fn wikipedia_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WikipediaParams>,
) -> Result<Json<EncyclopediaResponse>, ApiError> {
    let query = require_query(params.q.as_deref())?;
    let lang = params
        .lang
        .unwrap_or_else(|| config::DEFAULT_LANG.to_string());

    let search = state.wikipedia.search(&query, &lang).await?;
    let title = normalizer::top_search_title(&search).ok_or(ApiError::NoArticle)?;
    let extract = state.wikipedia.extract(&title, &lang).await?;
    let summary = normalizer::encyclopedia_summary(&extract, &lang).ok_or(ApiError::NoArticle)?;

    Ok(Json(EncyclopediaResponse {
        query,
        lang,
        result: summary,
    }))
}

fn require_query(q: Option<&str>) -> Result<String, ApiError> {
    match q.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q.to_string()),
        _ => Err(ApiError::Validation(
            "query parameter 'q' must be present and non-empty".to_string(),
        )),
    }
}

// Clamp into what the providers will serve; 0 is allowed and means "none".
fn bound_max_results(requested: Option<i64>) -> usize {
    requested
        .unwrap_or(config::DEFAULT_MAX_RESULTS as i64)
        .clamp(0, config::MAX_RESULTS_CAP as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_query_trims() {
        assert_eq!(require_query(Some("  rust  ")).unwrap(), "rust");
        assert!(require_query(Some("   ")).is_err());
        assert!(require_query(Some("")).is_err());
        assert!(require_query(None).is_err());
    }

    #[test]
    fn test_bound_max_results_defaults_and_clamps() {
        assert_eq!(bound_max_results(None), config::DEFAULT_MAX_RESULTS);
        assert_eq!(bound_max_results(Some(5)), 5);
        assert_eq!(bound_max_results(Some(0)), 0);
        assert_eq!(bound_max_results(Some(-3)), 0);
        assert_eq!(bound_max_results(Some(9999)), config::MAX_RESULTS_CAP);
    }
}
