use reqwest::Client;
use serde_json::Value;

use crate::error::UpstreamError;

/// Outbound client for the MediaWiki action API. The language picks the
/// subdomain, so the configured endpoint carries a {lang} placeholder.
pub struct WikipediaClient {
    http: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(http: Client, api_url: String) -> WikipediaClient {
        WikipediaClient { http, api_url }
    }

    fn endpoint(&self, lang: &str) -> String {
        self.api_url.replace("{lang}", lang)
    }

    /// Full-text article search, first page of up to five hits.
    pub async fn search(&self, query: &str, lang: &str) -> Result<Value, UpstreamError> {
        log::info!("wikipedia search ({lang}): {query}");
        self.fetch(
            lang,
            &[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", "5"),
                ("format", "json"),
            ],
        )
        .await
    }

    /// Plain-text intro extract for one article title.
    pub async fn extract(&self, title: &str, lang: &str) -> Result<Value, UpstreamError> {
        self.fetch(
            lang,
            &[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
            ],
        )
        .await
    }

    async fn fetch(&self, lang: &str, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let res = self
            .http
            .get(self.endpoint(lang))
            .query(params)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(UpstreamError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }
}
