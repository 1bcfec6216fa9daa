use reqwest::Client;
use serde_json::Value;

use crate::error::UpstreamError;

/// Outbound client for DuckDuckGo's unofficial endpoints: the HTML SERP for
/// text search and the news.js / i.js JSON endpoints for news and images.
pub struct DuckDuckGoClient {
    http: Client,
    base_url: String,
    html_url: String,
}

impl DuckDuckGoClient {
    pub fn new(http: Client, base_url: String, html_url: String) -> DuckDuckGoClient {
        DuckDuckGoClient {
            http,
            base_url,
            html_url,
        }
    }

    /// Raw SERP HTML for a text search.
    pub async fn text(&self, query: &str, region: &str) -> Result<String, UpstreamError> {
        log::info!("duckduckgo text search: {query}");
        let res = self
            .http
            .get(&self.html_url)
            .query(&[("q", query), ("kl", region)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(UpstreamError::Status(res.status().as_u16()));
        }
        Ok(res.text().await?)
    }

    /// Raw news payload, as returned by news.js.
    pub async fn news(&self, query: &str) -> Result<Value, UpstreamError> {
        log::info!("duckduckgo news search: {query}");
        let vqd = self.vqd(query).await?;
        self.fetch_json("news.js", query, &vqd).await
    }

    /// Raw image payload, as returned by i.js.
    pub async fn images(&self, query: &str) -> Result<Value, UpstreamError> {
        log::info!("duckduckgo image search: {query}");
        let vqd = self.vqd(query).await?;
        self.fetch_json("i.js", query, &vqd).await
    }

    // The JSON endpoints refuse requests without the vqd token embedded in
    // the homepage served for the same query.
    async fn vqd(&self, query: &str) -> Result<String, UpstreamError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", query)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(UpstreamError::Status(res.status().as_u16()));
        }
        let body = res.text().await?;
        extract_vqd(&body).ok_or_else(|| UpstreamError::Payload("vqd token not found".into()))
    }

    async fn fetch_json(
        &self,
        endpoint: &str,
        query: &str,
        vqd: &str,
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .get(&url)
            .query(&[("o", "json"), ("q", query), ("vqd", vqd)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(UpstreamError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }
}

/// The token appears as vqd="...", vqd='...' or vqd=...& depending on which
/// variant of the page DuckDuckGo serves.
fn extract_vqd(body: &str) -> Option<String> {
    let start = body.find("vqd=")? + "vqd=".len();
    let rest = &body[start..];
    let token = match rest.as_bytes().first()? {
        b'"' => rest[1..].split('"').next()?,
        b'\'' => rest[1..].split('\'').next()?,
        _ => rest.split(['&', '"', '\'', ';']).next()?,
    };
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::extract_vqd;

    #[test]
    fn test_extract_vqd_double_quoted() {
        let body = r#"<script>var x = {vqd="4-123456789"};</script>"#;
        assert_eq!(extract_vqd(body).as_deref(), Some("4-123456789"));
    }

    #[test]
    fn test_extract_vqd_single_quoted() {
        let body = "nrj('/d.js?q=rust&vqd='4-987'&l=wt-wt')";
        assert_eq!(extract_vqd(body).as_deref(), Some("4-987"));
    }

    #[test]
    fn test_extract_vqd_bare_in_query_string() {
        let body = "/i.js?q=rust&vqd=4-555&o=json";
        assert_eq!(extract_vqd(body).as_deref(), Some("4-555"));
    }

    #[test]
    fn test_extract_vqd_missing() {
        assert_eq!(extract_vqd("<html><body>nothing here</body></html>"), None);
        assert_eq!(extract_vqd(r#"vqd="""#), None);
    }
}
