use chrono::DateTime;
use reqwest::Url;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::api::models::{EncyclopediaSummary, ImageHit, NewsHit, SearchHit};

/// Wikipedia intro extracts can run long; keep the summary bounded.
const EXTRACT_LIMIT: usize = 1000;

/// Map a DuckDuckGo SERP page into search hits, keeping upstream order.
/// Results without a title or a usable link are dropped.
pub fn search_hits(html: &str, limit: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let result_selector = Selector::parse(".result").unwrap();
    let title_selector = Selector::parse(".result__title a").unwrap();
    let snippet_selector = Selector::parse(".result__snippet").unwrap();

    let mut hits = Vec::new();
    for result in document.select(&result_selector) {
        if hits.len() >= limit {
            break;
        }
        let Some(anchor) = result.select(&title_selector).next() else {
            continue;
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        let url = anchor
            .value()
            .attr("href")
            .map(resolve_result_url)
            .unwrap_or_default();
        if title.is_empty() || url.is_empty() {
            continue;
        }
        let snippet = result
            .select(&snippet_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        hits.push(SearchHit {
            title,
            url,
            snippet,
        });
    }
    hits
}

// SERP links go through a /l/?uddg=<encoded> redirect; unwrap to the target.
fn resolve_result_url(href: &str) -> String {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_string()
    };
    let Ok(url) = Url::parse(&absolute) else {
        return String::new();
    };
    if url.path().starts_with("/l/") {
        if let Some((_, target)) = url.query_pairs().find(|(key, _)| key == "uddg") {
            return target.into_owned();
        }
    }
    absolute
}

/// Map a news.js payload into news hits. The upstream date is epoch seconds;
/// hits keep it as RFC 3339, or omit it when absent.
pub fn news_hits(payload: &Value, limit: usize) -> Vec<NewsHit> {
    let Some(results) = payload["results"].as_array() else {
        return Vec::new();
    };
    results
        .iter()
        .filter_map(|item| {
            let title = non_empty_str(&item["title"])?;
            let url = non_empty_str(&item["url"])?;
            let snippet = item["excerpt"].as_str().unwrap_or_default().to_string();
            let date = item["date"]
                .as_i64()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.to_rfc3339());
            Some(NewsHit {
                title,
                url,
                snippet,
                date,
            })
        })
        .take(limit)
        .collect()
}

/// Map an i.js payload into image hits. All three fields are required;
/// incomplete records are dropped.
pub fn image_hits(payload: &Value, limit: usize) -> Vec<ImageHit> {
    let Some(results) = payload["results"].as_array() else {
        return Vec::new();
    };
    results
        .iter()
        .filter_map(|item| {
            Some(ImageHit {
                title: non_empty_str(&item["title"])?,
                image_url: non_empty_str(&item["image"])?,
                source_url: non_empty_str(&item["url"])?,
            })
        })
        .take(limit)
        .collect()
}

/// Title of the best-ranked article in a MediaWiki search response.
pub fn top_search_title(payload: &Value) -> Option<String> {
    payload["query"]["search"]
        .as_array()?
        .first()
        .and_then(|hit| non_empty_str(&hit["title"]))
}

/// Build the summary from a MediaWiki extracts response. The pages map is
/// keyed by page id, so take whichever single entry came back.
pub fn encyclopedia_summary(payload: &Value, lang: &str) -> Option<EncyclopediaSummary> {
    let pages = payload["query"]["pages"].as_object()?;
    let page = pages.values().next()?;
    let title = non_empty_str(&page["title"])?;
    let extract: String = non_empty_str(&page["extract"])?
        .chars()
        .take(EXTRACT_LIMIT)
        .collect();
    let url = format!(
        "https://{lang}.wikipedia.org/wiki/{}",
        title.replace(' ', "_")
    );
    Some(EncyclopediaSummary {
        title,
        extract,
        url,
        language: lang.to_string(),
    })
}

fn non_empty_str(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SERP_FIXTURE: &str = r##"
        <div class="serp__results">
          <div class="result results_links web-result">
            <h2 class="result__title">
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc123">Rust Programming Language</a>
            </h2>
            <a class="result__snippet" href="#">A language empowering everyone to build reliable software.</a>
          </div>
          <div class="result results_links web-result">
            <h2 class="result__title">
              <a class="result__a" href="https://doc.rust-lang.org/book/">The Rust Book</a>
            </h2>
          </div>
          <div class="result results_links web-result">
            <h2 class="result__title"><a class="result__a" href="https://example.com/empty">   </a></h2>
          </div>
          <div class="result results_links web-result">
            <h2 class="result__title">
              <a class="result__a" href="https://crates.io/">crates.io</a>
            </h2>
            <a class="result__snippet" href="#">The Rust community crate registry.</a>
          </div>
        </div>
    "##;

    #[test]
    fn test_search_hits_unwraps_redirects_and_drops_bad_records() {
        let hits = search_hits(SERP_FIXTURE, 10);
        assert_eq!(hits.len(), 3);

        assert_eq!(hits[0].title, "Rust Programming Language");
        assert_eq!(hits[0].url, "https://www.rust-lang.org/");
        assert_eq!(
            hits[0].snippet,
            "A language empowering everyone to build reliable software."
        );

        // Missing snippet is an empty string, not a dropped record.
        assert_eq!(hits[1].title, "The Rust Book");
        assert_eq!(hits[1].url, "https://doc.rust-lang.org/book/");
        assert_eq!(hits[1].snippet, "");

        // The blank-title result was dropped.
        assert_eq!(hits[2].title, "crates.io");
    }

    #[test]
    fn test_search_hits_respects_limit() {
        assert_eq!(search_hits(SERP_FIXTURE, 2).len(), 2);
        assert!(search_hits(SERP_FIXTURE, 0).is_empty());
    }

    #[test]
    fn test_search_hits_empty_page() {
        assert!(search_hits("<html><body></body></html>", 10).is_empty());
    }

    #[test]
    fn test_resolve_result_url_plain_and_relative() {
        assert_eq!(
            resolve_result_url("https://example.com/a"),
            "https://example.com/a"
        );
        assert_eq!(
            resolve_result_url("/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=zz"),
            "https://example.com/page"
        );
        assert_eq!(resolve_result_url("not a url"), "");
    }

    #[test]
    fn test_news_hits_maps_and_formats_date() {
        let payload = json!({
            "results": [
                {
                    "title": "Rust 2.0 announced",
                    "url": "https://news.example.com/rust",
                    "excerpt": "Big news for systems programmers.",
                    "date": 1717243200
                },
                {
                    "title": "Undated story",
                    "url": "https://news.example.com/undated",
                    "excerpt": ""
                },
                { "title": "No url, dropped" }
            ]
        });

        let hits = news_hits(&payload, 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].date.as_deref(), Some("2024-06-01T12:00:00+00:00"));
        assert_eq!(hits[0].snippet, "Big news for systems programmers.");
        assert_eq!(hits[1].date, None);
    }

    #[test]
    fn test_news_hits_limit_and_malformed_payload() {
        let payload = json!({
            "results": [
                { "title": "a", "url": "https://e.com/1" },
                { "title": "b", "url": "https://e.com/2" },
                { "title": "c", "url": "https://e.com/3" }
            ]
        });
        assert_eq!(news_hits(&payload, 2).len(), 2);
        assert!(news_hits(&json!({ "results": "oops" }), 10).is_empty());
        assert!(news_hits(&json!({}), 10).is_empty());
    }

    #[test]
    fn test_image_hits_requires_all_fields() {
        let payload = json!({
            "results": [
                {
                    "title": "Eiffel Tower",
                    "image": "https://img.example.com/eiffel.jpg",
                    "thumbnail": "https://img.example.com/eiffel_t.jpg",
                    "url": "https://example.com/eiffel",
                    "width": 1024
                },
                { "title": "No image field", "url": "https://example.com/x" }
            ]
        });

        let hits = image_hits(&payload, 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Eiffel Tower");
        assert_eq!(hits[0].image_url, "https://img.example.com/eiffel.jpg");
        assert_eq!(hits[0].source_url, "https://example.com/eiffel");
    }

    #[test]
    fn test_top_search_title() {
        let payload = json!({
            "query": { "search": [ { "title": "Paris" }, { "title": "Paris Commune" } ] }
        });
        assert_eq!(top_search_title(&payload).as_deref(), Some("Paris"));
        assert_eq!(top_search_title(&json!({ "query": { "search": [] } })), None);
        assert_eq!(top_search_title(&json!({})), None);
    }

    #[test]
    fn test_encyclopedia_summary_builds_article_url() {
        let payload = json!({
            "query": { "pages": { "22989": {
                "pageid": 22989,
                "title": "Rust (programming language)",
                "extract": "Rust is a general-purpose programming language."
            } } }
        });

        let summary = encyclopedia_summary(&payload, "en").unwrap();
        assert_eq!(summary.title, "Rust (programming language)");
        assert_eq!(
            summary.url,
            "https://en.wikipedia.org/wiki/Rust_(programming_language)"
        );
        assert_eq!(summary.language, "en");
        assert!(!summary.extract.is_empty());
    }

    #[test]
    fn test_encyclopedia_summary_truncates_extract() {
        let long = "a".repeat(EXTRACT_LIMIT + 500);
        let payload = json!({
            "query": { "pages": { "1": { "title": "Long", "extract": long } } }
        });
        let summary = encyclopedia_summary(&payload, "en").unwrap();
        assert_eq!(summary.extract.chars().count(), EXTRACT_LIMIT);
    }

    #[test]
    fn test_encyclopedia_summary_missing_extract_is_no_result() {
        let payload = json!({
            "query": { "pages": { "-1": { "title": "Missing", "missing": "" } } }
        });
        assert!(encyclopedia_summary(&payload, "en").is_none());
        assert!(encyclopedia_summary(&json!({}), "en").is_none());
    }
}
