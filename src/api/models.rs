use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageHit {
    pub title: String,
    pub image_url: String,
    pub source_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EncyclopediaSummary {
    pub title: String,
    pub extract: String,
    pub url: String,
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub region: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<NewsHit>,
}

#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<ImageHit>,
}

#[derive(Debug, Serialize)]
pub struct EncyclopediaResponse {
    pub query: String,
    pub lang: String,
    pub result: EncyclopediaSummary,
}
