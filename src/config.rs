use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

/// Default result count when the caller does not pass max_results.
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Hard cap on max_results; requests above it are clamped, not rejected.
pub const MAX_RESULTS_CAP: usize = 50;
/// DuckDuckGo region when the caller does not pass one ("no region").
pub const DEFAULT_REGION: &str = "wt-wt";
/// Wikipedia language when the caller does not pass one.
pub const DEFAULT_LANG: &str = "en";

pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = "forage/0.1 (search gateway)";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        port: get_env_or_default("PORT", "8000")
            .parse()
            .expect("PORT must be a valid port number"),
        duckduckgo_url: get_env_or_default("DUCKDUCKGO_URL", "https://duckduckgo.com"),
        duckduckgo_html_url: get_env_or_default(
            "DUCKDUCKGO_HTML_URL",
            "https://html.duckduckgo.com/html/",
        ),
        // {lang} is substituted per request; Wikipedia keys its API on the subdomain.
        wikipedia_api_url: get_env_or_default(
            "WIKIPEDIA_API_URL",
            "https://{lang}.wikipedia.org/w/api.php",
        ),
    }
});

pub struct Config {
    pub port: u16,
    pub duckduckgo_url: String,
    pub duckduckgo_html_url: String,
    pub wikipedia_api_url: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
