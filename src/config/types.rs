use crate::item::ListingKind;
use serde::Deserialize;

/// Default Hacker News API root
pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com";

/// Main configuration structure for hn-threads
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub client: ClientConfig,
    pub listing: ListingConfig,
    pub render: RenderConfig,
}

/// Item source configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root URL of the API; item paths are joined onto it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Upper bound on item fetches in flight; absent means unbounded
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: Option<usize>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_concurrent_fetches: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(rename = "client-name")]
    pub client_name: String,

    #[serde(rename = "client-version")]
    pub client_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ClientConfig {
    /// Formats the User-Agent header value: `Name/Version`
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.client_name, self.client_version)
    }
}

/// Top-level listing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Listing shown when no id is requested
    pub kind: ListingKind,

    /// Number of listing entries to fetch
    pub limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            kind: ListingKind::Top,
            limit: 25,
        }
    }
}

/// Text rendering configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix added to every line of a child block, once per nesting level
    pub indent: String,

    /// Fail conversion on markup the HTML parser had to repair
    #[serde(rename = "strict-html")]
    pub strict_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            strict_html: false,
        }
    }
}
