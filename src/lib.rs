//! hn-threads: concurrent Hacker News thread reader
//!
//! This crate fetches a story and its whole comment tree from the Hacker News
//! API, loading every node of the tree concurrently, and renders the result as
//! nested plain text in the order the API declares.

pub mod config;
pub mod engine;
pub mod item;
pub mod render;
pub mod source;

use thiserror::Error;

pub use item::ItemId;

/// Main error type for hn-threads operations
#[derive(Debug, Error)]
pub enum HnError {
    #[error("HTTP client error")]
    Client(#[from] reqwest::Error),

    #[error("fetch item {id}")]
    Fetch { id: ItemId, source: FetchError },

    #[error("fetch listing")]
    Listing(#[source] FetchError),

    #[error("convert text of item {id}")]
    Conversion { id: ItemId, source: ConversionError },

    /// A concurrent sub-operation failed; carries the lowest-position failure
    #[error("item {id} (position {index})")]
    Aggregate {
        index: usize,
        id: ItemId,
        source: Box<HnError>,
    },

    #[error("item {id}: cancelled")]
    Cancelled { id: ItemId },

    #[error("item {id}: task failed: {message}")]
    TaskFailed { id: ItemId, message: String },
}

impl HnError {
    /// Returns the innermost error, following `Aggregate` wrappers down the tree
    pub fn root_cause(&self) -> &HnError {
        match self {
            HnError::Aggregate { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns true if this error (or the failure it wraps) came from cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root_cause(), HnError::Cancelled { .. })
    }
}

/// Errors returned by an item source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("connection failed for {url}")]
    Connect { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("item not found")]
    NotFound,

    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Errors returned by a text renderer
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("malformed markup: {0}")]
    Malformed(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

// Re-export commonly used types
pub use config::Config;
pub use engine::Engine;
pub use item::{Item, ItemKind, ListingKind};
pub use render::{MarkdownRenderer, TextRenderer};
pub use source::{HttpItemSource, ItemSource, StaticItemSource};
