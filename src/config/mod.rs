//! Configuration module for hn-threads
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section and key is optional; a missing file means all defaults.
//!
//! # Example
//!
//! ```no_run
//! use hn_threads::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("hn-threads.toml")).unwrap();
//! println!("Listing limit: {}", config.listing.limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, ClientConfig, Config, ListingConfig, RenderConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, MAX_LISTING_LIMIT};
