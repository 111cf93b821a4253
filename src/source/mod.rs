//! Item source module
//!
//! This module contains everything that talks to the place items come from:
//! - The `ItemSource` trait consumed by the engine
//! - An HTTP implementation for the Hacker News API
//! - An in-memory implementation with injectable delays and failures

mod http;
mod memory;
mod traits;

pub use http::{build_http_client, HttpItemSource};
pub use memory::StaticItemSource;
pub use traits::ItemSource;
