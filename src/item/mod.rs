//! Item module for the Hacker News data model
//!
//! This module defines the records served by the item source.
//!
//! # Components
//!
//! - `Item`: A single story, comment, job or poll with its ordered child ids
//! - `ItemKind`: The `type` tag of an item
//! - `ListingKind`: Which top-level listing endpoint to read

mod listing;
mod types;

// Re-export main types
pub use listing::ListingKind;
pub use types::{Item, ItemKind};

/// Identifier of a Hacker News item
pub type ItemId = u64;
