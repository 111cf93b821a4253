//! Item source trait
//!
//! The engine calls a source from many tasks at once, so implementations must
//! be shareable across threads and keep no mutable state between calls.

use crate::item::{Item, ItemId, ListingKind};
use crate::FetchError;
use async_trait::async_trait;

/// A remote store of items
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetches a single item by id
    ///
    /// # Returns
    ///
    /// * `Ok(Item)` - The item as served
    /// * `Err(FetchError::NotFound)` - The source has no such item
    /// * `Err(FetchError)` - Transport or decoding failure
    async fn fetch_item(&self, id: ItemId) -> Result<Item, FetchError>;

    /// Fetches the ordered ids of a top-level listing
    async fn fetch_listing(&self, kind: ListingKind) -> Result<Vec<ItemId>, FetchError>;
}
