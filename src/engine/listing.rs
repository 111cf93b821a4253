//! Concurrent listing loads
//!
//! A listing is the non-recursive case of the tree load: one flat fan-out
//! over the listing ids, each unit a single item fetch.

use crate::engine::{fan_out, Engine};
use crate::item::{Item, ItemId, ListingKind};
use crate::HnError;

impl Engine {
    /// Fetches every id concurrently and returns the items in input order
    ///
    /// Children are not expanded. If any fetch fails the error of the first
    /// failing position is returned and the fetched items are discarded.
    pub async fn render_listing(&self, ids: &[ItemId]) -> Result<Vec<Item>, HnError> {
        tracing::debug!(count = ids.len(), "Loading listing items");
        let engine = self.clone();
        fan_out(ids, &self.cancel, move |id| {
            let engine = engine.clone();
            async move { engine.load_item(id).await }
        })
        .await
    }

    /// Reads a top-level listing and loads its first `limit` items
    pub async fn load_listing(&self, kind: ListingKind, limit: usize) -> Result<Vec<Item>, HnError> {
        tracing::info!(listing = %kind, limit, "Loading listing");

        let mut ids = self
            .source
            .fetch_listing(kind)
            .await
            .map_err(HnError::Listing)?;
        ids.truncate(limit);

        self.render_listing(&ids).await
    }
}
