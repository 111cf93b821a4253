//! In-memory item source
//!
//! Serves a fixed set of items, optionally delaying or failing individual ids.
//! It also records how many fetches were in flight at once. Only tests use it,
//! to exercise the engine's ordering and concurrency guarantees without a
//! network; the CLI always reads from `HttpItemSource`.

use crate::item::{Item, ItemId, ListingKind};
use crate::source::ItemSource;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Item source over a fixed map of items
#[derive(Debug, Default)]
pub struct StaticItemSource {
    items: HashMap<ItemId, Item>,
    listings: HashMap<ListingKind, Vec<ItemId>>,
    delays: HashMap<ItemId, Duration>,
    failures: HashSet<ItemId>,
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StaticItemSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, replacing any item with the same id
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub fn with_items(self, items: impl IntoIterator<Item = Item>) -> Self {
        items.into_iter().fold(self, Self::with_item)
    }

    pub fn with_listing(mut self, kind: ListingKind, ids: Vec<ItemId>) -> Self {
        self.listings.insert(kind, ids);
        self
    }

    /// Delays every fetch of `id` by `delay`
    pub fn with_delay(mut self, id: ItemId, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    /// Makes every fetch of `id` fail with HTTP 503 after its delay
    pub fn with_failure(mut self, id: ItemId) -> Self {
        self.failures.insert(id);
        self
    }

    /// Number of item fetches started so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of item fetches currently running
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of item fetches that ran at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

/// Keeps the in-flight counter right even when a fetch is dropped mid-way
struct InFlightGuard<'a> {
    counter: &'a AtomicUsize,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemSource for StaticItemSource {
    async fn fetch_item(&self, id: ItemId) -> Result<Item, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard {
            counter: &self.in_flight,
        };

        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }

        if self.failures.contains(&id) {
            return Err(FetchError::Status {
                url: format!("memory://item/{}", id),
                status: 503,
            });
        }

        self.items.get(&id).cloned().ok_or(FetchError::NotFound)
    }

    async fn fetch_listing(&self, kind: ListingKind) -> Result<Vec<ItemId>, FetchError> {
        self.listings.get(&kind).cloned().ok_or(FetchError::NotFound)
    }
}
