//! Engine module for concurrent item loading and rendering
//!
//! This module contains the core fetch logic, including:
//! - The ordered fan-out/fan-in primitive every concurrent load goes through
//! - Recursive, concurrent rendering of a whole comment tree
//! - Concurrent loading of a flat top-level listing
//! - Cancellation and the optional bound on fetches in flight

mod fan_out;
mod listing;
mod tree;

pub use fan_out::{fan_out, FetchResult};

use crate::config::Config;
use crate::item::{Item, ItemId};
use crate::render::{MarkdownRenderer, TextRenderer};
use crate::source::{HttpItemSource, ItemSource};
use crate::HnError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Fetches and renders items from an item source
///
/// Cloning is cheap: every clone shares the same source, renderer, fetch bound
/// and cancellation token. Each concurrent task works on its own clone.
///
/// Concurrency is unbounded unless `with_max_concurrent_fetches` is given a
/// limit: a tree fans out one task per child at every level, so a very wide or
/// deep thread launches as many tasks as it has comments.
#[derive(Clone)]
pub struct Engine {
    source: Arc<dyn ItemSource>,
    renderer: Arc<dyn TextRenderer>,
    indent: Arc<str>,
    fetch_limit: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
}

impl Engine {
    /// Creates an engine with tab indentation, no fetch bound and a fresh
    /// cancellation token
    pub fn new(source: Arc<dyn ItemSource>, renderer: Arc<dyn TextRenderer>) -> Self {
        Self {
            source,
            renderer,
            indent: Arc::from("\t"),
            fetch_limit: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Creates an engine reading the HTTP API described by the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Engine)` - Ready to render listings and trees
    /// * `Err(HnError::Client)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, HnError> {
        let source = HttpItemSource::from_config(config)?;
        let renderer = MarkdownRenderer::new(config.render.strict_html);

        Ok(Self::new(Arc::new(source), Arc::new(renderer))
            .with_indent(config.render.indent.as_str())
            .with_max_concurrent_fetches(config.api.max_concurrent_fetches))
    }

    /// Sets the prefix added per nesting level to child blocks
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = Arc::from(indent);
        self
    }

    /// Caps the number of item fetches running at once; `None` removes the cap
    ///
    /// The permit covers a single item fetch only, never a child fan-out, so a
    /// tree deeper than the limit still completes. The limit is clamped to
    /// `1..=Semaphore::MAX_PERMITS`.
    pub fn with_max_concurrent_fetches(mut self, limit: Option<usize>) -> Self {
        self.fetch_limit = limit
            .map(|n| Arc::new(Semaphore::new(n.clamp(1, Semaphore::MAX_PERMITS))));
        self
    }

    /// Replaces the cancellation token that governs every fetch of this engine
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the token that cancels all in-flight work of this engine
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Fetches one item, honouring the fetch bound and cancellation
    pub(crate) async fn load_item(&self, id: ItemId) -> Result<Item, HnError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(HnError::Cancelled { id }),
            result = self.fetch_bounded(id) => result,
        }
    }

    async fn fetch_bounded(&self, id: ItemId) -> Result<Item, HnError> {
        let _permit = match &self.fetch_limit {
            Some(semaphore) => Some(semaphore.acquire().await.map_err(|e| {
                HnError::TaskFailed {
                    id,
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        tracing::debug!(item_id = id, "Fetching item");
        self.source
            .fetch_item(id)
            .await
            .map_err(|source| HnError::Fetch { id, source })
    }
}
