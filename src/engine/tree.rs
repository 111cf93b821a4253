//! Concurrent tree rendering
//!
//! Rendering a node fetches it, converts its body, and renders every child
//! the same way through `fan_out`, so each level of the thread loads in
//! parallel and every child task finishes inside its parent's call.

use crate::engine::{fan_out, Engine};
use crate::item::ItemId;
use crate::render::{assemble_subtree, header_block};
use crate::HnError;
use futures::future::{BoxFuture, FutureExt};

impl Engine {
    /// Fetches an item and its entire reply tree and renders it as nested text
    ///
    /// Children appear in the order of the item's `kids`, each block indented
    /// one level deeper than its parent. Any failure anywhere in the tree fails
    /// the whole call; nothing partial is returned.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The rendered subtree
    /// * `Err(HnError::Fetch)` / `Err(HnError::Conversion)` - The root itself failed
    /// * `Err(HnError::Aggregate)` - A descendant failed; the chain names each
    ///   level down to the failing item
    pub async fn render_tree(&self, root: ItemId) -> Result<String, HnError> {
        tracing::info!(item_id = root, "Rendering thread");
        let rendered = self.render_subtree(root).await?;
        tracing::debug!(item_id = root, bytes = rendered.len(), "Thread rendered");
        Ok(rendered)
    }

    fn render_subtree(&self, id: ItemId) -> BoxFuture<'static, Result<String, HnError>> {
        let engine = self.clone();

        async move {
            let item = engine.load_item(id).await?;

            let body = engine
                .renderer
                .convert(item.raw_text())
                .map_err(|source| HnError::Conversion { id, source })?;
            let header = header_block(&item, &body);

            // Leaves need no fan-out at all
            if item.is_leaf() {
                return Ok(header);
            }

            tracing::trace!(item_id = id, children = item.kids.len(), "Loading replies");
            let child_engine = engine.clone();
            let children = fan_out(&item.kids, &engine.cancel, move |kid| {
                child_engine.render_subtree(kid)
            })
            .await?;

            Ok(assemble_subtree(header, &children, &engine.indent))
        }
        .boxed()
    }
}
