//! Ordered fan-out/fan-in
//!
//! Runs one task per id and collects the outcomes back into declaration
//! order. Every task reports exactly once, and the coordinator always drains
//! every report before it looks at errors, so no task is left behind when an
//! early sibling fails.

use crate::item::ItemId;
use crate::HnError;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Outcome of one unit of work, tagged with its launch position
#[derive(Debug)]
pub struct FetchResult<T> {
    /// Position of the id in the input, fixed at launch
    pub index: usize,
    pub id: ItemId,
    pub outcome: Result<T, HnError>,
}

/// Runs `work` for every id concurrently and returns the values in id order
///
/// # Behavior
///
/// - An empty `ids` returns `Ok(vec![])` without spawning anything
/// - Tasks live in a `JoinSet` owned by this call; none outlives it
/// - Completion order never affects output order
/// - When any unit fails, the failure at the lowest position is returned as
///   `HnError::Aggregate` after all units have reported; other values are
///   discarded
/// - Cancelling `cancel` ends pending units with `HnError::Cancelled`
///
/// # Arguments
///
/// * `ids` - The ordered work descriptors
/// * `cancel` - Token observed by every unit
/// * `work` - Produces the future for one id
pub async fn fan_out<T, F, Fut>(
    ids: &[ItemId],
    cancel: &CancellationToken,
    mut work: F,
) -> Result<Vec<T>, HnError>
where
    T: Send + 'static,
    F: FnMut(ItemId) -> Fut,
    Fut: Future<Output = Result<T, HnError>> + Send + 'static,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let count = ids.len();
    // Capacity for every report, so a send never waits on the coordinator
    let (tx, mut rx) = mpsc::channel::<FetchResult<T>>(count);
    let mut tasks = JoinSet::new();

    for (index, &id) in ids.iter().enumerate() {
        let tx = tx.clone();
        let cancel = cancel.clone();
        let unit = work(id);

        tasks.spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(HnError::Cancelled { id }),
                result = unit => result,
            };
            // The receiver is alive until every report is in
            let _ = tx.send(FetchResult { index, id, outcome }).await;
        });
    }
    drop(tx);

    tracing::trace!(units = count, "Fan-out launched");

    let mut slots: Vec<Option<Result<T, HnError>>> = (0..count).map(|_| None).collect();
    let mut received = 0;
    while received < count {
        match rx.recv().await {
            Some(report) => {
                slots[report.index] = Some(report.outcome);
                received += 1;
            }
            // Every sender is gone: a unit panicked before reporting
            None => break,
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Fan-out task ended abnormally: {}", e);
        }
    }

    let mut values = Vec::with_capacity(count);
    for (index, (slot, &id)) in slots.into_iter().zip(ids).enumerate() {
        let error = match slot {
            Some(Ok(value)) => {
                values.push(value);
                continue;
            }
            Some(Err(e)) => e,
            None => HnError::TaskFailed {
                id,
                message: "task exited without reporting a result".to_string(),
            },
        };
        return Err(HnError::Aggregate {
            index,
            id,
            source: Box::new(error),
        });
    }

    Ok(values)
}
