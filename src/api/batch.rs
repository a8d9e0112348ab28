//! Bounded, order-preserving hydration of id sequences.

use crate::api::{HnApi, Item};
use futures::stream::{self, StreamExt};

/// The first failure of a batch, by request position.
#[derive(Debug, thiserror::Error)]
#[error("fetch item id={id} (position {index})")]
pub struct BatchError {
    pub index: usize,
    pub id: u64,
    #[source]
    pub source: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct Batch {
    /// Same length and order as the requested ids. Failed slots are `None`.
    pub items: Vec<Option<Item>>,
    pub error: Option<BatchError>,
}

impl Batch {
    pub fn into_present(self) -> (Vec<Item>, Option<BatchError>) {
        let items = self.items.into_iter().flatten().collect();
        (items, self.error)
    }
}

/// Fetches every id with at most `cap` requests in flight.
///
/// A failed fetch neither cancels nor delays the others. The call returns once
/// every fetch has settled, reporting the error of the lowest failing index.
pub async fn fetch_many<A: HnApi>(api: &A, ids: &[u64], cap: usize) -> Batch {
    if ids.is_empty() {
        return Batch::default();
    }
    let cap = cap.max(1);

    let mut slots: Vec<Option<Item>> = vec![None; ids.len()];
    let mut first_error: Option<BatchError> = None;

    let mut settled = stream::iter(ids.iter().copied().enumerate())
        .map(|(index, id)| async move { (index, id, api.fetch_item(id).await) })
        .buffer_unordered(cap);

    while let Some((index, id, res)) = settled.next().await {
        match res {
            Ok(item) => slots[index] = Some(item),
            Err(source) => {
                tracing::warn!(id, index, "item fetch failed: {source:#}");
                if first_error.as_ref().map_or(true, |e| index < e.index) {
                    first_error = Some(BatchError { index, id, source });
                }
            }
        }
    }

    Batch {
        items: slots,
        error: first_error,
    }
}
