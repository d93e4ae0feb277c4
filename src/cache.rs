//! Single-flight catalog cache
//!
//! Serves the full field-definition catalog, fetching it from the metadata
//! source at most once no matter how many resolutions arrive concurrently.
//! All callers that find a fetch in flight join it and observe its one
//! outcome. A failed fetch clears the slot instead of poisoning it, so the
//! next lookup retries.

use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tracing::{debug, warn};

use crate::catalog::{FieldDefinition, MetadataSource};
use crate::error::CatalogFetchError;

type CatalogResult = Result<Arc<Vec<FieldDefinition>>, CatalogFetchError>;
type PendingFetch = Shared<BoxFuture<'static, CatalogResult>>;

enum Slot {
    Empty,
    Fetching(PendingFetch),
    Ready(Arc<Vec<FieldDefinition>>),
}

/// Lazily fetched, explicitly invalidatable catalog handle
pub struct CatalogCache {
    source: Arc<dyn MetadataSource>,
    // Never held across an await; readers see Empty, Fetching or Ready,
    // never a half-initialized state.
    slot: Mutex<Slot>,
}

impl CatalogCache {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            source,
            slot: Mutex::new(Slot::Empty),
        }
    }

    /// Returns the cached catalog, joining the in-flight fetch or starting
    /// the one new fetch when nothing is cached yet.
    pub async fn catalog(&self) -> CatalogResult {
        let pending = {
            let mut slot = self.slot.lock().expect("catalog slot lock");
            match &*slot {
                Slot::Ready(catalog) => return Ok(Arc::clone(catalog)),
                Slot::Fetching(fetch) => fetch.clone(),
                Slot::Empty => {
                    debug!("Field catalog not cached, starting fetch");
                    let source = Arc::clone(&self.source);
                    let fetch = async move {
                        source
                            .fetch_field_catalog()
                            .await
                            .map(Arc::new)
                            .map_err(CatalogFetchError::new)
                    }
                    .boxed()
                    .shared();
                    *slot = Slot::Fetching(fetch.clone());
                    fetch
                }
            }
        };

        let outcome = pending.clone().await;

        let mut slot = self.slot.lock().expect("catalog slot lock");
        // Only settle the slot if it still holds this attempt; an invalidate
        // that raced with completion must not be overwritten.
        if let Slot::Fetching(current) = &*slot {
            if current.ptr_eq(&pending) {
                match &outcome {
                    Ok(catalog) => {
                        debug!("Cached field catalog with {} definitions", catalog.len());
                        *slot = Slot::Ready(Arc::clone(catalog));
                    }
                    Err(error) => {
                        warn!("Field catalog fetch failed, will retry on next lookup: {}", error);
                        *slot = Slot::Empty;
                    }
                }
            }
        }

        outcome
    }

    /// Clears the cache in both the cached and in-flight cases; the next
    /// lookup triggers a fresh fetch. Waiters already joined to an in-flight
    /// fetch still receive that fetch's outcome.
    pub fn invalidate(&self) {
        debug!("Field catalog cache invalidated");
        *self.slot.lock().expect("catalog slot lock") = Slot::Empty;
    }
}
