//! Sync coordinator: fetch, merge, publish.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use herodex_common::{Character, Result};
use herodex_upstream::Fetcher;

use crate::cache::{CacheSnapshot, SnapshotCache};

/// Coordinates upstream fetches with the snapshot cache.
///
/// Holds the fetcher and cache by reference; both are constructed once at
/// startup and injected.
pub struct CatalogService<F: Fetcher + ?Sized, C: SnapshotCache + ?Sized> {
    fetcher: Arc<F>,
    cache: Arc<C>,
}

impl<F: Fetcher + ?Sized, C: SnapshotCache + ?Sized> CatalogService<F, C> {
    /// Create a new service from an upstream fetcher and a snapshot cache.
    pub fn new(fetcher: Arc<F>, cache: Arc<C>) -> Self {
        Self { fetcher, cache }
    }

    /// Return the identifiers of all known characters, refreshing the
    /// cache with anything modified since the last sync.
    ///
    /// Reads the current snapshot, fetches records modified since its
    /// watermark, merges the returned ids into a copy of the index and
    /// publishes the merged pair. An empty batch returns the existing
    /// index without writing.
    ///
    /// Refreshes are not serialized: two concurrent calls may read the
    /// same snapshot and merge independently, and the later publish
    /// discards the earlier merge.
    ///
    /// # Errors
    /// Propagates the fetch error unchanged; the published snapshot is
    /// left untouched on failure.
    pub async fn list_known_ids(&self) -> Result<Vec<u64>> {
        let snapshot = self.cache.snapshot().await;
        let batch = self.fetcher.fetch_batch(snapshot.watermark).await?;

        let Some(newest) = batch.first() else {
            debug!("no upstream changes since last sync");
            return Ok(sorted_ids(&snapshot.ids));
        };

        // The batch is sorted by descending modification time, so the
        // first record carries the new watermark.
        let watermark = newest.modified_at;

        let mut ids = snapshot.ids;
        ids.extend(batch.iter().map(|record| record.id));

        info!(
            fetched = batch.len(),
            known = ids.len(),
            watermark = %watermark,
            "merged upstream changes"
        );

        let merged = sorted_ids(&ids);
        self.cache
            .publish(CacheSnapshot {
                ids,
                watermark: Some(watermark),
            })
            .await;

        Ok(merged)
    }

    /// Return the public view of a single character.
    ///
    /// Always a live upstream round trip; never served from the cache.
    ///
    /// # Errors
    /// `NotFound` when the upstream has no match, `BadGateway` for other
    /// upstream failures.
    pub async fn get_entity(&self, id: u64) -> Result<Character> {
        let record = self.fetcher.fetch_one(id).await?;
        Ok(record.into())
    }

    /// Rebuild the cache from a full upstream fetch.
    ///
    /// The index is built from scratch, not merged with prior state. An
    /// empty catalog leaves the cache empty and still succeeds. Intended
    /// for process warm-up.
    ///
    /// # Errors
    /// Propagates the fetch error unchanged without publishing.
    pub async fn rebuild_cache(&self) -> Result<()> {
        let batch = self.fetcher.fetch_batch(None).await?;

        let Some(newest) = batch.first() else {
            info!("upstream catalog is empty, cache left untouched");
            return Ok(());
        };

        let watermark = newest.modified_at;
        let ids: HashSet<u64> = batch.iter().map(|record| record.id).collect();

        info!(known = ids.len(), watermark = %watermark, "rebuilt cache");

        self.cache
            .publish(CacheSnapshot {
                ids,
                watermark: Some(watermark),
            })
            .await;

        Ok(())
    }
}

fn sorted_ids(ids: &HashSet<u64>) -> Vec<u64> {
    let mut out: Vec<u64> = ids.iter().copied().collect();
    out.sort_unstable();
    out
}
