//! Snapshot cache for the character index and sync watermark.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// The atomically-published pair of (identifier index, watermark).
///
/// The watermark is the `modified_at` of the most recently modified record
/// ever merged into the index; `None` until the first non-empty sync. The
/// index only grows over the cache's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    /// Known character identifiers.
    pub ids: HashSet<u64>,
    /// Most recent modification time observed across all merged records.
    pub watermark: Option<DateTime<Utc>>,
}

/// Capability trait for the snapshot cache.
///
/// Readers always observe an (index, watermark) pair from a single
/// publish; the two halves are never mixed across writes.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Return the currently published snapshot.
    async fn snapshot(&self) -> CacheSnapshot;

    /// Atomically replace the published snapshot. The previous pair is
    /// discarded, not merged (last writer wins).
    async fn publish(&self, snapshot: CacheSnapshot);
}

/// In-memory snapshot cache.
///
/// Process-lifetime only; nothing is persisted. Multiple concurrent
/// readers are permitted, a writer excludes all readers and other writers
/// for the duration of the swap.
pub struct InMemoryCache {
    inner: RwLock<CacheSnapshot>,
}

impl InMemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheSnapshot::default()),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotCache for InMemoryCache {
    async fn snapshot(&self) -> CacheSnapshot {
        self.inner.read().await.clone()
    }

    async fn publish(&self, snapshot: CacheSnapshot) {
        *self.inner.write().await = snapshot;
    }
}
