//! Fetcher trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use herodex_common::{CharacterRecord, Result};

/// Capability trait for retrieving character data from the upstream source.
///
/// One production implementation exists (`ApiClient`); test doubles
/// substitute for it in the catalog service tests.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch all characters modified since the optional cutoff.
    ///
    /// With `modified_since` absent, fetches the entire catalog. The
    /// returned records are sorted by descending modification time across
    /// the first page; the first element is guaranteed to be the most
    /// recently modified record in the whole result set.
    ///
    /// # Errors
    /// - `Transport` on network failure
    /// - `Decode` on a malformed upstream payload
    /// - `NotFound` / `BadGateway` mapped from upstream statuses
    ///
    /// A failure on any page aborts the whole batch; no partial result is
    /// returned.
    async fn fetch_batch(
        &self,
        modified_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<CharacterRecord>>;

    /// Fetch a single character by id.
    ///
    /// # Errors
    /// - `NotFound` when the upstream reports no match
    /// - `BadGateway` for any other non-success upstream status
    async fn fetch_one(&self, id: u64) -> Result<CharacterRecord>;
}
