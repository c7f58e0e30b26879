//! Wire-format models for the upstream catalog API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use herodex_common::{CharacterRecord, Error};

/// Timestamp format used by the upstream API (e.g. `2014-04-29T14:18:17-0400`).
pub const UPSTREAM_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Response envelope returned by the upstream for every successful call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Page,
}

/// One page of results inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Offset of this page within the full result set.
    #[serde(default)]
    pub offset: usize,
    /// Requested page size.
    #[serde(default)]
    pub limit: usize,
    /// Total number of results across all pages.
    pub total: usize,
    /// Number of results in this page.
    #[serde(default)]
    pub count: usize,
    pub results: Vec<ApiCharacter>,
}

/// A character as it appears on the wire.
///
/// `modified` is a fixed-format timestamp string; parsing into a
/// `CharacterRecord` happens at the decode boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCharacter {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub modified: String,
}

/// Error body returned by the upstream on non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl TryFrom<ApiCharacter> for CharacterRecord {
    type Error = Error;

    fn try_from(raw: ApiCharacter) -> Result<Self, Error> {
        let modified_at = DateTime::parse_from_str(&raw.modified, UPSTREAM_TIME_FORMAT)
            .map_err(|e| Error::Decode(format!("invalid modified timestamp {:?}: {}", raw.modified, e)))?
            .with_timezone(&Utc);

        Ok(CharacterRecord {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            modified_at,
        })
    }
}
