//! Character types shared between the upstream client and the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A character record as retrieved from the upstream catalog.
///
/// Immutable once retrieved; `modified_at` is the upstream's last
/// modification time and drives the sync watermark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Upstream identifier.
    pub id: u64,
    /// Character name.
    pub name: String,
    /// Free-form description (may be empty).
    pub description: String,
    /// Last modification time reported by the upstream.
    pub modified_at: DateTime<Utc>,
}

/// Public view of a character, as served to API consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub description: String,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_view_drops_modification_time() {
        let record = CharacterRecord {
            id: 1011334,
            name: "3-D Man".to_string(),
            description: String::new(),
            modified_at: Utc::now(),
        };

        let view = Character::from(record.clone());
        assert_eq!(view.id, record.id);
        assert_eq!(view.name, record.name);
        assert_eq!(view.description, record.description);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("modified"));
    }
}
