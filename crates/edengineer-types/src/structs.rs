//! Typed journal records consumed by the replay driver.
//!
//! A [`JournalEntry`] is what remains of a journal line after the parsing
//! layer has classified it: an identifier, a timestamp, the event
//! classification, and the inventory change the event describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{JournalEvent, ResourceKind};
use crate::ids::EntryId;

/// One journal event, already parsed and classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Deduplication key.
    pub id: EntryId,
    /// When the game wrote the event.
    pub timestamp: DateTime<Utc>,
    /// Classification of the event.
    pub event: JournalEvent,
    /// The inventory change this event describes.
    #[serde(default)]
    pub change: EntryChange,
}

impl JournalEntry {
    /// Build an entry with a fresh [`EntryId`].
    pub fn new(timestamp: DateTime<Utc>, event: JournalEvent, change: EntryChange) -> Self {
        Self {
            id: EntryId::new(),
            timestamp,
            event,
            change,
        }
    }
}

/// The inventory change carried by a [`JournalEntry`].
///
/// Sizes are signed deltas: positive values add to the holding, negative
/// values remove from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryChange {
    /// The event has no inventory effect.
    #[default]
    None,
    /// A change to a cargo commodity.
    Cargo {
        /// Commodity display name.
        commodity: String,
        /// Signed quantity delta.
        size: i32,
    },
    /// A change to a material.
    Material {
        /// Material display name.
        material: String,
        /// Signed quantity delta.
        size: i32,
    },
    /// A change to a data artifact.
    Data {
        /// Data display name.
        data: String,
        /// Signed quantity delta.
        size: i32,
    },
    /// A contribution handed to a named engineer; the effect is looked up
    /// in the engineer registry.
    EngineerContribution {
        /// The engineer's name as written in the journal.
        engineer: String,
    },
}

impl EntryChange {
    /// The partition this change targets, if it names one directly.
    ///
    /// Engineer contributions return `None`: their target is only known
    /// once the engineer has been resolved.
    pub const fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Cargo { .. } => Some(ResourceKind::Commodity),
            Self::Material { .. } => Some(ResourceKind::Material),
            Self::Data { .. } => Some(ResourceKind::Data),
            Self::None | Self::EngineerContribution { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_uses_kind_tag() {
        let change = EntryChange::Cargo {
            commodity: String::from("Bromellite"),
            size: 4,
        };
        let json = serde_json::to_value(&change).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "kind": "cargo", "commodity": "Bromellite", "size": 4 }))
        );
    }

    #[test]
    fn entry_without_change_defaults_to_none() {
        let raw = r#"{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "timestamp": "2024-05-01T12:00:00Z",
            "event": "MaterialDiscovered"
        }"#;
        let entry: Result<JournalEntry, _> = serde_json::from_str(raw);
        assert!(entry.is_ok());
        assert_eq!(entry.ok().map(|e| e.change), Some(EntryChange::None));
    }

    #[test]
    fn engineer_contribution_parses() {
        let raw = r#"{ "kind": "engineer_contribution", "engineer": "Ram Tah" }"#;
        let change: Result<EntryChange, _> = serde_json::from_str(raw);
        assert_eq!(
            change.ok(),
            Some(EntryChange::EngineerContribution {
                engineer: String::from("Ram Tah"),
            })
        );
    }

    #[test]
    fn resource_kind_of_changes() {
        let data = EntryChange::Data {
            data: String::from("Decoded Emission Data"),
            size: 3,
        };
        assert_eq!(data.resource_kind(), Some(ResourceKind::Data));
        assert_eq!(EntryChange::None.resource_kind(), None);
    }
}
