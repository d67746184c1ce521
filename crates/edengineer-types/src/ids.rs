//! Type-safe identifiers for journal entries and ledger resources.
//!
//! [`EntryId`] wraps a UUID v7 so that entries sort by creation time and
//! can be used as a deduplication key during replay. [`ResourceName`] wraps
//! the display name of a commodity, material, or data artifact and
//! normalizes it so the same logical resource always maps to the same key.

use core::borrow::Borrow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a journal entry.
///
/// The replay driver records every applied [`EntryId`] and refuses to
/// apply the same entry twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EntryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntryId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<EntryId> for Uuid {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

/// The stable identity of a resource in the ledger.
///
/// Construction trims surrounding whitespace and collapses internal runs
/// of whitespace to a single space. Case is preserved: `"Sensor Fragment"`
/// and `"sensor fragment"` are different keys.
///
/// Deserialization goes through the same normalization, so names restored
/// from a snapshot or read from configuration match the names produced by
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourceName(String);

impl ResourceName {
    /// Build a normalized resource name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Borrow the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ResourceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for ResourceName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<ResourceName> for String {
    fn from(name: ResourceName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_ids_are_unique() {
        assert_ne!(EntryId::new(), EntryId::new());
    }

    #[test]
    fn entry_id_display_matches_uuid() {
        let id = EntryId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn resource_name_collapses_whitespace() {
        let name = ResourceName::new("  Modular   Terminals\t");
        assert_eq!(name.as_str(), "Modular Terminals");
        assert_eq!(name, ResourceName::new("Modular Terminals"));
    }

    #[test]
    fn resource_name_preserves_case() {
        assert_ne!(
            ResourceName::new("Sensor Fragment"),
            ResourceName::new("sensor fragment")
        );
    }

    #[test]
    fn resource_name_normalizes_on_deserialize() {
        let name: Result<ResourceName, _> = serde_json::from_str("\" Bromellite  \"");
        assert_eq!(name.ok(), Some(ResourceName::new("Bromellite")));
    }

    #[test]
    fn blank_resource_name_is_empty() {
        assert!(ResourceName::new("   ").is_empty());
    }
}
