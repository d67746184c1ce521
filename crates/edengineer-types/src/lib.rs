//! Shared type definitions for the EDEngineer journal ledger.
//!
//! This crate is the single source of truth for the types that flow between
//! the ledger, the operation model, and the replay driver.
//!
//! # Modules
//!
//! - [`ids`] -- [`EntryId`] and the normalized [`ResourceName`] key
//! - [`enums`] -- [`JournalEvent`] classification and [`ResourceKind`] partitions
//! - [`structs`] -- The typed [`JournalEntry`] record and its [`EntryChange`]

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{JournalEvent, ResourceKind};
pub use ids::{EntryId, ResourceName};
pub use structs::{EntryChange, JournalEntry};
