//! Inventory ledger for the EDEngineer journal replay.
//!
//! The ledger tracks how much of every cargo commodity, material, and data
//! artifact the player currently holds. It is rebuilt by replaying journal
//! events in order; each event becomes an operation that adjusts one
//! holding by a signed delta.
//!
//! # Architecture
//!
//! - [`state`] -- The [`State`] struct: three partitions and the clamped
//!   read-modify-write used by every operation.
//! - [`snapshot`] -- [`Snapshot`] checkpoints for resuming a session.
//!
//! # Clamp-to-zero
//!
//! Holdings are never negative. A delta that would drive a quantity below
//! zero stores zero instead and reports [`Clamp::Floor`] in the returned
//! [`Adjustment`]. Clamping is order-sensitive:
//!
//! ```
//! use edengineer_ledger::State;
//! use edengineer_types::{ResourceKind, ResourceName};
//!
//! let mut state = State::new();
//! let fragment = ResourceName::new("Sensor Fragment");
//!
//! state.adjust_material(&fragment, -5);
//! state.adjust_material(&fragment, 8);
//!
//! // The unclamped sum would be 3.
//! assert_eq!(state.quantity(ResourceKind::Material, "Sensor Fragment"), 8);
//! ```

pub mod snapshot;
pub mod state;

// Re-export primary types at crate root.
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
pub use state::{Adjustment, Clamp, Partition, State};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when saving or restoring the ledger.
///
/// Mutating the ledger never fails; only snapshot I/O does.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Snapshot JSON could not be encoded or decoded.
    #[error("snapshot serialization failed: {source}")]
    Serialization {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Reading or writing the snapshot failed.
    #[error("snapshot I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The snapshot was written by an incompatible format version.
    #[error("unsupported snapshot version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
}
