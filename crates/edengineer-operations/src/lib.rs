//! Journal operations for the EDEngineer ledger.
//!
//! Every journal event that changes the player's inventory becomes a
//! [`JournalOperation`]: an immutable, side-effect-free descriptor that knows
//! how to apply itself to the ledger [`State`](edengineer_ledger::State).
//!
//! # Modules
//!
//! - [`operation`] -- The [`JournalOperation`] sum type and its dispatch.
//! - [`leaf`] -- [`CargoOperation`], [`MaterialOperation`], [`DataOperation`].
//! - [`engineer`] -- The [`EngineerContributionOperation`] composite and
//!   [`Resolution`].
//! - [`registry`] -- The [`EngineerRegistry`] lookup table.
//!
//! # Usage
//!
//! ```
//! use edengineer_ledger::State;
//! use edengineer_operations::{EngineerContributionOperation, JournalOperation, MaterialOperation};
//! use edengineer_types::{JournalEvent, ResourceKind};
//!
//! let mut state = State::new();
//!
//! let collected: JournalOperation =
//!     MaterialOperation::new("Sensor Fragment", 10, JournalEvent::MaterialCollected).into();
//! collected.mutate(&mut state);
//!
//! // Professor Palin takes 25 Sensor Fragments; the holding clamps at zero.
//! let palin: JournalOperation = EngineerContributionOperation::new("Professor Palin").into();
//! palin.mutate(&mut state);
//!
//! assert_eq!(state.quantity(ResourceKind::Material, "Sensor Fragment"), 0);
//! ```

pub mod engineer;
pub mod leaf;
pub mod operation;
pub mod registry;

// Re-export primary types at crate root.
pub use engineer::{EngineerContributionOperation, Resolution};
pub use leaf::{CargoOperation, DataOperation, MaterialOperation};
pub use operation::JournalOperation;
pub use registry::{EngineerRegistry, RegistryBuilder};

use edengineer_types::JournalEvent;

/// Errors raised while building an [`EngineerRegistry`].
///
/// Applying operations never fails; only registry construction is
/// validated.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// An engineer name was empty or whitespace.
    #[error("engineer name must not be empty")]
    EmptyEngineerName,

    /// The same engineer was registered twice in one builder.
    #[error("engineer registered more than once: {0}")]
    DuplicateEngineer(String),

    /// A registry entry was itself an engineer contribution.
    #[error("registry entry for {engineer} must be a leaf operation, not a composite")]
    NestedComposite {
        /// The offending engineer.
        engineer: String,
    },

    /// A registry entry named no resource.
    #[error("registry entry for {engineer} names an empty resource")]
    EmptyResourceName {
        /// The offending engineer.
        engineer: String,
    },

    /// A registry entry would add to the ledger rather than consume from it.
    #[error("registry entry for {engineer} must consume a resource, got size {size}")]
    NonConsuming {
        /// The offending engineer.
        engineer: String,
        /// The non-negative size found.
        size: i32,
    },

    /// An extension registry tried to replace a built-in engineer.
    #[error("{engineer} is a built-in engineer and cannot be replaced")]
    ReplacesStandard {
        /// The offending engineer.
        engineer: String,
    },

    /// A registry entry carried the wrong journal classification.
    #[error("registry entry for {engineer} must be tagged EngineerContribution, got {found}")]
    WrongClassification {
        /// The offending engineer.
        engineer: String,
        /// The classification found.
        found: JournalEvent,
    },
}
