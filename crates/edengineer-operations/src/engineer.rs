//! The engineer contribution composite.
//!
//! Handing resources to an engineer is recorded in the journal with only
//! the engineer's name. What the contribution costs depends on who the
//! engineer is, so the composite resolves the name against an
//! [`EngineerRegistry`] when it is built and delegates to whatever it
//! captured.

use edengineer_ledger::State;

use crate::operation::JournalOperation;
use crate::registry::EngineerRegistry;

/// How an engineer name resolved against the registry.
///
/// Both [`Resolution::NoEffect`] and [`Resolution::Unregistered`] leave the
/// ledger untouched, but they are different outcomes: the first is a known
/// engineer whose contributions cost nothing we track, the second is a name
/// the registry has never heard of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The name maps to a leaf operation with an inventory effect.
    Registered,
    /// The name maps to an explicit [`JournalOperation::NoOperation`].
    NoEffect,
    /// The name is not in the registry.
    Unregistered,
}

/// A contribution to a named engineer.
///
/// Holds no mutation logic of its own: [`mutate`](Self::mutate) forwards to
/// the captured operation, or does nothing when the name was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineerContributionOperation {
    engineer: String,
    operation: Option<Box<JournalOperation>>,
}

impl EngineerContributionOperation {
    /// Resolve `engineer` against the standard registry.
    pub fn new(engineer: impl Into<String>) -> Self {
        Self::with_registry(engineer, EngineerRegistry::standard())
    }

    /// Resolve `engineer` against `registry`.
    pub fn with_registry(engineer: impl Into<String>, registry: &EngineerRegistry) -> Self {
        let engineer = engineer.into();
        let operation = registry.get(&engineer).cloned().map(Box::new);
        Self {
            engineer,
            operation,
        }
    }

    /// The engineer name as supplied by the journal.
    pub fn engineer(&self) -> &str {
        &self.engineer
    }

    /// The operation captured at construction, if the name was registered.
    pub fn operation(&self) -> Option<&JournalOperation> {
        self.operation.as_deref()
    }

    /// How the name resolved.
    pub fn resolution(&self) -> Resolution {
        match self.operation.as_deref() {
            None => Resolution::Unregistered,
            Some(JournalOperation::NoOperation) => Resolution::NoEffect,
            Some(_) => Resolution::Registered,
        }
    }

    /// Delegate to the captured operation.
    pub fn mutate(&self, state: &mut State) {
        match self.operation.as_deref() {
            Some(JournalOperation::NoOperation) => {
                tracing::debug!(engineer = %self.engineer, "Engineer contribution has no inventory effect");
            }
            Some(operation) => operation.mutate(state),
            None => {
                tracing::warn!(
                    engineer = %self.engineer,
                    "Unregistered engineer contribution ignored"
                );
            }
        }
    }
}
