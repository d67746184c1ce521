//! The closed set of journal operations.
//!
//! A [`JournalOperation`] is an immutable descriptor of one intended
//! ledger mutation. It is built fresh for every journal entry, applied once
//! with [`JournalOperation::mutate`], and dropped. Building an operation has
//! no side effects; applying it twice applies the effect twice, so callers
//! are responsible for at-most-once application per entry.

use edengineer_ledger::State;
use edengineer_types::{EntryChange, JournalEntry, JournalEvent, ResourceKind, ResourceName};

use crate::engineer::EngineerContributionOperation;
use crate::leaf::{CargoOperation, DataOperation, MaterialOperation};
use crate::registry::EngineerRegistry;

/// One ledger mutation.
///
/// Dispatch is an exhaustive `match`, so a new resource category is a
/// compile-time-checked change in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalOperation {
    /// No inventory effect.
    NoOperation,
    /// Adjust a cargo commodity.
    Cargo(CargoOperation),
    /// Adjust a material.
    Material(MaterialOperation),
    /// Adjust a data artifact.
    Data(DataOperation),
    /// Delegate to the operation registered for an engineer.
    EngineerContribution(EngineerContributionOperation),
}

impl JournalOperation {
    /// Build the operation for a typed journal entry.
    ///
    /// Leaf changes are tagged with the entry's classification. Engineer
    /// contributions are resolved against `registry`; their leaf carries the
    /// classification it was registered with.
    pub fn from_entry(entry: &JournalEntry, registry: &EngineerRegistry) -> Self {
        match &entry.change {
            EntryChange::None => Self::NoOperation,
            EntryChange::Cargo { commodity, size } => {
                Self::Cargo(CargoOperation::new(commodity, *size, entry.event))
            }
            EntryChange::Material { material, size } => {
                Self::Material(MaterialOperation::new(material, *size, entry.event))
            }
            EntryChange::Data { data, size } => {
                Self::Data(DataOperation::new(data, *size, entry.event))
            }
            EntryChange::EngineerContribution { engineer } => Self::EngineerContribution(
                EngineerContributionOperation::with_registry(engineer.as_str(), registry),
            ),
        }
    }

    /// Apply this operation to the ledger.
    pub fn mutate(&self, state: &mut State) {
        match self {
            Self::NoOperation => {}
            Self::Cargo(op) => op.mutate(state),
            Self::Material(op) => op.mutate(state),
            Self::Data(op) => op.mutate(state),
            Self::EngineerContribution(op) => op.mutate(state),
        }
    }

    /// The classification carried by this operation.
    ///
    /// `None` for [`JournalOperation::NoOperation`]. A composite reports the
    /// classification of its captured leaf, or
    /// [`JournalEvent::EngineerContribution`] when nothing was captured.
    pub fn journal_event(&self) -> Option<JournalEvent> {
        match self {
            Self::NoOperation => None,
            Self::Cargo(op) => Some(op.journal_event),
            Self::Material(op) => Some(op.journal_event),
            Self::Data(op) => Some(op.journal_event),
            Self::EngineerContribution(op) => Some(
                op.operation()
                    .and_then(Self::journal_event)
                    .unwrap_or(JournalEvent::EngineerContribution),
            ),
        }
    }

    /// The partition and resource this operation adjusts, if any.
    pub fn resource(&self) -> Option<(ResourceKind, &ResourceName)> {
        match self {
            Self::NoOperation => None,
            Self::Cargo(op) => Some((CargoOperation::KIND, op.resource())),
            Self::Material(op) => Some((MaterialOperation::KIND, op.resource())),
            Self::Data(op) => Some((DataOperation::KIND, op.resource())),
            Self::EngineerContribution(op) => op.operation().and_then(Self::resource),
        }
    }

    /// The signed delta this operation applies, if any.
    pub fn size(&self) -> Option<i32> {
        match self {
            Self::NoOperation => None,
            Self::Cargo(op) => Some(op.size),
            Self::Material(op) => Some(op.size),
            Self::Data(op) => Some(op.size),
            Self::EngineerContribution(op) => op.operation().and_then(Self::size),
        }
    }

    /// Whether this is the composite engineer operation.
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::EngineerContribution(_))
    }
}

impl From<CargoOperation> for JournalOperation {
    fn from(op: CargoOperation) -> Self {
        Self::Cargo(op)
    }
}

impl From<MaterialOperation> for JournalOperation {
    fn from(op: MaterialOperation) -> Self {
        Self::Material(op)
    }
}

impl From<DataOperation> for JournalOperation {
    fn from(op: DataOperation) -> Self {
        Self::Data(op)
    }
}

impl From<EngineerContributionOperation> for JournalOperation {
    fn from(op: EngineerContributionOperation) -> Self {
        Self::EngineerContribution(op)
    }
}
