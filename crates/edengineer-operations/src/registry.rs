//! The engineer registry: engineer name to contribution operation.
//!
//! The registry is data, not behavior. It is built once and read through
//! shared references from then on. [`EngineerRegistry::standard`] returns
//! the built-in table. It lives in a `LazyLock`, so it is built on the
//! first call and never mutated after; hosts that want it ready before the
//! first journal entry call `standard()` during startup.
//! Hosts that know about engineers the table predates build their own
//! registry with [`EngineerRegistry::builder`] and add it to the standard
//! one with [`EngineerRegistry::standard_with`]. Built-in entries cannot be
//! replaced that way.
//!
//! Every entry is either an explicit [`JournalOperation::NoOperation`] or a
//! single leaf that *consumes* a resource (negative size) and is tagged
//! [`JournalEvent::EngineerContribution`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use edengineer_types::JournalEvent;

use crate::OperationError;
use crate::engineer::Resolution;
use crate::leaf::{CargoOperation, DataOperation, MaterialOperation};
use crate::operation::JournalOperation;

static STANDARD: LazyLock<EngineerRegistry> =
    LazyLock::new(|| standard_builder().build_unchecked());

/// Immutable map from engineer name to the operation a contribution
/// performs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineerRegistry {
    entries: BTreeMap<String, JournalOperation>,
}

impl EngineerRegistry {
    /// The built-in registry.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Start building a custom registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A copy of this registry with every entry of `overrides` added,
    /// replacing entries with the same name.
    #[must_use]
    pub fn with_overrides(&self, overrides: Self) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(overrides.entries);
        Self { entries }
    }

    /// The standard registry extended with the engineers in `extra`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::ReplacesStandard`] if `extra` names an
    /// engineer the standard table already has.
    pub fn standard_with(extra: Self) -> Result<Self, OperationError> {
        let standard = Self::standard();
        if let Some(engineer) = extra.names().find(|name| standard.contains(name)) {
            return Err(OperationError::ReplacesStandard {
                engineer: engineer.to_owned(),
            });
        }
        Ok(standard.with_overrides(extra))
    }

    /// The operation registered for `engineer`.
    pub fn get(&self, engineer: &str) -> Option<&JournalOperation> {
        self.entries.get(engineer)
    }

    /// How `engineer` would resolve.
    pub fn resolve(&self, engineer: &str) -> Resolution {
        match self.get(engineer) {
            None => Resolution::Unregistered,
            Some(JournalOperation::NoOperation) => Resolution::NoEffect,
            Some(_) => Resolution::Registered,
        }
    }

    /// Whether `engineer` has an entry.
    pub fn contains(&self, engineer: &str) -> bool {
        self.entries.contains_key(engineer)
    }

    /// Registered engineer names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, sorted by engineer name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JournalOperation)> + '_ {
        self.entries.iter().map(|(name, op)| (name.as_str(), op))
    }

    /// Number of registered engineers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects registry entries and validates them on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(String, JournalOperation)>,
}

impl RegistryBuilder {
    /// Register an engineer whose contributions have no tracked effect.
    #[must_use]
    pub fn no_effect(self, engineer: impl Into<String>) -> Self {
        self.entry(engineer, JournalOperation::NoOperation)
    }

    /// Register an engineer whose contribution consumes cargo.
    #[must_use]
    pub fn cargo(self, engineer: impl Into<String>, commodity: &str, size: i32) -> Self {
        self.entry(
            engineer,
            CargoOperation::new(commodity, size, JournalEvent::EngineerContribution).into(),
        )
    }

    /// Register an engineer whose contribution consumes a material.
    #[must_use]
    pub fn material(self, engineer: impl Into<String>, material: &str, size: i32) -> Self {
        self.entry(
            engineer,
            MaterialOperation::new(material, size, JournalEvent::EngineerContribution).into(),
        )
    }

    /// Register an engineer whose contribution consumes data.
    #[must_use]
    pub fn data(self, engineer: impl Into<String>, data: &str, size: i32) -> Self {
        self.entry(
            engineer,
            DataOperation::new(data, size, JournalEvent::EngineerContribution).into(),
        )
    }

    /// Register an arbitrary operation. It is validated on build.
    #[must_use]
    pub fn entry(mut self, engineer: impl Into<String>, operation: JournalOperation) -> Self {
        self.entries.push((engineer.into(), operation));
        self
    }

    /// Validate every entry and build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError`] if a name is blank or repeated, or an
    /// operation is not a no-op or a consuming leaf tagged
    /// [`JournalEvent::EngineerContribution`].
    pub fn build(self) -> Result<EngineerRegistry, OperationError> {
        let mut entries = BTreeMap::new();
        for (engineer, operation) in self.entries {
            validate_entry(&engineer, &operation)?;
            if entries.contains_key(&engineer) {
                return Err(OperationError::DuplicateEngineer(engineer));
            }
            entries.insert(engineer, operation);
        }
        Ok(EngineerRegistry { entries })
    }

    /// Build without validation. Later entries replace earlier ones.
    fn build_unchecked(self) -> EngineerRegistry {
        EngineerRegistry {
            entries: self.entries.into_iter().collect(),
        }
    }
}

fn validate_entry(engineer: &str, operation: &JournalOperation) -> Result<(), OperationError> {
    if engineer.trim().is_empty() {
        return Err(OperationError::EmptyEngineerName);
    }
    if operation.is_composite() {
        return Err(OperationError::NestedComposite {
            engineer: engineer.to_owned(),
        });
    }
    if operation
        .resource()
        .is_some_and(|(_, resource)| resource.is_empty())
    {
        return Err(OperationError::EmptyResourceName {
            engineer: engineer.to_owned(),
        });
    }
    if let Some(size) = operation.size().filter(|size| *size >= 0) {
        return Err(OperationError::NonConsuming {
            engineer: engineer.to_owned(),
            size,
        });
    }
    if let Some(found) = operation
        .journal_event()
        .filter(|event| *event != JournalEvent::EngineerContribution)
    {
        return Err(OperationError::WrongClassification {
            engineer: engineer.to_owned(),
            found,
        });
    }
    Ok(())
}

/// The built-in engineer table.
///
/// The table this one was transcribed from keys Elvira Martuuk as
/// "Elivra Martuuk", a typo. The typo is kept so existing lookups still
/// resolve, and the correct spelling the journal writes is added beside it.
fn standard_builder() -> RegistryBuilder {
    RegistryBuilder::default()
        .no_effect("Elvira Martuuk")
        .no_effect("Elivra Martuuk")
        .no_effect("The Dweller")
        .no_effect("Liz Ryder")
        .no_effect("Felicity Farseer")
        .no_effect("Tod McQuinn")
        .no_effect("Zacariah Nemo")
        .no_effect("Lei Cheung")
        .no_effect("Hera Tani")
        .no_effect("Juri Ishmaak")
        .no_effect("Selene Jean")
        .cargo("Marco Qwent", "Modular Terminals", -25)
        .data("Ram Tah", "Classified Scan Databanks", -50)
        .no_effect("Broo Tarquin")
        .no_effect("Colonel Bris Dekker")
        .no_effect("Didi Vatermann")
        .material("Professor Palin", "Sensor Fragment", -25)
        .no_effect("Lori Jameson")
        .data("Tiana Fortune", "Decoded Emission Data", -50)
        .data("The Sarge", "Aberrant Shield Pattern Analysis", -50)
        .cargo("Bill Turner", "Bromellite", -50)
}
