//! The inventory ledger: current holdings per resource partition.
//!
//! [`State`] is the long-lived accumulator of a replay session. It is owned
//! by the replay driver and lent by `&mut` into each operation, one at a
//! time. All mutation goes through the three `adjust_*` methods, which share
//! one read-modify-write routine.
//!
//! # Invariants
//!
//! - Quantities are `u32` and never negative: a delta that would take a
//!   holding below zero clamps at zero.
//! - A delta that would exceed `u32::MAX` saturates at `u32::MAX`.
//! - Entries are created lazily. A negative delta on an absent entry
//!   creates it at zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use edengineer_types::{ResourceKind, ResourceName};

/// A single partition of the ledger: resource identity to quantity.
pub type Partition = BTreeMap<ResourceName, u32>;

// ---------------------------------------------------------------------------
// Adjustment result
// ---------------------------------------------------------------------------

/// Which bound an adjustment was clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    /// The unclamped result would have been negative; stored as zero.
    Floor,
    /// The unclamped result would have overflowed; stored as `u32::MAX`.
    Ceiling,
}

/// The outcome of one read-modify-write on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    /// The partition that was touched.
    pub kind: ResourceKind,
    /// Quantity before the adjustment (zero if the entry was absent).
    pub previous: u32,
    /// Quantity stored after the adjustment.
    pub current: u32,
    /// Set when the raw sum fell outside `0..=u32::MAX`.
    pub clamp: Option<Clamp>,
}

impl Adjustment {
    /// Whether the stored value differs from the unclamped sum.
    pub const fn is_clamped(&self) -> bool {
        self.clamp.is_some()
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The player's current holdings, partitioned by resource category.
///
/// Query collaborators read the partitions through [`State::cargo`],
/// [`State::materials`], [`State::data`], or [`State::partition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default, deserialize_with = "merge_partition")]
    cargo: Partition,
    #[serde(default, deserialize_with = "merge_partition")]
    materials: Partition,
    #[serde(default, deserialize_with = "merge_partition")]
    data: Partition,
}

/// Read a partition, summing raw keys that normalize to the same
/// [`ResourceName`].
fn merge_partition<'de, D>(deserializer: D) -> Result<Partition, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
    let mut partition = Partition::new();
    for (name, quantity) in raw {
        let held = partition.entry(ResourceName::new(name)).or_insert(0);
        *held = held.saturating_add(quantity);
    }
    Ok(partition)
}

impl State {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            cargo: BTreeMap::new(),
            materials: BTreeMap::new(),
            data: BTreeMap::new(),
        }
    }

    /// Cargo commodities held.
    pub const fn cargo(&self) -> &Partition {
        &self.cargo
    }

    /// Materials held.
    pub const fn materials(&self) -> &Partition {
        &self.materials
    }

    /// Data artifacts held.
    pub const fn data(&self) -> &Partition {
        &self.data
    }

    /// The partition for `kind`.
    pub const fn partition(&self, kind: ResourceKind) -> &Partition {
        match kind {
            ResourceKind::Commodity => &self.cargo,
            ResourceKind::Material => &self.materials,
            ResourceKind::Data => &self.data,
        }
    }

    /// Current quantity of `name` in the `kind` partition, zero if absent.
    pub fn quantity(&self, kind: ResourceKind, name: &str) -> u32 {
        self.partition(kind).get(name).copied().unwrap_or(0)
    }

    /// Sum of all quantities in a partition.
    pub fn total(&self, kind: ResourceKind) -> u64 {
        self.partition(kind)
            .values()
            .fold(0_u64, |acc, qty| acc.saturating_add(u64::from(*qty)))
    }

    /// Number of tracked entries across all partitions.
    pub fn len(&self) -> usize {
        self.cargo
            .len()
            .saturating_add(self.materials.len())
            .saturating_add(self.data.len())
    }

    /// Whether no entry has been created in any partition.
    pub fn is_empty(&self) -> bool {
        self.cargo.is_empty() && self.materials.is_empty() && self.data.is_empty()
    }

    /// Iterate every entry as `(kind, name, quantity)`, partition by
    /// partition in [`ResourceKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &ResourceName, u32)> + '_ {
        ResourceKind::ALL.into_iter().flat_map(move |kind| {
            self.partition(kind)
                .iter()
                .map(move |(name, qty)| (kind, name, *qty))
        })
    }

    /// Adjust a cargo commodity by a signed delta.
    pub fn adjust_cargo(&mut self, name: &ResourceName, delta: i32) -> Adjustment {
        apply_delta(&mut self.cargo, ResourceKind::Commodity, name, delta)
    }

    /// Adjust a material by a signed delta.
    pub fn adjust_material(&mut self, name: &ResourceName, delta: i32) -> Adjustment {
        apply_delta(&mut self.materials, ResourceKind::Material, name, delta)
    }

    /// Adjust a data artifact by a signed delta.
    pub fn adjust_data(&mut self, name: &ResourceName, delta: i32) -> Adjustment {
        apply_delta(&mut self.data, ResourceKind::Data, name, delta)
    }
}

/// Read the current quantity, add `delta`, clamp into `0..=u32::MAX`, and
/// write the result back.
fn apply_delta(
    partition: &mut Partition,
    kind: ResourceKind,
    name: &ResourceName,
    delta: i32,
) -> Adjustment {
    let previous = partition.get(name.as_str()).copied().unwrap_or(0);

    let (current, clamp) = match previous.checked_add_signed(delta) {
        Some(value) => (value, None),
        None if delta < 0 => (0, Some(Clamp::Floor)),
        None => (u32::MAX, Some(Clamp::Ceiling)),
    };

    if let Some(slot) = partition.get_mut(name.as_str()) {
        *slot = current;
    } else {
        partition.insert(name.clone(), current);
    }

    Adjustment {
        kind,
        previous,
        current,
        clamp,
    }
}
