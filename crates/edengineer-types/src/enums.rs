//! Enumeration types shared across the ledger workspace.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resource categories
// ---------------------------------------------------------------------------

/// The ledger partition a resource belongs to.
///
/// Every resource identity lives in exactly one partition. Operations never
/// switch on this value to pick their target; each leaf operation type is
/// bound to one partition at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Cargo commodities carried in the ship's hold.
    Commodity,
    /// Raw and manufactured materials.
    Material,
    /// Encoded data artifacts.
    Data,
}

impl ResourceKind {
    /// All partitions, in ledger order.
    pub const ALL: [Self; 3] = [Self::Commodity, Self::Material, Self::Data];

    /// Short lowercase label used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Commodity => "commodity",
            Self::Material => "material",
            Self::Data => "data",
        }
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Journal event classification
// ---------------------------------------------------------------------------

/// The journal event that caused an operation.
///
/// The classification is carried on every leaf operation for downstream
/// bookkeeping (statistics, grouping). It has no influence on how the
/// ledger is mutated. Variants serialize with the journal's own event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JournalEvent {
    /// Resources handed over to unlock or progress an engineer.
    EngineerContribution,
    /// A blueprint crafted at an engineer's workshop.
    EngineerCraft,
    /// A material picked up in space or on a surface.
    MaterialCollected,
    /// A material jettisoned from storage.
    MaterialDiscarded,
    /// A material seen for the first time.
    MaterialDiscovered,
    /// A trade at a material trader.
    MaterialTrade,
    /// A commodity refined from mined fragments.
    MiningRefined,
    /// Cargo scooped from space.
    CollectCargo,
    /// Cargo jettisoned or abandoned.
    EjectCargo,
    /// Commodities bought at a market.
    MarketBuy,
    /// Commodities sold at a market.
    MarketSell,
    /// Mission rewards or costs.
    MissionCompleted,
    /// Ammunition or fuel synthesized from materials.
    Synthesis,
    /// Data gathered from a scan.
    DataScanned,
    /// Materials donated to a community research goal.
    ScientificResearch,
    /// An adjustment entered by hand rather than read from the journal.
    ManualChange,
}

impl core::fmt::Display for JournalEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}
