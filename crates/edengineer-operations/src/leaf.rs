//! Leaf operations: one signed adjustment to one resource.
//!
//! Each leaf type is bound to a single ledger partition at compile time.
//! [`CargoOperation`] always targets cargo, [`MaterialOperation`] always
//! targets materials, and [`DataOperation`] always targets data; there is
//! no runtime category switch.

use edengineer_ledger::{Adjustment, State};
use edengineer_types::{JournalEvent, ResourceKind, ResourceName};

/// Generates a leaf operation struct bound to one ledger partition.
macro_rules! define_leaf_operation {
    (
        $(#[$meta:meta])*
        $name:ident { $field:ident } => $kind:expr, $adjust:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            /// Identity of the adjusted resource.
            pub $field: ResourceName,
            /// Signed quantity delta.
            pub size: i32,
            /// The journal event that produced this operation.
            pub journal_event: JournalEvent,
        }

        impl $name {
            /// The partition this operation always targets.
            pub const KIND: ResourceKind = $kind;

            /// Build the operation. The resource name is normalized.
            pub fn new(name: impl AsRef<str>, size: i32, journal_event: JournalEvent) -> Self {
                Self {
                    $field: ResourceName::new(name),
                    size,
                    journal_event,
                }
            }

            /// The resource this operation adjusts.
            pub const fn resource(&self) -> &ResourceName {
                &self.$field
            }

            /// Apply the delta to the ledger, clamping at zero.
            pub fn mutate(&self, state: &mut State) {
                let adjustment = state.$adjust(&self.$field, self.size);
                log_adjustment(&self.$field, self.size, self.journal_event, adjustment);
            }
        }
    };
}

define_leaf_operation! {
    /// Adjusts a cargo commodity.
    CargoOperation { commodity_name } => ResourceKind::Commodity, adjust_cargo
}

define_leaf_operation! {
    /// Adjusts a material.
    MaterialOperation { material_name } => ResourceKind::Material, adjust_material
}

define_leaf_operation! {
    /// Adjusts a data artifact.
    DataOperation { data_name } => ResourceKind::Data, adjust_data
}

fn log_adjustment(name: &ResourceName, size: i32, event: JournalEvent, adjustment: Adjustment) {
    if adjustment.is_clamped() {
        tracing::debug!(
            kind = %adjustment.kind,
            resource = %name,
            size,
            previous = adjustment.previous,
            current = adjustment.current,
            event = %event,
            "Ledger adjustment clamped"
        );
    } else {
        tracing::trace!(
            kind = %adjustment.kind,
            resource = %name,
            size,
            current = adjustment.current,
            event = %event,
            "Ledger adjusted"
        );
    }
}
