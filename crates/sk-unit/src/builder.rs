//! Fluent builder for constructing a `UnitStore` in one step.
//!
//! # Usage
//!
//! ```rust
//! use sk_core::{Placement, TeamId, Vec2};
//! use sk_unit::UnitStoreBuilder;
//!
//! let store = UnitStoreBuilder::new()
//!     .slot_offsets(vec![Vec2::X, Vec2::NEG_X])
//!     .unit(TeamId(0), Placement::at(Vec2::ZERO))
//!     .unit(TeamId(1), Placement::at(Vec2::new(10.0, 0.0)))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(store.slot_offsets[1].len(), 2);
//! ```

use sk_core::{Placement, TeamId, Vec2};

use crate::UnitStore;

struct PendingUnit {
    team:         TeamId,
    placement:    Placement,
    slot_offsets: Vec<Vec2>,
}

/// Fluent builder for [`UnitStore`].
///
/// Units are numbered in the order they are added, starting at `UnitId(0)`.
#[derive(Default)]
pub struct UnitStoreBuilder {
    default_offsets: Vec<Vec2>,
    units:           Vec<PendingUnit>,
}

impl UnitStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot offsets given to every unit added with [`unit`](Self::unit)
    /// after this call.
    pub fn slot_offsets(mut self, offsets: Vec<Vec2>) -> Self {
        self.default_offsets = offsets;
        self
    }

    /// Add a unit with the current default slot offsets.
    pub fn unit(mut self, team: TeamId, placement: Placement) -> Self {
        let slot_offsets = self.default_offsets.clone();
        self.units.push(PendingUnit { team, placement, slot_offsets });
        self
    }

    /// Add a unit with its own slot offsets.
    pub fn unit_with_slots(mut self, team: TeamId, placement: Placement, slot_offsets: Vec<Vec2>) -> Self {
        self.units.push(PendingUnit { team, placement, slot_offsets });
        self
    }

    /// Construct the `UnitStore`.  Every unit starts `Idle` with no
    /// trajectory.
    pub fn build(self) -> UnitStore {
        let mut store = UnitStore::with_capacity(self.units.len());
        for entry in self.units {
            store.push_unit(entry.team, entry.placement, entry.slot_offsets);
        }
        store
    }
}
