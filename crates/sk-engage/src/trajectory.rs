//! Trajectory and resolution value types.

use std::fmt;

use sk_core::{TrajectoryId, UnitId, Vec2};

/// One unit's in-flight approach towards another.
///
/// Owned by the [`TrajectoryRegistry`][crate::TrajectoryRegistry]; units
/// only hold the `id` as a back-reference.  Copies handed out by the
/// registry are snapshots and stay valid as values after removal, but the
/// `id` no longer resolves to anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Trajectory {
    pub id:        TrajectoryId,
    /// The mover.
    pub targeting: UnitId,
    /// The destination unit.
    pub targeted:  UnitId,
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} -> {}]", self.id, self.targeting, self.targeted)
    }
}

/// Outcome of settling a pair of units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Engagement {
    /// The trajectory that completed.
    pub trajectory: Trajectory,

    /// Index and world position of the slot the targeted unit was sent to.
    /// `None` when the targeted unit has no slot anchors and was engaged in
    /// place.
    pub slot: Option<(usize, Vec2)>,

    /// The targeted unit's own trajectory, canceled because it is now being
    /// engaged.
    pub canceled: Option<Trajectory>,
}

/// Result of [`TrajectoryRegistry::resolve_arrival`][crate::TrajectoryRegistry::resolve_arrival].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The trajectory was no longer registered; nothing happened.
    Stale(TrajectoryId),

    Engaged(Engagement),
}

impl Resolution {
    #[inline]
    pub fn is_stale(&self) -> bool {
        matches!(self, Resolution::Stale(_))
    }

    pub fn engagement(&self) -> Option<&Engagement> {
        match self {
            Resolution::Engaged(e) => Some(e),
            Resolution::Stale(_) => None,
        }
    }
}
