//! Per-unit navigation state.

use crate::{Destination, WaypointRoute};

/// The navigation state for a single unit.
///
/// A unit moves only while `enabled` and `destination` is set.  `reached`
/// is set once the unit gets within arrival range, cleared whenever a new
/// destination is assigned, and cleared again if the destination drifts
/// out of range (a unit destination that moved away).
///
/// While `route` is set the destination is the route's current waypoint
/// and advances with it.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    pub enabled: bool,

    pub destination: Option<Destination>,

    pub reached: bool,

    pub route: Option<WaypointRoute>,
}

impl NavState {
    /// Enabled, no destination, not arrived.
    #[inline]
    pub fn idle() -> Self {
        Self { enabled: true, destination: None, reached: false, route: None }
    }

    /// `true` if the unit is heading somewhere it has not reached yet.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.enabled && self.destination.is_some() && !self.reached
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::idle()
    }
}
