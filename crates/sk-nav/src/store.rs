//! The `NavStore`: per-unit navigation state.

use sk_core::UnitId;

use crate::{Destination, NavState, WaypointRoute};

/// Navigation state for every unit, indexed by `UnitId`.
///
/// Always `unit_count` long.  The store is deliberately dumb: it records
/// what the engine asked for and leaves movement to the navigator that owns
/// it.
pub struct NavStore {
    pub states: Vec<NavState>,
}

impl NavStore {
    /// Create a store with every unit enabled and without a destination.
    pub fn new(unit_count: usize) -> Self {
        Self { states: vec![NavState::idle(); unit_count] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[inline]
    pub fn get(&self, unit: UnitId) -> &NavState {
        &self.states[unit.index()]
    }

    /// Point `unit` at `destination`, dropping any patrol route.
    pub fn set_destination(&mut self, unit: UnitId, destination: Destination) {
        let state = &mut self.states[unit.index()];
        state.destination = Some(destination);
        state.reached = false;
        state.route = None;
    }

    /// Put `unit` on `route`, heading for its current waypoint.
    pub fn set_route(&mut self, unit: UnitId, route: WaypointRoute) {
        let state = &mut self.states[unit.index()];
        state.destination = Some(Destination::Point(route.current()));
        state.reached = false;
        state.route = Some(route);
    }

    #[inline]
    pub fn route(&self, unit: UnitId) -> Option<&WaypointRoute> {
        self.states[unit.index()].route.as_ref()
    }

    pub fn clear_destination(&mut self, unit: UnitId) {
        let state = &mut self.states[unit.index()];
        state.destination = None;
        state.reached = false;
        state.route = None;
    }

    #[inline]
    pub fn set_enabled(&mut self, unit: UnitId, enabled: bool) {
        self.states[unit.index()].enabled = enabled;
    }

    /// Latch the arrival flag.  Used by navigators on arrival and by hosts
    /// driving arrivals by hand.
    #[inline]
    pub fn mark_reached(&mut self, unit: UnitId) {
        self.states[unit.index()].reached = true;
    }
}
