//! The `Navigator` trait: what the engagement engine needs from movement.

use sk_core::{Placement, UnitId, Vec2};

use crate::WaypointRoute;

/// Where a unit is heading.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Destination {
    /// A fixed point on the ground.
    Point(Vec2),
    /// Another unit; the destination follows it as it moves.
    Unit(UnitId),
}

impl Destination {
    /// The unit that owns this destination, if any.
    #[inline]
    pub fn target_unit(self) -> Option<UnitId> {
        match self {
            Destination::Unit(u) => Some(u),
            Destination::Point(_) => None,
        }
    }

    /// World position of the destination given every unit's placement.
    #[inline]
    pub fn resolve(self, placements: &[Placement]) -> Vec2 {
        match self {
            Destination::Point(p) => p,
            Destination::Unit(u) => placements[u.index()].position,
        }
    }
}

/// Per-unit navigation provider.
///
/// Every method indexes by `UnitId`; ids outside the provider's unit count
/// panic, the same as indexing the unit store.
pub trait Navigator {
    /// Number of units the provider tracks.
    fn unit_count(&self) -> usize;

    /// `true` while `unit` is within arrival range of its current
    /// destination.  Always `false` for a unit without a destination and
    /// right after a destination is (re)assigned.
    fn has_reached_destination(&self, unit: UnitId) -> bool;

    fn set_navigation_enabled(&mut self, unit: UnitId, enabled: bool);

    fn is_navigation_enabled(&self, unit: UnitId) -> bool;

    /// Point `unit` at `destination` and reset its arrival flag.
    fn set_destination(&mut self, unit: UnitId, destination: Destination);

    fn destination(&self, unit: UnitId) -> Option<Destination>;

    fn clear_destination(&mut self, unit: UnitId);

    /// Send `unit` round `route`.  Replaces any destination; a later
    /// [`set_destination`](Navigator::set_destination) drops the route.
    fn set_route(&mut self, unit: UnitId, route: WaypointRoute);

    fn route(&self, unit: UnitId) -> Option<&WaypointRoute>;

    /// Move every enabled unit one tick of `dt` seconds towards its
    /// destination, writing new placements in place.
    fn advance(&mut self, placements: &mut [Placement], dt: f32);
}
