//! Straight-line steering: the simplest `Navigator` that actually moves.

use sk_core::{NavConfig, Placement, UnitId};

use crate::{Destination, NavStore, Navigator, WaypointRoute};

/// Floor on the braking factor so a unit inside the slowdown radius still
/// closes the gap in finite time.
const MIN_SPEED_FACTOR: f32 = 0.25;

/// Moves each enabled unit straight at its destination at `config.speed`,
/// braking inside `config.slowdown_radius`, and reports arrival while within
/// `config.arrival_radius`.  Units on a [`WaypointRoute`] move on to the
/// next waypoint once the route's refresh delay allows.
///
/// There is no obstacle avoidance and no path planning.
pub struct SteeringNavigator {
    pub config: NavConfig,

    pub store: NavStore,
}

impl SteeringNavigator {
    pub fn new(config: NavConfig, unit_count: usize) -> Self {
        Self { config, store: NavStore::new(unit_count) }
    }
}

impl Navigator for SteeringNavigator {
    fn unit_count(&self) -> usize {
        self.store.len()
    }

    fn has_reached_destination(&self, unit: UnitId) -> bool {
        let state = self.store.get(unit);
        state.destination.is_some() && state.reached
    }

    fn set_navigation_enabled(&mut self, unit: UnitId, enabled: bool) {
        self.store.set_enabled(unit, enabled);
    }

    fn is_navigation_enabled(&self, unit: UnitId) -> bool {
        self.store.get(unit).enabled
    }

    fn set_destination(&mut self, unit: UnitId, destination: Destination) {
        self.store.set_destination(unit, destination);
    }

    fn destination(&self, unit: UnitId) -> Option<Destination> {
        self.store.get(unit).destination
    }

    fn clear_destination(&mut self, unit: UnitId) {
        self.store.clear_destination(unit);
    }

    fn set_route(&mut self, unit: UnitId, route: WaypointRoute) {
        self.store.set_route(unit, route);
    }

    fn route(&self, unit: UnitId) -> Option<&WaypointRoute> {
        self.store.route(unit)
    }

    fn advance(&mut self, placements: &mut [Placement], dt: f32) {
        let arrival_radius = self.config.arrival_radius;
        for i in 0..self.store.len() {
            let state = &mut self.store.states[i];
            if !state.enabled {
                continue;
            }
            if let Some(route) = state.route.as_mut() {
                if let Some(next) = route.tick(dt, state.reached) {
                    state.destination = Some(Destination::Point(next));
                    state.reached = false;
                }
            }
            let Some(destination) = state.destination else {
                continue;
            };

            // Resolve before mutating: a unit destination reads another
            // unit's placement.
            let target = destination.resolve(placements);
            let position = placements[i].position;
            let distance = position.distance(target);
            if distance <= arrival_radius {
                state.reached = true;
                continue;
            }
            // Out of range, including a unit destination that has moved
            // away since arrival was last seen.
            state.reached = false;

            let step = (self.config.speed * speed_factor(&self.config, distance) * dt).min(distance);
            let direction = (target - position) / distance;
            let placement = &mut placements[i];
            placement.face(target);
            placement.position = position + direction * step;

            if placement.position.distance(target) <= arrival_radius {
                state.reached = true;
            }
        }
    }
}

fn speed_factor(config: &NavConfig, distance: f32) -> f32 {
    let radius = config.slowdown_radius;
    if radius > 0.0 && distance < radius {
        (distance / radius).sqrt().max(MIN_SPEED_FACTOR)
    } else {
        1.0
    }
}
