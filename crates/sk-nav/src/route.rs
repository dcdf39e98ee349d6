//! Waypoint patrols: a closed loop of points visited in order.

use sk_core::Vec2;

/// A patrol loop for a unit with nothing better to do.
///
/// The unit heads for [`current`](Self::current).  Once it has arrived and
/// at least `refresh_secs` have passed since it was last sent on, it moves
/// on to the next waypoint, wrapping back to the first after the last.
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointRoute {
    waypoints: Vec<Vec2>,
    current:   usize,
    elapsed:   f32,

    /// Minimum time between two consecutive waypoint switches.
    pub refresh_secs: f32,
}

impl WaypointRoute {
    /// A route starting at the first waypoint.  `None` when `waypoints` is
    /// empty.
    pub fn new(waypoints: Vec<Vec2>, refresh_secs: f32) -> Option<Self> {
        if waypoints.is_empty() {
            return None;
        }
        Some(Self { waypoints, current: 0, elapsed: 0.0, refresh_secs })
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.waypoints[self.current]
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Advance the refresh timer by `dt`.  Returns the next waypoint when
    /// the route moves on, which happens only once `arrived` and the
    /// refresh delay has elapsed.
    pub fn tick(&mut self, dt: f32, arrived: bool) -> Option<Vec2> {
        self.elapsed += dt;
        if !arrived || self.elapsed < self.refresh_secs {
            return None;
        }
        self.elapsed = 0.0;
        self.current = (self.current + 1) % self.waypoints.len();
        Some(self.current())
    }
}
