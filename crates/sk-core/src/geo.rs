//! Planar geometry: unit placement and slot-anchor transforms.
//!
//! The simulation is 2-D.  Positions and offsets are `glam::Vec2`; a unit's
//! heading is an angle in radians measured counter-clockwise from +X.

pub use glam::Vec2;

/// Where a unit stands and which way it faces.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub position: Vec2,
    pub heading:  f32,
}

impl Placement {
    #[inline]
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Placement at `position` facing +X.
    #[inline]
    pub fn at(position: Vec2) -> Self {
        Self { position, heading: 0.0 }
    }

    /// Transform a unit-local offset into world space.
    ///
    /// The offset is rotated by `heading` and then translated by `position`.
    #[inline]
    pub fn to_world(&self, offset: Vec2) -> Vec2 {
        self.position + Vec2::from_angle(self.heading).rotate(offset)
    }

    /// Face towards `target`.  Leaves the heading unchanged when `target`
    /// coincides with the current position.
    pub fn face(&mut self, target: Vec2) {
        let dir = target - self.position;
        if dir.length_squared() > f32::EPSILON {
            self.heading = dir.y.atan2(dir.x);
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}) @ {:.1}°",
            self.position.x,
            self.position.y,
            self.heading.to_degrees()
        )
    }
}
