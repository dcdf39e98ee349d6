//! The final slide of a targeted unit into its assigned slot.

use sk_core::{ApproachProfile, Vec2};

/// Linear interpolation from where the unit stood when the slot was
/// assigned to the slot itself.
///
/// Each [`step`](Self::step) adds `dt * profile.speed` to the accumulated
/// time; the position is `origin.lerp(slot, elapsed / duration)` clamped to
/// the slot.  Once begun the approach always runs to completion.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotApproach {
    pub origin:  Vec2,
    pub slot:    Vec2,
    elapsed:     f32,
    profile:     ApproachProfile,
}

impl SlotApproach {
    pub fn new(origin: Vec2, slot: Vec2, profile: ApproachProfile) -> Self {
        Self { origin, slot, elapsed: 0.0, profile }
    }

    /// Fraction of the slide completed, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        if self.profile.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.profile.duration_secs).min(1.0)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.profile.duration_secs
    }

    /// Advance by one tick of `dt` seconds and return the new position.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        self.elapsed += dt * self.profile.speed;
        self.origin.lerp(self.slot, self.progress())
    }
}
