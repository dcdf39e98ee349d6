//! The engageable-unit capability set.
//!
//! The trajectory registry and the unit agent in `sk-engage` only ever talk
//! to units through this trait, so one registry implementation serves any
//! unit storage.  [`UnitStore`] is the implementation used by `sk-sim`.
//!
//! All methods index by `UnitId`; callers check [`contains`](UnitRoster::contains)
//! first for ids that did not come from the roster itself.

use sk_core::{ApproachProfile, Placement, TrajectoryId, UnitId, Vec2};

use crate::{CancelToken, SlotApproach, UnitState, UnitStore};

pub trait UnitRoster {
    fn contains(&self, unit: UnitId) -> bool;

    fn placement(&self, unit: UnitId) -> Placement;

    /// Slot anchors of `unit` in world space, in declaration order.
    fn world_slot_anchors(&self, unit: UnitId) -> Vec<Vec2>;

    fn unit_state(&self, unit: UnitId) -> UnitState;

    fn set_unit_state(&mut self, unit: UnitId, state: UnitState);

    fn active_trajectory(&self, unit: UnitId) -> Option<TrajectoryId>;

    fn set_active_trajectory(&mut self, unit: UnitId, trajectory: Option<TrajectoryId>);

    /// Begin a Seeking wait by installing a fresh token, replacing any old one.
    fn install_cancel_token(&mut self, unit: UnitId);

    fn cancel_token(&self, unit: UnitId) -> Option<&CancelToken>;

    /// End the wait, returning the token.
    fn release_cancel_token(&mut self, unit: UnitId) -> Option<CancelToken>;

    /// Flag the current wait for cancellation.  Returns `false` (and changes
    /// nothing) when no wait is active.
    fn request_cancel(&mut self, unit: UnitId) -> bool;

    /// Start sliding `unit` from its current position into `slot`.
    fn begin_slot_approach(&mut self, unit: UnitId, slot: Vec2, profile: ApproachProfile);
}

impl UnitRoster for UnitStore {
    #[inline]
    fn contains(&self, unit: UnitId) -> bool {
        unit.index() < self.count
    }

    #[inline]
    fn placement(&self, unit: UnitId) -> Placement {
        self.placement[unit.index()]
    }

    fn world_slot_anchors(&self, unit: UnitId) -> Vec<Vec2> {
        let placement = self.placement[unit.index()];
        self.slot_offsets[unit.index()]
            .iter()
            .map(|&offset| placement.to_world(offset))
            .collect()
    }

    #[inline]
    fn unit_state(&self, unit: UnitId) -> UnitState {
        self.state[unit.index()]
    }

    #[inline]
    fn set_unit_state(&mut self, unit: UnitId, state: UnitState) {
        self.state[unit.index()] = state;
    }

    #[inline]
    fn active_trajectory(&self, unit: UnitId) -> Option<TrajectoryId> {
        self.active_trajectory[unit.index()]
    }

    #[inline]
    fn set_active_trajectory(&mut self, unit: UnitId, trajectory: Option<TrajectoryId>) {
        self.active_trajectory[unit.index()] = trajectory;
    }

    fn install_cancel_token(&mut self, unit: UnitId) {
        self.cancel_token[unit.index()] = Some(CancelToken::new());
    }

    fn cancel_token(&self, unit: UnitId) -> Option<&CancelToken> {
        self.cancel_token[unit.index()].as_ref()
    }

    fn release_cancel_token(&mut self, unit: UnitId) -> Option<CancelToken> {
        self.cancel_token[unit.index()].take()
    }

    fn request_cancel(&mut self, unit: UnitId) -> bool {
        match self.cancel_token[unit.index()].as_mut() {
            Some(token) => {
                token.request();
                true
            }
            None => false,
        }
    }

    fn begin_slot_approach(&mut self, unit: UnitId, slot: Vec2, profile: ApproachProfile) {
        let origin = self.placement[unit.index()].position;
        self.slot_approach[unit.index()] = Some(SlotApproach::new(origin, slot, profile));
    }
}
