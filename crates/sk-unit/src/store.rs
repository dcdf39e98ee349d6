//! Core unit storage: `UnitStore` (SoA data).

use sk_core::{Placement, TeamId, TrajectoryId, UnitId, Vec2};

use crate::{CancelToken, SlotApproach, UnitState};

/// Structure-of-Arrays storage for all unit state.
///
/// Every `Vec` field has exactly `count` elements; the `UnitId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.placement[unit.index()].position;
/// ```
///
/// Navigation state (destination, enabled flag, arrival) is not stored here;
/// it belongs to the navigation provider in `sk-nav`.
pub struct UnitStore {
    /// Number of units.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current position and heading, written by the movement layer.
    pub placement: Vec<Placement>,

    /// Unit-local slot-anchor offsets.  Fixed at creation.
    pub slot_offsets: Vec<Vec<Vec2>>,

    pub team: Vec<TeamId>,

    pub state: Vec<UnitState>,

    /// Non-owning back-reference to the trajectory this unit is the
    /// targeting unit of.  The registry owns the trajectory itself.
    pub active_trajectory: Vec<Option<TrajectoryId>>,

    /// Present while a Seeking wait is in progress.
    pub cancel_token: Vec<Option<CancelToken>>,

    /// Present while the unit slides into an assigned slot.
    pub slot_approach: Vec<Option<SlotApproach>>,
}

impl UnitStore {
    /// An empty store.  Use [`UnitStoreBuilder`][crate::UnitStoreBuilder] to
    /// construct a populated one.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count:             0,
            placement:         Vec::with_capacity(capacity),
            slot_offsets:      Vec::with_capacity(capacity),
            team:              Vec::with_capacity(capacity),
            state:             Vec::with_capacity(capacity),
            active_trajectory: Vec::with_capacity(capacity),
            cancel_token:      Vec::with_capacity(capacity),
            slot_approach:     Vec::with_capacity(capacity),
        }
    }

    /// Append a new Idle unit and return its id.
    pub fn push_unit(&mut self, team: TeamId, placement: Placement, slot_offsets: Vec<Vec2>) -> UnitId {
        let id = UnitId(self.count as u32);
        self.placement.push(placement);
        self.slot_offsets.push(slot_offsets);
        self.team.push(team);
        self.state.push(UnitState::Idle);
        self.active_trajectory.push(None);
        self.cancel_token.push(None);
        self.slot_approach.push(None);
        self.count += 1;
        id
    }

    /// `true` if there are no units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `UnitId`s in ascending index order.
    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        (0..self.count as u32).map(UnitId)
    }

    /// Units currently in `state`, ascending.
    pub fn units_in(&self, state: UnitState) -> impl Iterator<Item = UnitId> + '_ {
        self.unit_ids().filter(move |u| self.state[u.index()] == state)
    }

    #[inline]
    pub fn position(&self, unit: UnitId) -> Vec2 {
        self.placement[unit.index()].position
    }

    /// Closest unit on another team that is not yet committed to an
    /// engagement.  Ties go to the lower id.
    pub fn nearest_opponent(&self, unit: UnitId) -> Option<UnitId> {
        let me = self.position(unit);
        let team = self.team[unit.index()];
        let mut best: Option<(UnitId, f32)> = None;
        for other in self.unit_ids() {
            if self.team[other.index()] == team || self.state[other.index()].is_committed() {
                continue;
            }
            let d = me.distance_squared(self.position(other));
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((other, d));
            }
        }
        best.map(|(u, _)| u)
    }

    /// Advance every in-progress slot approach by `dt` seconds.
    ///
    /// Returns the units whose approach finished this step; those that were
    /// `Engaging` are now `Engaged`.
    pub fn advance_slot_approaches(&mut self, dt: f32) -> Vec<UnitId> {
        let mut finished = Vec::new();
        for i in 0..self.count {
            let Some(approach) = self.slot_approach[i].as_mut() else {
                continue;
            };
            self.placement[i].position = approach.step(dt);
            if approach.is_finished() {
                self.slot_approach[i] = None;
                if self.state[i] == UnitState::Engaging {
                    self.state[i] = UnitState::Engaged;
                }
                finished.push(UnitId(i as u32));
            }
        }
        finished
    }
}

impl Default for UnitStore {
    fn default() -> Self {
        Self::new()
    }
}
