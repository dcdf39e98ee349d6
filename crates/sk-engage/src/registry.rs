//! The trajectory registry: owns every in-flight approach and arbitrates
//! arrivals.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use sk_core::{ApproachProfile, TrajectoryId, UnitId, Vec2};
use sk_nav::Navigator;
use sk_unit::{UnitRoster, UnitState};

use crate::slot::best_slot;
use crate::{EngageError, EngageResult, Engagement, Resolution, Trajectory};

/// Tracks registered units and active trajectories.
///
/// Every mutating method takes `&mut self` and runs to completion, so
/// resolutions are applied strictly in call order and never interleave.
/// Hosts that drive units from several threads must put the registry
/// behind a single owner.
///
/// # Invariants
///
/// - A unit is the targeting unit of at most one registered trajectory.
/// - Every registered trajectory's targeting unit points back at it.
/// - Removing a trajectory happens once; later removals are no-ops.
/// - An `Engaged` unit has navigation disabled and owns no trajectory.
pub struct TrajectoryRegistry {
    units:   BTreeSet<UnitId>,
    active:  BTreeMap<TrajectoryId, Trajectory>,
    next_id: u32,

    /// Timing of the targeted unit's slide into its slot.
    pub profile: ApproachProfile,
}

impl TrajectoryRegistry {
    pub fn new(profile: ApproachProfile) -> Self {
        Self {
            units: BTreeSet::new(),
            active: BTreeMap::new(),
            next_id: 0,
            profile,
        }
    }

    // ── Units ─────────────────────────────────────────────────────────────

    /// Add `unit` to the tracked set.  Returns `false` if it was already
    /// tracked.
    pub fn register_unit(&mut self, unit: UnitId) -> bool {
        self.units.insert(unit)
    }

    pub fn is_registered(&self, unit: UnitId) -> bool {
        self.units.contains(&unit)
    }

    pub fn tracked_units(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.iter().copied()
    }

    // ── Trajectories ──────────────────────────────────────────────────────

    /// Register a new approach of `targeting` towards `targeted` and point
    /// `targeting`'s back-reference at it.
    ///
    /// # Errors
    ///
    /// - [`EngageError::InvalidTarget`] if the two units are the same.
    /// - [`EngageError::UnknownUnit`] if either is missing from `roster`.
    /// - [`EngageError::AlreadyEngaged`] if `targeting` is committed to an
    ///   engagement.
    /// - [`EngageError::AlreadyTargeting`] if `targeting` already owns a
    ///   registered trajectory.
    /// - [`EngageError::TrajectoryIdsExhausted`] once every id has been
    ///   handed out; ids are never reused.
    pub fn create_trajectory<R: UnitRoster>(
        &mut self,
        roster:    &mut R,
        targeting: UnitId,
        targeted:  UnitId,
    ) -> EngageResult<Trajectory> {
        if targeting == targeted {
            return Err(EngageError::InvalidTarget(targeting));
        }
        for unit in [targeting, targeted] {
            if !roster.contains(unit) {
                return Err(EngageError::UnknownUnit(unit));
            }
        }
        if roster.unit_state(targeting).is_committed() {
            return Err(EngageError::AlreadyEngaged(targeting));
        }
        if let Some(existing) = roster.active_trajectory(targeting) {
            if self.active.contains_key(&existing) {
                return Err(EngageError::AlreadyTargeting { unit: targeting, trajectory: existing });
            }
        }

        let next_id = self.next_id.checked_add(1).ok_or(EngageError::TrajectoryIdsExhausted)?;
        let trajectory = Trajectory { id: TrajectoryId(self.next_id), targeting, targeted };
        self.next_id = next_id;
        self.active.insert(trajectory.id, trajectory);
        roster.set_active_trajectory(targeting, Some(trajectory.id));
        debug!("created {trajectory}");
        Ok(trajectory)
    }

    /// Remove trajectory `id` and clear its targeting unit's back-reference
    /// if it still points here.
    ///
    /// Returns `false` when `id` is not registered.  Does not touch
    /// navigation; stopping the unit is up to the caller.
    pub fn cancel_trajectory<R: UnitRoster>(&mut self, roster: &mut R, id: TrajectoryId) -> bool {
        let Some(trajectory) = self.active.remove(&id) else {
            trace!("cancel of {id} ignored: not registered");
            return false;
        };
        clear_back_reference(roster, &trajectory);
        debug!("canceled {trajectory}");
        true
    }

    /// Arbitrate the arrival of trajectory `id`'s targeting unit at its
    /// targeted unit.
    ///
    /// 1. Unregistered `id` → [`Resolution::Stale`], nothing changes.
    /// 2. If the targeted unit owns a trajectory of its own, it is canceled,
    ///    its seek wait is flagged for cancellation, and its navigation is
    ///    disabled.
    /// 3. The targeted unit is sent sliding into the slot nearest the
    ///    targeting unit.
    /// 4. Both units have navigation disabled.
    /// 5. `id` is removed; the targeting unit is `Engaged`, the targeted
    ///    unit `Engaging` until its slide ends.
    pub fn resolve_arrival<R: UnitRoster, N: Navigator>(
        &mut self,
        roster: &mut R,
        nav:    &mut N,
        id:     TrajectoryId,
    ) -> Resolution {
        let Some(trajectory) = self.active.get(&id).copied() else {
            trace!("arrival of {id} ignored: already resolved or canceled");
            return Resolution::Stale(id);
        };
        let targeted = trajectory.targeted;

        let canceled = match roster.active_trajectory(targeted) {
            Some(own) => {
                let snapshot = self.active.get(&own).copied();
                self.cancel_trajectory(roster, own);
                roster.request_cancel(targeted);
                nav.set_navigation_enabled(targeted, false);
                snapshot
            }
            None => None,
        };

        let slot = settle_pair(roster, nav, self.profile, trajectory.targeting, targeted);

        self.active.remove(&id);
        clear_back_reference(roster, &trajectory);
        debug!("resolved {trajectory}: slot {slot:?}, interrupted {canceled:?}");

        Resolution::Engaged(Engagement { trajectory, slot, canceled })
    }

    #[cfg(test)]
    pub(crate) fn set_next_id(&mut self, next_id: u32) {
        self.next_id = next_id;
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn get(&self, id: TrajectoryId) -> Option<&Trajectory> {
        self.active.get(&id)
    }

    pub fn contains(&self, id: TrajectoryId) -> bool {
        self.active.contains_key(&id)
    }

    /// The trajectory `unit` is the targeting unit of, if any.
    pub fn trajectory_of(&self, unit: UnitId) -> Option<&Trajectory> {
        self.active.values().find(|t| t.targeting == unit)
    }

    /// Trajectories aimed at `unit`.
    pub fn targeting(&self, unit: UnitId) -> impl Iterator<Item = &Trajectory> + '_ {
        self.active.values().filter(move |t| t.targeted == unit)
    }

    /// `true` if any registered trajectory has `unit` at either end.
    pub fn involves(&self, unit: UnitId) -> bool {
        self.active.values().any(|t| t.targeting == unit || t.targeted == unit)
    }

    /// Active trajectories in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> + '_ {
        self.active.values()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Default for TrajectoryRegistry {
    fn default() -> Self {
        Self::new(ApproachProfile::default())
    }
}

fn clear_back_reference<R: UnitRoster>(roster: &mut R, trajectory: &Trajectory) {
    let unit = trajectory.targeting;
    if roster.contains(unit) && roster.active_trajectory(unit) == Some(trajectory.id) {
        roster.set_active_trajectory(unit, None);
    }
}

/// Stop both units and send `targeted` into the slot nearest `targeting`.
///
/// Shared by arrival resolution and the direct, registry-free entry point
/// in [`agent::on_target_reached`][crate::agent::on_target_reached].
pub(crate) fn settle_pair<R: UnitRoster, N: Navigator>(
    roster:    &mut R,
    nav:       &mut N,
    profile:   ApproachProfile,
    targeting: UnitId,
    targeted:  UnitId,
) -> Option<(usize, Vec2)> {
    let mover = roster.placement(targeting).position;
    let slot = best_slot(&roster.world_slot_anchors(targeted), mover);

    nav.set_navigation_enabled(targeted, false);
    match slot {
        Some((_, position)) => {
            roster.begin_slot_approach(targeted, position, profile);
            roster.set_unit_state(targeted, UnitState::Engaging);
        }
        None => roster.set_unit_state(targeted, UnitState::Engaged),
    }

    nav.set_navigation_enabled(targeting, false);
    roster.set_unit_state(targeting, UnitState::Engaged);
    slot
}
