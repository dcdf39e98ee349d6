//! The per-unit seek state machine.
//!
//! A unit's approach is an explicit state machine polled once per tick
//! rather than a suspended task:
//!
//! ```text
//! start()  : Idle ──▶ Seeking        (trajectory created, token installed)
//! poll()   : Seeking ──▶ Seeking     (not arrived yet)
//!            Seeking ──▶ Idle        (cancel requested)
//!            Seeking ──▶ Engaged     (arrived; registry resolves)
//! cancel() : flags the token; takes effect at the next poll()
//! ```
//!
//! `poll` is the only point where cancellation is observed.

use log::debug;
use sk_core::{TrajectoryId, UnitId, Vec2};
use sk_nav::Navigator;
use sk_unit::{UnitRoster, UnitState};

use crate::registry::settle_pair;
use crate::{EngageError, EngageResult, Resolution, Trajectory, TrajectoryRegistry};

/// What one [`poll`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SeekStep {
    /// The unit has no seek wait in progress.
    Inactive,

    /// Still approaching; poll again next tick.
    Waiting,

    /// The wait ended without resolution.  `trajectory` is the back-reference
    /// the unit held at that moment, if any.
    Canceled { trajectory: Option<TrajectoryId> },

    /// The unit arrived and its trajectory went through arrival resolution.
    Resolved(Resolution),
}

/// Begin seeking the unit `unit`'s navigation destination points at.
///
/// Returns `Ok(None)` when the unit has no destination: there is nothing to
/// seek and the unit stays `Idle`.
///
/// # Errors
///
/// - [`EngageError::UnknownUnit`] if `unit` is not in `roster`.
/// - [`EngageError::NotIdle`] unless the unit is `Idle`.
/// - [`EngageError::NoTargetUnit`] if the destination is a bare point.
/// - Any error from [`TrajectoryRegistry::create_trajectory`].
pub fn start<R: UnitRoster, N: Navigator>(
    registry: &mut TrajectoryRegistry,
    roster:   &mut R,
    nav:      &mut N,
    unit:     UnitId,
) -> EngageResult<Option<Trajectory>> {
    if !roster.contains(unit) {
        return Err(EngageError::UnknownUnit(unit));
    }
    let state = roster.unit_state(unit);
    if state != UnitState::Idle {
        return Err(EngageError::NotIdle { unit, state });
    }
    let Some(destination) = nav.destination(unit) else {
        return Ok(None);
    };
    let target = destination.target_unit().ok_or(EngageError::NoTargetUnit(unit))?;

    registry.register_unit(unit);
    let trajectory = registry.create_trajectory(roster, unit, target)?;
    roster.install_cancel_token(unit);
    roster.set_unit_state(unit, UnitState::Seeking);
    // Re-issue the destination so an arrival seen before this wait began
    // cannot resolve it.
    nav.set_destination(unit, destination);
    nav.set_navigation_enabled(unit, true);
    debug!("{unit} seeking {target} via {}", trajectory.id);
    Ok(Some(trajectory))
}

/// Request cooperative cancellation of `unit`'s seek wait.
///
/// Returns `false` and changes nothing when the unit is not seeking,
/// including while it slides into a slot.
pub fn cancel<R: UnitRoster>(roster: &mut R, unit: UnitId) -> bool {
    if !roster.contains(unit) || roster.unit_state(unit) != UnitState::Seeking {
        return false;
    }
    roster.request_cancel(unit)
}

/// Advance `unit`'s seek wait by one tick.
///
/// A unit whose wait was interrupted by another unit's arrival (it is now
/// `Engaging` or `Engaged`) has its token flagged; this poll releases the
/// token and leaves the new state alone.  Unknown units are `Inactive`.
pub fn poll<R: UnitRoster, N: Navigator>(
    registry: &mut TrajectoryRegistry,
    roster:   &mut R,
    nav:      &mut N,
    unit:     UnitId,
) -> SeekStep {
    if !roster.contains(unit) {
        return SeekStep::Inactive;
    }
    let Some(token) = roster.cancel_token(unit) else {
        return SeekStep::Inactive;
    };
    let requested = token.is_requested();
    let state = roster.unit_state(unit);

    if requested || state != UnitState::Seeking {
        return end_wait(registry, roster, nav, unit);
    }

    if !nav.has_reached_destination(unit) {
        return SeekStep::Waiting;
    }

    let Some(id) = roster.active_trajectory(unit) else {
        // Trajectory removed behind the token's back.
        return end_wait(registry, roster, nav, unit);
    };

    let resolution = registry.resolve_arrival(roster, nav, id);
    roster.release_cancel_token(unit);
    if resolution.is_stale() {
        roster.set_active_trajectory(unit, None);
        if roster.unit_state(unit) == UnitState::Seeking {
            roster.set_unit_state(unit, UnitState::Idle);
            nav.set_navigation_enabled(unit, false);
        }
    }
    SeekStep::Resolved(resolution)
}

/// Engage `target` directly, without going through arrival arbitration.
///
/// Any trajectory either unit owns is canceled first so neither ends up
/// committed while still registered as a mover.  Uses the registry's
/// approach profile.  Returns the slot `target` was sent to.
pub fn on_target_reached<R: UnitRoster, N: Navigator>(
    registry: &mut TrajectoryRegistry,
    roster:   &mut R,
    nav:      &mut N,
    unit:     UnitId,
    target:   UnitId,
) -> EngageResult<Option<(usize, Vec2)>> {
    if unit == target {
        return Err(EngageError::InvalidTarget(unit));
    }
    for u in [unit, target] {
        if !roster.contains(u) {
            return Err(EngageError::UnknownUnit(u));
        }
    }
    for u in [unit, target] {
        if let Some(own) = roster.active_trajectory(u) {
            registry.cancel_trajectory(roster, own);
            roster.request_cancel(u);
        }
    }
    let slot = settle_pair(roster, nav, registry.profile, unit, target);
    debug!("{unit} engaged {target} directly: slot {slot:?}");
    Ok(slot)
}

fn end_wait<R: UnitRoster, N: Navigator>(
    registry: &mut TrajectoryRegistry,
    roster:   &mut R,
    nav:      &mut N,
    unit:     UnitId,
) -> SeekStep {
    roster.release_cancel_token(unit);
    let trajectory = roster.active_trajectory(unit);
    if let Some(id) = trajectory {
        registry.cancel_trajectory(roster, id);
        roster.set_active_trajectory(unit, None);
    }
    if roster.unit_state(unit) == UnitState::Seeking {
        roster.set_unit_state(unit, UnitState::Idle);
        nav.set_navigation_enabled(unit, false);
        debug!("{unit} stopped seeking");
    } else {
        debug!("{unit} seek wait released: now {}", roster.unit_state(unit));
    }
    SeekStep::Canceled { trajectory }
}
