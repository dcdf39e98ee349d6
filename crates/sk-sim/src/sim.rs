//! The `Sim` struct and its tick loop.

use log::{debug, info, trace};
use sk_core::{SimClock, SimConfig, SkError, Tick, UnitId, Vec2};
use sk_engage::agent::{self, SeekStep};
use sk_engage::{EngageError, Resolution, Trajectory, TrajectoryRegistry};
use sk_nav::{Destination, Navigator, WaypointRoute};
use sk_unit::{UnitRoster, UnitState, UnitStore};

use crate::{SimObserver, SimResult};

/// The engagement simulation: units, their navigator, and the trajectory
/// registry, advanced together one tick at a time.
///
/// `Sim<N>` is the explicit context every operation runs against; there is
/// no global state.  Each tick runs three phases:
///
/// 1. **Movement**: the navigator advances every enabled unit.
/// 2. **Slots**: in-progress slot approaches advance; units that finish
///    become `Engaged`.
/// 3. **Seek**: every unit with a seek wait is polled, ascending `UnitId`.
///    Each poll runs to completion before the next starts, so arrivals in
///    the same tick resolve in id order.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<N: Navigator> {
    /// Global configuration (total ticks, tick duration, approach timing, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to seconds.
    pub clock: SimClock,

    /// Unit state (SoA arrays).
    pub units: UnitStore,

    /// Movement provider.
    pub nav: N,

    /// Owns every in-flight trajectory.  Exposed so hosts can drive
    /// `create_trajectory` / `cancel_trajectory` / `resolve_arrival`
    /// directly.
    pub registry: TrajectoryRegistry,
}

impl<N: Navigator> Sim<N> {
    // ── Unit operations ───────────────────────────────────────────────────

    /// Point `unit` at `destination` and enable its navigation.
    ///
    /// # Errors
    ///
    /// - [`SkError::UnitNotFound`] if `unit` or a destination unit is missing.
    /// - [`EngageError::AlreadyEngaged`] if `unit` is engaging or engaged.
    pub fn set_destination(&mut self, unit: UnitId, destination: Destination) -> SimResult<()> {
        self.check_unit(unit)?;
        if let Some(target) = destination.target_unit() {
            self.check_unit(target)?;
        }
        if self.units.unit_state(unit).is_committed() {
            return Err(EngageError::AlreadyEngaged(unit).into());
        }
        self.nav.set_destination(unit, destination);
        self.nav.set_navigation_enabled(unit, true);
        Ok(())
    }

    /// Send an idle `unit` round `route`, dwelling `route.refresh_secs` at
    /// each waypoint.  The patrol ends when the unit is given a destination.
    ///
    /// # Errors
    ///
    /// - [`SkError::UnitNotFound`] if `unit` is missing.
    /// - [`EngageError::NotIdle`] unless `unit` is `Idle`.
    pub fn patrol(&mut self, unit: UnitId, route: WaypointRoute) -> SimResult<()> {
        self.check_unit(unit)?;
        let state = self.units.unit_state(unit);
        if state != UnitState::Idle {
            return Err(EngageError::NotIdle { unit, state }.into());
        }
        debug!("{unit} patrolling {} waypoints", route.waypoints().len());
        self.nav.set_route(unit, route);
        self.nav.set_navigation_enabled(unit, true);
        Ok(())
    }

    /// Start `unit` seeking its destination unit.  See [`agent::start`].
    pub fn start(&mut self, unit: UnitId) -> SimResult<Option<Trajectory>> {
        Ok(agent::start(&mut self.registry, &mut self.units, &mut self.nav, unit)?)
    }

    /// Point `unit` at `target` and start seeking it.
    pub fn seek(&mut self, unit: UnitId, target: UnitId) -> SimResult<Option<Trajectory>> {
        self.set_destination(unit, Destination::Unit(target))?;
        self.start(unit)
    }

    /// Request cancellation of `unit`'s seek wait; observed at its next poll.
    pub fn cancel(&mut self, unit: UnitId) -> bool {
        agent::cancel(&mut self.units, unit)
    }

    /// Engage `target` directly.  See [`agent::on_target_reached`].
    pub fn on_target_reached(&mut self, unit: UnitId, target: UnitId) -> SimResult<Option<(usize, Vec2)>> {
        Ok(agent::on_target_reached(&mut self.registry, &mut self.units, &mut self.nav, unit, target)?)
    }

    /// `true` when no unit is seeking and no slot approach is in progress.
    pub fn is_settled(&self) -> bool {
        self.units.cancel_token.iter().all(Option::is_none)
            && self.units.slot_approach.iter().all(Option::is_none)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!("running {} units to {}", self.units.count, self.config.end_tick());
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!("finished at {} ({:.1}s)", self.clock.current_tick, self.clock.elapsed_secs());
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run one tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let polled = self.process_tick(now, observer)?;
        observer.on_tick_end(now, polled);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.units, &self.registry);
        }
        self.clock.advance();
        Ok(())
    }

    /// Cancel every seek wait and trajectory, and hand back the units and
    /// navigator.
    ///
    /// Seeking units end `Idle` with navigation disabled; units already
    /// engaging keep their state.
    pub fn teardown(mut self) -> (UnitStore, N) {
        let waiting: Vec<UnitId> = self
            .units
            .unit_ids()
            .filter(|&u| self.units.cancel_token(u).is_some())
            .collect();
        for unit in waiting {
            self.units.release_cancel_token(unit);
            if self.units.unit_state(unit) == UnitState::Seeking {
                self.units.set_unit_state(unit, UnitState::Idle);
                self.nav.set_navigation_enabled(unit, false);
            }
        }

        let ids: Vec<_> = self.registry.iter().map(|t| t.id).collect();
        for id in ids {
            self.registry.cancel_trajectory(&mut self.units, id);
        }
        info!("torn down at {}", self.clock.current_tick);
        (self.units, self.nav)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<usize> {
        let dt = self.config.tick_duration_secs;

        // ── Phase 1: movement ─────────────────────────────────────────────
        self.nav.advance(&mut self.units.placement, dt);

        // ── Phase 2: slot approaches ──────────────────────────────────────
        for unit in self.units.advance_slot_approaches(dt) {
            trace!("{now}: {unit} reached its slot");
            observer.on_slot_reached(now, unit);
        }

        // ── Phase 3: poll seek waits ──────────────────────────────────────
        //
        // Collected up front: a resolution may flag another unit's wait, and
        // that unit must still be polled this tick to release it.
        let waiting: Vec<UnitId> = self
            .units
            .unit_ids()
            .filter(|&u| self.units.cancel_token(u).is_some())
            .collect();

        for &unit in &waiting {
            match agent::poll(&mut self.registry, &mut self.units, &mut self.nav, unit) {
                SeekStep::Inactive | SeekStep::Waiting => {}
                SeekStep::Canceled { trajectory } => observer.on_seek_ended(now, unit, trajectory),
                SeekStep::Resolved(Resolution::Stale(id)) => {
                    debug!("{now}: {unit} arrived on stale {id}");
                    observer.on_seek_ended(now, unit, Some(id));
                }
                SeekStep::Resolved(Resolution::Engaged(engagement)) => {
                    observer.on_engaged(now, &engagement);
                }
            }
        }

        Ok(waiting.len())
    }

    fn check_unit(&self, unit: UnitId) -> SimResult<()> {
        if self.units.contains(unit) {
            Ok(())
        } else {
            Err(SkError::UnitNotFound(unit).into())
        }
    }
}
