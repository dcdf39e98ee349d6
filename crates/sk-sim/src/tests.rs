//! Integration tests for sk-sim.

use sk_core::{Placement, SimConfig, SkError, TeamId, Tick, TrajectoryId, UnitId, Vec2};
use sk_engage::{EngageError, Engagement, TrajectoryRegistry};
use sk_nav::{Destination, Navigator, SteeringNavigator, WaypointRoute};
use sk_unit::{UnitRoster, UnitState, UnitStore, UnitStoreBuilder};

use crate::{NoopObserver, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: UnitId = UnitId(0);
const B: UnitId = UnitId(1);

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig { total_ticks, output_interval_ticks: 0, ..SimConfig::default() }
}

/// A at the origin, B ten units along +X; anchors one unit either side.
fn pair() -> UnitStore {
    UnitStoreBuilder::new()
        .slot_offsets(vec![Vec2::X, Vec2::NEG_X])
        .unit(TeamId(0), Placement::at(Vec2::ZERO))
        .unit(TeamId(1), Placement::at(Vec2::new(10.0, 0.0)))
        .build()
}

fn pair_sim(total_ticks: u64) -> Sim<SteeringNavigator> {
    let config = test_config(total_ticks);
    let units = pair();
    let nav = SteeringNavigator::new(config.nav, units.count);
    SimBuilder::new(config, units, nav).build().unwrap()
}

#[derive(Default)]
struct Recorder {
    ticks:       u64,
    engagements: Vec<Engagement>,
    ended:       Vec<(UnitId, Option<TrajectoryId>)>,
    slots:       Vec<UnitId>,
    snapshots:   Vec<Tick>,
    end:         Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, _tick: Tick, _polled: usize) {
        self.ticks += 1;
    }

    fn on_engaged(&mut self, _tick: Tick, engagement: &Engagement) {
        self.engagements.push(*engagement);
    }

    fn on_seek_ended(&mut self, _tick: Tick, unit: UnitId, trajectory: Option<TrajectoryId>) {
        self.ended.push((unit, trajectory));
    }

    fn on_slot_reached(&mut self, _tick: Tick, unit: UnitId) {
        self.slots.push(unit);
    }

    fn on_snapshot(&mut self, tick: Tick, _units: &UnitStore, _registry: &TrajectoryRegistry) {
        self.snapshots.push(tick);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.end = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_and_registers_every_unit() {
        let sim = pair_sim(10);
        assert_eq!(sim.units.count, 2);
        assert!(sim.registry.is_registered(A));
        assert!(sim.registry.is_registered(B));
        assert!(sim.registry.is_empty());
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn navigator_count_mismatch_errors() {
        let units = pair();
        let nav = SteeringNavigator::new(Default::default(), 3);
        let result = SimBuilder::new(test_config(10), units, nav).build();
        assert!(matches!(
            result,
            Err(SimError::UnitCountMismatch { expected: 2, got: 3, what: "navigator" })
        ));
    }

    #[test]
    fn invalid_config_errors() {
        let config = SimConfig { tick_duration_secs: 0.0, ..test_config(10) };
        let units = pair();
        let nav = SteeringNavigator::new(config.nav, units.count);
        let result = SimBuilder::new(config, units, nav).build();
        assert!(matches!(result, Err(SimError::Core(SkError::Config(_)))));
    }

    #[test]
    fn destinations_are_applied() {
        let units = pair();
        let nav = SteeringNavigator::new(Default::default(), units.count);
        let sim = SimBuilder::new(test_config(10), units, nav)
            .destinations(vec![Some(Destination::Unit(B)), None])
            .build()
            .unwrap();
        assert_eq!(sim.nav.destination(A), Some(Destination::Unit(B)));
        assert_eq!(sim.nav.destination(B), None);
        assert_eq!(sim.units.state[A.index()], UnitState::Idle);
    }

    #[test]
    fn destination_count_mismatch_errors() {
        let units = pair();
        let nav = SteeringNavigator::new(Default::default(), units.count);
        let result = SimBuilder::new(test_config(10), units, nav)
            .destinations(vec![None])
            .build();
        assert!(matches!(result, Err(SimError::UnitCountMismatch { what: "destinations", .. })));
    }

    #[test]
    fn destination_to_missing_unit_errors() {
        let units = pair();
        let nav = SteeringNavigator::new(Default::default(), units.count);
        let result = SimBuilder::new(test_config(10), units, nav)
            .destinations(vec![Some(Destination::Unit(UnitId(7))), None])
            .build();
        assert!(matches!(result, Err(SimError::Core(SkError::UnitNotFound(UnitId(7))))));
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn idle_units_run_to_end_tick() {
        let mut sim = pair_sim(10);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
        assert_eq!(rec.ticks, 10);
        assert_eq!(rec.end, Some(Tick(10)));
        assert_eq!(sim.units.position(A), Vec2::ZERO);
        assert!(sim.is_settled());
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = pair_sim(100);
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    #[test]
    fn snapshots_follow_interval() {
        let config = SimConfig { output_interval_ticks: 5, ..test_config(10) };
        let units = pair();
        let nav = SteeringNavigator::new(config.nav, units.count);
        let mut sim = SimBuilder::new(config, units, nav).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(5)]);
    }

    #[test]
    fn set_destination_checks_units() {
        let mut sim = pair_sim(10);
        assert!(matches!(
            sim.set_destination(UnitId(5), Destination::Point(Vec2::ONE)),
            Err(SimError::Core(SkError::UnitNotFound(UnitId(5))))
        ));
        assert!(matches!(
            sim.set_destination(A, Destination::Unit(UnitId(5))),
            Err(SimError::Core(SkError::UnitNotFound(UnitId(5))))
        ));
    }

    #[test]
    fn point_destination_moves_without_seeking() {
        let mut sim = pair_sim(300);
        sim.set_destination(A, Destination::Point(Vec2::new(0.0, 5.0))).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert!(sim.nav.has_reached_destination(A));
        assert!(sim.units.position(A).distance(Vec2::new(0.0, 5.0)) <= 1.0 + 1e-4);
        assert_eq!(sim.units.state[A.index()], UnitState::Idle);
    }
}

// ── Patrols ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod patrol_tests {
    use super::*;

    #[test]
    fn idle_unit_cycles_its_route() {
        let mut sim = pair_sim(600);
        let waypoints = vec![Vec2::new(0.0, 3.0), Vec2::new(0.0, -3.0)];
        sim.patrol(A, WaypointRoute::new(waypoints, 0.5).unwrap()).unwrap();

        let mut seen = vec![0];
        for _ in 0..600 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            let index = sim.nav.route(A).unwrap().current_index();
            if seen.last() != Some(&index) {
                seen.push(index);
            }
        }
        assert!(seen.len() >= 3, "route visited {seen:?}");
        assert_eq!(&seen[..3], &[0, 1, 0]);
        assert_eq!(sim.units.state[A.index()], UnitState::Idle);
        assert!(sim.nav.is_navigation_enabled(A));
        assert!(sim.is_settled());
    }

    #[test]
    fn seeking_ends_the_patrol() {
        let mut sim = pair_sim(600);
        let route = WaypointRoute::new(vec![Vec2::new(0.0, 3.0)], 0.5).unwrap();
        sim.patrol(A, route).unwrap();
        sim.run_ticks(10, &mut NoopObserver).unwrap();

        sim.seek(A, B).unwrap();
        assert!(sim.nav.route(A).is_none());
        assert_eq!(sim.nav.destination(A), Some(Destination::Unit(B)));
    }

    #[test]
    fn patrol_checks_unit() {
        let mut sim = pair_sim(10);
        let route = WaypointRoute::new(vec![Vec2::ONE], 1.0).unwrap();
        assert!(matches!(
            sim.patrol(UnitId(5), route),
            Err(SimError::Core(SkError::UnitNotFound(UnitId(5))))
        ));
    }
}

// ── Engagements ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod engagement_tests {
    use super::*;

    #[test]
    fn approach_ends_engaged_in_slot() {
        let mut sim = pair_sim(600);
        let t = sim.seek(A, B).unwrap().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.engagements.len(), 1);
        let e = rec.engagements[0];
        assert_eq!(e.trajectory, t);
        assert_eq!(e.slot.map(|(i, _)| i), Some(1));
        assert_eq!(rec.slots, vec![B]);

        assert_eq!(sim.units.state[A.index()], UnitState::Engaged);
        assert_eq!(sim.units.state[B.index()], UnitState::Engaged);
        assert!(!sim.nav.is_navigation_enabled(A));
        assert!(!sim.nav.is_navigation_enabled(B));
        assert!(sim.registry.is_empty());
        assert!(sim.units.position(B).distance(Vec2::new(9.0, 0.0)) < 1e-3);
        assert!(sim.is_settled());
    }

    #[test]
    fn mutual_approach_engages_once() {
        let mut sim = pair_sim(600);
        sim.seek(A, B).unwrap();
        sim.seek(B, A).unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.engagements.len(), 1);
        let e = rec.engagements[0];
        let loser = e.trajectory.targeted;
        assert_eq!(e.canceled.map(|t| t.targeting), Some(loser));
        // The loser's wait was released without a trajectory left to cancel.
        assert_eq!(rec.ended, vec![(loser, None)]);

        assert_eq!(sim.units.state[A.index()], UnitState::Engaged);
        assert_eq!(sim.units.state[B.index()], UnitState::Engaged);
        assert!(!sim.registry.involves(A));
        assert!(!sim.registry.involves(B));
    }

    #[test]
    fn cancel_stops_the_unit() {
        let mut sim = pair_sim(600);
        let t = sim.seek(A, B).unwrap().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(10, &mut rec).unwrap();

        assert!(sim.cancel(A));
        sim.run_ticks(1, &mut rec).unwrap();
        assert_eq!(rec.ended, vec![(A, Some(t.id))]);
        assert_eq!(sim.units.state[A.index()], UnitState::Idle);
        assert!(sim.registry.is_empty());
        assert!(!sim.nav.is_navigation_enabled(A));

        let stopped = sim.units.position(A);
        sim.run_ticks(30, &mut rec).unwrap();
        assert_eq!(sim.units.position(A), stopped);
        assert!(rec.engagements.is_empty());
    }

    #[test]
    fn cancel_without_wait_is_noop() {
        let mut sim = pair_sim(10);
        assert!(!sim.cancel(A));
        assert_eq!(sim.units.state[A.index()], UnitState::Idle);
    }

    #[test]
    fn direct_engagement() {
        let mut sim = pair_sim(600);
        let slot = sim.on_target_reached(A, B).unwrap();
        assert_eq!(slot, Some((1, Vec2::new(9.0, 0.0))));
        assert_eq!(sim.units.state[B.index()], UnitState::Engaging);

        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.slots, vec![B]);
        assert_eq!(sim.units.state[B.index()], UnitState::Engaged);
        assert!(rec.engagements.is_empty());
    }

    #[test]
    fn restart_after_cancel_does_not_reuse_old_arrival() {
        let mut sim = pair_sim(600);
        let mut rec = Recorder::default();
        sim.seek(A, B).unwrap();
        sim.units.placement[B.index()].position = Vec2::new(0.5, 0.0);
        assert!(sim.cancel(A));
        sim.run_ticks(1, &mut rec).unwrap();
        assert_eq!(sim.units.state[A.index()], UnitState::Idle);

        sim.units.placement[B.index()].position = Vec2::new(100.0, 0.0);
        assert!(sim.start(A).unwrap().is_some());
        sim.run_ticks(1, &mut rec).unwrap();

        assert!(rec.engagements.is_empty());
        assert_eq!(sim.units.state[A.index()], UnitState::Seeking);
        assert_eq!(sim.units.state[B.index()], UnitState::Idle);
        assert_eq!(sim.registry.len(), 1);
        assert!(!sim.nav.has_reached_destination(A));
    }

    #[test]
    fn engaged_units_refuse_new_movement() {
        let mut sim = pair_sim(600);
        sim.seek(A, B).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.units.state[A.index()], UnitState::Engaged);

        assert!(matches!(
            sim.set_destination(A, Destination::Point(Vec2::ONE)),
            Err(SimError::Engage(EngageError::AlreadyEngaged(A)))
        ));
        let route = WaypointRoute::new(vec![Vec2::ONE], 1.0).unwrap();
        assert!(matches!(
            sim.patrol(B, route),
            Err(SimError::Engage(EngageError::NotIdle { unit: B, state: UnitState::Engaged }))
        ));
        assert!(!sim.nav.is_navigation_enabled(A));
        assert!(!sim.nav.is_navigation_enabled(B));
    }

    #[test]
    fn seek_rejects_self() {
        let mut sim = pair_sim(10);
        assert!(matches!(sim.seek(A, A), Err(SimError::Engage(_))));
        assert_eq!(sim.units.state[A.index()], UnitState::Idle);
    }
}

// ── Teardown ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod teardown_tests {
    use super::*;

    #[test]
    fn teardown_cancels_waits_and_trajectories() {
        let mut sim = pair_sim(600);
        sim.seek(A, B).unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();

        let (units, nav) = sim.teardown();
        assert_eq!(units.state[A.index()], UnitState::Idle);
        assert!(units.cancel_token(A).is_none());
        assert_eq!(units.active_trajectory(A), None);
        assert!(!nav.is_navigation_enabled(A));
    }

    #[test]
    fn teardown_keeps_engaged_units() {
        let mut sim = pair_sim(600);
        sim.seek(A, B).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        let (units, _nav) = sim.teardown();
        assert_eq!(units.state[A.index()], UnitState::Engaged);
        assert_eq!(units.state[B.index()], UnitState::Engaged);
    }
}
