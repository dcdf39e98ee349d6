//! skirmish: two squads close on each other and pair off.
//!
//! Both squads patrol small loops around their start positions until the
//! order to engage.  Then every unit seeks its nearest uncommitted
//! opponent.  The first of a pair to arrive wins the arbitration; the other
//! is pulled into one of the winner's target's slot anchors.  Units whose
//! target was taken by someone else pick a new target once per second.  One
//! unit is ordered to fall back: it patrols its start position for a while
//! before rejoining.
//!
//! Usage: `skirmish [config.json]`.  The optional file holds a partial
//! `SimConfig`; missing fields take their defaults.  Set `RUST_LOG=debug`
//! to see engine diagnostics.

use std::f32::consts::PI;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sk_core::{Placement, SimConfig, TeamId, Tick, TrajectoryId, UnitId, Vec2};
use sk_engage::{Engagement, TrajectoryRegistry};
use sk_nav::{Navigator, SteeringNavigator, WaypointRoute};
use sk_sim::{Sim, SimBuilder, SimObserver};
use sk_unit::{UnitState, UnitStore, UnitStoreBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SQUAD_SIZE:        usize  = 6;
const SQUAD_SPREAD:      f32    = 12.0; // lateral spread of each squad
const FRONT_GAP:         f32    = 30.0; // distance between the two start lines
const RETARGET_SECS:     f32    = 1.0;
const ENGAGE_AT_SECS:    f32    = 3.0;
const PATROL_RADIUS:     f32    = 2.0;
const PATROL_DWELL_SECS: f32    = 2.0; // pause at each waypoint
const FALL_BACK_UNIT:    UnitId = UnitId(0);
const FALL_BACK_AT_SECS: f32    = 5.0;
const REJOIN_AT_SECS:    f32    = 9.0;

/// Two anchors either side of the front and one behind, in unit-local space.
fn slot_offsets() -> Vec<Vec2> {
    vec![Vec2::new(1.5, 1.0), Vec2::new(1.5, -1.0), Vec2::new(-1.5, 0.0)]
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Summary {
    engagements:  usize,
    interrupted:  usize,
    slots_filled: usize,
    snapshots:    usize,
    tick_secs:    f32,
}

impl SimObserver for Summary {
    fn on_engaged(&mut self, tick: Tick, engagement: &Engagement) {
        self.engagements += 1;
        let t = engagement.trajectory;
        let slot = match engagement.slot {
            Some((i, p)) => format!("slot {i} at ({:.1}, {:.1})", p.x, p.y),
            None => "in place".to_string(),
        };
        println!(
            "  {:>6.2}s  {} engaged {} ({slot})",
            tick.0 as f32 * self.tick_secs,
            t.targeting,
            t.targeted
        );
        if let Some(canceled) = engagement.canceled {
            println!("           interrupted {canceled}");
        }
    }

    fn on_seek_ended(&mut self, _tick: Tick, _unit: UnitId, _trajectory: Option<TrajectoryId>) {
        self.interrupted += 1;
    }

    fn on_slot_reached(&mut self, _tick: Tick, _unit: UnitId) {
        self.slots_filled += 1;
    }

    fn on_snapshot(&mut self, tick: Tick, units: &UnitStore, registry: &TrajectoryRegistry) {
        self.snapshots += 1;
        info!(
            "{tick}: {} seeking, {} engaged, {} trajectories",
            units.units_in(UnitState::Seeking).count(),
            units.units_in(UnitState::Engaged).count(),
            registry.len()
        );
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(Path::new(&path))
        .with_context(|| format!("reading config {path}"))?;
    let config: SimConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

/// Two squads facing each other across the gap, positions jittered by `rng`.
fn build_units(rng: &mut SmallRng) -> UnitStore {
    let mut builder = UnitStoreBuilder::new().slot_offsets(slot_offsets());
    for (team, x, heading) in [(TeamId(0), 0.0, 0.0), (TeamId(1), FRONT_GAP, PI)] {
        for _ in 0..SQUAD_SIZE {
            let position = Vec2::new(
                x + rng.gen_range(-2.0_f32..2.0),
                rng.gen_range(-SQUAD_SPREAD..SQUAD_SPREAD),
            );
            builder = builder.unit(team, Placement::new(position, heading));
        }
    }
    builder.build()
}

/// A diamond of waypoints around `home`.
fn patrol_route(home: Vec2) -> Result<WaypointRoute> {
    let waypoints = [Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y]
        .into_iter()
        .map(|d| home + d * PATROL_RADIUS)
        .collect();
    WaypointRoute::new(waypoints, PATROL_DWELL_SECS).context("empty patrol route")
}

/// Start a patrol round `unit`'s home position.
fn patrol_home(sim: &mut Sim<SteeringNavigator>, homes: &[Vec2], unit: UnitId) -> Result<()> {
    sim.patrol(unit, patrol_route(homes[unit.index()])?)?;
    Ok(())
}

/// Send every `Idle` unit except `held` after its nearest uncommitted
/// opponent.
fn retarget(sim: &mut Sim<SteeringNavigator>, held: Option<UnitId>) -> Result<usize> {
    let idle: Vec<UnitId> = sim.units.units_in(UnitState::Idle).collect();
    let mut started = 0;
    for unit in idle.into_iter().filter(|&u| Some(u) != held) {
        let Some(target) = sim.units.nearest_opponent(unit) else {
            continue;
        };
        if sim.seek(unit, target)?.is_some() {
            started += 1;
        }
    }
    Ok(started)
}

/// `true` while some idle unit still has an opponent to go after.
fn has_open_targets(units: &UnitStore) -> bool {
    units
        .units_in(UnitState::Idle)
        .any(|u| units.nearest_opponent(u).is_some())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mut rng = SmallRng::seed_from_u64(config.seed);

    println!("=== skirmish ===");
    println!(
        "Units: {}  |  Ticks: {}  |  Seed: {}",
        SQUAD_SIZE * 2,
        config.total_ticks,
        config.seed
    );
    println!();

    let units = build_units(&mut rng);
    let homes: Vec<Vec2> = units.placement.iter().map(|p| p.position).collect();
    let nav = SteeringNavigator::new(config.nav, units.count);
    let mut sim = SimBuilder::new(config, units, nav).build()?;

    let retarget_every = sim.clock.ticks_for_secs(RETARGET_SECS).max(1);
    let engage_at = Tick(sim.clock.ticks_for_secs(ENGAGE_AT_SECS));
    let fall_back_at = Tick(sim.clock.ticks_for_secs(FALL_BACK_AT_SECS));
    let rejoin_at = Tick(sim.clock.ticks_for_secs(REJOIN_AT_SECS));
    let mut summary = Summary { tick_secs: sim.config.tick_duration_secs, ..Summary::default() };

    for unit in sim.units.unit_ids().collect::<Vec<_>>() {
        patrol_home(&mut sim, &homes, unit)?;
    }

    let t0 = Instant::now();
    let mut held = None;
    while sim.clock.current_tick < sim.config.end_tick() {
        let now = sim.clock.current_tick;
        if now == fall_back_at && sim.cancel(FALL_BACK_UNIT) {
            println!("  {FALL_BACK_UNIT} ordered to fall back");
            held = Some(FALL_BACK_UNIT);
        }
        if now == rejoin_at {
            held = None;
        }
        if let Some(unit) = held {
            let idle = sim.units.state[unit.index()] == UnitState::Idle;
            if idle && sim.nav.route(unit).is_none() {
                patrol_home(&mut sim, &homes, unit)?;
            }
        }
        if now >= engage_at && now.0.is_multiple_of(retarget_every) {
            let started = retarget(&mut sim, held)?;
            if started > 0 {
                info!("{now}: {started} units picked a new target");
            }
        }
        sim.step(&mut summary)?;
        if sim.is_settled() && !has_open_targets(&sim.units) {
            break;
        }
    }
    let elapsed = t0.elapsed();

    let ended_at = sim.clock.current_tick;
    let (units, _nav) = sim.teardown();
    let engaged = units.units_in(UnitState::Engaged).count();
    let idle = units.units_in(UnitState::Idle).count();
    if idle > 0 {
        warn!("{idle} units still idle at {ended_at}");
    }

    println!();
    println!("── Summary ─────────────────────────────");
    println!("  ended at       {ended_at} ({:.2}s sim time)", ended_at.0 as f32 * summary.tick_secs);
    println!("  engagements    {}", summary.engagements);
    println!("  seeks ended    {}", summary.interrupted);
    println!("  slots filled   {}", summary.slots_filled);
    println!("  snapshots      {}", summary.snapshots);
    println!("  engaged units  {engaged} / {}", units.count);
    println!("  idle units     {idle}");
    println!("  wall time      {:.1} ms", elapsed.as_secs_f64() * 1e3);
    Ok(())
}
