//! Simulation observer trait for progress reporting and data collection.

use sk_core::{Tick, TrajectoryId, UnitId};
use sk_engage::{Engagement, TrajectoryRegistry};
use sk_unit::UnitStore;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: engagement printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_engaged(&mut self, tick: Tick, engagement: &Engagement) {
///         println!("{tick}: {}", engagement.trajectory);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    ///
    /// `polled` is the number of units whose seek wait was polled this tick.
    fn on_tick_end(&mut self, _tick: Tick, _polled: usize) {}

    /// A trajectory resolved and its two units settled.
    fn on_engaged(&mut self, _tick: Tick, _engagement: &Engagement) {}

    /// A unit's seek wait ended without it resolving an arrival: it was
    /// canceled, interrupted by another unit's arrival, or its trajectory
    /// had already gone stale.
    fn on_seek_ended(&mut self, _tick: Tick, _unit: UnitId, _trajectory: Option<TrajectoryId>) {}

    /// A targeted unit finished sliding into its slot.
    fn on_slot_reached(&mut self, _tick: Tick, _unit: UnitId) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Provides read-only access to unit state and in-flight trajectories so
    /// that writers can record a snapshot without the sim knowing about any
    /// output format.
    fn on_snapshot(
        &mut self,
        _tick:     Tick,
        _units:    &UnitStore,
        _registry: &TrajectoryRegistry,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
