//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick represents
//! `tick_duration_secs` of simulated time (a frame, typically 1/30 s), and
//! every per-tick movement step is scaled by that value:
//!
//!   elapsed_secs = tick * tick_duration_secs
//!
//! Integer ticks keep ordering and comparisons exact; only movement uses
//! floating point.

use std::fmt;

use crate::{SkError, SkResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and converts it to simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick.
    pub tick_duration_secs: f32,
    /// The current tick: advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f32) -> Self {
        Self {
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.current_tick.0 as f32 * self.tick_duration_secs
    }

    /// How many ticks span `secs` seconds? Rounds up.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.tick_duration_secs).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── ApproachProfile ───────────────────────────────────────────────────────────

/// Timing of the short, fixed-duration slide a targeted unit performs into
/// its assigned slot.
///
/// Each tick advances the approach by `tick_duration_secs * speed`; the
/// slide ends once that accumulated time reaches `duration_secs`.  With the
/// defaults (1 s, speed 2) the slide lasts half a simulated second.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApproachProfile {
    pub duration_secs: f32,
    pub speed:         f32,
}

impl Default for ApproachProfile {
    fn default() -> Self {
        Self { duration_secs: 1.0, speed: 2.0 }
    }
}

// ── NavConfig ─────────────────────────────────────────────────────────────────

/// Parameters of the built-in steering navigator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavConfig {
    /// Cruise speed in world units per second.
    pub speed: f32,

    /// A unit counts as arrived once it is within this distance of its
    /// destination.
    pub arrival_radius: f32,

    /// Within this distance the unit slows down smoothly.  Zero disables
    /// braking.
    pub slowdown_radius: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self { speed: 2.0, arrival_radius: 1.0, slowdown_radius: 3.0 }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Default: 1/30.
    pub tick_duration_secs: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed for scenario generation.
    pub seed: u64,

    /// Invoke the snapshot observer hook every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Final slot-approach timing.
    pub approach: ApproachProfile,

    /// Built-in navigator parameters.
    pub nav: NavConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:    1.0 / 30.0,
            total_ticks:           1_800,
            seed:                  42,
            output_interval_ticks: 0,
            approach:              ApproachProfile::default(),
            nav:                   NavConfig::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    /// Reject values that would stall or invert movement.
    pub fn validate(&self) -> SkResult<()> {
        let positive = [
            ("tick_duration_secs",     self.tick_duration_secs),
            ("approach.duration_secs", self.approach.duration_secs),
            ("approach.speed",         self.approach.speed),
            ("nav.speed",              self.nav.speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SkError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.nav.arrival_radius.is_finite() && self.nav.arrival_radius >= 0.0) {
            return Err(SkError::Config(format!(
                "nav.arrival_radius must be non-negative, got {}",
                self.nav.arrival_radius
            )));
        }
        if !(self.nav.slowdown_radius.is_finite() && self.nav.slowdown_radius >= 0.0) {
            return Err(SkError::Config(format!(
                "nav.slowdown_radius must be non-negative, got {}",
                self.nav.slowdown_radius
            )));
        }
        Ok(())
    }
}
