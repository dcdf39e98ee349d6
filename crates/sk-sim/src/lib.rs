//! `sk-sim`: tick loop driver for the rust_skirmish engagement engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Movement: Navigator::advance moves every enabled unit.
//!   ② Slots   : slot approaches advance; finished units become Engaged.
//!   ③ Seek    : each unit with a seek wait is polled, ascending UnitId:
//!                  cancel requested → Idle, trajectory canceled
//!                  arrived          → registry resolves the arrival
//!                  otherwise        → keep waiting
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sk_core::{Placement, SimConfig, TeamId, UnitId, Vec2};
//! use sk_nav::SteeringNavigator;
//! use sk_sim::{NoopObserver, SimBuilder};
//! use sk_unit::UnitStoreBuilder;
//!
//! let config = SimConfig::default();
//! let units = UnitStoreBuilder::new()
//!     .slot_offsets(vec![Vec2::X, Vec2::NEG_X])
//!     .unit(TeamId(0), Placement::at(Vec2::ZERO))
//!     .unit(TeamId(1), Placement::at(Vec2::new(10.0, 0.0)))
//!     .build();
//! let nav = SteeringNavigator::new(config.nav, units.count);
//! let mut sim = SimBuilder::new(config, units, nav).build()?;
//! sim.seek(UnitId(0), UnitId(1))?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
