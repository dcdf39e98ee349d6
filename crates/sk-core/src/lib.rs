//! `sk-core`: foundational types for the `rust_skirmish` engagement engine.
//!
//! This crate is a dependency of every other `sk-*` crate.  It has no
//! `sk-*` dependencies and only `glam` and `thiserror` externally, plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `UnitId`, `TrajectoryId`, `TeamId`                    |
//! | [`geo`]         | `Vec2` re-export, `Placement`, anchor transforms      |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`, `ApproachProfile`    |
//! | [`error`]       | `SkError`, `SkResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SkError, SkResult};
pub use geo::{Placement, Vec2};
pub use ids::{TeamId, TrajectoryId, UnitId};
pub use time::{ApproachProfile, NavConfig, SimClock, SimConfig, Tick};
