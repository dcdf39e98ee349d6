//! `sk-nav`: the navigation-provider seam.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`provider`]  | `Navigator` trait, `Destination`                                |
//! | [`route`]     | `WaypointRoute`: looping patrol for otherwise idle units         |
//! | [`state`]     | `NavState`: per-unit navigation state                          |
//! | [`store`]     | `NavStore`: `Vec<NavState>` indexed by `UnitId`                |
//! | [`steering`]  | `SteeringNavigator`: straight-line movement, no path planning  |
//!
//! # Movement model
//!
//! The engagement engine never computes paths.  It only asks a
//! [`Navigator`] whether a unit has arrived, turns navigation on and off,
//! and lets it move units once per tick via [`Navigator::advance`].  Real
//! hosts plug in their own path planner; [`SteeringNavigator`] heads
//! straight for the destination and is enough for open ground and tests.

pub mod provider;
pub mod route;
pub mod state;
pub mod steering;
pub mod store;


pub use provider::{Destination, Navigator};
pub use route::WaypointRoute;
pub use state::NavState;
pub use steering::SteeringNavigator;
pub use store::NavStore;
