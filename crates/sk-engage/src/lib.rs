//! `sk-engage`: trajectory coordination and slot assignment.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                         |
//! |-----------------|------------------------------------------------------------------|
//! | [`trajectory`]  | `Trajectory`, `Resolution`, `Engagement`                         |
//! | [`registry`]    | `TrajectoryRegistry`: owns approaches, arbitrates arrivals      |
//! | [`slot`]        | `best_slot`: nearest-anchor selection                           |
//! | [`agent`]       | per-unit seek state machine: `start`, `poll`, `cancel`           |
//! | [`error`]       | `EngageError`, `EngageResult<T>`                                 |
//!
//! # Design notes
//!
//! Everything here is generic over [`sk_unit::UnitRoster`] (unit state) and
//! [`sk_nav::Navigator`] (movement).  Nothing is global: the host owns the
//! registry and passes the roster and navigator in on every call.
//!
//! Arrival races are settled by call order.  When two units approach each
//! other and both arrive in the same tick, whichever is polled first
//! resolves; its resolution cancels the other's trajectory, and the other's
//! later resolution finds nothing to resolve.

pub mod agent;
pub mod error;
pub mod registry;
pub mod slot;
pub mod trajectory;


pub use agent::SeekStep;
pub use error::{EngageError, EngageResult};
pub use registry::TrajectoryRegistry;
pub use slot::best_slot;
pub use trajectory::{Engagement, Resolution, Trajectory};
