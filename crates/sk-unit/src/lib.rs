//! `sk-unit`: Structure-of-Arrays unit storage for `rust_skirmish`.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`state`]       | `UnitState` lifecycle enum, `CancelToken`                 |
//! | [`approach`]    | `SlotApproach`: fixed-duration slide into a slot         |
//! | [`store`]       | `UnitStore` (SoA arrays)                                  |
//! | [`builder`]     | `UnitStoreBuilder` (fluent construction)                  |
//! | [`roster`]      | `UnitRoster`: the engageable-unit capability trait       |
//!
//! The engagement core in `sk-engage` is generic over [`UnitRoster`];
//! [`UnitStore`] is the implementation the simulation uses.

pub mod approach;
pub mod builder;
pub mod roster;
pub mod state;
pub mod store;


pub use approach::SlotApproach;
pub use builder::UnitStoreBuilder;
pub use roster::UnitRoster;
pub use state::{CancelToken, UnitState};
pub use store::UnitStore;
