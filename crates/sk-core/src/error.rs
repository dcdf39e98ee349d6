//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `SkError` as one variant
//! via `#[from]` where they need to surface it.

use thiserror::Error;

use crate::UnitId;

/// The top-level error type for `sk-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SkError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `sk-core`.
pub type SkResult<T> = Result<T, SkError>;
