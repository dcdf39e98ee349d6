use sk_core::{TrajectoryId, UnitId};
use sk_unit::UnitState;
use thiserror::Error;

/// Invalid engagement operations.
///
/// Stale references (canceling or resolving a trajectory that is already
/// gone) and cancellation are not errors and never produce one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngageError {
    #[error("unit {0} cannot target itself")]
    InvalidTarget(UnitId),

    #[error("unit {0} is not in the roster")]
    UnknownUnit(UnitId),

    #[error("unit {unit} already owns {trajectory}; cancel it first")]
    AlreadyTargeting {
        unit:       UnitId,
        trajectory: TrajectoryId,
    },

    #[error("unit {0} is engaged and cannot start an approach")]
    AlreadyEngaged(UnitId),

    #[error("unit {unit} must be idle to start seeking, but is {state}")]
    NotIdle {
        unit:  UnitId,
        state: UnitState,
    },

    #[error("destination of unit {0} is not a unit")]
    NoTargetUnit(UnitId),

    #[error("trajectory ids exhausted")]
    TrajectoryIdsExhausted,
}

pub type EngageResult<T> = Result<T, EngageError>;
