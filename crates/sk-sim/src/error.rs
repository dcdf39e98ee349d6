use sk_core::SkError;
use sk_engage::EngageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{what} length {got} does not match unit count {expected}")]
    UnitCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("engagement error: {0}")]
    Engage(#[from] EngageError),

    #[error(transparent)]
    Core(#[from] SkError),
}

pub type SimResult<T> = Result<T, SimError>;
