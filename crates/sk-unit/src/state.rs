//! Unit lifecycle state and the cooperative cancellation token.

use std::fmt;

/// Where a unit is in the engagement lifecycle.
///
/// ```text
/// Idle ──start──▶ Seeking ──arrival──▶ Engaged
///   ▲                │
///   └────cancel──────┘
///
/// (targeted by someone else's arrival)
/// any ──▶ Engaging ──slot approach done──▶ Engaged
/// ```
///
/// `Engaged` is terminal; nothing in the engine leaves it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitState {
    /// No trajectory.  Navigation may still be enabled for free roaming.
    #[default]
    Idle,
    /// Approaching a target unit; polled once per tick.
    Seeking,
    /// Sliding into an assigned slot.  Cannot be canceled.
    Engaging,
    /// Stationary, navigation disabled.
    Engaged,
}

impl UnitState {
    /// `true` for `Engaging` and `Engaged`.
    #[inline]
    pub fn is_committed(self) -> bool {
        matches!(self, UnitState::Engaging | UnitState::Engaged)
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitState::Idle     => "idle",
            UnitState::Seeking  => "seeking",
            UnitState::Engaging => "engaging",
            UnitState::Engaged  => "engaged",
        };
        f.write_str(s)
    }
}

/// Cancellation flag for one Seeking wait.
///
/// Installed when the wait begins and released (dropped) when it ends.  A
/// request only takes effect the next time the owning unit is polled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CancelToken {
    requested: bool,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request(&mut self) {
        self.requested = true;
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested
    }
}
