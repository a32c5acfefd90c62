//! Outcomes of a dispatch attempt.

use crate::core::{Event, State};
use thiserror::Error;

/// Why a dispatched event did not change the state.
///
/// Both variants are recoverable: they are reported to listeners and
/// returned to the caller, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no rule for {event} in {state}")]
    NoRule { event: String, state: String },

    #[error("guard rejected {event} in {state}")]
    GuardRejected { event: String, state: String },
}

impl DispatchError {
    pub(crate) fn no_rule<S: State, E: Event>(state: &S, event: &E) -> Self {
        Self::NoRule {
            event: event.tag().to_string(),
            state: state.name().to_string(),
        }
    }

    pub(crate) fn guard_rejected<S: State, E: Event>(state: &S, event: &E) -> Self {
        Self::GuardRejected {
            event: event.tag().to_string(),
            state: state.name().to_string(),
        }
    }
}

/// Reported to every listener after each dispatch, and returned to the
/// caller of [`StateMachine::dispatch`](crate::machine::StateMachine::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResult<S, E> {
    Success { from: S, to: S, event: E },
    Failure { from: S, event: E, reason: DispatchError },
}

impl<S, E> TransitionResult<S, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn from_state(&self) -> &S {
        match self {
            Self::Success { from, .. } | Self::Failure { from, .. } => from,
        }
    }

    /// The committed state, if the transition succeeded.
    pub fn to_state(&self) -> Option<&S> {
        match self {
            Self::Success { to, .. } => Some(to),
            Self::Failure { .. } => None,
        }
    }

    pub fn event(&self) -> &E {
        match self {
            Self::Success { event, .. } | Self::Failure { event, .. } => event,
        }
    }

    pub fn reason(&self) -> Option<&DispatchError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason, .. } => Some(reason),
        }
    }
}
