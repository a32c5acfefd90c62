//! Core State trait for navigation states.
//!
//! All state machine states must implement this trait, which provides
//! pure methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// States are small immutable values describing where the machine currently
/// is. There is no "no state" value: a machine always holds exactly one.
///
/// # Required Traits
///
/// - `Clone`: the previous state is reported in every transition result
/// - `PartialEq`: rule lookup compares the current state with `from`
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states can be snapshotted by the host
///
/// # Example
///
/// ```rust
/// use entry_tracker::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum PageState {
///     Idle,
///     Watching,
/// }
///
/// impl State for PageState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Watching => "Watching",
///         }
///     }
/// }
///
/// assert_eq!(PageState::Watching.name(), "Watching");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Loading,
        Monitoring,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Initial => "Initial",
                Self::Loading => "Loading",
                Self::Monitoring => "Monitoring",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Loading.name(), "Loading");
        assert_eq!(TestState::Monitoring.name(), "Monitoring");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Loading;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn state_is_comparable() {
        assert_eq!(TestState::Monitoring, TestState::Monitoring.clone());
        assert_ne!(TestState::Initial, TestState::Monitoring);
    }
}
