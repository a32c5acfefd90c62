//! The guarded state machine.
//!
//! # Key Concepts
//!
//! - **Rules**: `(from, event tag) -> to`, with an optional guard and effect
//! - **Dispatch**: first matching rule wins; guard, then effect, then commit,
//!   then listener notification
//! - **Results**: every attempt yields a [`TransitionResult`]; nothing is raised
//!
//! The machine is single-threaded. Guards, effects and listeners are plain
//! closures that may capture `Rc` handles.

mod machine;
mod result;
mod rule;

pub use machine::{ListenerId, StateMachine};
pub use result::{DispatchError, TransitionResult};
pub use rule::{Effect, TransitionRule};
