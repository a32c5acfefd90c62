//! Core state machine types.
//!
//! This module contains the pure building blocks of the state machine:
//! - State definitions via the `State` trait
//! - Tagged events via the `Event` trait
//! - Guard predicates for transition control
//! - Last-seen value tracking
//!
//! Nothing in this module performs I/O or touches a host.

mod change;
mod event;
mod guard;
mod state;

pub use change::ChangeTracker;
pub use event::Event;
pub use guard::Guard;
pub use state::State;
