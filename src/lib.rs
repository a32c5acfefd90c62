//! Entry tracker: follow a single-page timeline and capture contest entries.
//!
//! The crate is built around a small guarded state machine. A host (browser
//! extension, test harness, headless driver) feeds it change notifications;
//! the tracker works out which page is showing, watches the feed while it is
//! visible, parses entries as they render, and offers the captured entry as a
//! host command on the composer page.
//!
//! # Core Concepts
//!
//! - **State**: type-safe state representation via the `State` trait
//! - **Guards**: pure predicates that decide whether a rule may fire
//! - **Effects**: closures that mutate the machine-owned context
//! - **Extraction**: structural classification and parsing of entry nodes
//!
//! # Example
//!
//! ```rust
//! use entry_tracker::builder::{StateMachineBuilder, TransitionBuilder};
//! use entry_tracker::core::Event;
//! use entry_tracker::state_enum;
//! use std::fmt;
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
//! enum Push { Push }
//!
//! impl fmt::Display for Push {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("Push")
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct PushEvent;
//!
//! impl Event for PushEvent {
//!     type Tag = Push;
//!     fn tag(&self) -> Push { Push::Push }
//! }
//!
//! let mut machine = StateMachineBuilder::new()
//!     .initial(Door::Closed)
//!     .context(0u32)
//!     .rule(
//!         TransitionBuilder::<Door, PushEvent, u32>::new()
//!             .from(Door::Closed)
//!             .to(Door::Open)
//!             .on(Push::Push)
//!             .then(|_, pushes: &mut u32| *pushes += 1),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! assert!(machine.dispatch(PushEvent).is_success());
//! assert_eq!(machine.state(), &Door::Open);
//! assert_eq!(*machine.context(), 1);
//! assert!(!machine.try_dispatch(PushEvent));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod dom;
pub mod extract;
pub mod host;
pub mod machine;
pub mod navigation;
pub mod orchestrator;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use config::{ConfigError, ConfigErrors, TrackerConfig};
pub use core::{ChangeTracker, Event, Guard, State};
pub use extract::{EntryParser, EntryRecord, FailureReason};
pub use machine::{DispatchError, StateMachine, TransitionResult};
pub use navigation::{Locator, NavEvent, NavigationState};
pub use orchestrator::Orchestrator;
