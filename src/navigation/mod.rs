//! Page navigation model.
//!
//! The tracker follows the page through six states. It watches the whole
//! document until the location looks like the feed or the composer, waits for
//! that page to render, and then either parses new feed entries or offers the
//! captured record as a host command.

mod context;
mod event;
mod location;
mod rules;

pub use context::{MessageFormatter, NavigationContext};
pub use event::{NavEvent, NavTag, NavigationState};
pub use location::{LocationPattern, Locator};
pub use rules::{navigation_rules, NavigationMachine, NavigationRule};
