//! Tagged events fed into the state machine.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An event the state machine can be asked to handle.
///
/// Each event belongs to exactly one tag. Rules are keyed by tag, while
/// guards and effects receive the whole event so they can read its payload.
///
/// # Example
///
/// ```rust
/// use entry_tracker::core::Event;
/// use std::fmt;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum DoorTag { Open, Close }
///
/// impl fmt::Display for DoorTag {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         fmt::Debug::fmt(self, f)
///     }
/// }
///
/// #[derive(Debug)]
/// enum DoorEvent { Open { by: String }, Close }
///
/// impl Event for DoorEvent {
///     type Tag = DoorTag;
///
///     fn tag(&self) -> DoorTag {
///         match self {
///             Self::Open { .. } => DoorTag::Open,
///             Self::Close => DoorTag::Close,
///         }
///     }
/// }
///
/// assert_eq!(DoorEvent::Open { by: "ann".into() }.tag(), DoorTag::Open);
/// ```
pub trait Event: Debug {
    /// Payload-free discriminant used for rule lookup.
    type Tag: Copy + Eq + Hash + Debug + Display;

    /// The tag of this event.
    fn tag(&self) -> Self::Tag;
}
