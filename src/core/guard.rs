//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the dispatched event. They decide
//! whether a matching rule may fire and must not have side effects:
//! `try_dispatch` evaluates them twice on success.

use std::fmt;
use std::rc::Rc;

/// Pure predicate that determines if a transition can fire for an event.
///
/// Guards may capture read-only handles (for example a document query
/// capability), so they are not required to be `Send`.
///
/// # Example
///
/// ```rust
/// use entry_tracker::core::Guard;
///
/// let only_search = Guard::new(|path: &String| path.starts_with("/search"));
///
/// assert!(only_search.check(&"/search?q=x".to_string()));
/// assert!(!only_search.check(&"/home".to_string()));
/// ```
pub struct Guard<E> {
    predicate: Rc<dyn Fn(&E) -> bool>,
}

impl<E> Guard<E> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// Check if the guard admits this event.
    pub fn check(&self, event: &E) -> bool {
        (self.predicate)(event)
    }
}

impl<E> Clone for Guard<E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<E> fmt::Debug for Guard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
