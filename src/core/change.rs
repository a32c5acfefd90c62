//! Last-seen value tracking.

/// Remembers the last value it was shown and reports whether a new value
/// differs from it.
///
/// # Example
///
/// ```rust
/// use entry_tracker::core::ChangeTracker;
///
/// let mut tracker = ChangeTracker::new();
/// assert!(tracker.observe("/home"));
/// assert!(!tracker.observe("/home"));
/// assert!(tracker.observe("/search"));
/// ```
#[derive(Clone, Debug)]
pub struct ChangeTracker<T> {
    last_seen: Option<T>,
}

impl<T> Default for ChangeTracker<T> {
    fn default() -> Self {
        Self { last_seen: None }
    }
}

impl<T: PartialEq> ChangeTracker<T> {
    pub fn new() -> Self {
        Self { last_seen: None }
    }

    /// Record `value` and return `true` if it differs from the previous one.
    ///
    /// The first observation always counts as a change.
    pub fn observe(&mut self, value: T) -> bool {
        if self.last_seen.as_ref() == Some(&value) {
            return false;
        }
        self.last_seen = Some(value);
        true
    }

    pub fn last_seen(&self) -> Option<&T> {
        self.last_seen.as_ref()
    }

    /// Forget the last value so the next observation counts as a change.
    pub fn reset(&mut self) {
        self.last_seen = None;
    }
}
