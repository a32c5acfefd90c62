//! Transition rules with optional guards and effects.

use crate::core::{Event, Guard, State};
use std::fmt;
use std::rc::Rc;

/// Side effect run once a transition is accepted, before the state commits.
///
/// Effects receive the triggering event and the machine's context. They may
/// mutate the context but never replace it.
pub type Effect<E, C> = Rc<dyn Fn(&E, &mut C)>;

/// A rule mapping `(from, event tag)` to a target state.
///
/// A rule with no event tag is never selected by dispatch; rules built
/// through [`TransitionBuilder`](crate::builder::TransitionBuilder) always
/// carry one.
pub struct TransitionRule<S: State, E: Event, C> {
    pub from: S,
    pub to: S,
    pub event: Option<E::Tag>,
    pub guard: Option<Guard<E>>,
    pub effect: Option<Effect<E, C>>,
}

impl<S: State, E: Event, C> TransitionRule<S, E, C> {
    /// Check if this rule is keyed on `(current, tag)`. Guards are ignored.
    pub fn matches(&self, current: &S, tag: E::Tag) -> bool {
        *current == self.from && self.event == Some(tag)
    }

    /// Check if the guard (if any) admits this event (pure).
    pub fn admits(&self, event: &E) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(event))
    }
}

impl<S: State, E: Event, C> Clone for TransitionRule<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            event: self.event,
            guard: self.guard.clone(),
            effect: self.effect.as_ref().map(Rc::clone),
        }
    }
}

impl<S: State, E: Event, C> fmt::Debug for TransitionRule<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("event", &self.event)
            .field("guarded", &self.guard.is_some())
            .field("has_effect", &self.effect.is_some())
            .finish()
    }
}
