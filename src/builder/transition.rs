//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{Event, Guard, State};
use crate::machine::{Effect, TransitionRule};
use std::rc::Rc;

/// Builder for constructing transition rules with a fluent API.
pub struct TransitionBuilder<S: State, E: Event, C> {
    from: Option<S>,
    to: Option<S>,
    event: Option<E::Tag>,
    guard: Option<Guard<E>>,
    effect: Option<Effect<E, C>>,
}

impl<S: State, E: Event, C> TransitionBuilder<S, E, C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            event: None,
            guard: None,
            effect: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Set the event tag this rule reacts to (required).
    pub fn on(mut self, tag: E::Tag) -> Self {
        self.event = Some(tag);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the effect run before the state commits (optional).
    pub fn then<F>(mut self, effect: F) -> Self
    where
        F: Fn(&E, &mut C) + 'static,
    {
        self.effect = Some(Rc::new(effect));
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<TransitionRule<S, E, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;

        Ok(TransitionRule {
            from,
            to,
            event: Some(event),
            guard: self.guard,
            effect: self.effect,
        })
    }
}

impl<S: State, E: Event, C> Default for TransitionBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
