//! Guarded state machine with a listener list.

use crate::core::{Event, State};
use crate::machine::result::{DispatchError, TransitionResult};
use crate::machine::rule::TransitionRule;
use tracing::{debug, trace};

/// Identifies a registered listener for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<S, E> = Box<dyn FnMut(&TransitionResult<S, E>)>;

/// State machine driven by tagged events.
///
/// Rules are looked up by the first match on `(current state, event tag)`.
/// When two rules share that key, the one registered first wins and the
/// later one is unreachable; [`StateMachineBuilder`](crate::builder::StateMachineBuilder)
/// rejects such duplicates at build time.
///
/// The context `C` is owned by the machine. Effects are the only code that
/// mutates it; everyone else gets shared access through [`context`](Self::context).
pub struct StateMachine<S: State, E: Event, C> {
    current: S,
    rules: Vec<TransitionRule<S, E, C>>,
    listeners: Vec<(ListenerId, Listener<S, E>)>,
    next_listener: u64,
    context: C,
}

impl<S: State, E: Event, C> StateMachine<S, E, C> {
    /// Create a machine in `initial` with no rules and no listeners.
    pub fn new(initial: S, context: C) -> Self {
        Self {
            current: initial,
            rules: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
            context,
        }
    }

    /// Append one rule.
    pub fn add_transition_rule(&mut self, rule: TransitionRule<S, E, C>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Append rules in order. Overlap is not checked: first registered wins.
    pub fn add_transition_rules<I>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = TransitionRule<S, E, C>>,
    {
        self.rules.extend(rules);
        self
    }

    /// Get current state (pure)
    pub fn state(&self) -> &S {
        &self.current
    }

    pub fn is(&self, state: &S) -> bool {
        self.current == *state
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn rules(&self) -> &[TransitionRule<S, E, C>] {
        &self.rules
    }

    /// True iff some rule is keyed on `(current state, tag)`, ignoring guards.
    pub fn can_handle(&self, tag: E::Tag) -> bool {
        self.rules.iter().any(|r| r.matches(&self.current, tag))
    }

    /// True iff dispatching `event` now would succeed (pure).
    pub fn can_transition(&self, event: &E) -> bool {
        self.evaluate(event).is_ok()
    }

    fn evaluate(&self, event: &E) -> Result<usize, DispatchError> {
        let tag = event.tag();
        let index = self
            .rules
            .iter()
            .position(|r| r.matches(&self.current, tag))
            .ok_or_else(|| DispatchError::no_rule(&self.current, event))?;

        if !self.rules[index].admits(event) {
            return Err(DispatchError::guard_rejected(&self.current, event));
        }
        Ok(index)
    }

    /// Dispatch an event.
    ///
    /// On acceptance the rule's effect runs first, then the state commits,
    /// then listeners are notified. On rejection the state is unchanged, no
    /// effect runs, and listeners receive the failure.
    pub fn dispatch(&mut self, event: E) -> TransitionResult<S, E> {
        let from = self.current.clone();

        let result = match self.evaluate(&event) {
            Err(reason) => {
                trace!(state = from.name(), %reason, "event not handled");
                TransitionResult::Failure {
                    from,
                    event,
                    reason,
                }
            }
            Ok(index) => {
                let rule = &self.rules[index];
                if let Some(effect) = &rule.effect {
                    effect(&event, &mut self.context);
                }
                self.current = rule.to.clone();
                debug!(
                    from = from.name(),
                    to = self.current.name(),
                    event = %event.tag(),
                    "transition accepted"
                );
                TransitionResult::Success {
                    from,
                    to: self.current.clone(),
                    event,
                }
            }
        };

        self.notify(&result);
        result
    }

    /// Dispatch only if the event would be accepted.
    ///
    /// Returns `false` without touching state or listeners otherwise. On
    /// success the match and guard are evaluated a second time by
    /// [`dispatch`](Self::dispatch), so guards must be pure.
    pub fn try_dispatch(&mut self, event: E) -> bool {
        if !self.can_transition(&event) {
            return false;
        }
        self.dispatch(event).is_success()
    }

    /// Register a listener; listeners are notified in registration order.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TransitionResult<S, E>) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, result: &TransitionResult<S, E>) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(result);
        }
    }
}
