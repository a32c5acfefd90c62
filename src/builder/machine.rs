//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Event, State};
use crate::machine::{StateMachine, TransitionRule};

/// Builder for constructing state machines with a fluent API.
///
/// Unlike [`StateMachine::add_transition_rules`], the builder refuses rule
/// sets where two rules share `(from, event)`.
pub struct StateMachineBuilder<S: State, E: Event, C> {
    initial: Option<S>,
    context: Option<C>,
    rules: Vec<TransitionRule<S, E, C>>,
}

impl<S: State, E: Event, C> StateMachineBuilder<S, E, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            context: None,
            rules: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the context owned by the machine (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(mut self, builder: TransitionBuilder<S, E, C>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.rules.push(rule);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: TransitionRule<S, E, C>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple rules at once.
    pub fn rules(mut self, rules: Vec<TransitionRule<S, E, C>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or rules overlap.
    pub fn build(self) -> Result<StateMachine<S, E, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let context = self.context.ok_or(BuildError::MissingContext)?;

        check_unique(&self.rules)?;

        let mut machine = StateMachine::new(initial, context);
        machine.add_transition_rules(self.rules);
        Ok(machine)
    }
}

impl<S: State, E: Event, C> Default for StateMachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_unique<S: State, E: Event, C>(rules: &[TransitionRule<S, E, C>]) -> Result<(), BuildError> {
    for (i, rule) in rules.iter().enumerate() {
        let Some(tag) = rule.event else { continue };
        if rules[..i].iter().any(|earlier| earlier.matches(&rule.from, tag)) {
            return Err(BuildError::DuplicateRule {
                from: rule.from.name().to_string(),
                event: tag.to_string(),
            });
        }
    }
    Ok(())
}
