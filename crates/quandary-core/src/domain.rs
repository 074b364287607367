use std::fmt;

use rand::RngCore;

use crate::{
    Action, Distribution, ModelError, ObservationModel, PROB_TOLERANCE, RewardFunction, Schema,
    State, TerminalFunction,
};

/// A fully assembled POMDP: schema, actions, observation model, reward,
/// termination, and the seed states handed to state-space enumerators.
///
/// Every component is fixed at build time; a `Domain` is shared by reference
/// and is safe to query from several threads at once.
pub struct Domain {
    schema: Schema,
    state_class: String,
    observation_class: String,
    actions: Vec<Box<dyn Action>>,
    observation_model: Box<dyn ObservationModel>,
    reward: Box<dyn RewardFunction>,
    terminal: Box<dyn TerminalFunction>,
    seeds: Vec<State>,
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("state_class", &self.state_class)
            .field("observation_class", &self.observation_class)
            .field("actions", &self.action_names())
            .field("seeds", &self.seeds.len())
            .finish_non_exhaustive()
    }
}

impl Domain {
    /// Schema every state and observation is checked against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Class whose single instance carries the world state.
    pub fn state_class(&self) -> &str {
        &self.state_class
    }

    /// Class of observation tokens.
    pub fn observation_class(&self) -> &str {
        &self.observation_class
    }

    /// Actions in registration order.
    pub fn actions(&self) -> &[Box<dyn Action>] {
        &self.actions
    }

    /// Action identifiers in registration order.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Look up an action by exact, case-sensitive name.
    pub fn action(&self, name: &str) -> Result<&dyn Action, ModelError> {
        self.actions
            .iter()
            .find(|a| a.name() == name)
            .map(|a| a.as_ref())
            .ok_or_else(|| ModelError::UnknownAction {
                action: name.to_string(),
            })
    }

    /// Read-only handle to the observation model.
    pub fn observation_model(&self) -> &dyn ObservationModel {
        self.observation_model.as_ref()
    }

    /// Read-only handle to the reward function.
    pub fn reward_fn(&self) -> &dyn RewardFunction {
        self.reward.as_ref()
    }

    /// Read-only handle to the terminal predicate.
    pub fn terminal_fn(&self) -> &dyn TerminalFunction {
        self.terminal.as_ref()
    }

    /// Initial world states used to seed reachability enumeration.
    pub fn seed_states(&self) -> &[State] {
        &self.seeds
    }

    /// A world state must be schema-valid and hold exactly one world-state object.
    pub fn validate_state(&self, state: &State) -> Result<(), ModelError> {
        self.schema.validate_state(state)?;
        state.expect_class_count(&self.state_class, 1, 1)?;
        self.reject_foreign_objects(state, &self.state_class)
    }

    /// An observation must be schema-valid and hold at most one token object.
    pub fn validate_observation(&self, observation: &State) -> Result<(), ModelError> {
        self.schema.validate_state(observation)?;
        observation.expect_class_count(&self.observation_class, 0, 1)?;
        self.reject_foreign_objects(observation, &self.observation_class)
    }

    fn reject_foreign_objects(&self, state: &State, allowed: &str) -> Result<(), ModelError> {
        if let Some(foreign) = state.objects().iter().find(|o| o.class() != allowed) {
            return Err(ModelError::UnexpectedObjects {
                class: foreign.class().to_string(),
                count: state.objects_of_class(foreign.class()).count(),
            });
        }
        Ok(())
    }

    /// Enumerate `action` from `state`, checking every branch and the total mass.
    pub fn transitions(&self, action: &str, state: &State) -> Result<Distribution<State>, ModelError> {
        self.validate_state(state)?;
        let dist = self.action(action)?.transitions(state)?;
        for (next, _) in dist.iter() {
            self.validate_state(next)?;
        }
        dist.ensure_normalized(&format!("action '{action}'"), state, PROB_TOLERANCE)?;
        Ok(dist)
    }

    /// Observation distribution after `action` produced `next`, checked like `transitions`.
    pub fn observations(&self, action: &str, next: &State) -> Result<Distribution<State>, ModelError> {
        self.validate_state(next)?;
        self.action(action)?;
        let dist = self.observation_model.distribution(next, action)?;
        for (observation, _) in dist.iter() {
            self.validate_observation(observation)?;
        }
        dist.ensure_normalized(
            &format!("observations for action '{action}'"),
            next,
            PROB_TOLERANCE,
        )?;
        Ok(dist)
    }

    /// Draw one post-state for `action`.
    pub fn sample_step(
        &self,
        action: &str,
        state: &State,
        rng: &mut dyn RngCore,
    ) -> Result<State, ModelError> {
        self.action(action)?.sample_step(state, rng)
    }

    /// Reward for the realized transition `state --action--> next`.
    pub fn reward(&self, state: &State, action: &str, next: &State) -> Result<f64, ModelError> {
        self.reward.reward(state, action, next)
    }

    /// Evaluate the terminal predicate on `state`.
    pub fn is_terminal(&self, state: &State) -> Result<bool, ModelError> {
        self.terminal.is_terminal(state)
    }
}

/// Struct to assemble a `Domain`
pub struct DomainBuilder {
    schema: Schema,
    state_class: String,
    observation_class: String,
    actions: Vec<Box<dyn Action>>,
    observation_model: Option<Box<dyn ObservationModel>>,
    reward: Option<Box<dyn RewardFunction>>,
    terminal: Option<Box<dyn TerminalFunction>>,
    seeds: Vec<State>,
}

impl DomainBuilder {
    /// Start a domain over `schema` with the given world-state and observation classes.
    pub fn new(
        schema: Schema,
        state_class: impl Into<String>,
        observation_class: impl Into<String>,
    ) -> Self {
        Self {
            schema,
            state_class: state_class.into(),
            observation_class: observation_class.into(),
            actions: Vec::new(),
            observation_model: None,
            reward: None,
            terminal: None,
            seeds: Vec::new(),
        }
    }

    /// Schema every state and observation is checked against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register an action; names must be unique.
    pub fn add_action(&mut self, action: impl Action + 'static) -> Result<&mut Self, ModelError> {
        if self.actions.iter().any(|a| a.name() == action.name()) {
            return Err(ModelError::SchemaConflict {
                kind: "action",
                name: action.name().to_string(),
            });
        }
        self.actions.push(Box::new(action));
        Ok(self)
    }

    /// Set the observation model, replacing any earlier one.
    pub fn set_observation_model(&mut self, model: impl ObservationModel + 'static) -> &mut Self {
        self.observation_model = Some(Box::new(model));
        self
    }

    /// Set the reward function, replacing any earlier one.
    pub fn set_reward_fn(&mut self, reward: impl RewardFunction + 'static) -> &mut Self {
        self.reward = Some(Box::new(reward));
        self
    }

    /// Set the terminal predicate, replacing any earlier one.
    pub fn set_terminal_fn(&mut self, terminal: impl TerminalFunction + 'static) -> &mut Self {
        self.terminal = Some(Box::new(terminal));
        self
    }

    /// Append a seed state; it is validated in `build`.
    pub fn add_seed_state(&mut self, state: State) -> &mut Self {
        self.seeds.push(state);
        self
    }

    /// Check the assembly and freeze it into a `Domain`.
    pub fn build(self) -> Result<Domain, ModelError> {
        self.schema.require_class(&self.state_class)?;
        self.schema.require_class(&self.observation_class)?;

        if self.actions.is_empty() {
            return Err(ModelError::MissingComponent { component: "actions" });
        }

        let domain = Domain {
            observation_model: self.observation_model.ok_or(ModelError::MissingComponent {
                component: "observation model",
            })?,
            reward: self.reward.ok_or(ModelError::MissingComponent {
                component: "reward function",
            })?,
            terminal: self.terminal.ok_or(ModelError::MissingComponent {
                component: "terminal function",
            })?,
            schema: self.schema,
            state_class: self.state_class,
            observation_class: self.observation_class,
            actions: self.actions,
            seeds: self.seeds,
        };

        for seed in &domain.seeds {
            domain.validate_state(seed)?;
        }
        for observation in domain.observation_model.enumerate_observations() {
            domain.validate_observation(&observation)?;
        }

        Ok(domain)
    }
}
