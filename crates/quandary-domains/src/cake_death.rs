//! Moral-uncertainty domain.
//!
//! The agent does not know which of two final decisions its principal
//! actually values. It may ask (free, noiseless) before committing; either
//! decision ends the episode.

use quandary_core::{
    Absorbing, AttributeType, DeterministicAction, Distribution, Domain, DomainBuilder,
    ModelError, ObjectInstance, ObservationModel, Record, RewardFunction, Schema, State,
    TerminalFunction, Value, null_action,
};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, YamlConfig, check_finite};

const DEFAULT_CAKE_DEATH_YAML: &str = include_str!("../config/cake_death.default.yaml");

pub const ATT_UTILITY: &str = "trueU";
pub const ATT_TERMINAL: &str = "terminal";
pub const ATT_MORAL_ANSWER: &str = "moral answer";

pub const CLASS_STATE: &str = "mdp";
pub const CLASS_ANSWER: &str = "obsAnswer";

pub const ACTION_ASK_MORAL: &str = "askMoral";
pub const ACTION_CAKE: &str = "bakeCake";
pub const ACTION_DEATH: &str = "killPeople";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The hidden true utility.
pub enum Utility {
    Cake,
    Death,
}

impl Utility {
    pub const ALL: [Utility; 2] = [Utility::Cake, Utility::Death];

    /// Category name used in states and answers.
    pub fn as_str(self) -> &'static str {
        match self {
            Utility::Cake => "cake",
            Utility::Death => "death",
        }
    }

    fn parse(attribute: &str, value: &str) -> Result<Self, ModelError> {
        match value {
            "cake" => Ok(Utility::Cake),
            "death" => Ok(Utility::Death),
            other => Err(ModelError::TypeMismatch {
                attribute: attribute.to_string(),
                expected: "one of [cake, death]".to_string(),
                found: format!("category '{other}'"),
            }),
        }
    }
}

/// Attribute and class declarations for the domain.
pub fn schema() -> Result<Schema, ModelError> {
    let categories = Utility::ALL.map(Utility::as_str);
    let mut schema = Schema::new();
    schema
        .define_attribute(ATT_UTILITY, AttributeType::enumerated(categories))?
        .define_attribute(ATT_TERMINAL, AttributeType::Boolean)?
        .define_attribute(ATT_MORAL_ANSWER, AttributeType::enumerated(categories))?
        .define_class(CLASS_STATE, [ATT_UTILITY, ATT_TERMINAL])?
        .define_class(CLASS_ANSWER, [ATT_MORAL_ANSWER])?;
    Ok(schema)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dilemma {
    pub utility: Utility,
    pub terminal: bool,
}

impl Record for Dilemma {
    const CLASS: &'static str = CLASS_STATE;

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            (ATT_UTILITY, self.utility.as_str().into()),
            (ATT_TERMINAL, self.terminal.into()),
        ]
    }

    fn from_object(object: &ObjectInstance) -> Result<Self, ModelError> {
        Ok(Self {
            utility: Utility::parse(ATT_UTILITY, object.get_category(ATT_UTILITY)?)?,
            terminal: object.get_bool(ATT_TERMINAL)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoralAnswer {
    pub utility: Utility,
}

impl Record for MoralAnswer {
    const CLASS: &'static str = CLASS_ANSWER;

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![(ATT_MORAL_ANSWER, self.utility.as_str().into())]
    }

    fn from_object(object: &ObjectInstance) -> Result<Self, ModelError> {
        Ok(Self {
            utility: Utility::parse(ATT_MORAL_ANSWER, object.get_category(ATT_MORAL_ANSWER)?)?,
        })
    }
}

pub fn dilemma_state(utility: Utility, terminal: bool) -> State {
    Dilemma { utility, terminal }.to_state()
}

pub fn answer_observation(utility: Utility) -> State {
    MoralAnswer { utility }.to_state()
}

/// One undecided state per hidden utility.
pub fn seed_states() -> Vec<State> {
    Utility::ALL
        .into_iter()
        .map(|utility| dilemma_state(utility, false))
        .collect()
}

fn final_decision(state: &State) -> Result<State, ModelError> {
    let dilemma = Dilemma::from_state(state)?;
    Ok(Dilemma {
        terminal: true,
        ..dilemma
    }
    .to_state())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionMade;

impl TerminalFunction for DecisionMade {
    fn is_terminal(&self, state: &State) -> Result<bool, ModelError> {
        Ok(Dilemma::from_state(state)?.terminal)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Null observation once decided; the ask action reveals the true utility.
pub struct CakeDeathObservations;

impl ObservationModel for CakeDeathObservations {
    fn enumerate_observations(&self) -> Vec<State> {
        let mut all = vec![State::null()];
        all.extend(Utility::ALL.map(answer_observation));
        all
    }

    fn distribution(&self, state: &State, action: &str) -> Result<Distribution<State>, ModelError> {
        let dilemma = Dilemma::from_state(state)?;
        if dilemma.terminal || action == ACTION_CAKE || action == ACTION_DEATH {
            return Ok(Distribution::certain(State::null()));
        }

        let mut dist = Distribution::new();
        for utility in Utility::ALL {
            let mass = if utility == dilemma.utility { 1.0 } else { 0.0 };
            dist.push(answer_observation(utility), mass);
        }
        Ok(dist)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CakeDeathConfig {
    /// Reward for baking a cake when cake is what is valued.
    pub cake_reward: f64,
    /// Reward for the other decision when it is what is valued.
    pub death_reward: f64,
}

impl Default for CakeDeathConfig {
    fn default() -> Self {
        CakeDeathConfig {
            cake_reward: 1.0,
            death_reward: 3.0,
        }
    }
}

impl YamlConfig for CakeDeathConfig {
    fn default_yaml() -> &'static str {
        DEFAULT_CAKE_DEATH_YAML
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_finite("cake_reward", self.cake_reward)?;
        check_finite("death_reward", self.death_reward)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Pays only for the decision matching the pre-state's true utility.
pub struct CakeDeathReward {
    config: CakeDeathConfig,
}

impl CakeDeathReward {
    pub fn new(config: CakeDeathConfig) -> Self {
        Self { config }
    }
}

impl RewardFunction for CakeDeathReward {
    fn reward(&self, state: &State, action: &str, _next: &State) -> Result<f64, ModelError> {
        let utility = Dilemma::from_state(state)?.utility;
        Ok(match (action, utility) {
            (ACTION_CAKE, Utility::Cake) => self.config.cake_reward,
            (ACTION_DEATH, Utility::Death) => self.config.death_reward,
            _ => 0.0,
        })
    }
}

#[derive(Debug, Clone, Default)]
/// Generator for the cake/death domain.
pub struct CakeDeath {
    config: CakeDeathConfig,
}

impl CakeDeath {
    pub fn new(config: CakeDeathConfig) -> Self {
        Self { config }
    }

    /// Validate the configuration, then assemble the domain from it.
    pub fn build_domain(&self) -> Result<Domain, ConfigError> {
        self.config.validate()?;
        let mut builder = DomainBuilder::new(schema()?, CLASS_STATE, CLASS_ANSWER);
        builder
            .add_action(DeterministicAction::new(ACTION_CAKE, final_decision))?
            .add_action(DeterministicAction::new(ACTION_DEATH, final_decision))?
            .add_action(null_action(ACTION_ASK_MORAL))?;

        builder
            .set_observation_model(CakeDeathObservations)
            .set_terminal_fn(DecisionMade)
            .set_reward_fn(Absorbing::new(DecisionMade, CakeDeathReward::new(self.config)));

        for seed in seed_states() {
            builder.add_seed_state(seed);
        }
        Ok(builder.build()?)
    }
}
