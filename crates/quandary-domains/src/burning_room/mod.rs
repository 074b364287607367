//! Burning-room retrieval domain.
//!
//! A robot must fetch an object from a room that may be on fire. Whether the
//! robot is worth more than the object is hidden; asking reveals it exactly
//! but carries a small risk of destroying the object. Each grab resolves the
//! episode by either retrieving or destroying the object, and grabbing in a
//! burning room may also destroy the robot.

mod actions;
mod config;
mod observation;
mod reward;

use quandary_core::{
    Absorbing, AttributeType, Domain, DomainBuilder, ModelError, ObjectInstance, Record, Schema,
    State, Value,
};

use crate::config::{ConfigError, YamlConfig};

pub use actions::{AskAction, GrabAction};
pub use config::{BurningRoomConfig, GrabConfig, Penalties};
pub use observation::BurningRoomObservations;
pub use reward::{BurningRoomReward, ObjectResolved};

pub const ATT_ON_FIRE: &str = "isRoomOnFire";
pub const ATT_ROBOT_DESTROYED: &str = "isRobotDestroyed";
pub const ATT_OBJECT_DESTROYED: &str = "isObjectDestroyed";
pub const ATT_OBJECT_RETRIEVED: &str = "isObjectRetrieved";
pub const ATT_ROBOT_VALUABLE: &str = "isRobotMoreValuable";
pub const ATT_ROBOT_VALUABLE_ANSWER: &str = "isRobotMoreValuableAnswer";

pub const CLASS_STATE: &str = "mdp";
pub const CLASS_ANSWER: &str = "obsAnswer";

pub const ACTION_ASK: &str = "askIfRobotIsValuable";
pub const ACTION_LONG_GRAB: &str = "longGrab";
pub const ACTION_SHORT_GRAB: &str = "shortGrab";
pub const ACTION_REACH_GRAB: &str = "reachGrab";

/// Attribute and class declarations for the domain.
pub fn schema() -> Result<Schema, ModelError> {
    let mut schema = Schema::new();
    for attribute in [
        ATT_ON_FIRE,
        ATT_ROBOT_DESTROYED,
        ATT_ROBOT_VALUABLE,
        ATT_OBJECT_RETRIEVED,
        ATT_OBJECT_DESTROYED,
        ATT_ROBOT_VALUABLE_ANSWER,
    ] {
        schema.define_attribute(attribute, AttributeType::Boolean)?;
    }
    schema.define_class(
        CLASS_STATE,
        [
            ATT_ON_FIRE,
            ATT_ROBOT_DESTROYED,
            ATT_OBJECT_RETRIEVED,
            ATT_OBJECT_DESTROYED,
            ATT_ROBOT_VALUABLE,
        ],
    )?;
    schema.define_class(CLASS_ANSWER, [ATT_ROBOT_VALUABLE_ANSWER])?;
    Ok(schema)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Typed view of the world-state object.
pub struct Room {
    pub on_fire: bool,
    pub robot_destroyed: bool,
    pub object_retrieved: bool,
    pub object_destroyed: bool,
    pub robot_valuable: bool,
}

impl Room {
    /// Fresh room: nothing destroyed, nothing retrieved.
    pub fn initial(robot_valuable: bool, on_fire: bool) -> Self {
        Self {
            on_fire,
            robot_destroyed: false,
            object_retrieved: false,
            object_destroyed: false,
            robot_valuable,
        }
    }

    /// The object has been either retrieved or destroyed.
    pub fn is_resolved(&self) -> bool {
        self.object_retrieved || self.object_destroyed
    }

    /// Settle the object's fate. Exactly one of retrieved/destroyed ends up set;
    /// the robot's fate is tracked separately.
    pub(crate) fn resolve(self, object_destroyed: bool, robot_destroyed: bool) -> Self {
        Self {
            object_destroyed,
            object_retrieved: !object_destroyed,
            robot_destroyed,
            ..self
        }
    }
}

impl Record for Room {
    const CLASS: &'static str = CLASS_STATE;

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            (ATT_ON_FIRE, self.on_fire.into()),
            (ATT_ROBOT_DESTROYED, self.robot_destroyed.into()),
            (ATT_OBJECT_RETRIEVED, self.object_retrieved.into()),
            (ATT_OBJECT_DESTROYED, self.object_destroyed.into()),
            (ATT_ROBOT_VALUABLE, self.robot_valuable.into()),
        ]
    }

    fn from_object(object: &ObjectInstance) -> Result<Self, ModelError> {
        Ok(Self {
            on_fire: object.get_bool(ATT_ON_FIRE)?,
            robot_destroyed: object.get_bool(ATT_ROBOT_DESTROYED)?,
            object_retrieved: object.get_bool(ATT_OBJECT_RETRIEVED)?,
            object_destroyed: object.get_bool(ATT_OBJECT_DESTROYED)?,
            robot_valuable: object.get_bool(ATT_ROBOT_VALUABLE)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Answer token returned by the ask action.
pub struct ValueAnswer {
    pub robot_valuable: bool,
}

impl Record for ValueAnswer {
    const CLASS: &'static str = CLASS_ANSWER;

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![(ATT_ROBOT_VALUABLE_ANSWER, self.robot_valuable.into())]
    }

    fn from_object(object: &ObjectInstance) -> Result<Self, ModelError> {
        Ok(Self {
            robot_valuable: object.get_bool(ATT_ROBOT_VALUABLE_ANSWER)?,
        })
    }
}

/// World state for a fresh room.
pub fn initial_state(robot_valuable: bool, on_fire: bool) -> State {
    Room::initial(robot_valuable, on_fire).to_state()
}

/// Observation carrying the ask action's answer.
pub fn answer_observation(robot_valuable: bool) -> State {
    ValueAnswer { robot_valuable }.to_state()
}

/// Every combination of hidden robot value and fire, calm rooms first.
pub fn seed_states() -> Vec<State> {
    [(true, false), (false, false), (true, true), (false, true)]
        .into_iter()
        .map(|(robot_valuable, on_fire)| initial_state(robot_valuable, on_fire))
        .collect()
}

#[derive(Debug, Clone, Default)]
/// Generator for the burning-room domain.
pub struct BurningRoom {
    config: BurningRoomConfig,
}

impl BurningRoom {
    pub fn new(config: BurningRoomConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BurningRoomConfig {
        &self.config
    }

    /// Validate the configuration, then assemble the domain from it.
    pub fn build_domain(&self) -> Result<Domain, ConfigError> {
        let config = &self.config;
        config.validate()?;
        let mut builder = DomainBuilder::new(schema()?, CLASS_STATE, CLASS_ANSWER);

        builder
            .add_action(GrabAction::new(
                ACTION_LONG_GRAB,
                config.long_grab.destroy_probability,
            )?)?
            .add_action(
                GrabAction::new(ACTION_SHORT_GRAB, config.short_grab.destroy_probability)?
                    .fire_gated(config.fire_destroy_probability)?,
            )?
            .add_action(GrabAction::new(
                ACTION_REACH_GRAB,
                config.reach_grab.destroy_probability,
            )?)?
            .add_action(AskAction::new(ACTION_ASK, config.ask_destroy_probability)?)?;

        builder
            .set_observation_model(BurningRoomObservations::new(ACTION_ASK))
            .set_terminal_fn(ObjectResolved)
            .set_reward_fn(Absorbing::new(
                ObjectResolved,
                BurningRoomReward::from_config(config),
            ));

        for seed in seed_states() {
            builder.add_seed_state(seed);
        }

        Ok(builder.build()?)
    }
}
