use quandary_core::{Action, Distribution, ModelError, Record, State};
use rand::{Rng, RngCore};

use super::Room;

/// Reject probabilities outside `[0, 1]` before an action can sample with them.
fn checked_probability(action: &str, probability: f64) -> Result<f64, ModelError> {
    if probability.is_finite() && (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ModelError::InvalidProbability {
            context: format!("action '{action}'"),
            value: probability,
        })
    }
}

/// One independent event firing with `probability`.
fn occurs(rng: &mut dyn RngCore, probability: f64) -> bool {
    rng.gen_range(0.0..1.0) < probability
}

#[derive(Debug, Clone, PartialEq)]
/// Retrieval attempt that resolves the object's fate.
///
/// The grab destroys the object with `destroy_probability` and retrieves it
/// otherwise. A fire-gated grab additionally destroys the robot with the fire
/// hazard probability whenever the room is burning; the two events are
/// independent.
pub struct GrabAction {
    name: &'static str,
    destroy_probability: f64,
    fire_hazard: Option<f64>,
}

impl GrabAction {
    pub fn new(name: &'static str, destroy_probability: f64) -> Result<Self, ModelError> {
        Ok(Self {
            name,
            destroy_probability: checked_probability(name, destroy_probability)?,
            fire_hazard: None,
        })
    }

    /// Expose the robot to fire with the given destruction probability.
    pub fn fire_gated(mut self, robot_destroy_probability: f64) -> Result<Self, ModelError> {
        self.fire_hazard = Some(checked_probability(self.name, robot_destroy_probability)?);
        Ok(self)
    }

    /// Chance this action destroys the object.
    pub fn destroy_probability(&self) -> f64 {
        self.destroy_probability
    }

    pub fn fire_hazard(&self) -> Option<f64> {
        self.fire_hazard
    }

    fn active_hazard(&self, room: &Room) -> Option<f64> {
        self.fire_hazard.filter(|_| room.on_fire)
    }
}

impl Action for GrabAction {
    fn name(&self) -> &str {
        self.name
    }

    fn transitions(&self, state: &State) -> Result<Distribution<State>, ModelError> {
        let room = Room::from_state(state)?;
        if room.is_resolved() {
            return Ok(Distribution::certain(room.to_state()));
        }

        let robot_fates = match self.active_hazard(&room) {
            Some(q) => vec![(true, q), (false, 1.0 - q)],
            None => vec![(room.robot_destroyed, 1.0)],
        };
        let p = self.destroy_probability;

        let mut dist = Distribution::new();
        for (object_destroyed, p_object) in [(true, p), (false, 1.0 - p)] {
            for &(robot_destroyed, p_robot) in &robot_fates {
                dist.push(
                    room.resolve(object_destroyed, robot_destroyed).to_state(),
                    p_object * p_robot,
                );
            }
        }
        Ok(dist)
    }

    fn sample_step(&self, state: &State, rng: &mut dyn RngCore) -> Result<State, ModelError> {
        let room = Room::from_state(state)?;
        if room.is_resolved() {
            return Ok(room.to_state());
        }

        let robot_destroyed = match self.active_hazard(&room) {
            Some(q) => occurs(rng, q),
            None => room.robot_destroyed,
        };
        let object_destroyed = occurs(rng, self.destroy_probability);
        Ok(room.resolve(object_destroyed, robot_destroyed).to_state())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Query action. Leaves the room untouched except for a small chance that
/// asking destroys the object.
pub struct AskAction {
    name: &'static str,
    destroy_probability: f64,
}

impl AskAction {
    pub fn new(name: &'static str, destroy_probability: f64) -> Result<Self, ModelError> {
        Ok(Self {
            name,
            destroy_probability: checked_probability(name, destroy_probability)?,
        })
    }

    /// Chance this action destroys the object.
    pub fn destroy_probability(&self) -> f64 {
        self.destroy_probability
    }

    fn destroyed(room: Room) -> Room {
        Room {
            object_destroyed: true,
            object_retrieved: false,
            ..room
        }
    }
}

impl Action for AskAction {
    fn name(&self) -> &str {
        self.name
    }

    fn transitions(&self, state: &State) -> Result<Distribution<State>, ModelError> {
        let room = Room::from_state(state)?;
        if room.is_resolved() {
            return Ok(Distribution::certain(room.to_state()));
        }

        let mut dist = Distribution::new();
        dist.push(room.to_state(), 1.0 - self.destroy_probability);
        dist.push(Self::destroyed(room).to_state(), self.destroy_probability);
        Ok(dist)
    }

    fn sample_step(&self, state: &State, rng: &mut dyn RngCore) -> Result<State, ModelError> {
        let room = Room::from_state(state)?;
        if !room.is_resolved() && occurs(rng, self.destroy_probability) {
            return Ok(Self::destroyed(room).to_state());
        }
        Ok(room.to_state())
    }
}
