use quandary_core::{Distribution, ModelError, ObservationModel, Record, State};

use super::{Room, answer_observation};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The ask action answers truthfully whether the robot is the more valuable
/// one; every other action yields the null observation.
pub struct BurningRoomObservations {
    ask_action: &'static str,
}

impl BurningRoomObservations {
    pub fn new(ask_action: &'static str) -> Self {
        Self { ask_action }
    }
}

impl ObservationModel for BurningRoomObservations {
    fn enumerate_observations(&self) -> Vec<State> {
        vec![
            State::null(),
            answer_observation(true),
            answer_observation(false),
        ]
    }

    fn distribution(&self, state: &State, action: &str) -> Result<Distribution<State>, ModelError> {
        if action != self.ask_action {
            return Ok(Distribution::certain(State::null()));
        }

        let valuable = Room::from_state(state)?.robot_valuable;
        let mut dist = Distribution::new();
        for answer in [true, false] {
            let mass = if answer == valuable { 1.0 } else { 0.0 };
            dist.push(answer_observation(answer), mass);
        }
        Ok(dist)
    }
}
