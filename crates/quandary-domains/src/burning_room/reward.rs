use quandary_core::{ModelError, Record, RewardFunction, State, TerminalFunction};

use super::{
    ACTION_LONG_GRAB, ACTION_REACH_GRAB, ACTION_SHORT_GRAB, BurningRoomConfig, Penalties, Room,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Terminal once the object is retrieved or destroyed.
pub struct ObjectResolved;

impl TerminalFunction for ObjectResolved {
    fn is_terminal(&self, state: &State) -> Result<bool, ModelError> {
        Ok(Room::from_state(state)?.is_resolved())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Additive penalties and per-action retrieval bonuses, scored on the realized
/// post-state. Wrap in `Absorbing` to zero out terminal pre-states.
pub struct BurningRoomReward {
    penalties: Penalties,
    success_bonuses: Vec<(&'static str, f64)>,
}

impl BurningRoomReward {
    pub fn new(penalties: Penalties, success_bonuses: Vec<(&'static str, f64)>) -> Self {
        Self {
            penalties,
            success_bonuses,
        }
    }

    /// Penalties and per-grab bonuses taken from `config`.
    pub fn from_config(config: &BurningRoomConfig) -> Self {
        Self::new(
            config.penalties,
            vec![
                (ACTION_SHORT_GRAB, config.short_grab.success_bonus),
                (ACTION_LONG_GRAB, config.long_grab.success_bonus),
                (ACTION_REACH_GRAB, config.reach_grab.success_bonus),
            ],
        )
    }

    /// Bonus for retrieving with `action`; actions without an entry earn nothing.
    pub fn success_bonus(&self, action: &str) -> f64 {
        self.success_bonuses
            .iter()
            .find(|(name, _)| *name == action)
            .map_or(0.0, |(_, bonus)| *bonus)
    }
}

impl RewardFunction for BurningRoomReward {
    fn reward(&self, _state: &State, action: &str, next: &State) -> Result<f64, ModelError> {
        let room = Room::from_state(next)?;
        let mut total = 0.0;

        if room.object_destroyed {
            total -= self.penalties.object_destroyed;
        }
        if room.robot_destroyed {
            total -= self.penalties.robot_destroyed;
            if room.robot_valuable {
                total -= self.penalties.valuable_robot;
            }
        }
        if room.object_retrieved {
            total += self.success_bonus(action);
        }

        Ok(total)
    }
}
