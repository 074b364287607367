use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{ConfigError, YamlConfig, check_finite, check_probability};

const DEFAULT_BURNING_ROOM_YAML: &str = include_str!("../../config/burning_room.default.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Tuning for one retrieval action.
pub struct GrabConfig {
    /// Chance the grab destroys the object instead of retrieving it.
    pub destroy_probability: f64,
    /// Reward for retrieving the object with this action.
    pub success_bonus: f64,
}

impl GrabConfig {
    /// Hazard-gated grab: never fumbles the object, but the fire applies.
    pub const SHORT: GrabConfig = GrabConfig {
        destroy_probability: 0.0,
        success_bonus: 10.0,
    };

    pub const LONG: GrabConfig = GrabConfig {
        destroy_probability: 0.05,
        success_bonus: 6.0,
    };

    pub const REACH: GrabConfig = GrabConfig {
        destroy_probability: 0.01,
        success_bonus: 8.0,
    };
}

/// YAML shape of a grab entry; absent keys fall back to that action's defaults.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GrabOverride {
    destroy_probability: Option<f64>,
    success_bonus: Option<f64>,
}

fn grab_with_defaults<'de, D>(deserializer: D, base: GrabConfig) -> Result<GrabConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let found = GrabOverride::deserialize(deserializer)?;
    Ok(GrabConfig {
        destroy_probability: found.destroy_probability.unwrap_or(base.destroy_probability),
        success_bonus: found.success_bonus.unwrap_or(base.success_bonus),
    })
}

fn short_grab<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GrabConfig, D::Error> {
    grab_with_defaults(deserializer, GrabConfig::SHORT)
}

fn long_grab<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GrabConfig, D::Error> {
    grab_with_defaults(deserializer, GrabConfig::LONG)
}

fn reach_grab<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GrabConfig, D::Error> {
    grab_with_defaults(deserializer, GrabConfig::REACH)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Penalty magnitudes, subtracted from the reward when they apply.
pub struct Penalties {
    pub object_destroyed: f64,
    pub robot_destroyed: f64,
    /// Charged on top of `robot_destroyed` when the robot was the more valuable one.
    pub valuable_robot: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Penalties {
            object_destroyed: 10.0,
            robot_destroyed: 5.0,
            valuable_robot: 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Event probabilities and reward magnitudes for the burning-room domain.
pub struct BurningRoomConfig {
    pub ask_destroy_probability: f64,
    /// Chance a fire-gated grab destroys the robot while the room burns.
    pub fire_destroy_probability: f64,
    #[serde(deserialize_with = "short_grab")]
    pub short_grab: GrabConfig,
    #[serde(deserialize_with = "long_grab")]
    pub long_grab: GrabConfig,
    #[serde(deserialize_with = "reach_grab")]
    pub reach_grab: GrabConfig,
    pub penalties: Penalties,
}

impl Default for BurningRoomConfig {
    fn default() -> Self {
        BurningRoomConfig {
            ask_destroy_probability: 0.005,
            fire_destroy_probability: 0.7,
            short_grab: GrabConfig::SHORT,
            long_grab: GrabConfig::LONG,
            reach_grab: GrabConfig::REACH,
            penalties: Penalties::default(),
        }
    }
}

impl YamlConfig for BurningRoomConfig {
    fn default_yaml() -> &'static str {
        DEFAULT_BURNING_ROOM_YAML
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("ask_destroy_probability", self.ask_destroy_probability)?;
        check_probability("fire_destroy_probability", self.fire_destroy_probability)?;

        for (name, grab) in [
            ("short_grab", &self.short_grab),
            ("long_grab", &self.long_grab),
            ("reach_grab", &self.reach_grab),
        ] {
            check_probability(&format!("{name}.destroy_probability"), grab.destroy_probability)?;
            check_finite(&format!("{name}.success_bonus"), grab.success_bonus)?;
        }

        check_finite("penalties.object_destroyed", self.penalties.object_destroyed)?;
        check_finite("penalties.robot_destroyed", self.penalties.robot_destroyed)?;
        check_finite("penalties.valuable_robot", self.penalties.valuable_robot)?;
        Ok(())
    }
}
