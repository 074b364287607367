pub mod burning_room;
pub mod cake_death;
mod config;

pub use burning_room::{BurningRoom, BurningRoomConfig};
pub use cake_death::{CakeDeath, CakeDeathConfig};
pub use config::{ConfigError, YamlConfig};
