mod action;
mod distribution;
mod domain;
mod error;
mod factory;
mod observation;
mod record;
mod reward;
mod schema;
mod simulator;
mod state;
mod value;

#[cfg(test)]
mod tests;

pub use action::{Action, DeterministicAction, null_action};
pub use distribution::{Distribution, Outcome, PROB_TOLERANCE};
pub use domain::{Domain, DomainBuilder};
pub use error::ModelError;
pub use factory::StateFactory;
pub use observation::ObservationModel;
pub use record::Record;
pub use reward::{Absorbing, RewardFunction, TerminalFunction};
pub use schema::{Attribute, ObjectClass, Schema};
pub use simulator::{EpisodeMetrics, PomdpSimulator, StepEvent, StepOutcome};
pub use state::{ObjectInstance, State};
pub use value::{AttributeType, Value};
