use rand::RngCore;

use crate::{Distribution, ModelError, State};

/// Conditional observation table `P(o | s', a)`.
///
/// Observations are `State`s holding zero objects (the null observation) or
/// one observation-token object. Actions are identified by name.
pub trait ObservationModel: Send + Sync {
    /// Every observation the model can emit, null included.
    fn enumerate_observations(&self) -> Vec<State>;

    /// Full distribution over observations after `action` produced `state`.
    fn distribution(&self, state: &State, action: &str) -> Result<Distribution<State>, ModelError>;

    /// Mass assigned to one observation.
    fn probability(
        &self,
        observation: &State,
        state: &State,
        action: &str,
    ) -> Result<f64, ModelError> {
        Ok(self.distribution(state, action)?.probability_of(observation))
    }

    /// Draw an observation by enumerating the distribution and sampling from it.
    fn sample(
        &self,
        state: &State,
        action: &str,
        rng: &mut dyn RngCore,
    ) -> Result<State, ModelError> {
        let dist = self.distribution(state, action)?;
        dist.sample(rng)
            .cloned()
            .ok_or_else(|| ModelError::EmptyDistribution {
                context: format!("observations for action '{action}'"),
            })
    }
}
