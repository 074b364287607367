use rand::RngCore;

use crate::{Distribution, ModelError, State};

/// A named stochastic action.
///
/// `transitions` enumerates every outcome without consulting randomness;
/// `sample_step` draws one outcome by flipping each stochastic event directly.
/// The two must describe the same distribution. Both return fresh states and
/// leave `state` untouched.
pub trait Action: Send + Sync {
    /// Stable identifier; other components dispatch on exact equality with it.
    fn name(&self) -> &str;

    /// Every `(post_state, probability)` pair reachable from `state`.
    fn transitions(&self, state: &State) -> Result<Distribution<State>, ModelError>;

    /// Draw one post-state using the caller's random source.
    fn sample_step(&self, state: &State, rng: &mut dyn RngCore) -> Result<State, ModelError>;
}

/// Adapter for actions whose outcome is a pure function of the pre-state.
pub struct DeterministicAction<F> {
    name: String,
    apply: F,
}

impl<F> DeterministicAction<F>
where
    F: Fn(&State) -> Result<State, ModelError> + Send + Sync,
{
    /// Wrap `apply` as an action named `name`.
    pub fn new(name: impl Into<String>, apply: F) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }
}

impl<F> Action for DeterministicAction<F>
where
    F: Fn(&State) -> Result<State, ModelError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transitions(&self, state: &State) -> Result<Distribution<State>, ModelError> {
        Ok(Distribution::certain((self.apply)(state)?))
    }

    fn sample_step(&self, state: &State, _rng: &mut dyn RngCore) -> Result<State, ModelError> {
        (self.apply)(state)
    }
}

/// Action that leaves the state unchanged.
pub fn null_action(name: impl Into<String>) -> impl Action {
    DeterministicAction::new(name, |state: &State| Ok(state.clone()))
}
