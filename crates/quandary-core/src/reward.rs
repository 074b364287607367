use crate::{ModelError, State};

/// Reward for one realized transition.
pub trait RewardFunction: Send + Sync {
    fn reward(&self, state: &State, action: &str, next: &State) -> Result<f64, ModelError>;
}

/// Termination predicate; must depend only on the state's own attribute values.
pub trait TerminalFunction: Send + Sync {
    fn is_terminal(&self, state: &State) -> Result<bool, ModelError>;
}

/// Wraps a reward so that terminal pre-states earn exactly 0 under every action.
pub struct Absorbing<T, R> {
    terminal: T,
    reward: R,
}

impl<T, R> Absorbing<T, R>
where
    T: TerminalFunction,
    R: RewardFunction,
{
    /// Score with `reward` unless `terminal` holds on the pre-state.
    pub fn new(terminal: T, reward: R) -> Self {
        Self { terminal, reward }
    }

    /// The wrapped reward function.
    pub fn inner(&self) -> &R {
        &self.reward
    }
}

impl<T, R> RewardFunction for Absorbing<T, R>
where
    T: TerminalFunction,
    R: RewardFunction,
{
    fn reward(&self, state: &State, action: &str, next: &State) -> Result<f64, ModelError> {
        if self.terminal.is_terminal(state)? {
            return Ok(0.0);
        }
        self.reward.reward(state, action, next)
    }
}
