use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::{Domain, ModelError, State};

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Result of one simulated step.
pub struct StepOutcome {
    pub next: State,
    pub observation: State,
    pub reward: f64,
    pub terminal: bool,
}

#[derive(Debug, Clone, Serialize)]
/// Event passed to episode hooks after each step.
pub struct StepEvent {
    pub step: usize,
    pub action: String,
    pub state: State,
    pub next: State,
    pub observation: State,
    pub reward: f64,
    pub terminal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Aggregate metrics for one simulated episode.
pub struct EpisodeMetrics {
    pub steps: usize,
    pub total_return: f64,
    pub terminated: bool,
}

#[derive(Debug, Clone)]
/// Seeded simulator over a domain's hidden world state.
///
/// Transitions come from each action's `sample_step`, observations from the
/// observation model's `sample`; both draw from one owned RNG, so a run is
/// fully determined by the seed and the actions taken.
pub struct PomdpSimulator<'a> {
    domain: &'a Domain,
    rng: ChaCha8Rng,
    state: State,
}

impl<'a> PomdpSimulator<'a> {
    /// Create a simulator with deterministic RNG seed.
    pub fn new(domain: &'a Domain, initial: State, seed: u64) -> Result<Self, ModelError> {
        domain.validate_state(&initial)?;
        Ok(Self {
            domain,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: initial,
        })
    }

    /// Domain being simulated.
    pub fn domain(&self) -> &'a Domain {
        self.domain
    }

    /// The current hidden world state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Whether the current hidden state is terminal.
    pub fn is_terminal(&self) -> Result<bool, ModelError> {
        self.domain.is_terminal(&self.state)
    }

    /// Replace the hidden world state. The RNG stream continues.
    pub fn reset(&mut self, state: State) -> Result<(), ModelError> {
        self.domain.validate_state(&state)?;
        self.state = state;
        Ok(())
    }

    /// Sample one `(next, observation, reward, terminal)` step and advance.
    pub fn step(&mut self, action: &str) -> Result<StepOutcome, ModelError> {
        let next = self
            .domain
            .action(action)?
            .sample_step(&self.state, &mut self.rng)?;
        let reward = self.domain.reward(&self.state, action, &next)?;
        let observation = self
            .domain
            .observation_model()
            .sample(&next, action, &mut self.rng)?;
        let terminal = self.domain.is_terminal(&next)?;

        self.state = next.clone();
        Ok(StepOutcome {
            next,
            observation,
            reward,
            terminal,
        })
    }

    /// Run until terminal or `max_steps`, choosing actions by index from the
    /// latest observation (null before the first step).
    pub fn run_episode<FPolicy>(
        &mut self,
        max_steps: usize,
        policy: FPolicy,
    ) -> Result<EpisodeMetrics, ModelError>
    where
        FPolicy: FnMut(&State) -> usize,
    {
        self.run_episode_with_hook(max_steps, policy, |_| {})
    }

    /// Run an episode and invoke a callback after each completed step.
    pub fn run_episode_with_hook<FPolicy, FHook>(
        &mut self,
        max_steps: usize,
        mut policy: FPolicy,
        mut on_step: FHook,
    ) -> Result<EpisodeMetrics, ModelError>
    where
        FPolicy: FnMut(&State) -> usize,
        FHook: FnMut(&StepEvent),
    {
        let mut metrics = EpisodeMetrics {
            steps: 0,
            total_return: 0.0,
            terminated: self.is_terminal()?,
        };
        let mut observation = State::null();

        while !metrics.terminated && metrics.steps < max_steps {
            let index = policy(&observation);
            let action = self
                .domain
                .actions()
                .get(index)
                .map(|a| a.name().to_string())
                .ok_or_else(|| ModelError::UnknownAction {
                    action: format!("#{index}"),
                })?;

            let state = self.state.clone();
            let outcome = self.step(&action)?;

            metrics.steps += 1;
            metrics.total_return += outcome.reward;
            metrics.terminated = outcome.terminal;

            on_step(&StepEvent {
                step: metrics.steps,
                action,
                state,
                next: outcome.next,
                observation: outcome.observation.clone(),
                reward: outcome.reward,
                terminal: outcome.terminal,
            });
            observation = outcome.observation;
        }

        Ok(metrics)
    }
}
