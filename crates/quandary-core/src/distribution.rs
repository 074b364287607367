use std::fmt;

use rand::RngCore;
use serde::Serialize;

use crate::ModelError;

/// Floating point tolerance used when validating probability sums.
pub const PROB_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One enumerated outcome and its probability mass.
pub struct Outcome<T> {
    pub value: T,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Ordered, fully enumerated discrete distribution.
///
/// Identical outcomes are merged on insertion so no outcome is counted twice.
/// Zero-mass outcomes are kept; they are skipped when sampling.
pub struct Distribution<T> {
    outcomes: Vec<Outcome<T>>,
}

impl<T> Default for Distribution<T> {
    fn default() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }
}

/// Uniform sample in `[0, 1)` from the top 53 bits of one draw, so the
/// result is exact in an `f64` and never rounds up to 1.
pub(crate) fn unit_sample(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

impl<T: PartialEq> Distribution<T> {
    /// An empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single outcome with probability 1.
    pub fn certain(value: T) -> Self {
        let mut dist = Self::new();
        dist.push(value, 1.0);
        dist
    }

    /// Add mass to `value`, merging with an identical outcome if present.
    pub fn push(&mut self, value: T, probability: f64) -> &mut Self {
        match self.outcomes.iter_mut().find(|o| o.value == value) {
            Some(existing) => existing.probability += probability,
            None => self.outcomes.push(Outcome { value, probability }),
        }
        self
    }

    /// Outcomes in insertion order.
    pub fn outcomes(&self) -> &[Outcome<T>] {
        &self.outcomes
    }

    /// Number of distinct outcomes, zero-mass ones included.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no outcome has been pushed.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Iterate `(outcome, probability)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.outcomes.iter().map(|o| (&o.value, o.probability))
    }

    /// Sum of all outcome probabilities.
    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }

    /// Mass assigned to `value`, or 0 if it is not listed.
    pub fn probability_of(&self, value: &T) -> f64 {
        self.outcomes
            .iter()
            .find(|o| &o.value == value)
            .map_or(0.0, |o| o.probability)
    }

    /// Apply `f` to every outcome, merging any outcomes that become identical.
    pub fn map<U: PartialEq>(self, mut f: impl FnMut(T) -> U) -> Distribution<U> {
        self.outcomes
            .into_iter()
            .map(|o| (f(o.value), o.probability))
            .collect()
    }

    /// Consume into plain `(outcome, probability)` pairs.
    pub fn into_pairs(self) -> Vec<(T, f64)> {
        self.outcomes
            .into_iter()
            .map(|o| (o.value, o.probability))
            .collect()
    }

    /// Check every probability is finite and non-negative and that they sum to 1.
    pub fn ensure_normalized(
        &self,
        context: &str,
        state: &dyn fmt::Display,
        tolerance: f64,
    ) -> Result<(), ModelError> {
        if self.outcomes.is_empty() {
            return Err(ModelError::EmptyDistribution {
                context: context.to_string(),
            });
        }

        for outcome in &self.outcomes {
            let p = outcome.probability;
            if !p.is_finite() || p < 0.0 || p > 1.0 + tolerance {
                return Err(ModelError::InvalidProbability {
                    context: context.to_string(),
                    value: p,
                });
            }
        }

        let sum = self.total();
        if (sum - 1.0).abs() > tolerance {
            return Err(ModelError::Normalization {
                context: context.to_string(),
                state: state.to_string(),
                sum,
                tolerance,
            });
        }
        Ok(())
    }

    /// Draw one outcome by inverse CDF. Returns `None` only if no outcome has mass.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Option<&T> {
        let draw = unit_sample(rng) * self.total();
        let mut cumulative = 0.0_f64;
        let mut last_with_mass = None;

        for outcome in &self.outcomes {
            if outcome.probability <= 0.0 {
                continue;
            }
            cumulative += outcome.probability;
            last_with_mass = Some(&outcome.value);
            if draw < cumulative {
                return last_with_mass;
            }
        }

        // Rounding can leave `draw` a hair above the final cumulative sum.
        last_with_mass
    }
}

impl<T: PartialEq> FromIterator<(T, f64)> for Distribution<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (value, probability) in iter {
            dist.push(value, probability);
        }
        dist
    }
}

impl<T> IntoIterator for Distribution<T> {
    type Item = Outcome<T>;
    type IntoIter = std::vec::IntoIter<Outcome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
