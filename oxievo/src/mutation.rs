//! Random rewriting of flat weight vectors.
//!
//! [`drift_to_range`] draws a replacement value from
//! `[-percentage, percentage + 1)` without looking at the value
//! it replaces. [`perturb`] nudges the value it is given instead.
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Returns a value drawn uniformly from `[-percentage, percentage + 1)`.
/// The passed value does not influence the result.
///
/// # Examples
/// ```
/// use oxievo::mutation::drift_to_range;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let a = drift_to_range(10.0, 0.5, &mut StdRng::seed_from_u64(1));
/// let b = drift_to_range(-99.0, 0.5, &mut StdRng::seed_from_u64(1));
/// assert_eq!(a, b);
/// assert!((-0.5..1.5).contains(&a));
/// ```
pub fn drift_to_range<R: Rng + ?Sized>(_value: f64, percentage: f64, rng: &mut R) -> f64 {
    -percentage + rng.gen::<f64>() * (2.0 * percentage + 1.0)
}

/// Applies [`drift_to_range`] to every element, with independent draws.
pub fn drift_vector_to_range<R: Rng + ?Sized>(
    values: &[f64],
    percentage: f64,
    rng: &mut R,
) -> Vec<f64> {
    values
        .iter()
        .map(|v| drift_to_range(*v, percentage, rng))
        .collect()
}

/// Returns `value` offset by noise drawn uniformly
/// from `[-percentage, percentage)`.
///
/// # Examples
/// ```
/// use oxievo::mutation::perturb;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let nudged = perturb(10.0, 0.5, &mut StdRng::seed_from_u64(1));
/// assert!((9.5..10.5).contains(&nudged));
/// ```
pub fn perturb<R: Rng + ?Sized>(value: f64, percentage: f64, rng: &mut R) -> f64 {
    value + percentage * (2.0 * rng.gen::<f64>() - 1.0)
}

/// Selectable element-wise weight rewriting rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationOperator {
    /// See [`drift_to_range`].
    DriftToRange,
    /// See [`perturb`].
    Perturb,
}

impl MutationOperator {
    /// Rewrites a single value.
    pub fn apply<R: Rng + ?Sized>(&self, value: f64, percentage: f64, rng: &mut R) -> f64 {
        match self {
            Self::DriftToRange => drift_to_range(value, percentage, rng),
            Self::Perturb => perturb(value, percentage, rng),
        }
    }

    /// Rewrites every value, with independent draws.
    pub fn apply_all<R: Rng + ?Sized>(
        &self,
        values: &[f64],
        percentage: f64,
        rng: &mut R,
    ) -> Vec<f64> {
        values
            .iter()
            .map(|v| self.apply(*v, percentage, rng))
            .collect()
    }
}

/// Mutation applied to the weights of cloned
/// survivors during population replacement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloneMutation {
    pub operator: MutationOperator,
    pub percentage: f64,
}

impl CloneMutation {
    /// Rewrites a cloned weight vector.
    pub fn apply<R: Rng + ?Sized>(&self, weights: &[f64], rng: &mut R) -> Vec<f64> {
        self.operator.apply_all(weights, self.percentage, rng)
    }
}
