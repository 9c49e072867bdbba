//! One-shot trajectory simulation.

use crate::error::HmmError;
use crate::generator;
use crate::params::HmmParameters;
use crate::trajectory::Trajectory;

/// Simulates a fresh trajectory of `n_steps` steps.
///
/// The first state is drawn from the prior, every following state from the
/// transition column of its predecessor, and each state emits one
/// observation. Nothing is shared between calls except `rng`, so two calls
/// with identically seeded generators return identical trajectories.
///
/// `n_steps == 0` returns an empty trajectory without drawing from `rng`.
///
/// # Errors
///
/// Only [`HmmError::SequenceLength`], which signals an internal bug.
///
/// # Example
///
/// ```
/// use hmmgen_hmm::{HmmParameters, simulate};
/// use ndarray::array;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let params = HmmParameters::new(
///     array![[0.9, 0.1], [0.1, 0.9]],
///     array![[0.8, 0.2], [0.2, 0.8]],
///     array![1.0, 0.0],
/// )
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
/// let trajectory = simulate(&params, 100, &mut rng).unwrap();
/// assert_eq!(trajectory.len(), 100);
/// ```
#[tracing::instrument(skip(params, rng), fields(n_states = params.n_states(), n_symbols = params.n_symbols()))]
pub fn simulate(
    params: &HmmParameters,
    n_steps: usize,
    rng: &mut impl rand::Rng,
) -> Result<Trajectory, HmmError> {
    let mut out = Trajectory::new();
    simulate_into(params, n_steps, rng, &mut out)?;
    Ok(out)
}

/// Simulates into an existing trajectory, reusing its allocations.
///
/// Whatever `out` held before is discarded. On error `out` is left empty.
pub fn simulate_into(
    params: &HmmParameters,
    n_steps: usize,
    rng: &mut impl rand::Rng,
    out: &mut Trajectory,
) -> Result<(), HmmError> {
    let (mut states, mut observations) = out.take_buffers();
    generator::run(params, n_steps, &mut states, &mut observations, rng)?;
    *out = Trajectory::from_parts(states, observations);
    Ok(())
}
