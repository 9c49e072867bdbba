//! Empirical frequencies of generated trajectories.
//!
//! Counts are laid out like the parameter tables: column `j` is the
//! conditioning state, so normalised columns are directly comparable with
//! the columns of Π and Φ.

use ndarray::{Array1, Array2};

use crate::error::HmmError;

/// Counts one-step transitions: `counts[[i, j]]` is the number of `j → i` steps.
///
/// # Errors
///
/// [`HmmError::IndexOutOfRange`] for any state `>= n_states`.
pub fn transition_counts(states: &[usize], n_states: usize) -> Result<Array2<u64>, HmmError> {
    check_indices(states, n_states, "state")?;
    let mut counts = Array2::<u64>::zeros((n_states, n_states));
    for pair in states.windows(2) {
        counts[[pair[1], pair[0]]] += 1;
    }
    Ok(counts)
}

/// Counts emissions: `counts[[k, j]]` is the number of times state `j` emitted `k`.
///
/// # Errors
///
/// [`HmmError::SequenceLength`] if the slices differ in length;
/// [`HmmError::IndexOutOfRange`] for any index outside its alphabet.
pub fn emission_counts(
    states: &[usize],
    observations: &[usize],
    n_states: usize,
    n_symbols: usize,
) -> Result<Array2<u64>, HmmError> {
    if states.len() != observations.len() {
        return Err(HmmError::SequenceLength {
            states: states.len(),
            observations: observations.len(),
        });
    }
    check_indices(states, n_states, "state")?;
    check_indices(observations, n_symbols, "observation")?;

    let mut counts = Array2::<u64>::zeros((n_symbols, n_states));
    for (&s, &o) in states.iter().zip(observations) {
        counts[[o, s]] += 1;
    }
    Ok(counts)
}

/// Normalises each column of a count table to sum to 1.
///
/// Columns with no counts are left as zeros.
pub fn column_frequencies(counts: &Array2<u64>) -> Array2<f64> {
    let mut freqs = counts.mapv(|c| c as f64);
    for mut col in freqs.columns_mut() {
        let total = col.sum();
        if total > 0.0 {
            col /= total;
        }
    }
    freqs
}

/// Fraction of time steps spent in each state.
///
/// An empty sequence yields all zeros.
///
/// # Errors
///
/// [`HmmError::IndexOutOfRange`] for any state `>= n_states`.
pub fn occupancy(states: &[usize], n_states: usize) -> Result<Array1<f64>, HmmError> {
    check_indices(states, n_states, "state")?;
    let mut freqs = Array1::<f64>::zeros(n_states);
    if states.is_empty() {
        return Ok(freqs);
    }
    for &s in states {
        freqs[s] += 1.0;
    }
    freqs /= states.len() as f64;
    Ok(freqs)
}

fn check_indices(values: &[usize], bound: usize, kind: &'static str) -> Result<(), HmmError> {
    match values.iter().find(|&&v| v >= bound) {
        Some(&index) => Err(HmmError::IndexOutOfRange { kind, index, bound }),
        None => Ok(()),
    }
}
