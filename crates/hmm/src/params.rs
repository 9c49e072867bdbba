//! HMM parameter tables and their validation.

use ndarray::{Array1, Array2, ArrayView1};
use tracing::debug;

use crate::error::HmmError;

/// Tolerance on column sums when checking that a column is a distribution.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// The three probability tables of a discrete HMM.
///
/// * `transition` (Π, N×N): column `j` is the distribution of the next state
///   given current state `j`, so `Π[[i, j]] = P(next = i | current = j)`.
/// * `emission` (Φ, M×N): column `j` is the distribution of the observation
///   given hidden state `j`, so `Φ[[k, j]] = P(obs = k | state = j)`.
/// * `prior` (π₀, N): distribution of the initial hidden state.
///
/// Instances are immutable; shapes are always mutually consistent.
///
/// # Example
///
/// ```
/// use hmmgen_hmm::HmmParameters;
/// use ndarray::array;
///
/// let params = HmmParameters::new(
///     array![[0.9, 0.1], [0.1, 0.9]],
///     array![[0.8, 0.2], [0.2, 0.8]],
///     array![1.0, 0.0],
/// )
/// .unwrap();
/// assert_eq!(params.n_states(), 2);
/// assert_eq!(params.n_symbols(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HmmParameters {
    transition: Array2<f64>,
    emission: Array2<f64>,
    prior: Array1<f64>,
}

impl HmmParameters {
    /// Validates and bundles the three tables.
    ///
    /// Checks, in order: Π is square, Φ has one column per hidden state,
    /// π₀ has one entry per hidden state, the model is non-empty, and every
    /// column of Π and Φ as well as π₀ is a categorical distribution (finite,
    /// non-negative, summing to 1 within [`DISTRIBUTION_TOLERANCE`]).
    ///
    /// # Errors
    ///
    /// Returns the first failing check as an [`HmmError`].
    pub fn new(
        transition: Array2<f64>,
        emission: Array2<f64>,
        prior: Array1<f64>,
    ) -> Result<Self, HmmError> {
        let params = Self::from_shapes(transition, emission, prior)?;
        params.validate_distributions()?;
        params.log_configured();
        Ok(params)
    }

    /// Like [`HmmParameters::new`] but only checks shapes.
    ///
    /// Columns that are not proper distributions are accepted as-is and are
    /// treated as unnormalised weights when sampling (see
    /// [`sample_categorical`](crate::sample_categorical)).
    pub fn new_unchecked_distributions(
        transition: Array2<f64>,
        emission: Array2<f64>,
        prior: Array1<f64>,
    ) -> Result<Self, HmmError> {
        let params = Self::from_shapes(transition, emission, prior)?;
        params.log_configured();
        Ok(params)
    }

    fn from_shapes(
        transition: Array2<f64>,
        emission: Array2<f64>,
        prior: Array1<f64>,
    ) -> Result<Self, HmmError> {
        let (rows, cols) = transition.dim();
        if rows != cols {
            return Err(HmmError::NotSquare { rows, cols });
        }
        if emission.ncols() != rows {
            return Err(HmmError::EmissionDimension {
                transition_states: rows,
                emission_states: emission.ncols(),
            });
        }
        if prior.len() != cols {
            return Err(HmmError::PriorDimension {
                transition_states: cols,
                prior_len: prior.len(),
            });
        }
        if rows == 0 || emission.nrows() == 0 {
            return Err(HmmError::EmptyModel {
                n_states: rows,
                n_symbols: emission.nrows(),
            });
        }

        Ok(Self {
            transition,
            emission,
            prior,
        })
    }

    fn log_configured(&self) {
        debug!(
            n_states = self.n_states(),
            n_symbols = self.n_symbols(),
            "hmm parameters configured"
        );
    }

    /// Checks that every column of Π and Φ, and π₀, is a distribution.
    pub fn validate_distributions(&self) -> Result<(), HmmError> {
        for (j, col) in self.transition.columns().into_iter().enumerate() {
            check_distribution(col, "transition", j)?;
        }
        for (j, col) in self.emission.columns().into_iter().enumerate() {
            check_distribution(col, "emission", j)?;
        }
        check_distribution(self.prior.view(), "prior", 0)
    }

    /// Number of hidden states `N`.
    pub fn n_states(&self) -> usize {
        self.transition.nrows()
    }

    /// Number of observation symbols `M`.
    pub fn n_symbols(&self) -> usize {
        self.emission.nrows()
    }

    /// The transition matrix Π (N×N, column-stochastic).
    pub fn transition(&self) -> &Array2<f64> {
        &self.transition
    }

    /// The emission matrix Φ (M×N, column-stochastic).
    pub fn emission(&self) -> &Array2<f64> {
        &self.emission
    }

    /// The initial-state prior π₀.
    pub fn prior(&self) -> &Array1<f64> {
        &self.prior
    }

    /// Next-state distribution given current state `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from >= n_states()`.
    pub fn transition_column(&self, from: usize) -> ArrayView1<'_, f64> {
        self.transition.column(from)
    }

    /// Observation distribution given hidden state `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state >= n_states()`.
    pub fn emission_column(&self, state: usize) -> ArrayView1<'_, f64> {
        self.emission.column(state)
    }
}

fn check_distribution(
    probs: ArrayView1<'_, f64>,
    table: &'static str,
    column: usize,
) -> Result<(), HmmError> {
    let mut sum = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        if !p.is_finite() {
            return Err(HmmError::InvalidDistribution {
                table,
                column,
                reason: format!("entry {i} is not finite: {p}"),
            });
        }
        if p < 0.0 {
            return Err(HmmError::InvalidDistribution {
                table,
                column,
                reason: format!("entry {i} is negative: {p}"),
            });
        }
        sum += p;
    }
    if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(HmmError::InvalidDistribution {
            table,
            column,
            reason: format!("sums to {sum}, expected 1"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn uniform_matrix(rows: usize, cols: usize) -> Array2<f64> {
        Array2::from_elem((rows, cols), 1.0 / rows as f64)
    }

    fn uniform_vec(n: usize) -> Array1<f64> {
        Array1::from_elem(n, 1.0 / n as f64)
    }

    #[test]
    fn rejects_non_square_transition() {
        let result = HmmParameters::new(uniform_matrix(3, 4), uniform_matrix(5, 4), uniform_vec(4));
        assert_eq!(result, Err(HmmError::NotSquare { rows: 3, cols: 4 }));
    }

    #[test]
    fn rejects_emission_state_mismatch() {
        let result = HmmParameters::new(uniform_matrix(3, 3), uniform_matrix(5, 4), uniform_vec(3));
        assert_eq!(
            result,
            Err(HmmError::EmissionDimension {
                transition_states: 3,
                emission_states: 4
            })
        );
    }

    #[test]
    fn rejects_prior_length_mismatch() {
        let result = HmmParameters::new(uniform_matrix(3, 3), uniform_matrix(5, 3), uniform_vec(4));
        assert_eq!(
            result,
            Err(HmmError::PriorDimension {
                transition_states: 3,
                prior_len: 4
            })
        );
    }

    #[test]
    fn accepts_consistent_shapes() {
        let params =
            HmmParameters::new(uniform_matrix(3, 3), uniform_matrix(5, 3), uniform_vec(3)).unwrap();
        assert_eq!(params.n_states(), 3);
        assert_eq!(params.n_symbols(), 5);
    }

    #[test]
    fn shape_checks_run_in_order() {
        // Every check fails; the square check must be reported.
        let result = HmmParameters::new(uniform_matrix(2, 3), uniform_matrix(4, 5), uniform_vec(6));
        assert!(matches!(result, Err(HmmError::NotSquare { .. })));
    }

    #[test]
    fn rejects_empty_model() {
        let result = HmmParameters::new(
            Array2::zeros((0, 0)),
            Array2::zeros((2, 0)),
            Array1::zeros(0),
        );
        assert!(matches!(result, Err(HmmError::EmptyModel { n_states: 0, .. })));

        let result = HmmParameters::new(array![[1.0]], Array2::zeros((0, 1)), array![1.0]);
        assert!(matches!(
            result,
            Err(HmmError::EmptyModel { n_symbols: 0, .. })
        ));
    }

    #[test]
    fn rejects_column_not_summing_to_one() {
        let result = HmmParameters::new(
            array![[0.9, 0.1], [0.1, 0.8]],
            array![[0.5, 0.5], [0.5, 0.5]],
            array![0.5, 0.5],
        );
        assert!(matches!(
            result,
            Err(HmmError::InvalidDistribution {
                table: "transition",
                column: 1,
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_emission_entry() {
        let result = HmmParameters::new(
            array![[1.0, 0.0], [0.0, 1.0]],
            array![[1.2, 0.5], [-0.2, 0.5]],
            array![0.5, 0.5],
        );
        assert!(matches!(
            result,
            Err(HmmError::InvalidDistribution {
                table: "emission",
                column: 0,
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_prior() {
        let result = HmmParameters::new(
            array![[1.0, 0.0], [0.0, 1.0]],
            array![[0.5, 0.5], [0.5, 0.5]],
            array![f64::NAN, 1.0],
        );
        assert!(matches!(
            result,
            Err(HmmError::InvalidDistribution { table: "prior", .. })
        ));
    }

    #[test]
    fn tolerance_allows_rounding() {
        let third = 1.0 / 3.0;
        let params = HmmParameters::new(
            Array2::from_elem((3, 3), third),
            array![[0.1, 0.2, 0.3], [0.9, 0.8, 0.7]],
            array![third, third, third],
        );
        assert!(params.is_ok());
    }

    #[test]
    fn unchecked_accepts_improper_columns() {
        let params = HmmParameters::new_unchecked_distributions(
            array![[2.0, 0.0], [0.0, 0.5]],
            array![[0.3, 0.3], [0.3, 0.3]],
            array![0.2, 0.2],
        )
        .unwrap();
        assert!(params.validate_distributions().is_err());
    }

    #[test]
    fn unchecked_still_validates_shapes() {
        let result = HmmParameters::new_unchecked_distributions(
            uniform_matrix(3, 3),
            uniform_matrix(5, 4),
            uniform_vec(3),
        );
        assert!(result.unwrap_err().is_dimension_error());
    }

    #[test]
    fn columns_follow_from_state() {
        let params = HmmParameters::new(
            array![[0.9, 0.3], [0.1, 0.7]],
            array![[0.6, 0.0], [0.4, 1.0]],
            array![1.0, 0.0],
        )
        .unwrap();
        assert_eq!(params.transition_column(1).to_vec(), vec![0.3, 0.7]);
        assert_eq!(params.emission_column(0).to_vec(), vec![0.6, 0.4]);
    }
}
