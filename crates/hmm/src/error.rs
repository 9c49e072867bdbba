//! Error types for the hmmgen-hmm crate.

/// Error type for all fallible operations in the hmmgen-hmm crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HmmError {
    /// Returned when the transition matrix is not square.
    #[error("transition matrix is not square: dimension 0 is {rows}, dimension 1 is {cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when the emission matrix does not have one column per hidden state.
    #[error(
        "emission matrix is inconsistent with transition matrix: \
         transition has {transition_states} states, emission has {emission_states}"
    )]
    EmissionDimension {
        /// Number of hidden states in the transition matrix.
        transition_states: usize,
        /// Number of state columns in the emission matrix.
        emission_states: usize,
    },

    /// Returned when the prior length differs from the number of hidden states.
    #[error(
        "prior is inconsistent with transition matrix: \
         transition has {transition_states} states, prior has {prior_len} entries"
    )]
    PriorDimension {
        /// Number of hidden states in the transition matrix.
        transition_states: usize,
        /// Length of the prior vector.
        prior_len: usize,
    },

    /// Returned when the model has no hidden states or no observation symbols.
    #[error("model is empty: {n_states} hidden states, {n_symbols} observation symbols")]
    EmptyModel {
        /// Number of hidden states.
        n_states: usize,
        /// Number of observation symbols.
        n_symbols: usize,
    },

    /// Returned when a column of a probability table is not a categorical distribution.
    #[error("invalid distribution in {table} column {column}: {reason}")]
    InvalidDistribution {
        /// Which table failed (`"transition"`, `"emission"` or `"prior"`).
        table: &'static str,
        /// Zero-based column index (always 0 for the prior).
        column: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the state/observation length invariant is broken.
    #[error("sequence length mismatch: {states} states, {observations} observations")]
    SequenceLength {
        /// Length of the state sequence.
        states: usize,
        /// Length of the observation sequence.
        observations: usize,
    },

    /// Returned when a step needs a current state but none has been drawn.
    #[error("state sequence is empty: initialize the process first")]
    EmptyHistory,

    /// Returned when the generator is used before parameters are set.
    #[error("no parameters configured")]
    MissingParameters,

    /// Returned when a state or observation index exceeds its alphabet.
    #[error("{kind} index {index} out of range (must be < {bound})")]
    IndexOutOfRange {
        /// `"state"` or `"observation"`.
        kind: &'static str,
        /// The offending index.
        index: usize,
        /// Exclusive upper bound.
        bound: usize,
    },
}

impl HmmError {
    /// Returns `true` for errors caused by mutually inconsistent table shapes.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::NotSquare { .. }
                | Self::EmissionDimension { .. }
                | Self::PriorDimension { .. }
                | Self::EmptyModel { .. }
        )
    }
}
