//! Stateful HMM generator.
//!
//! [`HmmGenerator`] owns the active parameters and the growing state and
//! observation histories. A run moves through three phases:
//!
//! ```text
//!  EMPTY ──initialize──▶ INITIALIZED ──evolve──▶ RUNNING ──evolve──▶ …
//! ```
//!
//! `initialize` draws the first state from the prior and emits its
//! observation; every `evolve` is one `transition` followed by one `emit`.
//! Outside of the gap between those two calls the histories have equal length.

use tracing::warn;

use crate::error::HmmError;
use crate::params::HmmParameters;
use crate::sample::sample_categorical;
use crate::trajectory::Trajectory;

/// Discrete HMM trajectory generator.
///
/// # Example
///
/// ```
/// use hmmgen_hmm::HmmGenerator;
/// use ndarray::array;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut generator = HmmGenerator::new();
/// generator
///     .set_parameters(
///         array![[0.9, 0.1], [0.1, 0.9]],
///         array![[0.8, 0.2], [0.2, 0.8]],
///         array![1.0, 0.0],
///     )
///     .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// generator.simulate_timeseries(5, &mut rng).unwrap();
/// assert_eq!(generator.states().len(), 5);
/// assert_eq!(generator.states()[0], 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HmmGenerator {
    params: Option<HmmParameters>,
    states: Vec<usize>,
    observations: Vec<usize>,
}

impl HmmGenerator {
    /// Creates a generator with no parameters and empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with already validated parameters.
    pub fn with_parameters(params: HmmParameters) -> Self {
        Self {
            params: Some(params),
            ..Self::default()
        }
    }

    /// Validates and installs Π, Φ and π₀, replacing any previous tables.
    ///
    /// On error the previously configured parameters are left untouched.
    /// History is not cleared; the next `simulate_timeseries` does that. If the
    /// new model has fewer states, stepping from a stale state fails with
    /// [`HmmError::IndexOutOfRange`].
    ///
    /// # Errors
    ///
    /// See [`HmmParameters::new`].
    pub fn set_parameters(
        &mut self,
        transition: ndarray::Array2<f64>,
        emission: ndarray::Array2<f64>,
        prior: ndarray::Array1<f64>,
    ) -> Result<(), HmmError> {
        let params = HmmParameters::new(transition, emission, prior)?;
        self.params = Some(params);
        Ok(())
    }

    /// Installs already validated parameters.
    pub fn set_validated_parameters(&mut self, params: HmmParameters) {
        self.params = Some(params);
    }

    /// The active parameters, if any.
    pub fn parameters(&self) -> Option<&HmmParameters> {
        self.params.as_ref()
    }

    /// Hidden-state history.
    pub fn states(&self) -> &[usize] {
        &self.states
    }

    /// Observation history.
    pub fn observations(&self) -> &[usize] {
        &self.observations
    }

    /// Moves the current history out as a [`Trajectory`], leaving the generator empty.
    ///
    /// # Errors
    ///
    /// Returns [`HmmError::SequenceLength`] if called between a `transition`
    /// and its `emit`.
    pub fn take_trajectory(&mut self) -> Result<Trajectory, HmmError> {
        check_equal(&self.states, &self.observations)?;
        let states = std::mem::take(&mut self.states);
        let observations = std::mem::take(&mut self.observations);
        Ok(Trajectory::from_parts(states, observations))
    }

    /// Discards history and draws the first state and its observation.
    pub fn initialize(&mut self, rng: &mut impl rand::Rng) -> Result<(), HmmError> {
        let params = self.params.as_ref().ok_or(HmmError::MissingParameters)?;
        initialize_process(params, &mut self.states, &mut self.observations, rng)
    }

    /// Draws the next hidden state from the column of Π for the current state.
    ///
    /// # Errors
    ///
    /// [`HmmError::EmptyHistory`] before initialization;
    /// [`HmmError::IndexOutOfRange`] if the current state was drawn under a
    /// larger model than the active one;
    /// [`HmmError::SequenceLength`] unless the state history ends up exactly
    /// one longer than the observation history.
    pub fn transition(&mut self, rng: &mut impl rand::Rng) -> Result<(), HmmError> {
        let params = self.params.as_ref().ok_or(HmmError::MissingParameters)?;
        transition_state(params, &mut self.states, &self.observations, rng)
    }

    /// Draws an observation from the column of Φ for the newest state.
    ///
    /// # Errors
    ///
    /// [`HmmError::EmptyHistory`] before initialization;
    /// [`HmmError::IndexOutOfRange`] if the newest state is not a state of the
    /// active model;
    /// [`HmmError::SequenceLength`] unless both histories end up equally long.
    pub fn emit(&mut self, rng: &mut impl rand::Rng) -> Result<(), HmmError> {
        let params = self.params.as_ref().ok_or(HmmError::MissingParameters)?;
        emit_observation(params, &self.states, &mut self.observations, rng)
    }

    /// Advances the process by one time step.
    pub fn evolve(&mut self, rng: &mut impl rand::Rng) -> Result<(), HmmError> {
        self.transition(rng)?;
        self.emit(rng)
    }

    /// Generates a fresh trajectory of `n_steps` steps, replacing any history.
    ///
    /// Logs a warning when a trajectory longer than one step is discarded.
    /// `n_steps == 0` clears the history and draws nothing.
    pub fn simulate_timeseries(
        &mut self,
        n_steps: usize,
        rng: &mut impl rand::Rng,
    ) -> Result<(), HmmError> {
        let params = self.params.as_ref().ok_or(HmmError::MissingParameters)?;
        if self.states.len() > 1 || self.observations.len() > 1 {
            warn!(
                states = self.states.len(),
                observations = self.observations.len(),
                "existing trajectory will be overwritten"
            );
        }
        run(params, n_steps, &mut self.states, &mut self.observations, rng)
    }
}

/// Runs a full trajectory into the given buffers, clearing them first.
pub(crate) fn run(
    params: &HmmParameters,
    n_steps: usize,
    states: &mut Vec<usize>,
    observations: &mut Vec<usize>,
    rng: &mut impl rand::Rng,
) -> Result<(), HmmError> {
    if n_steps == 0 {
        states.clear();
        observations.clear();
        return Ok(());
    }
    states.reserve(n_steps.saturating_sub(states.len()));
    observations.reserve(n_steps.saturating_sub(observations.len()));

    initialize_process(params, states, observations, rng)?;
    for _ in 1..n_steps {
        transition_state(params, states, observations, rng)?;
        emit_observation(params, states, observations, rng)?;
    }
    Ok(())
}

fn initialize_process(
    params: &HmmParameters,
    states: &mut Vec<usize>,
    observations: &mut Vec<usize>,
    rng: &mut impl rand::Rng,
) -> Result<(), HmmError> {
    states.clear();
    observations.clear();
    let start = sample_categorical(params.prior().view(), rng);
    states.push(start);
    emit_observation(params, states, observations, rng)
}

fn transition_state(
    params: &HmmParameters,
    states: &mut Vec<usize>,
    observations: &[usize],
    rng: &mut impl rand::Rng,
) -> Result<(), HmmError> {
    let current = current_state(params, states)?;
    let next = sample_categorical(params.transition_column(current), rng);
    states.push(next);

    if states.len() != observations.len() + 1 {
        return Err(HmmError::SequenceLength {
            states: states.len(),
            observations: observations.len(),
        });
    }
    Ok(())
}

fn emit_observation(
    params: &HmmParameters,
    states: &[usize],
    observations: &mut Vec<usize>,
    rng: &mut impl rand::Rng,
) -> Result<(), HmmError> {
    let current = current_state(params, states)?;
    let obs = sample_categorical(params.emission_column(current), rng);
    observations.push(obs);
    check_equal(states, observations)
}

/// The newest state, which must index into the active parameters.
///
/// History drawn under an earlier, larger model can hold states the current
/// tables do not have.
fn current_state(params: &HmmParameters, states: &[usize]) -> Result<usize, HmmError> {
    let &current = states.last().ok_or(HmmError::EmptyHistory)?;
    if current >= params.n_states() {
        return Err(HmmError::IndexOutOfRange {
            kind: "state",
            index: current,
            bound: params.n_states(),
        });
    }
    Ok(current)
}

fn check_equal(states: &[usize], observations: &[usize]) -> Result<(), HmmError> {
    if states.len() != observations.len() {
        return Err(HmmError::SequenceLength {
            states: states.len(),
            observations: observations.len(),
        });
    }
    Ok(())
}
