//! Generated state/observation sequences.

/// One generated trajectory: hidden states paired with their observations.
///
/// Both sequences always have the same length; `states()[t]` emitted
/// `observations()[t]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trajectory {
    states: Vec<usize>,
    observations: Vec<usize>,
}

impl Trajectory {
    /// Creates an empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(states: Vec<usize>, observations: Vec<usize>) -> Self {
        debug_assert_eq!(states.len(), observations.len());
        Self {
            states,
            observations,
        }
    }

    /// Hidden-state indices in time order.
    pub fn states(&self) -> &[usize] {
        &self.states
    }

    /// Observation indices in time order.
    pub fn observations(&self) -> &[usize] {
        &self.observations
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no step has been generated.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over `(state, observation)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.states
            .iter()
            .copied()
            .zip(self.observations.iter().copied())
    }

    /// Consumes the trajectory, returning `(states, observations)`.
    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.states, self.observations)
    }

    /// Hands both buffers out, leaving this trajectory empty.
    pub(crate) fn take_buffers(&mut self) -> (Vec<usize>, Vec<usize>) {
        (
            std::mem::take(&mut self.states),
            std::mem::take(&mut self.observations),
        )
    }
}
