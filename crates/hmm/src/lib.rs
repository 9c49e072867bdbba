//! Synthetic trajectories from a discrete hidden Markov model.
//!
//! A hidden state evolves under a fixed column-stochastic transition matrix
//! Π, and every state emits one symbol drawn from its column of the emission
//! matrix Φ. The initial state is drawn from the prior π₀.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │   params     │────▶│   generator    │────▶│    empirical     │
//!  │ (validate)   │     │ (draw S and O) │     │  (check counts)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! Randomness is always passed in as `&mut impl rand::Rng`.
//!
//! # Quick start
//!
//! ```rust
//! use hmmgen_hmm::{HmmParameters, simulate};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let params = HmmParameters::new(
//!     array![[0.9, 0.1], [0.1, 0.9]],
//!     array![[0.8, 0.2], [0.2, 0.8]],
//!     array![1.0, 0.0],
//! )
//! .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let trajectory = simulate(&params, 5, &mut rng).unwrap();
//! assert_eq!(trajectory.states()[0], 0);
//! assert_eq!(trajectory.observations().len(), 5);
//! ```

pub mod empirical;
pub mod error;
pub mod generator;
pub mod params;
pub mod sample;
pub mod simulate;
pub mod trajectory;

pub use error::HmmError;
pub use generator::HmmGenerator;
pub use params::{DISTRIBUTION_TOLERANCE, HmmParameters};
pub use sample::sample_categorical;
pub use simulate::{simulate, simulate_into};
pub use trajectory::Trajectory;
