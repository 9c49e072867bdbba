//! Simulate command: generate trajectories and report their statistics.

use anyhow::{Context, Result, bail};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, info_span};

use hmmgen_hmm::empirical::{column_frequencies, emission_counts, occupancy, transition_counts};
use hmmgen_hmm::{HmmParameters, Trajectory, simulate_into};

use crate::cli::SimulateArgs;
use crate::config;
use crate::convert;

/// Run the simulation pipeline.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();

    // 1. Load config and apply CLI overrides
    let config = config::load(&args.config)?;
    let steps = args.steps.unwrap_or(config.simulation.steps);
    let runs = args.runs.unwrap_or(config.simulation.runs);
    let seed = args.seed.or(config.seed);
    if runs == 0 {
        bail!("runs must be at least 1");
    }

    // 2. Build parameters
    let params = convert::build_parameters(&config.model)?;
    info!(
        n_states = params.n_states(),
        n_symbols = params.n_symbols(),
        steps,
        runs,
        "model loaded"
    );

    // 3. Create seeded RNG
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // 4. Simulate, accumulating counts across runs
    let stats = simulate_runs(&params, steps, runs, &mut rng)?;

    // 5. Report
    print!("{}", stats.report(&params));
    Ok(())
}

/// Counts accumulated over all simulated trajectories.
struct RunStats {
    transitions: Array2<u64>,
    emissions: Array2<u64>,
    first_states: Vec<u64>,
    runs: usize,
    total_steps: usize,
}

fn simulate_runs(
    params: &HmmParameters,
    steps: usize,
    runs: usize,
    rng: &mut StdRng,
) -> Result<RunStats> {
    let n = params.n_states();
    let m = params.n_symbols();
    let mut stats = RunStats {
        transitions: Array2::zeros((n, n)),
        emissions: Array2::zeros((m, n)),
        first_states: vec![0; n],
        runs,
        total_steps: 0,
    };

    let mut trajectory = Trajectory::new();
    for run in 0..runs {
        simulate_into(params, steps, rng, &mut trajectory)
            .with_context(|| format!("simulation failed for run {run}"))?;

        stats.transitions += &transition_counts(trajectory.states(), n)?;
        stats.emissions += &emission_counts(trajectory.states(), trajectory.observations(), n, m)?;
        if let Some(&s0) = trajectory.states().first() {
            stats.first_states[s0] += 1;
        }
        stats.total_steps += trajectory.len();

        debug!(
            run,
            len = trajectory.len(),
            occupancy = ?occupancy(trajectory.states(), n)?.to_vec(),
            "trajectory generated"
        );
    }
    info!(total_steps = stats.total_steps, "simulation complete");
    Ok(stats)
}

impl RunStats {
    /// Formats empirical frequencies next to the model probabilities.
    fn report(&self, params: &HmmParameters) -> String {
        let trans = column_frequencies(&self.transitions);
        let emis = column_frequencies(&self.emissions);
        let started: u64 = self.first_states.iter().sum();

        let mut out = format!(
            "{} steps over {} runs ({} states, {} symbols)\n",
            self.total_steps,
            self.runs,
            params.n_states(),
            params.n_symbols()
        );

        out.push_str("initial state      empirical  model\n");
        for (j, &count) in self.first_states.iter().enumerate() {
            let freq = if started > 0 {
                count as f64 / started as f64
            } else {
                0.0
            };
            out.push_str(&format!(
                "  {j:>3}              {freq:>9.4}  {:>6.4}\n",
                params.prior()[j]
            ));
        }

        out.push_str("transition j -> i  empirical  model\n");
        for ((i, j), &p) in params.transition().indexed_iter() {
            out.push_str(&format!(
                "  {j:>3} -> {i:<3}       {:>9.4}  {p:>6.4}\n",
                trans[[i, j]]
            ));
        }

        out.push_str("emission j -> k    empirical  model\n");
        for ((k, j), &p) in params.emission().indexed_iter() {
            out.push_str(&format!(
                "  {j:>3} -> {k:<3}       {:>9.4}  {p:>6.4}\n",
                emis[[k, j]]
            ));
        }
        out
    }
}
