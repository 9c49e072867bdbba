use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hmmgen synthetic trajectory generator.
#[derive(Parser)]
#[command(
    name = "hmmgen",
    version,
    about = "Synthetic trajectory generator for discrete hidden Markov models"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate trajectories and report their empirical statistics.
    Simulate(SimulateArgs),
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML model configuration file.
    #[arg(short, long, default_value = "hmmgen.toml")]
    pub config: PathBuf,

    /// Override trajectory length from config.
    #[arg(short = 't', long)]
    pub steps: Option<usize>,

    /// Override number of trajectories from config.
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "hmmgen", "-vv", "simulate", "-c", "model.toml", "-t", "50", "--runs", "3", "--seed",
            "9",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Simulate(args) = cli.command;
        assert_eq!(args.config, PathBuf::from("model.toml"));
        assert_eq!(args.steps, Some(50));
        assert_eq!(args.runs, Some(3));
        assert_eq!(args.seed, Some(9));
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["hmmgen", "simulate"]);
        assert_eq!(cli.verbose, 0);
        let Command::Simulate(args) = cli.command;
        assert_eq!(args.config, PathBuf::from("hmmgen.toml"));
        assert!(args.steps.is_none());
        assert!(args.runs.is_none());
        assert!(args.seed.is_none());
    }
}
