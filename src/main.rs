//! # pitchchain
//!
//! Command-line front end for kinetic-chain analysis of pitching trials.
//!
//! ## Usage
//!
//! ```bash
//! # Generate three synthetic trials
//! pitchchain demo demo_trials
//!
//! # Analyze them
//! pitchchain analyze demo_trials/*.csv --side R --mode kinetic-chain
//!
//! # Check files before analyzing
//! pitchchain validate trial_01.csv --mode dashboard
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
