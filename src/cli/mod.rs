use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pitchchain::metric::Side;
use pitchchain::pipeline::{AnalysisMode, DisplayMode};

mod analyze;
mod demo;
mod inspect;
mod validate;

mod config;

/// pitchchain - Kinetic-chain analysis of pitching trials
#[derive(Parser)]
#[command(name = "pitchchain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Throwing side of the pitcher.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SideArg {
    /// Left-handed (L-prefixed columns)
    #[value(name = "L", alias = "l", alias = "left")]
    Left,
    /// Right-handed (R-prefixed columns)
    #[value(name = "R", alias = "r", alias = "right")]
    Right,
}

/// Metric set to analyze.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Segment angular velocities and firing order
    KineticChain,
    /// Elbow valgus torque
    ValgusTorque,
    /// All velocities and torques
    Dashboard,
}

/// Sign handling for angular velocities.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DisplayArg {
    /// Rectified magnitudes
    Absolute,
    /// Signed values
    Raw,
}

/// Extra time axis for single-trial exports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeAxisArg {
    /// Normalized 0-100 % only
    #[default]
    Normalized,
    /// Also export raw samples against seconds
    Seconds,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Left => Side::Left,
            SideArg::Right => Side::Right,
        }
    }
}

impl From<ModeArg> for AnalysisMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::KineticChain => AnalysisMode::KineticChain,
            ModeArg::ValgusTorque => AnalysisMode::ValgusTorque,
            ModeArg::Dashboard => AnalysisMode::Dashboard,
        }
    }
}

impl From<DisplayArg> for DisplayMode {
    fn from(arg: DisplayArg) -> Self {
        match arg {
            DisplayArg::Absolute => DisplayMode::Absolute,
            DisplayArg::Raw => DisplayMode::Raw,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize, aggregate and rank one or three trials
    Analyze {
        /// Trial files (.csv, .tsv or .txt)
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Throwing side (default: R)
        #[arg(short, long, value_enum)]
        side: Option<SideArg>,

        /// Analysis mode; repeat to run several modes over the same files
        #[arg(short, long, value_enum)]
        mode: Vec<ModeArg>,

        /// Angular velocity display (default: absolute)
        #[arg(short, long, value_enum)]
        display: Option<DisplayArg>,

        /// Points per normalized curve (default: 101)
        #[arg(long)]
        points: Option<usize>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory for the CSV and JSON outputs (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Also export raw samples against seconds (single trial only)
        #[arg(long, value_enum, default_value = "normalized")]
        time_axis: TimeAxisArg,
    },

    /// Show the columns of a trial file and which metrics resolve
    Inspect {
        /// Trial file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check trial files against a mode's metric set
    Validate {
        /// Trial files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Throwing side
        #[arg(short, long, value_enum, default_value = "R")]
        side: SideArg,

        /// Analysis mode
        #[arg(short, long, value_enum, default_value = "kinetic-chain")]
        mode: ModeArg,
    },

    /// Write three synthetic trial files for trying the tool
    Demo {
        /// Output directory
        #[arg(value_name = "DIR", default_value = "demo_trials")]
        dir: PathBuf,

        /// Subject name used in the file names
        #[arg(long, default_value = "demo")]
        subject: String,

        /// Throwing side of the generated columns
        #[arg(short, long, value_enum, default_value = "R")]
        side: SideArg,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            files,
            side,
            mode,
            display,
            points,
            config,
            output_dir,
            time_axis,
        } => {
            let overrides = config::Overrides {
                side: side.map(Side::from),
                modes: mode.into_iter().map(AnalysisMode::from).collect(),
                display: display.map(DisplayMode::from),
                points,
                output_dir,
            };
            analyze::run(files, config, overrides, time_axis == TimeAxisArg::Seconds)
        }
        Commands::Inspect { file } => inspect::run(file),
        Commands::Validate { files, side, mode } => validate::run(files, side.into(), mode.into()),
        Commands::Demo { dir, subject, side } => demo::run(dir, &subject, side.into()),
    }
}
