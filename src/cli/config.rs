//! TOML configuration file support.
//!
//! Settings that stay the same across sessions can live in a config file
//! instead of being repeated on every command line:
//!
//! ```toml
//! # pitchchain.toml
//! [analysis]
//! side = "L"
//! mode = "dashboard"
//! display = "raw"
//! points = 101
//! sampling_rate_hz = 250.0
//! output_dir = "results"
//! ```
//!
//! Command-line flags win over file values, which win over built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use pitchchain::metric::Side;
use pitchchain::pipeline::{AnalysisConfig, AnalysisMode, DisplayMode};

/// Root configuration structure for pitchchain.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisSection,
}

/// Configuration for the analyze command.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisSection {
    /// Throwing side ("L" or "R").
    pub side: Option<Side>,

    /// Analysis mode.
    pub mode: Option<AnalysisMode>,

    /// Angular velocity display.
    pub display: Option<DisplayMode>,

    /// Points per normalized curve.
    pub points: Option<usize>,

    /// Capture rate of the raw samples, in Hz.
    pub sampling_rate_hz: Option<f64>,

    /// Directory for outputs.
    pub output_dir: Option<PathBuf>,
}

/// Values given explicitly on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub side: Option<Side>,
    pub modes: Vec<AnalysisMode>,
    pub display: Option<DisplayMode>,
    pub points: Option<usize>,
    pub output_dir: Option<PathBuf>,
}

/// Fully merged settings for one analyze invocation.
#[derive(Debug)]
pub struct Settings {
    /// Base analysis config; the mode is replaced per entry of `modes`
    pub analysis: AnalysisConfig,
    pub modes: Vec<AnalysisMode>,
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Merge with command-line overrides and built-in defaults.
    pub fn resolve(&self, overrides: Overrides) -> Result<Settings> {
        let file = &self.analysis;
        let defaults = AnalysisConfig::default();

        let analysis = AnalysisConfig {
            side: overrides.side.or(file.side).unwrap_or(defaults.side),
            mode: defaults.mode,
            display: overrides.display.or(file.display).unwrap_or(defaults.display),
            points: overrides.points.or(file.points).unwrap_or(defaults.points),
            sampling_rate_hz: file.sampling_rate_hz.unwrap_or(defaults.sampling_rate_hz),
        };

        if analysis.points < 2 {
            anyhow::bail!("points must be at least 2, got {}", analysis.points);
        }
        if analysis.sampling_rate_hz.is_nan() || analysis.sampling_rate_hz <= 0.0 {
            anyhow::bail!("sampling_rate_hz must be positive, got {}", analysis.sampling_rate_hz);
        }

        let modes = if overrides.modes.is_empty() {
            vec![file.mode.unwrap_or(defaults.mode)]
        } else {
            let mut seen = HashSet::new();
            let mut modes = overrides.modes;
            modes.retain(|mode| seen.insert(*mode));
            modes
        };

        let output_dir = overrides
            .output_dir
            .or_else(|| file.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Settings {
            analysis,
            modes,
            output_dir,
        })
    }
}
