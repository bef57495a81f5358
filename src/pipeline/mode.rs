//! Analysis mode and display selectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::metric::{MetricId, MetricKind};

/// Which metric set a run analyzes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    /// Pelvis, thorax, shoulder and elbow angular velocities with firing order
    #[default]
    KineticChain,
    /// Elbow valgus torque alone
    ValgusTorque,
    /// All four velocities plus elbow and shoulder torques
    Dashboard,
}

impl AnalysisMode {
    /// Metrics analyzed in this mode, in display order
    pub fn metrics(&self) -> Vec<MetricId> {
        match self {
            AnalysisMode::KineticChain => MetricId::kinetic_chain().to_vec(),
            AnalysisMode::ValgusTorque => vec![MetricId::ElbowValgusTorque],
            AnalysisMode::Dashboard => {
                let mut ids = MetricId::kinetic_chain().to_vec();
                ids.push(MetricId::ElbowValgusTorque);
                ids.push(MetricId::ShoulderRotationTorque);
                ids
            }
        }
    }

    /// Metrics whose peaks are ranked into a firing order, if any
    pub fn chain_metrics(&self) -> &'static [MetricId] {
        const CHAIN: [MetricId; 4] = [
            MetricId::PelvisVelocity,
            MetricId::ThoraxVelocity,
            MetricId::ShoulderVelocity,
            MetricId::ElbowVelocity,
        ];
        match self {
            AnalysisMode::KineticChain | AnalysisMode::Dashboard => &CHAIN,
            AnalysisMode::ValgusTorque => &[],
        }
    }

    /// Short name used in output file names
    pub fn file_tag(&self) -> &'static str {
        match self {
            AnalysisMode::KineticChain => "kinetic_chain",
            AnalysisMode::ValgusTorque => "valgus_torque",
            AnalysisMode::Dashboard => "dashboard",
        }
    }

    /// Returns all available mode names.
    pub fn variants() -> &'static [&'static str] {
        &["kinetic-chain", "valgus-torque", "dashboard"]
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::KineticChain => write!(f, "kinetic-chain"),
            AnalysisMode::ValgusTorque => write!(f, "valgus-torque"),
            AnalysisMode::Dashboard => write!(f, "dashboard"),
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "kinetic-chain" | "chain" => Ok(AnalysisMode::KineticChain),
            "valgus-torque" | "valgus" => Ok(AnalysisMode::ValgusTorque),
            "dashboard" | "all" => Ok(AnalysisMode::Dashboard),
            _ => Err(format!(
                "Unknown mode '{}'. Valid options: {}",
                s,
                AnalysisMode::variants().join(", ")
            )),
        }
    }
}

/// Whether angular velocities are shown as magnitudes or with their sign
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Rectified: magnitude regardless of rotation direction
    #[default]
    Absolute,
    /// Signed: keeps direction reversals visible
    Raw,
}

impl DisplayMode {
    /// Whether a metric of `kind` is rectified before resampling.
    ///
    /// Moments always keep their sign.
    pub fn rectifies(&self, kind: MetricKind) -> bool {
        matches!(
            (self, kind),
            (DisplayMode::Absolute, MetricKind::AngularVelocity)
        )
    }

    /// Whether the peak of a metric of `kind` is taken on absolute values.
    ///
    /// Rectified curves are already non-negative, so the plain maximum is
    /// used for them; signed curves use the largest magnitude.
    pub fn absolute_peak(&self, kind: MetricKind) -> bool {
        !self.rectifies(kind)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Absolute => write!(f, "absolute"),
            DisplayMode::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "absolute" | "abs" => Ok(DisplayMode::Absolute),
            "raw" | "signed" => Ok(DisplayMode::Raw),
            _ => Err(format!("Unknown display mode '{}'. Valid options: absolute, raw", s)),
        }
    }
}
