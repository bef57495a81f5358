use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::table::ColumnKey;

/// Throwing side of the pitcher, used as the column group prefix
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left-handed pitcher (`L` prefix)
    #[serde(rename = "L", alias = "left")]
    Left,
    /// Right-handed pitcher (`R` prefix)
    #[default]
    #[serde(rename = "R", alias = "right")]
    Right,
}

impl Side {
    /// Single-letter prefix used in signal group names
    pub fn code(&self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    /// Both sides, right first
    pub fn all() -> [Side; 2] {
        [Side::Right, Side::Left]
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l" | "left" => Ok(Side::Left),
            "r" | "right" => Ok(Side::Right),
            _ => Err(format!("Unknown side '{}'. Valid options: L, R", s)),
        }
    }
}

/// Identifier of a built-in metric
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    /// Pelvis angular velocity about Z'
    PelvisVelocity,
    /// Thorax angular velocity about Z'
    ThoraxVelocity,
    /// Shoulder (upper arm) angular velocity about Z'
    ShoulderVelocity,
    /// Elbow (forearm) angular velocity about X'
    ElbowVelocity,
    /// Elbow valgus torque, moment about X
    ElbowValgusTorque,
    /// Shoulder internal rotation torque, moment about Z
    ShoulderRotationTorque,
}

impl MetricId {
    /// Stable snake_case identifier used in output columns
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::PelvisVelocity => "pelvis_velocity",
            MetricId::ThoraxVelocity => "thorax_velocity",
            MetricId::ShoulderVelocity => "shoulder_velocity",
            MetricId::ElbowVelocity => "elbow_velocity",
            MetricId::ElbowValgusTorque => "elbow_valgus_torque",
            MetricId::ShoulderRotationTorque => "shoulder_rotation_torque",
        }
    }

    /// Kinetic-chain segments in proximal-to-distal order
    pub fn kinetic_chain() -> [MetricId; 4] {
        [
            MetricId::PelvisVelocity,
            MetricId::ThoraxVelocity,
            MetricId::ShoulderVelocity,
            MetricId::ElbowVelocity,
        ]
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical quantity a metric measures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Joint or segment angular velocity
    AngularVelocity,
    /// Joint moment normalized to body mass
    Moment,
}

/// How one metric is located in a trial table and converted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MetricSpec {
    /// Metric identifier
    pub id: MetricId,
    /// Human-readable segment or joint name
    pub label: &'static str,
    /// Signal group without the side prefix, e.g. `PelvisAngles`
    pub group: &'static str,
    /// Axis label
    pub axis: &'static str,
    /// Unit label as recorded in the table
    pub unit: &'static str,
    /// Unit after `scale_factor` is applied
    pub output_unit: &'static str,
    /// Physical quantity
    pub kind: MetricKind,
    /// Take the absolute value of every sample
    pub rectify: bool,
    /// Multiplicative unit conversion
    pub scale_factor: f64,
    /// Plot color hint for presentation layers
    pub color: &'static str,
}

impl MetricSpec {
    /// Column key for this metric on the given side
    pub fn key(&self, side: Side) -> ColumnKey {
        ColumnKey::new(format!("{}{}", side.code(), self.group), self.axis, self.unit)
    }

    /// Copy of this spec with rectification switched on or off
    pub fn with_rectify(mut self, rectify: bool) -> Self {
        self.rectify = rectify;
        self
    }
}
