use crate::table::{ColumnKey, RawTrialTable};

use super::{MetricId, MetricKind, MetricSpec, SchemaError, Side};

/// N.mm/kg to N.m/kg
pub const MOMENT_SCALE: f64 = 0.001;

const BUILTIN: [MetricSpec; 6] = [
    MetricSpec {
        id: MetricId::PelvisVelocity,
        label: "Pelvis",
        group: "PelvisAngles",
        axis: "Z'",
        unit: "deg/s",
        output_unit: "deg/s",
        kind: MetricKind::AngularVelocity,
        rectify: true,
        scale_factor: 1.0,
        color: "blue",
    },
    MetricSpec {
        id: MetricId::ThoraxVelocity,
        label: "Thorax",
        group: "ThoraxAngles",
        axis: "Z'",
        unit: "deg/s",
        output_unit: "deg/s",
        kind: MetricKind::AngularVelocity,
        rectify: true,
        scale_factor: 1.0,
        color: "green",
    },
    MetricSpec {
        id: MetricId::ShoulderVelocity,
        label: "Shoulder (upper arm)",
        group: "ShoulderAngles",
        axis: "Z'",
        unit: "deg/s",
        output_unit: "deg/s",
        kind: MetricKind::AngularVelocity,
        rectify: true,
        scale_factor: 1.0,
        color: "red",
    },
    MetricSpec {
        id: MetricId::ElbowVelocity,
        label: "Elbow (forearm)",
        group: "ElbowAngles",
        axis: "X'",
        unit: "deg/s",
        output_unit: "deg/s",
        kind: MetricKind::AngularVelocity,
        rectify: true,
        scale_factor: 1.0,
        color: "purple",
    },
    MetricSpec {
        id: MetricId::ElbowValgusTorque,
        label: "Elbow valgus torque",
        group: "ElbowMoment",
        axis: "X",
        unit: "N.mm/kg",
        output_unit: "N.m/kg",
        kind: MetricKind::Moment,
        rectify: false,
        scale_factor: MOMENT_SCALE,
        color: "orange",
    },
    MetricSpec {
        id: MetricId::ShoulderRotationTorque,
        label: "Shoulder rotation torque",
        group: "ShoulderMoment",
        axis: "Z",
        unit: "N.mm/kg",
        output_unit: "N.m/kg",
        kind: MetricKind::Moment,
        rectify: false,
        scale_factor: MOMENT_SCALE,
        color: "brown",
    },
];

/// A metric spec paired with its column key for one side
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetric {
    /// Metric definition
    pub spec: MetricSpec,
    /// Fully resolved column key
    pub key: ColumnKey,
}

/// Typed table of metric definitions.
#[derive(Debug, Clone)]
pub struct MetricRegistry {
    specs: Vec<MetricSpec>,
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MetricRegistry {
    /// Registry holding the six built-in pitching metrics
    pub fn builtin() -> Self {
        Self {
            specs: BUILTIN.to_vec(),
        }
    }

    /// All registered specs
    pub fn specs(&self) -> &[MetricSpec] {
        &self.specs
    }

    /// Spec for `id`, if registered
    pub fn get(&self, id: MetricId) -> Option<&MetricSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    /// Resolve column keys for `ids` on `side`, in the order given.
    ///
    /// Unregistered ids are skipped.
    pub fn resolve(&self, side: Side, ids: &[MetricId]) -> Vec<ResolvedMetric> {
        ids.iter()
            .filter_map(|id| self.get(*id))
            .map(|spec| ResolvedMetric {
                spec: *spec,
                key: spec.key(side),
            })
            .collect()
    }

    /// Check that `table` carries every column needed for `ids` on `side`.
    ///
    /// All missing keys are reported together.
    pub fn validate(&self, table: &RawTrialTable, side: Side, ids: &[MetricId]) -> Result<(), SchemaError> {
        let missing = self.missing_columns(table, side, ids);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::MissingColumns(missing))
        }
    }

    /// Column keys needed for `ids` on `side` that `table` lacks
    pub fn missing_columns(&self, table: &RawTrialTable, side: Side, ids: &[MetricId]) -> Vec<ColumnKey> {
        self.resolve(side, ids)
            .into_iter()
            .filter(|r| !table.contains(&r.key))
            .map(|r| r.key)
            .collect()
    }
}
