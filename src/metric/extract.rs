use crate::table::RawTrialTable;

use super::{MetricId, MetricSpec, SchemaError, Side};

/// Samples of one metric from one trial, in original sample order.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    metric: MetricId,
    values: Vec<f64>,
}

impl SignalSeries {
    /// Wrap already-converted samples
    pub fn new(metric: MetricId, values: Vec<f64>) -> Self {
        Self { metric, values }
    }

    /// Metric these samples belong to
    pub fn metric(&self) -> MetricId {
        self.metric
    }

    /// Sample values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the series and return its values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Pull one metric out of a trial table.
///
/// The column is located by the side-prefixed key, multiplied by
/// `spec.scale_factor`, then rectified when `spec.rectify` is set. The output
/// has one value per sample row; no resampling happens here.
pub fn extract(table: &RawTrialTable, side: Side, spec: &MetricSpec) -> Result<SignalSeries, SchemaError> {
    let key = spec.key(side);
    let raw = table
        .numeric_column(&key)
        .ok_or_else(|| SchemaError::MetricNotFound { metric: spec.id, key })??;

    let values = raw
        .into_iter()
        .map(|v| v * spec.scale_factor)
        .map(|v| if spec.rectify { v.abs() } else { v })
        .collect();

    Ok(SignalSeries::new(spec.id, values))
}
