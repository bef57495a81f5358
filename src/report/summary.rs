//! JSON run summary.

use serde::Serialize;
use std::io::Write;

use crate::metric::{MetricKind, Side};
use crate::pipeline::{AnalysisMode, AnalysisReport, DisplayMode};

use super::ReportError;

/// Peak of one metric as exported
#[derive(Debug, Clone, Serialize)]
pub struct PeakSummary {
    /// Metric identifier
    pub metric: String,
    /// Display label
    pub label: String,
    /// Physical quantity
    pub kind: MetricKind,
    /// Unit of `value`
    pub unit: String,
    /// Signed value at the peak
    pub value: f64,
    /// Normalized time of the peak, in percent
    pub normalized_time: f64,
    /// Index on the normalized curve
    pub index: usize,
    /// Largest standard deviation along the curve, absent for one trial
    pub max_std: Option<f64>,
}

/// One row of the exported firing order
#[derive(Debug, Clone, Serialize)]
pub struct RankedSegment {
    /// 1-based rank, earliest peak first
    pub rank: usize,
    /// Metric identifier
    pub metric: String,
    /// Normalized time of the peak, in percent
    pub normalized_time: f64,
}

/// Exported firing order
#[derive(Debug, Clone, Serialize)]
pub struct FiringOrderSummary {
    /// Segments by ascending peak time
    pub ranked: Vec<RankedSegment>,
    /// Whether the segments fired pelvis, thorax, shoulder, elbow
    pub proximal_to_distal: bool,
}

/// Everything a reader of the output directory needs about one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Subject name
    pub subject: String,
    /// Analysis mode
    pub mode: AnalysisMode,
    /// Display mode
    pub display: DisplayMode,
    /// Throwing side
    pub side: Side,
    /// Points per normalized curve
    pub points: usize,
    /// Trial files in input order
    pub trial_files: Vec<String>,
    /// Peaks in mode order
    pub peaks: Vec<PeakSummary>,
    /// Firing order, for modes that rank segments
    pub firing_order: Option<FiringOrderSummary>,
    /// RFC 3339 generation time
    pub generated_at: String,
    /// Version of the tool that wrote the summary
    pub generator: String,
}

impl RunSummary {
    /// Collect the summary of `report` for `subject`
    pub fn new(subject: impl Into<String>, report: &AnalysisReport) -> Self {
        let config = report.config();
        let peaks = report
            .metrics()
            .iter()
            .map(|m| PeakSummary {
                metric: m.id().to_string(),
                label: m.spec.label.to_string(),
                kind: m.spec.kind,
                unit: m.spec.output_unit.to_string(),
                value: m.peak.value,
                normalized_time: m.peak.normalized_time,
                index: m.peak.index,
                max_std: m
                    .aggregate
                    .spread()
                    .map(|std| std.iter().copied().fold(0.0, f64::max)),
            })
            .collect();

        let firing_order = report.firing_order().map(|order| FiringOrderSummary {
            ranked: order
                .ranked
                .iter()
                .enumerate()
                .map(|(i, p)| RankedSegment {
                    rank: i + 1,
                    metric: p.metric.clone(),
                    normalized_time: p.normalized_time,
                })
                .collect(),
            proximal_to_distal: order.proximal_to_distal,
        });

        Self {
            subject: subject.into(),
            mode: config.mode,
            display: config.display,
            side: config.side,
            points: config.points,
            trial_files: report.sources().to_vec(),
            peaks,
            firing_order,
            generated_at: chrono::Utc::now().to_rfc3339(),
            generator: format!("pitchchain {}", crate::VERSION),
        }
    }

    /// Write as pretty-printed JSON
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
