//! # Pipeline Module
//!
//! End-to-end analysis of one batch of pitching trials:
//!
//! 1. Check the batch size (one trial, or exactly three)
//! 2. Parse each trial, reusing the [`TrialCache`] for identical uploads
//! 3. Validate every table against the mode's metric set in one pass
//! 4. Extract, time-normalize and aggregate each metric
//! 5. Locate peaks and, for chain modes, rank them into a firing order
//!
//! Any failure aborts the whole batch; no partial results are produced.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pitchchain::pipeline::{AnalysisConfig, Pipeline, TrialCache, TrialInput};
//!
//! let trial = TrialInput::from_path("tanaka_01.csv")?;
//! let report = Pipeline::new(AnalysisConfig::default())
//!     .run(&[trial], &mut TrialCache::new())?;
//! if let Some(order) = report.firing_order() {
//!     println!("proximal-to-distal: {}", order.proximal_to_distal);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cache;
mod error;
mod mode;

#[cfg(test)]
mod tests;

pub use cache::{Fingerprint, TrialCache, TrialInput};
pub use error::PipelineError;
pub use mode::{AnalysisMode, DisplayMode};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::curve::{
    aggregate, find_peak, follows_sequence, normalized_time_axis, rank_segments,
    AggregatedMetric, NormalizedCurve, PeakRecord, NORMALIZED_POINTS,
};
use crate::metric::{extract, MetricId, MetricRegistry, MetricSpec, Side, SignalSeries};
use crate::table::RawTrialTable;

/// Trial counts accepted for one run
pub const ALLOWED_TRIAL_COUNTS: [usize; 2] = [1, 3];

/// Capture rate assumed when building a seconds axis for raw samples
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 200.0;

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Throwing side
    pub side: Side,
    /// Metric set to analyze
    pub mode: AnalysisMode,
    /// Rectification of angular velocities
    pub display: DisplayMode,
    /// Points per normalized curve
    pub points: usize,
    /// Capture rate of the raw samples, in Hz
    pub sampling_rate_hz: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            side: Side::default(),
            mode: AnalysisMode::default(),
            display: DisplayMode::default(),
            points: NORMALIZED_POINTS,
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
        }
    }
}

impl AnalysisConfig {
    /// Builder-style side setter
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Builder-style mode setter
    pub fn with_mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style display setter
    pub fn with_display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }
}

/// Seconds axis for `len` raw samples captured at `rate_hz`
pub fn time_axis_seconds(len: usize, rate_hz: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 / rate_hz).collect()
}

/// Everything computed for one metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    /// Metric definition, with rectification as applied in this run
    pub spec: MetricSpec,
    /// Mean and spread across trials
    pub aggregate: AggregatedMetric,
    /// Peak of the mean curve
    pub peak: PeakRecord,
    /// Extracted samples per trial, before resampling
    pub series: Vec<SignalSeries>,
}

impl MetricResult {
    /// Metric identifier
    pub fn id(&self) -> MetricId {
        self.spec.id
    }
}

/// Temporal order of segment peaks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiringOrder {
    /// Peaks sorted by normalized time, earliest first
    pub ranked: Vec<PeakRecord>,
    /// True when the segments fire pelvis, thorax, shoulder, elbow
    pub proximal_to_distal: bool,
}

/// Output of one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    config: AnalysisConfig,
    sources: Vec<String>,
    metrics: Vec<MetricResult>,
    firing_order: Option<FiringOrder>,
}

impl AnalysisReport {
    /// Settings the run used
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Trial names in input order
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Number of trials aggregated
    pub fn trial_count(&self) -> usize {
        self.sources.len()
    }

    /// True for a single-trial run, which has no spread band
    pub fn is_single_trial(&self) -> bool {
        self.trial_count() == 1
    }

    /// Per-metric results in mode order
    pub fn metrics(&self) -> &[MetricResult] {
        &self.metrics
    }

    /// Result for `id`, if the mode analyzed it
    pub fn metric(&self, id: MetricId) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.id() == id)
    }

    /// Ranked segment peaks, for modes that rank segments
    pub fn firing_order(&self) -> Option<&FiringOrder> {
        self.firing_order.as_ref()
    }

    /// Normalized time axis shared by every curve
    pub fn time_axis(&self) -> Vec<f64> {
        normalized_time_axis(self.config.points)
    }
}

/// Runs the analysis described by an [`AnalysisConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
    registry: MetricRegistry,
}

impl Pipeline {
    /// Pipeline over the built-in metric registry
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_registry(config, MetricRegistry::builtin())
    }

    /// Pipeline over a custom registry
    pub fn with_registry(config: AnalysisConfig, registry: MetricRegistry) -> Self {
        Self { config, registry }
    }

    /// Settings this pipeline runs with
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Reject batch sizes other than one or three
    pub fn check_batch(&self, count: usize) -> Result<(), PipelineError> {
        if ALLOWED_TRIAL_COUNTS.contains(&count) {
            Ok(())
        } else {
            Err(PipelineError::InputCount {
                actual: count,
                allowed: ALLOWED_TRIAL_COUNTS.to_vec(),
            })
        }
    }

    /// Parse and analyze `trials`.
    ///
    /// The batch size is checked before any file is parsed.
    pub fn run(&self, trials: &[TrialInput], cache: &mut TrialCache) -> Result<AnalysisReport, PipelineError> {
        self.check_batch(trials.len())?;

        let mut seen = HashSet::new();
        let mut tables = Vec::with_capacity(trials.len());
        for trial in trials {
            if !seen.insert(trial.fingerprint()) {
                warn!("{} has the same contents as an earlier trial", trial.name());
            }
            let table = cache
                .get_or_parse(trial)
                .map_err(|source| PipelineError::Table {
                    file: trial.name().to_string(),
                    source,
                })?;
            tables.push((trial.name(), table));
        }

        let named: Vec<(&str, &RawTrialTable)> = tables.iter().map(|(n, t)| (*n, t.as_ref())).collect();
        self.analyze(&named)
    }

    /// Analyze tables that are already parsed, named by their source
    pub fn run_tables(&self, tables: &[RawTrialTable]) -> Result<AnalysisReport, PipelineError> {
        self.check_batch(tables.len())?;
        let named: Vec<(&str, &RawTrialTable)> = tables.iter().map(|t| (t.source(), t)).collect();
        self.analyze(&named)
    }

    fn analyze(&self, tables: &[(&str, &RawTrialTable)]) -> Result<AnalysisReport, PipelineError> {
        let config = &self.config;
        let ids = config.mode.metrics();
        info!(
            "Analyzing {} trial(s): side {}, mode {}, display {}",
            tables.len(),
            config.side,
            config.mode,
            config.display
        );

        for (name, table) in tables {
            self.registry
                .validate(table, config.side, &ids)
                .map_err(|source| PipelineError::Schema {
                    file: name.to_string(),
                    source,
                })?;
        }

        let mut metrics = Vec::with_capacity(ids.len());
        for resolved in self.registry.resolve(config.side, &ids) {
            let spec = resolved.spec.with_rectify(config.display.rectifies(resolved.spec.kind));
            metrics.push(self.analyze_metric(spec, tables)?);
        }

        let firing_order = self.rank(&metrics);
        if let Some(order) = &firing_order {
            let sequence: Vec<&str> = order.ranked.iter().map(|p| p.metric.as_str()).collect();
            info!(
                "Firing order: {} (proximal-to-distal: {})",
                sequence.join(" -> "),
                order.proximal_to_distal
            );
        }

        Ok(AnalysisReport {
            config: config.clone(),
            sources: tables.iter().map(|(n, _)| n.to_string()).collect(),
            metrics,
            firing_order,
        })
    }

    fn analyze_metric(&self, spec: MetricSpec, tables: &[(&str, &RawTrialTable)]) -> Result<MetricResult, PipelineError> {
        let mut series = Vec::with_capacity(tables.len());
        let mut curves = Vec::with_capacity(tables.len());

        for (name, table) in tables {
            let signal = extract(table, self.config.side, &spec).map_err(|source| PipelineError::Schema {
                file: name.to_string(),
                source,
            })?;
            if signal.len() < 2 {
                return Err(PipelineError::TooShort {
                    file: name.to_string(),
                    metric: spec.id,
                    samples: signal.len(),
                });
            }
            debug!("{}: {} samples of {}", name, signal.len(), spec.id);
            curves.push(NormalizedCurve::with_points(signal.values(), self.config.points)?);
            series.push(signal);
        }

        let aggregate = aggregate(&curves, 1)?;
        let peak = find_peak(
            spec.id.as_str(),
            &aggregate.mean_curve(),
            self.config.display.absolute_peak(spec.kind),
        )?;
        debug!(
            "{} peak {:.3} {} at {:.1}%",
            spec.id, peak.value, spec.output_unit, peak.normalized_time
        );

        Ok(MetricResult {
            spec,
            aggregate,
            peak,
            series,
        })
    }

    fn rank(&self, metrics: &[MetricResult]) -> Option<FiringOrder> {
        let chain = self.config.mode.chain_metrics();
        if chain.is_empty() {
            return None;
        }

        let peaks: Vec<PeakRecord> = chain
            .iter()
            .filter_map(|id| metrics.iter().find(|m| m.id() == *id))
            .map(|m| m.peak.clone())
            .collect();
        let ranked = rank_segments(&peaks);
        let expected: Vec<&str> = MetricId::kinetic_chain().iter().map(|id| id.as_str()).collect();
        let proximal_to_distal = follows_sequence(&ranked, &expected);

        Some(FiringOrder {
            ranked,
            proximal_to_distal,
        })
    }
}
