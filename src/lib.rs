//! # pitchchain - Kinetic-Chain Analysis of Pitching Trials
//!
//! `pitchchain` turns motion-capture exports of baseball pitches into
//! time-normalized joint curves, averages them across trials, and checks
//! whether the body segments fire in the proximal-to-distal order (pelvis,
//! thorax, shoulder, elbow) that efficient throwing relies on.
//!
//! ## Key Features
//!
//! - **Three-level column keys**: signals are located by (group, axis, unit)
//!   exactly as a motion-capture spreadsheet labels them, with merged group
//!   cells forward-filled.
//!
//! - **Typed metric registry**: the six built-in metrics (four segment angular
//!   velocities, elbow valgus and shoulder rotation torque) are validated
//!   against a table in one pass before anything is extracted.
//!
//! - **Time normalization**: each trial is linearly resampled onto 101 points
//!   spanning 0-100% of the motion, so trials of different duration align.
//!
//! - **Firing order**: peaks of the mean curves are ranked by time, earliest
//!   first, with ties keeping segment order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pitchchain::prelude::*;
//!
//! let trials = ["tanaka_01.csv", "tanaka_02.csv", "tanaka_03.csv"]
//!     .iter()
//!     .map(TrialInput::from_path)
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let config = AnalysisConfig::default()
//!     .with_side(Side::Right)
//!     .with_mode(AnalysisMode::KineticChain);
//! let report = Pipeline::new(config).run(&trials, &mut TrialCache::new())?;
//!
//! for metric in report.metrics() {
//!     println!("{}: peak at {:.0}%", metric.spec.label, metric.peak.normalized_time);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`table`]: delimited trial tables with three header rows
//! - [`metric`]: metric definitions, registry and signal extraction
//! - [`curve`]: resampling, aggregation and peak analysis
//! - [`pipeline`]: analysis modes, batch rules, caching and the end-to-end run
//! - [`report`]: CSV/JSON artifacts, terminal tables and validation reports
//! - [`subject`]: subject names from file names
//! - [`synthetic`]: deterministic trial tables for demos and tests

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod curve;
pub mod metric;
pub mod pipeline;
pub mod report;
pub mod subject;
pub mod synthetic;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::curve::{
        aggregate, find_peak, rank_segments, resample, AggregatedMetric, CurveError, NormalizedCurve,
        PeakRecord, NORMALIZED_POINTS,
    };
    pub use crate::metric::{extract, MetricId, MetricKind, MetricRegistry, MetricSpec, SchemaError, Side, SignalSeries};
    pub use crate::pipeline::{
        AnalysisConfig, AnalysisMode, AnalysisReport, DisplayMode, FiringOrder, MetricResult, Pipeline,
        PipelineError, TrialCache, TrialInput,
    };
    pub use crate::report::{write_artifacts, ArtifactOptions, ReportError, RunSummary};
    pub use crate::subject::subject_name;
    pub use crate::table::{ColumnKey, RawTrialTable, TableError};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
