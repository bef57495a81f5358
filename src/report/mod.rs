//! # Report Module
//!
//! Everything written or printed after an analysis run:
//!
//! - `<subject>_<mode>.csv`: normalized time with a mean and std column per metric
//! - `<subject>_<mode>.json`: [`RunSummary`] with peaks and firing order
//! - `<subject>_<mode>_raw.csv`: single-trial samples against seconds (optional)
//! - terminal tables for the firing order and peaks
//! - per-file [`TrialValidation`] checks of each metric column

mod curves;
mod error;
mod summary;
mod table;
mod validation;

pub use curves::{write_curves_csv, write_raw_csv};
pub use error::ReportError;
pub use summary::{FiringOrderSummary, PeakSummary, RankedSegment, RunSummary};
pub use table::{FiringOrderTable, PeakTable};
pub use validation::{validate_trial, ColumnStatus, MetricCheck, TrialValidation};

use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::pipeline::AnalysisReport;

/// Which files [`write_artifacts`] produces
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactOptions {
    /// Also export raw samples against seconds at this rate (single trial only)
    pub raw_sampling_rate_hz: Option<f64>,
}

/// Base name shared by all artifacts of one run
pub fn artifact_stem(subject: &str, report: &AnalysisReport) -> String {
    format!("{}_{}", subject, report.config().mode.file_tag())
}

/// Write the curve table, the summary and optionally the raw samples into
/// `dir`, returning the paths written
pub fn write_artifacts(
    report: &AnalysisReport,
    subject: &str,
    dir: &Path,
    options: ArtifactOptions,
) -> Result<Vec<PathBuf>, ReportError> {
    if options.raw_sampling_rate_hz.is_some() && !report.is_single_trial() {
        return Err(ReportError::NotSingleTrial(report.trial_count()));
    }

    std::fs::create_dir_all(dir)?;
    let stem = artifact_stem(subject, report);
    let mut written = Vec::new();

    let curves_path = dir.join(format!("{}.csv", stem));
    write_curves_csv(report, BufWriter::new(File::create(&curves_path)?))?;
    written.push(curves_path);

    let summary_path = dir.join(format!("{}.json", stem));
    RunSummary::new(subject, report).write_json(BufWriter::new(File::create(&summary_path)?))?;
    written.push(summary_path);

    if let Some(rate) = options.raw_sampling_rate_hz {
        let raw_path = dir.join(format!("{}_raw.csv", stem));
        write_raw_csv(report, rate, BufWriter::new(File::create(&raw_path)?))?;
        written.push(raw_path);
    }

    for path in &written {
        info!("Wrote {}", path.display());
    }
    Ok(written)
}
