//! Curve tables as delimited text.

use std::io::Write;

use crate::pipeline::{time_axis_seconds, AnalysisReport};

use super::ReportError;

/// Write normalized curves: one row per time point, a mean and a std column
/// per metric.
///
/// Std cells are left empty in single-trial mode.
pub fn write_curves_csv<W: Write>(report: &AnalysisReport, writer: W) -> Result<(), ReportError> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec!["normalized_time".to_string()];
    for metric in report.metrics() {
        header.push(format!("{}_mean", metric.id()));
        header.push(format!("{}_std", metric.id()));
    }
    out.write_record(&header)?;

    for (i, t) in report.time_axis().iter().enumerate() {
        let mut row = Vec::with_capacity(header.len());
        row.push(format_value(*t));
        for metric in report.metrics() {
            row.push(format_value(metric.aggregate.mean()[i]));
            row.push(match metric.aggregate.spread() {
                Some(std) => format_value(std[i]),
                None => String::new(),
            });
        }
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}

/// Write the extracted samples of a single-trial run against a seconds axis.
///
/// Every metric of a trial has one sample per table row, so the columns line
/// up row for row.
pub fn write_raw_csv<W: Write>(report: &AnalysisReport, sampling_rate_hz: f64, writer: W) -> Result<(), ReportError> {
    if !report.is_single_trial() {
        return Err(ReportError::NotSingleTrial(report.trial_count()));
    }

    let columns: Vec<(String, &[f64])> = report
        .metrics()
        .iter()
        .filter_map(|m| m.series.first().map(|s| (m.id().to_string(), s.values())))
        .collect();
    let rows = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

    let mut out = csv::Writer::from_writer(writer);
    let mut header = vec!["time_s".to_string()];
    header.extend(columns.iter().map(|(name, _)| name.clone()));
    out.write_record(&header)?;

    for (i, t) in time_axis_seconds(rows, sampling_rate_hz).iter().enumerate() {
        let mut row = vec![format_value(*t)];
        row.extend(
            columns
                .iter()
                .map(|(_, values)| values.get(i).map(|v| format_value(*v)).unwrap_or_default()),
        );
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}

fn format_value(v: f64) -> String {
    format!("{:.6}", v)
}
