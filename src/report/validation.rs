//! Per-file check of a trial against the metric set of a mode.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::metric::{extract, MetricId, MetricRegistry, SchemaError, Side};
use crate::pipeline::{AnalysisMode, TrialCache, TrialInput};
use crate::table::ColumnKey;

/// What was found in the column of one metric
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStatus {
    /// Present with a readable value in every sample row
    Ready,
    /// No column carries the metric's key
    Missing,
    /// A cell could not be read as a number
    Unreadable(String),
    /// Readable, but too few samples to normalize
    TooShort,
}

/// Result of checking one metric column
#[derive(Debug, Clone)]
pub struct MetricCheck {
    /// Metric checked
    pub metric: MetricId,
    /// Display name of the metric
    pub label: &'static str,
    /// Column key resolved for the trial's side
    pub key: ColumnKey,
    /// Samples read from the column, zero unless it could be read
    pub samples: usize,
    /// Outcome
    pub status: ColumnStatus,
}

impl MetricCheck {
    /// True when the metric can be analyzed
    pub fn is_ready(&self) -> bool {
        self.status == ColumnStatus::Ready
    }
}

/// Readiness of one trial file for a mode on a side
#[derive(Debug)]
pub struct TrialValidation {
    file: String,
    side: Side,
    mode: AnalysisMode,
    layout: Result<usize, String>,
    metrics: Vec<MetricCheck>,
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Bad,
    Heading,
}

impl TrialValidation {
    /// File that was checked
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Side the metric keys were resolved for
    pub fn side(&self) -> Side {
        self.side
    }

    /// Mode whose metric set was checked
    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Sample rows in the table, if it could be parsed
    pub fn row_count(&self) -> Option<usize> {
        self.layout.as_ref().ok().copied()
    }

    /// Why the table could not be parsed
    pub fn layout_error(&self) -> Option<&str> {
        self.layout.as_ref().err().map(String::as_str)
    }

    /// One check per metric of the mode, in registry order
    pub fn metrics(&self) -> &[MetricCheck] {
        &self.metrics
    }

    /// Metrics that can be analyzed
    pub fn ready_count(&self) -> usize {
        self.metrics.iter().filter(|m| m.is_ready()).count()
    }

    /// Problems found, counting an unparseable table as one
    pub fn failure_count(&self) -> usize {
        let layout = usize::from(self.layout.is_err());
        layout + self.metrics.iter().filter(|m| !m.is_ready()).count()
    }

    /// True when the trial can be used for this mode
    pub fn is_valid(&self) -> bool {
        self.failure_count() == 0
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.render(|tone, text| match tone {
                Tone::Good => style(text).green().to_string(),
                Tone::Bad => style(text).red().bold().to_string(),
                Tone::Heading => style(text).bold().cyan().to_string(),
            })
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }

    fn render(&self, paint: impl Fn(Tone, &str) -> String) -> String {
        let mut out = format!("{} {} (side {}, {}", paint(Tone::Heading, "Trial:"), self.file, self.side, self.mode);
        let rows = match &self.layout {
            Ok(rows) => *rows,
            Err(e) => {
                out.push_str(")\n");
                out.push_str(&format!("  {} table layout: {}\n", paint(Tone::Bad, "[FAIL]"), e));
                return out;
            }
        };
        out.push_str(&format!(", {} samples)\n", rows));

        for check in &self.metrics {
            let (tag, tone) = if check.is_ready() {
                ("[OK]  ", Tone::Good)
            } else {
                ("[FAIL]", Tone::Bad)
            };
            let detail = match &check.status {
                ColumnStatus::Ready => format!("{}/{} samples", check.samples, rows),
                ColumnStatus::Missing => "column not found".to_string(),
                ColumnStatus::Unreadable(msg) => msg.clone(),
                ColumnStatus::TooShort => format!("{} samples, at least 2 are required", check.samples),
            };
            out.push_str(&format!(
                "  {} {:<26}{:<34}{}\n",
                paint(tone, tag),
                check.label,
                check.key.to_string(),
                detail
            ));
        }

        let summary = format!("{} of {} metrics ready", self.ready_count(), self.metrics.len());
        let tone = if self.is_valid() { Tone::Good } else { Tone::Bad };
        out.push_str(&format!("  {}\n", paint(tone, &summary)));
        out
    }
}

impl fmt::Display for TrialValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_, text| text.to_string()))
    }
}

/// Check `trial` against the metric set of `mode` on `side`.
///
/// Unlike a pipeline run, every metric is checked even after a failure so the
/// report lists all problems in the file.
pub fn validate_trial(
    trial: &TrialInput,
    side: Side,
    mode: AnalysisMode,
    registry: &MetricRegistry,
    cache: &mut TrialCache,
) -> TrialValidation {
    let table = match cache.get_or_parse(trial) {
        Ok(table) => table,
        Err(e) => {
            return TrialValidation {
                file: trial.name().to_string(),
                side,
                mode,
                layout: Err(e.to_string()),
                metrics: Vec::new(),
            }
        }
    };

    let metrics = registry
        .resolve(side, &mode.metrics())
        .into_iter()
        .map(|resolved| {
            let (samples, status) = match extract(&table, side, &resolved.spec) {
                Err(SchemaError::MetricNotFound { .. }) => (0, ColumnStatus::Missing),
                Err(SchemaError::Table(e)) => (0, ColumnStatus::Unreadable(e.to_string())),
                Err(e) => (0, ColumnStatus::Unreadable(e.to_string())),
                Ok(series) if series.len() < 2 => (series.len(), ColumnStatus::TooShort),
                Ok(series) => (series.len(), ColumnStatus::Ready),
            };
            MetricCheck {
                metric: resolved.spec.id,
                label: resolved.spec.label,
                key: resolved.key,
                samples,
                status,
            }
        })
        .collect();

    TrialValidation {
        file: trial.name().to_string(),
        side,
        mode,
        layout: Ok(table.row_count()),
        metrics,
    }
}
