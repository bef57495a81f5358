//! Plain-text tables for the terminal.

use std::fmt;

use crate::pipeline::{AnalysisReport, FiringOrder};

/// Ranked segments with 1-based ranks
pub struct FiringOrderTable<'a> {
    order: &'a FiringOrder,
    report: &'a AnalysisReport,
}

impl<'a> FiringOrderTable<'a> {
    /// Table for the firing order of `report`, if it has one
    pub fn new(report: &'a AnalysisReport) -> Option<Self> {
        report.firing_order().map(|order| Self { order, report })
    }

    fn label<'m>(&self, metric: &'m str) -> &'m str {
        self.report
            .metrics()
            .iter()
            .find(|m| m.id().as_str() == metric)
            .map(|m| m.spec.label)
            .unwrap_or(metric)
    }
}

impl fmt::Display for FiringOrderTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6}{:<24}{:>14}", "Rank", "Segment", "Peak time (%)")?;
        writeln!(f, "{}", "-".repeat(44))?;
        for (i, peak) in self.order.ranked.iter().enumerate() {
            writeln!(
                f,
                "{:<6}{:<24}{:>14.1}",
                i + 1,
                self.label(&peak.metric),
                peak.normalized_time
            )?;
        }
        writeln!(f)?;
        if self.order.proximal_to_distal {
            write!(f, "Sequence: proximal-to-distal")
        } else {
            write!(f, "Sequence: out of order")
        }
    }
}

/// Peak value and timing of every analyzed metric
pub struct PeakTable<'a>(pub &'a AnalysisReport);

impl fmt::Display for PeakTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<26}{:>12}  {:<8}{:>14}", "Metric", "Peak", "Unit", "Peak time (%)")?;
        writeln!(f, "{}", "-".repeat(62))?;
        for metric in self.0.metrics() {
            writeln!(
                f,
                "{:<26}{:>12.2}  {:<8}{:>14.1}",
                metric.spec.label, metric.peak.value, metric.spec.output_unit, metric.peak.normalized_time
            )?;
        }
        Ok(())
    }
}
