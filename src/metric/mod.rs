//! # Metric Module
//!
//! Typed definitions of the signals this crate analyzes and the extractor
//! that pulls them out of a trial table.
//!
//! Column lookups are resolved from a [`MetricRegistry`] rather than from
//! ad-hoc strings, so a table can be checked against a whole metric set in a
//! single validation step before any extraction runs.

mod error;
mod extract;
mod registry;
mod spec;


pub use error::SchemaError;
pub use extract::{extract, SignalSeries};
pub use registry::{MetricRegistry, ResolvedMetric, MOMENT_SCALE};
pub use spec::{MetricId, MetricKind, MetricSpec, Side};
