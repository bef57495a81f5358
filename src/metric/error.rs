use crate::table::{ColumnKey, TableError};

use super::MetricId;

/// Errors raised when a trial table does not satisfy a metric's column contract
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The column for a metric is absent from the table
    #[error("Missing column {key} for metric {metric}")]
    MetricNotFound {
        /// Metric being extracted
        metric: MetricId,
        /// Column key that was looked up
        key: ColumnKey,
    },

    /// Several required columns are absent
    #[error("Missing required columns: {}", format_keys(.0))]
    MissingColumns(Vec<ColumnKey>),

    /// The column exists but its values could not be read
    #[error("Unreadable column data: {0}")]
    Table(#[from] TableError),
}

fn format_keys(keys: &[ColumnKey]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
