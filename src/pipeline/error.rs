use crate::curve::CurveError;
use crate::metric::{MetricId, SchemaError};
use crate::table::TableError;

/// Errors that abort an analysis run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Wrong number of trials for one run
    #[error("Expected {} trial files, got {actual}", format_counts(.allowed))]
    InputCount {
        /// Number of trials supplied
        actual: usize,
        /// Accepted trial counts
        allowed: Vec<usize>,
    },

    /// A trial file could not be read
    #[error("Failed to read {file}: {source}")]
    Io {
        /// Offending file
        file: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A trial file could not be parsed as a table
    #[error("Failed to load {file}: {source}")]
    Table {
        /// Offending file
        file: String,
        /// Underlying error
        #[source]
        source: TableError,
    },

    /// A trial table lacks columns or holds unreadable values
    #[error("{file}: {source}")]
    Schema {
        /// Offending file
        file: String,
        /// Underlying error
        #[source]
        source: SchemaError,
    },

    /// A trial has too few samples to normalize
    #[error("{file}: metric {metric} has {samples} samples, at least 2 are required")]
    TooShort {
        /// Offending file
        file: String,
        /// Metric being extracted
        metric: MetricId,
        /// Samples found
        samples: usize,
    },

    /// Internal precondition violated while resampling or aggregating
    #[error("Internal error (please report): {0}")]
    Defect(#[from] CurveError),
}

fn format_counts(counts: &[usize]) -> String {
    match counts {
        [] => "no".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => format!(
            "{} or {}",
            init.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", "),
            last
        ),
    }
}
