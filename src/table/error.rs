use super::ColumnKey;

/// Errors that can occur while loading or reading a trial table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// I/O error reading the table file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Fewer than the three header rows (group, axis, unit)
    #[error("Expected {expected} header rows (group, axis, unit), found {found}")]
    MissingHeader {
        /// Required header rows
        expected: usize,
        /// Header rows present
        found: usize,
    },

    /// A data cell could not be read as a number
    #[error("Invalid value '{value}' in column {column} at line {line}")]
    InvalidValue {
        /// 1-based line number in the source file
        line: usize,
        /// Column being read
        column: ColumnKey,
        /// Offending cell text
        value: String,
    },
}
