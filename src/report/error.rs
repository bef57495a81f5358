/// Errors raised while writing analysis artifacts
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Error during file operations
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error serializing curve tables
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error serializing the summary
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Raw-sample export needs exactly one trial
    #[error("Raw samples can only be exported for a single trial, got {0}")]
    NotSingleTrial(usize),
}
