use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// Every failure to turn request input into a [`crate::types::DataSet`] surfaces as one of these.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error while reading the input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited (CSV/TSV) parse error, including ragged rows and invalid UTF-8.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON body could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected shape (not an object, no header, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// The upload file name does not carry a supported suffix.
    #[error("unsupported file '{file_name}': expected a .csv or .tsv file")]
    UnsupportedFormat { file_name: String },
}

/// Convenience result type for profiling.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type returned by the profiler.
///
/// Only the dataframe engine can fail here; well-formed datasets always profile.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
