//! Ingestion entrypoints and implementations.
//!
//! Request input becomes an in-memory [`crate::types::DataSet`] here, with each column's
//! [`crate::types::DataType`] inferred once:
//!
//! - [`csv`]: CSV/TSV text with a header row
//! - [`json`]: JSON lists of row objects
//! - [`unified`]: format selection from upload file names plus observer reporting

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use json::RecordsPayload;
pub use observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{ingest_from_bytes, ingest_records_with_options, IngestionFormat, IngestionOptions};
