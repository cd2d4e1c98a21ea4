//! `dataset-summary` turns tabular input into a descriptive statistics report.
//!
//! Input (a CSV/TSV upload or a list of JSON records) is ingested into an in-memory
//! [`types::DataSet`] whose column types are inferred once, then [`profiling::profile_dataset`]
//! computes a [`profiling::SummaryReport`]:
//!
//! - shape, column names, dtype tags and a memory estimate
//! - per-column and total missing cells
//! - duplicate row count
//! - numeric statistics (count/mean/std/min/quartiles/max) for integer and float columns
//! - value frequencies for text columns
//! - strong pairwise Pearson correlations (`|r| >= 0.5`, at most 20)
//! - the first five rows
//!
//! The [`server`] module exposes this over HTTP with actix-web.
//!
//! ## Example: ingest CSV text and profile it
//!
//! ```rust
//! use dataset_summary::ingestion::csv::ingest_delimited_from_bytes;
//! use dataset_summary::profiling::profile_dataset;
//! use dataset_summary::types::DataType;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = "id,city,score\n1,Paris,9.5\n2,Lyon,\n3,Paris,7.0\n";
//! let ds = ingest_delimited_from_bytes(input.as_bytes(), b',')?;
//! assert_eq!(ds.schema.fields[1].data_type, DataType::Utf8);
//!
//! let report = profile_dataset(&ds)?;
//! assert_eq!(report.missing.total_missing_cells, 1);
//! assert_eq!(report.categorical_summary.get("city").unwrap().unique, 2);
//! assert_eq!(report.numeric_summary.get("score").unwrap().count, 2.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`ingestion`]: CSV/TSV and JSON records ingestion with type inference
//! - [`profiling`]: the dataset analyzer and report types
//! - [`config`]: layered service configuration
//! - [`server`]: HTTP routes and error mapping
//! - [`error`]: ingestion and analysis error types

pub mod config;
pub mod error;
pub mod ingestion;
pub mod profiling;
pub mod server;
pub mod types;

pub use error::{AnalysisError, AnalysisResult, IngestionError, IngestionResult};
