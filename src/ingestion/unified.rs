//! Unified ingestion entrypoints.
//!
//! Request handlers call [`ingest_from_bytes`] for uploads and [`ingest_records_with_options`] for
//! JSON bodies. Both report success/failure/alerts to the [`IngestionObserver`] configured in
//! [`IngestionOptions`], if any.

use std::fmt;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::DataSet;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON list of row objects.
    JsonRecords,
}

impl IngestionFormat {
    /// Pick the delimited format from an upload file name.
    ///
    /// The suffix check is case-sensitive: `data.csv` is CSV, `data.CSV` is rejected.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".csv") {
            Some(Self::Csv)
        } else if name.ends_with(".tsv") {
            Some(Self::Tsv)
        } else {
            None
        }
    }

    /// Field delimiter for delimited formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::JsonRecords => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest an uploaded delimited file.
///
/// The format comes from the file name suffix (`.csv` or `.tsv`). Any other name fails with
/// [`IngestionError::UnsupportedFormat`] before the content is looked at.
///
/// ```
/// use dataset_summary::ingestion::{ingest_from_bytes, IngestionOptions};
///
/// let ds = ingest_from_bytes("people.tsv", b"id\tname\n1\tAda\n", &IngestionOptions::default())
///     .unwrap();
/// assert_eq!(ds.row_count(), 1);
/// assert_eq!(ds.column_count(), 2);
///
/// assert!(ingest_from_bytes("people.txt", b"id\n1\n", &IngestionOptions::default()).is_err());
/// ```
pub fn ingest_from_bytes(
    file_name: &str,
    bytes: &[u8],
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let format = IngestionFormat::from_file_name(file_name);
    let ctx = IngestionContext {
        source: file_name.to_string(),
        format,
        bytes: Some(bytes.len()),
    };

    let result = match format.and_then(|f| f.delimiter()) {
        Some(delimiter) => csv::ingest_delimited_from_bytes(bytes, delimiter),
        None => Err(IngestionError::UnsupportedFormat {
            file_name: file_name.to_string(),
        }),
    };

    report(options, &ctx, &result);
    result
}

/// Ingest a list of JSON row objects, reporting the outcome to the configured observer.
pub fn ingest_records_with_options(
    records: &[serde_json::Value],
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let ctx = IngestionContext {
        source: "records".to_string(),
        format: Some(IngestionFormat::JsonRecords),
        bytes: None,
    };

    let result = json::ingest_records(records);
    report(options, &ctx, &result);
    result
}

fn report(options: &IngestionOptions, ctx: &IngestionContext, result: &IngestionResult<DataSet>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(ds) => obs.on_success(
            ctx,
            IngestionStats {
                rows: ds.row_count(),
                columns: ds.column_count(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::Json(_) => IngestionSeverity::Error,
        IngestionError::SchemaMismatch { .. } => IngestionSeverity::Error,
        IngestionError::UnsupportedFormat { .. } => IngestionSeverity::Warning,
    }
}
