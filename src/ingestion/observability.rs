use crate::error::IngestionError;

use super::unified::IngestionFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Warning-level event (request rejected before parsing).
    Warning,
    /// Error-level event (input could not be parsed).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// Client-supplied name of the input (upload file name, or `records` for JSON bodies).
    pub source: String,
    /// Format used for ingestion, when one could be determined.
    pub format: Option<IngestionFormat>,
    /// Input size in bytes, when known.
    pub bytes: Option<usize>,
}

/// Minimal stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of ingested rows.
    pub rows: usize,
    /// Number of ingested columns.
    pub columns: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards ingestion events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::info!(
            source = %ctx.source,
            format = ?ctx.format,
            bytes = ?ctx.bytes,
            rows = stats.rows,
            columns = stats.columns,
            "ingested dataset"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        match severity {
            IngestionSeverity::Warning => tracing::warn!(
                source = %ctx.source,
                format = ?ctx.format,
                ?severity,
                %error,
                "ingestion rejected"
            ),
            IngestionSeverity::Error | IngestionSeverity::Critical => tracing::error!(
                source = %ctx.source,
                format = ?ctx.format,
                ?severity,
                %error,
                "ingestion failed"
            ),
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        tracing::error!(
            alert = true,
            source = %ctx.source,
            format = ?ctx.format,
            ?severity,
            %error,
            "ingestion alert"
        );
    }
}
