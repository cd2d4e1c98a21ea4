use std::sync::{Arc, Mutex};

use dataset_summary::ingestion::{
    ingest_from_bytes, ingest_records_with_options, IngestionContext, IngestionFormat,
    IngestionObserver, IngestionOptions, IngestionSeverity, IngestionStats,
};
use dataset_summary::IngestionError;
use serde_json::json;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(Option<IngestionFormat>, IngestionStats)>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push((ctx.format, stats));
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: Arc<RecordingObserver>, threshold: IngestionSeverity) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs),
        alert_at_or_above: threshold,
    }
}

#[test]
fn observer_receives_success_with_shape() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Critical);

    ingest_from_bytes("data.tsv", b"a\tb\n1\t2\n3\t4\n", &opts).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![(Some(IngestionFormat::Tsv), IngestionStats { rows: 2, columns: 2 })]
    );
}

#[test]
fn unsupported_file_name_is_reported_as_warning_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Error);

    let err = ingest_from_bytes("data.txt", b"a,b\n1,2\n", &opts).unwrap_err();
    assert!(matches!(err, IngestionError::UnsupportedFormat { .. }));

    assert!(obs.successes.lock().unwrap().is_empty());
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Warning]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn parse_failure_alerts_at_error_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Error);

    ingest_from_bytes("bad.csv", b"a,b\n1,2,3\n", &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}

#[test]
fn record_events_reach_the_observer() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(obs.clone(), IngestionSeverity::Critical);

    ingest_records_with_options(&[json!({"x": 1})], &opts).unwrap();
    ingest_records_with_options(&[json!("not an object")], &opts).unwrap_err();

    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![(Some(IngestionFormat::JsonRecords), IngestionStats { rows: 1, columns: 1 })]
    );
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}
