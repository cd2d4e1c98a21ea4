//! HTTP surface.
//!
//! Routes:
//!
//! - `GET /` welcome message
//! - `GET /health` liveness
//! - `POST /analyze/csv` multipart upload of a `.csv`/`.tsv` file (field `file`)
//! - `POST /analyze/json` body `{"records": [{...}, ...]}`
//!
//! Both analyze routes answer with the [`crate::profiling::SummaryReport`] JSON, or 400 with
//! `{"detail": ...}` when the input cannot be ingested. CORS is permissive.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::error::JsonPayloadError;
use actix_web::{middleware, web, App, HttpRequest, HttpServer};

use crate::config::ServiceConfig;
use crate::ingestion::{IngestionObserver, IngestionOptions, IngestionSeverity};

pub use error::ApiError;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub ingestion: IngestionOptions,
    pub max_upload_bytes: usize,
    pub max_json_bytes: usize,
    pub welcome_message: String,
}

impl AppState {
    pub fn new(config: &ServiceConfig, observer: Arc<dyn IngestionObserver>) -> Self {
        Self {
            ingestion: IngestionOptions {
                observer: Some(observer),
                alert_at_or_above: IngestionSeverity::Critical,
            },
            max_upload_bytes: config.max_upload_bytes,
            max_json_bytes: config.max_json_bytes,
            welcome_message: config.welcome_message.clone(),
        }
    }
}

/// Register state, extractor limits and routes on an actix app.
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let json_config = web::JsonConfig::default()
        .limit(state.max_json_bytes)
        .error_handler(json_error_handler);

    cfg.app_data(state)
        .app_data(json_config)
        .service(handlers::root)
        .service(handlers::health)
        .service(handlers::analyze_csv)
        .service(handlers::analyze_json);
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("invalid records payload: {err}")).into()
}

/// Build the HTTP server bound to the configured address.
///
/// The returned [`Server`] must be awaited to run.
pub fn build_server(config: &ServiceConfig, observer: Arc<dyn IngestionObserver>) -> std::io::Result<Server> {
    let state = web::Data::new(AppState::new(config, observer));

    let mut server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .configure(|cfg| configure(cfg, state))
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let server = server.bind((config.host.as_str(), config.port))?.run();
    tracing::info!(host = %config.host, port = config.port, "dataset summary service listening");
    Ok(server)
}
