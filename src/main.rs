use std::sync::Arc;

use dataset_summary::config::ServiceConfig;
use dataset_summary::ingestion::TracingObserver;
use dataset_summary::server;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::load()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    server::build_server(&config, Arc::new(TracingObserver))?.await?;
    Ok(())
}
