use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures_util::StreamExt;
use serde_json::json;

use crate::ingestion::{ingest_from_bytes, ingest_records_with_options, RecordsPayload};
use crate::profiling::{profile_dataset, SummaryReport};

use super::error::ApiError;
use super::AppState;

/// Multipart part that carries the uploaded file.
const FILE_FIELD: &str = "file";

#[get("/")]
pub async fn root(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": state.welcome_message }))
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[post("/analyze/csv")]
pub async fn analyze_csv(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (file_name, bytes) = read_upload(&mut payload, state.max_upload_bytes).await?;
    tracing::debug!(file_name = %file_name, bytes = bytes.len(), "received upload");

    let options = state.ingestion.clone();
    let report = run_blocking(move || {
        let ds = ingest_from_bytes(&file_name, &bytes, &options)?;
        Ok(profile_dataset(&ds)?)
    })
    .await?;

    Ok(HttpResponse::Ok().json(report))
}

#[post("/analyze/json")]
pub async fn analyze_json(
    state: web::Data<AppState>,
    payload: web::Json<RecordsPayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    tracing::debug!(records = payload.records.len(), "received records");

    let options = state.ingestion.clone();
    let report = run_blocking(move || {
        let ds = ingest_records_with_options(&payload.records, &options)?;
        Ok(profile_dataset(&ds)?)
    })
    .await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Ingestion and profiling are CPU-bound; keep them off the async workers.
async fn run_blocking<F>(job: F) -> Result<SummaryReport, ApiError>
where
    F: FnOnce() -> Result<SummaryReport, ApiError> + Send + 'static,
{
    web::block(job)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
}

/// Read the `file` part of a multipart body into memory.
///
/// Other parts are drained and ignored. Returns the client-supplied file name with the contents.
async fn read_upload(payload: &mut Multipart, limit: usize) -> Result<(String, Vec<u8>), ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(invalid_multipart)?;
        let disposition = field.content_disposition().cloned();
        let is_file_part = disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .is_some_and(|name| name == FILE_FIELD);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(invalid_multipart)?;
            if !is_file_part || upload.is_some() {
                continue;
            }
            if bytes.len() + chunk.len() > limit {
                return Err(ApiError::BadRequest(format!(
                    "upload exceeds the {limit} byte limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if is_file_part && upload.is_none() {
            let file_name = disposition
                .as_ref()
                .and_then(|cd| cd.get_filename())
                .map(str::to_owned)
                .ok_or_else(|| ApiError::BadRequest("uploaded file has no filename".to_string()))?;
            upload = Some((file_name, bytes));
        }
    }

    upload.ok_or_else(|| ApiError::BadRequest(format!("missing multipart field '{FILE_FIELD}'")))
}

fn invalid_multipart(e: actix_multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("invalid multipart payload: {e}"))
}
