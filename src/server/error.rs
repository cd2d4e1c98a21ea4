use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::error::{AnalysisError, IngestionError};

/// Errors returned by request handlers.
///
/// Every variant renders as `{"detail": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself is unusable (missing upload, oversized payload, bad JSON body).
    #[error("{0}")]
    BadRequest(String),

    /// The input could not be turned into a dataset.
    #[error("{0}")]
    Ingestion(#[from] IngestionError),

    /// The dataframe engine failed while profiling a dataset.
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// The blocking worker pool failed to run the analysis.
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Ingestion(_) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}
