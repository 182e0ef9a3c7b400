use crate::protocol::ErrorResponse;
use crate::render::PdfError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors returned from request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed JSON, wrong content type or an unknown mode
    #[error("Invalid payload: {0}")]
    InvalidJsonBody(#[from] JsonRejection),

    #[error("PDF export failed")]
    PdfExport(#[from] PdfError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidJsonBody(rejection) => {
                tracing::warn!("Rejected request: {}", rejection.body_text());
                StatusCode::BAD_REQUEST
            }
            ApiError::PdfExport(err) => {
                tracing::error!("PDF export error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// HTTP server lifecycle errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server terminated unexpectedly")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}
