//! # Request Handlers
//!
//! One handler per route. Payloads are taken as `Result<Json<_>, _>` so
//! that malformed bodies surface as `ApiError` with a JSON error body.

use super::{ApiError, AppState};
use crate::protocol::{
    AiHelpRequest, AiHelpResponse, DocumentRequest, ExportFormat, LoadRequest, LoadResponse,
    PreviewResponse, SaveResponse,
};
use crate::document::Mode;
use crate::editor::initial_content;
use crate::render::{self, export_document, print_document};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Local;

const INDEX_PAGE: &str = include_str!("../../assets/index.html");

/// Download name for an export produced now
pub fn export_filename(format: ExportFormat) -> String {
    format!(
        "document_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

fn attachment(bytes: Vec<u8>, format: ExportFormat) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", export_filename(format));
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Editor page with the welcome texts inlined as JS string literals
pub fn index_page() -> String {
    let literal = |mode| serde_json::Value::from(initial_content(mode)).to_string();
    INDEX_PAGE
        .replace("__MARKDOWN_WELCOME__", &literal(Mode::Markdown))
        .replace("__LATEX_WELCOME__", &literal(Mode::Latex))
}

pub async fn index() -> Html<String> {
    Html(index_page())
}

pub async fn preview(
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let Json(request) = payload?;
    let html = render::render(&request.content, request.mode);
    Ok(Json(PreviewResponse { html }))
}

pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(request) = payload?;
    state.documents.save(&request.content, request.mode);

    Ok(Json(SaveResponse {
        status: "success".to_string(),
        timestamp: Local::now().to_rfc3339(),
        mode: request.mode,
    }))
}

pub async fn load(
    State(state): State<AppState>,
    payload: Result<Json<LoadRequest>, JsonRejection>,
) -> Result<Json<LoadResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(LoadResponse {
        content: state.documents.load(request.mode),
        mode: request.mode,
    }))
}

pub async fn export_html(
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let page = export_document(&render::render(&request.content, request.mode));
    tracing::info!("Exporting {} document as HTML", request.mode);
    Ok(attachment(page.into_bytes(), ExportFormat::Html))
}

pub async fn export_pdf(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let page = print_document(&render::render(&request.content, request.mode));
    tracing::info!("Exporting {} document as PDF", request.mode);
    let pdf = state.pdf.render(&page).await?;
    Ok(attachment(pdf, ExportFormat::Pdf))
}

pub async fn ai_help(
    State(state): State<AppState>,
    payload: Result<Json<AiHelpRequest>, JsonRejection>,
) -> Result<Json<AiHelpResponse>, ApiError> {
    let Json(request) = payload?;
    let (response, history) = state
        .assistant
        .answer(&request.question, request.mode, request.history)
        .await;
    Ok(Json(AiHelpResponse { response, history }))
}
