//! # Editor Server
//!
//! HTTP endpoints the editor controller talks to: live preview, save/load,
//! HTML and PDF export, and the writing assistant.

pub mod error;
pub mod handlers;

pub use error::{ApiError, ServerError};

use crate::assistant::Assistant;
use crate::config::Profile;
use crate::document::DocumentStore;
use crate::render::PdfRenderer;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<DocumentStore>,
    pub pdf: Arc<PdfRenderer>,
    pub assistant: Arc<Assistant>,
}

impl AppState {
    pub fn new(documents: DocumentStore, pdf: PdfRenderer, assistant: Assistant) -> Self {
        Self {
            documents: Arc::new(documents),
            pdf: Arc::new(pdf),
            assistant: Arc::new(assistant),
        }
    }

    /// State configured from a profile
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        Ok(Self::new(
            DocumentStore::new(),
            PdfRenderer::new(profile.wkhtmltopdf()),
            Assistant::new(profile.assistant().clone())?,
        ))
    }
}

/// Build the axum router with all editor endpoints
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/preview", post(handlers::preview))
        .route("/save", post(handlers::save))
        .route("/load", post(handlers::load))
        .route("/export/html", post(handlers::export_html))
        .route("/export/pdf", post(handlers::export_pdf))
        .route("/ai-help", post(handlers::ai_help))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Run the HTTP server until Ctrl+C
pub async fn run(state: AppState, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!("Starting HTTP server on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Serve { source })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::Exchange;
    use crate::config::{AssistantSettings, HISTORY_LIMIT};
    use crate::document::Mode;
    use crate::protocol::{
        AiHelpResponse, ErrorResponse, LoadResponse, PreviewResponse, SaveResponse,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            DocumentStore::new(),
            PdfRenderer::new("/nonexistent/bin/wkhtmltopdf"),
            Assistant::new(AssistantSettings::default()).unwrap(),
        )
    }

    async fn post_json(
        app: Router,
        uri: &str,
        body: Value,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, bytes.to_vec())
    }

    #[tokio::test]
    async fn preview_should_render_markdown() {
        let (status, _, body) = post_json(
            router(test_state()),
            "/preview",
            json!({"content": "# Hello", "mode": "markdown"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let preview: PreviewResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(preview.html, "<h1>Hello</h1>\n");
    }

    #[tokio::test]
    async fn preview_should_render_latex() {
        let (_, _, body) = post_json(
            router(test_state()),
            "/preview",
            json!({"content": "\\textbf{x}", "mode": "latex"}),
        )
        .await;

        let preview: PreviewResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(preview.html, "<div class=\"latex-content\"><strong>x</strong></div>");
    }

    #[tokio::test]
    async fn preview_should_reject_unknown_mode() {
        let (status, _, body) = post_json(
            router(test_state()),
            "/preview",
            json!({"content": "x", "mode": "rst"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.starts_with("Invalid payload"));
    }

    #[tokio::test]
    async fn save_then_load_should_round_trip_per_mode() {
        let state = test_state();

        let (status, _, body) = post_json(
            router(state.clone()),
            "/save",
            json!({"content": "\\section{A}", "mode": "latex"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let saved: SaveResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(saved.status, "success");
        assert_eq!(saved.mode, Mode::Latex);
        assert_eq!(state.documents.current_mode(), Mode::Latex);

        let (_, _, body) = post_json(router(state.clone()), "/load", json!({"mode": "latex"})).await;
        let loaded: LoadResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(loaded.content, "\\section{A}");

        let (_, _, body) = post_json(router(state), "/load", json!({})).await;
        let loaded: LoadResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(loaded.mode, Mode::Markdown);
        assert_eq!(loaded.content, "");
    }

    #[tokio::test]
    async fn export_html_should_return_attachment() {
        let (status, headers, body) = post_json(
            router(test_state()),
            "/export/html",
            json!({"content": "# Report", "mode": "markdown"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
        let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"document_"));
        assert!(disposition.ends_with(".html\""));

        let page = String::from_utf8(body).unwrap();
        assert!(page.contains("<title>Exported document</title>"));
        assert!(page.contains("<h1>Report</h1>"));
    }

    #[tokio::test]
    async fn export_pdf_should_fail_without_renderer() {
        let (status, _, body) = post_json(
            router(test_state()),
            "/export/pdf",
            json!({"content": "# Report"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "PDF export failed");
    }

    #[tokio::test]
    async fn ai_help_should_answer_and_cap_history() {
        let history: Vec<Exchange> = (0..HISTORY_LIMIT)
            .map(|i| Exchange::new(format!("q{i}"), format!("a{i}")))
            .collect();
        let (status, _, body) = post_json(
            router(test_state()),
            "/ai-help",
            json!({"question": "how do I add a table?", "mode": "markdown", "history": history}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let answer: AiHelpResponse = serde_json::from_slice(&body).unwrap();
        assert!(answer.response.contains("| Column 1"));
        assert_eq!(answer.history.len(), HISTORY_LIMIT);
        let last = answer.history.exchanges().last().unwrap();
        assert_eq!(last.question, "how do I add a table?");
        assert_eq!(answer.history.exchanges()[0].question, "q1");
    }

    #[tokio::test]
    async fn index_should_serve_editor_page() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = router(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("id=\"editor\""));
    }

    #[test]
    fn index_page_should_inline_welcome_texts() {
        let page = handlers::index_page();

        assert!(!page.contains("__MARKDOWN_WELCOME__"));
        assert!(!page.contains("__LATEX_WELCOME__"));
        assert!(page.contains("markdown: \"# Welcome to the Markdown editor!\\n"));
        assert!(page.contains("latex: \"\\\\section{Welcome to the LaTeX editor!}"));
    }

    #[test]
    fn index_page_should_store_outgoing_mode_before_switching() {
        let page = handlers::index_page();
        let handler = &page[page
            .find("modeSelector.addEventListener('change'")
            .expect("mode change handler")..];

        let cancel = handler.find("clearTimeout(timer)").unwrap();
        let store_old = handler
            .find("localStorage.setItem(storageKey(currentMode), editor.value)")
            .unwrap();
        let switch = handler.find("currentMode = modeSelector.value").unwrap();
        let load_new = handler.find("editor.value = loadContent(currentMode)").unwrap();
        assert!(cancel < store_old && store_old < switch && switch < load_new);
    }
}
