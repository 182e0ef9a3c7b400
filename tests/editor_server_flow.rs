//! End-to-end flow: the real server on an ephemeral port, driven by the
//! editor controller over HTTP.

use std::net::SocketAddr;
use tempfile::TempDir;
use texmark::assistant::Assistant;
use texmark::config::{AssistantSettings, HISTORY_LIMIT};
use texmark::document::{DocumentStore, Mode};
use texmark::editor::{
    EditorController, EditorEvent, EditorWidget, FileStore, LocalStore, LogicalPosition,
    MemoryStore, RemoteClient, Sender, TextBuffer,
};
use texmark::protocol::ExportFormat;
use texmark::render::PdfRenderer;
use texmark::server::{router, AppState};

async fn start_server() -> (SocketAddr, AppState) {
    let state = AppState::new(
        DocumentStore::new(),
        PdfRenderer::new("/nonexistent/bin/wkhtmltopdf"),
        Assistant::new(AssistantSettings::default()).unwrap(),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

fn editor_for<S: LocalStore>(addr: SocketAddr, store: S, mode: Mode) -> EditorController<TextBuffer, S> {
    let remote = RemoteClient::new(format!("http://{addr}")).unwrap();
    EditorController::new(TextBuffer::new(), store, remote, mode)
}

#[tokio::test]
async fn editing_session_should_preview_and_save_through_server() {
    let (addr, state) = start_server().await;
    let mut editor = editor_for(addr, MemoryStore::new(), Mode::Markdown);

    editor.init().await;
    assert!(editor.preview_html().contains("<h1>Welcome to the Markdown editor!</h1>"));

    editor.set_content("# Notes\n\nSome **bold** text");
    editor.debounced().await;
    editor.on_debounce_fired().await;

    assert!(editor.preview_html().contains("<strong>bold</strong>"));
    assert_eq!(editor.status_message(), "Saved");
    assert_eq!(state.documents.load(Mode::Markdown), "# Notes\n\nSome **bold** text");
    assert_eq!(state.documents.current_mode(), Mode::Markdown);

    let events = editor.collect_pending_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, EditorEvent::PreviewUpdated { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, EditorEvent::StatusChanged { message } if message == "Saved")));
}

#[tokio::test]
async fn mode_switch_should_render_latex_and_keep_markdown_locally() {
    let (addr, state) = start_server().await;
    let dir = TempDir::new().unwrap();
    let storage = dir.path().join("storage.json");

    let mut editor = editor_for(addr, FileStore::open(&storage).unwrap(), Mode::Markdown);
    editor.init().await;
    editor.set_content("# Draft");

    editor.switch_mode(Mode::Latex).await;
    assert!(editor
        .preview_html()
        .starts_with("<div class=\"latex-content\"><h2>Welcome to the LaTeX editor!</h2>"));

    editor
        .widget_mut()
        .set_cursor(LogicalPosition::new(0, 0));
    editor.insert_text("\\section{ }").await;
    assert!(editor.content().starts_with("\\section{ }"));

    editor.autosave().await;
    assert!(state.documents.load(Mode::Latex).starts_with("\\section{ }"));
    assert_eq!(state.documents.current_mode(), Mode::Latex);

    let reopened = FileStore::open(&storage).unwrap();
    assert_eq!(reopened.get("editor-content-markdown").as_deref(), Some("# Draft"));
    assert!(reopened
        .get("editor-content-latex")
        .is_some_and(|content| content.starts_with("\\section{ }")));
}

#[tokio::test]
async fn export_should_write_html_and_report_pdf_failure() {
    let (addr, _) = start_server().await;
    let dir = TempDir::new().unwrap();

    let mut editor = editor_for(addr, MemoryStore::new(), Mode::Markdown);
    editor.widget_mut().set_value("# Report\n\n| a | b |\n|---|---|\n| 1 | 2 |");

    let html = editor.export(ExportFormat::Html, dir.path()).await.unwrap();
    let name = html.file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("document_") && name.ends_with(".html"));
    let page = std::fs::read_to_string(&html).unwrap();
    assert!(page.contains("<table>"));
    assert!(page.contains("<title>Exported document</title>"));
    assert_eq!(editor.status_message(), "HTML created");

    assert!(editor.export(ExportFormat::Pdf, dir.path()).await.is_err());
    assert_eq!(editor.status_message(), "PDF export failed");
}

#[tokio::test]
async fn assistant_conversation_should_be_capped_in_local_storage() {
    let (addr, _) = start_server().await;
    let mut editor = editor_for(addr, MemoryStore::new(), Mode::Latex);

    for i in 0..HISTORY_LIMIT + 2 {
        let reply = editor
            .ask_ai(&format!("how do I write a list? ({i})"))
            .await
            .unwrap();
        assert!(reply.contains("itemize"));
    }

    assert_eq!(editor.conversation_history().len(), HISTORY_LIMIT);
    assert_eq!(editor.transcript().len(), (HISTORY_LIMIT + 2) * 2);
    assert_eq!(editor.transcript()[0].sender, Sender::User);
    assert_eq!(
        editor.conversation_history().exchanges()[0].question,
        "how do I write a list? (2)"
    );
}

#[tokio::test]
async fn unreachable_server_should_degrade_gracefully() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut editor = editor_for(addr, MemoryStore::new(), Mode::Markdown);
    editor.init().await;
    assert_eq!(editor.preview_html(), "<p>Preview update failed</p>");

    editor.save_to_server().await;
    assert_eq!(editor.status_message(), "Save failed");

    let reply = editor.ask_ai("bold?").await.unwrap();
    assert_eq!(reply, "Connection error. Please try again.");
}
