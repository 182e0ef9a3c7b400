//! # Editor Controller
//!
//! Owns the document mode and wires the text widget, local storage and the
//! editor server together: debounced live preview and save, autosave, mode
//! switching, export and the assistant conversation.

use super::debounce::Debouncer;
use super::events::{AssistantMessage, EditorEvent, Sender};
use super::remote::RemoteClient;
use super::status_line::{DocumentStats, StatusLine, SAVED};
use super::storage::{LocalStore, CONVERSATION_KEY};
use super::templates::initial_content;
use super::toolbar::{self, expand_snippet, ToolbarButton};
use super::types::ViewMode;
use super::widget::EditorWidget;
use crate::assistant::ConversationHistory;
use crate::config::DEBOUNCE_DELAY;
use crate::document::Mode;
use crate::protocol::ExportFormat;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Preview body shown when rendering fails
pub const PREVIEW_ERROR_HTML: &str = "<p>Preview update failed</p>";

/// Assistant reply recorded when the server cannot be reached
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again.";

pub struct EditorController<W: EditorWidget, S: LocalStore> {
    widget: W,
    store: S,
    remote: RemoteClient,
    mode: Mode,
    view_mode: ViewMode,
    preview_html: String,
    status: StatusLine,
    debouncer: Debouncer,
    assistant_open: bool,
    transcript: Vec<AssistantMessage>,
    pending_events: Vec<EditorEvent>,
}

impl<W: EditorWidget, S: LocalStore> EditorController<W, S> {
    pub fn new(mut widget: W, store: S, remote: RemoteClient, mode: Mode) -> Self {
        widget.set_syntax(mode.syntax());

        Self {
            widget,
            store,
            remote,
            mode,
            view_mode: ViewMode::default(),
            preview_html: String::new(),
            status: StatusLine::new(),
            debouncer: Debouncer::new(DEBOUNCE_DELAY),
            assistant_open: false,
            transcript: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn preview_html(&self) -> &str {
        &self.preview_html
    }

    pub fn status_message(&self) -> &str {
        self.status.status_message()
    }

    pub fn stats(&self) -> DocumentStats {
        self.status.stats()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Direct widget access; call `on_change` after editing through it
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transcript(&self) -> &[AssistantMessage] {
        &self.transcript
    }

    pub fn is_assistant_open(&self) -> bool {
        self.assistant_open
    }

    pub fn content(&self) -> String {
        self.widget.value()
    }

    /// Replace the content as if the user had typed it
    pub fn set_content(&mut self, content: &str) {
        self.widget.set_value(content);
        self.on_change();
    }

    /// Take all events queued since the last call
    pub fn collect_pending_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: EditorEvent) {
        self.pending_events.push(event);
    }

    // === Lifecycle ===

    /// Load the stored document (or the welcome text), then preview it
    pub async fn init(&mut self) {
        tracing::debug!("Initializing editor in {} mode", self.mode);
        self.load_from_local();
        self.update_preview().await;
        self.refresh_stats();
    }

    /// Widget content changed
    pub fn on_change(&mut self) {
        self.debouncer.trigger();
        self.refresh_stats();
    }

    /// Resolves when the debounce timer started by `on_change` fires
    pub async fn debounced(&mut self) {
        self.debouncer.fired().await;
    }

    pub fn has_pending_change(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Work deferred by the debounce timer
    pub async fn on_debounce_fired(&mut self) {
        self.update_preview().await;
        self.save_to_server().await;
        self.save_locally_or_warn();
    }

    /// Periodic save to the server and local storage
    pub async fn autosave(&mut self) {
        tracing::debug!("Autosaving {} document", self.mode);
        self.save_to_server().await;
        self.save_locally_or_warn();
    }

    /// Flush the document to local storage before exit
    pub fn shutdown(&mut self) -> Result<()> {
        self.debouncer.cancel();
        self.save_to_local()
    }

    // === Mode and view ===

    pub async fn switch_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }

        self.save_locally_or_warn();

        let old_mode = self.mode;
        self.mode = mode;
        self.widget.set_syntax(mode.syntax());
        tracing::info!("Switched editor mode from {} to {}", old_mode, mode);
        self.emit(EditorEvent::ModeSwitched {
            old_mode,
            new_mode: mode,
        });

        self.load_from_local();
        self.update_preview().await;
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        self.emit(EditorEvent::ViewModeChanged { view_mode });
    }

    // === Editing ===

    /// Toolbar for the current mode
    pub fn toolbar(&self) -> &'static [ToolbarButton] {
        toolbar::buttons(self.mode)
    }

    /// Apply the toolbar button labelled `label`; false if there is none
    pub async fn press_button(&mut self, label: &str) -> bool {
        match self.toolbar().iter().find(|button| button.label == label) {
            Some(button) => {
                self.insert_text(button.snippet).await;
                true
            }
            None => false,
        }
    }

    /// Apply a toolbar snippet at the cursor or around the selection
    pub async fn insert_text(&mut self, snippet: &str) {
        let selection = self.widget.selection();
        let text = expand_snippet(snippet, &selection);
        self.widget.replace_selection(&text);
        self.on_change();
        self.update_preview().await;
    }

    fn refresh_stats(&mut self) {
        let stats = DocumentStats::of(&self.widget.value(), self.widget.line_count(), self.mode);
        self.status.update_stats(stats);
        self.emit(EditorEvent::StatsChanged {
            chars: stats.chars,
            lines: stats.lines,
        });
    }

    fn set_status(&mut self, message: &str) {
        self.status.set_status_message(message);
        self.emit(EditorEvent::StatusChanged {
            message: message.to_string(),
        });
    }

    // === Server ===

    pub async fn update_preview(&mut self) {
        match self.remote.preview(&self.widget.value(), self.mode).await {
            Ok(html) => {
                self.preview_html = html.clone();
                self.emit(EditorEvent::PreviewUpdated { html });
            }
            Err(e) => {
                tracing::warn!("Preview update failed: {e:#}");
                self.preview_html = PREVIEW_ERROR_HTML.to_string();
                self.emit(EditorEvent::PreviewFailed {
                    message: format!("{e:#}"),
                });
            }
        }
    }

    pub async fn save_to_server(&mut self) {
        match self.remote.save(&self.widget.value(), self.mode).await {
            Ok(_) => self.set_status(SAVED),
            Err(e) => {
                tracing::warn!("Save to server failed: {e:#}");
                self.set_status("Save failed");
            }
        }
    }

    /// Export through the server and write the file into `dir`
    pub async fn export(&mut self, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
        let label = format.extension().to_uppercase();
        self.set_status(&format!("Creating {label}..."));

        match self.fetch_export(format, dir).await {
            Ok(path) => {
                tracing::info!("Exported {} to {}", label, path.display());
                self.set_status(&format!("{label} created"));
                self.emit(EditorEvent::Exported { path: path.clone() });
                Ok(path)
            }
            Err(e) => {
                tracing::error!("{label} export failed: {e:#}");
                self.set_status(&format!("{label} export failed"));
                match format {
                    ExportFormat::Pdf => Err(e.context(
                        "PDF export failed. Make sure wkhtmltopdf is installed on the server",
                    )),
                    ExportFormat::Html => Err(e.context("HTML export failed")),
                }
            }
        }
    }

    async fn fetch_export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
        let file = self
            .remote
            .export(format, &self.widget.value(), self.mode)
            .await?;
        let filename = file
            .filename
            .unwrap_or_else(|| fallback_export_filename(format));

        let path = dir.join(filename);
        tokio::fs::write(&path, &file.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    // === Local storage ===

    pub fn save_to_local(&mut self) -> Result<()> {
        let key = self.mode.storage_key();
        self.store.set(&key, &self.widget.value())?;
        tracing::debug!("Saved to local storage: {}", key);
        Ok(())
    }

    fn save_locally_or_warn(&mut self) {
        if let Err(e) = self.save_to_local() {
            tracing::warn!("Local save failed: {e:#}");
        }
    }

    /// Show the stored document for the current mode, or its welcome text
    pub fn load_from_local(&mut self) {
        let key = self.mode.storage_key();
        match self.store.get(&key) {
            Some(saved) if !saved.is_empty() => {
                self.widget.set_value(&saved);
                tracing::debug!("Loaded from local storage: {}", key);
            }
            _ => self.widget.set_value(initial_content(self.mode)),
        }
        self.refresh_stats();
    }

    // === Assistant ===

    pub fn open_assistant(&mut self) {
        self.assistant_open = true;
    }

    /// Close the assistant panel and clear its transcript. The stored
    /// conversation is kept.
    pub fn close_assistant(&mut self) {
        self.assistant_open = false;
        self.transcript.clear();
    }

    fn record(&mut self, sender: Sender, text: &str) {
        let message = AssistantMessage {
            sender,
            text: text.to_string(),
        };
        self.transcript.push(message.clone());
        self.emit(EditorEvent::AssistantMessage(message));
    }

    /// Stored conversation; unreadable entries start a fresh one
    pub fn conversation_history(&self) -> ConversationHistory {
        self.store
            .get(CONVERSATION_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(history) => Some(history),
                Err(e) => {
                    tracing::warn!("Discarding unreadable conversation history: {e}");
                    None
                }
            })
            .unwrap_or_default()
    }

    fn save_conversation_history(&mut self, history: &ConversationHistory) -> Result<()> {
        let raw = serde_json::to_string(history)?;
        self.store.set(CONVERSATION_KEY, &raw)
    }

    /// Ask the assistant. Blank questions are ignored; otherwise the reply
    /// (or a connection error notice) is returned and recorded.
    pub async fn ask_ai(&mut self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.record(Sender::User, question);
        let history = self.conversation_history();

        let reply = match self.remote.ask(question, self.mode, history).await {
            Ok(answer) => {
                if let Err(e) = self.save_conversation_history(&answer.history) {
                    tracing::warn!("Failed to store conversation history: {e:#}");
                }
                answer.response
            }
            Err(e) => {
                tracing::warn!("Assistant request failed: {e:#}");
                CONNECTION_ERROR_MESSAGE.to_string()
            }
        };

        self.record(Sender::Assistant, &reply);
        Some(reply)
    }
}

/// Local name used when the server does not suggest one, stamped in UTC
pub fn fallback_export_filename(format: ExportFormat) -> String {
    format!(
        "document_{}.{}",
        Utc::now().format("%Y-%m-%dT%H-%M-%S"),
        format.extension()
    )
}
