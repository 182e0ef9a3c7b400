//! # Document Store
//!
//! Server-side holder of the last saved content per mode.

use super::Mode;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Slots {
    markdown: String,
    latex: String,
    current_mode: Mode,
}

/// One content slot per mode, last write wins
#[derive(Debug, Default)]
pub struct DocumentStore {
    slots: RwLock<Slots>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot for `mode` and make it the current mode
    pub fn save(&self, content: &str, mode: Mode) {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        match mode {
            Mode::Markdown => slots.markdown = content.to_string(),
            Mode::Latex => slots.latex = content.to_string(),
        }
        slots.current_mode = mode;
        tracing::debug!("Stored {} chars of {} content", content.len(), mode);
    }

    /// Content last saved for `mode`, empty if nothing was saved
    pub fn load(&self, mode: Mode) -> String {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        match mode {
            Mode::Markdown => slots.markdown.clone(),
            Mode::Latex => slots.latex.clone(),
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.slots
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .current_mode
    }
}
