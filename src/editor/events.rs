//! # Editor Events
//!
//! Events the controller emits for its host. The host drains them with
//! `EditorController::collect_pending_events` and redraws what changed.

use super::types::ViewMode;
use crate::document::Mode;
use std::path::PathBuf;

/// Side of an assistant conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One line of the assistant panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Preview panel has new HTML
    PreviewUpdated { html: String },

    /// Preview request failed; the panel shows an error paragraph
    PreviewFailed { message: String },

    /// Save status text changed
    StatusChanged { message: String },

    /// Content or mode changed the document statistics
    StatsChanged { chars: usize, lines: usize },

    ModeSwitched { old_mode: Mode, new_mode: Mode },

    ViewModeChanged { view_mode: ViewMode },

    /// An export was written to disk
    Exported { path: PathBuf },

    AssistantMessage(AssistantMessage),
}
