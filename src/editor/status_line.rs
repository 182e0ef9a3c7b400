//! # Status Line Model
//!
//! Save status plus document statistics shown under the editor.

use crate::config::STATUS_REVERT_DELAY;
use crate::document::Mode;
use tokio::time::{Duration, Instant};

/// Status shown when no transient message is active
pub const SAVED: &str = "Saved";

/// Character count, line count and mode label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub chars: usize,
    pub lines: usize,
    pub mode: Mode,
}

impl DocumentStats {
    pub fn of(content: &str, lines: usize, mode: Mode) -> Self {
        Self {
            chars: content.chars().count(),
            lines,
            mode,
        }
    }

    /// Stats line as shown in the footer
    pub fn summary(&self) -> String {
        format!(
            "Chars: {} | Lines: {} | Mode: {}",
            self.chars,
            self.lines,
            self.mode.label()
        )
    }
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Transient message and when it was set
    status_message: Option<(String, Instant)>,
    revert_after: Duration,
    stats: DocumentStats,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::with_revert_delay(STATUS_REVERT_DELAY)
    }

    pub fn with_revert_delay(revert_after: Duration) -> Self {
        Self {
            status_message: None,
            revert_after,
            stats: DocumentStats::of("", 1, Mode::default()),
        }
    }

    // === Status Message Methods ===

    /// Show a message until the revert delay elapses
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Message currently shown; falls back to `Saved`
    pub fn status_message(&self) -> &str {
        match &self.status_message {
            Some((message, since)) if since.elapsed() < self.revert_after => message,
            _ => SAVED,
        }
    }

    // === Stats Methods ===

    pub fn update_stats(&mut self, stats: DocumentStats) {
        self.stats = stats;
    }

    pub fn stats(&self) -> DocumentStats {
        self.stats
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
