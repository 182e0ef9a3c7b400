//! # Editing Mode
//!
//! A document is either Markdown or LaTeX. The mode selects the widget's
//! syntax highlighting, the local storage slot and the server-side renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Markdown,
    Latex,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}', expected 'markdown' or 'latex'")]
pub struct ModeParseError(pub String);

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Markdown => "markdown",
            Mode::Latex => "latex",
        }
    }

    /// Human-readable name shown in the status bar
    pub fn label(self) -> &'static str {
        match self {
            Mode::Markdown => "Markdown",
            Mode::Latex => "LaTeX",
        }
    }

    /// Syntax highlighting mode name for the editing widget
    pub fn syntax(self) -> &'static str {
        match self {
            Mode::Markdown => "markdown",
            Mode::Latex => "stex",
        }
    }

    /// Local storage key holding this mode's content
    pub fn storage_key(self) -> String {
        format!("editor-content-{}", self.as_str())
    }

    /// Guess the mode from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("tex") | Some("latex") => Mode::Latex,
            _ => Mode::Markdown,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" => Ok(Mode::Markdown),
            "latex" => Ok(Mode::Latex),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}
