//! # Core Editor Types
//!
//! Positions in the text and the panel layout of the editor window.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical position in text content (line and column, both in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LogicalPosition {
    pub line: usize,
    pub column: usize,
}

impl LogicalPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Which panels the editor window shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Split,
    Editor,
    Preview,
}

/// Visibility of the two panels for a view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub editor: bool,
    pub preview: bool,
}

impl ViewMode {
    pub fn panels(self) -> PanelVisibility {
        PanelVisibility {
            editor: matches!(self, ViewMode::Split | ViewMode::Editor),
            preview: matches!(self, ViewMode::Split | ViewMode::Preview),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Split => "split",
            ViewMode::Editor => "editor",
            ViewMode::Preview => "preview",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(ViewMode::Split),
            "editor" => Ok(ViewMode::Editor),
            "preview" => Ok(ViewMode::Preview),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}
