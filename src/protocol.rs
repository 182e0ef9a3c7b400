//! # Wire Protocol
//!
//! JSON bodies exchanged between the editor controller and the server.
//! Both sides use these types, so a field rename breaks the build rather
//! than the protocol.

use crate::assistant::ConversationHistory;
use crate::document::Mode;
use serde::{Deserialize, Serialize};

/// Body of `/preview`, `/save`, `/export/html` and `/export/pdf`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    pub timestamp: String,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRequest {
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
    pub content: String,
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiHelpRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub history: ConversationHistory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiHelpResponse {
    pub response: String,
    #[serde(default)]
    pub history: ConversationHistory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Export target format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Server route producing this format
    pub fn path(self) -> &'static str {
        match self {
            ExportFormat::Html => "/export/html",
            ExportFormat::Pdf => "/export/pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_request_should_default_missing_fields() {
        let request: DocumentRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.content, "");
        assert_eq!(request.mode, Mode::Markdown);
    }

    #[test]
    fn ai_help_request_should_default_history() {
        let request: AiHelpRequest =
            serde_json::from_str(r#"{"question": "lists?", "mode": "latex"}"#).unwrap();
        assert_eq!(request.mode, Mode::Latex);
        assert!(request.history.is_empty());
    }

    #[test]
    fn unknown_mode_should_be_rejected() {
        let result = serde_json::from_str::<DocumentRequest>(r#"{"mode": "rst"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn export_format_should_name_route_and_extension() {
        assert_eq!(ExportFormat::Pdf.path(), "/export/pdf");
        assert_eq!(ExportFormat::Html.extension(), "html");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }
}
