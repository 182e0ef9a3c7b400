//! # Rendering
//!
//! Turns editor content into HTML for the preview pane and for exports.
//! Markdown goes through pulldown-cmark; LaTeX goes through a small
//! line-oriented converter that leaves math for client-side typesetting.

pub mod latex;
pub mod markdown;
pub mod page;
pub mod pdf;

pub use latex::latex_to_html;
pub use markdown::markdown_to_html;
pub use page::{export_document, print_document};
pub use pdf::{PdfError, PdfRenderer};

use crate::document::Mode;

/// Render a fragment of HTML for `content` in the given mode
pub fn render(content: &str, mode: Mode) -> String {
    match mode {
        Mode::Markdown => markdown_to_html(content),
        Mode::Latex => latex_to_html(content),
    }
}
