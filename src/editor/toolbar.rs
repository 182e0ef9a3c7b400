//! # Toolbar
//!
//! Formatting snippets per mode and the rule that turns a snippet plus the
//! current selection into inserted text.

use crate::document::Mode;

/// One toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub label: &'static str,
    /// Snippet to insert. A space marks where a selection is wrapped and the
    /// two-char sequence `\n` marks a line break.
    pub snippet: &'static str,
}

const fn button(label: &'static str, snippet: &'static str) -> ToolbarButton {
    ToolbarButton { label, snippet }
}

const MARKDOWN_BUTTONS: &[ToolbarButton] = &[
    button("Heading", "# "),
    button("Bold", "** **"),
    button("Italic", "* *"),
    button("Code", "` `"),
    button("Link", "[ ](https://)"),
    button("List", "- "),
    button("Quote", "> "),
    button("Code block", "```\\n\\n```"),
    button(
        "Table",
        "| Column 1 | Column 2 |\\n|----------|----------|\\n| Cell 1 | Cell 2 |",
    ),
];

const LATEX_BUTTONS: &[ToolbarButton] = &[
    button("Section", "\\section{ }"),
    button("Subsection", "\\subsection{ }"),
    button("Bold", "\\textbf{ }"),
    button("Italic", "\\textit{ }"),
    button("Code", "\\texttt{ }"),
    button("Inline math", "$ $"),
    button("Display math", "$$\\n\\n$$"),
    button("Itemize", "\\begin{itemize}\\n\\item \\n\\end{itemize}"),
    button("Enumerate", "\\begin{enumerate}\\n\\item \\n\\end{enumerate}"),
    button("Theorem", "\\begin{theorem}\\n\\n\\end{theorem}"),
];

/// Buttons shown for `mode`
pub fn buttons(mode: Mode) -> &'static [ToolbarButton] {
    match mode {
        Mode::Markdown => MARKDOWN_BUTTONS,
        Mode::Latex => LATEX_BUTTONS,
    }
}

/// Text that replaces `selection` when `snippet` is applied
///
/// A snippet with escaped line breaks is inserted as a block and drops the
/// selection. Otherwise a selection is wrapped by the text before and after
/// the first space.
pub fn expand_snippet(snippet: &str, selection: &str) -> String {
    if snippet.contains("\\n") {
        return snippet.replace("\\n", "\n");
    }
    if selection.is_empty() {
        return snippet.to_string();
    }

    let mut parts = snippet.split(' ');
    let head = parts.next().unwrap_or_default();
    let tail = parts.next().unwrap_or_default();
    format!("{head}{selection}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_should_be_wrapped() {
        assert_eq!(expand_snippet("** **", "word"), "**word**");
        assert_eq!(expand_snippet("\\textbf{ }", "x"), "\\textbf{x}");
    }

    #[test]
    fn snippet_without_space_should_prefix_selection() {
        assert_eq!(expand_snippet("# ", "Title"), "#Title");
        assert_eq!(expand_snippet("**", "x"), "**x");
    }

    #[test]
    fn only_first_two_parts_should_be_used() {
        assert_eq!(expand_snippet("a b c", "X"), "aXb");
    }

    #[test]
    fn escaped_newlines_should_become_line_breaks() {
        assert_eq!(expand_snippet("```\\n\\n```", "ignored"), "```\n\n```");
    }

    #[test]
    fn no_selection_should_insert_snippet_as_is() {
        assert_eq!(expand_snippet("** **", ""), "** **");
    }

    #[test]
    fn each_mode_should_have_its_own_buttons() {
        assert!(buttons(Mode::Markdown).iter().any(|b| b.snippet == "** **"));
        assert!(buttons(Mode::Latex)
            .iter()
            .all(|b| b.snippet.contains('\\') || b.snippet.contains('$')));
    }
}
