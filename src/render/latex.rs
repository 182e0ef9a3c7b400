//! # LaTeX Preview Converter
//!
//! A line-oriented approximation of LaTeX, good enough for a live preview:
//! sectioning commands, list/theorem/proof/verbatim environments and the
//! three basic font commands. Math is passed through untouched.

use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\(section|subsection|subsubsection)\{(.*)\}$").expect("valid heading regex")
});

/// Inline commands and the tag each becomes, applied in this order
const INLINE_COMMANDS: [(&str, &str); 3] = [
    ("\\texttt{", "code"),
    ("\\textit{", "em"),
    ("\\textbf{", "strong"),
];

/// Convert LaTeX source to an HTML fragment
pub fn latex_to_html(content: &str) -> String {
    let mut converted: Vec<String> = Vec::new();
    let mut in_verbatim = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if in_verbatim {
            if trimmed == "\\end{verbatim}" {
                in_verbatim = false;
                converted.push("</pre>".to_string());
            } else {
                converted.push(html_escape::encode_text(line).into_owned());
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        if trimmed == "\\begin{verbatim}" {
            in_verbatim = true;
            converted.push("<pre class=\"verbatim\">".to_string());
            continue;
        }

        converted.push(convert_line(line, trimmed));
    }

    // still typing inside a verbatim block
    if in_verbatim {
        converted.push("</pre>".to_string());
    }

    format!("<div class=\"latex-content\">{}</div>", converted.join("\n"))
}

fn convert_line(line: &str, trimmed: &str) -> String {
    if let Some(caps) = HEADING.captures(trimmed) {
        let level = match &caps[1] {
            "section" => 2,
            "subsection" => 3,
            _ => 4,
        };
        return format!("<h{level}>{}</h{level}>", format_inline(&caps[2]));
    }

    if let Some(tag) = environment_tag(trimmed) {
        return tag.to_string();
    }

    if let Some(item) = item_text(trimmed) {
        return format!("<li>{}</li>", format_inline(item));
    }

    format_inline(line)
}

fn environment_tag(trimmed: &str) -> Option<&'static str> {
    let tag = match trimmed {
        "\\begin{itemize}" => "<ul>",
        "\\end{itemize}" => "</ul>",
        "\\begin{enumerate}" => "<ol>",
        "\\end{enumerate}" => "</ol>",
        "\\begin{theorem}" => "<div class=\"theorem\"><strong>Theorem.</strong>",
        "\\begin{proof}" => "<div class=\"proof\"><strong>Proof.</strong>",
        "\\end{theorem}" | "\\end{proof}" => "</div>",
        _ => return None,
    };
    Some(tag)
}

/// Text of an `\item` line; `\itemsep` and friends are not items
fn item_text(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix("\\item")?;
    match rest.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => None,
        _ => Some(rest.trim()),
    }
}

/// Replace `\texttt{}`, `\textit{}` and `\textbf{}` with HTML tags
///
/// Braces are matched with nesting. A command without a closing brace is
/// left as written.
pub fn format_inline(text: &str) -> String {
    let mut formatted = text.to_string();

    for (command, tag) in INLINE_COMMANDS {
        let mut search_from = 0;
        while let Some(found) = formatted[search_from..].find(command) {
            let start = search_from + found;
            let open = start + command.len() - 1;
            match find_matching_brace(&formatted, open) {
                Some(close) => {
                    let replacement = format!("<{tag}>{}</{tag}>", &formatted[open + 1..close]);
                    formatted.replace_range(start..=close, &replacement);
                    // the argument may hold the same command again
                    search_from = start;
                }
                None => search_from = start + command.len(),
            }
        }
    }

    formatted
}

/// Byte index of the brace closing the one at `open`
pub fn find_matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    for (offset, byte) in bytes[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}
