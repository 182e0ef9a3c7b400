//! # Markdown Rendering
//!
//! CommonMark plus tables, footnotes, strikethrough and definition lists.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_DEFINITION_LIST
}

/// Render Markdown to an HTML fragment
///
/// Code blocks are wrapped in a `codehilite` container and tagged with
/// their fence language so a stylesheet or client-side highlighter can
/// pick them up.
pub fn markdown_to_html(content: &str) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    // (language, collected code) while inside a code block
    let mut code_block: Option<(Option<String>, String)> = None;

    for event in Parser::new_ext(content, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                };
                code_block = Some((language, String::new()));
            }
            Event::Text(text) if code_block.is_some() => {
                if let Some((_, code)) = code_block.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, code)) = code_block.take() {
                    let block = code_block_html(language.as_deref(), &code);
                    events.push(Event::Html(CowStr::from(block)));
                }
            }
            other => events.push(other),
        }
    }

    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, events.into_iter());
    output
}

fn code_block_html(language: Option<&str>, code: &str) -> String {
    let escaped = html_escape::encode_text(code);
    match language {
        Some(lang) => format!(
            "<div class=\"codehilite\"><pre><code class=\"language-{}\">{}</code></pre></div>\n",
            html_escape::encode_double_quoted_attribute(lang),
            escaped
        ),
        None => format!("<div class=\"codehilite\"><pre><code>{escaped}</code></pre></div>\n"),
    }
}
