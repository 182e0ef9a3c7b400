//! Offline answers used when no upstream model is reachable.

use crate::document::Mode;
use rand::seq::SliceRandom;

const GREETINGS: &[&str] = &["hi", "hello", "hey", "greetings", "howdy"];
const THANKS: &[&str] = &["thank", "thx", "cheers"];

/// Keywords that select a syntax snippet
struct Topic {
    keywords: &'static [&'static str],
    snippet: &'static str,
}

const MARKDOWN_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["heading", "header", "title"],
        snippet: "```markdown\n# H1\n## H2\n### H3\n#### H4\n```",
    },
    Topic {
        keywords: &["bold", "strong"],
        snippet: "**bold text** or __bold text__",
    },
    Topic {
        keywords: &["italic", "emphasis"],
        snippet: "*italic* or _italic_",
    },
    Topic {
        keywords: &["list", "bullet"],
        snippet: "Bulleted:\n- item 1\n- item 2\n\nNumbered:\n1. first\n2. second",
    },
    Topic {
        keywords: &["link", "url"],
        snippet: "[text](https://example.com)",
    },
    Topic {
        keywords: &["code"],
        snippet: "Inline: `code`\nBlock:\n```python\nprint(\"hello\")\n```",
    },
    Topic {
        keywords: &["table"],
        snippet: "| Column 1 | Column 2 |\n|----------|----------|\n| data     | data     |",
    },
    Topic {
        keywords: &["formula", "math", "equation"],
        snippet: "Formulas via MathJax:\nInline: $E=mc^2$\nDisplay: $$\n\\sum_{i=1}^n i\n$$",
    },
    Topic {
        keywords: &["image", "picture"],
        snippet: "![Alt text](image.jpg \"tooltip\")",
    },
];

const LATEX_TOPICS: &[Topic] = &[
    Topic {
        keywords: &["heading", "header", "title", "section"],
        snippet: "\\section{Section}\n\\subsection{Subsection}\n\\subsubsection{Subsubsection}",
    },
    Topic {
        keywords: &["bold", "strong"],
        snippet: "\\textbf{bold text}",
    },
    Topic {
        keywords: &["italic", "emphasis"],
        snippet: "\\textit{italic text}",
    },
    Topic {
        keywords: &["list", "bullet"],
        snippet: "\\begin{itemize}\n\\item point\n\\end{itemize}\n\\begin{enumerate}\n\\item first\n\\end{enumerate}",
    },
    Topic {
        keywords: &["link", "url"],
        snippet: "\\href{https://example.com}{link text}",
    },
    Topic {
        keywords: &["code"],
        snippet: "\\begin{verbatim}\ncode\n\\end{verbatim}",
    },
    Topic {
        keywords: &["table"],
        snippet: "\\begin{tabular}{|c|c|}\n\\hline\ncell & cell \\\\\n\\hline\n\\end{tabular}",
    },
    Topic {
        keywords: &["formula", "math", "equation"],
        snippet: "Inline: $E=mc^2$\nDisplay: \\[\n\\int_a^b f(x)dx\n\\]",
    },
    Topic {
        keywords: &["image", "picture", "figure"],
        snippet: "\\includegraphics[width=0.5\\textwidth]{image.png}",
    },
];

fn topics(mode: Mode) -> &'static [Topic] {
    match mode {
        Mode::Markdown => MARKDOWN_TOPICS,
        Mode::Latex => LATEX_TOPICS,
    }
}

fn faq_response(lowered: &str, mode: Mode) -> Option<String> {
    let label = mode.label();
    let response = if lowered.contains("difference") {
        format!("{label} has its own syntax. What exactly are you comparing?")
    } else if lowered.contains("best way") {
        "It depends on the context. Describe your task in more detail.".to_string()
    } else if lowered.contains("not working") || lowered.contains("doesn't work") {
        "Let's sort it out together. Show me your code.".to_string()
    } else if lowered.contains("error") {
        "Show me your code and I'll help you find the error.".to_string()
    } else if lowered.contains("start") {
        format!("Great start! I recommend beginning with the basics of {label}.")
    } else if lowered.contains("basics") {
        format!("{label} basics: headings, text, lists, links. What interests you?")
    } else {
        return None;
    };
    Some(response)
}

fn pick(options: &[String]) -> String {
    options
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default()
}

/// Answer a question without any network access
pub fn fallback_response(question: &str, mode: Mode) -> String {
    let lowered = question.to_lowercase();
    let label = mode.label();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    if words.iter().any(|w| GREETINGS.contains(w)) {
        return pick(&[
            format!("Hi! I'm your {label} assistant. How can I help?"),
            format!("Hello! Ready to help with {label} markup."),
            format!("Welcome! Ask me anything about {label}."),
        ]);
    }

    if THANKS.iter().any(|t| lowered.contains(t)) {
        return "You're welcome! Ask again any time.".to_string();
    }

    for topic in topics(mode) {
        if topic.keywords.iter().any(|k| lowered.contains(k)) {
            return format!("In {label}:\n{}", topic.snippet);
        }
    }

    if let Some(response) = faq_response(&lowered, mode) {
        return response;
    }

    pick(&[
        format!("In {label} I can help with syntax, code examples and good practices."),
        format!("Tell me what you want to create in {label} and I'll show you how."),
        format!("Ask a specific {label} question, for example about headings, lists or formulas."),
        format!("How can I help with {label}? I can show examples and explain the syntax."),
    ])
}
