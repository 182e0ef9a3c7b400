//! Content seeded into an empty document.

use crate::document::Mode;

const MARKDOWN_WELCOME: &str = r#"# Welcome to the Markdown editor!

## Start writing your document...

- Lists
- **Bold text**
- *Italic*
- [Links](https://example.com)

```python
# Python code
print("Hello World!")
```
"#;

const LATEX_WELCOME: &str = r#"\section{Welcome to the LaTeX editor!}

\subsection{Start writing your document...}

Inline formulas: $E = mc^2$, $a^2 + b^2 = c^2$

Display formula:
$$
\int_0^1 x^2 dx = \frac{1}{3}
$$

\begin{itemize}
    \item A list item
    \item Another item
\end{itemize}

\textbf{Bold text}, \textit{italic text}
"#;

pub fn initial_content(mode: Mode) -> &'static str {
    match mode {
        Mode::Markdown => MARKDOWN_WELCOME,
        Mode::Latex => LATEX_WELCOME,
    }
}
