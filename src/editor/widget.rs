//! # Editing Widget
//!
//! The controller drives its text widget through `EditorWidget`, so any
//! widget with cursor, selection and line access can be plugged in.
//! `TextBuffer` is the in-memory implementation.

use super::types::LogicalPosition;

pub trait EditorWidget: Send {
    /// Entire content
    fn value(&self) -> String;

    /// Replace the entire content, moving the cursor to the start
    fn set_value(&mut self, text: &str);

    fn line_count(&self) -> usize;

    fn cursor(&self) -> LogicalPosition;

    /// Move the cursor, clearing any selection
    fn set_cursor(&mut self, position: LogicalPosition);

    /// Select from `anchor` to `head`; the cursor ends at `head`
    fn select(&mut self, anchor: LogicalPosition, head: LogicalPosition);

    /// Currently selected text, empty without a selection
    fn selection(&self) -> String;

    /// Replace the selection (or insert at the cursor) and place the cursor
    /// after the inserted text
    fn replace_selection(&mut self, text: &str);

    /// Switch syntax highlighting
    fn set_syntax(&mut self, syntax: &str);

    fn syntax(&self) -> &str;
}

/// Byte offset of char column `column` in `line`, clamped to the line end
fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(index, _)| index)
}

/// Line-based text buffer
#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: LogicalPosition,
    anchor: Option<LogicalPosition>,
    syntax: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: LogicalPosition::zero(),
            anchor: None,
            syntax: "markdown".to_string(),
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_value(text);
        buffer
    }

    /// Line length in chars
    pub fn line_length(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |line| line.chars().count())
    }

    /// Clamp position to valid bounds
    pub fn clamp_position(&self, position: LogicalPosition) -> LogicalPosition {
        let line = position.line.min(self.lines.len().saturating_sub(1));
        let column = position.column.min(self.line_length(line));
        LogicalPosition::new(line, column)
    }

    fn ordered_selection(&self) -> Option<(LogicalPosition, LogicalPosition)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    fn text_between(&self, start: LogicalPosition, end: LogicalPosition) -> String {
        if start.line == end.line {
            let line = &self.lines[start.line];
            return line[byte_index(line, start.column)..byte_index(line, end.column)].to_string();
        }

        let first = &self.lines[start.line];
        let last = &self.lines[end.line];
        let mut parts = vec![&first[byte_index(first, start.column)..]];
        parts.extend(self.lines[start.line + 1..end.line].iter().map(String::as_str));
        parts.push(&last[..byte_index(last, end.column)]);
        parts.join("\n")
    }

    fn delete_between(&mut self, start: LogicalPosition, end: LogicalPosition) {
        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let range = byte_index(line, start.column)..byte_index(line, end.column);
            line.replace_range(range, "");
            return;
        }

        let last = &self.lines[end.line];
        let tail = last[byte_index(last, end.column)..].to_string();
        let first = &mut self.lines[start.line];
        let cut = byte_index(first, start.column);
        first.truncate(cut);
        first.push_str(&tail);
        self.lines.drain(start.line + 1..=end.line);
    }

    /// Insert text at position, returning the position after it
    fn insert_at(&mut self, position: LogicalPosition, text: &str) -> LogicalPosition {
        let line = &mut self.lines[position.line];
        let tail = line.split_off(byte_index(line, position.column));

        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or_default();
        line.push_str(first);

        let mut row = position.line;
        let mut column = position.column + first.chars().count();
        for piece in pieces {
            row += 1;
            self.lines.insert(row, piece.to_string());
            column = piece.chars().count();
        }
        self.lines[row].push_str(&tail);

        LogicalPosition::new(row, column)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorWidget for TextBuffer {
    fn value(&self) -> String {
        self.lines.join("\n")
    }

    fn set_value(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor = LogicalPosition::zero();
        self.anchor = None;
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn cursor(&self) -> LogicalPosition {
        self.cursor
    }

    fn set_cursor(&mut self, position: LogicalPosition) {
        self.cursor = self.clamp_position(position);
        self.anchor = None;
    }

    fn select(&mut self, anchor: LogicalPosition, head: LogicalPosition) {
        self.anchor = Some(self.clamp_position(anchor));
        self.cursor = self.clamp_position(head);
    }

    fn selection(&self) -> String {
        self.ordered_selection()
            .map(|(start, end)| self.text_between(start, end))
            .unwrap_or_default()
    }

    fn replace_selection(&mut self, text: &str) {
        let start = match self.ordered_selection() {
            Some((start, end)) => {
                self.delete_between(start, end);
                start
            }
            None => self.cursor,
        };
        self.anchor = None;
        self.cursor = self.insert_at(start, text);
    }

    fn set_syntax(&mut self, syntax: &str) {
        self.syntax = syntax.to_string();
    }

    fn syntax(&self) -> &str {
        &self.syntax
    }
}
