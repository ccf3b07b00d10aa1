//! Source location tracking
//!
//! Positions carry a byte offset plus a 1-based line and column. Columns count
//! characters, not bytes. Line breaks are `\n`, `\r\n` and a lone `\r`.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a single-character span
    pub fn single(pos: Position) -> Self {
        let end = Position {
            offset: pos.offset + 1,
            line: pos.line,
            column: pos.column + 1,
        };
        Self { start: pos, end }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };

        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    /// Byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.offset >= self.start.offset && pos.offset < self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line start table over raw bytes
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(src: &[u8]) -> Self {
        let mut line_starts = vec![0];
        let mut index = 0;
        while index < src.len() {
            match src[index] {
                b'\n' => line_starts.push(index + 1),
                b'\r' if src.get(index + 1) != Some(&b'\n') => line_starts.push(index + 1),
                _ => {}
            }
            index += 1;
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the 1-based `line` begins
    pub fn line_start(&self, line: u32) -> Option<usize> {
        let index = (line as usize).checked_sub(1)?;
        self.line_starts.get(index).copied()
    }

    /// Recover line and column for `offset`. Offsets past the end clamp to it.
    pub fn position_at(&self, src: &[u8], offset: usize) -> Position {
        let offset = offset.min(src.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };

        let line_start = self.line_starts[line];
        // Count characters by skipping UTF-8 continuation bytes
        let column = src[line_start..offset]
            .iter()
            .filter(|byte| (**byte & 0xC0) != 0x80)
            .count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }
}

/// Source text plus its line index, for rendering error excerpts
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Lossy UTF-8 rendering of the original bytes
    pub source: String,
    lines: LineIndex,
}

impl SourceMap {
    pub fn new(source: &[u8]) -> Self {
        Self {
            source: String::from_utf8_lossy(source).into_owned(),
            lines: LineIndex::new(source),
        }
    }

    pub fn position_at(&self, offset: usize) -> Position {
        self.lines.position_at(self.source.as_bytes(), offset)
    }

    /// Text of a 1-based line without its line break
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let start = self.lines.line_start(line_num)?;
        let end = self
            .lines
            .line_start(line_num + 1)
            .unwrap_or(self.source.len());
        self.source
            .get(start..end)
            .map(|line| line.trim_end_matches(['\n', '\r']))
    }

    /// Format an error message with source context
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!(
            "  --> {}:{}\n",
            span.start.line, span.start.column
        ));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = format!("{}", span.start.line);
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!(" {} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));

            let mut underline = String::new();
            underline.push_str(&format!(" {} | ", padding));
            for _ in 1..span.start.column {
                underline.push(' ');
            }

            let line_chars = line.chars().count();
            let span_len = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column) as usize
            } else {
                line_chars.saturating_sub((span.start.column - 1) as usize)
            };

            for _ in 0..span_len.max(1) {
                underline.push('^');
            }

            result.push_str(&underline);
            result.push('\n');
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index_handles_all_breaks() {
        let src = b"a\nb\r\nc\rd";
        let index = LineIndex::new(src);
        assert_eq!(index.line_count(), 4);

        assert_eq!(index.position_at(src, 0), Position::new(0, 1, 1));
        assert_eq!(index.position_at(src, 2), Position::new(2, 2, 1));
        // The \n of \r\n still belongs to line 2
        assert_eq!(index.position_at(src, 4), Position::new(4, 2, 3));
        assert_eq!(index.position_at(src, 5), Position::new(5, 3, 1));
        assert_eq!(index.position_at(src, 7), Position::new(7, 4, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        let src = "αβ x".as_bytes();
        let index = LineIndex::new(src);
        // "αβ " is 5 bytes but 3 characters
        assert_eq!(index.position_at(src, 5), Position::new(5, 1, 4));
    }

    #[test]
    fn test_span_merge_and_contains() {
        let a = Span::new(Position::new(2, 1, 3), Position::new(4, 1, 5));
        let b = Span::new(Position::new(6, 1, 7), Position::new(9, 1, 10));
        let merged = a.merge(b);

        assert_eq!(merged.len(), 7);
        assert!(merged.contains(Position::new(5, 1, 6)));
        assert!(!merged.contains(Position::new(9, 1, 10)));
        assert_eq!(merged.to_string(), "1:3-10");
    }

    #[test]
    fn test_format_error_points_at_column() {
        let map = SourceMap::new(b"use fmt\n\tvar x\n");
        let start = map.position_at(9);
        let span = Span::new(start, map.position_at(12));
        let rendered = map.format_error(&span, "unexpected");

        assert!(rendered.starts_with("error: unexpected\n  --> 2:2\n"));
        assert!(rendered.contains("2 | \tvar x\n"));
        assert!(rendered.ends_with("|  ^^^\n"));
    }
}
