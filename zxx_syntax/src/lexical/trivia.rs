//! Coalescing of blank lines, comments and placeholders
//!
//! Trivia is held until the next meaningful unit arrives, then released as at
//! most one `Placeholder` span followed by at most one `Indentation` span.
//! Neither span records where it began; the start is recovered from the
//! offset of the meaningful unit by subtracting the held lengths.
use crate::tokens::Kind;
use std::array;
use std::iter::Flatten;

/// A held span ready to emit: start offset, kind, text
pub type Released = (usize, Kind, String);

#[derive(Debug, Clone, Default)]
pub struct TriviaCoalescer {
    indent: String,
    buffer: String,
}

impl TriviaCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indent.is_empty() && self.buffer.is_empty()
    }

    /// Hold `text` if `kind` is trivia after `prev`. Returns `false` when the
    /// unit is meaningful and must be emitted after a [`flush`](Self::flush).
    pub fn hold(&mut self, prev: Option<Kind>, kind: Kind, text: &str) -> bool {
        match kind {
            Kind::Newline => match prev {
                Some(Kind::Newline) => {
                    self.buffer.push_str(text);
                    true
                }
                Some(Kind::Indentation) => {
                    self.demote_indent();
                    self.buffer.push_str(text);
                    true
                }
                _ => false,
            },
            Kind::Placeholder | Kind::Comment | Kind::BlockComment => {
                self.demote_indent();
                self.buffer.push_str(text);
                true
            }
            Kind::Indentation => {
                self.demote_indent();
                self.indent.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Keep a dropped separator run contiguous with held trivia. Returns
    /// whether it was kept.
    pub fn absorb_separator(&mut self, text: &str) -> bool {
        if self.buffer.is_empty() && self.indent.is_empty() {
            return false;
        }
        self.demote_indent();
        self.buffer.push_str(text);
        true
    }

    /// Release everything held before a meaningful unit starting at `offset`
    pub fn flush(&mut self, offset: usize) -> Flatten<array::IntoIter<Option<Released>, 2>> {
        let indent = std::mem::take(&mut self.indent);
        let buffer = std::mem::take(&mut self.buffer);

        let indent_start = offset.saturating_sub(indent.len());
        let buffer_start = indent_start.saturating_sub(buffer.len());

        let placeholder = (!buffer.is_empty()).then(|| (buffer_start, Kind::Placeholder, buffer));
        let indentation = (!indent.is_empty()).then(|| (indent_start, Kind::Indentation, indent));
        [placeholder, indentation].into_iter().flatten()
    }

    /// Held indentation loses its identity once more trivia follows it
    fn demote_indent(&mut self) {
        if !self.indent.is_empty() {
            let indent = std::mem::take(&mut self.indent);
            self.buffer.push_str(&indent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meaningful_units_are_not_held() {
        let mut trivia = TriviaCoalescer::new();
        assert!(!trivia.hold(Some(Kind::Ident), Kind::Newline, "\n"));
        assert!(!trivia.hold(Some(Kind::Newline), Kind::Func, "func"));
        assert!(trivia.is_empty());
    }

    #[test]
    fn test_blank_lines_and_comments_merge() {
        let mut trivia = TriviaCoalescer::new();
        // "x\n\n  // a\n// b\nfunc" after the first newline was emitted
        assert!(trivia.hold(Some(Kind::Newline), Kind::Newline, "\n"));
        assert!(trivia.hold(Some(Kind::Newline), Kind::Indentation, "  "));
        assert!(trivia.hold(Some(Kind::Indentation), Kind::Comment, "// a"));
        assert!(!trivia.hold(Some(Kind::Comment), Kind::Newline, "\n"));

        let released: Vec<_> = trivia.flush(8).collect();
        assert_eq!(released, vec![(1, Kind::Placeholder, "\n  // a".to_string())]);
        assert!(trivia.is_empty());
    }

    #[test]
    fn test_standalone_indentation_follows_placeholder() {
        let mut trivia = TriviaCoalescer::new();
        assert!(trivia.hold(Some(Kind::Newline), Kind::Newline, "\n"));
        assert!(trivia.hold(Some(Kind::Newline), Kind::Indentation, "\t"));

        let released: Vec<_> = trivia.flush(10).collect();
        assert_eq!(
            released,
            vec![
                (8, Kind::Placeholder, "\n".to_string()),
                (9, Kind::Indentation, "\t".to_string()),
            ]
        );
    }

    #[test]
    fn test_indentation_on_blank_line_joins_buffer() {
        let mut trivia = TriviaCoalescer::new();
        assert!(trivia.hold(Some(Kind::Newline), Kind::Indentation, "    "));
        assert!(trivia.hold(Some(Kind::Indentation), Kind::Newline, "\n"));

        let released: Vec<_> = trivia.flush(5).collect();
        assert_eq!(released, vec![(0, Kind::Placeholder, "    \n".to_string())]);
    }

    #[test]
    fn test_separator_kept_only_next_to_held_trivia() {
        let mut trivia = TriviaCoalescer::new();
        assert!(!trivia.absorb_separator(" "));

        assert!(trivia.hold(Some(Kind::Ident), Kind::Placeholder, "12a"));
        assert!(trivia.absorb_separator("  "));
        let released: Vec<_> = trivia.flush(7).collect();
        assert_eq!(released, vec![(2, Kind::Placeholder, "12a  ".to_string())]);
    }
}
