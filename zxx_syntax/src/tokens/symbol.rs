//! Classified symbols produced by the lexical pass
use super::kind::Kind;
use crate::utils::Position;
use serde::Serialize;
use std::fmt;

/// A classified symbol: where it starts, what it is, and its exact source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub position: Position,
    pub kind: Kind,
    pub source: String,
}

impl Symbol {
    pub fn new(position: Position, kind: Kind, source: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            source: source.into(),
        }
    }

    /// Byte offset one past the symbol's last byte
    pub fn end_offset(&self) -> usize {
        self.position.offset + self.source.len()
    }

    pub fn is_eof(&self) -> bool {
        self.kind == Kind::Eof
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.position, self.kind, self.source)
    }
}

/// Rebuild source text from symbols in emission order.
///
/// The lexical pass drops separator spaces between symbols, so any gap
/// between one symbol's end and the next one's start is refilled with spaces.
pub fn reconstruct(symbols: &[Symbol]) -> String {
    let mut text = String::new();
    let mut cursor = symbols.first().map_or(0, |s| s.position.offset);
    for symbol in symbols {
        let gap = symbol.position.offset.saturating_sub(cursor);
        text.extend(std::iter::repeat(' ').take(gap));
        text.push_str(&symbol.source);
        cursor = symbol.end_offset();
    }
    text
}
