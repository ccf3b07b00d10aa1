//! Shared location types used by the scanner, the lexical pass and error reporting

pub mod span;

pub use span::{LineIndex, Position, SourceMap, Span};
