//! Raw unit source
//!
//! The lexical pass pulls undecorated text units from a [`RawSource`] and
//! classifies them itself. [`Scanner`] is the byte-slice implementation.

mod reader;

use crate::lexical::LexerError;
use crate::utils::Position;

pub use reader::Scanner;

/// Which quote opened a string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
}

impl Quote {
    /// Quote opened by the raw unit `text`, if it is one
    pub fn from_unit(text: &str) -> Option<Quote> {
        match text {
            "\"" => Some(Quote::Double),
            "'" => Some(Quote::Single),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Quote::Double => b'"',
            Quote::Single => b'\'',
        }
    }
}

/// Remainder of a string literal after its opening quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringTail<'src> {
    /// Text read, including the closing quote when one was found
    pub text: &'src str,
    /// Whether the closing quote was found before the input ended
    pub terminated: bool,
}

/// Source of raw text units for one lexical pass
///
/// Units are one of: a line break (`\n`, `\r\n`, `\r`), a maximal run of
/// spaces, a maximal run of tabs, `//`, a single delimiter, or a word. At end
/// of input `next_unit` returns `""` and keeps doing so.
pub trait RawSource<'src> {
    /// Position of the next unread byte
    fn position(&self) -> Position;

    /// Line and column for an arbitrary byte offset already read
    fn locate(&self, offset: usize) -> Position;

    fn next_unit(&mut self) -> Result<&'src str, LexerError>;

    /// Everything up to the next line break, optionally including it
    fn rest_of_line(&mut self, include_break: bool) -> Result<&'src str, LexerError>;

    /// Everything up to and including the closing `quote`; backslash escapes
    /// the following byte
    fn rest_of_string(&mut self, quote: Quote) -> Result<StringTail<'src>, LexerError>;

    fn is_eof(&self) -> bool;
}
