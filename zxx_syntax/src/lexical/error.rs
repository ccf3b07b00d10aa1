//! Errors that abort a lexical pass
use crate::lexical::sink::SinkError;
use crate::logging::codes;
use crate::utils::Position;
use std::fmt;

/// Which way round tabs and spaces were mixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentMixture {
    /// Spaces where the document indents with tabs
    TabsThenSpaces,
    /// Tabs where the document indents with spaces
    SpacesThenTabs,
}

impl fmt::Display for IndentMixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentMixture::TabsThenSpaces => f.write_str("TABS + SPACES"),
            IndentMixture::SpacesThenTabs => f.write_str("SPACES + TABS"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("invalid UTF-8 encoding at {position}")]
    InvalidEncoding { position: Position },

    #[error("bad indentation style for {mixture} at {position}")]
    BadIndentation {
        mixture: IndentMixture,
        position: Position,
    },

    #[error("string is incomplete: missing closing quote for literal at {position}")]
    IncompleteString { position: Position },

    #[error("block comment is incomplete: missing closing --- for comment at {position}")]
    IncompleteBlockComment { position: Position },

    #[error("consumer rejected symbol at {position}: {source}")]
    Sink {
        position: Position,
        #[source]
        source: SinkError,
    },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidEncoding { .. } => codes::lexical::INVALID_ENCODING,
            LexerError::BadIndentation { .. } => codes::lexical::BAD_INDENTATION,
            LexerError::IncompleteString { .. } => codes::lexical::INCOMPLETE_STRING,
            LexerError::IncompleteBlockComment { .. } => codes::lexical::INCOMPLETE_BLOCK_COMMENT,
            LexerError::Sink { source, .. } => source.error_code(),
        }
    }

    /// Where the offending unit starts
    pub fn position(&self) -> Position {
        match self {
            LexerError::InvalidEncoding { position }
            | LexerError::BadIndentation { position, .. }
            | LexerError::IncompleteString { position }
            | LexerError::IncompleteBlockComment { position }
            | LexerError::Sink { position, .. } => *position,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
