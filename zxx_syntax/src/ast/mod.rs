//! Declaration tree built from the classified symbol stream
//!
//! The lexical pass only talks to a [`TreeBuilder`]: it asks whether focus is
//! at the document root, what was pushed last, and pushes symbols. [`File`]
//! is the builder shipped with the crate.

pub mod file;

use crate::logging::codes;
use crate::tokens::Kind;
use crate::utils::Position;

pub use file::{File, Node, NodeId, NodeKind};

/// Push contract consumed by the tree-building driver
pub trait TreeBuilder {
    /// Whether the active node is the document itself
    fn is_root(&self) -> bool;

    fn last_kind(&self) -> Option<Kind>;

    fn push(&mut self, position: Position, kind: Kind, text: &str) -> Result<(), BuildError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("{kind} cannot appear at document root ({position})")]
    UnexpectedAtRoot { kind: Kind, position: Position },

    #[error("unbalanced {kind} at {position}")]
    UnbalancedDelimiter { kind: Kind, position: Position },

    #[error("{open} delimiter(s) still open at end of input ({position})")]
    UnclosedDelimiter { open: usize, position: Position },

    #[error("delimiters nested deeper than {limit} at {position}")]
    NestingTooDeep { limit: usize, position: Position },
}

impl BuildError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BuildError::UnexpectedAtRoot { .. } => codes::tree::UNEXPECTED_AT_ROOT,
            BuildError::UnbalancedDelimiter { .. } => codes::tree::UNBALANCED_DELIMITER,
            BuildError::UnclosedDelimiter { .. } => codes::tree::UNCLOSED_DELIMITER,
            BuildError::NestingTooDeep { .. } => codes::tree::NESTING_TOO_DEEP,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            BuildError::UnexpectedAtRoot { position, .. }
            | BuildError::UnbalancedDelimiter { position, .. }
            | BuildError::UnclosedDelimiter { position, .. }
            | BuildError::NestingTooDeep { position, .. } => *position,
        }
    }
}
