//! Lexical pass: classification, indentation checks and trivia coalescing
//!
//! One engine serves every driver. [`fast`] collects symbols, [`fast_with`]
//! streams them to a callback, and [`parse`] feeds a tree builder.

pub mod analyzer;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod indentation;
pub mod sink;
pub mod trivia;

use crate::ast::TreeBuilder;
use crate::tokens::{Kind, Symbol};
use crate::utils::Position;

pub use analyzer::{LexicalAnalyzer, LexicalMetrics};
pub use engine::{Engine, PassState};
pub use error::{IndentMixture, LexerError};
pub use sink::{Callback, Collector, Metered, Sink, SinkError, TreeSink};

/// Per-symbol callback accepted by [`tokenize`]
pub type SymbolCallback<'a> = &'a mut dyn FnMut(Position, Kind, &str) -> Result<(), SinkError>;

// ============================================================================
// DRIVERS
// ============================================================================

/// Classify `src` and collect every symbol except Eof
pub fn fast(src: &[u8]) -> Result<Vec<Symbol>, LexerError> {
    LexicalAnalyzer::new().tokenize(src)
}

/// Classify `src`, handing each symbol (Eof included) to `f`
pub fn fast_with<F>(src: &[u8], f: F) -> Result<(), LexerError>
where
    F: FnMut(Position, Kind, &str) -> Result<(), SinkError>,
{
    LexicalAnalyzer::new().tokenize_with(src, f)
}

/// Collecting form with an optional callback: without one the symbols are
/// returned, with one they are streamed and `None` is returned
pub fn tokenize(
    src: &[u8],
    callback: Option<SymbolCallback<'_>>,
) -> Result<Option<Vec<Symbol>>, LexerError> {
    match callback {
        Some(f) => fast_with(src, f).map(|()| None),
        None => fast(src).map(Some),
    }
}

/// Classify `src` into `builder`
pub fn parse<B>(src: &[u8], builder: &mut B) -> Result<(), LexerError>
where
    B: TreeBuilder + ?Sized,
{
    LexicalAnalyzer::new().build_tree(src, builder)
}

// ============================================================================
// MODULE INITIALIZATION
// ============================================================================

/// Check that every lexical code is registered (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    use crate::logging::codes;

    codes::validate_codes(&[
        codes::lexical::INVALID_ENCODING,
        codes::lexical::BAD_INDENTATION,
        codes::lexical::INCOMPLETE_STRING,
        codes::lexical::INCOMPLETE_BLOCK_COMMENT,
        codes::lexical::SINK_REJECTED,
        codes::tree::UNEXPECTED_AT_ROOT,
        codes::tree::UNBALANCED_DELIMITER,
        codes::tree::UNCLOSED_DELIMITER,
        codes::tree::NESTING_TOO_DEEP,
        codes::success::TOKENIZATION_COMPLETE,
    ])?;

    crate::log_debug!("Lexical analysis initialized",
        "symbol_capacity_divisor" => crate::config::compile_time::lexical::SYMBOL_CAPACITY_DIVISOR,
        "max_nesting_depth" => crate::config::compile_time::tree::MAX_NESTING_DEPTH
    );

    Ok(())
}
