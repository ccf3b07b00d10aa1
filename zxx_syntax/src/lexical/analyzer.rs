//! Lexical analyzer with metrics and logging around the engine
use super::engine::Engine;
use super::sink::{Callback, Collector, Metered, Sink, SinkError, TreeSink};
use super::LexerError;
use crate::ast::TreeBuilder;
use crate::config::compile_time::lexical::SYMBOL_CAPACITY_DIVISOR;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::scanner::Scanner;
use crate::tokens::{Kind, Symbol, TokenClass};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use std::collections::HashMap;

/// Counts of symbols delivered during the last pass. Eof is not counted.
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_symbols: usize,
    pub trivia_symbols: usize,
    pub newline_symbols: usize,
    pub literal_symbols: usize,
    pub name_symbols: usize,
    pub declaration_symbols: usize,
    pub max_symbol_length: usize,

    // Only filled with detailed metrics enabled
    pub kind_counts: HashMap<Kind, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_symbol(&mut self, symbol: &Symbol, detailed: bool) {
        if symbol.is_eof() {
            return;
        }

        self.total_symbols += 1;
        self.max_symbol_length = self.max_symbol_length.max(symbol.source.len());

        match symbol.kind.category() {
            TokenClass::Trivia => self.trivia_symbols += 1,
            TokenClass::Literal => self.literal_symbols += 1,
            TokenClass::Name => self.name_symbols += 1,
            TokenClass::Declaration => self.declaration_symbols += 1,
            TokenClass::Special if symbol.kind == Kind::Newline => self.newline_symbols += 1,
            _ => {}
        }

        if detailed {
            *self.kind_counts.entry(symbol.kind).or_insert(0) += 1;
        }
    }

    /// Symbols that are not trivia
    pub fn meaningful_symbols(&self) -> usize {
        self.total_symbols - self.trivia_symbols
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Collect every symbol except Eof
    pub fn tokenize(&mut self, src: &[u8]) -> Result<Vec<Symbol>, LexerError> {
        let collector = Collector::with_capacity(src.len() / SYMBOL_CAPACITY_DIVISOR);
        let (collector, result) = self.run(src, collector);
        result.map(|()| collector.into_symbols())
    }

    /// Stream every symbol, Eof included, into `f`. The first error from `f`
    /// ends the pass.
    pub fn tokenize_with<F>(&mut self, src: &[u8], f: F) -> Result<(), LexerError>
    where
        F: FnMut(Position, Kind, &str) -> Result<(), SinkError>,
    {
        self.run(src, Callback::new(f)).1
    }

    /// Push every symbol into `builder`
    pub fn build_tree<B>(&mut self, src: &[u8], builder: &mut B) -> Result<(), LexerError>
    where
        B: TreeBuilder + ?Sized,
    {
        self.run(src, TreeSink::new(builder)).1
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    fn run<S: Sink>(&mut self, src: &[u8], sink: S) -> (S, Result<(), LexerError>) {
        log_debug!("Starting lexical pass",
            "bytes" => src.len(),
            "tree" => sink.at_document_root().is_some()
        );

        let mut metered = Metered::new(sink, self.preferences.collect_detailed_metrics);
        let result = Engine::new(Scanner::new(src), &mut metered).run();
        let (sink, metrics) = metered.into_parts();
        self.metrics = metrics;

        match &result {
            Ok(()) => {
                log_success!(codes::success::TOKENIZATION_COMPLETE,
                    "Lexical pass completed",
                    "symbols" => self.metrics.total_symbols,
                    "meaningful" => self.metrics.meaningful_symbols(),
                    "trivia" => self.metrics.trivia_symbols
                );
            }
            Err(error) if self.preferences.include_position_in_errors => {
                log_error!(error.error_code(), &error.to_string(),
                    span = Span::single(error.position()),
                    "symbols_before_error" => self.metrics.total_symbols
                );
            }
            Err(error) => {
                log_error!(error.error_code(), &error.to_string(),
                    "symbols_before_error" => self.metrics.total_symbols
                );
            }
        }

        if self.preferences.log_symbol_statistics {
            let mut counts: Vec<_> = self.metrics.kind_counts.iter().collect();
            counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.as_str().cmp(b.0.as_str())));
            let summary = counts
                .iter()
                .map(|(kind, count)| format!("{}={}", kind, count))
                .collect::<Vec<_>>()
                .join(",");
            log_debug!("Symbol statistics",
                "max_symbol_length" => self.metrics.max_symbol_length,
                "newlines" => self.metrics.newline_symbols,
                "kinds" => summary
            );
        }

        (sink, result)
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
