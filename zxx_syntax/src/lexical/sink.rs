//! Destinations for classified symbols
//!
//! The engine never knows whether it is filling a list, calling back into
//! user code, or feeding a tree. It only needs [`Sink`].
use crate::ast::{BuildError, TreeBuilder};
use crate::lexical::analyzer::LexicalMetrics;
use crate::logging::codes;
use crate::tokens::{Kind, Symbol};
use crate::utils::Position;

/// Why a sink refused a symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Tree(#[from] BuildError),
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        SinkError::Rejected(message.into())
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SinkError::Rejected(_) => codes::lexical::SINK_REJECTED,
            SinkError::Tree(error) => error.error_code(),
        }
    }
}

pub trait Sink {
    fn accept(&mut self, symbol: Symbol) -> Result<(), SinkError>;

    /// `Some` when the sink tracks document focus itself
    fn at_document_root(&self) -> Option<bool> {
        None
    }

    /// Kind the sink saw last before this pass, if it remembers one
    fn last_kind(&self) -> Option<Kind> {
        None
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn accept(&mut self, symbol: Symbol) -> Result<(), SinkError> {
        (**self).accept(symbol)
    }

    fn at_document_root(&self) -> Option<bool> {
        (**self).at_document_root()
    }

    fn last_kind(&self) -> Option<Kind> {
        (**self).last_kind()
    }
}

/// Ordered in-memory collection. Eof is not kept.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    symbols: Vec<Symbol>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

impl Sink for Collector {
    fn accept(&mut self, symbol: Symbol) -> Result<(), SinkError> {
        if !symbol.is_eof() {
            self.symbols.push(symbol);
        }
        Ok(())
    }
}

/// Per-symbol callback, Eof included
pub struct Callback<F> {
    f: F,
}

impl<F> Callback<F>
where
    F: FnMut(Position, Kind, &str) -> Result<(), SinkError>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Sink for Callback<F>
where
    F: FnMut(Position, Kind, &str) -> Result<(), SinkError>,
{
    fn accept(&mut self, symbol: Symbol) -> Result<(), SinkError> {
        (self.f)(symbol.position, symbol.kind, &symbol.source)
    }
}

/// Pushes every symbol into a tree builder
pub struct TreeSink<'b, B: TreeBuilder + ?Sized> {
    builder: &'b mut B,
}

impl<'b, B: TreeBuilder + ?Sized> TreeSink<'b, B> {
    pub fn new(builder: &'b mut B) -> Self {
        Self { builder }
    }
}

impl<B: TreeBuilder + ?Sized> Sink for TreeSink<'_, B> {
    fn accept(&mut self, symbol: Symbol) -> Result<(), SinkError> {
        self.builder
            .push(symbol.position, symbol.kind, &symbol.source)
            .map_err(SinkError::from)
    }

    fn at_document_root(&self) -> Option<bool> {
        Some(self.builder.is_root())
    }

    fn last_kind(&self) -> Option<Kind> {
        self.builder.last_kind()
    }
}

/// Counts what passes through to the wrapped sink
pub struct Metered<S> {
    inner: S,
    metrics: LexicalMetrics,
    detailed: bool,
}

impl<S: Sink> Metered<S> {
    pub fn new(inner: S, detailed: bool) -> Self {
        Self {
            inner,
            metrics: LexicalMetrics::default(),
            detailed,
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn into_parts(self) -> (S, LexicalMetrics) {
        (self.inner, self.metrics)
    }
}

impl<S: Sink> Sink for Metered<S> {
    fn accept(&mut self, symbol: Symbol) -> Result<(), SinkError> {
        self.metrics.record_symbol(&symbol, self.detailed);
        self.inner.accept(symbol)
    }

    fn at_document_root(&self) -> Option<bool> {
        self.inner.at_document_root()
    }

    fn last_kind(&self) -> Option<Kind> {
        self.inner.last_kind()
    }
}
