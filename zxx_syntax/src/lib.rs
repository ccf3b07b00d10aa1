// Internal modules
pub mod ast;
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod scanner;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use ast::{File, TreeBuilder};
pub use lexical::{fast, fast_with, parse, tokenize, LexerError, SinkError};
pub use pipeline::{PipelineError, PipelineResult};
pub use tokens::{Kind, Symbol};
pub use utils::Position;
