//! Symbol kinds and classified symbols
//!
//! [`Kind`] is the closed table every raw unit is looked up in; [`Symbol`] is
//! what the lexical pass hands to its consumer.

pub mod kind;
pub mod symbol;

pub use kind::{Kind, TokenClass};
pub use symbol::{reconstruct, Symbol};
