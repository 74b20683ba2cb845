//! Grammar definition for the OPN notation
//!
//! The language surface lives here as data: an explicit table of
//! production rules (`rules.rs`) and an operator precedence table
//! (`precedence.rs`). Both are constructed once at first use and shared
//! read-only by every parse; thread safety follows from never mutating
//! them after construction.
//!
//! The parser engine consults this module for production dispatch,
//! resynchronization tokens, and (via the AST builder) operator binding.

pub mod precedence;
pub mod rules;

pub use precedence::{binary_op, unary_op, Assoc, BinaryOp, UnaryOp};
pub use rules::{grammar, Grammar, NonTerminal, Production, Symbol, TerminalClass};
