//! Lexer module for the OPN notation
//!
//! Converts raw source text into a finite sequence of classified tokens
//! paired with byte ranges, plus any lexical diagnostics. The pipeline is
//! deliberately small:
//!
//! 1. Raw tokenization using the logos lexer (`tokens.rs`)
//! 2. Error-span handling: unclassifiable input becomes `Invalid`
//!    placeholder tokens with diagnostics (`lexer_impl.rs`)
//!
//! Comments and whitespace are skipped by logos itself, so they never
//! appear in the stream but leave adjacent token positions untouched.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::tokenize;
pub use tokens::{Primitive, Token, TokenKind};
