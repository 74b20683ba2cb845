//! Parser module for the OPN notation
//!
//! Contains the concrete parse tree (`cst`), the table-guided parsing
//! engine (`engine`), and the AST builder (`ast_build`). The usual entry
//! point is [`crate::opn::pipeline::parse_source`], which runs the whole
//! lexer → engine → builder chain; the pieces are public for callers
//! that want the token stream or the concrete tree.

pub mod ast_build;
pub mod cst;
pub mod engine;

pub use ast_build::build;
pub use cst::CstNode;
pub use engine::parse;
