//! # opn
//!
//! A parser for the OPN protocol definition notation.
//!
//! OPN source text describes network message formats: modules, imports,
//! structs, enums, messages, fields, type expressions, and attributes.
//! This crate turns such text into a typed AST plus an ordered list of
//! diagnostics; it performs no symbol resolution or code generation.
//!
//! The primary entry point is [`opn::pipeline::parse_source`].

pub mod opn;
