//! Core tokenization for OPN source
//!
//! Drives the logos lexer over the whole buffer, pairing every token with
//! its byte range. Input logos cannot classify is never dropped silently:
//! each error span becomes one `Token::Invalid` placeholder in the stream
//! plus one lexical diagnostic, and the lexer keeps going from the next
//! character. Forward progress is guaranteed because logos always consumes
//! at least one character per error, so tokenization terminates on any
//! finite input.

use crate::opn::ast::location::SourceMap;
use crate::opn::diagnostics::{Category, Diagnostic};
use crate::opn::lexer::tokens::Token;
use logos::Logos;
use std::ops::Range;

/// Tokenize source text with byte ranges and collected diagnostics
///
/// The same source always yields the same token and diagnostic sequences;
/// no state survives between calls.
pub fn tokenize(source: &str) -> (Vec<(Token, Range<usize>)>, Vec<Diagnostic>) {
    let map = SourceMap::new(source);
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let text = lexer.slice().to_string();
                let message = if text.starts_with('"') {
                    format!("malformed string literal {}", text)
                } else {
                    format!("unrecognized character `{}`", text)
                };
                diagnostics.push(Diagnostic::error(
                    Category::Lexical,
                    message,
                    span.clone(),
                    map.location(&span),
                ));
                tokens.push((Token::Invalid(text), span));
            }
        }
    }

    (tokens, diagnostics)
}
