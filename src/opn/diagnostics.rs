//! Diagnostics for the OPN parser
//!
//! Lexing, parsing, and AST construction never abort on malformed input;
//! they record what went wrong here and keep going. Diagnostics are
//! accumulated in source order and carry both the raw byte span and the
//! 1-based line/column location used for editor and CLI reporting.
//!
//! A parse with zero error-severity diagnostics is fully valid (warnings
//! permitted). When any error diagnostic is present, callers must treat
//! the returned AST as advisory/partial, not authoritative.

use crate::opn::ast::location::Location;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// How bad a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// Which stage of the pipeline produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    /// Unrecognized character or malformed literal during tokenization
    Lexical,
    /// Unexpected token or missing expected terminal during parsing
    Syntax,
    /// Numeric overflow or malformed digits during AST construction
    Literal,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lexical => write!(f, "lexical error"),
            Category::Syntax => write!(f, "syntax error"),
            Category::Literal => write!(f, "literal error"),
        }
    }
}

/// A structured, non-fatal report of a problem at a source position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    /// Byte range in the original source
    pub span: Range<usize>,
    /// 1-based line/column range for reporting
    pub location: Location,
}

impl Diagnostic {
    pub fn error(
        category: Category,
        message: impl Into<String>,
        span: Range<usize>,
        location: Location,
    ) -> Self {
        Self {
            severity: Severity::Error,
            category,
            message: message.into(),
            span,
            location,
        }
    }

    pub fn warning(
        category: Category,
        message: impl Into<String>,
        span: Range<usize>,
        location: Location,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            message: message.into(),
            span,
            location,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.location.start, self.category, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Check whether any diagnostic in a list is error-severity
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
