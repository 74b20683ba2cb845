//! Qualified names
//!
//! A dotted name path such as `Protocols.Tcp.Header`. Used for module and
//! import targets, named type references, and name expressions. Purely
//! textual: resolving a name to a declaration is a downstream concern.

use crate::opn::ast::location::Location;
use std::fmt;

/// A dotted identifier path with its source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub parts: Vec<String>,
    pub location: Location,
}

impl QualifiedName {
    pub fn new(parts: Vec<String>) -> Self {
        Self {
            parts,
            location: Location::default(),
        }
    }

    /// Single-segment name
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(vec![name.into()])
    }

    /// Preferred builder
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// The dotted source form
    pub fn dotted(&self) -> String {
        self.parts.join(".")
    }

    /// The final segment, which names the referenced entity
    pub fn last(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}
