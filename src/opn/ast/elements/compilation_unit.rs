//! The compilation unit
//!
//! Root of the AST: one parsed source buffer. Holds the ordered top-level
//! declarations and a location covering the entire input. All child
//! locations are contained within it.

use crate::opn::ast::elements::declaration::Declaration;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub declarations: Vec<Declaration>,
    pub location: Location,
}

impl CompilationUnit {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations,
            location: Location::default(),
        }
    }

    /// Preferred builder
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Declarations that parsed cleanly (no `Error` placeholders)
    pub fn valid_declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter(|d| !d.is_error())
    }
}

impl AstNode for CompilationUnit {
    fn node_type(&self) -> &'static str {
        "CompilationUnit"
    }
    fn display_label(&self) -> String {
        format!("{} declarations", self.declarations.len())
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_unit(self);
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompilationUnit({} declarations)",
            self.declarations.len()
        )
    }
}
