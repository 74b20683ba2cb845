//! Module declarations
//!
//! The optional `module Some.Namespace;` header naming the compilation
//! unit's namespace.

use crate::opn::ast::elements::name::QualifiedName;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub name: QualifiedName,
    pub location: Location,
}

impl ModuleDecl {
    pub fn new(name: QualifiedName) -> Self {
        Self {
            name,
            location: Location::default(),
        }
    }

    /// Preferred builder
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for ModuleDecl {
    fn node_type(&self) -> &'static str {
        "ModuleDecl"
    }
    fn display_label(&self) -> String {
        self.name.dotted()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_module(self);
    }
}

impl fmt::Display for ModuleDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Module('{}')", self.name)
    }
}
