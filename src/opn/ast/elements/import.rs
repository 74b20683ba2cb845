//! Import declarations
//!
//! `import Other.Module;` — brings another module's declarations into
//! scope by name. The reference stays textual; linking across files is a
//! downstream concern.

use crate::opn::ast::elements::name::QualifiedName;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub name: QualifiedName,
    pub location: Location,
}

impl ImportDecl {
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

impl AstNode for ImportDecl {
    fn node_type(&self) -> &'static str {
        "ImportDecl"
    }
    fn display_label(&self) -> String {
        self.name.dotted()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_import(self);
    }
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Import('{}')", self.name)
    }
}
