//! The declaration sum type
//!
//! Everything that can appear at the top level of a compilation unit.
//! `Error` marks a region the parser gave up on during recovery; it
//! carries the region's location so consumers can report or skip it
//! without crashing.

use crate::opn::ast::elements::enum_decl::EnumDecl;
use crate::opn::ast::elements::import::ImportDecl;
use crate::opn::ast::elements::message_decl::MessageDecl;
use crate::opn::ast::elements::module::ModuleDecl;
use crate::opn::ast::elements::struct_decl::StructDecl;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

/// A top-level region that failed to parse
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDecl {
    pub location: Location,
}

impl ErrorDecl {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl AstNode for ErrorDecl {
    fn node_type(&self) -> &'static str {
        "Error"
    }
    fn display_label(&self) -> String {
        "<error>".to_string()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_error(self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Module(ModuleDecl),
    Import(ImportDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
    Message(MessageDecl),
    Error(ErrorDecl),
}

impl Declaration {
    pub fn as_struct(&self) -> Option<&StructDecl> {
        match self {
            Declaration::Struct(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDecl> {
        match self {
            Declaration::Enum(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageDecl> {
        match self {
            Declaration::Message(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Declaration::Error(_))
    }

    fn inner(&self) -> &dyn AstNode {
        match self {
            Declaration::Module(decl) => decl,
            Declaration::Import(decl) => decl,
            Declaration::Struct(decl) => decl,
            Declaration::Enum(decl) => decl,
            Declaration::Message(decl) => decl,
            Declaration::Error(decl) => decl,
        }
    }
}

impl AstNode for Declaration {
    fn node_type(&self) -> &'static str {
        self.inner().node_type()
    }
    fn display_label(&self) -> String {
        self.inner().display_label()
    }
    fn location(&self) -> Location {
        self.inner().location()
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        self.inner().accept(visitor);
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.node_type(), self.display_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let decl = Declaration::Struct(StructDecl::new("Foo"));
        assert!(decl.as_struct().is_some());
        assert!(decl.as_enum().is_none());
        assert_eq!(decl.node_type(), "StructDecl");
        assert_eq!(decl.display_label(), "Foo");
    }

    #[test]
    fn test_error_declaration() {
        let decl = Declaration::Error(ErrorDecl::new(Location::default()));
        assert!(decl.is_error());
        assert_eq!(decl.display_label(), "<error>");
    }
}
