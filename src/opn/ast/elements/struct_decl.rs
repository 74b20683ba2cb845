//! Struct declarations
//!
//! A struct is the basic record of the notation: a named, ordered list of
//! fields. Structs describe reusable layouts referenced from messages and
//! other structs.
//!
//! Example:
//!
//!     struct Endpoint {
//!         uint32 address;
//!         uint16 port;
//!     }

use crate::opn::ast::elements::attribute::Attribute;
use crate::opn::ast::elements::field::FieldDecl;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub attributes: Vec<Attribute>,
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub location: Location,
}

impl StructDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            name: name.into(),
            fields: Vec::new(),
            location: Location::default(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldDecl>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Preferred builder
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for StructDecl {
    fn node_type(&self) -> &'static str {
        "StructDecl"
    }
    fn display_label(&self) -> String {
        self.name.clone()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_struct(self);
    }
}

impl fmt::Display for StructDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Struct('{}', {} fields)", self.name, self.fields.len())
    }
}
