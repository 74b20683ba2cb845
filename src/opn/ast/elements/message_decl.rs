//! Message declarations
//!
//! A message is the wire-level unit of a protocol: structurally a field
//! list like a struct, but kept as its own node type because downstream
//! consumers treat messages as protocol entry points rather than plain
//! layouts.

use crate::opn::ast::elements::attribute::Attribute;
use crate::opn::ast::elements::field::FieldDecl;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct MessageDecl {
    pub attributes: Vec<Attribute>,
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub location: Location,
}

impl MessageDecl {
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

impl AstNode for MessageDecl {
    fn node_type(&self) -> &'static str {
        "MessageDecl"
    }
    fn display_label(&self) -> String {
        self.name.clone()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_message(self);
    }
}

impl fmt::Display for MessageDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message('{}', {} fields)", self.name, self.fields.len())
    }
}
