//! Field declarations
//!
//! One member of a struct or message body: optional attributes, a type
//! expression, a name, an optional default-value expression, and the
//! terminating semicolon in source.
//!
//! Example:
//!
//!     [Encoding("network")]
//!     uint16 checksum = 0;

use crate::opn::ast::elements::attribute::Attribute;
use crate::opn::ast::elements::expr::Expr;
use crate::opn::ast::elements::type_expr::TypeExpr;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attributes: Vec<Attribute>,
    pub ty: TypeExpr,
    pub name: String,
    pub default: Option<Expr>,
    pub location: Location,
}

impl FieldDecl {
    pub fn new(ty: TypeExpr, name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            ty,
            name: name.into(),
            default: None,
            location: Location::default(),
        }
    }

    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
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

impl AstNode for FieldDecl {
    fn node_type(&self) -> &'static str {
        "FieldDecl"
    }
    fn display_label(&self) -> String {
        self.name.clone()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_field(self);
    }
}

impl fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field('{}': {})", self.name, self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::ast::elements::expr::Literal;
    use crate::opn::lexer::Primitive;

    #[test]
    fn test_field_creation() {
        let field = FieldDecl::new(
            TypeExpr::primitive(Primitive::Int32, Location::default()),
            "count",
        );
        assert_eq!(field.display_label(), "count");
        assert!(field.default.is_none());
        assert!(field.attributes.is_empty());
    }

    #[test]
    fn test_field_with_default() {
        let field = FieldDecl::new(
            TypeExpr::primitive(Primitive::UInt16, Location::default()),
            "checksum",
        )
        .with_default(Expr::Literal(Literal::int(0)));
        assert!(field.default.is_some());
    }
}
