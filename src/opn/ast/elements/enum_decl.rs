//! Enum declarations
//!
//! A named set of symbolic constants in declaration order. Variants may
//! carry explicit value expressions (`Red = 1`); variants without one take
//! whatever meaning the downstream consumer assigns (the parser does not
//! auto-number).
//!
//! Example:
//!
//!     enum Color { Red, Green, Blue }

use crate::opn::ast::elements::attribute::Attribute;
use crate::opn::ast::elements::expr::Expr;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

/// One enum member
#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    pub value: Option<Expr>,
    pub location: Location,
}

impl EnumVariant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            location: Location::default(),
        }
    }

    pub fn with_value(mut self, value: Expr) -> Self {
        self.value = Some(value);
        self
    }

    /// Preferred builder
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

impl AstNode for EnumVariant {
    fn node_type(&self) -> &'static str {
        "EnumVariant"
    }
    fn display_label(&self) -> String {
        self.name.clone()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_variant(self);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub attributes: Vec<Attribute>,
    pub name: String,
    pub variants: Vec<EnumVariant>,
    pub location: Location,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            name: name.into(),
            variants: Vec::new(),
            location: Location::default(),
        }
    }

    pub fn with_variants(mut self, variants: Vec<EnumVariant>) -> Self {
        self.variants = variants;
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

impl AstNode for EnumDecl {
    fn node_type(&self) -> &'static str {
        "EnumDecl"
    }
    fn display_label(&self) -> String {
        self.name.clone()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_enum(self);
    }
}

impl fmt::Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Enum('{}', {} variants)", self.name, self.variants.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::ast::elements::expr::Literal;

    #[test]
    fn test_variant_order_is_declaration_order() {
        let decl = EnumDecl::new("Color").with_variants(vec![
            EnumVariant::new("Red"),
            EnumVariant::new("Green"),
            EnumVariant::new("Blue"),
        ]);
        let names: Vec<_> = decl.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Red", "Green", "Blue"]);
    }

    #[test]
    fn test_variant_with_value() {
        let variant = EnumVariant::new("Red").with_value(Expr::Literal(Literal::int(1)));
        assert!(variant.value.is_some());
    }
}
