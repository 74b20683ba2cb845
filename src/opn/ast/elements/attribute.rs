//! Attributes
//!
//! Square-bracket annotations attached to declarations and fields, e.g.
//! `[Deprecated]` or `[ByteOrder(1)]`. Arguments are ordinary expressions.

use crate::opn::ast::elements::expr::Expr;
use crate::opn::ast::location::Location;
use crate::opn::ast::traits::{AstNode, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub args: Vec<Expr>,
    pub location: Location,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            location: Location::default(),
        }
    }

    pub fn with_args(mut self, args: Vec<Expr>) -> Self {
        self.args = args;
        self
    }

    /// Preferred builder
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn to_source(&self) -> String {
        if self.args.is_empty() {
            format!("[{}]", self.name)
        } else {
            let args = self
                .args
                .iter()
                .map(Expr::to_source)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{}({})]", self.name, args)
        }
    }
}

impl AstNode for Attribute {
    fn node_type(&self) -> &'static str {
        "Attribute"
    }
    fn display_label(&self) -> String {
        self.name.clone()
    }
    fn location(&self) -> Location {
        self.location
    }
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_attribute(self);
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::ast::elements::expr::Literal;

    #[test]
    fn test_bare_attribute() {
        assert_eq!(Attribute::new("Deprecated").to_source(), "[Deprecated]");
    }

    #[test]
    fn test_attribute_with_args() {
        let attr =
            Attribute::new("ByteOrder").with_args(vec![Expr::Literal(Literal::int(1))]);
        assert_eq!(attr.to_source(), "[ByteOrder(1)]");
    }
}
