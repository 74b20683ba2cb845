//! Type expressions
//!
//! The type position of a field: a primitive type, a (possibly generic)
//! named reference, or an array of another type with an optional size
//! expression. Named references are kept as names only; binding them to
//! declarations is a downstream symbol-resolution pass.

use crate::opn::ast::elements::expr::Expr;
use crate::opn::ast::elements::name::QualifiedName;
use crate::opn::ast::location::Location;
use crate::opn::lexer::Primitive;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Primitive {
        primitive: Primitive,
        location: Location,
    },
    /// A named reference with optional generic arguments, e.g.
    /// `Header` or `optional<Address>`
    Named {
        name: QualifiedName,
        args: Vec<TypeExpr>,
        location: Location,
    },
    /// Array of an element type; `length` is absent for unsized arrays
    Array {
        element: Box<TypeExpr>,
        length: Option<Expr>,
        location: Location,
    },
}

impl TypeExpr {
    pub fn primitive(primitive: Primitive, location: Location) -> Self {
        TypeExpr::Primitive {
            primitive,
            location,
        }
    }

    pub fn named(name: QualifiedName) -> Self {
        let location = name.location;
        TypeExpr::Named {
            name,
            args: Vec::new(),
            location,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            TypeExpr::Primitive { location, .. } => *location,
            TypeExpr::Named { location, .. } => *location,
            TypeExpr::Array { location, .. } => *location,
        }
    }

    /// Canonical source form
    pub fn to_source(&self) -> String {
        match self {
            TypeExpr::Primitive { primitive, .. } => primitive.as_str().to_string(),
            TypeExpr::Named { name, args, .. } => {
                if args.is_empty() {
                    name.dotted()
                } else {
                    let inner = args
                        .iter()
                        .map(TypeExpr::to_source)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{}<{}>", name.dotted(), inner)
                }
            }
            TypeExpr::Array {
                element, length, ..
            } => match length {
                Some(expr) => format!("{}[{}]", element.to_source(), expr.to_source()),
                None => format!("{}[]", element.to_source()),
            },
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_source() {
        let ty = TypeExpr::primitive(Primitive::Int32, Location::default());
        assert_eq!(ty.to_source(), "int32");
    }

    #[test]
    fn test_generic_source() {
        let ty = TypeExpr::Named {
            name: QualifiedName::simple("optional"),
            args: vec![TypeExpr::primitive(Primitive::UInt8, Location::default())],
            location: Location::default(),
        };
        assert_eq!(ty.to_source(), "optional<uint8>");
    }

    #[test]
    fn test_sized_array_source() {
        let ty = TypeExpr::Array {
            element: Box::new(TypeExpr::primitive(Primitive::UInt8, Location::default())),
            length: Some(Expr::Literal(
                crate::opn::ast::elements::expr::Literal::int(4),
            )),
            location: Location::default(),
        };
        assert_eq!(ty.to_source(), "uint8[4]");
    }

    #[test]
    fn test_unsized_array_source() {
        let ty = TypeExpr::Array {
            element: Box::new(TypeExpr::named(QualifiedName::simple("Header"))),
            length: None,
            location: Location::default(),
        };
        assert_eq!(ty.to_source(), "Header[]");
    }
}
