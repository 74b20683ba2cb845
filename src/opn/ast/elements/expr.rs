//! Expressions and literals
//!
//! Expressions appear in field default values, enum variant values,
//! attribute arguments, and array-size positions. By the time they reach
//! the AST, parenthesized groupings have been collapsed and operator
//! precedence has been resolved into the tree shape, so consumers never
//! re-derive binding.
//!
//! A literal carries its normalized value: integer text (decimal or hex)
//! has already been converted to `i64`, strings unescaped. A sub-tree the
//! parser could not salvage is represented by `Expr::Error` carrying the
//! original span's location.

use crate::opn::ast::elements::name::QualifiedName;
use crate::opn::ast::location::Location;
use crate::opn::grammar::{BinaryOp, UnaryOp};
use std::fmt;

/// A normalized literal value
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Int(value) => write!(f, "{}", value),
            LiteralValue::Str(content) => write!(f, "{:?}", content),
            LiteralValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

/// A literal with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub location: Location,
}

impl Literal {
    pub fn new(value: LiteralValue) -> Self {
        Self {
            value,
            location: Location::default(),
        }
    }

    pub fn int(value: i64) -> Self {
        Self::new(LiteralValue::Int(value))
    }

    pub fn string(content: impl Into<String>) -> Self {
        Self::new(LiteralValue::Str(content.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::new(LiteralValue::Bool(value))
    }

    /// Preferred builder
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// An expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// A name reference, resolved downstream
    Name(QualifiedName),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        location: Location,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        location: Location,
    },
    /// A malformed sub-tree inherited from parser error recovery
    Error(Location),
}

impl Expr {
    pub fn location(&self) -> Location {
        match self {
            Expr::Literal(literal) => literal.location,
            Expr::Name(name) => name.location,
            Expr::Unary { location, .. } => *location,
            Expr::Binary { location, .. } => *location,
            Expr::Error(location) => *location,
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        let location = operand.location();
        Expr::Unary {
            op,
            operand: Box::new(operand),
            location,
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        let location = lhs.location().merge(rhs.location());
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            location,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expr::Error(_))
    }

    /// Canonical source form of this expression, fully parenthesized for
    /// nested operators so the reading is unambiguous
    pub fn to_source(&self) -> String {
        match self {
            Expr::Literal(literal) => literal.value.to_string(),
            Expr::Name(name) => name.dotted(),
            Expr::Unary { op, operand, .. } => match operand.as_ref() {
                Expr::Binary { .. } => format!("{}({})", op, operand.to_source()),
                _ => format!("{}{}", op, operand.to_source()),
            },
            Expr::Binary { op, lhs, rhs, .. } => {
                let left = match lhs.as_ref() {
                    Expr::Binary { .. } => format!("({})", lhs.to_source()),
                    _ => lhs.to_source(),
                };
                let right = match rhs.as_ref() {
                    Expr::Binary { .. } => format!("({})", rhs.to_source()),
                    _ => rhs.to_source(),
                };
                format!("{} {} {}", left, op, right)
            }
            Expr::Error(_) => "<error>".to_string(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_source())
    }
}
