//! AST definitions and utilities for the OPN notation
//!
//! ## Modules
//!
//! - `location` - positions, locations, and byte-offset conversion
//! - `elements` - AST node type definitions organized by element type
//! - `traits` - common traits for AST nodes
//! - `snapshot` - normalized serializable representation of a tree

pub mod elements;
pub mod location;
pub mod snapshot;
pub mod traits;

pub use elements::{
    Attribute, CompilationUnit, Declaration, EnumDecl, EnumVariant, ErrorDecl, Expr, FieldDecl,
    ImportDecl, Literal, LiteralValue, MessageDecl, ModuleDecl, QualifiedName, StructDecl,
    TypeExpr,
};
pub use location::{Location, Position, SourceMap};
pub use snapshot::{snapshot_unit, AstSnapshot};
pub use traits::{visit_declarations, AstNode, Visitor};
