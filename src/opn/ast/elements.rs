//! AST node type definitions, one element per file

pub mod attribute;
pub mod compilation_unit;
pub mod declaration;
pub mod enum_decl;
pub mod expr;
pub mod field;
pub mod import;
pub mod message_decl;
pub mod module;
pub mod name;
pub mod struct_decl;
pub mod type_expr;

pub use attribute::Attribute;
pub use compilation_unit::CompilationUnit;
pub use declaration::{Declaration, ErrorDecl};
pub use enum_decl::{EnumDecl, EnumVariant};
pub use expr::{Expr, Literal, LiteralValue};
pub use field::FieldDecl;
pub use import::ImportDecl;
pub use message_decl::MessageDecl;
pub use module::ModuleDecl;
pub use name::QualifiedName;
pub use struct_decl::StructDecl;
pub use type_expr::TypeExpr;
