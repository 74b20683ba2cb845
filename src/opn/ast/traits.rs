//! Common traits for AST nodes
//!
//! Every AST node reports its type name, a short display label, and its
//! source location through [`AstNode`]; tree consumers that want uniform
//! dispatch implement [`Visitor`]. `accept` visits only the node itself —
//! visitors decide whether and how to descend, which lets serializers
//! interleave their own output with child traversal.

use crate::opn::ast::elements::{
    Attribute, CompilationUnit, Declaration, EnumDecl, EnumVariant, ErrorDecl, FieldDecl,
    ImportDecl, MessageDecl, ModuleDecl, StructDecl,
};
use crate::opn::ast::location::Location;

/// Common interface of all AST nodes
pub trait AstNode {
    /// The node's type name, e.g. "StructDecl"
    fn node_type(&self) -> &'static str;

    /// A short human-readable label, usually the declared name
    fn display_label(&self) -> String;

    /// Where this node lives in the source
    fn location(&self) -> Location;

    /// Double-dispatch to the matching `visit_*` method
    fn accept(&self, visitor: &mut dyn Visitor);
}

/// Visitor over declaration-level nodes
///
/// Default implementations do nothing, so a visitor only overrides what
/// it cares about. Child traversal is the visitor's responsibility.
pub trait Visitor {
    fn visit_unit(&mut self, _unit: &CompilationUnit) {}
    fn visit_module(&mut self, _module: &ModuleDecl) {}
    fn visit_import(&mut self, _import: &ImportDecl) {}
    fn visit_struct(&mut self, _decl: &StructDecl) {}
    fn visit_enum(&mut self, _decl: &EnumDecl) {}
    fn visit_variant(&mut self, _variant: &EnumVariant) {}
    fn visit_message(&mut self, _decl: &MessageDecl) {}
    fn visit_field(&mut self, _field: &FieldDecl) {}
    fn visit_attribute(&mut self, _attribute: &Attribute) {}
    fn visit_error(&mut self, _error: &ErrorDecl) {}
}

/// Dispatch each declaration in order to the visitor
pub fn visit_declarations(visitor: &mut dyn Visitor, declarations: &[Declaration]) {
    for declaration in declarations {
        declaration.accept(visitor);
    }
}
