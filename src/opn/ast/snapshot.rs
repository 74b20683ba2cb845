//! AST snapshots - a normalized intermediate representation of the tree
//!
//! A canonical, format-agnostic view of the AST suitable for serialization
//! to any output format (JSON, YAML, treeviz, tag). The snapshot captures
//! node types, labels, attributes, and children but deliberately not
//! locations, which also makes it the structural-equality currency for
//! round-trip tests: two parses of equivalent source produce equal
//! snapshots even though their locations differ.

use crate::opn::ast::elements::{
    Attribute, CompilationUnit, Declaration, EnumDecl, EnumVariant, Expr, FieldDecl, MessageDecl,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The type of node (e.g. "StructDecl", "FieldDecl")
    pub node_type: String,

    /// The primary label of the node, usually the declared name
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: HashMap<String, String>,

    /// Child nodes in declaration order
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Snapshot the whole compilation unit
pub fn snapshot_unit(unit: &CompilationUnit) -> AstSnapshot {
    AstSnapshot::new("CompilationUnit", "").with_children(
        unit.declarations.iter().map(snapshot_declaration).collect(),
    )
}

/// Snapshot one top-level declaration
pub fn snapshot_declaration(declaration: &Declaration) -> AstSnapshot {
    match declaration {
        Declaration::Module(decl) => AstSnapshot::new("ModuleDecl", decl.name.dotted()),
        Declaration::Import(decl) => AstSnapshot::new("ImportDecl", decl.name.dotted()),
        Declaration::Struct(decl) => AstSnapshot::new("StructDecl", decl.name.clone())
            .with_children(snapshot_attributes(&decl.attributes))
            .with_children(decl.fields.iter().map(snapshot_field).collect()),
        Declaration::Enum(decl) => snapshot_enum(decl),
        Declaration::Message(decl) => snapshot_message(decl),
        Declaration::Error(_) => AstSnapshot::new("Error", "<error>"),
    }
}

fn snapshot_message(decl: &MessageDecl) -> AstSnapshot {
    AstSnapshot::new("MessageDecl", decl.name.clone())
        .with_children(snapshot_attributes(&decl.attributes))
        .with_children(decl.fields.iter().map(snapshot_field).collect())
}

fn snapshot_enum(decl: &EnumDecl) -> AstSnapshot {
    AstSnapshot::new("EnumDecl", decl.name.clone())
        .with_children(snapshot_attributes(&decl.attributes))
        .with_children(decl.variants.iter().map(snapshot_variant).collect())
}

fn snapshot_variant(variant: &EnumVariant) -> AstSnapshot {
    let snapshot = AstSnapshot::new("EnumVariant", variant.name.clone());
    match &variant.value {
        Some(value) => snapshot.with_attribute("value", value.to_source()),
        None => snapshot,
    }
}

fn snapshot_field(field: &FieldDecl) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new("FieldDecl", field.name.clone())
        .with_attribute("type", field.ty.to_source());
    if let Some(default) = &field.default {
        snapshot = snapshot.with_attribute("default", default.to_source());
    }
    snapshot.with_children(snapshot_attributes(&field.attributes))
}

fn snapshot_attributes(attributes: &[Attribute]) -> Vec<AstSnapshot> {
    attributes
        .iter()
        .map(|attribute| {
            let snapshot = AstSnapshot::new("Attribute", attribute.name.clone());
            if attribute.args.is_empty() {
                snapshot
            } else {
                snapshot.with_attribute(
                    "args",
                    attribute
                        .args
                        .iter()
                        .map(Expr::to_source)
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::ast::elements::{StructDecl, TypeExpr};
    use crate::opn::ast::location::{Location, Position};
    use crate::opn::lexer::Primitive;

    #[test]
    fn test_snapshot_ignores_locations() {
        let located = CompilationUnit::new(vec![Declaration::Struct(
            StructDecl::new("Foo")
                .at(Location::new(Position::new(3, 1), Position::new(5, 2))),
        )]);
        let unlocated =
            CompilationUnit::new(vec![Declaration::Struct(StructDecl::new("Foo"))]);

        assert_eq!(snapshot_unit(&located), snapshot_unit(&unlocated));
    }

    #[test]
    fn test_field_snapshot_carries_type() {
        let field = FieldDecl::new(
            TypeExpr::primitive(Primitive::Int32, Location::default()),
            "a",
        );
        let snapshot = snapshot_field(&field);
        assert_eq!(snapshot.node_type, "FieldDecl");
        assert_eq!(snapshot.label, "a");
        assert_eq!(snapshot.attributes.get("type").unwrap(), "int32");
    }

    #[test]
    fn test_snapshot_serializes() {
        let unit = CompilationUnit::new(vec![Declaration::Struct(StructDecl::new("Foo"))]);
        let json = serde_json::to_string(&snapshot_unit(&unit)).unwrap();
        assert!(json.contains("StructDecl"));
        assert!(json.contains("Foo"));
    }
}
