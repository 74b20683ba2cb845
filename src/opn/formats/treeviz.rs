//! Indented tree visualization of an AST
//!
//! A compact, human-oriented dump for CLI inspection: one node per line,
//! two spaces per depth level, node type followed by its label.

use crate::opn::ast::elements::{CompilationUnit, Declaration, FieldDecl};
use crate::opn::ast::traits::AstNode;

/// Render a compilation unit as an indented tree
pub fn to_treeviz_string(unit: &CompilationUnit) -> String {
    let mut out = String::new();
    push_line(&mut out, 0, "CompilationUnit", "");

    for declaration in &unit.declarations {
        declaration_lines(&mut out, 1, declaration);
    }

    out
}

fn push_line(out: &mut String, depth: usize, node_type: &str, label: &str) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(node_type);
    if !label.is_empty() {
        out.push(' ');
        out.push_str(label);
    }
    out.push('\n');
}

fn declaration_lines(out: &mut String, depth: usize, declaration: &Declaration) {
    push_line(
        out,
        depth,
        declaration.node_type(),
        &declaration.display_label(),
    );

    match declaration {
        Declaration::Struct(decl) => {
            for field in &decl.fields {
                field_lines(out, depth + 1, field);
            }
        }
        Declaration::Message(decl) => {
            for field in &decl.fields {
                field_lines(out, depth + 1, field);
            }
        }
        Declaration::Enum(decl) => {
            for variant in &decl.variants {
                push_line(out, depth + 1, "EnumVariant", &variant.name);
            }
        }
        _ => {}
    }
}

fn field_lines(out: &mut String, depth: usize, field: &FieldDecl) {
    let label = match &field.default {
        Some(default) => format!("{}: {} = {}", field.name, field.ty, default),
        None => format!("{}: {}", field.name, field.ty),
    };
    push_line(out, depth, "FieldDecl", &label);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::pipeline::parse_source;

    #[test]
    fn test_treeviz() {
        let outcome = parse_source("struct Foo { int32 a; }");
        let viz = to_treeviz_string(&outcome.unit);
        assert_eq!(
            viz,
            "CompilationUnit\n  StructDecl Foo\n    FieldDecl a: int32\n"
        );
    }

    #[test]
    fn test_treeviz_enum() {
        let outcome = parse_source("enum E { A, B }");
        let viz = to_treeviz_string(&outcome.unit);
        assert!(viz.contains("EnumDecl E"));
        assert!(viz.contains("    EnumVariant A"));
    }
}
