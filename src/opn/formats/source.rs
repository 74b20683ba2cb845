//! Canonical source serialization
//!
//! Renders an AST back to OPN text in one canonical layout: four-space
//! indentation, one field or variant per line, attributes on their own
//! lines, integers in decimal. Re-parsing the output of an error-free
//! parse yields a structurally equal AST, which the round-trip tests
//! rely on.
//!
//! `Error` placeholders have no source form and are skipped; serializing
//! a partial tree is best-effort by design.

use crate::opn::ast::elements::{
    Attribute, CompilationUnit, Declaration, EnumDecl, FieldDecl, MessageDecl, StructDecl,
};

const INDENT: &str = "    ";

/// Render a compilation unit as canonical OPN source
pub fn to_source(unit: &CompilationUnit) -> String {
    let mut blocks = Vec::new();

    for declaration in &unit.declarations {
        match declaration {
            Declaration::Module(decl) => blocks.push(format!("module {};\n", decl.name)),
            Declaration::Import(decl) => blocks.push(format!("import {};\n", decl.name)),
            Declaration::Struct(decl) => blocks.push(struct_block(decl)),
            Declaration::Message(decl) => blocks.push(message_block(decl)),
            Declaration::Enum(decl) => blocks.push(enum_block(decl)),
            Declaration::Error(_) => {}
        }
    }

    blocks.join("\n")
}

fn attribute_lines(attributes: &[Attribute], out: &mut String, indent: &str) {
    for attribute in attributes {
        out.push_str(indent);
        out.push_str(&attribute.to_source());
        out.push('\n');
    }
}

fn field_line(field: &FieldDecl) -> String {
    let mut line = String::new();
    attribute_lines(&field.attributes, &mut line, INDENT);
    line.push_str(INDENT);
    line.push_str(&field.ty.to_source());
    line.push(' ');
    line.push_str(&field.name);
    if let Some(default) = &field.default {
        line.push_str(" = ");
        line.push_str(&default.to_source());
    }
    line.push_str(";\n");
    line
}

fn record_block(attributes: &[Attribute], keyword: &str, name: &str, fields: &[FieldDecl]) -> String {
    let mut out = String::new();
    attribute_lines(attributes, &mut out, "");
    out.push_str(keyword);
    out.push(' ');
    out.push_str(name);
    out.push_str(" {\n");
    for field in fields {
        out.push_str(&field_line(field));
    }
    out.push_str("}\n");
    out
}

fn struct_block(decl: &StructDecl) -> String {
    record_block(&decl.attributes, "struct", &decl.name, &decl.fields)
}

fn message_block(decl: &MessageDecl) -> String {
    record_block(&decl.attributes, "message", &decl.name, &decl.fields)
}

fn enum_block(decl: &EnumDecl) -> String {
    let mut out = String::new();
    attribute_lines(&decl.attributes, &mut out, "");
    out.push_str("enum ");
    out.push_str(&decl.name);
    out.push_str(" {\n");
    for variant in &decl.variants {
        out.push_str(INDENT);
        out.push_str(&variant.name);
        if let Some(value) = &variant.value {
            out.push_str(" = ");
            out.push_str(&value.to_source());
        }
        out.push_str(",\n");
    }
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::pipeline::parse_source;

    #[test]
    fn test_struct_rendering() {
        let outcome = parse_source("struct Foo { int32 a; uint16 b = 7; }");
        assert!(!outcome.has_errors());
        let rendered = to_source(&outcome.unit);
        assert_eq!(
            rendered,
            "struct Foo {\n    int32 a;\n    uint16 b = 7;\n}\n"
        );
    }

    #[test]
    fn test_enum_rendering() {
        let outcome = parse_source("enum Color { Red, Green = 2 }");
        let rendered = to_source(&outcome.unit);
        assert_eq!(rendered, "enum Color {\n    Red,\n    Green = 2,\n}\n");
    }

    #[test]
    fn test_module_and_import() {
        let outcome = parse_source("module A.B; import C.D;");
        let rendered = to_source(&outcome.unit);
        assert_eq!(rendered, "module A.B;\n\nimport C.D;\n");
    }

    #[test]
    fn test_hex_renders_as_decimal() {
        let outcome = parse_source("struct S { uint32 mask = 0xFF; }");
        let rendered = to_source(&outcome.unit);
        assert!(rendered.contains("mask = 255;"));
    }
}
