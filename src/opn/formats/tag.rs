//! XML-like AST tag serialization
//!
//! Serializes AST nodes to an XML-like format that directly reflects the
//! tree structure, using the Visitor trait for uniform dispatch.
//!
//! ## Example
//!
//! ```text
//! <compilation-unit>
//!   <struct>Foo
//!     <field type="int32">a</field>
//!   </struct>
//! </compilation-unit>
//! ```

use crate::opn::ast::elements::{
    Attribute, CompilationUnit, EnumDecl, EnumVariant, ErrorDecl, Expr, FieldDecl, ImportDecl,
    MessageDecl, ModuleDecl, StructDecl,
};
use crate::opn::ast::traits::{visit_declarations, Visitor};

/// Serialize a compilation unit to the tag format
pub fn to_tag_string(unit: &CompilationUnit) -> String {
    let mut serializer = TagSerializer {
        output: String::new(),
        indent_level: 0,
    };
    serializer.open_line("<compilation-unit>");
    serializer.indent_level += 1;
    visit_declarations(&mut serializer, &unit.declarations);
    serializer.indent_level -= 1;
    serializer.open_line("</compilation-unit>");
    serializer.output
}

struct TagSerializer {
    output: String,
    indent_level: usize,
}

impl TagSerializer {
    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn open_line(&mut self, text: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn leaf(&mut self, tag: &str, attrs: &str, text: &str) {
        self.open_line(&format!(
            "<{tag}{attrs}>{}</{tag}>",
            escape_xml(text)
        ));
    }

    fn attributes_block(&mut self, attributes: &[Attribute]) {
        for attribute in attributes {
            attribute_tag(self, attribute);
        }
    }

    fn record(&mut self, tag: &str, name: &str, attributes: &[Attribute], fields: &[FieldDecl]) {
        self.open_line(&format!("<{tag}>{}", escape_xml(name)));
        self.indent_level += 1;
        self.attributes_block(attributes);
        for field in fields {
            field_tag(self, field);
        }
        self.indent_level -= 1;
        self.open_line(&format!("</{tag}>"));
    }
}

fn attribute_tag(serializer: &mut TagSerializer, attribute: &Attribute) {
    let args = if attribute.args.is_empty() {
        String::new()
    } else {
        format!(
            " args=\"{}\"",
            escape_xml(
                &attribute
                    .args
                    .iter()
                    .map(Expr::to_source)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        )
    };
    serializer.leaf("attribute", &args, &attribute.name);
}

fn field_tag(serializer: &mut TagSerializer, field: &FieldDecl) {
    let mut attrs = format!(" type=\"{}\"", escape_xml(&field.ty.to_source()));
    if let Some(default) = &field.default {
        attrs.push_str(&format!(" default=\"{}\"", escape_xml(&default.to_source())));
    }
    if field.attributes.is_empty() {
        serializer.leaf("field", &attrs, &field.name);
    } else {
        serializer.open_line(&format!("<field{attrs}>{}", escape_xml(&field.name)));
        serializer.indent_level += 1;
        serializer.attributes_block(&field.attributes);
        serializer.indent_level -= 1;
        serializer.open_line("</field>");
    }
}

impl Visitor for TagSerializer {
    fn visit_module(&mut self, module: &ModuleDecl) {
        self.leaf("module", "", &module.name.dotted());
    }

    fn visit_import(&mut self, import: &ImportDecl) {
        self.leaf("import", "", &import.name.dotted());
    }

    fn visit_struct(&mut self, decl: &StructDecl) {
        self.record("struct", &decl.name, &decl.attributes, &decl.fields);
    }

    fn visit_message(&mut self, decl: &MessageDecl) {
        self.record("message", &decl.name, &decl.attributes, &decl.fields);
    }

    fn visit_enum(&mut self, decl: &EnumDecl) {
        self.open_line(&format!("<enum>{}", escape_xml(&decl.name)));
        self.indent_level += 1;
        self.attributes_block(&decl.attributes);
        for variant in &decl.variants {
            self.visit_variant(variant);
        }
        self.indent_level -= 1;
        self.open_line("</enum>");
    }

    fn visit_variant(&mut self, variant: &EnumVariant) {
        let attrs = match &variant.value {
            Some(value) => format!(" value=\"{}\"", escape_xml(&value.to_source())),
            None => String::new(),
        };
        self.leaf("variant", &attrs, &variant.name);
    }

    fn visit_error(&mut self, _error: &ErrorDecl) {
        self.open_line("<error/>");
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::pipeline::parse_source;

    #[test]
    fn test_tag_output() {
        let outcome = parse_source("struct Foo { int32 a; }");
        let tags = to_tag_string(&outcome.unit);
        assert_eq!(
            tags,
            "<compilation-unit>\n  <struct>Foo\n    <field type=\"int32\">a</field>\n  </struct>\n</compilation-unit>\n"
        );
    }

    #[test]
    fn test_enum_tags() {
        let outcome = parse_source("enum Color { Red, Green = 2 }");
        let tags = to_tag_string(&outcome.unit);
        assert!(tags.contains("<variant>Red</variant>"));
        assert!(tags.contains("<variant value=\"2\">Green</variant>"));
    }

    #[test]
    fn test_escaping() {
        let outcome = parse_source("struct S { optional<uint8> f; }");
        let tags = to_tag_string(&outcome.unit);
        assert!(tags.contains("type=\"optional&lt;uint8&gt;\""));
    }
}
