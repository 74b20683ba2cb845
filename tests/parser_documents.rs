//! End-to-end parser tests over complete OPN documents
//!
//! Each test drives the full pipeline (lex, parse, build) and verifies
//! the AST shape and content with the fluent assertion API; counting
//! nodes without checking structure is not considered a test here.

use opn::opn::diagnostics::Category;
use opn::opn::pipeline::parse_source;
use opn::opn::testing::assert_unit;
use rstest::rstest;

#[test]
fn test_struct_with_single_field() {
    let outcome = parse_source("struct Foo { int32 a; }");
    assert!(!outcome.has_errors());

    assert_unit(&outcome.unit).decl_count(1).decl(0, |decl| {
        decl.assert_struct()
            .name("Foo")
            .field_count(1)
            .field(0, |field| {
                field.name("a").type_source("int32").no_default();
            });
    });
}

#[test]
fn test_enum_variants_in_declaration_order() {
    let outcome = parse_source("enum Color { Red, Green, Blue }");
    assert!(!outcome.has_errors());

    assert_unit(&outcome.unit).decl_count(1).decl(0, |decl| {
        decl.assert_enum()
            .name("Color")
            .variant_names(&["Red", "Green", "Blue"]);
    });
}

#[test]
fn test_missing_semicolon_recovery() {
    let outcome = parse_source("struct Foo { int32 a int32 b; }");

    // Exactly one syntax diagnostic, pointing at the second `int32`
    assert_eq!(outcome.diagnostics.len(), 1);
    let diagnostic = &outcome.diagnostics[0];
    assert_eq!(diagnostic.category, Category::Syntax);
    assert_eq!(diagnostic.location.start.line, 1);
    assert_eq!(diagnostic.location.start.column, 22);

    // The struct and its first field survive
    assert_unit(&outcome.unit).decl(0, |decl| {
        decl.assert_struct().name("Foo").field(0, |field| {
            field.name("a").type_source("int32");
        });
    });
}

#[test]
fn test_garbage_input_yields_lexical_diagnostics_not_a_crash() {
    let outcome = parse_source("#$%");

    assert_eq!(outcome.diagnostics.len(), 3);
    for diagnostic in &outcome.diagnostics {
        assert_eq!(diagnostic.category, Category::Lexical);
    }
    assert_eq!(outcome.unit.valid_declarations().count(), 0);
}

#[test]
fn test_module_imports_and_declarations() {
    let source = "\
module Protocols.Demo;

import Protocols.Base;

struct Endpoint {
    uint32 address;
    uint16 port = 443;
}

message Connect {
    Endpoint target;
    optional<string> token;
}
";
    let outcome = parse_source(source);
    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);

    assert_unit(&outcome.unit)
        .decl_count(4)
        .decl(0, |decl| decl.assert_module("Protocols.Demo"))
        .decl(1, |decl| decl.assert_import("Protocols.Base"))
        .decl(2, |decl| {
            decl.assert_struct()
                .name("Endpoint")
                .field_count(2)
                .field(1, |field| {
                    field.name("port").type_source("uint16").default_source("443");
                });
        })
        .decl(3, |decl| {
            decl.assert_message()
                .name("Connect")
                .field_count(2)
                .field(0, |field| {
                    field.name("target").type_source("Endpoint");
                })
                .field(1, |field| {
                    field.name("token").type_source("optional<string>");
                });
        });
}

#[test]
fn test_attributes_on_declarations_and_fields() {
    let source = "\
[Deprecated]
[Endianness(1)]
struct Legacy {
    [Padding(2)]
    uint8 flags;
}
";
    let outcome = parse_source(source);
    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);

    let decl = outcome.unit.declarations[0].as_struct().unwrap();
    let names: Vec<_> = decl.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Deprecated", "Endianness"]);
    assert_eq!(decl.attributes[1].args.len(), 1);

    assert_unit(&outcome.unit).decl(0, |d| {
        d.assert_struct().field(0, |field| {
            field.name("flags").attribute_count(1);
        });
    });
}

#[test]
fn test_array_types() {
    let outcome =
        parse_source("struct Packet { uint8[4] header; uint8[] payload; uint8[2 * 8] pad; }");
    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);

    assert_unit(&outcome.unit).decl(0, |decl| {
        decl.assert_struct()
            .field(0, |field| {
                field.type_source("uint8[4]");
            })
            .field(1, |field| {
                field.type_source("uint8[]");
            })
            .field(2, |field| {
                field.type_source("uint8[2 * 8]");
            });
    });
}

#[test]
fn test_enum_with_explicit_values() {
    let outcome = parse_source("enum Flags { None = 0, Urgent = 0x10, All = 0x10 | 0x01 }");
    assert!(!outcome.has_errors(), "{:?}", outcome.diagnostics);

    assert_unit(&outcome.unit).decl(0, |decl| {
        decl.assert_enum()
            .variant_names(&["None", "Urgent", "All"])
            .variant_value(0, "0")
            .variant_value(1, "16")
            .variant_value(2, "16 | 1");
    });
}

#[test]
fn test_qualified_type_references() {
    let outcome = parse_source("struct S { Protocols.Base.Header header; }");
    assert!(!outcome.has_errors());

    assert_unit(&outcome.unit).decl(0, |decl| {
        decl.assert_struct().field(0, |field| {
            field.type_source("Protocols.Base.Header");
        });
    });
}

#[rstest]
#[case("struct Empty { }", 0)]
#[case("struct One { bool flag; }", 1)]
#[case("struct Three { int8 a; int16 b; int32 c; }", 3)]
fn test_field_counts(#[case] source: &str, #[case] expected: usize) {
    let outcome = parse_source(source);
    assert!(!outcome.has_errors());
    assert_unit(&outcome.unit).decl(0, |decl| {
        decl.assert_struct().field_count(expected);
    });
}

#[rstest]
#[case("bool")]
#[case("string")]
#[case("binary")]
#[case("int8")]
#[case("int16")]
#[case("int32")]
#[case("int64")]
#[case("uint8")]
#[case("uint16")]
#[case("uint32")]
#[case("uint64")]
#[case("float32")]
#[case("float64")]
fn test_every_primitive_type(#[case] name: &str) {
    let outcome = parse_source(&format!("struct S {{ {} value; }}", name));
    assert!(!outcome.has_errors(), "{} failed", name);
    assert_unit(&outcome.unit).decl(0, |decl| {
        decl.assert_struct().field(0, |field| {
            field.type_source(name);
        });
    });
}

#[test]
fn test_comments_do_not_reach_the_tree() {
    let source = "\
// line comment
struct Foo { /* inline */ int32 a; }
/* trailing
   block */
";
    let outcome = parse_source(source);
    assert!(!outcome.has_errors());
    assert_unit(&outcome.unit).decl_count(1);
}

#[test]
fn test_empty_source_parses_to_empty_unit() {
    let outcome = parse_source("");
    assert!(!outcome.has_errors());
    assert_unit(&outcome.unit).decl_count(0);
}
