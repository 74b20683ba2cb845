//! Property-based tests for the lexer and parser
//!
//! Three families: the pipeline terminates without panicking on arbitrary
//! input, identical input always produces identical output, and for
//! generated well-formed sources the structural invariants hold (no
//! diagnostics, every token attributed to the tree, child locations
//! contained in parent locations, round-trips stable).

use opn::opn::ast::elements::{CompilationUnit, Declaration};
use opn::opn::ast::snapshot::snapshot_unit;
use opn::opn::ast::traits::AstNode;
use opn::opn::formats::to_source;
use opn::opn::lexer::tokenize;
use opn::opn::parser;
use opn::opn::pipeline::parse_source;
use proptest::prelude::*;

// ----------------------------------------------------------------------
// Arbitrary input: termination, determinism, sane spans
// ----------------------------------------------------------------------

proptest! {
    #[test]
    fn lexer_spans_are_ordered_and_in_bounds(source in "\\PC{0,200}") {
        let (tokens, _) = tokenize(&source);
        let mut previous_end = 0;
        for (_, span) in &tokens {
            prop_assert!(span.start < span.end, "empty token span {:?}", span);
            prop_assert!(previous_end <= span.start, "overlapping spans");
            prop_assert!(span.end <= source.len());
            previous_end = span.end;
        }
    }

    #[test]
    fn lexer_is_deterministic(source in "\\PC{0,200}") {
        prop_assert_eq!(tokenize(&source), tokenize(&source));
    }

    #[test]
    fn pipeline_terminates_and_is_idempotent(source in "\\PC{0,200}") {
        let first = parse_source(&source);
        let second = parse_source(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tree_never_holds_more_tokens_than_lexed(source in "\\PC{0,200}") {
        let (tokens, _) = tokenize(&source);
        let total = tokens.len();
        let (tree, _) = parser::parse(tokens, &source);
        prop_assert!(tree.token_count() <= total);
    }
}

// ----------------------------------------------------------------------
// Generated well-formed sources: structural invariants
// ----------------------------------------------------------------------

/// Identifier that can never collide with a reserved word
fn ident() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,5}".prop_map(|tail| format!("x{}", tail))
}

fn primitive() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "bool", "string", "int8", "int16", "int32", "int64", "uint8", "uint16", "uint32",
        "uint64",
    ])
}

fn field() -> impl Strategy<Value = String> {
    (primitive(), ident(), prop::option::of(-1000i32..1000)).prop_map(|(ty, name, default)| {
        match default {
            Some(value) => format!("    {} {} = {};\n", ty, name, value),
            None => format!("    {} {};\n", ty, name),
        }
    })
}

fn struct_decl() -> impl Strategy<Value = String> {
    (ident(), prop::collection::vec(field(), 0..4)).prop_map(|(name, fields)| {
        format!("struct {} {{\n{}}}\n", name, fields.join(""))
    })
}

fn enum_decl() -> impl Strategy<Value = String> {
    (ident(), prop::collection::vec(ident(), 1..4)).prop_map(|(name, variants)| {
        format!("enum {} {{ {} }}\n", name, variants.join(", "))
    })
}

fn unit_source() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![struct_decl(), enum_decl()], 0..4)
        .prop_map(|decls| decls.join("\n"))
}

/// Child locations are contained in their parents all the way down
fn assert_containment(unit: &CompilationUnit) {
    for declaration in &unit.declarations {
        assert!(
            unit.location.contains(declaration.location()),
            "declaration escapes the root"
        );
        match declaration {
            Declaration::Struct(decl) => {
                for field in &decl.fields {
                    assert!(decl.location.contains(field.location), "field escapes struct");
                    assert!(
                        field.location.contains(field.ty.location()),
                        "type escapes field"
                    );
                    if let Some(default) = &field.default {
                        assert!(
                            field.location.contains(default.location()),
                            "default escapes field"
                        );
                    }
                }
            }
            Declaration::Enum(decl) => {
                for variant in &decl.variants {
                    assert!(
                        decl.location.contains(variant.location),
                        "variant escapes enum"
                    );
                }
            }
            _ => {}
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn wellformed_source_parses_cleanly(source in unit_source()) {
        let outcome = parse_source(&source);
        prop_assert!(!outcome.has_errors(), "{:?}\n---\n{}", outcome.diagnostics, source);
    }

    #[test]
    fn clean_parse_attributes_every_token_to_the_tree(source in unit_source()) {
        let (tokens, lex_diagnostics) = tokenize(&source);
        prop_assert!(lex_diagnostics.is_empty());
        let total = tokens.len();
        let (tree, diagnostics) = parser::parse(tokens, &source);
        prop_assert!(diagnostics.is_empty());
        prop_assert_eq!(tree.token_count(), total);
    }

    #[test]
    fn locations_nest(source in unit_source()) {
        let outcome = parse_source(&source);
        prop_assert!(!outcome.has_errors());
        assert_containment(&outcome.unit);
    }

    #[test]
    fn roundtrip_is_stable(source in unit_source()) {
        let first = parse_source(&source);
        prop_assert!(!first.has_errors());
        let rendered = to_source(&first.unit);
        let second = parse_source(&rendered);
        prop_assert!(!second.has_errors(), "{:?}\n---\n{}", second.diagnostics, rendered);
        prop_assert_eq!(snapshot_unit(&first.unit), snapshot_unit(&second.unit));
    }
}
