//! Testing utilities for AST assertions
//!
//! What every parser test wants is assurance on the AST shape and
//! content, not generalities like node counts. Matching nested enums by
//! hand buries that intent in boilerplate, so tests use this fluent
//! assertion API instead:
//!
//! ```rust-example
//! use opn::opn::pipeline::parse_source;
//! use opn::opn::testing::assert_unit;
//!
//! let outcome = parse_source("struct Foo { int32 a; }");
//! assert_unit(&outcome.unit)
//!     .decl_count(1)
//!     .decl(0, |decl| {
//!         decl.assert_struct()
//!             .name("Foo")
//!             .field_count(1)
//!             .field(0, |field| {
//!                 field.name("a").type_source("int32").no_default();
//!             });
//!     });
//! ```
//!
//! Every method panics with a descriptive message on mismatch, which is
//! exactly what a failing test should do.

use crate::opn::ast::elements::{CompilationUnit, Declaration, EnumDecl, FieldDecl};

/// Entry point: assert over a parsed compilation unit
pub fn assert_unit(unit: &CompilationUnit) -> UnitAssertion<'_> {
    UnitAssertion { unit }
}

pub struct UnitAssertion<'a> {
    unit: &'a CompilationUnit,
}

impl<'a> UnitAssertion<'a> {
    pub fn decl_count(self, expected: usize) -> Self {
        assert_eq!(
            self.unit.declarations.len(),
            expected,
            "expected {} declarations, found {}",
            expected,
            self.unit.declarations.len()
        );
        self
    }

    pub fn decl(self, index: usize, check: impl FnOnce(DeclAssertion<'a>)) -> Self {
        let declaration = self
            .unit
            .declarations
            .get(index)
            .unwrap_or_else(|| panic!("no declaration at index {}", index));
        check(DeclAssertion { declaration });
        self
    }
}

pub struct DeclAssertion<'a> {
    declaration: &'a Declaration,
}

impl<'a> DeclAssertion<'a> {
    pub fn assert_struct(self) -> RecordAssertion<'a> {
        match self.declaration {
            Declaration::Struct(decl) => RecordAssertion {
                kind: "struct",
                name: &decl.name,
                fields: &decl.fields,
            },
            other => panic!("expected StructDecl, found {}", other),
        }
    }

    pub fn assert_message(self) -> RecordAssertion<'a> {
        match self.declaration {
            Declaration::Message(decl) => RecordAssertion {
                kind: "message",
                name: &decl.name,
                fields: &decl.fields,
            },
            other => panic!("expected MessageDecl, found {}", other),
        }
    }

    pub fn assert_enum(self) -> EnumAssertion<'a> {
        match self.declaration {
            Declaration::Enum(decl) => EnumAssertion { decl },
            other => panic!("expected EnumDecl, found {}", other),
        }
    }

    pub fn assert_module(self, name: &str) {
        match self.declaration {
            Declaration::Module(decl) => assert_eq!(
                decl.name.dotted(),
                name,
                "module name mismatch"
            ),
            other => panic!("expected ModuleDecl, found {}", other),
        }
    }

    pub fn assert_import(self, name: &str) {
        match self.declaration {
            Declaration::Import(decl) => assert_eq!(
                decl.name.dotted(),
                name,
                "import name mismatch"
            ),
            other => panic!("expected ImportDecl, found {}", other),
        }
    }

    pub fn assert_error(self) {
        assert!(
            self.declaration.is_error(),
            "expected Error declaration, found {}",
            self.declaration
        );
    }
}

/// Shared assertions for struct and message declarations
pub struct RecordAssertion<'a> {
    kind: &'static str,
    name: &'a str,
    fields: &'a [FieldDecl],
}

impl<'a> RecordAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.name, expected, "{} name mismatch", self.kind);
        self
    }

    pub fn field_count(self, expected: usize) -> Self {
        assert_eq!(
            self.fields.len(),
            expected,
            "{} `{}`: expected {} fields, found {}",
            self.kind,
            self.name,
            expected,
            self.fields.len()
        );
        self
    }

    pub fn field(self, index: usize, check: impl FnOnce(FieldAssertion<'a>)) -> Self {
        let field = self
            .fields
            .get(index)
            .unwrap_or_else(|| panic!("{} `{}`: no field at index {}", self.kind, self.name, index));
        check(FieldAssertion { field });
        self
    }
}

pub struct FieldAssertion<'a> {
    field: &'a FieldDecl,
}

impl<'a> FieldAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.field.name, expected, "field name mismatch");
        self
    }

    pub fn type_source(self, expected: &str) -> Self {
        assert_eq!(
            self.field.ty.to_source(),
            expected,
            "field `{}` type mismatch",
            self.field.name
        );
        self
    }

    pub fn default_source(self, expected: &str) -> Self {
        match &self.field.default {
            Some(default) => assert_eq!(
                default.to_source(),
                expected,
                "field `{}` default mismatch",
                self.field.name
            ),
            None => panic!("field `{}` has no default value", self.field.name),
        }
        self
    }

    pub fn no_default(self) -> Self {
        assert!(
            self.field.default.is_none(),
            "field `{}` unexpectedly has a default value",
            self.field.name
        );
        self
    }

    pub fn attribute_count(self, expected: usize) -> Self {
        assert_eq!(
            self.field.attributes.len(),
            expected,
            "field `{}` attribute count mismatch",
            self.field.name
        );
        self
    }
}

pub struct EnumAssertion<'a> {
    decl: &'a EnumDecl,
}

impl<'a> EnumAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.decl.name, expected, "enum name mismatch");
        self
    }

    pub fn variant_names(self, expected: &[&str]) -> Self {
        let names: Vec<_> = self.decl.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, expected, "enum `{}` variant mismatch", self.decl.name);
        self
    }

    pub fn variant_value(self, index: usize, expected: &str) -> Self {
        let variant = self
            .decl
            .variants
            .get(index)
            .unwrap_or_else(|| panic!("enum `{}`: no variant at index {}", self.decl.name, index));
        match &variant.value {
            Some(value) => assert_eq!(value.to_source(), expected),
            None => panic!("variant `{}` has no value", variant.name),
        }
        self
    }
}
