//! AST construction from the concrete parse tree
//!
//! Walks the tree bottom-up and materializes typed nodes: parenthesized
//! expressions collapse, flat operator runs fold into binary trees using
//! the precedence table, numeric literal text becomes `i64` values, and
//! byte spans become line/column locations.
//!
//! The builder never fails outright. A numeric literal that overflows
//! produces a `Literal` diagnostic and an `Expr::Error`; a recovery
//! region inherited from the engine becomes a `Declaration::Error`
//! carrying the region's location. Downstream consumers can skip or
//! report these without crashing.

use crate::opn::ast::elements::{
    Attribute, CompilationUnit, Declaration, EnumDecl, EnumVariant, ErrorDecl, Expr, FieldDecl,
    ImportDecl, Literal, MessageDecl, ModuleDecl, QualifiedName, StructDecl, TypeExpr,
};
use crate::opn::ast::location::{Location, SourceMap};
use crate::opn::diagnostics::{Category, Diagnostic};
use crate::opn::grammar::precedence::OpEntry;
use crate::opn::grammar::{binary_op, unary_op, NonTerminal};
use crate::opn::lexer::Token;
use crate::opn::parser::cst::CstNode;

/// Build the typed AST from a concrete parse tree
///
/// Diagnostics produced during construction (literal normalization) are
/// appended to the caller's list.
pub fn build(
    root: &CstNode,
    source: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> CompilationUnit {
    let map = SourceMap::new(source);
    let builder = Builder { map };

    let declarations = root
        .children()
        .iter()
        .filter_map(|child| builder.build_declaration(child, diagnostics))
        .collect();

    CompilationUnit::new(declarations).at(builder.map.whole())
}

struct Builder {
    map: SourceMap,
}

impl Builder {
    fn loc(&self, node: &CstNode) -> Location {
        self.map.location(&node.span())
    }

    fn build_declaration(
        &self,
        node: &CstNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Declaration> {
        match node.as_rule()? {
            NonTerminal::ModuleDecl => {
                let name = self.build_name(node.find_rule(NonTerminal::QualifiedName)?);
                Some(Declaration::Module(ModuleDecl::new(name).at(self.loc(node))))
            }
            NonTerminal::ImportDecl => {
                let name = self.build_name(node.find_rule(NonTerminal::QualifiedName)?);
                Some(Declaration::Import(ImportDecl::new(name).at(self.loc(node))))
            }
            NonTerminal::StructDecl => {
                let decl = StructDecl::new(first_ident(node)?)
                    .with_attributes(self.build_attributes(node, diagnostics))
                    .with_fields(self.build_fields(node, diagnostics))
                    .at(self.loc(node));
                Some(Declaration::Struct(decl))
            }
            NonTerminal::MessageDecl => {
                let decl = MessageDecl::new(first_ident(node)?)
                    .with_attributes(self.build_attributes(node, diagnostics))
                    .with_fields(self.build_fields(node, diagnostics))
                    .at(self.loc(node));
                Some(Declaration::Message(decl))
            }
            NonTerminal::EnumDecl => {
                let variants = node
                    .find_rules(NonTerminal::EnumVariant)
                    .filter_map(|v| self.build_variant(v, diagnostics))
                    .collect();
                let decl = EnumDecl::new(first_ident(node)?)
                    .with_attributes(self.build_attributes(node, diagnostics))
                    .with_variants(variants)
                    .at(self.loc(node));
                Some(Declaration::Enum(decl))
            }
            NonTerminal::Error => {
                Some(Declaration::Error(ErrorDecl::new(self.loc(node))))
            }
            _ => None,
        }
    }

    fn build_fields(
        &self,
        node: &CstNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<FieldDecl> {
        node.find_rules(NonTerminal::FieldDecl)
            .filter_map(|field| self.build_field(field, diagnostics))
            .collect()
    }

    fn build_field(
        &self,
        node: &CstNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<FieldDecl> {
        let ty = self.build_type(node.find_rule(NonTerminal::TypeExpr)?, diagnostics);
        let name = first_ident(node)?;

        let mut field = FieldDecl::new(ty, name)
            .with_attributes(self.build_attributes(node, diagnostics))
            .at(self.loc(node));

        if let Some(default) = node.find_rule(NonTerminal::FieldDefault) {
            if let Some(expression) = default.find_rule(NonTerminal::Expression) {
                field = field.with_default(self.build_expression(expression, diagnostics));
            }
        }

        Some(field)
    }

    fn build_variant(
        &self,
        node: &CstNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<EnumVariant> {
        let mut variant = EnumVariant::new(first_ident(node)?).at(self.loc(node));

        if let Some(value) = node.find_rule(NonTerminal::VariantValue) {
            if let Some(expression) = value.find_rule(NonTerminal::Expression) {
                variant = variant.with_value(self.build_expression(expression, diagnostics));
            }
        }

        Some(variant)
    }

    fn build_attributes(
        &self,
        node: &CstNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Attribute> {
        node.find_rules(NonTerminal::Attribute)
            .filter_map(|attribute| {
                let mut built =
                    Attribute::new(first_ident(attribute)?).at(self.loc(attribute));
                if let Some(args) = attribute.find_rule(NonTerminal::AttributeArgs) {
                    built = built.with_args(
                        args.find_rules(NonTerminal::Expression)
                            .map(|e| self.build_expression(e, diagnostics))
                            .collect(),
                    );
                }
                Some(built)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    fn build_type(&self, node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> TypeExpr {
        let atom = match node.find_rule(NonTerminal::TypeAtom) {
            Some(atom) => self.build_type_atom(atom, diagnostics),
            // A TypeExpr rule always carries an atom; fall back defensively
            None => TypeExpr::named(QualifiedName::simple("")),
        };

        // Array suffixes attach outward: uint8[2][3] is an array of
        // three uint8[2]
        node.find_rules(NonTerminal::ArraySuffix)
            .fold(atom, |element, suffix| {
                let length = suffix
                    .find_rule(NonTerminal::Expression)
                    .map(|e| self.build_expression(e, diagnostics));
                let location = Location::new(
                    element.location().start,
                    self.loc(suffix).end,
                );
                TypeExpr::Array {
                    element: Box::new(element),
                    length,
                    location,
                }
            })
    }

    fn build_type_atom(&self, node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> TypeExpr {
        if let Some(named) = node.find_rule(NonTerminal::NamedType) {
            let name = match named.find_rule(NonTerminal::QualifiedName) {
                Some(qn) => self.build_name(qn),
                None => QualifiedName::simple(""),
            };
            let args = match named.find_rule(NonTerminal::TypeArgs) {
                Some(type_args) => type_args
                    .find_rules(NonTerminal::TypeExpr)
                    .map(|t| self.build_type(t, diagnostics))
                    .collect(),
                None => Vec::new(),
            };
            return TypeExpr::Named {
                name,
                args,
                location: self.loc(node),
            };
        }

        match node.children().first().and_then(CstNode::as_token) {
            Some(Token::Primitive(primitive)) => {
                TypeExpr::primitive(*primitive, self.loc(node))
            }
            _ => TypeExpr::named(QualifiedName::simple("")),
        }
    }

    fn build_name(&self, node: &CstNode) -> QualifiedName {
        let parts = node
            .children()
            .iter()
            .filter_map(|child| match child.as_token() {
                Some(Token::Ident(name)) => Some(name.clone()),
                _ => None,
            })
            .collect();
        QualifiedName::new(parts).at(self.loc(node))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Fold a flat operator run into a tree by precedence climbing
    fn build_expression(&self, node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> Expr {
        let mut operands = Vec::new();
        let mut operators = Vec::new();

        for child in node.children() {
            match child.as_token() {
                Some(token) => {
                    if let Some(entry) = binary_op(token.kind()) {
                        operators.push(entry);
                    }
                }
                None => operands.push(self.build_operand(child, diagnostics)),
            }
        }

        if operands.is_empty() {
            return Expr::Error(self.loc(node));
        }

        let mut climber = Climber {
            operands,
            operators,
            pos: 0,
        };
        climber.parse(0)
    }

    fn build_operand(&self, node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> Expr {
        match node.as_rule() {
            Some(NonTerminal::Unary) => {
                let op = node
                    .children()
                    .first()
                    .and_then(CstNode::as_token)
                    .and_then(|t| unary_op(t.kind()));
                let operand = node
                    .children()
                    .get(1)
                    .map(|child| self.build_operand(child, diagnostics));
                match (op, operand) {
                    (Some(op), Some(operand)) => Expr::Unary {
                        op,
                        operand: Box::new(operand),
                        location: self.loc(node),
                    },
                    _ => Expr::Error(self.loc(node)),
                }
            }
            Some(NonTerminal::Primary) => self.build_primary(node, diagnostics),
            _ => Expr::Error(self.loc(node)),
        }
    }

    fn build_primary(&self, node: &CstNode, diagnostics: &mut Vec<Diagnostic>) -> Expr {
        // Parenthesized grouping collapses to its inner expression
        if let Some(inner) = node.find_rule(NonTerminal::Expression) {
            return self.build_expression(inner, diagnostics);
        }
        if let Some(name) = node.find_rule(NonTerminal::QualifiedName) {
            return Expr::Name(self.build_name(name));
        }

        let location = self.loc(node);
        match node.children().first().and_then(CstNode::as_token) {
            Some(Token::Int(text)) => self.normalize_int(text, node, diagnostics),
            Some(Token::Str(content)) => {
                Expr::Literal(Literal::string(content.clone()).at(location))
            }
            Some(Token::KwTrue) => Expr::Literal(Literal::bool(true).at(location)),
            Some(Token::KwFalse) => Expr::Literal(Literal::bool(false).at(location)),
            _ => Expr::Error(location),
        }
    }

    /// Convert integer literal text to its canonical value
    ///
    /// Decimal and `0x` hexadecimal forms, normalized to `i64`. Overflow
    /// is a diagnostic, not a panic, and yields an error expression.
    fn normalize_int(
        &self,
        text: &str,
        node: &CstNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Expr {
        let location = self.loc(node);
        let parsed = if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            i64::from_str_radix(digits, 16)
        } else {
            text.parse::<i64>()
        };

        match parsed {
            Ok(value) => Expr::Literal(Literal::int(value).at(location)),
            Err(_) => {
                diagnostics.push(Diagnostic::error(
                    Category::Literal,
                    format!("integer literal `{}` out of range", text),
                    node.span(),
                    location,
                ));
                Expr::Error(location)
            }
        }
    }
}

/// Precedence climber over parallel operand/operator lists
struct Climber {
    operands: Vec<Expr>,
    operators: Vec<&'static OpEntry>,
    pos: usize,
}

impl Climber {
    fn parse(&mut self, min_precedence: u8) -> Expr {
        let mut lhs = self.operands[self.pos].clone();
        self.pos += 1;

        while self.pos <= self.operators.len() {
            let entry = self.operators[self.pos - 1];
            if entry.precedence < min_precedence {
                break;
            }
            // Left-associative: the right side must bind strictly tighter
            let rhs = self.parse(entry.precedence + 1);
            lhs = Expr::binary(entry.op, lhs, rhs);
        }

        lhs
    }
}

/// The first direct identifier token child: the declared name
fn first_ident(node: &CstNode) -> Option<String> {
    node.children().iter().find_map(|child| match child.as_token() {
        Some(Token::Ident(name)) => Some(name.clone()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::ast::elements::LiteralValue;
    use crate::opn::grammar::BinaryOp;
    use crate::opn::lexer::tokenize;
    use crate::opn::parser::engine;

    fn build_source(source: &str) -> (CompilationUnit, Vec<Diagnostic>) {
        let (tokens, mut diagnostics) = tokenize(source);
        let (root, parse_diagnostics) = engine::parse(tokens, source);
        diagnostics.extend(parse_diagnostics);
        let unit = build(&root, source, &mut diagnostics);
        (unit, diagnostics)
    }

    #[test]
    fn test_struct_with_field() {
        let (unit, diagnostics) = build_source("struct Foo { int32 a; }");
        assert!(diagnostics.is_empty());

        let decl = unit.declarations[0].as_struct().unwrap();
        assert_eq!(decl.name, "Foo");
        assert_eq!(decl.fields.len(), 1);
        assert_eq!(decl.fields[0].name, "a");
        assert_eq!(decl.fields[0].ty.to_source(), "int32");
    }

    #[test]
    fn test_precedence_resolution() {
        let (unit, diagnostics) = build_source("struct S { int32 a = 1 + 2 * 3; }");
        assert!(diagnostics.is_empty());

        let field = &unit.declarations[0].as_struct().unwrap().fields[0];
        let Some(Expr::Binary { op, rhs, .. }) = &field.default else {
            panic!("expected binary default");
        };
        assert_eq!(*op, BinaryOp::Add);
        assert!(matches!(rhs.as_ref(), Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_left_associativity() {
        let (unit, _) = build_source("struct S { int32 a = 10 - 4 - 3; }");
        let field = &unit.declarations[0].as_struct().unwrap().fields[0];
        // (10 - 4) - 3, not 10 - (4 - 3)
        let Some(Expr::Binary { lhs, rhs, .. }) = &field.default else {
            panic!("expected binary default");
        };
        assert!(matches!(lhs.as_ref(), Expr::Binary { .. }));
        assert!(matches!(
            rhs.as_ref(),
            Expr::Literal(Literal { value: LiteralValue::Int(3), .. })
        ));
    }

    #[test]
    fn test_paren_collapse() {
        let (unit, diagnostics) = build_source("struct S { int32 a = (1 + 2) * 3; }");
        assert!(diagnostics.is_empty());
        let field = &unit.declarations[0].as_struct().unwrap().fields[0];
        let Some(Expr::Binary { op, lhs, .. }) = &field.default else {
            panic!("expected binary default");
        };
        assert_eq!(*op, BinaryOp::Mul);
        assert!(matches!(lhs.as_ref(), Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn test_hex_normalization() {
        let (unit, diagnostics) = build_source("struct S { uint32 m = 0xFF; }");
        assert!(diagnostics.is_empty());
        let field = &unit.declarations[0].as_struct().unwrap().fields[0];
        assert!(matches!(
            field.default,
            Some(Expr::Literal(Literal { value: LiteralValue::Int(255), .. }))
        ));
    }

    #[test]
    fn test_integer_overflow_is_a_diagnostic() {
        let (unit, diagnostics) =
            build_source("struct S { int64 big = 99999999999999999999; }");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category, Category::Literal);

        let field = &unit.declarations[0].as_struct().unwrap().fields[0];
        assert!(matches!(field.default, Some(Expr::Error(_))));
    }

    #[test]
    fn test_unary_negation() {
        let (unit, _) = build_source("struct S { int32 a = -1; }");
        let field = &unit.declarations[0].as_struct().unwrap().fields[0];
        assert!(matches!(field.default, Some(Expr::Unary { .. })));
    }

    #[test]
    fn test_error_region_becomes_error_declaration() {
        let (unit, diagnostics) = build_source("42 struct Ok { }");
        assert!(!diagnostics.is_empty());
        assert!(unit.declarations[0].is_error());
        assert_eq!(unit.declarations[1].as_struct().unwrap().name, "Ok");
    }

    #[test]
    fn test_root_location_covers_input() {
        let source = "struct Foo { int32 a; }\nstruct Bar { }\n";
        let (unit, _) = build_source(source);
        for declaration in &unit.declarations {
            use crate::opn::ast::traits::AstNode;
            assert!(
                unit.location.contains(declaration.location()),
                "declaration at {} escapes root {}",
                declaration.location(),
                unit.location
            );
        }
    }
}
