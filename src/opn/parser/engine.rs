//! Parser engine - token walker and orchestrator
//!
//! Single-pass recursive descent over the token stream with one token of
//! lookahead. The engine owns the sequencing; at every decision point it
//! asks the grammar table which production the lookahead predicts, so the
//! language surface stays in `grammar/rules.rs` and this file stays free
//! of speculative token matching.
//!
//! Error recovery is synchronization-based. When a token cannot extend
//! the current derivation the engine emits one diagnostic, then skips
//! forward to the nearest synchronizing token (`;`, `}`, or a keyword
//! that starts a declaration), wrapping the skipped tokens in an `Error`
//! rule node so they stay accounted for in the tree. Two refinements keep
//! recovery useful:
//!
//! - a field or declaration that is complete except for its terminating
//!   `;` is kept, not discarded, so one missing semicolon costs one
//!   diagnostic and zero parsed structure;
//! - `Invalid` placeholder tokens from the lexer are already attributed
//!   to a lexical diagnostic, so the engine folds them into an error
//!   region without reporting them twice.
//!
//! Recovery always consumes at least one token, which together with the
//! lexer's forward-progress rule guarantees termination on any finite
//! input.

use crate::opn::ast::location::{Location, SourceMap};
use crate::opn::diagnostics::{Category, Diagnostic};
use crate::opn::grammar::{binary_op, grammar, unary_op, NonTerminal, Symbol};
use crate::opn::lexer::{Token, TokenKind};
use crate::opn::parser::cst::CstNode;
use std::ops::Range;

/// Parse a token stream into a concrete parse tree plus diagnostics
///
/// A clean parse returns a complete tree and no diagnostics. A parse with
/// recoverable errors returns a best-effort partial tree; callers must
/// check the diagnostic list, not just tree presence, to decide success.
pub fn parse(
    tokens: Vec<(Token, Range<usize>)>,
    source: &str,
) -> (CstNode, Vec<Diagnostic>) {
    let map = SourceMap::new(source);
    let mut engine = Engine {
        tokens,
        pos: 0,
        source_len: source.len(),
        map,
        diagnostics: Vec::new(),
    };

    let root = engine.parse_unit();
    (root, engine.diagnostics)
}

struct Engine {
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
    source_len: usize,
    map: SourceMap,
    diagnostics: Vec<Diagnostic>,
}

impl Engine {
    // ------------------------------------------------------------------
    // Token cursor
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<&(Token, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|(token, _)| token.kind())
    }

    fn bump(&mut self) -> CstNode {
        let (token, span) = self.tokens[self.pos].clone();
        self.pos += 1;
        CstNode::token(token, span)
    }

    /// Span to point diagnostics at: the current token, or end of input
    fn here(&self) -> Range<usize> {
        match self.peek() {
            Some((_, span)) => span.clone(),
            None => self.source_len..self.source_len,
        }
    }

    fn location_of(&self, span: &Range<usize>) -> Location {
        self.map.location(span)
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    fn syntax_error(&mut self, message: String, span: Range<usize>) {
        let location = self.location_of(&span);
        self.diagnostics
            .push(Diagnostic::error(Category::Syntax, message, span, location));
    }

    fn found_text(&self) -> String {
        match self.peek() {
            Some((token, _)) => format!("`{}`", token.lexeme()),
            None => "end of input".to_string(),
        }
    }

    fn error_expected(&mut self, what: &str) {
        let found = self.found_text();
        let span = self.here();
        self.syntax_error(format!("expected {}, found {}", what, found), span);
    }

    /// Consume a token of the given kind, or report and return None
    fn expect(&mut self, kind: TokenKind) -> Option<CstNode> {
        if self.peek_kind() == Some(kind) {
            Some(self.bump())
        } else {
            self.error_expected(&format!("`{}`", kind));
            None
        }
    }

    // ------------------------------------------------------------------
    // Error recovery
    // ------------------------------------------------------------------

    /// Skip to the next synchronizing token, wrapping whatever was
    /// skipped in an `Error` rule node. Consumes at least one token when
    /// any remain; a trailing `;` or stray `}` boundary is folded into
    /// the region, a declaration keyword is left for the caller.
    fn recover_to_sync(&mut self) -> Option<CstNode> {
        let mut skipped = Vec::new();

        while let Some(kind) = self.peek_kind() {
            if grammar().is_sync(kind) {
                // Statement boundaries fold into the region; declaration
                // keywords are left for the caller to resume on
                if kind == TokenKind::Semi || kind == TokenKind::RBrace {
                    skipped.push(self.bump());
                }
                break;
            }
            skipped.push(self.bump());
        }

        if skipped.is_empty() {
            None
        } else {
            Some(CstNode::rule(NonTerminal::Error, skipped))
        }
    }

    /// Field-level recovery: stop at `,` as well, so one bad variant or
    /// field does not eat its siblings
    fn recover_in_body(&mut self) -> Option<CstNode> {
        let mut skipped = Vec::new();

        while let Some(kind) = self.peek_kind() {
            if kind == TokenKind::RBrace || (grammar().is_sync(kind) && kind != TokenKind::Semi) {
                break;
            }
            if kind == TokenKind::Semi || kind == TokenKind::Comma {
                skipped.push(self.bump());
                break;
            }
            skipped.push(self.bump());
        }

        if skipped.is_empty() {
            None
        } else {
            Some(CstNode::rule(NonTerminal::Error, skipped))
        }
    }

    /// Collect a run of `Invalid` placeholder tokens into an error
    /// region without re-reporting them; the lexer already did.
    fn skip_invalid_run(&mut self) -> CstNode {
        let mut skipped = Vec::new();
        while self.peek_kind() == Some(TokenKind::Invalid) {
            skipped.push(self.bump());
        }
        CstNode::rule(NonTerminal::Error, skipped)
    }

    // ------------------------------------------------------------------
    // Compilation unit
    // ------------------------------------------------------------------

    fn parse_unit(&mut self) -> CstNode {
        let mut declarations = Vec::new();

        while let Some(kind) = self.peek_kind() {
            if kind == TokenKind::Invalid {
                declarations.push(self.skip_invalid_run());
                continue;
            }

            let predicted = grammar()
                .predict(NonTerminal::DeclarationList, kind)
                .filter(|p| !p.is_epsilon())
                .is_some();

            if predicted {
                match self.parse_declaration() {
                    Some(node) => declarations.push(node),
                    None => {
                        if let Some(region) = self.recover_to_sync() {
                            declarations.push(region);
                        }
                    }
                }
            } else {
                self.error_expected("a declaration");
                if let Some(region) = self.recover_to_sync() {
                    declarations.push(region);
                }
            }
        }

        CstNode::Rule {
            rule: NonTerminal::CompilationUnit,
            children: declarations,
            span: 0..self.source_len,
        }
    }

    /// Dispatch one top-level declaration. The attribute prefix is shared
    /// by struct/enum/message, so attributes are parsed first and the
    /// keyword after them picks the production.
    fn parse_declaration(&mut self) -> Option<CstNode> {
        let attributes = self.parse_attribute_list()?;

        let Some(kind) = self.peek_kind() else {
            self.error_expected("a declaration after attributes");
            return None;
        };

        match grammar().predict(NonTerminal::Declaration, kind) {
            Some(production) => {
                let target = match production.rhs.first() {
                    Some(Symbol::N(nt)) => *nt,
                    _ => NonTerminal::Error,
                };
                match target {
                    NonTerminal::ModuleDecl | NonTerminal::ImportDecl => {
                        if !attributes.is_empty() {
                            let span = self.here();
                            self.syntax_error(
                                format!(
                                    "attributes are not allowed before `{}`",
                                    kind
                                ),
                                span,
                            );
                        }
                        self.parse_header_decl(target, attributes)
                    }
                    NonTerminal::StructDecl => {
                        self.parse_record_decl(NonTerminal::StructDecl, TokenKind::KwStruct, attributes)
                    }
                    NonTerminal::MessageDecl => {
                        self.parse_record_decl(NonTerminal::MessageDecl, TokenKind::KwMessage, attributes)
                    }
                    NonTerminal::EnumDecl => self.parse_enum_decl(attributes),
                    _ => None,
                }
            }
            None => {
                self.error_expected("`struct`, `enum`, or `message` after attributes");
                None
            }
        }
    }

    /// `module Name.Path;` or `import Name.Path;`
    ///
    /// Stray attributes were already reported; they are kept as children
    /// so their tokens stay accounted for in the tree.
    fn parse_header_decl(
        &mut self,
        rule: NonTerminal,
        attributes: Vec<CstNode>,
    ) -> Option<CstNode> {
        let mut children = attributes;
        children.push(self.bump());
        children.push(self.parse_qualified_name()?);
        self.terminate_statement(&mut children);
        Some(CstNode::rule(rule, children))
    }

    /// Shared shape of struct and message declarations
    fn parse_record_decl(
        &mut self,
        rule: NonTerminal,
        keyword: TokenKind,
        attributes: Vec<CstNode>,
    ) -> Option<CstNode> {
        let mut children = attributes;
        children.push(self.expect(keyword)?);
        children.push(self.expect(TokenKind::Ident)?);
        children.push(self.expect(TokenKind::LBrace)?);

        loop {
            let Some(kind) = self.peek_kind() else { break };
            if kind == TokenKind::Invalid {
                children.push(self.skip_invalid_run());
                continue;
            }
            let starts_field = grammar()
                .predict(NonTerminal::FieldList, kind)
                .filter(|p| !p.is_epsilon())
                .is_some();
            if starts_field {
                match self.parse_field() {
                    Some(field) => children.push(field),
                    None => {
                        if let Some(region) = self.recover_in_body() {
                            children.push(region);
                        }
                    }
                }
                continue;
            }
            if kind == TokenKind::RBrace || grammar().is_sync(kind) {
                break;
            }
            // A token that starts neither a field nor the close brace:
            // skip past it inside the body so later fields still parse
            self.error_expected("a field declaration");
            if let Some(region) = self.recover_in_body() {
                children.push(region);
            }
        }

        // A missing close brace keeps what parsed; the diagnostic is out
        if let Some(close) = self.expect(TokenKind::RBrace) {
            children.push(close);
        }
        Some(CstNode::rule(rule, children))
    }

    /// One field: attributes, type, name, optional default, `;`
    fn parse_field(&mut self) -> Option<CstNode> {
        let mut children = self.parse_attribute_list()?;
        children.push(self.parse_type_expr()?);
        children.push(self.expect(TokenKind::Ident)?);

        if self.peek_kind() == Some(TokenKind::Assign) {
            let mut default_children = vec![self.bump()];
            default_children.push(self.parse_expression()?);
            children.push(CstNode::rule(NonTerminal::FieldDefault, default_children));
        }

        self.terminate_statement(&mut children);
        Some(CstNode::rule(NonTerminal::FieldDecl, children))
    }

    /// Consume the statement's `;` if present; otherwise report it
    /// missing but keep the statement parsed so far. One forgotten
    /// semicolon costs a single diagnostic, not the whole declaration.
    fn terminate_statement(&mut self, children: &mut Vec<CstNode>) {
        if self.peek_kind() == Some(TokenKind::Semi) {
            children.push(self.bump());
        } else {
            self.error_expected("`;`");
        }
    }

    /// `enum Name { Variant, Variant = expr, ... }`
    fn parse_enum_decl(&mut self, attributes: Vec<CstNode>) -> Option<CstNode> {
        let mut children = attributes;
        children.push(self.expect(TokenKind::KwEnum)?);
        children.push(self.expect(TokenKind::Ident)?);
        children.push(self.expect(TokenKind::LBrace)?);

        loop {
            let Some(kind) = self.peek_kind() else { break };
            if kind == TokenKind::Invalid {
                children.push(self.skip_invalid_run());
                continue;
            }
            let starts_variant = grammar()
                .predict(NonTerminal::VariantList, kind)
                .filter(|p| !p.is_epsilon())
                .is_some();
            if starts_variant {
                match self.parse_variant() {
                    Some(variant) => children.push(variant),
                    None => {
                        if let Some(region) = self.recover_in_body() {
                            children.push(region);
                        }
                        continue;
                    }
                }
                // Comma separates variants; trailing comma before `}` is fine.
                // Two adjacent variants are kept but the missing comma is
                // reported.
                match self.peek_kind() {
                    Some(TokenKind::Comma) => children.push(self.bump()),
                    Some(TokenKind::Ident) => self.error_expected("`,`"),
                    _ => {}
                }
                continue;
            }
            if kind == TokenKind::RBrace || grammar().is_sync(kind) {
                break;
            }
            self.error_expected("an enum variant");
            if let Some(region) = self.recover_in_body() {
                children.push(region);
            }
        }

        if let Some(close) = self.expect(TokenKind::RBrace) {
            children.push(close);
        }
        Some(CstNode::rule(NonTerminal::EnumDecl, children))
    }

    fn parse_variant(&mut self) -> Option<CstNode> {
        let mut children = vec![self.expect(TokenKind::Ident)?];

        if self.peek_kind() == Some(TokenKind::Assign) {
            let mut value_children = vec![self.bump()];
            value_children.push(self.parse_expression()?);
            children.push(CstNode::rule(NonTerminal::VariantValue, value_children));
        }

        Some(CstNode::rule(NonTerminal::EnumVariant, children))
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// Zero or more `[Name]` / `[Name(args)]` prefixes
    fn parse_attribute_list(&mut self) -> Option<Vec<CstNode>> {
        let mut attributes = Vec::new();
        while self.peek_kind() == Some(TokenKind::LBracket) {
            attributes.push(self.parse_attribute()?);
        }
        Some(attributes)
    }

    fn parse_attribute(&mut self) -> Option<CstNode> {
        let mut children = vec![self.expect(TokenKind::LBracket)?];
        children.push(self.expect(TokenKind::Ident)?);

        if self.peek_kind() == Some(TokenKind::LParen) {
            let mut args = vec![self.bump()];
            if self.peek_kind() != Some(TokenKind::RParen) {
                args.push(self.parse_expression()?);
                while self.peek_kind() == Some(TokenKind::Comma) {
                    args.push(self.bump());
                    args.push(self.parse_expression()?);
                }
            }
            args.push(self.expect(TokenKind::RParen)?);
            children.push(CstNode::rule(NonTerminal::AttributeArgs, args));
        }

        children.push(self.expect(TokenKind::RBracket)?);
        Some(CstNode::rule(NonTerminal::Attribute, children))
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    /// A type atom plus any greedy `[len]` array suffixes
    fn parse_type_expr(&mut self) -> Option<CstNode> {
        let Some(kind) = self.peek_kind() else {
            self.error_expected("a type");
            return None;
        };

        let atom = match grammar().predict(NonTerminal::TypeAtom, kind) {
            Some(production) => match production.rhs.first() {
                Some(Symbol::T(TokenKind::Primitive)) => {
                    CstNode::rule(NonTerminal::TypeAtom, vec![self.bump()])
                }
                _ => {
                    let named = self.parse_named_type()?;
                    CstNode::rule(NonTerminal::TypeAtom, vec![named])
                }
            },
            None => {
                self.error_expected("a type");
                return None;
            }
        };

        let mut children = vec![atom];
        while self.peek_kind() == Some(TokenKind::LBracket) {
            let mut suffix = vec![self.bump()];
            if self.peek_kind() != Some(TokenKind::RBracket) {
                suffix.push(self.parse_expression()?);
            }
            suffix.push(self.expect(TokenKind::RBracket)?);
            children.push(CstNode::rule(NonTerminal::ArraySuffix, suffix));
        }

        Some(CstNode::rule(NonTerminal::TypeExpr, children))
    }

    /// `Qualified.Name` with optional `<T, U>` arguments
    fn parse_named_type(&mut self) -> Option<CstNode> {
        let mut children = vec![self.parse_qualified_name()?];

        if self.peek_kind() == Some(TokenKind::Lt) {
            let mut args = vec![self.bump()];
            args.push(self.parse_type_expr()?);
            while self.peek_kind() == Some(TokenKind::Comma) {
                args.push(self.bump());
                args.push(self.parse_type_expr()?);
            }
            args.push(self.expect(TokenKind::Gt)?);
            children.push(CstNode::rule(NonTerminal::TypeArgs, args));
        }

        Some(CstNode::rule(NonTerminal::NamedType, children))
    }

    fn parse_qualified_name(&mut self) -> Option<CstNode> {
        let mut children = vec![self.expect(TokenKind::Ident)?];
        while self.peek_kind() == Some(TokenKind::Dot) {
            children.push(self.bump());
            children.push(self.expect(TokenKind::Ident)?);
        }
        Some(CstNode::rule(NonTerminal::QualifiedName, children))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// A flat operator run: unary operands separated by binary operator
    /// tokens. Precedence is resolved later by the AST builder, using
    /// the same table that admits the operators here.
    fn parse_expression(&mut self) -> Option<CstNode> {
        let mut children = vec![self.parse_unary()?];

        while let Some(kind) = self.peek_kind() {
            if binary_op(kind).is_none() {
                break;
            }
            children.push(self.bump());
            children.push(self.parse_unary()?);
        }

        Some(CstNode::rule(NonTerminal::Expression, children))
    }

    fn parse_unary(&mut self) -> Option<CstNode> {
        if let Some(kind) = self.peek_kind() {
            if unary_op(kind).is_some() {
                let mut children = vec![self.bump()];
                children.push(self.parse_unary()?);
                return Some(CstNode::rule(NonTerminal::Unary, children));
            }
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Option<CstNode> {
        let Some(kind) = self.peek_kind() else {
            self.error_expected("an expression");
            return None;
        };

        if grammar().predict(NonTerminal::Primary, kind).is_none() {
            self.error_expected("an expression");
            return None;
        }

        let children = match kind {
            TokenKind::Int
            | TokenKind::Str
            | TokenKind::KwTrue
            | TokenKind::KwFalse => vec![self.bump()],
            TokenKind::Ident => vec![self.parse_qualified_name()?],
            TokenKind::LParen => {
                let mut inner = vec![self.bump()];
                inner.push(self.parse_expression()?);
                inner.push(self.expect(TokenKind::RParen)?);
                inner
            }
            _ => unreachable!("Primary prediction admitted {:?}", kind),
        };

        Some(CstNode::rule(NonTerminal::Primary, children))
    }
}
