//! Concrete parse tree
//!
//! The engine's output mirrors grammar-rule applications exactly: every
//! node is either a rule application (tagged with the non-terminal it
//! expands) or a consumed token, and carries the byte span it covers.
//! Nodes own their children exclusively; the tree is acyclic and rooted
//! at a single `CompilationUnit` node.
//!
//! Tokens discarded during error recovery are not dropped: they end up
//! under a rule node tagged `NonTerminal::Error`, so the whole input
//! remains accounted for by the tree plus the diagnostic list.

use crate::opn::grammar::NonTerminal;
use crate::opn::lexer::Token;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub enum CstNode {
    /// A grammar-rule application and its ordered children
    Rule {
        rule: NonTerminal,
        children: Vec<CstNode>,
        span: Range<usize>,
    },
    /// A single consumed token
    Token { token: Token, span: Range<usize> },
}

impl CstNode {
    pub fn rule(rule: NonTerminal, children: Vec<CstNode>) -> Self {
        let span = span_over(&children);
        CstNode::Rule {
            rule,
            children,
            span,
        }
    }

    pub fn token(token: Token, span: Range<usize>) -> Self {
        CstNode::Token { token, span }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            CstNode::Rule { span, .. } => span.clone(),
            CstNode::Token { span, .. } => span.clone(),
        }
    }

    /// The non-terminal of a rule node, if this is one
    pub fn as_rule(&self) -> Option<NonTerminal> {
        match self {
            CstNode::Rule { rule, .. } => Some(*rule),
            CstNode::Token { .. } => None,
        }
    }

    /// The token of a token node, if this is one
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            CstNode::Token { token, .. } => Some(token),
            CstNode::Rule { .. } => None,
        }
    }

    /// Children of a rule node; empty for token nodes
    pub fn children(&self) -> &[CstNode] {
        match self {
            CstNode::Rule { children, .. } => children,
            CstNode::Token { .. } => &[],
        }
    }

    /// First child expanding the given non-terminal
    pub fn find_rule(&self, rule: NonTerminal) -> Option<&CstNode> {
        self.children()
            .iter()
            .find(|child| child.as_rule() == Some(rule))
    }

    /// All children expanding the given non-terminal
    pub fn find_rules(&self, rule: NonTerminal) -> impl Iterator<Item = &CstNode> {
        self.children()
            .iter()
            .filter(move |child| child.as_rule() == Some(rule))
    }

    /// Count every token in this subtree
    pub fn token_count(&self) -> usize {
        match self {
            CstNode::Token { .. } => 1,
            CstNode::Rule { children, .. } => children.iter().map(CstNode::token_count).sum(),
        }
    }
}

/// Bounding byte span over a child list; empty children give an empty span
fn span_over(children: &[CstNode]) -> Range<usize> {
    match (children.first(), children.last()) {
        (Some(first), Some(last)) => first.span().start..last.span().end,
        _ => 0..0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opn::lexer::Token;

    #[test]
    fn test_rule_span_covers_children() {
        let node = CstNode::rule(
            NonTerminal::QualifiedName,
            vec![
                CstNode::token(Token::Ident("a".to_string()), 4..5),
                CstNode::token(Token::Dot, 5..6),
                CstNode::token(Token::Ident("b".to_string()), 6..7),
            ],
        );
        assert_eq!(node.span(), 4..7);
        assert_eq!(node.token_count(), 3);
    }

    #[test]
    fn test_find_rule() {
        let inner = CstNode::rule(
            NonTerminal::QualifiedName,
            vec![CstNode::token(Token::Ident("x".to_string()), 0..1)],
        );
        let outer = CstNode::rule(NonTerminal::ModuleDecl, vec![inner.clone()]);
        assert_eq!(outer.find_rule(NonTerminal::QualifiedName), Some(&inner));
        assert!(outer.find_rule(NonTerminal::Expression).is_none());
    }

    #[test]
    fn test_nested_spans_contained() {
        let leaf = CstNode::token(Token::Semi, 10..11);
        let mid = CstNode::rule(NonTerminal::ImportDecl, vec![leaf]);
        let root = CstNode::rule(NonTerminal::CompilationUnit, vec![mid.clone()]);

        let rs = root.span();
        let ms = mid.span();
        assert!(rs.start <= ms.start && ms.end <= rs.end);
    }
}
