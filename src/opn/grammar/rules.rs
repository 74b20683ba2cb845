//! OPN production rules
//!
//! The grammar is data, not code: a static table of productions, each with
//! its left-hand non-terminal, ordered right-hand symbols, and prediction
//! set. The parser engine walks tokens imperatively but asks this table
//! which production applies at each decision point, so the language surface
//! is readable in one place and the engine stays free of token-by-token
//! casework.
//!
//! Productions are listed in declaration order; where a non-terminal has
//! several alternatives the first whose prediction set contains the
//! lookahead token wins, and an epsilon alternative (empty right-hand
//! side) applies when nothing else does. Repetition is expressed with list
//! non-terminals (`FieldList`, `VariantTail`, ...), which keeps every rule
//! a plain sequence and the whole table checkable by eye.
//!
//! The table is assembled once behind a `Lazy` and never mutated after
//! construction, which is what makes it safe to share across concurrent
//! parses.

use crate::opn::lexer::TokenKind;
use once_cell::sync::Lazy;
use std::fmt;

/// A named set of interchangeable terminals
///
/// Operator tokens behave identically at the grammar level and only
/// diverge in the precedence table, so productions reference them as one
/// class instead of one alternative per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalClass {
    BinaryOp,
    UnaryOp,
}

impl TerminalClass {
    /// The token kinds belonging to this class
    pub fn members(&self) -> &'static [TokenKind] {
        match self {
            TerminalClass::BinaryOp => BINARY_OPS,
            TerminalClass::UnaryOp => UNARY_OPS,
        }
    }
}

/// Grammar symbols that can appear on a production's right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// A token kind consumed directly
    T(TokenKind),
    /// Any one token of a terminal class
    C(TerminalClass),
    /// A non-terminal expanded via further productions
    N(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::T(kind) => write!(f, "`{}`", kind),
            Symbol::C(class) => write!(f, "{:?}", class),
            Symbol::N(nt) => write!(f, "{:?}", nt),
        }
    }
}

/// Every non-terminal of the OPN grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    CompilationUnit,
    DeclarationList,
    Declaration,
    ModuleDecl,
    ImportDecl,
    StructDecl,
    EnumDecl,
    MessageDecl,
    AttributeList,
    Attribute,
    AttributeArgs,
    ArgList,
    ArgTail,
    FieldList,
    FieldDecl,
    FieldDefault,
    VariantList,
    VariantTail,
    EnumVariant,
    VariantValue,
    TypeExpr,
    TypeAtom,
    NamedType,
    TypeArgs,
    TypeExprList,
    TypeExprTail,
    ArraySuffixList,
    ArraySuffix,
    ArrayLen,
    QualifiedName,
    QualifiedTail,
    Expression,
    BinOpTail,
    Unary,
    Primary,
    /// Synthetic non-terminal labelling recovery regions in the parse tree
    Error,
}

/// One production rule: lhs expands to the rhs sequence
///
/// `first` is the prediction set: the rule applies when the lookahead
/// token's kind is listed. An empty `rhs` marks an epsilon alternative,
/// taken when no sibling rule predicts the lookahead.
#[derive(Debug)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: &'static [Symbol],
    pub first: &'static [TokenKind],
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} :=", self.lhs)?;
        if self.rhs.is_empty() {
            write!(f, " <empty>")?;
        }
        for symbol in self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

use NonTerminal::*;
use Symbol::{C, N, T};
use TokenKind as K;

/// Tokens that can begin an expression
const EXPR_FIRST: &[TokenKind] = &[
    K::Minus,
    K::Bang,
    K::Tilde,
    K::Int,
    K::Str,
    K::KwTrue,
    K::KwFalse,
    K::Ident,
    K::LParen,
];

/// Tokens that can begin a type expression
const TYPE_FIRST: &[TokenKind] = &[K::Primitive, K::Ident];

/// Binary operator tokens, in table order
pub const BINARY_OPS: &[TokenKind] = &[
    K::Star,
    K::Slash,
    K::Percent,
    K::Plus,
    K::Minus,
    K::Amp,
    K::Caret,
    K::Pipe,
    K::EqEq,
    K::NotEq,
    K::Lt,
    K::Le,
    K::Gt,
    K::Ge,
];

/// Unary operator tokens
pub const UNARY_OPS: &[TokenKind] = &[K::Minus, K::Bang, K::Tilde];

/// The production table, in declaration order
static PRODUCTIONS: &[Production] = &[
    Production {
        lhs: CompilationUnit,
        rhs: &[N(DeclarationList)],
        first: &[K::KwModule, K::KwImport, K::KwStruct, K::KwEnum, K::KwMessage, K::LBracket],
    },
    Production {
        lhs: DeclarationList,
        rhs: &[N(Declaration), N(DeclarationList)],
        first: &[K::KwModule, K::KwImport, K::KwStruct, K::KwEnum, K::KwMessage, K::LBracket],
    },
    Production { lhs: DeclarationList, rhs: &[], first: &[] },
    Production {
        lhs: Declaration,
        rhs: &[N(ModuleDecl)],
        first: &[K::KwModule],
    },
    Production {
        lhs: Declaration,
        rhs: &[N(ImportDecl)],
        first: &[K::KwImport],
    },
    Production {
        lhs: Declaration,
        rhs: &[N(StructDecl)],
        first: &[K::KwStruct],
    },
    Production {
        lhs: Declaration,
        rhs: &[N(EnumDecl)],
        first: &[K::KwEnum],
    },
    Production {
        lhs: Declaration,
        rhs: &[N(MessageDecl)],
        first: &[K::KwMessage],
    },
    // An attribute list prefixes struct/enum/message alike; the keyword
    // after it picks the declaration, so `[` predicts no single rule here
    // and the engine re-dispatches once attributes are consumed.
    Production {
        lhs: ModuleDecl,
        rhs: &[T(K::KwModule), N(QualifiedName), T(K::Semi)],
        first: &[K::KwModule],
    },
    Production {
        lhs: ImportDecl,
        rhs: &[T(K::KwImport), N(QualifiedName), T(K::Semi)],
        first: &[K::KwImport],
    },
    Production {
        lhs: StructDecl,
        rhs: &[N(AttributeList), T(K::KwStruct), T(K::Ident), T(K::LBrace), N(FieldList), T(K::RBrace)],
        first: &[K::KwStruct, K::LBracket],
    },
    Production {
        lhs: MessageDecl,
        rhs: &[N(AttributeList), T(K::KwMessage), T(K::Ident), T(K::LBrace), N(FieldList), T(K::RBrace)],
        first: &[K::KwMessage, K::LBracket],
    },
    Production {
        lhs: EnumDecl,
        rhs: &[N(AttributeList), T(K::KwEnum), T(K::Ident), T(K::LBrace), N(VariantList), T(K::RBrace)],
        first: &[K::KwEnum, K::LBracket],
    },
    Production {
        lhs: AttributeList,
        rhs: &[N(Attribute), N(AttributeList)],
        first: &[K::LBracket],
    },
    Production { lhs: AttributeList, rhs: &[], first: &[] },
    Production {
        lhs: Attribute,
        rhs: &[T(K::LBracket), T(K::Ident), N(AttributeArgs), T(K::RBracket)],
        first: &[K::LBracket],
    },
    Production {
        lhs: AttributeArgs,
        rhs: &[T(K::LParen), N(ArgList), T(K::RParen)],
        first: &[K::LParen],
    },
    Production { lhs: AttributeArgs, rhs: &[], first: &[] },
    Production {
        lhs: ArgList,
        rhs: &[N(Expression), N(ArgTail)],
        first: EXPR_FIRST,
    },
    Production { lhs: ArgList, rhs: &[], first: &[] },
    Production {
        lhs: ArgTail,
        rhs: &[T(K::Comma), N(Expression), N(ArgTail)],
        first: &[K::Comma],
    },
    Production { lhs: ArgTail, rhs: &[], first: &[] },
    Production {
        lhs: FieldList,
        rhs: &[N(FieldDecl), N(FieldList)],
        first: &[K::LBracket, K::Primitive, K::Ident],
    },
    Production { lhs: FieldList, rhs: &[], first: &[] },
    Production {
        lhs: FieldDecl,
        rhs: &[N(AttributeList), N(TypeExpr), T(K::Ident), N(FieldDefault), T(K::Semi)],
        first: &[K::LBracket, K::Primitive, K::Ident],
    },
    Production {
        lhs: FieldDefault,
        rhs: &[T(K::Assign), N(Expression)],
        first: &[K::Assign],
    },
    Production { lhs: FieldDefault, rhs: &[], first: &[] },
    Production {
        lhs: VariantList,
        rhs: &[N(EnumVariant), N(VariantTail)],
        first: &[K::Ident],
    },
    Production { lhs: VariantList, rhs: &[], first: &[] },
    Production {
        lhs: VariantTail,
        rhs: &[T(K::Comma), N(VariantList)],
        first: &[K::Comma],
    },
    Production { lhs: VariantTail, rhs: &[], first: &[] },
    Production {
        lhs: EnumVariant,
        rhs: &[T(K::Ident), N(VariantValue)],
        first: &[K::Ident],
    },
    Production {
        lhs: VariantValue,
        rhs: &[T(K::Assign), N(Expression)],
        first: &[K::Assign],
    },
    Production { lhs: VariantValue, rhs: &[], first: &[] },
    Production {
        lhs: TypeExpr,
        rhs: &[N(TypeAtom), N(ArraySuffixList)],
        first: TYPE_FIRST,
    },
    Production {
        lhs: TypeAtom,
        rhs: &[T(K::Primitive)],
        first: &[K::Primitive],
    },
    Production {
        lhs: TypeAtom,
        rhs: &[N(NamedType)],
        first: &[K::Ident],
    },
    Production {
        lhs: NamedType,
        rhs: &[N(QualifiedName), N(TypeArgs)],
        first: &[K::Ident],
    },
    Production {
        lhs: TypeArgs,
        rhs: &[T(K::Lt), N(TypeExprList), T(K::Gt)],
        first: &[K::Lt],
    },
    Production { lhs: TypeArgs, rhs: &[], first: &[] },
    Production {
        lhs: TypeExprList,
        rhs: &[N(TypeExpr), N(TypeExprTail)],
        first: TYPE_FIRST,
    },
    Production {
        lhs: TypeExprTail,
        rhs: &[T(K::Comma), N(TypeExprList)],
        first: &[K::Comma],
    },
    Production { lhs: TypeExprTail, rhs: &[], first: &[] },
    // Greedy: a `[` after a type always attaches as an array suffix
    Production {
        lhs: ArraySuffixList,
        rhs: &[N(ArraySuffix), N(ArraySuffixList)],
        first: &[K::LBracket],
    },
    Production { lhs: ArraySuffixList, rhs: &[], first: &[] },
    Production {
        lhs: ArraySuffix,
        rhs: &[T(K::LBracket), N(ArrayLen), T(K::RBracket)],
        first: &[K::LBracket],
    },
    Production {
        lhs: ArrayLen,
        rhs: &[N(Expression)],
        first: EXPR_FIRST,
    },
    Production { lhs: ArrayLen, rhs: &[], first: &[] },
    Production {
        lhs: QualifiedName,
        rhs: &[T(K::Ident), N(QualifiedTail)],
        first: &[K::Ident],
    },
    Production {
        lhs: QualifiedTail,
        rhs: &[T(K::Dot), T(K::Ident), N(QualifiedTail)],
        first: &[K::Dot],
    },
    Production { lhs: QualifiedTail, rhs: &[], first: &[] },
    // Operator runs are kept flat in the parse tree; the AST builder
    // applies the precedence table to them.
    Production {
        lhs: Expression,
        rhs: &[N(Unary), N(BinOpTail)],
        first: EXPR_FIRST,
    },
    Production {
        lhs: BinOpTail,
        rhs: &[C(TerminalClass::BinaryOp), N(Unary), N(BinOpTail)],
        first: BINARY_OPS,
    },
    Production { lhs: BinOpTail, rhs: &[], first: &[] },
    Production {
        lhs: Unary,
        rhs: &[C(TerminalClass::UnaryOp), N(Unary)],
        first: UNARY_OPS,
    },
    Production {
        lhs: Unary,
        rhs: &[N(Primary)],
        first: &[K::Int, K::Str, K::KwTrue, K::KwFalse, K::Ident, K::LParen],
    },
    Production {
        lhs: Primary,
        rhs: &[T(K::Int)],
        first: &[K::Int],
    },
    Production {
        lhs: Primary,
        rhs: &[T(K::Str)],
        first: &[K::Str],
    },
    Production {
        lhs: Primary,
        rhs: &[T(K::KwTrue)],
        first: &[K::KwTrue],
    },
    Production {
        lhs: Primary,
        rhs: &[T(K::KwFalse)],
        first: &[K::KwFalse],
    },
    Production {
        lhs: Primary,
        rhs: &[N(QualifiedName)],
        first: &[K::Ident],
    },
    Production {
        lhs: Primary,
        rhs: &[T(K::LParen), N(Expression), T(K::RParen)],
        first: &[K::LParen],
    },
];

/// Tokens the engine resynchronizes on after a syntax error: statement and
/// declaration boundaries
static SYNC_TOKENS: &[TokenKind] = &[
    K::Semi,
    K::RBrace,
    K::KwModule,
    K::KwImport,
    K::KwStruct,
    K::KwEnum,
    K::KwMessage,
];

/// The immutable grammar table shared by every parse
pub struct Grammar {
    productions: &'static [Production],
    sync_tokens: &'static [TokenKind],
}

impl Grammar {
    fn new() -> Self {
        Self {
            productions: PRODUCTIONS,
            sync_tokens: SYNC_TOKENS,
        }
    }

    /// All productions, in declaration order
    pub fn productions(&self) -> &[Production] {
        self.productions
    }

    /// All productions for one non-terminal
    pub fn productions_for(&self, lhs: NonTerminal) -> impl Iterator<Item = &Production> {
        self.productions.iter().filter(move |p| p.lhs == lhs)
    }

    /// Pick the production for `lhs` predicted by the lookahead kind.
    ///
    /// Alternatives are tried in declaration order; if none predicts the
    /// token, the epsilon alternative applies when `lhs` has one.
    pub fn predict(&self, lhs: NonTerminal, lookahead: TokenKind) -> Option<&Production> {
        self.productions_for(lhs)
            .find(|p| p.first.contains(&lookahead))
            .or_else(|| self.productions_for(lhs).find(|p| p.is_epsilon()))
    }

    /// Tokens that can begin an expansion of `lhs`
    pub fn first_of(&self, lhs: NonTerminal) -> Vec<TokenKind> {
        let mut set = Vec::new();
        for p in self.productions_for(lhs) {
            for kind in p.first {
                if !set.contains(kind) {
                    set.push(*kind);
                }
            }
        }
        set
    }

    /// Whether `lhs` may expand to nothing
    pub fn is_nullable(&self, lhs: NonTerminal) -> bool {
        self.productions_for(lhs).any(|p| p.is_epsilon())
    }

    /// Whether the engine may resynchronize on this token after an error
    pub fn is_sync(&self, kind: TokenKind) -> bool {
        self.sync_tokens.contains(&kind)
    }

    /// Human-readable dump of the whole table
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for p in self.productions {
            out.push_str(&p.to_string());
            out.push('\n');
        }
        out
    }
}

static GRAMMAR: Lazy<Grammar> = Lazy::new(Grammar::new);

/// The process-wide grammar table, built on first access
pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_declaration() {
        let g = grammar();
        let p = g.predict(Declaration, K::KwStruct).unwrap();
        assert_eq!(p.rhs, &[N(StructDecl)]);

        let p = g.predict(Declaration, K::KwEnum).unwrap();
        assert_eq!(p.rhs, &[N(EnumDecl)]);
    }

    #[test]
    fn test_predict_falls_back_to_epsilon() {
        let g = grammar();
        // `}` ends a field list, which is nullable
        let p = g.predict(FieldList, K::RBrace).unwrap();
        assert!(p.is_epsilon());
    }

    #[test]
    fn test_predict_no_rule_no_epsilon() {
        let g = grammar();
        // An expression cannot start with `}` and has no epsilon form
        assert!(grammar().predict(Expression, K::RBrace).is_none());
        assert!(g.predict(Primary, K::Semi).is_none());
    }

    #[test]
    fn test_field_first_set() {
        let first = grammar().first_of(FieldDecl);
        assert!(first.contains(&K::Primitive));
        assert!(first.contains(&K::Ident));
        assert!(first.contains(&K::LBracket));
    }

    #[test]
    fn test_operator_class_predicts_operator_run() {
        let g = grammar();
        let p = g.predict(BinOpTail, K::Plus).unwrap();
        assert_eq!(p.rhs.first(), Some(&C(TerminalClass::BinaryOp)));
        for kind in TerminalClass::BinaryOp.members() {
            assert!(!g.predict(BinOpTail, *kind).unwrap().is_epsilon());
        }
        for kind in TerminalClass::UnaryOp.members() {
            assert!(!g.predict(Unary, *kind).unwrap().is_epsilon());
        }
    }

    #[test]
    fn test_sync_tokens() {
        let g = grammar();
        assert!(g.is_sync(K::Semi));
        assert!(g.is_sync(K::RBrace));
        assert!(g.is_sync(K::KwStruct));
        assert!(!g.is_sync(K::Ident));
        assert!(!g.is_sync(K::Comma));
    }

    #[test]
    fn test_nullable() {
        let g = grammar();
        assert!(g.is_nullable(AttributeList));
        assert!(g.is_nullable(FieldList));
        assert!(g.is_nullable(VariantList));
        assert!(!g.is_nullable(Expression));
        assert!(!g.is_nullable(QualifiedName));
    }

    #[test]
    fn test_shared_instance_is_stable() {
        // Two accesses see the very same table
        let a = grammar() as *const Grammar;
        let b = grammar() as *const Grammar;
        assert_eq!(a, b);
    }

    #[test]
    fn test_describe_lists_all_productions() {
        let dump = grammar().describe();
        assert!(dump.contains("StructDecl :="));
        assert!(dump.contains("Expression :="));
        assert_eq!(dump.lines().count(), grammar().productions().len());
    }
}
