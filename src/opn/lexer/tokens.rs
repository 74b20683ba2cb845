//! Token definitions for the OPN notation
//!
//! All tokens the lexer can produce, defined with the logos derive macro.
//! Whitespace and comments (line and block) are recognized and skipped at
//! this level; they never reach the parser but do not disturb the byte
//! ranges of adjacent tokens.
//!
//! Identifier-shaped text is disambiguated against the reserved-word set
//! by logos priorities: exact keyword matches win over the identifier
//! regex, and longer matches win over shorter ones, so `boolean` is an
//! identifier while `bool` is a primitive type.

use logos::Logos;
use std::fmt;

/// Built-in scalar types of the notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    String,
    Binary,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl Primitive {
    /// The source spelling of this primitive type
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::String => "string",
            Primitive::Binary => "binary",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::UInt8 => "uint8",
            Primitive::UInt16 => "uint16",
            Primitive::UInt32 => "uint32",
            Primitive::UInt64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All possible tokens in OPN source
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*[^/])*\*+/")]
pub enum Token {
    // Declaration keywords
    #[token("module")]
    KwModule,
    #[token("import")]
    KwImport,
    #[token("struct")]
    KwStruct,
    #[token("enum")]
    KwEnum,
    #[token("message")]
    KwMessage,

    // Boolean literals
    #[token("true")]
    KwTrue,
    #[token("false")]
    KwFalse,

    // Primitive type keywords
    #[token("bool", |_| Primitive::Bool)]
    #[token("string", |_| Primitive::String)]
    #[token("binary", |_| Primitive::Binary)]
    #[token("int8", |_| Primitive::Int8)]
    #[token("int16", |_| Primitive::Int16)]
    #[token("int32", |_| Primitive::Int32)]
    #[token("int64", |_| Primitive::Int64)]
    #[token("uint8", |_| Primitive::UInt8)]
    #[token("uint16", |_| Primitive::UInt16)]
    #[token("uint32", |_| Primitive::UInt32)]
    #[token("uint64", |_| Primitive::UInt64)]
    #[token("float32", |_| Primitive::Float32)]
    #[token("float64", |_| Primitive::Float64)]
    Primitive(Primitive),

    // Identifiers
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Integer literals, decimal and hexadecimal; the raw text is kept and
    // normalized to a value during AST construction
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Int(String),

    // String literals with escape sequences, unescaped here. A string
    // missing its closing quote matches the shorter unterminated form,
    // whose callback rejects it into an error token spanning the attempt.
    #[regex(r#""([^"\\\n]|\\.)*""#, unescape_string)]
    #[regex(r#""([^"\\\n]|\\.)*"#, unterminated_string)]
    Str(String),

    // Delimiters
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // Operators
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,

    // Placeholder synthesized by the lexer for input it could not
    // classify; carries the offending text. Never produced by logos
    // directly.
    Invalid(String),
}

fn unterminated_string(_lex: &mut logos::Lexer<Token>) -> Result<String, ()> {
    Err(())
}

fn unescape_string(lex: &mut logos::Lexer<Token>) -> Result<String, ()> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('0') => result.push('\0'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                _ => return Err(()),
            }
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Fieldless projection of [`Token`] used by the grammar tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    KwModule,
    KwImport,
    KwStruct,
    KwEnum,
    KwMessage,
    KwTrue,
    KwFalse,
    Primitive,
    Ident,
    Int,
    Str,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semi,
    Comma,
    Dot,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    EqEq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    Bang,
    Tilde,
    Invalid,
}

impl Token {
    /// The table-facing kind of this token
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::KwModule => TokenKind::KwModule,
            Token::KwImport => TokenKind::KwImport,
            Token::KwStruct => TokenKind::KwStruct,
            Token::KwEnum => TokenKind::KwEnum,
            Token::KwMessage => TokenKind::KwMessage,
            Token::KwTrue => TokenKind::KwTrue,
            Token::KwFalse => TokenKind::KwFalse,
            Token::Primitive(_) => TokenKind::Primitive,
            Token::Ident(_) => TokenKind::Ident,
            Token::Int(_) => TokenKind::Int,
            Token::Str(_) => TokenKind::Str,
            Token::LBrace => TokenKind::LBrace,
            Token::RBrace => TokenKind::RBrace,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::Semi => TokenKind::Semi,
            Token::Comma => TokenKind::Comma,
            Token::Dot => TokenKind::Dot,
            Token::Assign => TokenKind::Assign,
            Token::Plus => TokenKind::Plus,
            Token::Minus => TokenKind::Minus,
            Token::Star => TokenKind::Star,
            Token::Slash => TokenKind::Slash,
            Token::Percent => TokenKind::Percent,
            Token::Amp => TokenKind::Amp,
            Token::Pipe => TokenKind::Pipe,
            Token::Caret => TokenKind::Caret,
            Token::EqEq => TokenKind::EqEq,
            Token::NotEq => TokenKind::NotEq,
            Token::Lt => TokenKind::Lt,
            Token::Gt => TokenKind::Gt,
            Token::Le => TokenKind::Le,
            Token::Ge => TokenKind::Ge,
            Token::Bang => TokenKind::Bang,
            Token::Tilde => TokenKind::Tilde,
            Token::Invalid(_) => TokenKind::Invalid,
        }
    }

    /// The raw text of this token as it appeared in (or would appear in)
    /// source
    pub fn lexeme(&self) -> String {
        match self {
            Token::Primitive(p) => p.as_str().to_string(),
            Token::Ident(name) => name.clone(),
            Token::Int(text) => text.clone(),
            Token::Str(content) => format!("{:?}", content),
            Token::Invalid(text) => text.clone(),
            other => other.kind().display_str().to_string(),
        }
    }
}

impl TokenKind {
    /// Fixed display text for this kind, used in diagnostics
    pub fn display_str(&self) -> &'static str {
        match self {
            TokenKind::KwModule => "module",
            TokenKind::KwImport => "import",
            TokenKind::KwStruct => "struct",
            TokenKind::KwEnum => "enum",
            TokenKind::KwMessage => "message",
            TokenKind::KwTrue => "true",
            TokenKind::KwFalse => "false",
            TokenKind::Primitive => "primitive type",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::Str => "string literal",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::Bang => "!",
            TokenKind::Tilde => "~",
            TokenKind::Invalid => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    fn all(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            all("module import struct enum message"),
            vec![
                Token::KwModule,
                Token::KwImport,
                Token::KwStruct,
                Token::KwEnum,
                Token::KwMessage,
            ]
        );
    }

    #[test]
    fn test_primitive_vs_identifier() {
        assert_eq!(
            all("int32 int32x boolean bool"),
            vec![
                Token::Primitive(Primitive::Int32),
                Token::Ident("int32x".to_string()),
                Token::Ident("boolean".to_string()),
                Token::Primitive(Primitive::Bool),
            ]
        );
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(
            all("42 0xFF 0"),
            vec![
                Token::Int("42".to_string()),
                Token::Int("0xFF".to_string()),
                Token::Int("0".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_unescaping() {
        assert_eq!(
            all(r#""a\tb\n" "plain""#),
            vec![
                Token::Str("a\tb\n".to_string()),
                Token::Str("plain".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let results: Vec<_> = Token::lexer("\"no end").collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }

    #[test]
    fn test_bad_escape_is_error() {
        let results: Vec<_> = Token::lexer(r#""bad\q""#).collect();
        assert!(results[0].is_err());
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            all("a // line comment\n/* block\ncomment */ b"),
            vec![Token::Ident("a".to_string()), Token::Ident("b".to_string())]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            all("== != <= >= < >"),
            vec![
                Token::EqEq,
                Token::NotEq,
                Token::Le,
                Token::Ge,
                Token::Lt,
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_nested_generic_closers_stay_separate() {
        // No shift operators in the notation, so `>>` is two closers
        assert_eq!(all(">>"), vec![Token::Gt, Token::Gt]);
    }
}
