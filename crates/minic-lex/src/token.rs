//! Token kinds produced by the lexer.

use minic_util::{Span, Symbol};

/// A lexical token and the span of source it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Every kind of token MiniC's lexer can produce.
///
/// Grouped the way `spec.md`'s pattern list groups them: keywords, literals,
/// identifier, arithmetic (`ARITH`), relational (`RELOP`), logical (`LOGIC`),
/// assignment (`ASSIGN`), single-char punctuation (`SYM`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Int,
    Float,
    Char,
    Bool,
    If,
    Else,
    For,
    While,
    Return,
    Void,
    Print,
    Read,

    // Literals and identifiers
    BoolLit(bool),
    FloatLit(f64),
    IntLit(i64),
    CharLit(char),
    StringLit(Symbol),
    Ident(Symbol),

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Relational
    Le,
    Ge,
    EqEq,
    Ne,
    Lt,
    Gt,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Assignment
    Assign,

    // Punctuation
    Semi,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    Eof,
}

impl TokenKind {
    /// Maps an identifier lexeme to its keyword `TokenKind`, if it is one.
    pub fn keyword_from_ident(ident: &str) -> Option<TokenKind> {
        Some(match ident {
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "char" => TokenKind::Char,
            "bool" => TokenKind::Bool,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "void" => TokenKind::Void,
            "print" => TokenKind::Print,
            "read" => TokenKind::Read,
            "true" => TokenKind::BoolLit(true),
            "false" => TokenKind::BoolLit(false),
            _ => return None,
        })
    }
}
