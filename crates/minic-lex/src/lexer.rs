//! Tokenizer: turns a MiniC source string into a stream of [`Token`]s.
//!
//! The scanning order follows `spec.md` §4.1 / the original
//! `MiniC/lexer.py`'s `TokenSpec` list exactly: whitespace and comments are
//! skipped first, then keywords and `true|false` are tried before a generic
//! identifier, then float literals before integer literals (so `1.5` isn't
//! split into `1`, `.`, `5`), then char/string literals, then identifiers,
//! then the operator and punctuation classes.

use minic_util::{Interner, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Scans `source` into a vector of tokens, always ending in `TokenKind::Eof`.
///
/// Identifiers and string literals are interned into `interner`. Bytes that
/// match none of the lexer's patterns are silently skipped, matching the
/// original implementation's master-regex alternation having no fallback
/// clause (an accepted limitation, not a bug to fix).
pub fn tokenize(source: &str, interner: &mut Interner) -> Vec<Token> {
    Lexer::new(source, interner).collect()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    interner: &'a mut Interner,
    done: bool,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, interner: &'a mut Interner) -> Self {
        Self { cursor: Cursor::new(source), interner, done: false }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();

        let start = self.cursor.position();
        let start_line = self.cursor.line();
        let start_col = self.cursor.column();

        if self.cursor.is_at_end() {
            if self.done {
                return None;
            }
            self.done = true;
            return Some(Token::new(TokenKind::Eof, Span::new(start, start, start_line, start_col)));
        }

        let c = self.cursor.current_char();
        let kind = match c {
            c if c.is_ascii_digit() => self.lex_number(),
            '\'' => self.lex_char_lit(),
            '"' => self.lex_string_lit(),
            c if is_ident_start(c) => self.lex_ident_or_keyword(),
            '+' => {
                self.cursor.advance();
                Some(TokenKind::Plus)
            }
            '-' => {
                self.cursor.advance();
                Some(TokenKind::Minus)
            }
            '*' => {
                self.cursor.advance();
                Some(TokenKind::Star)
            }
            '/' => {
                self.cursor.advance();
                Some(TokenKind::Slash)
            }
            '%' => {
                self.cursor.advance();
                Some(TokenKind::Percent)
            }
            '<' => {
                self.cursor.advance();
                Some(self.lex_maybe_eq(TokenKind::Le, TokenKind::Lt))
            }
            '>' => {
                self.cursor.advance();
                Some(self.lex_maybe_eq(TokenKind::Ge, TokenKind::Gt))
            }
            '=' => {
                self.cursor.advance();
                Some(self.lex_maybe_eq(TokenKind::EqEq, TokenKind::Assign))
            }
            '!' => {
                self.cursor.advance();
                Some(self.lex_maybe_eq(TokenKind::Ne, TokenKind::Bang))
            }
            '&' if self.cursor.char_at(1) == '&' => {
                self.cursor.advance();
                self.cursor.advance();
                Some(TokenKind::AndAnd)
            }
            '|' if self.cursor.char_at(1) == '|' => {
                self.cursor.advance();
                self.cursor.advance();
                Some(TokenKind::OrOr)
            }
            ';' => {
                self.cursor.advance();
                Some(TokenKind::Semi)
            }
            ',' => {
                self.cursor.advance();
                Some(TokenKind::Comma)
            }
            '(' => {
                self.cursor.advance();
                Some(TokenKind::LParen)
            }
            ')' => {
                self.cursor.advance();
                Some(TokenKind::RParen)
            }
            '{' => {
                self.cursor.advance();
                Some(TokenKind::LBrace)
            }
            '}' => {
                self.cursor.advance();
                Some(TokenKind::RBrace)
            }
            '[' => {
                self.cursor.advance();
                Some(TokenKind::LBracket)
            }
            ']' => {
                self.cursor.advance();
                Some(TokenKind::RBracket)
            }
            _ => {
                // Unmatched byte: skip silently (spec §4.1 failure model).
                self.cursor.advance();
                None
            }
        };

        let end = self.cursor.position();
        let span = Span::new(start, end, start_line, start_col);
        kind.map(|k| Token::new(k, span))
    }

    /// Consumes `=` if present, choosing between the two-char and one-char kind.
    fn lex_maybe_eq(&mut self, if_eq: TokenKind, otherwise: TokenKind) -> TokenKind {
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            if_eq
        } else {
            otherwise
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.char_at(1) == '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                '/' if self.cursor.char_at(1) == '*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while !self.cursor.is_at_end()
                        && !(self.cursor.current_char() == '*' && self.cursor.char_at(1) == '/')
                    {
                        self.cursor.advance();
                    }
                    if !self.cursor.is_at_end() {
                        self.cursor.advance();
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Integer or float literal. Tries the float pattern (digits `.` digits)
    /// before falling back to a plain integer, per spec §4.1's ordering.
    fn lex_number(&mut self) -> Option<TokenKind> {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        if self.cursor.current_char() == '.' && self.cursor.char_at(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            let text = self.cursor.slice_from(start);
            return Some(TokenKind::FloatLit(text.parse().unwrap_or(0.0)));
        }
        let text = self.cursor.slice_from(start);
        Some(TokenKind::IntLit(text.parse().unwrap_or(0)))
    }

    fn lex_ident_or_keyword(&mut self) -> Option<TokenKind> {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        if let Some(kw) = TokenKind::keyword_from_ident(text) {
            return Some(kw);
        }
        Some(TokenKind::Ident(self.interner.intern(text)))
    }

    /// `'c'` or `'\x'` with a single escaped character, decoded to a real
    /// control character (`\n`, `\t`, `\r`, `\0`). The source never decodes
    /// escapes — it keeps the raw two-byte `\` + letter text — but its
    /// `char` is just a 1-or-2-character Python string, while `CharLit`
    /// here holds an actual Rust `char` (see `minic-interp::Value`'s
    /// char-as-code-point design), which cannot hold two source bytes. See
    /// `SPEC_FULL.md`'s "Open Question resolutions" for the write-up.
    fn lex_char_lit(&mut self) -> Option<TokenKind> {
        self.cursor.advance(); // opening quote
        let value = if self.cursor.current_char() == '\\' {
            self.cursor.advance();
            let escaped = self.cursor.current_char();
            self.cursor.advance();
            decode_escape(escaped)
        } else {
            let c = self.cursor.current_char();
            self.cursor.advance();
            c
        };
        if self.cursor.current_char() == '\'' {
            self.cursor.advance();
        }
        Some(TokenKind::CharLit(value))
    }

    /// `"..."` interned as the raw lexeme text, backslashes included —
    /// matching the source exactly: its regex captures `\` + any character
    /// literally, and `parser.py`'s `parse_primary` only strips the
    /// surrounding quotes (`tok.value[1:-1]`), never decoding escapes. A
    /// string literal can only ever appear as a `print` argument (spec
    /// §3), never assigned to a variable, so unlike `CharLit` there is no
    /// type-system reason to decode it here.
    fn lex_string_lit(&mut self) -> Option<TokenKind> {
        self.cursor.advance(); // opening quote
        let mut raw = String::new();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '"' {
            raw.push(self.cursor.current_char());
            self.cursor.advance();
        }
        if self.cursor.current_char() == '"' {
            self.cursor.advance();
        }
        Some(TokenKind::StringLit(self.interner.intern(&raw)))
    }
}

fn decode_escape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.cursor.is_at_end() && self.done {
                return None;
            }
            match self.next_token() {
                Some(tok) => return Some(tok),
                None => {
                    if self.done {
                        return None;
                    }
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut interner = Interner::new();
        tokenize(source, &mut interner).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_keywords_and_identifiers_distinctly() {
        let mut interner = Interner::new();
        let toks = tokenize("int intvalue", &mut interner);
        assert_eq!(toks[0].kind, TokenKind::Int);
        match toks[1].kind {
            TokenKind::Ident(sym) => assert_eq!(interner.resolve(sym), "intvalue"),
            other => panic!("expected Ident, got {:?}", other),
        }
    }

    #[test]
    fn float_literal_wins_over_int_dot_int() {
        assert_eq!(kinds("3.14"), vec![TokenKind::FloatLit(3.14), TokenKind::Eof]);
    }

    #[test]
    fn bool_literals_are_keywords_not_identifiers() {
        assert_eq!(
            kinds("true false"),
            vec![TokenKind::BoolLit(true), TokenKind::BoolLit(false), TokenKind::Eof]
        );
    }

    #[test]
    fn logical_and_relational_operators_are_distinguished() {
        assert_eq!(
            kinds("&& || ! <= >= == != < >"),
            vec![
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Bang,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::EqEq,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_are_discarded() {
        let mut interner = Interner::new();
        let toks = tokenize("int // trailing comment\n  x; /* block\ncomment */ ;", &mut interner);
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        match kinds[1] {
            TokenKind::Ident(sym) => assert_eq!(interner.resolve(sym), "x"),
            other => panic!("expected Ident, got {:?}", other),
        }
        assert_eq!(
            (kinds[0], kinds[2], kinds[3], kinds[4]),
            (TokenKind::Int, TokenKind::Semi, TokenKind::Semi, TokenKind::Eof)
        );
    }

    #[test]
    fn unmatched_byte_is_skipped_silently() {
        assert_eq!(kinds("1 ` 2"), vec![TokenKind::IntLit(1), TokenKind::IntLit(2), TokenKind::Eof]);
    }

    #[test]
    fn char_literal_decodes_escape() {
        assert_eq!(kinds("'\\n'"), vec![TokenKind::CharLit('\n'), TokenKind::Eof]);
    }

    #[test]
    fn string_literal_is_interned_with_escapes_left_raw() {
        let mut interner = Interner::new();
        let toks = tokenize("\"hi\\n\"", &mut interner);
        match toks[0].kind {
            TokenKind::StringLit(sym) => assert_eq!(interner.resolve(sym), "hi\\n"),
            other => panic!("expected StringLit, got {:?}", other),
        }
    }
}
