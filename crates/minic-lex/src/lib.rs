//! minic-lex - Lexical analysis for MiniC (spec component C1).
//!
//! Turns a source string into a flat token stream. There is no lexical
//! error type: per spec §4.1, a byte matching none of the lexer's patterns
//! is skipped rather than rejected, so tokenizing never fails.

mod cursor;
mod lexer;
mod token;

pub use lexer::tokenize;
pub use token::{Token, TokenKind};
