use minic_util::Span;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{span}: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String, span: Span },

    #[error("{span}: unexpected token {found}")]
    UnexpectedPrimary { found: String, span: Span },

    #[error("{span}: read()'s argument must be a variable name")]
    ReadArgNotIdent { span: Span },
}

pub type Result<T> = std::result::Result<T, ParserError>;
