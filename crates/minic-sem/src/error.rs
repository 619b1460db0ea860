use minic_util::Span;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("{span}: duplicate function '{name}'")]
    DuplicateFunction { name: String, span: Span },

    #[error("no main function defined")]
    MissingMain,

    #[error("{span}: variable '{name}' already declared")]
    DuplicateVariable { name: String, span: Span },

    #[error("{span}: type mismatch initializing '{name}': {dest} <- {src}")]
    InitTypeMismatch { name: String, dest: &'static str, src: &'static str, span: Span },

    #[error("{span}: assignment to undeclared variable '{name}'")]
    AssignUndeclared { name: String, span: Span },

    #[error("{span}: type mismatch in assignment to '{name}': {dest} <- {src}")]
    AssignTypeMismatch { name: String, dest: &'static str, src: &'static str, span: Span },

    #[error("{span}: condition must be bool, got {found}")]
    ConditionNotBool { found: &'static str, span: Span },

    #[error("{span}: missing return value for non-void function")]
    MissingReturnValue { span: Span },

    #[error("{span}: return type mismatch: expected {expected}, got {found}")]
    ReturnTypeMismatch { expected: &'static str, found: &'static str, span: Span },

    #[error("{span}: call to undefined function '{name}'")]
    UndefinedFunction { name: String, span: Span },

    #[error("{span}: use of undeclared variable '{name}'")]
    UndeclaredVariable { name: String, span: Span },

    #[error("{span}: '!' operator needs bool, got {found}")]
    NotRequiresBool { found: &'static str, span: Span },

    #[error("{span}: read() expects a variable")]
    ReadExpectsVariable { span: Span },

    #[error("{span}: read() on undeclared variable '{name}'")]
    ReadUndeclaredVariable { name: String, span: Span },
}

pub type Result<T> = std::result::Result<T, SemanticError>;
