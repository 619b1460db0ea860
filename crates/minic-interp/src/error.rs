use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpError {
    #[error("no main function defined")]
    MissingMain,

    #[error("assignment to undeclared variable '{0}'")]
    AssignUndeclared(String),

    #[error("use of undeclared variable '{0}'")]
    UndeclaredVariable(String),

    #[error("call to undefined function '{0}'")]
    UndefinedFunction(String),

    #[error("read() expects a variable")]
    ReadExpectsVariable,

    #[error("read() on undeclared variable '{0}'")]
    ReadUndeclaredVariable(String),

    #[error("use of uninitialized variable '{0}'")]
    UninitializedVariable(String),

    #[error("call to '{0}' produced no value but one was required")]
    VoidValueUsed(String),

    #[error("operator '{op}' cannot apply to these operand types")]
    InvalidOperands { op: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InterpError>;
