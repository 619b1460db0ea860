use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced at the driver boundary: every phase error plus the I/O
/// the core pipeline never touches (spec §5 "the core owns no file handles").
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("could not read '{path}'")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] minic_par::ParserError),

    #[error(transparent)]
    Semantic(#[from] minic_sem::SemanticError),

    #[error(transparent)]
    Interp(#[from] minic_interp::InterpError),

    #[error("could not write assembly to '{path}'")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DriverError>;
