//! minic-sem - Semantic analysis (spec component C4).

mod analysis;
mod error;
mod scope;

pub use analysis::analyze;
pub use error::{Result, SemanticError};
pub use scope::{ScopeTree, SymbolInfo, SymbolKind};
