//! minic-ir - Three-address code: generation, optimization, and printing
//! (spec components C5-C8).

pub mod dag;
pub mod gen;
pub mod optimize;
pub mod printer;
pub mod tac;

pub use dag::DagBuilder;
pub use gen::generate;
pub use optimize::optimize;
pub use printer::{print_tac, Dialect};
pub use tac::Instruction;
