//! minic-interp - Tree-walking interpreter, supplementing the core pipeline
//! (spec §1: "A tree-walking interpreter is also available").

mod error;
mod interp;
mod value;

pub use error::{InterpError, Result};
pub use interp::Interpreter;
pub use value::Value;
