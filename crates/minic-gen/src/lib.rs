//! minic-gen - Stack pseudo-assembly code generation (spec component C9).

mod asm;

pub use asm::generate;
