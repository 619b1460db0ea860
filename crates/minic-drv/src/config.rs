use std::path::PathBuf;

use clap::ValueEnum;
use minic_ir::Dialect;

/// The four TAC text dialects `minic-ir::printer` knows how to render
/// (spec §4.7). A separate `clap`-facing enum keeps `minic-ir` free of a
/// CLI-parsing dependency; [`DialectArg::into`] maps it onto the real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Standard,
    Quadruples,
    Triples,
    Postfix,
}

impl From<DialectArg> for Dialect {
    fn from(value: DialectArg) -> Self {
        match value {
            DialectArg::Standard => Dialect::Standard,
            DialectArg::Quadruples => Dialect::Quadruples,
            DialectArg::Triples => Dialect::Triples,
            DialectArg::Postfix => Dialect::Postfix,
        }
    }
}

/// Resolved configuration for one driver invocation, mirroring
/// `faxc-drv::Config` trimmed to MiniC's single-file, single-target scope:
/// no `output_file`/`target`/`libraries`/incremental-cache fields, since
/// none of those have a MiniC counterpart (spec §6 Non-goals).
#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: Option<PathBuf>,
    pub print_tokens: bool,
    pub print_ast: bool,
    pub print_symbol_table: bool,
    pub print_tac: bool,
    pub print_optimized: bool,
    pub codegen: bool,
    pub dialect: Dialect,
    pub verbose: bool,
}

impl Config {
    /// True when any intermediate-representation flag (or `--codegen`) was
    /// requested. Grounded on `main.py`'s `run=not any(flags.values())`: the
    /// original driver only executes `main` via the interpreter when none of
    /// these flags were passed, treating an inspection run and an execution
    /// run as mutually exclusive for one invocation.
    pub fn any_print_flag(&self) -> bool {
        self.print_tokens
            || self.print_ast
            || self.print_symbol_table
            || self.print_tac
            || self.print_optimized
            || self.codegen
    }
}
