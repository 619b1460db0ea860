use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, DialectArg};

/// Command-line surface for the MiniC compiler driver (spec §6):
/// `compiler [file] [--tokens] [--ast] [--symbol-table] [--tac]
/// [--optimized] [--codegen]`, plus `--format` for the TAC dialect. Grounded
/// on the teacher workspace's sibling CLI (`faxt/src/main.rs`)'s `clap`
/// derive usage — no `env` attributes here, since spec §6 explicitly rules
/// out environment-variable configuration.
#[derive(Parser, Debug)]
#[command(name = "minic")]
#[command(author = "MiniC Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MiniC compiler driver", long_about = None)]
pub struct Cli {
    /// MiniC source file. Omit it to see a "no input file" message.
    pub file: Option<PathBuf>,

    /// Print the token stream.
    #[arg(long)]
    pub tokens: bool,

    /// Print the parsed AST.
    #[arg(long)]
    pub ast: bool,

    /// Print each function's resolved signature.
    #[arg(long = "symbol-table")]
    pub symbol_table: bool,

    /// Print generated three-address code.
    #[arg(long)]
    pub tac: bool,

    /// Print optimized three-address code.
    #[arg(long)]
    pub optimized: bool,

    /// Generate and print pseudo-assembly, writing it alongside the input.
    #[arg(long)]
    pub codegen: bool,

    /// TAC dialect used by --tac/--optimized.
    #[arg(long, value_enum, default_value_t = DialectArg::Standard)]
    pub format: DialectArg,

    /// Emit per-phase progress on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            input_file: self.file,
            print_tokens: self.tokens,
            print_ast: self.ast,
            print_symbol_table: self.symbol_table,
            print_tac: self.tac,
            print_optimized: self.optimized,
            codegen: self.codegen,
            dialect: self.format.into(),
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_file_argument() {
        let cli = Cli::parse_from(["minic", "prog.mc"]);
        assert_eq!(cli.file, Some(PathBuf::from("prog.mc")));
        assert!(!cli.tokens && !cli.codegen);
    }

    #[test]
    fn parses_print_flags_and_dialect() {
        let cli = Cli::parse_from(["minic", "prog.mc", "--tac", "--format", "triples"]);
        assert!(cli.tac);
        assert_eq!(cli.format, DialectArg::Triples);
    }

    #[test]
    fn file_argument_is_optional() {
        let cli = Cli::parse_from(["minic"]);
        assert_eq!(cli.file, None);
    }
}
