use std::io;
use std::path::{Path, PathBuf};

use minic_interp::{Interpreter, Value};
use minic_util::Interner;

use crate::config::Config;
use crate::error::{DriverError, Result};

/// A single compiler invocation: owns the interner and configuration for
/// one run, mirroring `faxc-drv::Session` trimmed to spec §5's "no shared
/// mutable state between two compilations" (one `Session` per process run,
/// no incremental cache, no multi-file source map).
pub struct Session {
    pub config: Config,
    interner: Interner,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, interner: Interner::new() }
    }

    /// Reads `path`, runs the full pipeline, and returns the interpreter's
    /// result (the value `main` returned, if any) unless an inspection flag
    /// suppressed execution (see [`Config::any_print_flag`]).
    pub fn compile_file(&mut self, path: &Path) -> Result<Option<Value>> {
        if self.config.verbose {
            eprintln!("reading: {}", path.display());
        }
        let source = std::fs::read_to_string(path)
            .map_err(|source| DriverError::ReadSource { path: path.to_path_buf(), source })?;
        self.compile_and_run(&source, Some(path))
    }

    pub fn compile_and_run(&mut self, source: &str, filename: Option<&Path>) -> Result<Option<Value>> {
        tracing::debug!("tokenizing source");
        let tokens = minic_lex::tokenize(source, &mut self.interner);
        if self.config.print_tokens {
            print_indented("Tokens:", &tokens.iter().map(|t| format!("{t:?}")).collect::<Vec<_>>().join("\n"));
        }

        tracing::debug!("parsing token stream");
        let program = minic_par::parse(tokens, &mut self.interner)?;
        if self.config.print_ast {
            println!("AST:");
            println!("{:#?}", program);
            println!();
        }

        tracing::debug!("running semantic analysis");
        minic_sem::analyze(&program, &self.interner)?;
        if self.config.print_symbol_table {
            let lines: Vec<String> = program
                .functions
                .iter()
                .map(|f| {
                    let params = f
                        .params
                        .iter()
                        .map(|p| format!("{} {}", p.ty.as_str(), self.interner.resolve(p.name)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{}: {}({})", self.interner.resolve(f.name), f.ret_type.as_str(), params)
                })
                .collect();
            print_indented("Functions:", &lines.join("\n"));
        }

        tracing::debug!("generating three-address code");
        let tac = minic_ir::generate(&program, &self.interner);
        if self.config.print_tac {
            print_indented("TAC:", &minic_ir::print_tac(&tac, self.config.dialect));
        }

        tracing::debug!("optimizing three-address code");
        let optimized = minic_ir::optimize(tac);
        if self.config.print_optimized {
            print_indented("Optimized TAC:", &minic_ir::print_tac(&optimized, self.config.dialect));
        }

        if self.config.codegen {
            tracing::debug!("generating pseudo-assembly");
            let assembly = minic_gen::generate(&optimized);
            println!("Generated Assembly:");
            println!("{assembly}");
            let out_path = output_path(filename);
            std::fs::write(&out_path, &assembly)
                .map_err(|source| DriverError::WriteOutput { path: out_path.clone(), source })?;
            println!("Assembly written to {}", out_path.display());
        }

        if self.config.any_print_flag() {
            return Ok(None);
        }

        tracing::debug!("running the interpreter");
        let interp = Interpreter::new(&program, &self.interner);
        let mut stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        let result = interp.run(&mut stdin, &mut stdout)?;
        Ok(result)
    }
}

fn print_indented(label: &str, body: &str) {
    println!("{label}");
    for line in body.lines() {
        println!("  {line}");
    }
    println!();
}

/// `--codegen`'s output path: the input file with its extension replaced by
/// `.out`, or `output.out` with no input file (spec §6). The original
/// (`main.py`) does `filename.replace('.mc', '.out')`, a naive substring
/// replace that would mangle a path like `a.mc/b.mc`; `Path::with_extension`
/// gives the same result for every well-formed input without that hazard.
fn output_path(filename: Option<&Path>) -> PathBuf {
    match filename {
        Some(path) => path.with_extension("out"),
        None => PathBuf::from("output.out"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_replaces_the_extension() {
        assert_eq!(output_path(Some(Path::new("prog.mc"))), PathBuf::from("prog.out"));
    }

    #[test]
    fn output_path_defaults_when_no_file_given() {
        assert_eq!(output_path(None), PathBuf::from("output.out"));
    }
}
