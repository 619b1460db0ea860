//! minic-drv - Compiler driver binary (spec §6, out of core scope but kept
//! for compatibility). Wires `minic-lex`/`minic-par`/`minic-sem`/`minic-ir`/
//! `minic-gen`/`minic-interp` together behind a `clap` CLI, mirroring how
//! `faxc-drv` + `faxt` split the same concern in the teacher workspace.

mod cli;
mod config;
mod error;
mod session;

pub use cli::Cli;
pub use config::{Config, DialectArg};
pub use error::{DriverError, Result};
pub use session::Session;

/// Initializes `tracing` with an `EnvFilter`, `debug` when `--verbose` is
/// set and `warn` otherwise. Grounded on `faxt/src/main.rs`'s `init_logging`.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false).without_time();
    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
