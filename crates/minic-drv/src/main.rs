use clap::Parser;
use minic_drv::{init_logging, Cli, Session};

/// Returning `anyhow::Result` here (rather than hand-rolling an `ExitCode`
/// match) mirrors `faxc-drv`/`faxt`'s driver `main`: a phase error becomes a
/// single `anyhow::Error` at the binary boundary and the runtime prints it
/// and exits non-zero, satisfying spec §7's "non-zero ... with a
/// human-readable message" without a manual exit-code match here.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(file) = cli.file.clone() else {
        println!("No input file specified.");
        return Ok(());
    };

    let mut session = Session::new(cli.into_config());
    session
        .compile_file(&file)
        .map_err(|err| anyhow::anyhow!("Compilation/Runtime error: {err}"))?;
    Ok(())
}
