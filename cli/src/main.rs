use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use normcheck_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Subscriber may not be installed yet when config loading fails
            let _ = writeln!(std::io::stderr(), "Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = normcheck_evaluator::VERSION, "normcheck starting");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    cli.run(&config, stdin.lock(), std::io::stderr(), &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
