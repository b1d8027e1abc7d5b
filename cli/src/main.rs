use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
pub mod ux_error;

use commands::{Cli, SETUP_ERROR_EXIT_CODE};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so the report (and --json) stays alone on stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            match e.downcast_ref::<ux_error::UxError>() {
                Some(ux) => ux.display(),
                None => output::stderr_error(&format!("{e:#}"))
            }
            ExitCode::from(SETUP_ERROR_EXIT_CODE)
        }
    }
}
