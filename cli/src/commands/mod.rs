pub mod audit;
pub mod probe;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use config::{AuditProfile, EnvSnapshot};
use std::path::PathBuf;
use tracing::debug;

use crate::ux_error;

/// Exit status for setup and usage errors.
pub const SETUP_ERROR_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "atlas-check",
    author,
    version,
    about = "Pandal Navigator - MongoDB Atlas migration readiness check",
    long_about = "Checks that the environment is ready for the MongoDB Atlas migration.\n\nRuns the \
                  configuration audit by default. Variables are read from the process \
                  environment and ./.env (process values win)."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Dotenv file to merge into the environment (default: ./.env if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Audit profile (.toml/.yaml) replacing the built-in checks
    #[arg(long, global = true, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(about = "Check required environment variables (default)")]
    Audit,

    #[command(
        name = "test",
        visible_alias = "probe",
        about = "Open one connection to the Atlas cluster and report the result"
    )]
    Probe(probe::ProbeArgs)
}

/// How a command finished, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    NotConfigured
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Passed => 0,
            Outcome::Failed => 1,
            Outcome::NotConfigured => 3
        }
    }
}

/// Inputs shared by every command, built once at startup.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub snapshot: EnvSnapshot,
    pub profile: AuditProfile,
    pub json: bool
}

impl RunContext {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let snapshot = config::load_snapshot(global.env_file.as_deref())
            .map_err(|e| ux_error::env_file(&e))?;

        let profile = match &global.profile {
            Some(path) => {
                config::load_from_file(path).map_err(|e| ux_error::profile(path, &e))?
            }
            None => AuditProfile::default()
        };

        debug!(
            variables = snapshot.len(),
            checks = profile.checks.len(),
            target = %profile.target.uri_variable,
            "Run context loaded"
        );

        Ok(Self {
            snapshot,
            profile,
            json: global.json
        })
    }
}

pub async fn run(cli: Cli) -> Result<Outcome> {
    let ctx = RunContext::load(&cli.global)?;

    match cli.command.unwrap_or(Commands::Audit) {
        Commands::Audit => audit::run(&ctx),
        Commands::Probe(args) => probe::run(&ctx, args).await
    }
}
