//! Test command - Live connectivity probe
//!
//! Opens exactly one connection to the migration target, reports the
//! database and host it answered with, and closes it again.

use anyhow::Result;
use clap::Args;
use config::MigrationTarget;
use serde_json::json;
use std::io::{self, Write};
use std::time::Duration;
use storage::{ConnectionProbeResult, MongoConnector, probe_connection};

use super::{Outcome, RunContext};
use crate::output;

#[derive(Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// Give up server selection after this many seconds (default: driver default)
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>
}

pub async fn run(ctx: &RunContext, args: ProbeArgs) -> Result<Outcome> {
    let mut connector = MongoConnector::new();
    if let Some(secs) = args.timeout_secs {
        connector = connector.with_server_selection_timeout(Duration::from_secs(secs));
    }

    let target = &ctx.profile.target;
    let result = probe_connection(&ctx.snapshot, target, &connector).await;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.json {
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&result_json(target, &result))?
        )?;
    } else {
        render_result(&mut out, target, &result)?;
    }

    Ok(outcome(&result))
}

pub fn outcome(result: &ConnectionProbeResult) -> Outcome {
    match result {
        ConnectionProbeResult::Success { .. } => Outcome::Passed,
        ConnectionProbeResult::Failure { .. } => Outcome::Failed,
        ConnectionProbeResult::NotConfigured => Outcome::NotConfigured
    }
}

pub fn render_result<W: Write>(
    w: &mut W,
    target: &MigrationTarget,
    result: &ConnectionProbeResult
) -> io::Result<()> {
    output::header(w, "MongoDB Atlas Connection Test")?;
    writeln!(w)?;

    match result {
        ConnectionProbeResult::NotConfigured => {
            output::warn(w, &format!("{} is not set", target.uri_variable))?;
            output::hint(
                w,
                &format!(
                    "Add {} to your .env file (see {}), then re-run: atlas-check test",
                    target.uri_variable, target.setup_guide
                )
            )?;
        }
        ConnectionProbeResult::Success {
            database_name,
            host
        } => {
            output::success(w, "Connected to MongoDB")?;
            writeln!(w, "  Database: {}", database_name)?;
            writeln!(w, "  Host:     {}", host)?;
        }
        ConnectionProbeResult::Failure { message } => {
            output::failure(w, "Connection failed")?;
            writeln!(w, "  {}", message)?;
            writeln!(w)?;
            output::hint(
                w,
                "Check that your IP address is on the Atlas network access list"
            )?;
            output::hint(
                w,
                &format!(
                    "Verify the username, password and cluster host in {}",
                    target.uri_variable
                )
            )?;
        }
    }

    Ok(())
}

pub fn result_json(target: &MigrationTarget, result: &ConnectionProbeResult) -> serde_json::Value {
    json!({
        "variable": target.uri_variable,
        "result": result,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}
