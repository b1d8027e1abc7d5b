//! Audit command - Migration readiness report
//!
//! Reports every configured variable (redacted when sensitive), the overall
//! verdict, advisory connection-string checks and the next steps.

use anyhow::Result;
use config::{AuditProfile, AuditReport, EnvSnapshot};
use serde_json::json;
use std::io::{self, Write};

use super::{Outcome, RunContext};
use crate::output;

const TITLE: &str = "Pandal Navigator - MongoDB Atlas Migration Check";

pub fn run(ctx: &RunContext) -> Result<Outcome> {
    let report = audit_configuration(&ctx.profile, &ctx.snapshot);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report_json(&report))?)?;
    } else {
        render_report(&mut out, &report)?;
    }

    Ok(if report.verdict.all_passed {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}

pub fn audit_configuration(profile: &AuditProfile, snapshot: &EnvSnapshot) -> AuditReport {
    config::audit(profile, snapshot)
}

pub fn render_report<W: Write>(w: &mut W, report: &AuditReport) -> io::Result<()> {
    output::header(w, TITLE)?;
    writeln!(w)?;

    output::subheader(w, "Environment Variables")?;
    let width = report
        .checks
        .entries()
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);
    for entry in report.checks.entries() {
        let line = format!("{:<width$}  {}", entry.name, entry.display_value());
        if entry.is_present() || entry.required {
            output::check(w, entry.is_present(), &line)?;
        } else {
            writeln!(w, "  - {line} (optional)")?;
        }
    }
    writeln!(w)?;

    output::subheader(w, "Summary")?;
    if report.verdict.all_passed {
        output::success(w, "All required environment variables are set. Ready for migration!")?;
    } else {
        output::failure(
            w,
            &format!(
                "Missing required environment variables: {}",
                report.verdict.missing_required.join(", ")
            )
        )?;
        output::hint(
            w,
            &format!("See {} for setup instructions", report.target.setup_guide)
        )?;
    }
    writeln!(w)?;

    if let Some(cs) = &report.connection_string {
        output::subheader(w, "Connection String")?;
        output::check(
            w,
            cs.uses_expected_scheme,
            &format!("Uses {} scheme", report.target.scheme)
        )?;
        output::check(
            w,
            cs.references_database,
            &format!("References database '{}'", report.target.database)
        )?;
        if !cs.looks_valid() {
            output::warn(
                w,
                &format!(
                    "Double-check the {} format in your Atlas dashboard",
                    report.target.uri_variable
                )
            )?;
        }
        writeln!(w)?;
    }

    output::subheader(w, "Next Steps")?;
    output::numbered(w, &next_steps(report))?;

    Ok(())
}

pub fn next_steps(report: &AuditReport) -> Vec<String> {
    if report.target_configured() {
        vec![
            "Run the data migration to MongoDB Atlas".to_string(),
            "Test the application against the Atlas cluster".to_string(),
            "Deploy".to_string()
        ]
    } else {
        vec![
            format!("Complete the setup in {}", report.target.setup_guide),
            format!("Add {} to your .env file", report.target.uri_variable),
            "Re-run this check: atlas-check".to_string()
        ]
    }
}

pub fn report_json(report: &AuditReport) -> serde_json::Value {
    json!({
        "allPassed": report.verdict.all_passed,
        "missingRequired": report.verdict.missing_required,
        "checks": report.checks.entries().iter().map(|e| json!({
            "name": e.name,
            "description": e.description,
            "required": e.required,
            "sensitive": e.sensitive,
            "present": e.is_present(),
            "value": e.display_value()
        })).collect::<Vec<_>>(),
        "connectionString": report.connection_string,
        "target": {
            "variable": report.target.uri_variable,
            "scheme": report.target.scheme,
            "database": report.target.database
        },
        "nextSteps": next_steps(report),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}
