use colored::Colorize;
use config::ProfileError;
use errors::EnvironmentError;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use crate::output;

/// Setup error rendered with remediation steps instead of a bare message.
///
/// Raised while loading the run context, before any report is printed.
#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub fixes: Vec<String>,
    pub try_command: Option<String>
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            fixes: Vec::new(),
            try_command: None
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, step: impl Into<String>) -> Self {
        self.fixes.push(step.into());
        self
    }

    pub fn suggest(mut self, command: impl Into<String>) -> Self {
        self.try_command = Some(command.into());
        self
    }

    pub fn render<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{} {}", "error:".red().bold(), self.what.bold())?;
        if let Some(why) = &self.why {
            writeln!(w, "       {}", why.dimmed())?;
        }

        if !self.fixes.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", "How to fix:".yellow().bold())?;
            output::numbered(w, &self.fixes)?;
        }

        if let Some(command) = &self.try_command {
            writeln!(w)?;
            writeln!(w, "{}", "Try this:".green().bold())?;
            writeln!(w, "  $ {}", command.cyan())?;
        }
        Ok(())
    }

    /// Print to stderr; the report streams stay untouched.
    pub fn display(&self) {
        let stderr = io::stderr();
        let mut err = stderr.lock();
        if self.render(&mut err).is_err() {
            output::stderr_error(&self.what);
        }
    }
}

impl fmt::Display for UxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.what)
    }
}

impl std::error::Error for UxError {}

pub fn env_file(err: &EnvironmentError) -> UxError {
    match err {
        EnvironmentError::FileNotFound { path } => {
            UxError::new(format!("Environment file '{}' not found", path))
                .why("--env-file must point at an existing dotenv file")
                .fix("Check the path passed to --env-file")
                .fix("Or omit --env-file to read ./.env when it exists")
                .suggest("atlas-check --env-file .env")
        }
        EnvironmentError::Malformed { path, reason } => {
            UxError::new(format!("Environment file '{}' could not be parsed", path))
                .why(reason.clone())
                .fix("Use one KEY=value pair per line")
                .fix("Quote values containing spaces or '#'")
        }
        EnvironmentError::Io { path, reason } => {
            UxError::new(format!("Environment file '{}' could not be read", path))
                .why(reason.clone())
                .fix("Check the file permissions")
        }
    }
}

pub fn profile(path: &Path, err: &ProfileError) -> UxError {
    let base = UxError::new(format!("Audit profile '{}' is unusable", path.display()))
        .why(err.to_string());

    match err {
        ProfileError::FileNotFound(_) => base
            .fix("Check the path passed to --profile")
            .fix("Or omit --profile to use the built-in Pandal Navigator checks"),
        ProfileError::NoExtension | ProfileError::UnsupportedFormat(_) => {
            base.fix("Use a .toml, .yaml or .yml profile file")
        }
        ProfileError::TomlParse(_) | ProfileError::YamlParse(_) => {
            base.fix("Fix the syntax error reported above")
        }
        ProfileError::Invalid(_) => base
            .fix("List at least one check under [[checks]]")
            .fix("Give every check a unique, non-empty name")
            .fix("List the target uri_variable as a required check")
            .fix("Leave target fields unset rather than empty to use the defaults")
    }
}
