//! Terminal styling shared by the report renderers.
//!
//! Every helper writes to a caller-supplied sink so reports can be captured
//! in tests; `stderr_*` variants are for messages outside the report.

use colored::Colorize;
use std::io::{self, Write};

pub fn header<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "{}", title.bold().underline())
}

pub fn subheader<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "{}", title.bold())
}

pub fn hint<W: Write>(w: &mut W, msg: &str) -> io::Result<()> {
    writeln!(w, "{} {}", "hint:".cyan().bold(), msg.dimmed())
}

pub fn warn<W: Write>(w: &mut W, msg: &str) -> io::Result<()> {
    writeln!(w, "{} {}", "warning:".yellow().bold(), msg)
}

pub fn success<W: Write>(w: &mut W, msg: &str) -> io::Result<()> {
    writeln!(w, "{} {}", "✓".green().bold(), msg)
}

pub fn failure<W: Write>(w: &mut W, msg: &str) -> io::Result<()> {
    writeln!(w, "{} {}", "✗".red().bold(), msg)
}

/// Indented pass/fail line.
pub fn check<W: Write>(w: &mut W, passed: bool, msg: &str) -> io::Result<()> {
    let mark = if passed { "✓".green() } else { "✗".red() };
    writeln!(w, "  {} {}", mark, msg)
}

pub fn numbered<W: Write>(w: &mut W, items: &[String]) -> io::Result<()> {
    for (i, item) in items.iter().enumerate() {
        writeln!(w, "  {}. {}", i + 1, item)?;
    }
    Ok(())
}

pub fn stderr_error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

#[cfg(test)]
pub(crate) fn plain() {
    colored::control::set_override(false);
}
