//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix)
pub fn warning<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", "Warning".yellow(), msg)
}

/// Print success status indented (green checkmark with leading spaces)
pub fn success_detail<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "  {} {}", "✓".green(), msg)
}

/// Print failure status (red X, indented)
pub fn failure<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "  {} {}", "✗".red(), msg)
}

/// Print labelled value (green label)
pub fn action<W: Write>(out: &mut W, label: &str, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}

/// Print section header (cyan bold)
pub fn header<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Print plain output (no color, for tree drawings and data)
pub fn info<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Print prompt without newline (cyan)
pub fn prompt<W: Write>(out: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    write!(out, "{} ", msg.to_string().cyan())?;
    out.flush()
}
