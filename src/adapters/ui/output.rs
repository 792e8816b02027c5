//! Colored status lines and headers.

use crossterm::style::Stylize;
use std::io::Write;

/// Writes user-facing messages to any sink (stdout in the binary, a buffer in tests).
/// Write errors are ignored: there is nowhere left to report them.
pub struct Printer<W: Write> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn success(&mut self, message: &str) {
        let _ = writeln!(self.out, "{} {}", "✔".green().bold(), message.green().bold());
    }

    pub fn error(&mut self, message: &str) {
        let _ = writeln!(self.out, "{} {}", "✘".red().bold(), message.red().bold());
    }

    pub fn warning(&mut self, message: &str) {
        let _ = writeln!(self.out, "{} {}", "!".yellow().bold(), message.yellow().bold());
    }

    pub fn info(&mut self, message: &str) {
        let _ = writeln!(self.out, "{} {}", "i".blue().bold(), message.blue().bold());
    }

    /// Boxed title line for the start of each command.
    pub fn header(&mut self, title: &str) {
        let bar = "─".repeat(title.chars().count() + 2);
        let _ = writeln!(self.out, "{}", format!("┌{}┐", bar).blue());
        let _ = writeln!(self.out, "{} {} {}", "│".blue(), title.bold(), "│".blue());
        let _ = writeln!(self.out, "{}", format!("└{}┘", bar).blue());
    }

    /// `label: value` detail line.
    pub fn field(&mut self, label: &str, value: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{} {}", format!("{}:", label).bold(), value);
    }

    pub fn raw(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
    }
}
