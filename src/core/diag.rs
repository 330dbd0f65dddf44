//! Verbose diagnostics on stderr
//!
//! stdout belongs to the forwarded program, so everything here goes to stderr.

use colored::Colorize;
use std::fmt::Display;

/// Emits diagnostic lines when enabled
#[derive(Debug, Clone, Copy, Default)]
pub struct Diag {
    verbose: bool,
}

impl Diag {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Informational line, only in verbose mode
    pub fn note(&self, message: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "azd-imposter:".cyan().bold(), message);
        }
    }

    /// Something was skipped or ignored, only in verbose mode
    pub fn warn(&self, message: impl Display) {
        if self.verbose {
            eprintln!("{} {}", "azd-imposter: warning:".yellow().bold(), message);
        }
    }
}
