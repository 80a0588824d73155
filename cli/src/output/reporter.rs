//! `TerminalReporter` — prints pipeline progress for the build/run services.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Prints `→` for each pipeline step and `✓` when one completes.
///
/// Silent when `ctx.quiet`, which `--json` implies.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    fn line(&self, marker: &str, style: owo_colors::Style, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", marker.style(style));
        }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.line("→", self.ctx.styles.info, message);
    }

    fn success(&self, message: &str) {
        self.line("✓", self.ctx.styles.success, message);
    }
}
