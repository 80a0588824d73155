//! Spinner shown while `simctl` enumerates simulators.

#![allow(clippy::expect_used)] // Template is a compile-time constant

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::output::OutputContext;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// Start a spinner for the catalog query, or `None` when stdout is not a
/// TTY or output is quiet. Callers clear it with `finish_and_clear`.
///
/// # Panics
///
/// Panics if the spinner template string is invalid (it is a compile-time constant and will not panic).
#[must_use]
pub fn catalog_spinner(ctx: &OutputContext) -> Option<ProgressBar> {
    if !ctx.show_progress() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(TICKS)
            .template("  {spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message("querying simulators...");
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}
