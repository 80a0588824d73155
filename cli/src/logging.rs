//! Diagnostic tracing for debugging toolchain interaction.
//!
//! - **Tracing (this module)**: every external command with its argv and exit
//!   status, each boot-poll iteration. Output goes to stderr, controlled by
//!   `RUST_LOG` or `--verbose`.
//!
//! - **Progress output (`output::TerminalReporter`)**: the user-facing step
//!   messages on stdout. Always shown unless `--quiet` or `--json`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used for `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "simdrive_cli=debug";

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output for
/// this crate, and the default is `warn`.
///
/// # Example
/// ```bash
/// RUST_LOG=simdrive_cli=trace simdrive run
/// ```
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { "warn" })
    });

    // A subscriber may already be installed (tests); keep the first one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
