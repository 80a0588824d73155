//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::ProjectConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;
}

// ── Interactive Selection Port ────────────────────────────────────────────────

/// One entry offered to a [`TargetSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value returned when this entry is chosen.
    pub key: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Single-choice selection between several options.
///
/// Only consulted when there is a real choice (more than one option).
pub trait TargetSelector {
    /// Return the `key` of the chosen option.
    ///
    /// # Errors
    ///
    /// Returns an error if no choice can be made (no TTY, non-interactive
    /// session, user abort).
    fn select_one(&self, prompt: &str, options: &[SelectOption]) -> Result<String>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading the project configuration.
pub trait ConfigStore {
    /// Load and validate the configuration for the project at `project_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or invalid.
    fn load(&self, project_root: &Path) -> Result<ProjectConfig>;
    /// Path the configuration is read from.
    fn path(&self, project_root: &Path) -> PathBuf;
}
