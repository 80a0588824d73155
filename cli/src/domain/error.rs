//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::fmt;

use thiserror::Error;

use crate::domain::simulator::DeviceState;

// ── Target errors ─────────────────────────────────────────────────────────────

/// Errors raised while discovering or resolving a simulator target.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Unable to query iOS simulators: {detail}")]
    ToolchainQuery { detail: String },

    #[error("Invalid simulator UDID {0}")]
    UnknownTarget(String),

    #[error("{}", no_targets_message(.runtime.as_deref()))]
    NoTargetsAvailable { runtime: Option<String> },
}

fn no_targets_message(runtime: Option<&str>) -> String {
    match runtime {
        Some(version) => format!("No simulators available for iOS {version}."),
        None => "No iOS simulators available.".to_string(),
    }
}

// ── Device lifecycle errors ───────────────────────────────────────────────────

/// Errors raised while bringing a simulator into a usable state.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Unable to boot {device} simulator running iOS {runtime} (UDID {udid}): {detail}")]
    Boot {
        udid: String,
        runtime: String,
        device: String,
        detail: String,
    },

    #[error(
        "Timed out after {waited_secs}s waiting for {device} simulator running iOS {runtime} \
         (UDID {udid}) to settle; last state: {last_state}"
    )]
    BootTimeout {
        udid: String,
        runtime: String,
        device: String,
        waited_secs: u64,
        last_state: DeviceState,
    },
}

// ── Pipeline step errors ──────────────────────────────────────────────────────

/// Identity of a failed step: which app, on which target, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub app: String,
    pub runtime: String,
    pub device: String,
    pub detail: String,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} running iOS {}",
            self.app, self.device, self.runtime
        )?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

/// Errors raised by the build and run pipeline steps.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Unable to open simulator for app {0}")]
    SimulatorOpen(StepFailure),

    #[error("Unable to uninstall old version of app {0}")]
    Uninstall(StepFailure),

    #[error("Unable to install new version of app {0}")]
    Install(StepFailure),

    #[error("Unable to launch app {0}")]
    Launch(StepFailure),

    #[error("Unable to build app {0}")]
    BuildFailed(StepFailure),
}

impl StepError {
    /// Short machine-readable name of the failed step.
    #[must_use]
    pub fn step(&self) -> &'static str {
        match self {
            Self::SimulatorOpen(_) => "open",
            Self::Uninstall(_) => "uninstall",
            Self::Install(_) => "install",
            Self::Launch(_) => "launch",
            Self::BuildFailed(_) => "build",
        }
    }

    /// The app/target identity carried by this error.
    #[must_use]
    pub fn failure(&self) -> &StepFailure {
        match self {
            Self::SimulatorOpen(f)
            | Self::Uninstall(f)
            | Self::Install(f)
            | Self::Launch(f)
            | Self::BuildFailed(f) => f,
        }
    }
}

// ── Session errors ────────────────────────────────────────────────────────────

/// The user pressed Ctrl-C while the session was waiting on them.
#[derive(Debug, Error)]
#[error("Interrupted.")]
pub struct Interrupted;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to the project configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No project configuration found at {0}\n\nCreate a simdrive.yaml or set SIMDRIVE_CONFIG.")]
    NotFound(String),

    #[error("Missing required setting: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
