//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed JSON document on
//! stdout: a result object on success, or the error object below on failure.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{
    Catalog, ConfigError, DeviceError, Interrupted, ResolvedTarget, StepError, TargetError,
};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable machine-readable code for a command failure.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<TargetError>() {
        return match e {
            TargetError::ToolchainQuery { .. } => "toolchain_query",
            TargetError::UnknownTarget(_) => "unknown_target",
            TargetError::NoTargetsAvailable { .. } => "no_targets_available",
        };
    }
    if let Some(e) = err.downcast_ref::<DeviceError>() {
        return match e {
            DeviceError::Boot { .. } => "device_boot",
            DeviceError::BootTimeout { .. } => "device_boot_timeout",
        };
    }
    if let Some(e) = err.downcast_ref::<StepError>() {
        return match e {
            StepError::SimulatorOpen(_) => "simulator_open",
            StepError::Uninstall(_) => "uninstall",
            StepError::Install(_) => "install",
            StepError::Launch(_) => "launch",
            StepError::BuildFailed(_) => "build_failed",
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "config";
    }
    if err.downcast_ref::<Interrupted>().is_some() {
        return "interrupted";
    }
    "error"
}

/// Pretty-print the simulator catalog.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_catalog(catalog: &Catalog) -> Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({ "runtimes": catalog }))
        .context("JSON serialization failed")
}

#[derive(Serialize)]
struct CommandSummary<'a> {
    command: &'a str,
    app: &'a str,
    target: &'a ResolvedTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle_identifier: Option<&'a str>,
}

/// Pretty-print the summary of a successful `build` or `run`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_summary(
    command: &str,
    app: &str,
    target: &ResolvedTarget,
    bundle_identifier: Option<&str>,
) -> Result<String> {
    serde_json::to_string_pretty(&CommandSummary {
        command,
        app,
        target,
        bundle_identifier,
    })
    .context("JSON serialization failed")
}
