//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod build;
pub mod catalog;
pub mod lifecycle;
pub mod resolver;
pub mod run;

use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{AppSpec, ResolvedTarget, StepFailure};

/// Device-control toolchain entry point (`xcrun simctl …`).
pub const XCRUN: &str = "xcrun";
/// Simulator UI launcher.
pub const OPEN: &str = "open";
/// Build toolchain.
pub const XCODEBUILD: &str = "xcodebuild";

/// Timeout for simctl commands that change device or app state.
pub const SIMCTL_ACTION_TIMEOUT: Duration = Duration::from_secs(120);

/// Collapse a runner result into the captured output on success, or a
/// one-line failure description (stderr, exit code, or spawn error).
pub(crate) fn command_outcome(result: Result<Output>) -> std::result::Result<Output, String> {
    match result {
        Ok(output) if output.status.success() => Ok(output),
        Ok(output) => Err(failure_detail(&output)),
        Err(e) => Err(format!("{e:#}")),
    }
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    match output.status.code() {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

pub(crate) fn step_failure(app: &AppSpec, target: &ResolvedTarget, detail: String) -> StepFailure {
    StepFailure {
        app: app.name.clone(),
        runtime: target.runtime.version().to_string(),
        device: target.device.name.clone(),
        detail,
    }
}
