//! Build driver — one `xcodebuild` invocation against the resolved target.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use tracing::info;

use super::{XCODEBUILD, step_failure};
use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::{AppLayout, AppSpec, ResolvedTarget, StepError};

/// `-destination` value naming the simulator/runtime pair.
#[must_use]
pub fn destination(target: &ResolvedTarget) -> String {
    format!(
        "platform=iOS Simulator,name={},OS={}",
        target.device.name, target.runtime
    )
}

/// Fixed `xcodebuild` argument vector: Debug configuration, simulator SDK,
/// x86_64, quiet output.
#[must_use]
pub fn build_args(layout: &AppLayout, target: &ResolvedTarget) -> Vec<String> {
    vec![
        "-project".to_string(),
        layout.project_file().display().to_string(),
        "-destination".to_string(),
        destination(target),
        "-quiet".to_string(),
        "-configuration".to_string(),
        "Debug".to_string(),
        "-arch".to_string(),
        "x86_64".to_string(),
        "-sdk".to_string(),
        "iphonesimulator".to_string(),
        "build".to_string(),
    ]
}

/// Build the app's Xcode project for `target`.
///
/// Output is streamed to the terminal. The artifact is left at
/// [`AppLayout::binary_path`]; its existence is not checked here.
///
/// # Errors
///
/// Returns `StepError::BuildFailed` if `xcodebuild` cannot be spawned or
/// exits non-zero. Never retried.
pub async fn build(
    runner: &impl CommandRunner,
    app: &AppSpec,
    layout: &AppLayout,
    target: &ResolvedTarget,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("[{}] building Xcode project...", app.name));

    let args = build_args(layout, target);
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    let detail = match runner.run_status(XCODEBUILD, &argv).await {
        Ok(status) if status.success() => {
            info!(app = %app.name, "build succeeded");
            reporter.success("build succeeded");
            return Ok(());
        }
        Ok(status) => match status.code() {
            Some(code) => format!("xcodebuild exited with status {code}"),
            None => "xcodebuild was terminated by a signal".to_string(),
        },
        Err(e) => format!("{e:#}"),
    };
    Err(StepError::BuildFailed(step_failure(app, target, detail)).into())
}
