//! Run orchestrator — resolve, boot, open, reinstall, launch.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Every step is fail-fast: the first failure aborts the remaining steps and
//! nothing already done is rolled back.

use anyhow::Result;
use tracing::debug;

use super::catalog::list_targets;
use super::lifecycle::ensure_usable;
use super::resolver::resolve;
use super::{OPEN, SIMCTL_ACTION_TIMEOUT, XCRUN, command_outcome, step_failure};
use crate::application::ports::{CommandRunner, ProgressReporter, TargetSelector};
use crate::domain::app::is_not_installed_signal;
use crate::domain::{AppLayout, AppSpec, BootPolicy, DeviceState, ResolvedTarget, StepError};

/// What the run pipeline needs to know about the app.
pub struct RunRequest<'a> {
    pub app: &'a AppSpec,
    pub layout: &'a AppLayout,
    pub policy: BootPolicy,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Settled device state observed before any boot was issued.
    pub device_state: DeviceState,
    /// Identifier the app was launched under.
    pub bundle_identifier: String,
}

/// Query the catalog and resolve a single target from it.
///
/// # Errors
///
/// Returns any catalog or resolution error (see [`resolve`]).
pub async fn resolve_and_prepare_target(
    runner: &impl CommandRunner,
    selector: &impl TargetSelector,
    requested: Option<&str>,
) -> Result<ResolvedTarget> {
    let catalog = list_targets(runner).await?;
    resolve(&catalog, requested, selector)
}

/// Boot (if needed), open the Simulator UI, reinstall the app and launch it.
///
/// # Errors
///
/// - `DeviceError` from the boot step.
/// - `StepError::SimulatorOpen`, `Uninstall`, `Install` or `Launch` for the
///   step that failed. An uninstall that fails only because the app was
///   never installed counts as success.
pub async fn run_on_resolved_target(
    runner: &impl CommandRunner,
    target: &ResolvedTarget,
    request: &RunRequest<'_>,
    reporter: &impl ProgressReporter,
) -> Result<RunOutcome> {
    let app = request.app;
    let udid = target.udid.as_str();

    let device_state = ensure_usable(runner, target, request.policy, reporter).await?;

    reporter.step(&format!(
        "opening {} simulator running iOS {}...",
        target.device.name, target.runtime
    ));
    command_outcome(
        runner
            .run(OPEN, &["-a", "Simulator", "--args", "-CurrentDeviceUDID", udid])
            .await,
    )
    .map_err(|detail| StepError::SimulatorOpen(step_failure(app, target, detail)))?;

    let bundle_identifier = app.bundle_identifier();
    reporter.step(&format!("[{}] uninstalling old app version...", app.name));
    let uninstall = runner
        .run_with_timeout(
            XCRUN,
            &["simctl", "uninstall", udid, &bundle_identifier],
            SIMCTL_ACTION_TIMEOUT,
        )
        .await;
    match command_outcome(uninstall) {
        Ok(_) => {}
        Err(detail) if is_not_installed_signal(&detail) => {
            debug!(bundle = %bundle_identifier, "app was not installed");
        }
        Err(detail) => return Err(StepError::Uninstall(step_failure(app, target, detail)).into()),
    }

    reporter.step(&format!("[{}] installing new app version...", app.name));
    let binary = request.layout.binary_path().display().to_string();
    command_outcome(
        runner
            .run_with_timeout(XCRUN, &["simctl", "install", udid, &binary], SIMCTL_ACTION_TIMEOUT)
            .await,
    )
    .map_err(|detail| StepError::Install(step_failure(app, target, detail)))?;

    reporter.step(&format!("[{}] starting app...", app.name));
    command_outcome(
        runner
            .run_with_timeout(
                XCRUN,
                &["simctl", "launch", udid, &bundle_identifier],
                SIMCTL_ACTION_TIMEOUT,
            )
            .await,
    )
    .map_err(|detail| StepError::Launch(step_failure(app, target, detail)))?;
    reporter.success(&format!("{} launched", app.name));

    Ok(RunOutcome {
        device_state,
        bundle_identifier,
    })
}
