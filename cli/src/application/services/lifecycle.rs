//! Simulator lifecycle: wait for a settled state, boot when shut down.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use tokio::time::Instant;
use tracing::{debug, info};

use super::catalog::device_state;
use super::{SIMCTL_ACTION_TIMEOUT, XCRUN, command_outcome};
use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::{BootPolicy, DeviceError, DeviceState, ResolvedTarget};

/// Bring `target` into a usable state.
///
/// Polls while the device is mid-transition, then boots it if it settled
/// in `Shutdown`. The boot command is fire-and-forget: success means simctl
/// accepted it, not that the device has reached `Booted`. State is always
/// re-queried from the toolchain, never cached.
///
/// Returns the settled state the decision was based on.
///
/// # Errors
///
/// - `DeviceError::BootTimeout` if the device does not settle within
///   `policy.timeout`.
/// - `DeviceError::Boot` if simctl rejects the boot command.
/// - Any catalog error from re-querying the state.
pub async fn ensure_usable(
    runner: &impl CommandRunner,
    target: &ResolvedTarget,
    policy: BootPolicy,
    reporter: &impl ProgressReporter,
) -> Result<DeviceState> {
    let state = wait_until_settled(runner, target, policy, reporter).await?;

    if state == DeviceState::Shutdown {
        reporter.step(&format!(
            "booting {} simulator running iOS {}...",
            target.device.name, target.runtime
        ));
        boot(runner, target).await?;
        info!(udid = %target.udid, "simulator boot accepted");
        reporter.success("simulator boot started");
    } else {
        debug!(udid = %target.udid, "simulator already booted");
    }
    Ok(state)
}

async fn wait_until_settled(
    runner: &impl CommandRunner,
    target: &ResolvedTarget,
    policy: BootPolicy,
    reporter: &impl ProgressReporter,
) -> Result<DeviceState> {
    let started = Instant::now();
    let mut state = device_state(runner, &target.udid).await?;
    if state.is_settled() {
        return Ok(state);
    }

    reporter.step(&format!(
        "waiting for {} simulator ({state})...",
        target.device.name
    ));
    while !state.is_settled() {
        if let Some(limit) = policy.timeout
            && started.elapsed() >= limit
        {
            return Err(DeviceError::BootTimeout {
                udid: target.udid.clone(),
                runtime: target.runtime.version().to_string(),
                device: target.device.name.clone(),
                waited_secs: started.elapsed().as_secs(),
                last_state: state,
            }
            .into());
        }
        tokio::time::sleep(policy.poll_interval).await;
        state = device_state(runner, &target.udid).await?;
        debug!(udid = %target.udid, %state, "polled simulator state");
    }
    Ok(state)
}

async fn boot(runner: &impl CommandRunner, target: &ResolvedTarget) -> Result<()> {
    let result = runner
        .run_with_timeout(XCRUN, &["simctl", "boot", &target.udid], SIMCTL_ACTION_TIMEOUT)
        .await;
    command_outcome(result).map_err(|detail| DeviceError::Boot {
        udid: target.udid.clone(),
        runtime: target.runtime.version().to_string(),
        device: target.device.name.clone(),
        detail,
    })?;
    Ok(())
}
