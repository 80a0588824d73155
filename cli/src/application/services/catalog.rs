//! Target catalog — what simulators does the device-control toolchain offer?
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use tracing::debug;

use super::{XCRUN, command_outcome};
use crate::application::ports::CommandRunner;
use crate::domain::{Catalog, DeviceState, TargetError, parse_simctl_devices};

const LIST_ARGS: &[&str] = &["simctl", "list", "devices", "--json"];

/// Query the available iOS runtimes and their simulators.
///
/// Read-only and never retried.
///
/// # Errors
///
/// Returns `TargetError::ToolchainQuery` if `simctl` cannot be run, exits
/// non-zero, or prints output that cannot be parsed.
pub async fn list_targets(runner: &impl CommandRunner) -> Result<Catalog> {
    let output = command_outcome(runner.run(XCRUN, LIST_ARGS).await)
        .map_err(|detail| TargetError::ToolchainQuery { detail })?;
    let catalog = parse_simctl_devices(&output.stdout)?;
    debug!(runtimes = catalog.len(), "loaded simulator catalog");
    Ok(catalog)
}

/// Fetch the current state of one simulator, fresh from the toolchain.
///
/// # Errors
///
/// Returns `TargetError::ToolchainQuery` if the listing fails, or
/// `TargetError::UnknownTarget` if the device is no longer reported.
pub async fn device_state(runner: &impl CommandRunner, udid: &str) -> Result<DeviceState> {
    let catalog = list_targets(runner).await?;
    match catalog.find(udid) {
        Some((_, device)) => Ok(device.state),
        None => Err(TargetError::UnknownTarget(udid.to_string()).into()),
    }
}
