//! Target resolution — narrow the catalog down to exactly one simulator.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::Result;
use tracing::debug;

use crate::application::ports::{SelectOption, TargetSelector};
use crate::domain::simulator::RuntimeDevices;
use crate::domain::{Catalog, ResolvedTarget, TargetError};

const RUNTIME_PROMPT: &str = "Select iOS version";
const DEVICE_PROMPT: &str = "Select simulator device";

/// Pick one `(runtime, device)` pair from `catalog`.
///
/// With `requested`, runtimes are scanned in catalog order and the first
/// exact UDID match wins; the selector is never consulted. Without it the
/// runtime and then the device are chosen, each automatically when there is
/// only one candidate and through `selector` otherwise.
///
/// # Errors
///
/// - `TargetError::UnknownTarget` if `requested` matches no device, or the
///   selector answers with a key it was not offered.
/// - `TargetError::NoTargetsAvailable` if the catalog, or the chosen
///   runtime, has nothing to choose from.
/// - Any error the selector returns.
pub fn resolve(
    catalog: &Catalog,
    requested: Option<&str>,
    selector: &impl TargetSelector,
) -> Result<ResolvedTarget> {
    if let Some(udid) = requested {
        let (runtime, device) = catalog
            .find(udid)
            .ok_or_else(|| TargetError::UnknownTarget(udid.to_string()))?;
        return Ok(ResolvedTarget::new(runtime, device));
    }

    let runtime = select_runtime(catalog, selector)?;
    let device = match runtime.devices.as_slice() {
        [] => {
            return Err(TargetError::NoTargetsAvailable {
                runtime: Some(runtime.runtime.version().to_string()),
            }
            .into());
        }
        [only] => only,
        devices => {
            let options: Vec<SelectOption> = devices
                .iter()
                .map(|d| SelectOption::new(&d.udid, &d.name))
                .collect();
            let udid = selector.select_one(DEVICE_PROMPT, &options)?;
            runtime
                .device(&udid)
                .ok_or(TargetError::UnknownTarget(udid))?
        }
    };

    debug!(udid = %device.udid, runtime = %runtime.runtime, "resolved simulator target");
    Ok(ResolvedTarget::new(&runtime.runtime, device))
}

fn select_runtime<'a>(
    catalog: &'a Catalog,
    selector: &impl TargetSelector,
) -> Result<&'a RuntimeDevices> {
    let mut runtimes = catalog.runtimes();
    match (runtimes.next(), runtimes.next()) {
        (None, _) => Err(TargetError::NoTargetsAvailable { runtime: None }.into()),
        (Some(only), None) => Ok(only),
        _ => {
            let options: Vec<SelectOption> = catalog
                .runtimes()
                .map(|r| SelectOption::new(r.runtime.version(), r.runtime.label()))
                .collect();
            let version = selector.select_one(RUNTIME_PROMPT, &options)?;
            catalog
                .runtime(&version)
                .ok_or_else(|| TargetError::UnknownTarget(version).into())
        }
    }
}
