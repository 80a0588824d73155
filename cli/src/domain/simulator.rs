//! Simulator catalog types and `simctl` listing parser.
//!
//! Pure functions only — no I/O, no async, no process spawning.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::TargetError;

/// Platform whose runtimes are kept when parsing a listing.
pub const PLATFORM_OS: &str = "iOS";

const RUNTIME_ID_PREFIX: &str = "com.apple.CoreSimulator.SimRuntime.";

// ── Device state ─────────────────────────────────────────────────────────────

/// Boot state of a simulator as reported by `simctl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    Shutdown,
    Booted,
    Booting,
    ShuttingDown,
    Unknown,
}

impl DeviceState {
    /// Map a `simctl` state string onto a `DeviceState`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "shutdown" => Self::Shutdown,
            "booted" => Self::Booted,
            "booting" => Self::Booting,
            "shutting down" => Self::ShuttingDown,
            _ => Self::Unknown,
        }
    }

    /// `true` when the device is not mid-transition and can be acted upon.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Shutdown | Self::Booted)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shutdown => "Shutdown",
            Self::Booted => "Booted",
            Self::Booting => "Booting",
            Self::ShuttingDown => "Shutting Down",
            Self::Unknown => "Unknown",
        })
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// An iOS version under which simulators run, e.g. `13.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Runtime(String);

impl Runtime {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.0
    }

    /// Human label used in prompts, e.g. `iOS 13.0`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{PLATFORM_OS} {}", self.0)
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single simulator instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub udid: String,
    pub name: String,
    pub state: DeviceState,
}

/// All devices available under one runtime, in toolchain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeDevices {
    pub runtime: Runtime,
    pub devices: Vec<Device>,
}

impl RuntimeDevices {
    /// Look up a device by UDID within this runtime.
    #[must_use]
    pub fn device(&self, udid: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.udid == udid)
    }
}

/// Runtime → (udid → device) mapping with a stable iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    runtimes: Vec<RuntimeDevices>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runtime with no devices (no-op if already present).
    pub fn add_runtime(&mut self, runtime: Runtime) -> &mut RuntimeDevices {
        let idx = match self.runtimes.iter().position(|r| r.runtime == runtime) {
            Some(idx) => idx,
            None => {
                self.runtimes.push(RuntimeDevices {
                    runtime,
                    devices: Vec::new(),
                });
                self.runtimes.len() - 1
            }
        };
        &mut self.runtimes[idx]
    }

    /// Add a device under `runtime`. A UDID already present in that runtime
    /// is replaced in place, keeping UDIDs unique per runtime.
    pub fn insert(&mut self, runtime: Runtime, device: Device) {
        let entry = self.add_runtime(runtime);
        match entry.devices.iter_mut().find(|d| d.udid == device.udid) {
            Some(existing) => *existing = device,
            None => entry.devices.push(device),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty()
    }

    /// Number of runtimes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runtimes.len()
    }

    pub fn runtimes(&self) -> impl Iterator<Item = &RuntimeDevices> {
        self.runtimes.iter()
    }

    #[must_use]
    pub fn runtime(&self, version: &str) -> Option<&RuntimeDevices> {
        self.runtimes.iter().find(|r| r.runtime.version() == version)
    }

    /// First `(runtime, device)` in catalog order whose UDID matches.
    #[must_use]
    pub fn find(&self, udid: &str) -> Option<(&Runtime, &Device)> {
        self.runtimes
            .iter()
            .find_map(|r| r.device(udid).map(|d| (&r.runtime, d)))
    }

    /// Order runtimes by ascending numeric version (`13.2` before `13.10`).
    pub fn sort_runtimes(&mut self) {
        self.runtimes
            .sort_by(|a, b| compare_versions(a.runtime.version(), b.runtime.version()));
    }
}

/// The single target chosen for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub udid: String,
    pub runtime: Runtime,
    pub device: Device,
}

impl ResolvedTarget {
    #[must_use]
    pub fn new(runtime: &Runtime, device: &Device) -> Self {
        Self {
            udid: device.udid.clone(),
            runtime: runtime.clone(),
            device: device.clone(),
        }
    }

    /// `Targeting iPhone 11 running iOS 13.0 (device UDID …)`
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Targeting {} running {} (device UDID {})",
            self.device.name,
            self.runtime.label(),
            self.udid
        )
    }
}

// ── simctl listing parser ────────────────────────────────────────────────────

/// Shape of `xcrun simctl list devices --json`.
#[derive(Debug, Deserialize)]
struct SimctlListing {
    devices: BTreeMap<String, Vec<SimctlDevice>>,
}

#[derive(Debug, Deserialize)]
struct SimctlDevice {
    udid: String,
    name: String,
    state: String,
    #[serde(rename = "isAvailable", default)]
    is_available: Option<bool>,
    /// Pre-Xcode 10.1 listings report `"(available)"` / `"(unavailable, …)"`.
    #[serde(default)]
    availability: Option<String>,
}

impl SimctlDevice {
    fn available(&self) -> bool {
        if self.is_available == Some(false) {
            return false;
        }
        !self
            .availability
            .as_deref()
            .is_some_and(|a| a.contains("unavailable"))
    }
}

/// Parse `simctl list devices --json` output into a [`Catalog`] of iOS
/// runtimes. Unavailable devices and non-iOS runtimes are dropped; iOS
/// runtimes left without devices are kept so the resolver can report them.
///
/// # Errors
///
/// Returns `TargetError::ToolchainQuery` if the output is not the expected JSON.
pub fn parse_simctl_devices(stdout: &[u8]) -> Result<Catalog, TargetError> {
    let listing: SimctlListing =
        serde_json::from_slice(stdout).map_err(|e| TargetError::ToolchainQuery {
            detail: format!("unexpected simctl output: {e}"),
        })?;

    let mut catalog = Catalog::new();
    for (key, devices) in listing.devices {
        let Some(version) = runtime_version(&key) else {
            continue;
        };
        let runtime = Runtime::new(version);
        catalog.add_runtime(runtime.clone());
        for device in devices.into_iter().filter(SimctlDevice::available) {
            catalog.insert(
                runtime.clone(),
                Device {
                    state: DeviceState::parse(&device.state),
                    udid: device.udid,
                    name: device.name,
                },
            );
        }
    }
    catalog.sort_runtimes();
    Ok(catalog)
}

/// Extract the iOS version from a runtime key.
///
/// `com.apple.CoreSimulator.SimRuntime.iOS-13-0` → `13.0`, and the legacy
/// `iOS 13.0` → `13.0`. Other platforms yield `None`.
#[must_use]
pub fn runtime_version(key: &str) -> Option<String> {
    if let Some(rest) = key.strip_prefix(RUNTIME_ID_PREFIX) {
        let (os, version) = rest.split_once('-')?;
        return (os == PLATFORM_OS).then(|| version.replace('-', "."));
    }
    key.strip_prefix(PLATFORM_OS)
        .and_then(|rest| rest.strip_prefix(' '))
        .map(str::to_string)
}

fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
