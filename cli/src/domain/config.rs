//! Domain types and validators for the project configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::app::{AppLayout, AppSpec};
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "simdrive.yaml";

const DEFAULT_PLATFORM_PATH: &str = "iOS";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
const DEFAULT_BOOT_TIMEOUT_SECS: u64 = 300;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `simdrive.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Application identity.
    #[serde(default)]
    pub app: AppSpec,
    /// Directory holding the generated Xcode projects, relative to the
    /// project root.
    #[serde(default = "default_platform_path")]
    pub platform_path: PathBuf,
    /// Simulator wait settings.
    #[serde(default)]
    pub simulator: SimulatorSettings,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            app: AppSpec::default(),
            platform_path: default_platform_path(),
            simulator: SimulatorSettings::default(),
        }
    }
}

impl ProjectConfig {
    /// Resolve the Xcode project layout under `project_root`.
    #[must_use]
    pub fn layout(&self, project_root: &Path) -> AppLayout {
        AppLayout::new(&project_root.join(&self.platform_path), &self.app)
    }
}

/// Settings for the boot-wait loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Seconds between state queries while a device is mid-transition.
    #[serde(default = "default_poll_interval_secs")]
    pub boot_poll_interval_secs: u64,
    /// Give up waiting after this many seconds; `null` waits forever.
    #[serde(default = "default_boot_timeout_secs")]
    pub boot_timeout_secs: Option<u64>,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            boot_poll_interval_secs: default_poll_interval_secs(),
            boot_timeout_secs: default_boot_timeout_secs(),
        }
    }
}

impl SimulatorSettings {
    #[must_use]
    pub fn boot_policy(&self) -> BootPolicy {
        BootPolicy {
            poll_interval: Duration::from_secs(self.boot_poll_interval_secs),
            timeout: self.boot_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// How long and how often to poll a transitioning simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootPolicy {
    pub poll_interval: Duration,
    /// `None` polls until the device settles, however long that takes.
    pub timeout: Option<Duration>,
}

impl Default for BootPolicy {
    fn default() -> Self {
        SimulatorSettings::default().boot_policy()
    }
}

fn default_platform_path() -> PathBuf {
    PathBuf::from(DEFAULT_PLATFORM_PATH)
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

#[allow(clippy::unnecessary_wraps)] // serde default must match the field type
fn default_boot_timeout_secs() -> Option<u64> {
    Some(DEFAULT_BOOT_TIMEOUT_SECS)
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a loaded configuration.
///
/// # Errors
///
/// Returns an error if a required app field is empty or the poll interval is zero.
pub fn validate_config(config: &ProjectConfig) -> Result<()> {
    let required = [
        ("app.formal_name", &config.app.formal_name),
        ("app.name", &config.app.name),
        ("app.bundle", &config.app.bundle),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(key).into());
        }
    }
    if config.simulator.boot_poll_interval_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "simulator.boot_poll_interval_secs",
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
