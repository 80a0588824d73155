//! Application identity and the on-disk layout of its Xcode project.
//!
//! Pure functions only — paths are computed, never checked for existence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Build configuration directory produced by a Debug simulator build.
pub const SIMULATOR_BUILD_DIR: &str = "Debug-iphonesimulator";

/// Stderr fragments `simctl uninstall` emits when the bundle was never installed.
const NOT_INSTALLED_MARKERS: &[&str] = &["not installed", "found nothing to uninstall"];

/// The application being built and run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppSpec {
    /// Display name; also names the Xcode project and the `.app` bundle.
    #[serde(default)]
    pub formal_name: String,
    /// Short machine name, the last component of the bundle identifier.
    #[serde(default)]
    pub name: String,
    /// Reverse-DNS bundle prefix, e.g. `com.example`.
    #[serde(default)]
    pub bundle: String,
}

impl AppSpec {
    /// `<bundle>.<name>` — addresses the installed app for uninstall/launch.
    #[must_use]
    pub fn bundle_identifier(&self) -> String {
        format!("{}.{}", self.bundle, self.name)
    }
}

/// Where an app's Xcode project lives relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    bundle_dir: PathBuf,
    formal_name: String,
}

impl AppLayout {
    /// `platform_dir` is the already-joined `<project root>/<platform_path>`.
    #[must_use]
    pub fn new(platform_dir: &Path, app: &AppSpec) -> Self {
        Self {
            bundle_dir: platform_dir.join(&app.formal_name),
            formal_name: app.formal_name.clone(),
        }
    }

    /// `<platform>/<formal name>`
    #[must_use]
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// `<platform>/<formal name>/<formal name>.xcodeproj`
    #[must_use]
    pub fn project_file(&self) -> PathBuf {
        self.bundle_dir
            .join(format!("{}.xcodeproj", self.formal_name))
    }

    /// `<platform>/<formal name>/build/Debug-iphonesimulator/<formal name>.app`
    #[must_use]
    pub fn binary_path(&self) -> PathBuf {
        self.bundle_dir
            .join("build")
            .join(SIMULATOR_BUILD_DIR)
            .join(format!("{}.app", self.formal_name))
    }
}

/// `true` when `simctl uninstall` failed only because the app was absent.
#[must_use]
pub fn is_not_installed_signal(stderr: &str) -> bool {
    let lower = stderr.to_ascii_lowercase();
    NOT_INSTALLED_MARKERS.iter().any(|m| lower.contains(m))
}
