//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod app;
pub mod config;
pub mod error;
pub mod simulator;

pub use app::{AppLayout, AppSpec};
pub use config::{BootPolicy, ProjectConfig, validate_config};
pub use error::{ConfigError, DeviceError, Interrupted, StepError, StepFailure, TargetError};
pub use simulator::{Catalog, Device, DeviceState, ResolvedTarget, Runtime, parse_simctl_devices};
