//! Command implementations

pub mod build;
pub mod devices;
pub mod run;
pub mod version;

use std::path::PathBuf;

use clap::Args;

/// Target and project selection shared by `build` and `run`.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Simulator UDID to use instead of choosing one
    #[arg(short, long, value_name = "UDID")]
    pub device: Option<String>,

    /// Project directory containing simdrive.yaml
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,
}
