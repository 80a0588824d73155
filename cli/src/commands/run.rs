//! `simdrive run` — boot a simulator, reinstall the app and launch it.

use anyhow::Result;
use clap::Args;

use super::TargetArgs;
use crate::app::AppContext;
use crate::application::services::build;
use crate::application::services::run::{
    RunRequest, resolve_and_prepare_target, run_on_resolved_target,
};
use crate::output::json;

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Build the app for the chosen simulator before running it
    #[arg(long)]
    pub build: bool,
}

/// Run `simdrive run`.
///
/// The target is resolved once and reused for the optional build and the
/// run pipeline.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no target can be
/// resolved, or any build/boot/install/launch step fails.
pub async fn run(args: &RunArgs, app: &AppContext) -> Result<()> {
    let project_dir = &args.target.project_dir;
    let config = app.load_config(project_dir)?;
    let layout = config.layout(project_dir);
    let reporter = app.reporter();

    let target =
        resolve_and_prepare_target(&app.runner, &app.selector, args.target.device.as_deref())
            .await?;
    app.renderer().render_target(&target);

    if args.build {
        build::build(&app.runner, &config.app, &layout, &target, &reporter).await?;
    }

    let request = RunRequest {
        app: &config.app,
        layout: &layout,
        policy: config.simulator.boot_policy(),
    };
    let outcome = run_on_resolved_target(&app.runner, &target, &request, &reporter).await?;

    if app.is_json() {
        println!(
            "{}",
            json::format_summary(
                "run",
                &config.app.name,
                &target,
                Some(&outcome.bundle_identifier)
            )?
        );
    }
    Ok(())
}
