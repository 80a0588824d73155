//! `simdrive build` — resolve a target and build the app for it.

use anyhow::Result;
use clap::Args;

use super::TargetArgs;
use crate::app::AppContext;
use crate::application::services::build;
use crate::application::services::run::resolve_and_prepare_target;
use crate::output::json;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Run `simdrive build`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no target can be
/// resolved, or `xcodebuild` fails.
pub async fn run(args: &BuildArgs, app: &AppContext) -> Result<()> {
    let project_dir = &args.target.project_dir;
    let config = app.load_config(project_dir)?;
    let layout = config.layout(project_dir);

    let target =
        resolve_and_prepare_target(&app.runner, &app.selector, args.target.device.as_deref())
            .await?;
    app.renderer().render_target(&target);

    build::build(&app.runner, &config.app, &layout, &target, &app.reporter()).await?;

    if app.is_json() {
        println!(
            "{}",
            json::format_summary("build", &config.app.name, &target, None)?
        );
    }
    Ok(())
}
