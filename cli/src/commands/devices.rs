//! `simdrive devices` — list available simulators grouped by runtime.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::catalog::list_targets;
use crate::output::{json, progress};

/// Run `simdrive devices`.
///
/// # Errors
///
/// Returns an error if the simulator catalog cannot be queried.
pub async fn run(app: &AppContext) -> Result<()> {
    let pb = progress::catalog_spinner(&app.output);
    let result = list_targets(&app.runner).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let catalog = result?;

    if app.is_json() {
        println!("{}", json::format_catalog(&catalog)?);
    } else {
        app.renderer().render_catalog(&catalog);
    }
    Ok(())
}
