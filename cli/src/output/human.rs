//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::{Catalog, DeviceState, ResolvedTarget};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the catalog grouped by runtime.
    pub fn render_catalog(&self, catalog: &Catalog) {
        if self.ctx.quiet {
            return;
        }
        if catalog.is_empty() {
            self.ctx.warn("No iOS simulators available.");
            return;
        }
        for (i, runtime) in catalog.runtimes().enumerate() {
            if i > 0 {
                println!();
            }
            self.ctx.header(&runtime.runtime.label());
            if runtime.devices.is_empty() {
                println!("    {}", "(no devices)".style(self.ctx.styles.dim));
            }
            for device in &runtime.devices {
                let state = device.state.to_string();
                let state = match device.state {
                    DeviceState::Booted => state.style(self.ctx.styles.booted).to_string(),
                    DeviceState::Shutdown => state.style(self.ctx.styles.dim).to_string(),
                    _ => state.style(self.ctx.styles.transitioning).to_string(),
                };
                println!(
                    "    {:<28} {}  {}",
                    device.name,
                    device.udid.style(self.ctx.styles.dim),
                    state
                );
            }
        }
    }

    /// Render the resolved target line printed before build/run.
    pub fn render_target(&self, target: &ResolvedTarget) {
        self.ctx.info(&target.describe());
    }
}
