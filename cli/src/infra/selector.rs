//! Terminal implementation of the `TargetSelector` port.

use anyhow::{Context, Result};
use dialoguer::Select;

use crate::application::ports::{SelectOption, TargetSelector};
use crate::domain::Interrupted;

/// Prompts with a `dialoguer` menu.
///
/// In non-interactive sessions (`--yes`, `CI`, `SIMDRIVE_YES`) no prompt is
/// shown; the choice fails and lists the candidates instead.
pub struct DialoguerSelector {
    non_interactive: bool,
}

impl DialoguerSelector {
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }
}

impl TargetSelector for DialoguerSelector {
    fn select_one(&self, prompt: &str, options: &[SelectOption]) -> Result<String> {
        if self.non_interactive {
            anyhow::bail!("{}", non_interactive_message(prompt, options));
        }
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        let idx = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| prompt_error(e, prompt))?;
        options
            .get(idx)
            .map(|o| o.key.clone())
            .context("selection out of range")
    }
}

/// Ctrl-C at the menu surfaces as an interrupted read.
fn prompt_error(err: dialoguer::Error, prompt: &str) -> anyhow::Error {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            Interrupted.into()
        }
        other => anyhow::Error::new(other).context(prompt.to_lowercase()),
    }
}

fn non_interactive_message(prompt: &str, options: &[SelectOption]) -> String {
    let mut msg = format!("{prompt}: a choice is required but prompts are disabled.\n");
    for option in options {
        msg.push_str(&format!("\n  {}  {}", option.key, option.label));
    }
    msg.push_str("\n\nPass --device <UDID> to pick a simulator.");
    msg
}
