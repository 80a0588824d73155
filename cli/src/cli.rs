//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::Interrupted;

/// Exit status for a failed command.
pub const EXIT_FAILURE: i32 = 1;
/// Exit status after Ctrl-C, following the shell convention (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Build and run iOS apps on the simulator
#[derive(Parser)]
#[command(
    name = "simdrive",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (the `NO_COLOR` convention is honoured too)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Never prompt; fail when a simulator choice is required
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Log external commands to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List available iOS simulators grouped by runtime
    Devices,

    /// Resolve a target and build the app for it
    Build(commands::build::BuildArgs),

    /// Boot a simulator, then install and launch the app on it
    Run(commands::run::RunArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            verbose: _,
            command,
        } = self;

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        });

        match command {
            Command::Version => commands::version::run(json),
            Command::Devices => commands::devices::run(&app).await,
            Command::Build(args) => commands::build::run(&args, &app).await,
            Command::Run(args) => commands::run::run(&args, &app).await,
        }
    }
}

/// Process exit status for a command error.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<Interrupted>().is_some() {
        EXIT_INTERRUPTED
    } else {
        EXIT_FAILURE
    }
}
