//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Settings;

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    crate::logging::init(&cli.log_level)?;

    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = Settings::resolve(&cli)?;
    let ctx = commands::Context::new(settings);

    match cli.command {
        Commands::Install(args) => commands::install::execute(&ctx, &args),
        Commands::Check(args) => commands::check::execute(&ctx, &args),
        Commands::Uninstall(args) => commands::uninstall::execute(&ctx, &args),
        Commands::Stores => commands::stores::execute(&ctx),
        Commands::Identity(args) => commands::identity::execute(&ctx, &args),
        Commands::Settings => commands::settings::execute(&ctx),
    }
}
