//! Fortissimo CLI - Massed-Ensemble Sound Pressure Simulation
//!
//! Command-line interface for the Fortissimo simulation.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use fortissimo::cli::{commands, Cli, Commands, RunArgs};

fn main() -> anyhow::Result<()> {
    // Initialize logger
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Fortissimo v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        // bare invocation runs the built-in scenario
        None => commands::run(&RunArgs::default()).context("simulation failed"),
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Run(args) => commands::run(&args).context("simulation failed"),
        Commands::ShowCatalog { config } => {
            commands::show_catalog(config.as_deref()).context("catalog resolution failed")
        }
        Commands::ExportConfig { path } => {
            commands::export_config(&path).context("configuration export failed")
        }
    }
}
