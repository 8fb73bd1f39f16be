//! CLI Module
//!
//! Command-line interface for the Fortissimo simulation.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fortissimo - massed-ensemble sound pressure simulation
#[derive(Parser, Debug)]
#[command(name = "fortissimo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the simulation and print the report (the default)
    #[command(name = "run")]
    Run(RunArgs),

    /// Print the resolved instrument catalog
    #[command(name = "show-catalog")]
    ShowCatalog {
        /// Configuration file to read the catalog from (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the default configuration to a JSON file for editing
    #[command(name = "export-config")]
    ExportConfig {
        /// Destination path
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Configuration file (JSON); defaults to the built-in scenario
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the target total instrument count
    #[arg(long)]
    pub target_count: Option<usize>,

    /// Override the grid spacing in meters
    #[arg(long)]
    pub spacing: Option<f64>,

    /// Override the listening position (x, meters)
    #[arg(long, requires = "listener_y")]
    pub listener_x: Option<f64>,

    /// Override the listening position (y, meters)
    #[arg(long, requires = "listener_x")]
    pub listener_y: Option<f64>,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
