//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;

use log::info;

use crate::cli::RunArgs;
use crate::error::Result;
use crate::simulation::{self, SimulationConfig};

/// Run the simulation and print the report.
pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(target_count) = args.target_count {
        config.target_count = target_count;
    }
    if let Some(spacing) = args.spacing {
        config.spacing_m = spacing;
    }
    if let (Some(x), Some(y)) = (args.listener_x, args.listener_y) {
        config.listener = Some((x, y));
    }

    let report = simulation::run(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Instruments needed for one ensemble: {}",
        report.instruments_per_unit
    );
    println!("Row length: {}", report.row_length);
    println!("Total instrument count: {}", report.total_placed);
    println!(
        "Target coordinates: ({}, {})",
        report.target_point.0, report.target_point.1
    );
    println!("Aggregate intensity: {}", report.aggregate_intensity);
    println!("Total decibels: {}", report.combined_dbspl);

    Ok(())
}

/// Print the resolved catalog: name, per-unit count, and the dB SPL value
/// each type will contribute (surfacing derived values).
pub fn show_catalog(config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    let resolved = config.catalog.resolve()?;

    println!("{:<16} {:>6} {:>10}", "instrument", "count", "dB SPL");
    println!("{:-<34}", "");
    for instrument in resolved.iter() {
        println!(
            "{:<16} {:>6} {:>10.1}",
            instrument.name, instrument.count, instrument.dbspl
        );
    }
    println!("{:-<34}", "");
    println!(
        "{:<16} {:>6}",
        "per unit",
        resolved.instruments_per_unit()
    );

    Ok(())
}

/// Write the default configuration to `path` as a starting point.
pub fn export_config(path: &Path) -> Result<()> {
    let config = SimulationConfig::default();
    fs::write(path, serde_json::to_string_pretty(&config)?)?;
    println!("Configuration written: {}", path.display());
    Ok(())
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    info!("Loading configuration: {}", path.display());
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_round_trip() {
        let config = SimulationConfig {
            target_count: 1234,
            ..SimulationConfig::default()
        };
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&config).unwrap().as_bytes())
            .unwrap();

        let loaded = load_config(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/config.json")).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }

    #[test]
    fn test_load_config_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_export_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        export_config(&path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, SimulationConfig::default());
    }
}
