//! Integration Tests
//!
//! End-to-end tests for the Fortissimo simulation pipeline.

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;

use fortissimo::catalog::{Catalog, InstrumentSpec};
use fortissimo::simulation::{run, SimulationConfig};

/// Helper to build a minimal single-type configuration
fn single_type_config(dbspl: f64, target_count: usize, spacing_m: f64) -> SimulationConfig {
    SimulationConfig {
        target_count,
        spacing_m,
        listener: None,
        catalog: Catalog::new(vec![InstrumentSpec::measured("drum", 1, dbspl)]),
    }
}

// === Full Pipeline Tests ===

#[test]
fn test_default_scenario_grid_dimensions() {
    let report = run(&SimulationConfig::default()).unwrap();

    // 31 instruments per unit; sqrt(576000) ~= 758.9 snaps down to 744
    assert_eq!(report.instruments_per_unit, 31);
    assert_eq!(report.row_length, 744);

    // 576000 is not a multiple of 31; the final catalog pass overshoots
    assert_eq!(report.total_placed, 576_011);
    assert!(report.total_placed >= 576_000);
    assert!(report.total_placed - 576_000 < 31);

    // geometric center of a 744-wide grid of 774 full rows at 0.5 m
    assert_eq!(report.target_point, (186.0, 193.5));
}

#[test]
fn test_default_scenario_level_is_plausible() {
    let report = run(&SimulationConfig::default()).unwrap();

    // More than half a million instruments must combine well above the
    // loudest single type (violin, 122.2 dB) yet stay below physically
    // absurd figures
    assert!(report.combined_dbspl > 122.2);
    assert!(report.combined_dbspl < 180.0);
    assert!(report.aggregate_intensity > 0.0);
}

#[test]
fn test_default_scenario_is_reproducible() {
    let first = run(&SimulationConfig::default()).unwrap();
    let second = run(&SimulationConfig::default()).unwrap();
    assert_eq!(first, second);
}

// === Scenario Tests ===

#[test]
fn test_small_square_scenario() {
    let report = run(&single_type_config(100.0, 4, 1.0)).unwrap();

    assert_eq!(report.instruments_per_unit, 1);
    assert_eq!(report.row_length, 2);
    assert_eq!(report.total_placed, 4);
    assert_eq!(report.target_point, (1.0, 1.0));
}

#[test]
fn test_equal_sources_combine_in_power_domain() {
    // Listener equidistant from two identical sources at the near-field
    // reference: combined level is X + 10*log10(2) ~= X + 3.01 dB
    let mut config = single_type_config(94.0, 2, 0.6);
    config.listener = Some((0.0, 0.3));
    let report = run(&config).unwrap();

    let expected = 94.0 + 10.0 * 2.0_f64.log10();
    assert_relative_eq!(report.combined_dbspl, expected, max_relative = 1e-12);
}

#[test]
fn test_level_shift_carries_through_aggregation() {
    // Identical geometry, every source 3 dB hotter: the combined figure
    // shifts by exactly 3 dB (power-domain summation is shift-invariant)
    let quiet = run(&single_type_config(100.0, 100, 1.0)).unwrap();
    let loud = run(&single_type_config(103.0, 100, 1.0)).unwrap();

    assert_eq!(quiet.row_length, loud.row_length);
    assert_relative_eq!(
        loud.combined_dbspl,
        quiet.combined_dbspl + 3.0,
        max_relative = 1e-9
    );
}

#[test]
fn test_wider_spacing_lowers_the_level() {
    let tight = run(&single_type_config(100.0, 1_000, 0.5)).unwrap();
    let sparse = run(&single_type_config(100.0, 1_000, 4.0)).unwrap();
    assert!(sparse.combined_dbspl < tight.combined_dbspl);
}

// === Configuration Surface Tests ===

#[test]
fn test_config_file_round_trip() {
    use std::io::Write;

    let config = SimulationConfig {
        target_count: 930,
        spacing_m: 0.75,
        listener: Some((10.0, 10.0)),
        catalog: Catalog::beethoven_ninth(),
    };

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string_pretty(&config).unwrap().as_bytes())
        .unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let loaded: SimulationConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(loaded, config);

    // the loaded configuration drives the pipeline identically
    assert_eq!(run(&loaded).unwrap(), run(&config).unwrap());
}

#[test]
fn test_derived_and_measured_types_mix() {
    // A catalog mixing a measured type with a rating-only type resolves and
    // runs; the derived triangle contributes a real level
    let config = SimulationConfig {
        target_count: 4,
        spacing_m: 1.0,
        listener: None,
        catalog: Catalog::new(vec![
            InstrumentSpec::measured("violin", 1, 122.2),
            InstrumentSpec::rated("triangle", 1, 0.05, 0.1524 * 0.1524 / 2.0),
        ]),
    };
    let report = run(&config).unwrap();
    assert_eq!(report.instruments_per_unit, 2);
    // violin one grid step from the center alone contributes ~111.7 dB;
    // the rest push the combined figure above that but attenuation keeps
    // it below the violin's unattenuated level
    assert!(report.combined_dbspl > 111.7);
    assert!(report.combined_dbspl < 122.2);
}

#[test]
fn test_unresolvable_type_aborts_run() {
    let config = SimulationConfig {
        target_count: 4,
        spacing_m: 1.0,
        listener: None,
        catalog: Catalog::new(vec![
            InstrumentSpec::measured("violin", 1, 122.2),
            InstrumentSpec {
                name: "mystery".to_string(),
                count: 1,
                watts: None,
                area_m2: None,
                dbspl: None,
            },
        ]),
    };
    assert!(run(&config).is_err());
}
