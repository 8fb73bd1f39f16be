//! Simulation Pipeline
//!
//! The single entry point wiring the stages together: validate and resolve
//! the catalog, generate the grid layout, attenuate every instrument's level
//! at the listening point, and sum the results back to one decibel figure.
//!
//! Per-instrument attenuated levels are combined in the intensity domain,
//! `10^(dB/10)` per source, summed, then `10 * log10(sum)`. This treats dB
//! values as directly summable intensity-equivalents; it is deliberately
//! distinct from the pressure-based watt conversions in [`crate::acoustics`].

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::acoustics;
use crate::catalog::{Catalog, ResolvedCatalog};
use crate::error::{FortissimoError, Result};
use crate::layout::{self, Ensemble};

/// Default target instrument count: enough players to render the piece in
/// half a second, per the thought experiment that started this
pub const DEFAULT_TARGET_COUNT: usize = 576_000;

/// Default grid spacing in meters; covers the instrument and the performer
pub const DEFAULT_SPACING_M: f64 = 0.5;

// ============================================================================
// Configuration
// ============================================================================

/// Everything the pipeline needs for one run.
///
/// Round-trips through JSON so the numbers can be changed without
/// recompiling. `Default` is the massed Beethoven Ninth scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Total instruments to place, at the least
    pub target_count: usize,
    /// Grid spacing between instruments, in meters
    pub spacing_m: f64,
    /// Listening position override; defaults to the grid's geometric center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listener: Option<(f64, f64)>,
    /// Instrument types making up one ensemble unit
    pub catalog: Catalog,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            spacing_m: DEFAULT_SPACING_M,
            listener: None,
            catalog: Catalog::beethoven_ninth(),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Outcome of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Instruments in one canonical ensemble unit
    pub instruments_per_unit: u64,
    /// Computed row length of the layout grid
    pub row_length: usize,
    /// Instruments actually placed (may overshoot the target by less than
    /// one unit)
    pub total_placed: usize,
    /// Listening position used, in meters
    pub target_point: (f64, f64),
    /// Sum of per-instrument linear intensity-equivalents
    pub aggregate_intensity: f64,
    /// Combined level at the listening position
    pub combined_dbspl: f64,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the full pipeline: catalog resolution, layout, aggregation.
///
/// # Errors
/// `ConfigurationError` when the catalog cannot be resolved;
/// `MathDomain` when the acoustic math receives an invalid input.
pub fn run(config: &SimulationConfig) -> Result<Report> {
    let resolved = config.catalog.resolve()?;
    info!(
        "catalog resolved: {} types, {} instruments per unit",
        resolved.len(),
        resolved.instruments_per_unit()
    );

    let ensemble = layout::generate(&resolved, config.target_count, config.spacing_m);
    info!(
        "placed {} instruments in rows of {}",
        ensemble.len(),
        ensemble.row_length()
    );

    let target_point = config.listener.unwrap_or_else(|| ensemble.center());
    debug!("listening at ({}, {})", target_point.0, target_point.1);

    let (aggregate_intensity, combined_dbspl) =
        aggregate_at(&ensemble, &resolved, target_point)?;

    Ok(Report {
        instruments_per_unit: resolved.instruments_per_unit(),
        row_length: ensemble.row_length(),
        total_placed: ensemble.len(),
        target_point,
        aggregate_intensity,
        combined_dbspl,
    })
}

/// Combine every placed instrument's attenuated level at `target_point`.
///
/// Returns the aggregate linear intensity sum and its decibel equivalent.
pub fn aggregate_at(
    ensemble: &Ensemble,
    catalog: &ResolvedCatalog,
    target_point: (f64, f64),
) -> Result<(f64, f64)> {
    let (tx, ty) = target_point;
    let mut aggregate = 0.0_f64;
    for placed in ensemble.iter() {
        let distance = ((tx - placed.x).powi(2) + (ty - placed.y).powi(2)).sqrt();
        let dbspl = acoustics::dbspl_loss(catalog.instrument(placed.instrument).dbspl, distance)?;
        aggregate += 10.0_f64.powf(dbspl / 10.0);
    }

    if aggregate <= 0.0 {
        return Err(FortissimoError::MathDomain {
            operation: "aggregate_at",
            detail: "log of non-positive aggregate intensity (empty ensemble)".to_string(),
        });
    }

    Ok((aggregate, 10.0 * aggregate.log10()))
}
