//! Ensemble Layout Generator
//!
//! Places instrument instances on a 2D grid, replicating the canonical
//! catalog composition until a target total count is reached. Placement is
//! fully deterministic: for a fixed catalog, target count, and spacing the
//! generated coordinate sequence is identical on every run.
//!
//! Termination is checked only between full catalog passes, so a run may
//! overshoot the target by up to one ensemble unit. It never undershoots.
//! This keeps the composition ratio of the final grid exact and is
//! intentional, observable behavior: the extra instruments contribute to
//! the aggregate level.

use crate::catalog::ResolvedCatalog;

/// One instrument instance at a concrete grid position.
///
/// `instrument` indexes into the resolved catalog that produced the
/// ensemble. Coordinates are meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedInstrument {
    pub instrument: usize,
    pub x: f64,
    pub y: f64,
}

/// The full set of placed instruments plus the grid parameters that
/// produced it. Built once, read-only afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    placements: Vec<PlacedInstrument>,
    row_length: usize,
    spacing_m: f64,
}

impl Ensemble {
    pub fn iter(&self) -> std::slice::Iter<'_, PlacedInstrument> {
        self.placements.iter()
    }

    /// Total instruments actually placed
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Instruments per grid row
    pub fn row_length(&self) -> usize {
        self.row_length
    }

    pub fn spacing_m(&self) -> f64 {
        self.spacing_m
    }

    /// Approximate geometric center of the occupied grid: half the row
    /// width across, half the completed rows down.
    pub fn center(&self) -> (f64, f64) {
        let rows = self.placements.len() / self.row_length;
        (
            self.row_length as f64 * self.spacing_m / 2.0,
            rows as f64 * self.spacing_m / 2.0,
        )
    }
}

/// Instruments per grid row: the square-root estimate of the target count,
/// snapped down to the nearest multiple of the ensemble unit size, but
/// never below one full unit.
pub fn row_length(target_count: usize, instruments_per_unit: u64) -> usize {
    let unit = instruments_per_unit as usize;
    let estimate = (target_count as f64).sqrt().floor() as usize;
    ((estimate / unit) * unit).max(unit)
}

/// Generate the grid placement for `target_count` instruments.
///
/// Walks the catalog in declaration order, placing each type's per-unit
/// count of instances consecutively; the global index maps to grid
/// coordinates row-major at `spacing_m` meters apart. The catalog is
/// already validated, so one pass always places at least one instrument.
pub fn generate(catalog: &ResolvedCatalog, target_count: usize, spacing_m: f64) -> Ensemble {
    let row_length = row_length(target_count, catalog.instruments_per_unit());

    let mut placements = Vec::with_capacity(
        target_count.saturating_add(catalog.instruments_per_unit() as usize),
    );
    let mut i = 0usize;
    while i < target_count {
        for (index, instrument) in catalog.iter().enumerate() {
            for _ in 0..instrument.count {
                let row = i / row_length;
                let col = i % row_length;
                placements.push(PlacedInstrument {
                    instrument: index,
                    x: col as f64 * spacing_m,
                    y: row as f64 * spacing_m,
                });
                i += 1;
            }
        }
    }

    Ensemble {
        placements,
        row_length,
        spacing_m,
    }
}
