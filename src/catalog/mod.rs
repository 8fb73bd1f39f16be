//! Instrument Catalog
//!
//! Instrument types with per-ensemble counts, optional acoustic power
//! ratings, optional emission areas, and measured or derived sound pressure
//! levels. The catalog is validated and resolved once before any layout
//! happens: every type must end up with a concrete dB SPL value, either
//! measured directly or derived from its watt rating and emission area.
//!
//! Iteration order is declaration order and is part of the contract; the
//! layout generator walks the catalog in this order on every pass.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::acoustics;
use crate::error::{FortissimoError, Result};

// ============================================================================
// Instrument specification
// ============================================================================

/// One instrument type as configured: counts plus optional acoustic data.
///
/// `watts` and `area_m2` may be absent when only a measured level is known;
/// `dbspl` may be absent when the level is to be derived from the rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub name: String,
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbspl: Option<f64>,
}

impl InstrumentSpec {
    /// Type with a directly measured dB SPL value
    pub fn measured(name: &str, count: u32, dbspl: f64) -> Self {
        Self {
            name: name.to_string(),
            count,
            watts: None,
            area_m2: None,
            dbspl: Some(dbspl),
        }
    }

    /// Type with only a watt rating and emission area; the dB SPL value is
    /// derived during catalog resolution
    pub fn rated(name: &str, count: u32, watts: f64, area_m2: f64) -> Self {
        Self {
            name: name.to_string(),
            count,
            watts: Some(watts),
            area_m2: Some(area_m2),
            dbspl: None,
        }
    }

    /// Attach a watt rating and emission area to a measured type
    pub fn with_rating(mut self, watts: f64, area_m2: f64) -> Self {
        self.watts = Some(watts);
        self.area_m2 = Some(area_m2);
        self
    }

    /// Resolve this type's dB SPL value: a measured value wins, otherwise
    /// derive from the watt rating and emission area.
    fn resolve_dbspl(&self) -> Result<f64> {
        if let Some(dbspl) = self.dbspl {
            return Ok(dbspl);
        }
        match (self.watts, self.area_m2) {
            (Some(watts), Some(area)) => acoustics::watts_to_dbspl(watts, area),
            _ => Err(FortissimoError::UnresolvableInstrument {
                name: self.name.clone(),
            }),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Ordered collection of instrument types defining one ensemble unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    instruments: Vec<InstrumentSpec>,
}

impl Catalog {
    pub fn new(instruments: Vec<InstrumentSpec>) -> Self {
        Self { instruments }
    }

    /// The instrumentation of Beethoven's Ninth Symphony, with measured
    /// levels where available and watt ratings elsewhere. The triangle has
    /// no measured value and resolves from its rating.
    pub fn beethoven_ninth() -> Self {
        let triangle_area = 0.1524 * 0.1524 / 2.0;
        Self::new(vec![
            InstrumentSpec::measured("piccolo", 1, 106.0).with_rating(0.08, 0.08),
            InstrumentSpec::measured("flute", 2, 103.0).with_rating(0.06, 0.06),
            InstrumentSpec::measured("oboe", 2, 112.0),
            InstrumentSpec::measured("clarinet", 2, 114.0).with_rating(0.05, 0.05),
            InstrumentSpec::measured("bassoon", 2, 110.0),
            InstrumentSpec::measured("horn", 4, 106.0).with_rating(0.15, 0.15),
            InstrumentSpec::measured("trumpet", 2, 110.0).with_rating(0.31, 0.31),
            InstrumentSpec::measured("trombone", 3, 114.0),
            InstrumentSpec::measured("timpani", 1, 106.0),
            InstrumentSpec::measured("bassdrum", 1, 106.0).with_rating(25.0, 25.0),
            InstrumentSpec::rated("triangle", 1, 0.05, triangle_area),
            InstrumentSpec::measured("cymbals", 1, 119.5).with_rating(9.5, 9.5),
            InstrumentSpec::measured("soprano", 1, 90.0),
            InstrumentSpec::measured("alto", 1, 90.0),
            InstrumentSpec::measured("tenor", 1, 90.0),
            InstrumentSpec::measured("bass", 1, 90.0).with_rating(0.03, 0.03),
            InstrumentSpec::measured("violin", 2, 122.2),
            InstrumentSpec::measured("viola", 1, 119.6),
            InstrumentSpec::measured("cello", 1, 111.0),
            InstrumentSpec::measured("double bass", 1, 113.6).with_rating(0.16, 0.16),
        ])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstrumentSpec> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Validate the catalog and resolve every type to a concrete dB SPL
    /// value. Fails fast on duplicate names, unresolvable types, and
    /// catalogs that place nothing at all.
    pub fn resolve(&self) -> Result<ResolvedCatalog> {
        let mut seen: HashSet<&str> = HashSet::new();
        for spec in &self.instruments {
            if !seen.insert(spec.name.as_str()) {
                return Err(FortissimoError::DuplicateInstrument {
                    name: spec.name.clone(),
                });
            }
        }

        let mut instruments = Vec::with_capacity(self.instruments.len());
        for spec in &self.instruments {
            instruments.push(ResolvedInstrument {
                name: spec.name.clone(),
                count: spec.count,
                dbspl: spec.resolve_dbspl()?,
            });
        }

        let instruments_per_unit = instruments.iter().map(|i| u64::from(i.count)).sum();
        if instruments_per_unit == 0 {
            return Err(FortissimoError::EmptyCatalog);
        }

        Ok(ResolvedCatalog {
            instruments,
            instruments_per_unit,
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::beethoven_ninth()
    }
}

// ============================================================================
// Resolved catalog
// ============================================================================

/// One instrument type after validation: its level is always concrete
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstrument {
    pub name: String,
    pub count: u32,
    pub dbspl: f64,
}

/// Validated catalog; the only form layout and aggregation ever see
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCatalog {
    instruments: Vec<ResolvedInstrument>,
    instruments_per_unit: u64,
}

impl ResolvedCatalog {
    /// Total instruments in one ensemble unit (sum of per-type counts)
    pub fn instruments_per_unit(&self) -> u64 {
        self.instruments_per_unit
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedInstrument> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn instrument(&self, index: usize) -> &ResolvedInstrument {
        &self.instruments[index]
    }
}

// ============================================================================
// Tests
// ============================================================================
