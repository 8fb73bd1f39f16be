//! Acoustic Unit Conversions
//!
//! Pure conversions between acoustic power (watts) and sound pressure level
//! (dB SPL), plus free-field distance attenuation per the inverse-square law.
//! All functions are stateless f64 math; invalid physical inputs (zero area,
//! negative power, negative distance) are fatal math domain errors rather
//! than silently-recovered cases.

use crate::error::{FortissimoError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Reference sound pressure: 20 micro-pascals, the minimum audible pressure
pub const REFERENCE_PRESSURE_PA: f64 = 20e-6;

/// Near-field reference distance in meters, approximating the distance from
/// a performer's head to the body of the instrument. Listeners closer than
/// this receive no attenuation (and no boost).
pub const NEAR_FIELD_DISTANCE_M: f64 = 0.3;

// ============================================================================
// Conversions
// ============================================================================

/// Convert acoustic power to sound pressure level.
///
/// The emitted pressure is `sqrt(power / area)`; the level is
/// `20 * log10(pressure / P0)` with `P0` the 20 µPa hearing threshold.
///
/// # Errors
/// `MathDomain` when `area_m2` is not strictly positive, or `power_watts`
/// is negative (sqrt domain) or zero (log domain).
pub fn watts_to_dbspl(power_watts: f64, area_m2: f64) -> Result<f64> {
    if area_m2 <= 0.0 {
        return Err(FortissimoError::MathDomain {
            operation: "watts_to_dbspl",
            detail: format!("emission area must be positive, got {} m^2", area_m2),
        });
    }
    if power_watts < 0.0 {
        return Err(FortissimoError::MathDomain {
            operation: "watts_to_dbspl",
            detail: format!("power must be non-negative, got {} W", power_watts),
        });
    }

    let pressure = (power_watts / area_m2).sqrt();
    if pressure <= 0.0 {
        return Err(FortissimoError::MathDomain {
            operation: "watts_to_dbspl",
            detail: "log of non-positive pressure (zero power)".to_string(),
        });
    }

    Ok(20.0 * (pressure / REFERENCE_PRESSURE_PA).log10())
}

/// Convert sound pressure level back to acoustic power.
///
/// Exact inverse of [`watts_to_dbspl`] apart from floating-point rounding.
///
/// # Errors
/// `MathDomain` when `area_m2` is negative.
pub fn dbspl_to_watts(dbspl: f64, area_m2: f64) -> Result<f64> {
    if area_m2 < 0.0 {
        return Err(FortissimoError::MathDomain {
            operation: "dbspl_to_watts",
            detail: format!("emission area must be non-negative, got {} m^2", area_m2),
        });
    }

    let pressure = 10.0_f64.powf(dbspl / 20.0) * REFERENCE_PRESSURE_PA;
    Ok(pressure * pressure * area_m2)
}

/// Apply inverse-square-law attenuation to a level at the given distance.
///
/// Zero distance means the listener is at the source: the level passes
/// through unchanged. Distances inside [`NEAR_FIELD_DISTANCE_M`] produce no
/// boost; only points farther away lose level, by
/// `20 * log10(distance / 0.3)` dB.
///
/// # Errors
/// `MathDomain` when `distance_m` is negative.
pub fn dbspl_loss(dbspl: f64, distance_m: f64) -> Result<f64> {
    if distance_m < 0.0 {
        return Err(FortissimoError::MathDomain {
            operation: "dbspl_loss",
            detail: format!("distance must be non-negative, got {} m", distance_m),
        });
    }
    if distance_m == 0.0 {
        return Ok(dbspl);
    }

    let loss = 20.0 * (distance_m / NEAR_FIELD_DISTANCE_M).log10();
    Ok(dbspl - loss.max(0.0))
}

// ============================================================================
// Tests
// ============================================================================
