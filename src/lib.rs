//! Fortissimo - Massed-Ensemble Sound Pressure Simulation
//!
//! Estimates the combined sound pressure level, in decibels, produced by a
//! large ensemble of musical instruments arranged on a 2D plane, as
//! perceived at a single listening point. Models free-field inverse-square
//! decay with distance and the power-domain combination of independent
//! sound sources.
//!
//! # Architecture
//!
//! One linear pipeline, four stages:
//! 1. Catalog - instrument types, counts, ratings, resolved dB SPL values
//! 2. Acoustics - pure watt/dB SPL conversions and distance attenuation
//! 3. Layout - deterministic 2D grid placement of the replicated ensemble
//! 4. Simulation - per-instrument attenuation, intensity summation, report

pub mod acoustics;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod layout;
pub mod simulation;

pub use error::{FortissimoError, Result};
pub use simulation::{run, Report, SimulationConfig};
