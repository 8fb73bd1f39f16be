//! Error handling for Fortissimo
//!
//! Two fatal error families: configuration problems caught before layout
//! begins, and math domain violations raised by the acoustic conversions.
//! There is no recoverable-error path; every failure terminates the run.

use thiserror::Error;

/// Result type alias for Fortissimo operations
pub type Result<T> = std::result::Result<T, FortissimoError>;

/// Main error type for Fortissimo operations
#[derive(Error, Debug)]
pub enum FortissimoError {
    // Configuration Errors
    #[error("Instrument '{name}' has no resolvable dB SPL value (no measured dB and no watt/area pair)")]
    UnresolvableInstrument { name: String },

    #[error("Duplicate instrument type '{name}' in catalog")]
    DuplicateInstrument { name: String },

    #[error("Catalog places no instruments (total per-unit count is zero)")]
    EmptyCatalog,

    // Math Domain Errors
    #[error("Math domain error in {operation}: {detail}")]
    MathDomain {
        operation: &'static str,
        detail: String,
    },

    // I/O Errors (configuration surface only)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FortissimoError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            FortissimoError::UnresolvableInstrument { .. } => "CONFIGURATION_ERROR",
            FortissimoError::DuplicateInstrument { .. } => "CONFIGURATION_ERROR",
            FortissimoError::EmptyCatalog => "CONFIGURATION_ERROR",
            FortissimoError::MathDomain { .. } => "MATH_DOMAIN_ERROR",
            FortissimoError::Io(_) => "IO_ERROR",
            FortissimoError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}
