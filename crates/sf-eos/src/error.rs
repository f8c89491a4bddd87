//! Error types for mole solves.

use sf_core::CoreError;
use sf_fluids::FluidError;
use thiserror::Error;

/// Errors that can occur while inverting a gas state for moles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// Non-positive or non-finite physical input, or an update that left the physical domain.
    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    /// Gas not known to the table or provider the variant relies on.
    #[error("Unknown gas '{name}' ({context})")]
    UnknownGas { name: String, context: &'static str },

    /// EOS variant name not recognized.
    #[error("Unknown equation of state: {name}")]
    UnknownVariant { name: String },

    /// Fixed-point loop hit its iteration cap.
    #[error(
        "Convergence failed after {iterations} iterations (relative change {relative_change:e})"
    )]
    Convergence {
        iterations: usize,
        relative_change: f64,
    },

    /// Provider failure other than an unknown gas or non-physical value.
    #[error("Property error: {0}")]
    Property(FluidError),
}

pub type EosResult<T> = Result<T, EosError>;

impl From<FluidError> for EosError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::UnknownGas { name } => EosError::UnknownGas {
                name,
                context: "property provider",
            },
            FluidError::NonPhysical { what } => EosError::Domain { what },
            other => EosError::Property(other),
        }
    }
}

impl From<CoreError> for EosError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, .. } | CoreError::InvalidArg { what } => {
                EosError::Domain { what }
            }
        }
    }
}
