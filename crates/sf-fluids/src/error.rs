//! Gas property errors.

use sf_core::CoreError;
use thiserror::Error;

/// Result type for gas property operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while providing gas properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Gas identifier not recognized (by name, or by the backend in use).
    #[error("Unknown gas: {name}")]
    UnknownGas { name: String },

    /// Non-physical values (negative pressure, Z <= 0, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Property not available from this provider.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Backend (CoolProp) error.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<CoreError> for FluidError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, .. } | CoreError::InvalidArg { what } => {
                FluidError::NonPhysical { what }
            }
        }
    }
}
