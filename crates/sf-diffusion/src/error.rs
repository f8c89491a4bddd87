//! Error types for the diffusion solution and rig scenario.

use sf_core::{ConvertError, CoreError};
use sf_eos::EosError;
use sf_fluids::FluidError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffusionError {
    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Root search exhausted: requested {requested} roots, found {found}")]
    RootSearchExhausted { requested: usize, found: usize },

    #[error("EOS error: {0}")]
    Eos(#[from] EosError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Unit error: {0}")]
    Convert(#[from] ConvertError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type DiffusionResult<T> = Result<T, DiffusionError>;

impl From<CoreError> for DiffusionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, .. } | CoreError::InvalidArg { what } => {
                DiffusionError::Domain { what }
            }
        }
    }
}
