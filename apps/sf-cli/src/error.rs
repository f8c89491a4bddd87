//! Error type for the command-line front-end.

use sf_core::ConvertError;
use sf_diffusion::DiffusionError;
use sf_eos::EosError;
use sf_fluids::FluidError;
use sf_sorption::SorptionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Unit error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("EOS error: {0}")]
    Eos(#[from] EosError),

    #[error("Diffusion error: {0}")]
    Diffusion(#[from] DiffusionError),

    #[error("Sorption error: {0}")]
    Sorption(#[from] SorptionError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
