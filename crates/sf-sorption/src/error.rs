//! Error types for sorption helpers and curve fitting.

use sf_eos::EosError;
use sf_fluids::FluidError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SorptionError {
    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("EOS error: {0}")]
    Eos(#[from] EosError),
}

pub type SorptionResult<T> = Result<T, SorptionError>;

/// Errors from the least-squares fitter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Normal equations are singular")]
    Singular,

    #[error("Fit did not converge after {iterations} iterations (residual sum of squares {rss:e})")]
    Convergence { iterations: usize, rss: f64 },

    #[error("Non-finite value in {what}")]
    NonFinite { what: &'static str },
}

pub type FitResult<T> = Result<T, FitError>;
