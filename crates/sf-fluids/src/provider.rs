//! Gas property provider trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::gas::Gas;
use sf_core::units::{Pressure, Temperature};

/// Source of the gas properties the equation-of-state solvers need.
///
/// Implementations must be thread-safe (Send + Sync) so batch solves can share one
/// provider across rayon workers. All returned values are SI.
pub trait GasPropertyProvider: Send + Sync {
    /// Get the provider name (for debugging/logging).
    fn name(&self) -> &str;

    /// Critical temperature [K].
    fn critical_temperature(&self, gas: Gas) -> FluidResult<Temperature>;

    /// Critical pressure [Pa].
    fn critical_pressure(&self, gas: Gas) -> FluidResult<Pressure>;

    /// Pitzer acentric factor (dimensionless).
    fn acentric_factor(&self, gas: Gas) -> FluidResult<f64>;

    /// Real-gas compressibility factor Z at (P, T).
    fn compressibility_factor(&self, p: Pressure, t: Temperature, gas: Gas) -> FluidResult<f64>;

    /// Saturation temperature at one standard atmosphere [K].
    ///
    /// Only needed by the reduced-Kirchhoff pseudo-saturation pressure.
    fn normal_boiling_temperature(&self, _gas: Gas) -> FluidResult<Temperature> {
        Err(FluidError::NotSupported {
            what: "normal boiling temperature",
        })
    }
}

/// Validation helpers for provider inputs and outputs.
pub(crate) mod validation {
    use super::*;

    /// Ensure pressure is positive and finite.
    pub fn validate_pressure(p: Pressure) -> FluidResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure a compressibility factor is positive and finite.
    pub fn validate_compressibility(z: f64) -> FluidResult<()> {
        if !z.is_finite() || z <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "compressibility factor must be positive and finite",
            });
        }
        Ok(())
    }

    /// Acentric factors are finite; a few quantum gases have small negative values.
    pub fn validate_acentric(omega: f64) -> FluidResult<()> {
        if !omega.is_finite() || omega <= -1.0 {
            return Err(FluidError::NonPhysical {
                what: "acentric factor must be finite and > -1",
            });
        }
        Ok(())
    }
}
