//! Measured gas state.

use crate::error::{EosError, EosResult};
use sf_core::units::constants::R_J_PER_MOL_K;
use sf_core::units::{Pressure, Temperature, Volume, k, m3, pa};
use sf_fluids::Gas;

/// Pressure, volume, temperature and gas of one rig reading.
///
/// All quantities are SI; construction rejects non-positive or non-finite values so the
/// solvers never see them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasState {
    p: Pressure,
    v: Volume,
    t: Temperature,
    gas: Gas,
}

impl GasState {
    pub fn new(p: Pressure, v: Volume, t: Temperature, gas: Gas) -> EosResult<Self> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(EosError::Domain {
                what: "pressure must be positive and finite",
            });
        }
        if !v.value.is_finite() || v.value <= 0.0 {
            return Err(EosError::Domain {
                what: "volume must be positive and finite",
            });
        }
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(EosError::Domain {
                what: "temperature must be positive and finite",
            });
        }
        Ok(Self { p, v, t, gas })
    }

    /// Build from raw SI scalars (Pa, m³, K).
    pub fn from_si(p_pa: f64, v_m3: f64, t_k: f64, gas: Gas) -> EosResult<Self> {
        Self::new(pa(p_pa), m3(v_m3), k(t_k), gas)
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn volume(&self) -> Volume {
        self.v
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn gas(&self) -> Gas {
        self.gas
    }

    /// P·V/(R·T) [mol].
    pub fn ideal_moles(&self) -> f64 {
        self.p.value * self.v.value / (R_J_PER_MOL_K * self.t.value)
    }
}
