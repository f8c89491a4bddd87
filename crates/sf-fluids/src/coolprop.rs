//! CoolProp-based gas property provider.

use crate::error::{FluidError, FluidResult};
use crate::gas::Gas;
use crate::provider::{GasPropertyProvider, validation};
use rfluids::prelude::*;
use sf_core::units::constants::P_ATM_PA;
use sf_core::units::{Pressure, Temperature, k, pa};

/// CoolProp backend for gas properties.
///
/// Thread-safe: rfluids Fluid instances are created per query and never shared.
pub struct CoolPropProvider {
    // Reference state used for trivial (state-independent) outputs.
    ref_p_pa: f64,
    ref_t_k: f64,
}

impl Default for CoolPropProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CoolPropProvider {
    /// Create a new CoolProp provider.
    pub fn new() -> Self {
        Self {
            ref_p_pa: P_ATM_PA,
            ref_t_k: 300.0,
        }
    }

    /// Create a Fluid instance at given P,T state.
    fn fluid_at_pt(&self, gas: Gas, p_pa: f64, t_k: f64) -> FluidResult<Fluid> {
        Fluid::from(gas.rfluids_pure())
            .in_state(FluidInput::pressure(p_pa), FluidInput::temperature(t_k))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error for {gas} at P={p_pa} Pa, T={t_k} K: {e}"),
            })
    }

    fn reference_fluid(&self, gas: Gas) -> FluidResult<Fluid> {
        self.fluid_at_pt(gas, self.ref_p_pa, self.ref_t_k)
    }
}

fn backend_err(what: &str, e: impl std::fmt::Display) -> FluidError {
    FluidError::Backend {
        message: format!("rfluids error getting {what}: {e}"),
    }
}

impl GasPropertyProvider for CoolPropProvider {
    fn name(&self) -> &str {
        "CoolProp"
    }

    fn critical_temperature(&self, gas: Gas) -> FluidResult<Temperature> {
        let mut fluid = self.reference_fluid(gas)?;
        let tc = fluid
            .critical_temperature()
            .map_err(|e| backend_err("critical temperature", e))?;
        let tc = k(tc);
        validation::validate_temperature(tc)?;
        Ok(tc)
    }

    fn critical_pressure(&self, gas: Gas) -> FluidResult<Pressure> {
        let mut fluid = self.reference_fluid(gas)?;
        let pc = fluid
            .critical_pressure()
            .map_err(|e| backend_err("critical pressure", e))?;
        let pc = pa(pc);
        validation::validate_pressure(pc)?;
        Ok(pc)
    }

    fn acentric_factor(&self, gas: Gas) -> FluidResult<f64> {
        let mut fluid = self.reference_fluid(gas)?;
        let omega = fluid
            .acentric_factor()
            .map_err(|e| backend_err("acentric factor", e))?;
        validation::validate_acentric(omega)?;
        Ok(omega)
    }

    fn compressibility_factor(&self, p: Pressure, t: Temperature, gas: Gas) -> FluidResult<f64> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;

        let mut fluid = self.fluid_at_pt(gas, p.value, t.value)?;
        let z = fluid
            .compressibility()
            .map_err(|e| backend_err("compressibility factor", e))?;

        validation::validate_compressibility(z)?;
        tracing::trace!(gas = %gas, p_pa = p.value, t_k = t.value, z, "coolprop compressibility");
        Ok(z)
    }

    fn normal_boiling_temperature(&self, gas: Gas) -> FluidResult<Temperature> {
        let mut fluid = Fluid::from(gas.rfluids_pure())
            .in_state(FluidInput::pressure(P_ATM_PA), FluidInput::quality(0.0))
            .map_err(|e| FluidError::Backend {
                message: format!("rfluids error for saturated {gas} at 1 atm: {e}"),
            })?;
        let tb = fluid
            .temperature()
            .map_err(|e| backend_err("saturation temperature", e))?;
        let tb = k(tb);
        validation::validate_temperature(tb)?;
        Ok(tb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_name() {
        let provider = CoolPropProvider::new();
        assert_eq!(provider.name(), "CoolProp");
    }

    #[test]
    fn rejects_non_physical_state_before_backend_call() {
        let provider = CoolPropProvider::new();
        let err = provider
            .compressibility_factor(pa(-1.0), k(300.0), Gas::Nitrogen)
            .unwrap_err();
        assert!(matches!(err, FluidError::NonPhysical { .. }));

        let err = provider
            .compressibility_factor(pa(1.0e5), k(0.0), Gas::Nitrogen)
            .unwrap_err();
        assert!(matches!(err, FluidError::NonPhysical { .. }));
    }
}
