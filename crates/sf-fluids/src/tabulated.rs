//! Tabulated gas properties.
//!
//! Critical constants and acentric factors from NIST reference data. The compressibility
//! factor is a fixed value (1.0 unless overridden), which makes this provider a
//! deterministic stand-in for CoolProp in tests and offline runs.

use crate::error::{FluidError, FluidResult};
use crate::gas::Gas;
use crate::provider::{GasPropertyProvider, validation};
use sf_core::units::{Pressure, Temperature, k, pa};

/// Critical-point data for one gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalConstants {
    pub gas: Gas,
    /// Critical temperature [K]
    pub tc_k: f64,
    /// Critical pressure [Pa]
    pub pc_pa: f64,
    /// Acentric factor
    pub acentric: f64,
    /// Normal boiling temperature [K]; `None` where the gas sublimes at 1 atm
    pub tb_k: Option<f64>,
}

const CRITICAL_TABLE: [CriticalConstants; 10] = [
    CriticalConstants {
        gas: Gas::Methane,
        tc_k: 190.564,
        pc_pa: 4.5992e6,
        acentric: 0.01142,
        tb_k: Some(111.667),
    },
    CriticalConstants {
        gas: Gas::CarbonDioxide,
        tc_k: 304.1282,
        pc_pa: 7.3773e6,
        acentric: 0.22394,
        tb_k: None,
    },
    CriticalConstants {
        gas: Gas::Helium,
        tc_k: 5.1953,
        pc_pa: 2.2832e5,
        acentric: -0.385,
        tb_k: Some(4.222),
    },
    CriticalConstants {
        gas: Gas::Nitrogen,
        tc_k: 126.192,
        pc_pa: 3.3958e6,
        acentric: 0.0372,
        tb_k: Some(77.355),
    },
    CriticalConstants {
        gas: Gas::Hydrogen,
        tc_k: 33.145,
        pc_pa: 1.2964e6,
        acentric: -0.219,
        tb_k: Some(20.369),
    },
    CriticalConstants {
        gas: Gas::Argon,
        tc_k: 150.687,
        pc_pa: 4.863e6,
        acentric: -0.00219,
        tb_k: Some(87.302),
    },
    CriticalConstants {
        gas: Gas::Oxygen,
        tc_k: 154.581,
        pc_pa: 5.043e6,
        acentric: 0.0222,
        tb_k: Some(90.188),
    },
    CriticalConstants {
        gas: Gas::Ethane,
        tc_k: 305.322,
        pc_pa: 4.8722e6,
        acentric: 0.0995,
        tb_k: Some(184.57),
    },
    CriticalConstants {
        gas: Gas::Propane,
        tc_k: 369.89,
        pc_pa: 4.2512e6,
        acentric: 0.1521,
        tb_k: Some(231.036),
    },
    CriticalConstants {
        gas: Gas::Water,
        tc_k: 647.096,
        pc_pa: 22.064e6,
        acentric: 0.3443,
        tb_k: Some(373.124),
    },
];

impl CriticalConstants {
    /// Look up the tabulated entry for `gas`.
    pub fn of(gas: Gas) -> FluidResult<&'static CriticalConstants> {
        CRITICAL_TABLE
            .iter()
            .find(|entry| entry.gas == gas)
            .ok_or_else(|| FluidError::UnknownGas {
                name: gas.key().to_string(),
            })
    }
}

/// Provider backed by the static critical-constant table and a fixed Z.
#[derive(Debug, Clone)]
pub struct TabulatedProvider {
    compressibility: f64,
}

impl Default for TabulatedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TabulatedProvider {
    /// Ideal-gas compressibility (Z = 1).
    pub fn new() -> Self {
        Self {
            compressibility: 1.0,
        }
    }

    /// Report a fixed compressibility factor for every state.
    pub fn with_compressibility(z: f64) -> FluidResult<Self> {
        validation::validate_compressibility(z)?;
        Ok(Self { compressibility: z })
    }
}

impl GasPropertyProvider for TabulatedProvider {
    fn name(&self) -> &str {
        "Tabulated"
    }

    fn critical_temperature(&self, gas: Gas) -> FluidResult<Temperature> {
        Ok(k(CriticalConstants::of(gas)?.tc_k))
    }

    fn critical_pressure(&self, gas: Gas) -> FluidResult<Pressure> {
        Ok(pa(CriticalConstants::of(gas)?.pc_pa))
    }

    fn acentric_factor(&self, gas: Gas) -> FluidResult<f64> {
        Ok(CriticalConstants::of(gas)?.acentric)
    }

    fn compressibility_factor(&self, p: Pressure, t: Temperature, _gas: Gas) -> FluidResult<f64> {
        validation::validate_pressure(p)?;
        validation::validate_temperature(t)?;
        Ok(self.compressibility)
    }

    fn normal_boiling_temperature(&self, gas: Gas) -> FluidResult<Temperature> {
        CriticalConstants::of(gas)?
            .tb_k
            .map(k)
            .ok_or(FluidError::NotSupported {
                what: "gas has no normal boiling point (sublimes at 1 atm)",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gas_is_tabulated() {
        for gas in Gas::ALL {
            let entry = CriticalConstants::of(gas).unwrap();
            assert!(entry.tc_k > 0.0 && entry.pc_pa > 0.0, "{gas}");
        }
    }

    #[test]
    fn methane_critical_point() {
        let provider = TabulatedProvider::new();
        let tc = provider.critical_temperature(Gas::Methane).unwrap();
        let pc = provider.critical_pressure(Gas::Methane).unwrap();
        assert!((tc.value - 190.564).abs() < 1e-9);
        assert!((pc.value - 4.5992e6).abs() < 1e-3);
    }

    #[test]
    fn default_compressibility_is_ideal() {
        let provider = TabulatedProvider::new();
        let z = provider
            .compressibility_factor(pa(1.0e6), k(300.0), Gas::Methane)
            .unwrap();
        assert_eq!(z, 1.0);
    }

    #[test]
    fn fixed_compressibility_is_validated() {
        assert!(TabulatedProvider::with_compressibility(0.9).is_ok());
        assert!(TabulatedProvider::with_compressibility(0.0).is_err());
        assert!(TabulatedProvider::with_compressibility(f64::NAN).is_err());
    }

    #[test]
    fn carbon_dioxide_has_no_normal_boiling_point() {
        let provider = TabulatedProvider::new();
        assert!(matches!(
            provider.normal_boiling_temperature(Gas::CarbonDioxide),
            Err(FluidError::NotSupported { .. })
        ));
        let tb = provider.normal_boiling_temperature(Gas::Nitrogen).unwrap();
        assert!((tb.value - 77.355).abs() < 1e-9);
    }

    #[test]
    fn compressibility_rejects_bad_state() {
        let provider = TabulatedProvider::new();
        assert!(
            provider
                .compressibility_factor(pa(0.0), k(300.0), Gas::Helium)
                .is_err()
        );
    }
}
