//! Pseudo-saturation pressure for adsorption of supercritical gases.

use crate::error::{SorptionError, SorptionResult};
use sf_core::units::{Pressure, Temperature, pa};
use sf_fluids::{Gas, GasPropertyProvider};
use std::fmt;

/// How the pseudo-saturation pressure is estimated. There is no default method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaturationMethod {
    /// Use the given pressure as is
    Fixed(Pressure),
    /// `Pc·(T/Tc)²`
    Dubinin,
    /// `Pc·(T/Tc)^k`
    Amankwah { k: f64 },
    /// `Pc·exp((Tb/Tc)·(ln Pc/(1 − Tb/Tc))·(1 − Tc/T))`, Tb the normal boiling point
    ReducedKirchhoff,
}

impl SaturationMethod {
    /// Parse a method name. Amankwah requires its exponent; a fixed pressure is built directly.
    pub fn from_name(name: &str, amankwah_k: Option<f64>) -> SorptionResult<Self> {
        match name.trim().to_lowercase().replace('-', "_").as_str() {
            "dubinin" => Ok(Self::Dubinin),
            "amankwah" => amankwah_k
                .map(|k| Self::Amankwah { k })
                .ok_or(SorptionError::Domain {
                    what: "amankwah method requires an explicit exponent k",
                }),
            "reduced_kirchhoff" | "reduced_kirchoff" | "kirchhoff" => Ok(Self::ReducedKirchhoff),
            _ => Err(SorptionError::Domain {
                what: "unknown pseudo-saturation method",
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Dubinin => "dubinin",
            Self::Amankwah { .. } => "amankwah",
            Self::ReducedKirchhoff => "reduced-kirchhoff",
        }
    }
}

impl fmt::Display for SaturationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pseudo-saturation pressure of `gas` at temperature `t`.
pub fn pseudo_saturation_pressure(
    method: SaturationMethod,
    gas: Gas,
    t: Temperature,
    provider: &dyn GasPropertyProvider,
) -> SorptionResult<Pressure> {
    let t_k = t.value;
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(SorptionError::Domain {
            what: "temperature must be positive and finite",
        });
    }

    let ps = match method {
        SaturationMethod::Fixed(p) => p.value,
        SaturationMethod::Dubinin => {
            let (tc, pc) = critical_point(gas, provider)?;
            pc * (t_k / tc).powi(2)
        }
        SaturationMethod::Amankwah { k } => {
            if !k.is_finite() {
                return Err(SorptionError::Domain {
                    what: "amankwah exponent must be finite",
                });
            }
            let (tc, pc) = critical_point(gas, provider)?;
            pc * (t_k / tc).powf(k)
        }
        SaturationMethod::ReducedKirchhoff => {
            let (tc, pc) = critical_point(gas, provider)?;
            let tb = provider.normal_boiling_temperature(gas)?.value;
            let tbr = tb / tc;
            pc * (tbr * (pc.ln() / (1.0 - tbr)) * (1.0 - tc / t_k)).exp()
        }
    };

    if !ps.is_finite() || ps <= 0.0 {
        return Err(SorptionError::Domain {
            what: "pseudo-saturation pressure must be positive and finite",
        });
    }
    tracing::debug!(method = method.label(), gas = %gas, t_k, ps, "pseudo-saturation pressure");
    Ok(pa(ps))
}

fn critical_point(gas: Gas, provider: &dyn GasPropertyProvider) -> SorptionResult<(f64, f64)> {
    let tc = provider.critical_temperature(gas)?.value;
    let pc = provider.critical_pressure(gas)?.value;
    Ok((tc, pc))
}
