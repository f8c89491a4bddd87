//! Cubic equations of state inverted for moles by fixed-point iteration.
//!
//! Van der Waals iterates directly on moles. Redlich–Kwong and Peng–Robinson share the
//! generic two-parameter cubic
//!
//! ```text
//! P = RT/(Vm - b) - a/((Vm + εb)(Vm + σb))
//! ```
//!
//! rearranged as an update on molar volume, and only differ in how (a, b, σ, ε) are built.

use crate::error::{EosError, EosResult};
use crate::fixed_point::{FixedPointConfig, MoleSolution, iterate};
use crate::state::GasState;
use crate::variant::VanDerWaalsConstants;
use sf_core::units::constants::R_J_PER_MOL_K;
use sf_core::units::{Pressure, Temperature};

/// Parameters of the generic cubic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicParameters {
    /// Attraction parameter at the solve temperature [Pa·m⁶/mol²]
    pub a: f64,
    /// Co-volume [m³/mol]
    pub b: f64,
    pub sigma: f64,
    pub epsilon: f64,
}

const RK_PSI: f64 = 0.42748;
const RK_OMEGA: f64 = 0.08664;
const PR_PSI: f64 = 0.45724;
const PR_OMEGA: f64 = 0.0778;

fn reduced_inputs(tc: Temperature, pc: Pressure, t: Temperature) -> EosResult<(f64, f64, f64)> {
    let tc = tc.value;
    let pc = pc.value;
    let t = t.value;
    if !tc.is_finite() || tc <= 0.0 {
        return Err(EosError::Domain {
            what: "critical temperature must be positive and finite",
        });
    }
    if !pc.is_finite() || pc <= 0.0 {
        return Err(EosError::Domain {
            what: "critical pressure must be positive and finite",
        });
    }
    if !t.is_finite() || t <= 0.0 {
        return Err(EosError::Domain {
            what: "temperature must be positive and finite",
        });
    }
    Ok((tc, pc, t / tc))
}

impl CubicParameters {
    fn from_scaled(psi: f64, omega: f64, alpha: f64, tc: f64, pc: f64) -> Self {
        let r = R_J_PER_MOL_K;
        Self {
            a: psi * alpha * r * r * tc * tc / pc,
            b: omega * r * tc / pc,
            sigma: 0.0,
            epsilon: 0.0,
        }
    }

    /// Redlich–Kwong: α = Tr^(-1/2), σ = 1, ε = 0.
    pub fn redlich_kwong(tc: Temperature, pc: Pressure, t: Temperature) -> EosResult<Self> {
        let (tc, pc, tr) = reduced_inputs(tc, pc, t)?;
        let alpha = tr.powf(-0.5);
        Ok(Self {
            sigma: 1.0,
            epsilon: 0.0,
            ..Self::from_scaled(RK_PSI, RK_OMEGA, alpha, tc, pc)
        })
    }

    /// Peng–Robinson with the 1976 κ(ω) correlation, σ = 1 + √2, ε = 1 − √2.
    pub fn peng_robinson(
        tc: Temperature,
        pc: Pressure,
        acentric: f64,
        t: Temperature,
    ) -> EosResult<Self> {
        let (tc, pc, tr) = reduced_inputs(tc, pc, t)?;
        if !acentric.is_finite() {
            return Err(EosError::Domain {
                what: "acentric factor must be finite",
            });
        }
        let kappa = 0.37464 + 1.54226 * acentric - 0.26992 * acentric * acentric;
        let alpha = (1.0 + kappa * (1.0 - tr.sqrt())).powi(2);
        Ok(Self {
            sigma: 1.0 + std::f64::consts::SQRT_2,
            epsilon: 1.0 - std::f64::consts::SQRT_2,
            ..Self::from_scaled(PR_PSI, PR_OMEGA, alpha, tc, pc)
        })
    }

    fn validate(&self) -> EosResult<()> {
        if !self.a.is_finite() || self.a < 0.0 {
            return Err(EosError::Domain {
                what: "cubic parameter a must be non-negative and finite",
            });
        }
        if !self.b.is_finite() || self.b < 0.0 {
            return Err(EosError::Domain {
                what: "cubic parameter b must be non-negative and finite",
            });
        }
        if !self.sigma.is_finite() || !self.epsilon.is_finite() {
            return Err(EosError::Domain {
                what: "cubic sigma/epsilon must be finite",
            });
        }
        Ok(())
    }
}

/// Solve the generic cubic for moles, starting from the ideal-gas estimate.
pub fn solve_cubic(
    state: &GasState,
    params: &CubicParameters,
    config: &FixedPointConfig,
) -> EosResult<MoleSolution> {
    params.validate()?;
    let p = state.pressure().value;
    let v = state.volume().value;
    let rt_over_p = R_J_PER_MOL_K * state.temperature().value / p;
    let CubicParameters {
        a,
        b,
        sigma,
        epsilon,
    } = *params;

    iterate(state.ideal_moles(), config, "cubic", |n| {
        let vm = v / n;
        let denom = (vm + epsilon * b) * (vm + sigma * b);
        if !denom.is_finite() || denom.abs() <= f64::EPSILON * vm * vm {
            return Err(EosError::Domain {
                what: "cubic attraction denominator vanished",
            });
        }
        let vm_next = rt_over_p + b - (a / p) * (vm - b) / denom;
        Ok(v / vm_next)
    })
}

/// Van der Waals fixed point on moles:
/// `n ← (PV/RT)·(1 + n²a/(PV²))·(1 − nb/V)`.
pub fn solve_van_der_waals(
    state: &GasState,
    constants: &VanDerWaalsConstants,
    config: &FixedPointConfig,
) -> EosResult<MoleSolution> {
    if !constants.a.is_finite()
        || constants.a < 0.0
        || !constants.b.is_finite()
        || constants.b < 0.0
    {
        return Err(EosError::Domain {
            what: "Van der Waals constants must be non-negative and finite",
        });
    }
    let p = state.pressure().value;
    let v = state.volume().value;
    let n_ideal = state.ideal_moles();
    let VanDerWaalsConstants { a, b } = *constants;

    iterate(n_ideal, config, "van-der-waals", |n| {
        Ok(n_ideal * (1.0 + n * n * a / (p * v * v)) * (1.0 - n * b / v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::units::{k, pa};
    use sf_fluids::Gas;

    fn methane_state(p_pa: f64) -> GasState {
        GasState::from_si(p_pa, 5.91e-5, 318.0, Gas::Methane).unwrap()
    }

    #[test]
    fn redlich_kwong_parameters_for_methane() {
        let params = CubicParameters::redlich_kwong(k(190.564), pa(4.5992e6), k(318.0)).unwrap();
        // b = 0.08664·R·Tc/Pc
        let b = 0.08664 * R_J_PER_MOL_K * 190.564 / 4.5992e6;
        assert!((params.b - b).abs() < 1e-15);
        assert_eq!(params.sigma, 1.0);
        assert_eq!(params.epsilon, 0.0);
        assert!(params.a > 0.0);
    }

    #[test]
    fn peng_robinson_alpha_is_one_at_critical_temperature() {
        let tc = 190.564;
        let pc = 4.5992e6;
        let params = CubicParameters::peng_robinson(k(tc), pa(pc), 0.011, k(tc)).unwrap();
        let a = 0.45724 * R_J_PER_MOL_K * R_J_PER_MOL_K * tc * tc / pc;
        assert!((params.a - a).abs() / a < 1e-12);
        assert!((params.sigma * params.epsilon + 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_parameters_reduce_to_ideal() {
        let state = methane_state(5.0e6);
        let params = CubicParameters {
            a: 0.0,
            b: 0.0,
            sigma: 1.0,
            epsilon: 0.0,
        };
        let sol = solve_cubic(&state, &params, &FixedPointConfig::default()).unwrap();
        let ideal = state.ideal_moles();
        assert!((sol.moles - ideal).abs() / ideal < 1e-12);
    }

    #[test]
    fn methane_is_attractive_at_rig_conditions() {
        // Below the Boyle temperature attraction dominates: n_real > n_ideal
        let state = methane_state(5.0e6);
        let params = CubicParameters::peng_robinson(k(190.564), pa(4.5992e6), 0.01142, k(318.0))
            .unwrap();
        let sol = solve_cubic(&state, &params, &FixedPointConfig::default()).unwrap();
        assert!(sol.moles > state.ideal_moles());

        let vdw = VanDerWaalsConstants::of(Gas::Methane).unwrap();
        let sol = solve_van_der_waals(&state, &vdw, &FixedPointConfig::default()).unwrap();
        assert!(sol.moles > state.ideal_moles());
    }

    #[test]
    fn vanishing_denominator_is_a_domain_error() {
        let state = GasState::from_si(1.0e5, 1.0, 300.0, Gas::Methane).unwrap();
        let vm0 = R_J_PER_MOL_K * 300.0 / 1.0e5;
        // ε·b = −Vm₀ makes the first denominator exactly zero
        let params = CubicParameters {
            a: 1.0,
            b: vm0,
            sigma: 1.0,
            epsilon: -1.0,
        };
        let err = solve_cubic(&state, &params, &FixedPointConfig::default()).unwrap_err();
        assert!(matches!(err, EosError::Domain { .. }));
    }

    #[test]
    fn negative_parameters_rejected() {
        let state = methane_state(1.0e5);
        let params = CubicParameters {
            a: -1.0,
            b: 0.0,
            sigma: 1.0,
            epsilon: 0.0,
        };
        assert!(solve_cubic(&state, &params, &FixedPointConfig::default()).is_err());
        for (a, b) in [(-1.0, 0.0), (0.0, -1.0e-5), (f64::NAN, 0.0)] {
            let constants = VanDerWaalsConstants { a, b };
            let err = solve_van_der_waals(&state, &constants, &FixedPointConfig::default())
                .unwrap_err();
            assert!(matches!(err, EosError::Domain { .. }));
        }
    }
}
