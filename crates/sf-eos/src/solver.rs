//! Mole solver: dispatches a gas state to the selected equation of state.

use crate::cubic::{CubicParameters, solve_cubic, solve_van_der_waals};
use crate::error::{EosError, EosResult};
use crate::fixed_point::{FixedPointConfig, MoleSolution};
use crate::state::GasState;
use crate::variant::{EosVariant, VanDerWaalsConstants};
use rayon::prelude::*;
use sf_core::units::{Amount, MolarDensity, Pressure, Temperature, m3, mol, mol_per_m3};
use sf_fluids::{Gas, GasPropertyProvider};

/// Inverts gas states for moles using an injected property provider.
pub struct MoleSolver<'a> {
    provider: &'a dyn GasPropertyProvider,
    config: FixedPointConfig,
}

impl<'a> MoleSolver<'a> {
    pub fn new(provider: &'a dyn GasPropertyProvider) -> Self {
        Self {
            provider,
            config: FixedPointConfig::default(),
        }
    }

    pub fn with_config(provider: &'a dyn GasPropertyProvider, config: FixedPointConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &FixedPointConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn GasPropertyProvider {
        self.provider
    }

    /// Solve and return the full iteration outcome.
    pub fn solve(&self, state: &GasState, variant: EosVariant) -> EosResult<MoleSolution> {
        let solution = match variant {
            EosVariant::Ideal => MoleSolution::closed_form(state.ideal_moles()),
            EosVariant::RealGasFactor => {
                let z = self.compressibility(state.pressure(), state.temperature(), state.gas())?;
                MoleSolution::closed_form(state.ideal_moles() / z)
            }
            EosVariant::VanDerWaals => {
                let constants = VanDerWaalsConstants::of(state.gas())?;
                solve_van_der_waals(state, &constants, &self.config)?
            }
            EosVariant::RedlichKwong | EosVariant::PengRobinson => {
                let params = self.cubic_parameters(state.temperature(), state.gas(), variant)?;
                solve_cubic(state, &params, &self.config)?
            }
        };

        tracing::debug!(
            variant = variant.label(),
            gas = %state.gas(),
            moles = solution.moles,
            iterations = solution.iterations,
            "mole solve"
        );
        Ok(solution)
    }

    /// Moles contained in `state` under `variant`.
    pub fn moles(&self, state: &GasState, variant: EosVariant) -> EosResult<Amount> {
        self.solve(state, variant).map(|s| mol(s.moles))
    }

    /// Moles per cubic metre at (P, T).
    pub fn molar_density(
        &self,
        p: Pressure,
        t: Temperature,
        gas: Gas,
        variant: EosVariant,
    ) -> EosResult<MolarDensity> {
        let state = GasState::new(p, m3(1.0), t, gas)?;
        let n = self.solve(&state, variant)?.moles;
        Ok(mol_per_m3(n))
    }

    /// Compressibility factor from the provider, checked positive and finite.
    pub fn compressibility(&self, p: Pressure, t: Temperature, gas: Gas) -> EosResult<f64> {
        let z = self.provider.compressibility_factor(p, t, gas)?;
        if !z.is_finite() || z <= 0.0 {
            return Err(EosError::Domain {
                what: "compressibility factor must be positive and finite",
            });
        }
        Ok(z)
    }

    /// Build (a, b, σ, ε) for a cubic variant from the provider's critical constants.
    pub fn cubic_parameters(
        &self,
        t: Temperature,
        gas: Gas,
        variant: EosVariant,
    ) -> EosResult<CubicParameters> {
        let tc = self.provider.critical_temperature(gas)?;
        let pc = self.provider.critical_pressure(gas)?;
        match variant {
            EosVariant::RedlichKwong => CubicParameters::redlich_kwong(tc, pc, t),
            EosVariant::PengRobinson => {
                let omega = self.provider.acentric_factor(gas)?;
                CubicParameters::peng_robinson(tc, pc, omega, t)
            }
            EosVariant::Ideal | EosVariant::RealGasFactor | EosVariant::VanDerWaals => {
                Err(EosError::Domain {
                    what: "variant has no generic cubic parameters",
                })
            }
        }
    }

    /// Solve many states in parallel; output order matches input order.
    pub fn moles_batch(&self, states: &[GasState], variant: EosVariant) -> Vec<EosResult<Amount>> {
        states
            .par_iter()
            .map(|state| self.moles(state, variant))
            .collect()
    }
}

/// Moles from raw SI scalars (Pa, m³, K).
pub fn moles(
    p_pa: f64,
    v_m3: f64,
    t_k: f64,
    gas: Gas,
    variant: EosVariant,
    provider: &dyn GasPropertyProvider,
) -> EosResult<f64> {
    let state = GasState::from_si(p_pa, v_m3, t_k, gas)?;
    MoleSolver::new(provider)
        .solve(&state, variant)
        .map(|s| s.moles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::units::{k, pa};
    use sf_fluids::TabulatedProvider;

    #[test]
    fn ideal_reference_value() {
        let provider = TabulatedProvider::new();
        let n = moles(101_325.0, 0.001, 298.15, Gas::Methane, EosVariant::Ideal, &provider)
            .unwrap();
        assert!((n - 0.0409).abs() < 1e-4, "n = {n}");
    }

    #[test]
    fn real_gas_factor_divides_by_z() {
        let provider = TabulatedProvider::with_compressibility(0.8).unwrap();
        let solver = MoleSolver::new(&provider);
        let state = GasState::from_si(2.0e6, 1e-3, 300.0, Gas::CarbonDioxide).unwrap();
        let ideal = solver.solve(&state, EosVariant::Ideal).unwrap().moles;
        let real = solver.solve(&state, EosVariant::RealGasFactor).unwrap().moles;
        assert!((real - ideal / 0.8).abs() < 1e-12);
    }

    #[test]
    fn molar_density_matches_unit_volume_moles() {
        let provider = TabulatedProvider::new();
        let solver = MoleSolver::new(&provider);
        let rho = solver
            .molar_density(pa(1.0e6), k(318.0), Gas::Methane, EosVariant::PengRobinson)
            .unwrap();
        let n = solver
            .moles(
                &GasState::from_si(1.0e6, 1.0, 318.0, Gas::Methane).unwrap(),
                EosVariant::PengRobinson,
            )
            .unwrap();
        assert_eq!(rho.value, n.value);
    }

    #[test]
    fn cubic_parameters_rejected_for_non_cubic_variant() {
        let provider = TabulatedProvider::new();
        let solver = MoleSolver::new(&provider);
        assert!(
            solver
                .cubic_parameters(k(300.0), Gas::Methane, EosVariant::Ideal)
                .is_err()
        );
    }

    #[test]
    fn batch_preserves_order_and_errors() {
        let provider = TabulatedProvider::new();
        let solver = MoleSolver::new(&provider);
        let states = [
            GasState::from_si(1.0e5, 1e-3, 300.0, Gas::Methane).unwrap(),
            GasState::from_si(2.0e5, 1e-3, 300.0, Gas::Nitrogen).unwrap(),
            GasState::from_si(3.0e5, 1e-3, 300.0, Gas::Helium).unwrap(),
        ];
        let results = solver.moles_batch(&states, EosVariant::VanDerWaals);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(EosError::UnknownGas { .. })));
        assert!(results[2].is_ok());
        let n0 = results[0].as_ref().unwrap().value;
        let n2 = results[2].as_ref().unwrap().value;
        assert!(n2 > n0);
    }
}
