//! Reference/sample cell bookkeeping: void-volume calibration and injected moles.

use crate::error::{SorptionError, SorptionResult};
use sf_eos::{EosVariant, GasState, MoleSolver};
use sf_fluids::Gas;

/// Result of a helium (or other non-adsorbing gas) expansion calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecificVolume {
    /// Gas-accessible void volume of the sample cell, same unit as the cell volumes
    pub void_volume: f64,
    /// (Vs − Vv)/Wsh
    pub specific_volume: f64,
}

/// Calibrate the sample specific volume from one expansion.
///
/// `Vv = (Pc − Pe)·Vr/(Pe − Pi)` and `Vsp = (Vs − Vv)/Wsh`. Pressures may be in any unit
/// as long as all three share it (differences cancel the gauge offset).
pub fn specific_volume_calibration(
    reference_volume: f64,
    sample_cell_volume: f64,
    initial_pressure: f64,
    charge_pressure: f64,
    equilibrium_pressure: f64,
    sample_mass: f64,
) -> SorptionResult<SpecificVolume> {
    let inputs = [
        reference_volume,
        sample_cell_volume,
        initial_pressure,
        charge_pressure,
        equilibrium_pressure,
        sample_mass,
    ];
    if inputs.iter().any(|v| !v.is_finite()) {
        return Err(SorptionError::Domain {
            what: "calibration inputs must be finite",
        });
    }
    if sample_mass <= 0.0 {
        return Err(SorptionError::Domain {
            what: "sample mass must be positive",
        });
    }
    let spread = equilibrium_pressure - initial_pressure;
    if spread == 0.0 {
        return Err(SorptionError::Domain {
            what: "equilibrium pressure equals initial pressure",
        });
    }

    let void_volume = (charge_pressure - equilibrium_pressure) * reference_volume / spread;
    Ok(SpecificVolume {
        void_volume,
        specific_volume: (sample_cell_volume - void_volume) / sample_mass,
    })
}

/// Moles injected by charging the reference cell from `Pi` to `Pc`, added to `previous`.
#[allow(clippy::too_many_arguments)]
pub fn injected_moles(
    solver: &MoleSolver<'_>,
    gas: Gas,
    variant: EosVariant,
    reference_volume_m3: f64,
    temperature_k: f64,
    initial_pressure_pa: f64,
    charge_pressure_pa: f64,
    previous: f64,
) -> SorptionResult<f64> {
    if !previous.is_finite() {
        return Err(SorptionError::Domain {
            what: "previously injected moles must be finite",
        });
    }
    let initial = GasState::from_si(initial_pressure_pa, reference_volume_m3, temperature_k, gas)?;
    let charged = GasState::from_si(charge_pressure_pa, reference_volume_m3, temperature_k, gas)?;
    let n_initial = solver.solve(&initial, variant)?.moles;
    let n_charged = solver.solve(&charged, variant)?.moles;
    Ok(n_charged - n_initial + previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::units::constants::R_J_PER_MOL_K;
    use sf_eos::EosError;
    use sf_fluids::TabulatedProvider;

    #[test]
    fn calibration_from_ideal_expansion() {
        // Vr = 60 ml at 10 bar expands into Vv = 20 ml at 1 bar: Pe = (10·60 + 1·20)/80 = 7.75
        let cal = specific_volume_calibration(60.0, 35.0, 1.0, 10.0, 7.75, 5.0).unwrap();
        assert!((cal.void_volume - 20.0).abs() < 1e-12);
        assert!((cal.specific_volume - 3.0).abs() < 1e-12);
    }

    #[test]
    fn gauge_offset_cancels() {
        let abs = specific_volume_calibration(60.0, 35.0, 1.0, 10.0, 7.75, 5.0).unwrap();
        let gauge = specific_volume_calibration(60.0, 35.0, 0.0, 9.0, 6.75, 5.0).unwrap();
        assert!((abs.void_volume - gauge.void_volume).abs() < 1e-12);
    }

    #[test]
    fn calibration_rejects_degenerate_inputs() {
        assert!(specific_volume_calibration(60.0, 35.0, 2.0, 10.0, 2.0, 5.0).is_err());
        assert!(specific_volume_calibration(60.0, 35.0, 1.0, 10.0, 7.75, 0.0).is_err());
    }

    #[test]
    fn ideal_injection_accumulates() {
        let provider = TabulatedProvider::new();
        let solver = MoleSolver::new(&provider);
        let n = injected_moles(
            &solver,
            Gas::Methane,
            EosVariant::Ideal,
            5.91e-5,
            318.0,
            1.0e5,
            5.0e5,
            0.01,
        )
        .unwrap();
        let expected = 4.0e5 * 5.91e-5 / (R_J_PER_MOL_K * 318.0) + 0.01;
        assert!((n - expected).abs() < 1e-12);
    }

    #[test]
    fn injection_propagates_eos_errors() {
        let provider = TabulatedProvider::new();
        let solver = MoleSolver::new(&provider);
        let err = injected_moles(
            &solver,
            Gas::Ethane,
            EosVariant::VanDerWaals,
            5.91e-5,
            318.0,
            1.0e5,
            5.0e5,
            0.0,
        )
        .unwrap_err();
        assert!(matches!(err, SorptionError::Eos(EosError::UnknownGas { .. })));
    }
}
