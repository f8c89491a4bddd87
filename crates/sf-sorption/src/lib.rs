//! sf-sorption: sorption models and rig bookkeeping around the mole solver.
//!
//! Contains:
//! - isotherm and kinetic uptake models
//! - pseudo-saturation pressure for supercritical gases
//! - reference/sample cell calibration and injection accounting
//! - Levenberg–Marquardt fitting of any model to measured uptake

pub mod calibration;
pub mod error;
pub mod fit;
pub mod isotherm;
pub mod jacobian;
pub mod kinetics;
pub mod saturation;

pub use calibration::{SpecificVolume, injected_moles, specific_volume_calibration};
pub use error::{FitError, FitResult, SorptionError, SorptionResult};
pub use fit::{FitConfig, FitReport, FnModel, Model, fit};
pub use isotherm::{
    DubininRadushkevich, Freundlich, Langmuir, Linear, dubinin_radushkevich, freundlich,
    langmuir, langmuir_capacity_temperature, langmuir_pressure_temperature, linear,
};
pub use kinetics::{FirstOrder, SecondOrder, first_order, second_order};
pub use saturation::{SaturationMethod, pseudo_saturation_pressure};
