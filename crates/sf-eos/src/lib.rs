//! Equation-of-state mole solver for volumetric sorption rigs.
//!
//! Turns a measured (P, V, T) gas state into an amount of substance. Ideal and
//! compressibility-factor inversions are closed form; Van der Waals, Redlich-Kwong and
//! Peng-Robinson use capped fixed-point iterations that share one convergence driver.

pub mod cubic;
pub mod error;
pub mod fixed_point;
pub mod solver;
pub mod state;
pub mod variant;

pub use cubic::{CubicParameters, solve_cubic, solve_van_der_waals};
pub use error::{EosError, EosResult};
pub use fixed_point::{FixedPointConfig, MoleSolution};
pub use solver::{MoleSolver, moles};
pub use state::GasState;
pub use variant::{EosVariant, VanDerWaalsConstants};
