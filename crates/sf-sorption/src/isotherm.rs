//! Equilibrium isotherms.
//!
//! Plain functions for direct evaluation, plus unit structs implementing [`Model`] so the
//! same formulas can be fitted. Parameter order in the `Model` impls matches the function
//! arguments after the independent variable.

use crate::fit::Model;
use sf_core::units::constants::R_J_PER_MOL_K;

/// Langmuir: `q = qm·b·c / (1 + b·c)`.
///
/// `c` gas concentration [mol/m³], `qm` capacity [mol/kg], `b` affinity [m³/mol].
pub fn langmuir(c: f64, qm: f64, b: f64) -> f64 {
    qm * b * c / (1.0 + b * c)
}

/// Temperature dependence of the Langmuir capacity: `qm = a1 + a2/T`.
pub fn langmuir_capacity_temperature(t_k: f64, a1: f64, a2: f64) -> f64 {
    a1 + a2 / t_k
}

/// Temperature dependence of the Langmuir pressure: `P0·exp(Q/(R·T))`.
pub fn langmuir_pressure_temperature(t_k: f64, p0: f64, q_j_per_mol: f64) -> f64 {
    p0 * (q_j_per_mol / (R_J_PER_MOL_K * t_k)).exp()
}

/// Henry's law: `q = K·c`.
pub fn linear(c: f64, k: f64) -> f64 {
    k * c
}

/// Freundlich: `q = K·P^(1/n)`.
pub fn freundlich(p: f64, k: f64, n: f64) -> f64 {
    k * p.powf(1.0 / n)
}

/// Dubinin–Radushkevich: `V = V0·exp(−((R·T/E)·ln(P0/P))²)`.
pub fn dubinin_radushkevich(p: f64, t_k: f64, p0: f64, v0: f64, e_j_per_mol: f64) -> f64 {
    let potential = R_J_PER_MOL_K * t_k / e_j_per_mol * (p0 / p).ln();
    v0 * (-(potential * potential)).exp()
}

/// Parameters `[qm, b]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Langmuir;

impl Model for Langmuir {
    fn name(&self) -> &str {
        "langmuir"
    }

    fn n_params(&self) -> usize {
        2
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        langmuir(x, params[0], params[1])
    }
}

/// Parameters `[K]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl Model for Linear {
    fn name(&self) -> &str {
        "linear"
    }

    fn n_params(&self) -> usize {
        1
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        linear(x, params[0])
    }
}

/// Parameters `[K, n]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Freundlich;

impl Model for Freundlich {
    fn name(&self) -> &str {
        "freundlich"
    }

    fn n_params(&self) -> usize {
        2
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        freundlich(x, params[0], params[1])
    }
}

/// Isothermal Dubinin–Radushkevich at a fixed temperature; parameters `[P0, V0, E]`.
#[derive(Debug, Clone, Copy)]
pub struct DubininRadushkevich {
    pub temperature_k: f64,
}

impl Model for DubininRadushkevich {
    fn name(&self) -> &str {
        "dubinin-radushkevich"
    }

    fn n_params(&self) -> usize {
        3
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        dubinin_radushkevich(x, self.temperature_k, params[0], params[1], params[2])
    }
}
