//! Uptake kinetics.

use crate::fit::Model;

/// Pseudo-first-order uptake: `q(t) = qe − qe·e^(−k1·t) + q0·e^(−k1·t)`.
pub fn first_order(t: f64, q0: f64, qe: f64, k1: f64) -> f64 {
    let decay = (-k1 * t).exp();
    qe - qe * decay + q0 * decay
}

/// Pseudo-second-order uptake: `q(t) = (qe·k2·t·|qe − q0| + q0) / (1 + k2·t·|qe − q0|)`.
pub fn second_order(t: f64, q0: f64, qe: f64, k2: f64) -> f64 {
    let rate = k2 * t * (qe - q0).abs();
    (qe * rate + q0) / (1.0 + rate)
}

/// Parameters `[q0, qe, k1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOrder;

impl Model for FirstOrder {
    fn name(&self) -> &str {
        "first-order"
    }

    fn n_params(&self) -> usize {
        3
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        first_order(x, params[0], params[1], params[2])
    }
}

/// Parameters `[q0, qe, k2]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondOrder;

impl Model for SecondOrder {
    fn name(&self) -> &str {
        "second-order"
    }

    fn n_params(&self) -> usize {
        3
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        second_order(x, params[0], params[1], params[2])
    }
}
