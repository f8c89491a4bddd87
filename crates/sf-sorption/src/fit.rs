//! Levenberg–Marquardt least squares for uptake models.

use crate::error::{FitError, FitResult};
use crate::jacobian::finite_difference_jacobian;
use nalgebra::{DMatrix, DVector};

/// A scalar model `y = f(x; params)`.
pub trait Model: Send + Sync {
    fn name(&self) -> &str;

    fn n_params(&self) -> usize;

    fn evaluate(&self, x: f64, params: &[f64]) -> f64;
}

/// Adapter turning a closure into a [`Model`].
pub struct FnModel<F> {
    name: String,
    n_params: usize,
    f: F,
}

impl<F> FnModel<F>
where
    F: Fn(f64, &[f64]) -> f64 + Send + Sync,
{
    pub fn new(name: impl Into<String>, n_params: usize, f: F) -> Self {
        Self {
            name: name.into(),
            n_params,
            f,
        }
    }
}

impl<F> Model for FnModel<F>
where
    F: Fn(f64, &[f64]) -> f64 + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn n_params(&self) -> usize {
        self.n_params
    }

    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        (self.f)(x, params)
    }
}

/// Levenberg–Marquardt configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// Maximum accepted or rejected steps
    pub max_iterations: usize,
    /// Starting damping factor
    pub initial_lambda: f64,
    /// Damping multiplier after a rejected step
    pub lambda_up: f64,
    /// Damping multiplier after an accepted step
    pub lambda_down: f64,
    /// Converged when an accepted step lowers the residual sum of squares by less than this
    /// fraction
    pub rss_tolerance: f64,
    /// Converged when the step is smaller than this relative to the parameters
    pub step_tolerance: f64,
    /// Relative perturbation for the finite-difference Jacobian
    pub jacobian_epsilon: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            rss_tolerance: 1e-12,
            step_tolerance: 1e-10,
            jacobian_epsilon: 1e-7,
        }
    }
}

/// Fitted parameters and quality of fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub params: Vec<f64>,
    pub residual_sum_of_squares: f64,
    pub iterations: usize,
}

const LAMBDA_MAX: f64 = 1e16;

/// Fit `model` to `(x, y)` starting from `initial`.
pub fn fit<M>(
    model: &M,
    x: &[f64],
    y: &[f64],
    initial: &[f64],
    config: &FitConfig,
) -> FitResult<FitReport>
where
    M: Model + ?Sized,
{
    if x.len() != y.len() {
        return Err(FitError::DimensionMismatch {
            what: "observations",
            expected: x.len(),
            found: y.len(),
        });
    }
    if initial.len() != model.n_params() {
        return Err(FitError::DimensionMismatch {
            what: "initial parameters",
            expected: model.n_params(),
            found: initial.len(),
        });
    }
    if x.len() < model.n_params() {
        return Err(FitError::DimensionMismatch {
            what: "observations (at least one per parameter)",
            expected: model.n_params(),
            found: x.len(),
        });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite { what: "data" });
    }

    let observed = DVector::from_column_slice(y);
    let predict = |p: &DVector<f64>| -> FitResult<DVector<f64>> {
        let values = DVector::from_iterator(
            x.len(),
            x.iter().map(|&xi| model.evaluate(xi, p.as_slice())),
        );
        if values.iter().all(|v| v.is_finite()) {
            Ok(values)
        } else {
            Err(FitError::NonFinite {
                what: "model prediction",
            })
        }
    };

    let mut p = DVector::from_column_slice(initial);
    let mut f_p = predict(&p)?;
    let mut residual = &observed - &f_p;
    let mut rss = residual.norm_squared();
    let mut lambda = config.initial_lambda;
    let mut jac = finite_difference_jacobian(&p, &f_p, predict, config.jacobian_epsilon)?;

    for iter in 1..=config.max_iterations {
        if rss == 0.0 {
            return Ok(report(&p, rss, iter - 1, model));
        }

        let jt = jac.transpose();
        let jtj = &jt * &jac;
        let gradient = &jt * &residual;

        let mut damped = jtj.clone();
        for i in 0..damped.nrows() {
            // Marquardt scaling; fall back to unit scaling for insensitive parameters
            let d = jtj[(i, i)];
            damped[(i, i)] += lambda * if d > 0.0 { d } else { 1.0 };
        }

        let Some(step) = solve_normal_equations(damped, &gradient) else {
            lambda *= config.lambda_up;
            if lambda > LAMBDA_MAX {
                return Err(FitError::Singular);
            }
            continue;
        };

        let step_small = step.norm() <= config.step_tolerance * (p.norm() + config.step_tolerance);
        let candidate = &p + &step;
        let trial = predict(&candidate);

        match trial {
            Ok(f_new) => {
                let r_new = &observed - &f_new;
                let rss_new = r_new.norm_squared();
                if rss_new <= rss {
                    let improvement = rss - rss_new;
                    p = candidate;
                    f_p = f_new;
                    residual = r_new;
                    rss = rss_new;
                    lambda = (lambda * config.lambda_down).max(1e-12);
                    tracing::trace!(model = model.name(), iteration = iter, rss, lambda);

                    let floor = config.rss_tolerance * rss.max(f64::MIN_POSITIVE);
                    if improvement <= floor || step_small {
                        return Ok(report(&p, rss, iter, model));
                    }
                    jac = finite_difference_jacobian(&p, &f_p, predict, config.jacobian_epsilon)?;
                    continue;
                }
            }
            // Steps into a region where the model is undefined are treated as rejected.
            Err(FitError::NonFinite { .. }) => {}
            Err(other) => return Err(other),
        }

        if step_small {
            return Ok(report(&p, rss, iter, model));
        }
        lambda *= config.lambda_up;
        if lambda > LAMBDA_MAX {
            return Ok(report(&p, rss, iter, model));
        }
    }

    tracing::warn!(
        model = model.name(),
        iterations = config.max_iterations,
        rss,
        "least-squares fit hit iteration cap"
    );
    Err(FitError::Convergence {
        iterations: config.max_iterations,
        rss,
    })
}

fn solve_normal_equations(a: DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let step = match a.clone().cholesky() {
        Some(chol) => Some(chol.solve(b)),
        None => a.lu().solve(b),
    };
    step.filter(|s| s.iter().all(|v| v.is_finite()))
}

fn report<M: Model + ?Sized>(
    p: &DVector<f64>,
    rss: f64,
    iterations: usize,
    model: &M,
) -> FitReport {
    tracing::debug!(model = model.name(), iterations, rss, "least-squares fit converged");
    FitReport {
        params: p.iter().copied().collect(),
        residual_sum_of_squares: rss,
        iterations,
    }
}
