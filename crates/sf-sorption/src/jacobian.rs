//! Finite difference Jacobian of model predictions with respect to parameters.

use crate::error::FitResult;
use nalgebra::{DMatrix, DVector};

/// Forward-difference Jacobian.
///
/// Column j is `(f(p + h·e_j) − f(p)) / h` with `h = epsilon·max(|p_j|, 1)`. `f_p` is the
/// already evaluated `f(p)` so callers iterating on `p` do not pay for it twice.
pub fn finite_difference_jacobian<F>(
    p: &DVector<f64>,
    f_p: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> FitResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> FitResult<DVector<f64>>,
{
    let n = p.len();
    let m = f_p.len();
    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let mut p_perturbed = p.clone();
        let dp = epsilon * p[j].abs().max(1.0);
        p_perturbed[j] += dp;

        let f_perturbed = f(&p_perturbed)?;
        let df = (f_perturbed - f_p) / dp;
        jac.set_column(j, &df);
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jacobian_of_linear_map() {
        // f(p) = [2·p0, p0 + 3·p1]
        let f = |p: &DVector<f64>| -> FitResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![2.0 * p[0], p[0] + 3.0 * p[1]]))
        };
        let p = DVector::from_vec(vec![1.5, -2.0]);
        let fp = f(&p).unwrap();
        let jac = finite_difference_jacobian(&p, &fp, f, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
        assert!(jac[(0, 1)].abs() < 1e-5);
        assert!((jac[(1, 0)] - 1.0).abs() < 1e-5);
        assert!((jac[(1, 1)] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_of_quadratic() {
        let f = |p: &DVector<f64>| -> FitResult<DVector<f64>> {
            Ok(DVector::from_element(1, p[0] * p[0]))
        };
        let p = DVector::from_element(1, 3.0);
        let fp = f(&p).unwrap();
        let jac = finite_difference_jacobian(&p, &fp, f, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 6.0).abs() < 1e-5);
    }
}
