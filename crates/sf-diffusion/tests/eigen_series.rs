//! Eigenvalue scan and edge-concentration properties.

use proptest::prelude::*;
use sf_diffusion::{
    DiffusionError, DiffusionParameters, EdgeSeries, RootSearchConfig, eigen_function,
    edge_concentration, find_roots, find_roots_with,
};

/// Residual bound for one secant step on a grid of spacing `h`, with slack over the
/// h²·|f''|/8 interpolation error (|f''| grows like (4·Kc + 3)·α near a root).
fn secant_tolerance(alpha: f64, kc: f64, h: f64) -> f64 {
    (4.0 * kc + 3.0) * alpha * h * h / 4.0 + 1e-9
}

#[test]
fn roots_strictly_increase() {
    for kc in [0.1, 1.0, 10.0] {
        for n in [1, 5, 20] {
            let roots = find_roots(kc, n).unwrap();
            assert_eq!(roots.len(), n, "Kc = {kc}");
            assert!(roots.as_slice()[0] > 0.0);
            for pair in roots.as_slice().windows(2) {
                assert!(pair[1] > pair[0], "Kc = {kc}, n = {n}");
            }
        }
    }
}

#[test]
fn coarse_roots_nearly_satisfy_equation() {
    let h = 10.0 * std::f64::consts::PI / 4999.0;
    for kc in [0.1, 1.0, 10.0] {
        let roots = find_roots(kc, 20).unwrap();
        for &alpha in roots.iter() {
            let residual = eigen_function(alpha, kc).abs();
            assert!(residual < 1e-2, "Kc = {kc}, α = {alpha}, f = {residual}");
            assert!(residual <= secant_tolerance(alpha, kc, h));
        }
    }
}

#[test]
fn shortfall_reports_counts() {
    let config = RootSearchConfig {
        upper_bound: 2.0 * std::f64::consts::PI,
        extend_to_fit: false,
        ..RootSearchConfig::default()
    };
    let err = find_roots_with(1.0, 3, &config).unwrap_err();
    assert!(matches!(
        err,
        DiffusionError::RootSearchExhausted {
            requested: 3,
            found: 1
        }
    ));
}

#[test]
fn edge_reference_case() {
    let rho0 = edge_concentration(0.0, 2.0, 0.5, 1.0, 0.02, 20).unwrap();
    assert!((rho0 - 2.0).abs() / 2.0 < 0.03, "ρ(0) = {rho0}");

    let late = edge_concentration(10.0, 2.0, 0.5, 1.0, 0.02, 20).unwrap();
    assert!((late - (2.0 - 1.5 / 2.0)).abs() < 1e-9);
}

proptest! {
    #[test]
    fn roots_are_bracketed_by_multiples_of_pi(kc in 0.05f64..50.0, n in 1usize..30) {
        let roots = find_roots(kc, n).unwrap();
        prop_assert_eq!(roots.len(), n);
        let pi = std::f64::consts::PI;
        for (i, &alpha) in roots.iter().enumerate() {
            let k = (i + 1) as f64;
            prop_assert!(alpha > k * pi - 1e-6 && alpha < (k + 0.5) * pi);
        }
    }

    #[test]
    fn edge_stays_between_start_and_equilibrium(
        kc in 0.1f64..20.0,
        rho_c0 in 1.0f64..500.0,
        fraction in 0.0f64..0.99,
        tau in 0.0f64..2.0,
    ) {
        let rho_i = rho_c0 * fraction;
        let radius = 0.01;
        let series = EdgeSeries::new(DiffusionParameters::new(rho_c0, rho_i, kc, radius)).unwrap();
        // Dimensionless time D·t/Ra²
        let t = tau * radius * radius / kc;
        let rho = series.evaluate(t).unwrap();
        prop_assert!(rho <= rho_c0 * (1.0 + 1e-12));
        prop_assert!(rho >= series.equilibrium() * (1.0 - 1e-12));
    }
}
