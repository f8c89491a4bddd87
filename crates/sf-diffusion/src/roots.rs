//! Positive roots of the sphere/limited-reservoir eigenvalue equation
//!
//! ```text
//! f(α) = 3·sin α + Kc·α²·sin α − 3·α·cos α = 0
//! ```
//!
//! Roots are found by scanning a uniform grid left to right and taking one secant step in
//! every bracketing interval, so they come out in increasing order. Successive roots sit
//! roughly π apart, just above kπ.

use crate::error::{DiffusionError, DiffusionResult};
use sf_core::ensure_positive;
use std::f64::consts::PI;

/// Largest root count a single search accepts.
pub const MAX_ROOTS: usize = 10_000;

/// Grid scan configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSearchConfig {
    /// Right end of the scanned interval `[0, upper_bound]`
    pub upper_bound: f64,
    /// Number of grid samples over `[0, upper_bound]`
    pub samples: usize,
    /// Grow the interval to `(n + 1)π` when `n` roots cannot fit, at the same sample density
    pub extend_to_fit: bool,
    /// Illinois false-position steps after the initial secant step (0 = secant only)
    pub refine_iterations: usize,
}

impl Default for RootSearchConfig {
    fn default() -> Self {
        Self {
            upper_bound: 10.0 * PI,
            samples: 5000,
            extend_to_fit: true,
            refine_iterations: 0,
        }
    }
}

impl RootSearchConfig {
    /// Interval end and sample count actually scanned for `n` roots.
    fn grid_for(&self, n: usize) -> (f64, usize) {
        let needed = (n as f64 + 1.0) * PI;
        if self.extend_to_fit && needed > self.upper_bound {
            let scale = needed / self.upper_bound;
            let samples = (self.samples as f64 * scale).round() as usize;
            (needed, samples)
        } else {
            (self.upper_bound, self.samples)
        }
    }
}

/// Increasing sequence of positive eigenvalues for one Kc.
#[derive(Debug, Clone, PartialEq)]
pub struct RootSet {
    kc: f64,
    roots: Vec<f64>,
}

impl RootSet {
    pub fn kc(&self) -> f64 {
        self.kc
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.roots.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.roots
    }
}

/// `3·sin α + Kc·α²·sin α − 3·α·cos α`
#[inline]
pub fn eigen_function(alpha: f64, kc: f64) -> f64 {
    let (sin, cos) = alpha.sin_cos();
    3.0 * sin + kc * alpha * alpha * sin - 3.0 * alpha * cos
}

/// First `n` roots with the default grid.
pub fn find_roots(kc: f64, n: usize) -> DiffusionResult<RootSet> {
    find_roots_with(kc, n, &RootSearchConfig::default())
}

pub fn find_roots_with(kc: f64, n: usize, config: &RootSearchConfig) -> DiffusionResult<RootSet> {
    ensure_positive(kc, "Kc must be positive and finite")?;
    if n < 1 {
        return Err(DiffusionError::Domain {
            what: "at least one root must be requested",
        });
    }
    if n > MAX_ROOTS {
        return Err(DiffusionError::Domain {
            what: "root count exceeds MAX_ROOTS",
        });
    }
    ensure_positive(config.upper_bound, "root search upper bound must be positive")?;
    if config.samples < 2 {
        return Err(DiffusionError::Domain {
            what: "root search needs at least two grid samples",
        });
    }

    let (upper, samples) = config.grid_for(n);
    let h = upper / (samples - 1) as f64;
    let mut roots = Vec::new();

    let mut a0 = 0.0;
    let mut y0 = eigen_function(a0, kc);
    for i in 1..samples {
        let a1 = if i == samples - 1 { upper } else { i as f64 * h };
        let y1 = eigen_function(a1, kc);
        // Bracket test kept in its additive form: fires on a strict sign change only.
        if (y0 + y1).abs() != y0.abs() + y1.abs() {
            let secant = a1 - y1 * (a1 - a0) / (y1 - y0);
            let root = if config.refine_iterations > 0 {
                illinois(kc, (a0, y0), (a1, y1), secant, config.refine_iterations)
            } else {
                secant
            };
            roots.push(root);
            if roots.len() == n {
                break;
            }
        }
        a0 = a1;
        y0 = y1;
    }

    if roots.len() < n {
        tracing::warn!(
            kc,
            requested = n,
            found = roots.len(),
            upper_bound = upper,
            "eigenvalue grid exhausted"
        );
        return Err(DiffusionError::RootSearchExhausted {
            requested: n,
            found: roots.len(),
        });
    }

    tracing::debug!(kc, n, upper_bound = upper, samples, "eigenvalues located");
    Ok(RootSet { kc, roots })
}

/// Illinois-modified false position inside a strict sign-change bracket.
fn illinois(kc: f64, lo: (f64, f64), hi: (f64, f64), start: f64, iterations: usize) -> f64 {
    let (mut a, mut fa) = lo;
    let (mut b, mut fb) = hi;
    let mut c = start;
    let mut side = 0i8;

    for _ in 0..iterations {
        let fc = eigen_function(c, kc);
        if fc == 0.0 {
            break;
        }
        if fc.signum() == fb.signum() {
            b = c;
            fb = fc;
            if side == -1 {
                fa *= 0.5;
            }
            side = -1;
        } else {
            a = c;
            fa = fc;
            if side == 1 {
                fb *= 0.5;
            }
            side = 1;
        }
        let next = (a * fb - b * fa) / (fb - fa);
        if !next.is_finite() || next == c {
            break;
        }
        c = next;
    }
    c
}
