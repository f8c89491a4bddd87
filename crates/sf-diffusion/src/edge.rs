//! Edge (reservoir) concentration for diffusion into a sphere from a limited volume.
//!
//! ```text
//! ρ(t) = ρc0 − (ρc0 − ρi)/(Kc + 1)
//!      + 6·Kc·(ρc0 − ρi)·Σₖ exp(−D·αₖ²·t/Ra²) / (Kc²·αₖ² + 9·(Kc + 1))
//! ```
//!
//! `D` defaults to `Kc`; a transport coefficient can be supplied instead. At `t = 0` the
//! truncated series recovers `ρc0` to within a tail of order `6/(Kc·π²·n)` of `ρc0 − ρi`,
//! and for large `t` it settles on the equilibrium value `ρc0 − (ρc0 − ρi)/(Kc + 1)`.

use crate::error::{DiffusionError, DiffusionResult};
use crate::roots::{RootSearchConfig, RootSet, find_roots_with};
use rayon::prelude::*;
use sf_core::{ensure_finite, ensure_positive};

/// Inputs of the edge-concentration series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionParameters {
    /// Reservoir concentration at t = 0 after charging
    pub rho_c0: f64,
    /// Initial concentration inside the particle
    pub rho_i: f64,
    /// Storage capacity ratio
    pub kc: f64,
    /// Particle radius [m]
    pub radius_m: f64,
    /// Number of series terms
    pub n_roots: usize,
    /// Coefficient in the exponent; `None` uses Kc
    pub decay_coefficient: Option<f64>,
}

impl DiffusionParameters {
    pub const DEFAULT_ROOTS: usize = 20;

    pub fn new(rho_c0: f64, rho_i: f64, kc: f64, radius_m: f64) -> Self {
        Self {
            rho_c0,
            rho_i,
            kc,
            radius_m,
            n_roots: Self::DEFAULT_ROOTS,
            decay_coefficient: None,
        }
    }

    pub fn with_roots(mut self, n: usize) -> Self {
        self.n_roots = n;
        self
    }

    pub fn with_decay_coefficient(mut self, d: f64) -> Self {
        self.decay_coefficient = Some(d);
        self
    }

    fn validate(&self) -> DiffusionResult<()> {
        ensure_finite(self.rho_c0, "rho_c0 must be finite")?;
        ensure_finite(self.rho_i, "rho_i must be finite")?;
        ensure_positive(self.kc, "Kc must be positive and finite")?;
        ensure_positive(self.radius_m, "particle radius must be positive and finite")?;
        if let Some(d) = self.decay_coefficient {
            ensure_positive(d, "decay coefficient must be positive and finite")?;
        }
        Ok(())
    }

    fn decay(&self) -> f64 {
        self.decay_coefficient.unwrap_or(self.kc)
    }

    /// Limit of ρ(t) as t → ∞.
    pub fn equilibrium(&self) -> f64 {
        self.rho_c0 - (self.rho_c0 - self.rho_i) / (self.kc + 1.0)
    }
}

/// Edge concentration series with the eigenvalues computed once.
#[derive(Debug, Clone)]
pub struct EdgeSeries {
    params: DiffusionParameters,
    roots: RootSet,
    /// Per-root `(exponent rate, weight)`; rate = D·α²/Ra², weight = 1/(Kc²α² + 9(Kc + 1))
    terms: Vec<(f64, f64)>,
}

impl EdgeSeries {
    pub fn new(params: DiffusionParameters) -> DiffusionResult<Self> {
        Self::with_config(params, &RootSearchConfig::default())
    }

    pub fn with_config(
        params: DiffusionParameters,
        config: &RootSearchConfig,
    ) -> DiffusionResult<Self> {
        params.validate()?;
        let roots = find_roots_with(params.kc, params.n_roots, config)?;
        let kc = params.kc;
        let rate_scale = params.decay() / (params.radius_m * params.radius_m);
        let terms = roots
            .iter()
            .map(|&alpha| {
                let a2 = alpha * alpha;
                (rate_scale * a2, 1.0 / (kc * kc * a2 + 9.0 * (kc + 1.0)))
            })
            .collect();
        Ok(Self {
            params,
            roots,
            terms,
        })
    }

    pub fn parameters(&self) -> &DiffusionParameters {
        &self.params
    }

    pub fn roots(&self) -> &RootSet {
        &self.roots
    }

    pub fn equilibrium(&self) -> f64 {
        self.params.equilibrium()
    }

    pub fn evaluate(&self, t: f64) -> DiffusionResult<f64> {
        if !t.is_finite() || t < 0.0 {
            return Err(DiffusionError::Domain {
                what: "time must be non-negative and finite",
            });
        }
        let DiffusionParameters {
            rho_c0, rho_i, kc, ..
        } = self.params;
        let delta = rho_c0 - rho_i;
        let sum: f64 = self
            .terms
            .iter()
            .map(|&(rate, weight)| (-rate * t).exp() * weight)
            .sum();
        Ok(self.equilibrium() + 6.0 * kc * delta * sum)
    }

    pub fn evaluate_many(&self, times: &[f64]) -> DiffusionResult<Vec<f64>> {
        times.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Parallel version of [`evaluate_many`](Self::evaluate_many); output order follows `times`.
    pub fn evaluate_par(&self, times: &[f64]) -> DiffusionResult<Vec<f64>> {
        times.par_iter().map(|&t| self.evaluate(t)).collect()
    }
}

/// ρ(t) at one time with `n` series terms and D = Kc.
pub fn edge_concentration(
    t: f64,
    rho_c0: f64,
    rho_i: f64,
    kc: f64,
    radius_m: f64,
    n: usize,
) -> DiffusionResult<f64> {
    let params = DiffusionParameters::new(rho_c0, rho_i, kc, radius_m).with_roots(n);
    EdgeSeries::new(params)?.evaluate(t)
}

/// Elementwise [`edge_concentration`] over a slice of times, sharing one root search.
pub fn edge_concentration_series(
    times: &[f64],
    rho_c0: f64,
    rho_i: f64,
    kc: f64,
    radius_m: f64,
    n: usize,
) -> DiffusionResult<Vec<f64>> {
    let params = DiffusionParameters::new(rho_c0, rho_i, kc, radius_m).with_roots(n);
    EdgeSeries::new(params)?.evaluate_many(times)
}
