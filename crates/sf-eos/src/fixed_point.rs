//! Capped fixed-point driver shared by the iterative EOS variants.

use crate::error::{EosError, EosResult};

/// Fixed-point iteration configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPointConfig {
    /// Maximum number of update steps before giving up
    pub max_iterations: usize,
    /// Relative band: converged when (1-band)·n_new < n_old < (1+band)·n_new
    pub relative_band: f64,
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            relative_band: 1e-4,
        }
    }
}

impl FixedPointConfig {
    fn validate(&self) -> EosResult<()> {
        if self.max_iterations == 0 {
            return Err(EosError::Domain {
                what: "max_iterations must be at least 1",
            });
        }
        if !self.relative_band.is_finite()
            || self.relative_band <= 0.0
            || self.relative_band >= 1.0
        {
            return Err(EosError::Domain {
                what: "relative_band must lie in (0, 1)",
            });
        }
        Ok(())
    }
}

/// Outcome of a mole solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoleSolution {
    /// Final estimate [mol]
    pub moles: f64,
    /// Estimate one step before the final one (equal to `moles` for closed forms)
    pub previous: f64,
    /// Update steps taken
    pub iterations: usize,
}

impl MoleSolution {
    pub(crate) fn closed_form(moles: f64) -> Self {
        Self {
            moles,
            previous: moles,
            iterations: 0,
        }
    }

    /// |n_final − n_previous| / n_final
    pub fn relative_change(&self) -> f64 {
        ((self.moles - self.previous) / self.moles).abs()
    }
}

/// Iteration bookkeeping, alive only for the duration of one solve.
struct ConvergenceState {
    previous: f64,
    current: f64,
    band: f64,
    iterations: usize,
}

impl ConvergenceState {
    fn new(initial: f64, band: f64) -> Self {
        // previous = 0 forces at least one update.
        Self {
            previous: 0.0,
            current: initial,
            band,
            iterations: 0,
        }
    }

    fn advance(&mut self, next: f64) {
        self.previous = self.current;
        self.current = next;
        self.iterations += 1;
    }

    fn is_converged(&self) -> bool {
        (1.0 - self.band) * self.current < self.previous
            && self.previous < (1.0 + self.band) * self.current
    }

    fn relative_change(&self) -> f64 {
        ((self.current - self.previous) / self.current).abs()
    }
}

/// Iterate `n_{k+1} = step(n_k)` from `initial` until successive estimates agree within
/// the relative band.
///
/// Every iterate must stay positive and finite; anything else is a domain failure rather
/// than a value to carry forward.
pub(crate) fn iterate<F>(
    initial: f64,
    config: &FixedPointConfig,
    label: &'static str,
    mut step: F,
) -> EosResult<MoleSolution>
where
    F: FnMut(f64) -> EosResult<f64>,
{
    config.validate()?;
    if !initial.is_finite() || initial <= 0.0 {
        return Err(EosError::Domain {
            what: "initial mole estimate must be positive and finite",
        });
    }

    let mut state = ConvergenceState::new(initial, config.relative_band);

    while !state.is_converged() {
        if state.iterations >= config.max_iterations {
            tracing::warn!(
                eos = label,
                iterations = state.iterations,
                relative_change = state.relative_change(),
                "fixed-point iteration cap reached"
            );
            return Err(EosError::Convergence {
                iterations: state.iterations,
                relative_change: state.relative_change(),
            });
        }

        let next = step(state.current)?;
        if !next.is_finite() || next <= 0.0 {
            return Err(EosError::Domain {
                what: "fixed-point update left the physical domain",
            });
        }
        state.advance(next);
        tracing::trace!(eos = label, iteration = state.iterations, moles = next);
    }

    tracing::debug!(
        eos = label,
        iterations = state.iterations,
        moles = state.current,
        "fixed-point converged"
    );

    Ok(MoleSolution {
        moles: state.current,
        previous: state.previous,
        iterations: state.iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contraction_converges_within_band() {
        // n = 1 + n/2 has fixed point 2
        let config = FixedPointConfig::default();
        let sol = iterate(1.0, &config, "test", |n| Ok(1.0 + 0.5 * n)).unwrap();
        assert!((sol.moles - 2.0).abs() < 1e-3);
        assert!(sol.relative_change() < config.relative_band);
        assert!(sol.iterations > 1);
    }

    #[test]
    fn identity_step_converges_after_one_update() {
        let sol = iterate(3.0, &FixedPointConfig::default(), "test", Ok).unwrap();
        assert_eq!(sol.iterations, 1);
        assert_eq!(sol.moles, 3.0);
    }

    #[test]
    fn oscillation_hits_iteration_cap() {
        let config = FixedPointConfig {
            max_iterations: 50,
            ..FixedPointConfig::default()
        };
        // Period-two cycle between 1 and 2
        let err = iterate(1.0, &config, "test", |n| Ok(3.0 - n)).unwrap_err();
        match err {
            EosError::Convergence { iterations, .. } => assert_eq!(iterations, 50),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_finite_update_is_a_domain_error() {
        let err = iterate(1.0, &FixedPointConfig::default(), "test", |_| Ok(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, EosError::Domain { .. }));
    }

    #[test]
    fn negative_update_is_a_domain_error() {
        let err =
            iterate(1.0, &FixedPointConfig::default(), "test", |n| Ok(-n)).unwrap_err();
        assert!(matches!(err, EosError::Domain { .. }));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = FixedPointConfig {
            max_iterations: 0,
            ..FixedPointConfig::default()
        };
        assert!(iterate(1.0, &config, "test", Ok).is_err());

        let config = FixedPointConfig {
            relative_band: 0.0,
            ..FixedPointConfig::default()
        };
        assert!(iterate(1.0, &config, "test", Ok).is_err());
    }
}
