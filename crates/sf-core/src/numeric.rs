use crate::CoreError;

/// Absolute and relative tolerance for [`nearly_equal`].
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

/// True when `a` and `b` differ by at most `tol.abs`, or by `tol.rel` of the larger magnitude.
pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Accept only strictly positive, finite values.
pub fn ensure_positive(v: f64, what: &'static str) -> Result<f64, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

/// `num` evenly spaced points over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            let mut points: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            // Ensure exact endpoint
            points[num - 1] = end;
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(f64::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1.0, "x").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "x"),
            Err(CoreError::InvalidArg { what: "x" })
        ));
        assert!(ensure_positive(-2.0, "x").is_err());
        assert!(matches!(
            ensure_positive(f64::INFINITY, "x"),
            Err(CoreError::NonFinite { .. })
        ));
    }

    #[test]
    fn linspace_endpoints() {
        let pts = linspace(0.0, 1.0, 5);
        assert_eq!(pts, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(3.0, 4.0, 0).is_empty());
    }

    proptest! {
        #[test]
        fn linspace_is_monotone(start in -1e3f64..1e3, span in 1e-3f64..1e3, num in 2usize..500) {
            let pts = linspace(start, start + span, num);
            prop_assert_eq!(pts.len(), num);
            prop_assert!(pts.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
