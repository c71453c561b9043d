//! Adaptive numerical integration on a finite interval.
//!
//! The core rule is G7K15: a 15-point Kronrod extension of the 7-point
//! Gauss-Legendre rule. Both rules share the Kronrod nodes, so one set
//! of function evaluations yields two estimates of the integral, and
//! their difference is the per-interval error estimate. The adaptive
//! driver keeps a max-heap of subintervals keyed on that estimate and
//! bisects the worst one until the tolerance is met or the subdivision
//! budget runs out.
//!
//! Points where the integrand is not finite are omitted from the rule
//! sums (and counted); a subinterval where every node fails is a hard
//! error. This is what makes `1/x` over `[-1, 1]` come back as a value
//! near zero instead of a crash: the singular midpoint node is dropped
//! and the remaining symmetric nodes cancel.

use gauss_quad::GaussLegendre;
use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// 15-point Kronrod nodes, positive half including the center.
/// Standard QUADPACK values.
const KRONROD_NODES: [f64; 8] = [
    0.0,
    0.207784955007898467600689403773245,
    0.405845151377397166906606412076961,
    0.586087235467691130294144838258730,
    0.741531185599394439863864773280788,
    0.864864423359769072789712788640926,
    0.949107912342758524526189684047851,
    0.991455371120812639206854697526329,
];

/// Kronrod weights matching [`KRONROD_NODES`]; symmetric nodes share
/// the weight of their positive counterpart.
const KRONROD_WEIGHTS: [f64; 8] = [
    0.209482141084727828012999174891714,
    0.204432940075298892414161999234649,
    0.190350578064785409913256402421014,
    0.169004726639267902826583426598550,
    0.140653259715525918745189590510238,
    0.104790010322250183839876322541518,
    0.063092092629978553290700663189204,
    0.022935322010529224963732008058970,
];

/// Weights of the embedded 7-point Gauss rule. Its nodes are the
/// even-indexed Kronrod nodes.
const GAUSS_WEIGHTS: [f64; 4] = [
    0.417959183673469387755102040816327,
    0.381830050505118944950369775488975,
    0.279705391489276667901467771423780,
    0.129484966168869693270611432679082,
];

/// One application of the G7K15 rule to a subinterval.
#[derive(Clone, Copy, Debug)]
struct GkEstimate {
    value: f64,
    error: f64,
    evaluations: usize,
    bad_points: usize,
    total_points: usize,
}

/// Applies G7K15 to `[a, b]`, skipping non-finite samples.
fn gk15(f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> GkEstimate {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let mut kronrod_sum = 0.0;
    let mut gauss_sum = 0.0;
    let mut bad_points = 0;
    let mut total_points = 0;

    for (i, &node) in KRONROD_NODES.iter().enumerate() {
        let points: &[f64] = if i == 0 {
            &[center]
        } else {
            &[center - half * node, center + half * node]
        };
        for &x in points {
            total_points += 1;
            let y = f(x);
            if y.is_finite() {
                kronrod_sum += KRONROD_WEIGHTS[i] * y;
                if i % 2 == 0 {
                    gauss_sum += GAUSS_WEIGHTS[i / 2] * y;
                }
            } else {
                bad_points += 1;
            }
        }
    }

    let value = kronrod_sum * half;
    let gauss_value = gauss_sum * half;
    GkEstimate {
        value,
        error: (value - gauss_value).abs(),
        evaluations: total_points,
        bad_points,
        total_points,
    }
}

/// A subinterval with its contribution, ordered by error for the
/// worst-first heap.
#[derive(Clone, Copy, Debug)]
struct Interval {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.error == other.error
    }
}

impl Eq for Interval {}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error
            .partial_cmp(&other.error)
            .unwrap_or(Ordering::Equal)
    }
}

/// Tolerances and budget for [`adaptive_quad`].
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveSettings {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_subdivisions: usize,
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        AdaptiveSettings {
            abs_tol: 1e-9,
            rel_tol: 1e-9,
            max_subdivisions: 500,
        }
    }
}

/// Result of an adaptive integration run. `error` is the accumulated
/// absolute error estimate, reported whether or not `converged`.
#[derive(Clone, Copy, Debug)]
pub struct QuadResult {
    pub value: f64,
    pub error: f64,
    pub evaluations: usize,
    pub intervals: usize,
    pub converged: bool,
}

/// Failure modes of the quadrature routine. Budget exhaustion is not
/// among them: the best estimate is returned with `converged = false`.
#[derive(Clone, Debug, PartialEq)]
pub enum QuadError {
    /// A bound is NaN or infinite.
    NonFiniteBounds { lower: f64, upper: f64 },
    /// Every node of some subinterval evaluated to a non-finite value.
    Unevaluable { a: f64, b: f64 },
    /// The accumulated estimate itself became non-finite.
    NonFiniteResult,
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadError::NonFiniteBounds { lower, upper } => {
                write!(f, "integration bounds must be finite, got [{}, {}]", lower, upper)
            }
            QuadError::Unevaluable { a, b } => write!(
                f,
                "the function could not be evaluated anywhere on [{:.6}, {:.6}]",
                a, b
            ),
            QuadError::NonFiniteResult => {
                write!(f, "the integral estimate is not a finite number")
            }
        }
    }
}

impl std::error::Error for QuadError {}

/// Integrates `f` over `[lower, upper]` with adaptive G7K15
/// subdivision.
///
/// # Example
/// ```
/// use integral_calc::numerical::quadrature::{adaptive_quad, AdaptiveSettings};
///
/// let res = adaptive_quad(&|x: f64| x * x, 0.0, 2.0, AdaptiveSettings::default()).unwrap();
/// assert!((res.value - 8.0 / 3.0).abs() < 1e-9);
/// ```
pub fn adaptive_quad(
    f: &dyn Fn(f64) -> f64,
    lower: f64,
    upper: f64,
    settings: AdaptiveSettings,
) -> Result<QuadResult, QuadError> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(QuadError::NonFiniteBounds { lower, upper });
    }

    let initial = gk15(f, lower, upper);
    if initial.bad_points == initial.total_points {
        return Err(QuadError::Unevaluable { a: lower, b: upper });
    }

    let mut heap: BinaryHeap<Interval> = BinaryHeap::new();
    heap.push(Interval {
        a: lower,
        b: upper,
        value: initial.value,
        error: initial.error,
    });

    let mut total_value = initial.value;
    let mut total_error = initial.error;
    let mut evaluations = initial.evaluations;
    let mut converged =
        total_error <= settings.abs_tol.max(settings.rel_tol * total_value.abs());

    let mut subdivisions = 0;
    while !converged && subdivisions < settings.max_subdivisions {
        subdivisions += 1;

        let worst = match heap.pop() {
            Some(interval) => interval,
            None => break,
        };
        total_value -= worst.value;
        total_error -= worst.error;

        let mid = 0.5 * (worst.a + worst.b);
        for (a, b) in [(worst.a, mid), (mid, worst.b)] {
            let est = gk15(f, a, b);
            evaluations += est.evaluations;
            if est.bad_points == est.total_points {
                return Err(QuadError::Unevaluable { a, b });
            }
            total_value += est.value;
            total_error += est.error;
            heap.push(Interval {
                a,
                b,
                value: est.value,
                error: est.error,
            });
        }

        // accumulated error drift can leave tiny negative residue
        total_error = total_error.max(0.0);
        converged = total_error <= settings.abs_tol.max(settings.rel_tol * total_value.abs());
    }

    if !total_value.is_finite() || !total_error.is_finite() {
        return Err(QuadError::NonFiniteResult);
    }
    if !converged {
        warn!(
            "quadrature budget of {} subdivisions exhausted; error estimate {:.3e}",
            settings.max_subdivisions, total_error
        );
    }

    Ok(QuadResult {
        value: total_value,
        error: total_error,
        evaluations,
        intervals: heap.len(),
        converged,
    })
}

/// Fixed-order Gauss-Legendre integration via the `gauss_quad` crate.
/// No error estimate; kept as a cross-check for the adaptive routine.
pub fn fixed_quad(
    f: &dyn Fn(f64) -> f64,
    lower: f64,
    upper: f64,
    degree: usize,
) -> Result<f64, String> {
    let rule = GaussLegendre::new(degree)
        .map_err(|e| format!("failed to create Gauss-Legendre rule: {:?}", e))?;
    Ok(rule.integrate(lower, upper, f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_linear_function_exact() {
        let res = adaptive_quad(&|x| x, 0.0, 1.0, AdaptiveSettings::default()).unwrap();
        assert_relative_eq!(res.value, 0.5, epsilon = 1e-12);
        assert!(res.error < 1e-6);
        assert!(res.converged);
    }

    #[test]
    fn test_quadratic_has_exact_value() {
        let res = adaptive_quad(&|x| x * x, 0.0, 2.0, AdaptiveSettings::default()).unwrap();
        assert_relative_eq!(res.value, 8.0 / 3.0, epsilon = 1e-9);
        assert!(res.error < 1e-6);
        assert_eq!(format!("{:.6}", res.value), "2.666667");
    }

    #[test]
    fn test_sine_over_full_arch() {
        let res = adaptive_quad(&|x: f64| x.sin(), 0.0, PI, AdaptiveSettings::default()).unwrap();
        assert_relative_eq!(res.value, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_oscillatory_integrand_subdivides() {
        let res = adaptive_quad(
            &|x: f64| (50.0 * x).sin(),
            0.0,
            1.0,
            AdaptiveSettings::default(),
        )
        .unwrap();
        let exact = (1.0 - (50.0_f64).cos()) / 50.0;
        assert_relative_eq!(res.value, exact, epsilon = 1e-8);
        assert!(res.intervals > 1);
    }

    #[test]
    fn test_parsed_expression_integrates() {
        let expr = Expr::parse_expression("exp(-x^2)").unwrap();
        let f = expr.lambdify1D();
        let res = adaptive_quad(&f, -5.0, 5.0, AdaptiveSettings::default()).unwrap();
        // erf(5) is 1 to well below our tolerance
        assert_relative_eq!(res.value, PI.sqrt(), epsilon = 1e-8);
    }

    #[test]
    fn test_integrable_endpoint_singularity() {
        // 1/sqrt(x) on (0, 1] integrates to 2; the endpoint is never a node
        let res = adaptive_quad(
            &|x: f64| 1.0 / x.sqrt(),
            0.0,
            1.0,
            AdaptiveSettings::default(),
        )
        .unwrap();
        assert!((res.value - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_singular_integrand_policy() {
        // documented policy: non-finite nodes are omitted, so the odd
        // singular integrand 1/x over [-1, 1] cancels to about zero
        let res = adaptive_quad(&|x| 1.0 / x, -1.0, 1.0, AdaptiveSettings::default()).unwrap();
        assert!(res.value.abs() < 1e-6, "value was {}", res.value);
    }

    #[test]
    fn test_unevaluable_function_is_an_error() {
        let res = adaptive_quad(
            &|x: f64| (-1.0 - x * x).sqrt(),
            0.0,
            1.0,
            AdaptiveSettings::default(),
        );
        assert!(matches!(res, Err(QuadError::Unevaluable { .. })));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let res = adaptive_quad(&|x| x, 0.0, f64::INFINITY, AdaptiveSettings::default());
        assert!(matches!(res, Err(QuadError::NonFiniteBounds { .. })));
    }

    #[test]
    fn test_budget_exhaustion_still_returns_estimate() {
        let settings = AdaptiveSettings {
            abs_tol: 1e-300,
            rel_tol: 1e-300,
            max_subdivisions: 3,
        };
        let res = adaptive_quad(&|x: f64| (50.0 * x).sin(), 0.0, 1.0, settings).unwrap();
        assert!(!res.converged);
        assert!(res.value.is_finite());
        assert!(res.error.is_finite());
    }

    #[test]
    fn test_fixed_quad_agrees_with_adaptive() {
        let adaptive =
            adaptive_quad(&|x: f64| x.exp(), 0.0, 1.0, AdaptiveSettings::default()).unwrap();
        let fixed = fixed_quad(&|x: f64| x.exp(), 0.0, 1.0, 32).unwrap();
        assert_relative_eq!(adaptive.value, fixed, epsilon = 1e-10);
    }

    #[test]
    fn test_error_display() {
        let err = QuadError::NonFiniteResult;
        assert_eq!(
            format!("{}", err),
            "the integral estimate is not a finite number"
        );
    }
}
