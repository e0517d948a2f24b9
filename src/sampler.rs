//! Domain sampling of single-variable functions into point sequences.
//!
//! Non-finite values drop their point and sampling continues; a fault raised
//! by the function aborts the whole run so no partial curve is produced.

use crate::error::{Error, Result};
use crate::geometry::Point;

/// A numeric function of one variable that can be sampled.
///
/// [`CompiledExpr`](crate::expr::CompiledExpr) never faults. Programmatic
/// implementations may return an error, which aborts sampling.
pub trait Function {
    /// Evaluate the function at `x`.
    fn evaluate(&self, x: f64) -> Result<f64>;
}

impl<F> Function for F
where
    F: Fn(f64) -> Result<f64>,
{
    fn evaluate(&self, x: f64) -> Result<f64> {
        self(x)
    }
}

/// Upper bound on the abscissas a [`Domain`] may produce.
pub const MAX_SAMPLES: usize = 1_000_000;

/// A closed sampling interval with a fixed step.
///
/// The walk starts at `lo` and never passes `hi`; `hi` itself is included
/// only when the span is a whole number of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    lo: f64,
    hi: f64,
    step: f64,
}

impl Domain {
    /// The fixed plotting domain: `[-10, 10]` at step `0.1`.
    pub const STANDARD: Self = Self { lo: -10.0, hi: 10.0, step: 0.1 };

    /// Create a validated domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] unless `lo < hi`, `step > 0`, all
    /// three values are finite, and the walk has at most [`MAX_SAMPLES`]
    /// abscissas.
    pub fn new(lo: f64, hi: f64, step: f64) -> Result<Self> {
        if !(lo.is_finite() && hi.is_finite() && step.is_finite()) {
            return Err(Error::InvalidDomain(format!("non-finite bounds [{lo}, {hi}] step {step}")));
        }
        if lo >= hi {
            return Err(Error::InvalidDomain(format!("lower bound {lo} must be below {hi}")));
        }
        if step <= 0.0 {
            return Err(Error::InvalidDomain(format!("step {step} must be positive")));
        }
        let steps = whole_steps(lo, hi, step);
        if !steps.is_finite() || steps >= MAX_SAMPLES as f64 {
            return Err(Error::InvalidDomain(format!(
                "step {step} over [{lo}, {hi}] exceeds {MAX_SAMPLES} samples"
            )));
        }
        Ok(Self { lo, hi, step })
    }

    /// Lower bound.
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Distance between consecutive abscissas.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Number of abscissas, both endpoints included.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        whole_steps(self.lo, self.hi, self.step) as usize + 1
    }

    /// The abscissas `lo + i * step`.
    ///
    /// Computed from the index rather than accumulated, so the standard
    /// domain hits `0.0` exactly at `i = 100`.
    pub fn abscissas(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count()).map(move |i| (self.lo + self.step * i as f64).min(self.hi))
    }
}

/// Whole steps that fit in `[lo, hi]`. A relative tolerance absorbs the
/// representation error of steps like `0.1`.
fn whole_steps(lo: f64, hi: f64, step: f64) -> f64 {
    let n = (hi - lo) / step;
    (n + n * 1e-9).floor()
}

impl Default for Domain {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Counts gathered during one sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleReport {
    /// Abscissas evaluated.
    pub evaluated: usize,
    /// Points dropped because the value was NaN or infinite.
    pub dropped: usize,
}

impl SampleReport {
    /// Points that survived filtering.
    #[must_use]
    pub const fn kept(&self) -> usize {
        self.evaluated - self.dropped
    }
}

/// Sample `f` over `domain`, returning only finite points.
///
/// # Errors
///
/// - [`Error::EvaluationFault`] (or the function's own error) if any
///   evaluation fails; the run is aborted.
/// - [`Error::NoValidPoints`] if every value was non-finite.
///
/// # Example
///
/// ```rust
/// use graph_plotter::expr::compile;
/// use graph_plotter::sampler::{sample, Domain};
///
/// let f = compile("x").unwrap();
/// let points = sample(&f, &Domain::STANDARD).unwrap();
/// assert_eq!(points.len(), 201);
/// ```
pub fn sample<F: Function + ?Sized>(f: &F, domain: &Domain) -> Result<Vec<Point>> {
    sample_with_report(f, domain).map(|(points, _)| points)
}

/// Like [`sample`], also returning a [`SampleReport`].
///
/// # Errors
///
/// Same as [`sample`].
pub fn sample_with_report<F: Function + ?Sized>(
    f: &F,
    domain: &Domain,
) -> Result<(Vec<Point>, SampleReport)> {
    let mut points = Vec::with_capacity(domain.sample_count());
    let mut report = SampleReport::default();

    for x in domain.abscissas() {
        report.evaluated += 1;
        let y = f.evaluate(x).map_err(|err| match err {
            fault @ Error::EvaluationFault { .. } => fault,
            other => Error::EvaluationFault { x, reason: other.to_string() },
        })?;

        if y.is_finite() {
            points.push(Point::new(x, y));
        } else {
            report.dropped += 1;
            tracing::debug!(x, y, "dropping non-finite sample");
        }
    }

    if points.is_empty() {
        return Err(Error::NoValidPoints);
    }

    Ok((points, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::compile;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_domain_count() {
        assert_eq!(Domain::STANDARD.sample_count(), 201);
        let xs: Vec<f64> = Domain::STANDARD.abscissas().collect();
        assert_eq!(xs[0], -10.0);
        assert_eq!(xs[100], 0.0);
        assert_relative_eq!(xs[200], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identity_samples() {
        let f = compile("x").unwrap();
        let points = sample(&f, &Domain::STANDARD).unwrap();
        assert_eq!(points.len(), 201);
        assert!(points.iter().all(|p| p.y == p.x));
    }

    #[test]
    fn test_reciprocal_drops_origin() {
        let f = compile("1/x").unwrap();
        let (points, report) = sample_with_report(&f, &Domain::STANDARD).unwrap();
        assert_eq!(points.len(), 200);
        assert_eq!(report, SampleReport { evaluated: 201, dropped: 1 });
        assert!(points.iter().all(|p| p.x != 0.0));
    }

    #[test]
    fn test_all_non_finite_is_no_valid_points() {
        let f = compile("(0 - 1)^0.5 * x").unwrap();
        assert!(matches!(sample(&f, &Domain::STANDARD), Err(Error::NoValidPoints)));
    }

    #[test]
    fn test_fault_aborts_run() {
        let calls = std::cell::Cell::new(0);
        let faulty = |x: f64| -> Result<f64> {
            calls.set(calls.get() + 1);
            if x > 0.0 {
                Err(Error::Rendering("lookup failed".into()))
            } else {
                Ok(x)
            }
        };

        match sample(&faulty, &Domain::STANDARD) {
            Err(Error::EvaluationFault { x, reason }) => {
                assert!(x > 0.0);
                assert!(reason.contains("lookup failed"));
            }
            other => panic!("expected EvaluationFault, got {other:?}"),
        }
        // Stopped at the first positive abscissa.
        assert_eq!(calls.get(), 102);
    }

    #[test]
    fn test_fault_is_distinct_from_no_valid_points() {
        let always_nan = |_: f64| -> Result<f64> { Ok(f64::NAN) };
        let always_fault =
            |x: f64| -> Result<f64> { Err(Error::EvaluationFault { x, reason: "domain".into() }) };

        assert!(matches!(sample(&always_nan, &Domain::STANDARD), Err(Error::NoValidPoints)));
        assert!(matches!(
            sample(&always_fault, &Domain::STANDARD),
            Err(Error::EvaluationFault { x, .. }) if x == -10.0
        ));
    }

    #[test]
    fn test_invalid_domains() {
        assert!(Domain::new(1.0, 1.0, 0.1).is_err());
        assert!(Domain::new(2.0, 1.0, 0.1).is_err());
        assert!(Domain::new(0.0, 1.0, 0.0).is_err());
        assert!(Domain::new(0.0, 1.0, -0.5).is_err());
        assert!(Domain::new(f64::NEG_INFINITY, 1.0, 0.1).is_err());
        assert!(Domain::new(0.0, f64::NAN, 0.1).is_err());
    }

    #[test]
    fn test_partial_last_step_stays_inside() {
        let domain = Domain::new(0.0, 1.0, 0.4).unwrap();
        let xs: Vec<f64> = domain.abscissas().collect();
        assert_eq!(domain.sample_count(), 3);
        assert_eq!(xs.len(), 3);
        assert_relative_eq!(xs[2], 0.8, epsilon = 1e-12);
        assert!(xs.iter().all(|&x| x <= domain.hi()));

        let domain = Domain::new(-1.0, 1.0, 0.3).unwrap();
        assert!(domain.abscissas().all(|x| (-1.0..=1.0).contains(&x)));
        assert_eq!(domain.sample_count(), 7);
    }

    #[test]
    fn test_sample_cap() {
        assert!(matches!(Domain::new(-10.0, 10.0, 1e-300), Err(Error::InvalidDomain(_))));
        assert!(matches!(Domain::new(-1e300, 1e300, 1e-300), Err(Error::InvalidDomain(_))));
        assert!(matches!(Domain::new(0.0, 1.0, 1e-6), Err(Error::InvalidDomain(_))));

        let largest = Domain::new(0.0, 1.0, 1.0 / (MAX_SAMPLES - 1) as f64).unwrap();
        assert_eq!(largest.sample_count(), MAX_SAMPLES);
    }

    #[test]
    fn test_custom_domain() {
        let domain = Domain::new(0.0, 1.0, 0.25).unwrap();
        let f = compile("x * 4").unwrap();
        let ys: Vec<f64> = sample(&f, &domain).unwrap().iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
