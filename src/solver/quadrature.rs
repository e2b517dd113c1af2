//! Composite trapezoidal quadrature over a radial transect
//!
//! A concentration profile sampled at `n + 1` equally spaced radii is
//! integrated with
//!
//! ```text
//! ∫ f dr ≈ (b - a) / (2n) [f(a) + 2 Σ f(interior) + f(b)]
//! ```
//!
//! The scalar form works on a `DVector` of samples; the map form integrates
//! every isotope of an isotope-keyed profile.
//!
//! # Example
//!
//! ```rust
//! use nuclide_rs::physics::IsotopeMap;
//! use nuclide_rs::solver::QuadratureIntegrator;
//!
//! let integrator = QuadratureIntegrator::new(8).unwrap();
//! let integral = integrator
//!     .integrate(1.0, 3.0, |_| Ok(IsotopeMap::from_pairs([(92235, 2.0)])))
//!     .unwrap();
//!
//! assert!((integral.get(92235) - 4.0).abs() < 1e-12);
//! ```

use log::trace;
use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{TransportError, TransportResult};
use crate::physics::{ConcentrationMap, IsotopeMap};

/// Tolerance used when matching sample radii to the interval endpoints
const ENDPOINT_TOLERANCE: f64 = 1e-12;

/// `n + 1` equally spaced points from `a` to `b` inclusive
///
/// # Errors
///
/// [`TransportError::NumericDomain`] when `n == 0` or the interval is empty,
/// inverted or not finite.
pub fn linspace(a: f64, b: f64, n: usize) -> TransportResult<Vec<f64>> {
    check_interval(a, b, n)?;

    let step = (b - a) / n as f64;
    Ok((0..=n)
        .map(|i| if i == n { b } else { a + step * i as f64 })
        .collect())
}

/// Trapezoidal integral of `n + 1` samples equally spaced over `[a, b]`
///
/// `samples[0]` must be `f(a)` and `samples[n]` must be `f(b)`.
///
/// # Errors
///
/// [`TransportError::NumericDomain`] for an invalid interval or a sample
/// count other than `n + 1`.
pub fn trapezoid(a: f64, b: f64, n: usize, samples: &DVector<f64>) -> TransportResult<f64> {
    check_interval(a, b, n)?;

    if samples.len() != n + 1 {
        return Err(TransportError::NumericDomain(format!(
            "trapezoid over {} sub-intervals needs {} samples (got {})",
            n,
            n + 1,
            samples.len()
        )));
    }

    let endpoints = samples[0] + samples[n];
    let interior: f64 = samples.rows(1, n - 1).sum();

    Ok((b - a) / (2.0 * n as f64) * (endpoints + 2.0 * interior))
}

/// Trapezoidal integral of an isotope-keyed profile
///
/// `samples` are `(radius, concentration)` pairs. The pairs at `a` and `b`
/// are taken as the endpoints and removed; every remaining pair is an
/// interior sample. Isotopes missing from a sample count as zero there.
///
/// # Errors
///
/// [`TransportError::NumericDomain`] for an invalid interval, a missing
/// endpoint, or an interior count other than `n - 1`.
pub fn trapezoid_map(a: f64, b: f64, n: usize, samples: &[(f64, ConcentrationMap)]) -> TransportResult<IsotopeMap> {
    check_interval(a, b, n)?;

    let at = |radius: f64| samples.iter().position(|(r, _)| (r - radius).abs() <= ENDPOINT_TOLERANCE * (b - a).abs().max(1.0));

    let first = at(a).ok_or_else(|| missing_endpoint("lower", a))?;
    let last = at(b).ok_or_else(|| missing_endpoint("upper", b))?;

    let mut interior: Vec<&ConcentrationMap> = samples
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != first && *index != last)
        .map(|(_, (_, values))| values)
        .collect();

    if interior.len() != n - 1 {
        return Err(TransportError::NumericDomain(format!(
            "trapezoid over {} sub-intervals needs {} interior samples (got {})",
            n,
            n - 1,
            interior.len()
        )));
    }

    let isotopes = samples
        .iter()
        .fold(IsotopeMap::new(), |acc, (_, values)| acc.add(&values.map_values(|_| 0.0)));

    let mut ordered = Vec::with_capacity(n + 1);
    ordered.push(&samples[first].1);
    ordered.append(&mut interior);
    ordered.push(&samples[last].1);

    isotopes
        .isotopes()
        .map(|iso| {
            let column = DVector::from_iterator(n + 1, ordered.iter().map(|values| values.get(iso)));
            Ok((iso, trapezoid(a, b, n, &column)?))
        })
        .collect::<TransportResult<IsotopeMap>>()
}

fn check_interval(a: f64, b: f64, n: usize) -> TransportResult<()> {
    if n == 0 {
        return Err(TransportError::NumericDomain(
            "quadrature needs at least one sub-interval".to_string(),
        ));
    }
    if !a.is_finite() || !b.is_finite() || b <= a {
        return Err(TransportError::NumericDomain(format!(
            "quadrature interval [{}, {}] must be finite with b > a",
            a, b
        )));
    }
    Ok(())
}

fn missing_endpoint(which: &str, radius: f64) -> TransportError {
    TransportError::NumericDomain(format!("missing {} endpoint sample at r = {}", which, radius))
}

// =================================================================================================
// Integrator
// =================================================================================================

/// Samples a profile on a fixed grid and integrates it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureIntegrator {
    /// Number of sub-intervals n
    points: usize,
}

impl QuadratureIntegrator {
    /// Integrator with `points` sub-intervals
    pub fn new(points: usize) -> TransportResult<Self> {
        if points == 0 {
            return Err(TransportError::range(
                "quadrature points",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// Sample `profile` at `n + 1` radii over `[a, b]` and integrate
    ///
    /// With the `parallel` feature the samples are evaluated with rayon; the
    /// result is identical to the serial path.
    pub fn integrate<F>(&self, a: f64, b: f64, profile: F) -> TransportResult<IsotopeMap>
    where
        F: Fn(f64) -> TransportResult<ConcentrationMap> + Sync,
    {
        let radii = linspace(a, b, self.points)?;
        trace!("integrating over [{}, {}] with {} samples", a, b, radii.len());

        #[cfg(feature = "parallel")]
        let samples = radii
            .par_iter()
            .map(|&r| profile(r).map(|values| (r, values)))
            .collect::<TransportResult<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let samples = radii
            .iter()
            .map(|&r| profile(r).map(|values| (r, values)))
            .collect::<TransportResult<Vec<_>>>()?;

        trapezoid_map(a, b, self.points, &samples)
    }

    /// Mean value of `profile` over `[a, b]`
    pub fn mean<F>(&self, a: f64, b: f64, profile: F) -> TransportResult<IsotopeMap>
    where
        F: Fn(f64) -> TransportResult<ConcentrationMap> + Sync,
    {
        Ok(self.integrate(a, b, profile)?.scale(1.0 / (b - a)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_includes_both_ends() {
        let points = linspace(1.0, 2.0, 4).unwrap();

        assert_eq!(points.len(), 5);
        assert_eq!(points[0], 1.0);
        assert_eq!(points[4], 2.0);
        assert_relative_eq!(points[1], 1.25);
    }

    #[test]
    fn test_trapezoid_constant_is_exact() {
        for n in 1..10 {
            let samples = DVector::from_element(n + 1, 3.0);
            assert_relative_eq!(trapezoid(0.5, 2.5, n, &samples).unwrap(), 6.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_trapezoid_linear_is_exact() {
        let n = 4;
        let radii = linspace(0.0, 2.0, n).unwrap();
        let samples = DVector::from_iterator(n + 1, radii.iter().map(|r| 3.0 * r + 1.0));

        // ∫0^2 (3r + 1) dr = 6 + 2
        assert_relative_eq!(trapezoid(0.0, 2.0, n, &samples).unwrap(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_intervals() {
        let samples = DVector::from_element(3, 1.0);

        assert!(trapezoid(1.0, 1.0, 2, &samples).is_err());
        assert!(trapezoid(2.0, 1.0, 2, &samples).is_err());
        assert!(trapezoid(0.0, 1.0, 0, &samples).is_err());
        assert!(trapezoid(0.0, 1.0, 3, &samples).is_err());
        assert!(linspace(0.0, 0.0, 3).is_err());
    }

    #[test]
    fn test_trapezoid_map_requires_endpoints() {
        let c = IsotopeMap::from_pairs([(92235, 1.0)]);
        let samples = vec![(0.5, c.clone()), (1.0, c.clone())];

        let result = trapezoid_map(0.0, 1.0, 1, &samples);
        assert!(matches!(result, Err(TransportError::NumericDomain(_))));
    }

    #[test]
    fn test_trapezoid_map_unordered_interior() {
        let c = |v: f64| IsotopeMap::from_pairs([(92235, v)]);
        // endpoints listed last; interior sample order does not matter
        let samples = vec![(0.5, c(1.0)), (1.0, c(1.0)), (0.0, c(1.0))];

        let integral = trapezoid_map(0.0, 1.0, 2, &samples).unwrap();
        assert_relative_eq!(integral.get(92235), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_integrator_mean() {
        let integrator = QuadratureIntegrator::new(16).unwrap();
        let mean = integrator
            .mean(2.0, 4.0, |_| Ok(IsotopeMap::from_pairs([(92235, 0.7), (94239, 0.1)])))
            .unwrap();

        assert_relative_eq!(mean.get(92235), 0.7, epsilon = 1e-12);
        assert_relative_eq!(mean.get(94239), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_integrator_propagates_profile_error() {
        let integrator = QuadratureIntegrator::new(4).unwrap();
        let result = integrator.integrate(0.0, 1.0, |_| {
            Err(TransportError::NumericDomain("bad sample".into()))
        });

        assert!(result.is_err());
        assert!(QuadratureIntegrator::new(0).is_err());
    }
}
