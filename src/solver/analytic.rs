//! Closed-form 1-D advection-dispersion solution
//!
//! For a semi-infinite medium initially at concentration `Ci`, with a
//! constant boundary concentration `C0` held from time `0` to `t0`, the
//! concentration at depth `r` and time `t >= t0` is
//!
//! ```text
//! C(r, t) = C0 A + Ci B
//!
//! A   = At - Att0
//! At  = 1/2 erfc((Rr - vt) / (2 sqrt(DRt)))
//! Att0 = 1/2 erfc((Rr - v(t - t0)) / (2 sqrt(DR(t - t0))))
//!
//! B   = B1 + B2 + B3
//! B1  = 1/2 erfc((Rr - vt) / (2 sqrt(DRt)))
//! B2  = sqrt(v²t / (πRD)) exp(-(Rr - vt)² / (4DRt))
//! B3  = -1/2 (1 + vr/D + v²t/(DR)) exp(vr/D) erfc((Rr + vt) / (2 sqrt(DRt)))
//! ```
//!
//! `Att0` is the response to the pulse switching off at `t0`, evaluated after
//! its own elapsed time `t - t0`; at `t == t0` it contributes nothing.
//!
//! # Example
//!
//! ```rust
//! use nuclide_rs::solver::{AnalyticTransportSolver, SolutionPoint};
//!
//! let solver = AnalyticTransportSolver::new();
//! let point = SolutionPoint::new(0.0, 100.0, 100.0, 0.0);
//!
//! // At the inlet with no advection half the source is reached
//! let c = solver.solve(2.0, 0.0, &point, 1e-3).unwrap();
//! assert!((c - 1.0).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

use statrs::function::erf::erfc;

use crate::error::{TransportError, TransportResult};
use crate::physics::{ConcentrationMap, Iso};

/// Where and when the solution is evaluated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionPoint {
    /// Depth below the source boundary r \[m\]
    pub depth: f64,

    /// Elapsed time t \[s\]
    pub time: f64,

    /// Duration the source concentration is held, t0 \[s\]
    pub source_time: f64,

    /// Advective pore velocity v \[m/s\]
    pub velocity: f64,
}

impl SolutionPoint {
    pub fn new(depth: f64, time: f64, source_time: f64, velocity: f64) -> Self {
        Self { depth, time, source_time, velocity }
    }

    /// Same point at another depth
    pub fn at_depth(&self, depth: f64) -> Self {
        Self { depth, ..*self }
    }
}

/// Analytic advection-dispersion solver
///
/// Pure: every call depends only on its arguments. Dispersion coefficients
/// are looked up by the caller and passed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticTransportSolver {
    retardation: f64,
}

impl Default for AnalyticTransportSolver {
    fn default() -> Self {
        Self { retardation: 1.0 }
    }
}

impl AnalyticTransportSolver {
    /// Solver with unit retardation
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retardation(&self) -> f64 {
        self.retardation
    }

    /// Source response `A = At - Att0`
    ///
    /// # Errors
    ///
    /// [`TransportError::NumericDomain`] when `D <= 0`, `t <= 0`, `t < t0`,
    /// `r < 0`, or the result is not finite.
    pub fn release_term(&self, point: &SolutionPoint, dispersion: f64) -> TransportResult<f64> {
        self.check_domain(point, dispersion)?;
        let SolutionPoint { depth: r, time: t, source_time: t0, velocity: v } = *point;
        let rr = self.retardation;

        let at = 0.5 * erfc((rr * r - v * t) / (2.0 * (dispersion * rr * t).sqrt()));

        let att0 = if t == t0 {
            0.0
        } else {
            let tau = t - t0;
            0.5 * erfc((rr * r - v * tau) / (2.0 * (dispersion * rr * tau).sqrt()))
        };

        finite("release term", at - att0)
    }

    /// Initial-condition response `B = B1 + B2 + B3`
    pub fn initial_term(&self, point: &SolutionPoint, dispersion: f64) -> TransportResult<f64> {
        self.check_domain(point, dispersion)?;
        let SolutionPoint { depth: r, time: t, velocity: v, .. } = *point;
        let rr = self.retardation;
        let spread = 2.0 * (dispersion * rr * t).sqrt();

        let b1 = 0.5 * erfc((rr * r - v * t) / spread);
        let b2 = (v * v * t / (PI * rr * dispersion)).sqrt()
            * (-(rr * r - v * t).powi(2) / (4.0 * dispersion * rr * t)).exp();
        let peclet = v * r / dispersion;
        let b3 = -0.5
            * (1.0 + peclet + v * v * t / (dispersion * rr))
            * exp_erfc(peclet, (rr * r + v * t) / spread)?;

        finite("initial term", b1 + b2 + b3)
    }

    /// Concentration `C0 A + Ci B` for one isotope
    pub fn solve(&self, c0: f64, ci: f64, point: &SolutionPoint, dispersion: f64) -> TransportResult<f64> {
        let a = self.release_term(point, dispersion)?;
        let b = if ci == 0.0 { 0.0 } else { self.initial_term(point, dispersion)? };

        finite("concentration", c0 * a + ci * b)
    }

    /// Concentration of every isotope present in `c0` or `ci`
    ///
    /// `dispersion` resolves the coefficient of each isotope; its errors
    /// propagate unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nuclide_rs::physics::IsotopeMap;
    /// use nuclide_rs::solver::{AnalyticTransportSolver, SolutionPoint};
    ///
    /// let solver = AnalyticTransportSolver::new();
    /// let c0 = IsotopeMap::from_pairs([(92235, 1.0), (94239, 2.0)]);
    /// let point = SolutionPoint::new(0.1, 3600.0, 3600.0, 1e-6);
    ///
    /// let c = solver.solve_map(&c0, &IsotopeMap::new(), &point, |_| Ok(1e-8)).unwrap();
    /// assert_eq!(c.len(), 2);
    /// ```
    pub fn solve_map<F>(
        &self,
        c0: &ConcentrationMap,
        ci: &ConcentrationMap,
        point: &SolutionPoint,
        mut dispersion: F,
    ) -> TransportResult<ConcentrationMap>
    where
        F: FnMut(Iso) -> TransportResult<f64>,
    {
        c0.union_isotopes(ci)
            .into_iter()
            .map(|iso| {
                let d = dispersion(iso)?;
                Ok((iso, self.solve(c0.get(iso), ci.get(iso), point, d)?))
            })
            .collect::<TransportResult<ConcentrationMap>>()
    }

    fn check_domain(&self, point: &SolutionPoint, dispersion: f64) -> TransportResult<()> {
        if !dispersion.is_finite() || dispersion <= 0.0 {
            return Err(TransportError::NumericDomain(format!(
                "dispersion coefficient must be positive (got {})",
                dispersion
            )));
        }
        if !point.time.is_finite() || point.time <= 0.0 {
            return Err(TransportError::NumericDomain(format!(
                "evaluation time must be positive (got {})",
                point.time
            )));
        }
        if !point.source_time.is_finite() || point.source_time < 0.0 || point.time < point.source_time {
            return Err(TransportError::NumericDomain(format!(
                "source time {} must lie in [0, t] with t = {}",
                point.source_time, point.time
            )));
        }
        if !point.depth.is_finite() || point.depth < 0.0 {
            return Err(TransportError::NumericDomain(format!(
                "depth must be non-negative (got {})",
                point.depth
            )));
        }
        Ok(())
    }
}

/// `exp(a) erfc(x)` without forming `inf * 0`
///
/// Falls back to the asymptotic expansion
/// `exp(a - x²) / (x sqrt(π)) (1 - 1/(2x²) + 3/(4x⁴))` when the direct
/// product is not representable.
fn exp_erfc(a: f64, x: f64) -> TransportResult<f64> {
    let scale = a.exp();
    let tail = erfc(x);

    if scale.is_finite() && (tail > 0.0 || a <= 0.0) {
        return Ok(scale * tail);
    }

    if x > 0.0 {
        let x2 = x * x;
        let series = 1.0 - 1.0 / (2.0 * x2) + 3.0 / (4.0 * x2 * x2);
        return finite("exp(a) erfc(x)", (a - x2).exp() / (x * PI.sqrt()) * series);
    }

    Err(TransportError::NumericDomain(format!(
        "exp({}) erfc({}) is not representable",
        a, x
    )))
}

fn finite(what: &str, value: f64) -> TransportResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TransportError::NumericDomain(format!("{} is not finite ({})", what, value)))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
