//! Transport formulas
//!
//! This module provides the numerics the cells use. Everything here is a
//! pure function of its inputs: cells own the state and call in.
//!
//! # Module Organization
//!
//! - **`analytic`**: closed-form 1-D advection-dispersion solution
//!   - `AnalyticTransportSolver`: source and initial-condition responses
//!   - `SolutionPoint`: depth, time, source duration and velocity
//!
//! - **`boundary`**: boundary-coupling formulas
//!   - `neumann`, `cauchy`, `source_term`
//!
//! - **`quadrature`**: composite trapezoidal integration
//!   - `linspace`, `trapezoid`, `trapezoid_map`
//!   - `QuadratureIntegrator`: sample a profile and integrate it
//!
//! # Quick Start Example
//!
//! ```rust
//! use nuclide_rs::physics::IsotopeMap;
//! use nuclide_rs::solver::{AnalyticTransportSolver, QuadratureIntegrator, SolutionPoint};
//!
//! let solver = AnalyticTransportSolver::new();
//! let integrator = QuadratureIntegrator::new(10).unwrap();
//!
//! let source = IsotopeMap::from_pairs([(92235, 1.0)]);
//! let point = SolutionPoint::new(0.0, 3.15e7, 3.15e7, 1e-9);
//!
//! // Mean concentration over a 0.5 m transect after one year
//! let mean = integrator
//!     .mean(0.0, 0.5, |depth| {
//!         solver.solve_map(&source, &IsotopeMap::new(), &point.at_depth(depth), |_| Ok(1e-9))
//!     })
//!     .unwrap();
//!
//! assert!(mean.get(92235) > 0.0 && mean.get(92235) < 1.0);
//! ```

pub mod analytic;
pub mod boundary;
pub mod quadrature;

pub use analytic::{AnalyticTransportSolver, SolutionPoint};
pub use quadrature::{QuadratureIntegrator, linspace, trapezoid, trapezoid_map};
