//! Analytic advection-dispersion cell
//!
//! The cell treats its own inventory as a constant-concentration source held
//! at the inner surface and evaluates the closed-form 1-D solution at the
//! radial midpoint of the component.
//!
//! # Key Features
//!
//! - **Source**: ledger mass dissolved in the pore volume (`C0`)
//! - **Initial condition**: the snapshot recorded before the current step (`Ci`)
//! - **Uptake**: a parent integrates the profile across its transect to
//!   decide how much to draw from a daughter
//!
//! # Example
//!
//! ```rust
//! use nuclide_rs::models::{Compartment, OneDimPpm, TransportParameters};
//! use nuclide_rs::physics::{ChemProperty, Geometry, InMemoryMaterialTable, MaterialParcel, NuclideModel};
//!
//! let table = InMemoryMaterialTable::new()
//!     .with("clay", 92, ChemProperty::Dispersion, 1e-6)
//!     .into_shared();
//! let compartment = Compartment::new(
//!     "buffer",
//!     "clay",
//!     Geometry::new(0.0, 1.0, 1.0).unwrap(),
//!     TransportParameters::new(1.0, 1600.0, 1e-3).unwrap(),
//!     table,
//!     0,
//! );
//!
//! let mut cell = OneDimPpm::new(compartment, 1e6, f64::INFINITY, 10).unwrap();
//! cell.absorb(MaterialParcel::single(92235, std::f64::consts::PI, 0).unwrap());
//! cell.transport_step(1).unwrap();
//!
//! // advection has long since carried the source past the midpoint
//! assert!((cell.dirichlet_of(92235) - 1.0).abs() < 1e-9);
//! ```

use log::debug;

use crate::error::TransportResult;
use crate::models::Compartment;
use crate::models::parameters::rejected;
use crate::physics::{ConcentrationMap, IsotopeMap, NuclideModel, NuclideModelKind, Timestep};
use crate::solver::{AnalyticTransportSolver, QuadratureIntegrator, SolutionPoint};

/// Default number of quadrature sub-intervals across a transect
pub const DEFAULT_QUADRATURE_POINTS: usize = 10;

/// Analytic 1-D transport cell
#[derive(Debug, Clone)]
pub struct OneDimPpm {
    compartment: Compartment,

    // ==================== Kinetics ====================
    solver: AnalyticTransportSolver,
    /// Seconds per timestep
    step_length: f64,
    /// Seconds the source concentration is held
    source_duration: f64,
    /// Transect sampling used when taking up material
    integrator: QuadratureIntegrator,
}

impl OneDimPpm {
    /// Create a cell
    ///
    /// # Arguments
    ///
    /// * `compartment` - Shared cell state
    /// * `step_length` - Seconds per timestep (> 0)
    /// * `source_duration` - Seconds the source is held (>= 0, may be infinite)
    /// * `quadrature_points` - Sub-intervals across the transect (>= 1)
    pub fn new(
        compartment: Compartment,
        step_length: f64,
        source_duration: f64,
        quadrature_points: usize,
    ) -> TransportResult<Self> {
        let mut cell = Self {
            compartment,
            solver: AnalyticTransportSolver::new(),
            step_length: 1.0,
            source_duration: f64::INFINITY,
            integrator: QuadratureIntegrator::new(quadrature_points)?,
        };
        cell.set_step_length(step_length)?;
        cell.set_source_duration(source_duration)?;
        Ok(cell)
    }

    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    pub fn source_duration(&self) -> f64 {
        self.source_duration
    }

    pub fn quadrature_points(&self) -> usize {
        self.integrator.points()
    }

    pub fn solver(&self) -> &AnalyticTransportSolver {
        &self.solver
    }

    pub fn set_step_length(&mut self, step_length: f64) -> TransportResult<()> {
        if !step_length.is_finite() || step_length <= 0.0 {
            return Err(rejected("step_length", step_length, "must be positive and finite"));
        }
        self.step_length = step_length;
        Ok(())
    }

    pub fn set_source_duration(&mut self, source_duration: f64) -> TransportResult<()> {
        if source_duration.is_nan() || source_duration < 0.0 {
            return Err(rejected("source_duration", source_duration, "must be non-negative"));
        }
        self.source_duration = source_duration;
        Ok(())
    }

    /// Depth of the radial midpoint below the inner surface
    fn midpoint_depth(&self) -> f64 {
        let geometry = self.compartment.geometry();
        geometry.depth_of(geometry.radial_midpoint())
    }
}

impl NuclideModel for OneDimPpm {
    fn compartment(&self) -> &Compartment {
        &self.compartment
    }

    fn compartment_mut(&mut self) -> &mut Compartment {
        &mut self.compartment
    }

    fn kind(&self) -> NuclideModelKind {
        NuclideModelKind::OneDimPpm
    }

    fn transport_step(&mut self, time: Timestep) -> TransportResult<()> {
        self.compartment.history().check_time(time)?;

        let c0 = self.compartment.bulk_concentration();
        let (base, ci) = match self.compartment.history().before(time) {
            Some((key, snapshot)) => (key, snapshot.clone()),
            None => (self.compartment.created(), ConcentrationMap::new()),
        };
        let elapsed = time.saturating_sub(base) as f64 * self.step_length;

        let concentration = if elapsed == 0.0 {
            ci
        } else {
            let point = SolutionPoint::new(
                self.midpoint_depth(),
                elapsed,
                self.source_duration.min(elapsed),
                self.compartment.parameters().advective_velocity(),
            );
            self.solver
                .solve_map(&c0, &ci, &point, |iso| self.compartment.dispersion(iso))?
        };

        debug!(
            "[{}] transport step t={} elapsed={:e}s c={}",
            self.compartment.name(),
            time,
            elapsed,
            concentration
        );
        self.compartment.record(time, concentration)
    }

    /// Integrates the profile driven by the daughter's boundary concentration
    /// across this cell's transect over one step, converts the mean to mass
    /// and keeps what exceeds the current inventory.
    fn uptake_demand(&self, daughter: &dyn NuclideModel) -> TransportResult<IsotopeMap> {
        let external = daughter.dirichlet();
        let bulk = self.compartment.bulk_concentration();
        let geometry = self.compartment.geometry();

        let point = SolutionPoint::new(
            0.0,
            self.step_length,
            self.source_duration.min(self.step_length),
            self.compartment.parameters().advective_velocity(),
        );

        let mean = self.integrator.mean(geometry.inner_radius(), geometry.outer_radius(), |radius| {
            self.solver.solve_map(
                &external,
                &bulk,
                &point.at_depth(geometry.depth_of(radius)),
                |iso| self.compartment.dispersion(iso),
            )
        })?;

        let target = mean.clamp_non_negative().scale(self.compartment.pore_volume());
        Ok(target.subtract(self.compartment.ledger().sum().masses()).positive_part())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
