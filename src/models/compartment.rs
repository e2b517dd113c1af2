//! State every cell owns regardless of its release strategy
//!
//! A [`Compartment`] ties together the ledger, the concentration history,
//! the geometry and the transport parameters of one disposal-system
//! component, and implements the boundary-coupling arithmetic on top of
//! them. Strategy-specific state (rates, solver settings) lives in the
//! strategy types themselves.

use log::debug;

use crate::error::TransportResult;
use crate::inventory::{ConcentrationHistory, InventoryLedger};
use crate::models::TransportParameters;
use crate::physics::{
    ConcentrationMap, FluxMap, Geometry, GradientMap, Iso, IsoVector, IsotopeMap, MaterialParcel,
    SharedMaterialTable, Timestep,
};
use crate::solver::boundary;

#[derive(Debug, Clone)]
pub struct Compartment {
    // ==================== Identity ====================
    /// Instance name, e.g. "buffer"
    name: String,
    /// Material name used for property lookups
    material: String,

    // ==================== Physics ====================
    geometry: Geometry,
    parameters: TransportParameters,
    table: SharedMaterialTable,

    // ==================== State ====================
    ledger: InventoryLedger,
    history: ConcentrationHistory,
}

impl Compartment {
    /// Empty compartment created at `created`
    ///
    /// # Example
    ///
    /// ```rust
    /// use nuclide_rs::models::{Compartment, TransportParameters};
    /// use nuclide_rs::physics::{ChemProperty, Geometry, InMemoryMaterialTable};
    ///
    /// let table = InMemoryMaterialTable::new()
    ///     .with("clay", 92, ChemProperty::Dispersion, 1e-9)
    ///     .into_shared();
    ///
    /// let compartment = Compartment::new(
    ///     "buffer",
    ///     "clay",
    ///     Geometry::new(0.5, 1.0, 2.0).unwrap(),
    ///     TransportParameters::new(0.4, 1600.0, 0.0).unwrap(),
    ///     table,
    ///     0,
    /// );
    ///
    /// assert_eq!(compartment.ledger().total_mass(), 0.0);
    /// assert!(compartment.history().is_empty());
    /// ```
    pub fn new(
        name: impl Into<String>,
        material: impl Into<String>,
        geometry: Geometry,
        parameters: TransportParameters,
        table: SharedMaterialTable,
        created: Timestep,
    ) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
            geometry,
            parameters,
            table,
            ledger: InventoryLedger::new(),
            history: ConcentrationHistory::new(created),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn parameters(&self) -> &TransportParameters {
        &self.parameters
    }

    /// Mutable parameters; setters validate
    pub fn parameters_mut(&mut self) -> &mut TransportParameters {
        &mut self.parameters
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    pub fn history(&self) -> &ConcentrationHistory {
        &self.history
    }

    /// Creation time of the cell
    pub fn created(&self) -> Timestep {
        self.history.created()
    }

    /// Volume of water-filled pores \[m³\]
    pub fn pore_volume(&self) -> f64 {
        self.geometry.volume() * self.parameters.porosity()
    }

    /// Ledger contents dissolved in the pore volume
    pub fn bulk_concentration(&self) -> ConcentrationMap {
        self.ledger.concentration(self.pore_volume())
    }

    /// Dispersion coefficient of `iso` in this material
    pub fn dispersion(&self, iso: Iso) -> TransportResult<f64> {
        self.table.dispersion(&self.material, iso)
    }

    // ====================================== Inventory ======================================

    pub fn absorb(&mut self, parcel: MaterialParcel) {
        debug!("[{}] absorb {:.6e} kg", self.name, parcel.total_mass());
        self.ledger.absorb(parcel);
    }

    pub fn extract(&mut self, composition: &IsotopeMap, mass: f64) -> TransportResult<MaterialParcel> {
        debug!("[{}] extract {:.6e} kg", self.name, mass);
        self.ledger.extract(composition, mass)
    }

    /// Record a snapshot at `time` together with the current ledger sum
    pub fn record(&mut self, time: Timestep, concentration: ConcentrationMap) -> TransportResult<()> {
        let inventory = self.ledger.sum();
        self.history.update(time, concentration, inventory)
    }

    /// Re-record the ledger sum against the snapshot already stored at `time`
    pub fn record_inventory(&mut self, time: Timestep) -> TransportResult<()> {
        let inventory = self.ledger.sum();
        self.history.update_inventory(time, inventory)
    }

    // ====================================== Boundary ======================================

    /// Snapshot at the last update
    pub fn dirichlet(&self) -> ConcentrationMap {
        self.history.latest()
    }

    /// Gradient from `c_int` at the radial midpoint towards `c_ext` at `r_ext`
    pub fn neumann(&self, c_int: &ConcentrationMap, c_ext: &ConcentrationMap, r_ext: f64) -> TransportResult<GradientMap> {
        boundary::neumann(c_int, self.geometry.radial_midpoint(), c_ext, r_ext)
    }

    /// Flux `-D grad + v c` with this material's dispersion coefficients
    pub fn cauchy(&self, gradient: &GradientMap, concentration: &ConcentrationMap) -> TransportResult<FluxMap> {
        boundary::cauchy(
            gradient,
            concentration,
            self.parameters.advective_velocity(),
            |iso| self.dispersion(iso),
        )
    }

    /// Boundary snapshot scaled to mass over the pore volume
    pub fn source_term(&self) -> (IsoVector, f64) {
        boundary::source_term(&self.dirichlet(), self.pore_volume())
    }
}
