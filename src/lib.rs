//! nuclide-rs: Radionuclide Transport Through Disposal Systems
//!
//! A framework for following radionuclide mass as it leaves a waste form and
//! migrates through the engineered and natural barriers around it.
//!
//! # Architecture
//!
//! nuclide-rs is built on two core principles:
//!
//! 1. **Separation of State and Formulas**
//!    - Cells own their state: inventory ledger, concentration history,
//!      geometry and transport parameters
//!    - The solver module provides pure closed-form kinetics and quadrature
//!
//! 2. **A Single Boundary Contract**
//!    - Every cell implements [`NuclideModel`](physics::NuclideModel):
//!      Dirichlet, Neumann and Cauchy boundary values plus a source term
//!    - The [`DisposalSystem`](system::DisposalSystem) moves material
//!      between linked cells through that contract only
//!
//! # Quick Start
//!
//! ```rust
//! use nuclide_rs::prelude::*;
//!
//! # fn main() -> Result<(), TransportError> {
//! let table = InMemoryMaterialTable::new()
//!     .with("clay", 92, ChemProperty::Dispersion, 1e-9)
//!     .into_shared();
//!
//! // 1. Waste form releasing a tenth of its matrix per step
//! let waste = Compartment::new(
//!     "waste",
//!     "glass",
//!     Geometry::new(0.0, 0.5, 1.0)?,
//!     TransportParameters::new(0.1, 2500.0, 0.0)?,
//!     table.clone(),
//!     0,
//! );
//! let mut waste = DegRate::new(waste, 0.1)?;
//! waste.absorb(MaterialParcel::single(92235, 10.0, 0)?);
//!
//! // 2. Well-mixed buffer around it
//! let buffer = Compartment::new(
//!     "buffer",
//!     "clay",
//!     Geometry::new(0.5, 1.5, 1.0)?,
//!     TransportParameters::new(0.4, 1600.0, 0.0)?,
//!     table,
//!     0,
//! );
//!
//! // 3. Link and run
//! let mut system = DisposalSystem::new();
//! let waste = system.add_cell(waste);
//! let buffer = system.add_cell(MixedCell::new(buffer));
//! system.link(buffer, waste)?;
//!
//! for t in 1..=5 {
//!     system.step(t)?;
//! }
//!
//! // 4. Mass moved but was never created or lost
//! assert!(system.cell(buffer).unwrap().contained_mass() > 0.0);
//! assert!((system.total_mass() - 10.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Isotope maps, parcels, geometry, material table, cell trait
//! - [`inventory`]: Per-cell ledger and concentration history
//! - [`solver`]: Analytic transport solution, boundary formulas, quadrature
//! - [`models`]: Release strategies (`OneDimPpm`, `DegRate`, `MixedCell`)
//! - [`system`]: Arena of linked cells and the coupling step
//! - [`config`]: TOML system description
//! - [`output`]: Result visualization and export

// Core modules
pub mod error;
pub mod physics;

pub mod inventory;
pub mod models;
pub mod solver;
pub mod system;

pub mod config;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use nuclide_rs::prelude::*;
    //! ```
    pub use crate::config::SystemConfig;
    pub use crate::error::{TransportError, TransportResult};
    pub use crate::inventory::{ConcentrationHistory, InventoryLedger};
    pub use crate::models::{Compartment, DegRate, MixedCell, NuclideCell, OneDimPpm, TransportParameters};
    pub use crate::physics::{
        ChemProperty,
        ConcentrationMap,
        Geometry,
        InMemoryMaterialTable,
        Iso,
        IsoVector,
        IsotopeMap,
        MaterialParcel,
        MaterialTable,
        NuclideModel,
        NuclideModelKind,
        Timestep,
    };
    pub use crate::solver::{AnalyticTransportSolver, QuadratureIntegrator, SolutionPoint};
    pub use crate::system::{CellId, DisposalSystem, Transfer};
}
