//! Physical quantities and the cell capability trait
//!
//! This module holds the value types every transport formula works with and
//! the [`NuclideModel`] trait implemented by each disposal-system cell.
//!
//! # Core Concepts
//!
//! - **Isotope maps**: immutable `isotope -> value` maps used for
//!   concentrations, gradients and fluxes
//! - **Material parcels**: isotope masses plus a creation time, moved whole
//!   or split between cell ledgers
//! - **Geometry**: the annular cylinder a component occupies
//! - **Material table**: read-only per-material, per-element coefficients
//! - **Nuclide model**: the boundary-coupling contract every cell honours
//!
//! # Architecture
//!
//! Cells are **separate from the formulas** they use:
//! - The cell owns state (ledger, history, parameters)
//! - The solver module provides the closed-form kinetics and quadrature
//!
//! # Example
//!
//! ```rust
//! use nuclide_rs::physics::{Geometry, IsotopeMap, MaterialParcel};
//!
//! let geometry = Geometry::new(0.0, 1.0, 2.0).unwrap();
//! let parcel = MaterialParcel::new(IsotopeMap::from_pairs([(92235, 5.0)]), 0).unwrap();
//!
//! let concentration = parcel.composition().concentration(geometry.volume());
//! assert!(concentration.get(92235) > 0.0);
//! ```

// module declaration
pub mod geometry;
pub mod isotope;
pub mod parcel;
pub mod properties;
pub mod traits;

/// Discrete simulation time, counted in steps of the outer clock
pub type Timestep = u64;

// re-export commonly used types for convenience
pub use geometry::Geometry;
pub use isotope::{
    ConcentrationMap,
    Element,
    FluxMap,
    GradientMap,
    Iso,
    IsoVector,
    IsotopeMap,
    element_of, };
pub use parcel::MaterialParcel;
pub use properties::{
    ChemProperty,
    InMemoryMaterialTable,
    MaterialRow,
    MaterialTable,
    SharedMaterialTable, };
pub use traits::{
    BoundaryCondition,
    BoundaryKind,
    NuclideModel,
    NuclideModelKind, };
