//! Release strategies for disposal-system cells
//!
//! All cells implement the [`NuclideModel`](crate::physics::NuclideModel)
//! trait. The system calls `transport_step` once per timestep: cells are
//! responsible for their own kinetics, the system for moving material
//! between them.
//!
//! # Available Models
//!
//! ## [`OneDimPpm`]: analytic advection-dispersion
//!
//! Treats the cell inventory as a constant source and evaluates the
//! closed-form 1-D solution at the radial midpoint. Use this model for
//! buffers and host rock, where the concentration profile matters.
//!
//! ## [`DegRate`]: fixed fractional release
//!
//! The matrix degrades by a constant fraction per step and the material in
//! the degraded part is offered at the boundary. Use this model for waste
//! forms.
//!
//! ## [`MixedCell`]: instantaneous mixing
//!
//! One well-stirred reservoir; the boundary sees the bulk concentration.
//!
//! # Shared state
//!
//! Every strategy wraps a [`Compartment`] holding the ledger, the history,
//! the geometry and the [`TransportParameters`].

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod cell;
pub mod compartment;
pub mod deg_rate;
pub mod mixed_cell;
pub mod one_dim_ppm;
pub mod parameters;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use cell::NuclideCell;
pub use compartment::Compartment;
pub use deg_rate::DegRate;
pub use mixed_cell::MixedCell;
pub use one_dim_ppm::{DEFAULT_QUADRATURE_POINTS, OneDimPpm};
pub use parameters::TransportParameters;
