//! Cell capability trait and boundary-condition types
//!
//! This module defines the contract every disposal-system cell honours:
//! - `NuclideModel`: absorb/extract material, advance in time, expose
//!   boundary values to neighbours
//! - `BoundaryCondition`: the three physically distinct boundary values
//! - `NuclideModelKind`: the closed set of release strategies

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TransportResult;
use crate::models::Compartment;
use crate::physics::{
    ConcentrationMap, FluxMap, GradientMap, Iso, IsoVector, IsotopeMap, MaterialParcel, Timestep,
};

// =================================================================================================
// Model kinds
// =================================================================================================

/// Release strategy of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NuclideModelKind {
    /// Closed-form 1-D advection-dispersion
    OneDimPpm,

    /// Fixed fractional degradation per step
    DegRate,

    /// Instantaneous full mixing
    MixedCell,
}

impl NuclideModelKind {
    /// Display name of the strategy
    pub fn name(&self) -> &'static str {
        match self {
            NuclideModelKind::OneDimPpm => "OneDimPPM",
            NuclideModelKind::DegRate => "DegRate",
            NuclideModelKind::MixedCell => "MixedCell",
        }
    }
}

impl fmt::Display for NuclideModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =================================================================================================
// Boundary conditions
// =================================================================================================

/// Which boundary value a neighbour asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Prescribed concentration
    Dirichlet,

    /// Prescribed gradient
    Neumann,

    /// Prescribed flux
    Cauchy,
}

/// Isotope-keyed boundary value
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryCondition {
    /// Concentration at the boundary \[kg/m³\]
    Dirichlet(ConcentrationMap),

    /// Concentration gradient across the boundary \[kg/m⁴\]
    Neumann(GradientMap),

    /// Solute flux through the boundary \[kg/m²/s\]
    Cauchy(FluxMap),
}

impl BoundaryCondition {
    pub fn kind(&self) -> BoundaryKind {
        match self {
            BoundaryCondition::Dirichlet(_) => BoundaryKind::Dirichlet,
            BoundaryCondition::Neumann(_) => BoundaryKind::Neumann,
            BoundaryCondition::Cauchy(_) => BoundaryKind::Cauchy,
        }
    }

    /// Underlying isotope map, whatever the kind
    pub fn values(&self) -> &IsotopeMap {
        match self {
            BoundaryCondition::Dirichlet(values)
            | BoundaryCondition::Neumann(values)
            | BoundaryCondition::Cauchy(values) => values,
        }
    }
}

// ==================================================================================================
// Nuclide Model Trait
// =================================================================================================

/// Trait for disposal-system cells
///
/// # Responsibility
/// Holds material, advances its concentration history in time and answers
/// boundary queries from neighbouring cells. Does NOT move material between
/// cells (that's the system's job).
///
/// Each strategy supplies [`kind`](NuclideModel::kind) and
/// [`transport_step`](NuclideModel::transport_step); everything else is the
/// shared boundary-coupling protocol, provided on top of the cell's
/// [`Compartment`]. Strategies override a provided method only when their
/// kinetics need it.
pub trait NuclideModel: Send + Sync {
    /// Shared state: ledger, history, geometry, parameters
    fn compartment(&self) -> &Compartment;

    /// Mutable access to the shared state
    fn compartment_mut(&mut self) -> &mut Compartment;

    /// Release strategy
    fn kind(&self) -> NuclideModelKind;

    /// Advance the concentration history to `time`
    ///
    /// # Errors
    ///
    /// - `Precondition` when `time` is earlier than the last update
    /// - `NumericDomain` / `Lookup` from the underlying formula
    fn transport_step(&mut self, time: Timestep) -> TransportResult<()>;

    /// Instance name of the cell (used to display and logging)
    fn name(&self) -> &str {
        self.compartment().name()
    }

    /// Take ownership of a parcel
    fn absorb(&mut self, parcel: MaterialParcel) {
        self.compartment_mut().absorb(parcel);
    }

    /// Remove `mass` kg proportioned by `composition`
    fn extract(&mut self, composition: &IsotopeMap, mass: f64) -> TransportResult<MaterialParcel> {
        self.compartment_mut().extract(composition, mass)
    }

    /// Material offered at the boundary as `(composition, total mass)`
    fn source_term(&self) -> (IsoVector, f64) {
        self.compartment().source_term()
    }

    /// Concentration snapshot at the last update
    fn dirichlet(&self) -> ConcentrationMap {
        self.compartment().dirichlet()
    }

    /// Boundary concentration of one isotope, zero when absent
    fn dirichlet_of(&self, iso: Iso) -> f64 {
        self.dirichlet().get(iso)
    }

    /// Gradient towards an external concentration `c_ext` at radius `r_ext`
    fn neumann(&self, c_ext: &ConcentrationMap, r_ext: f64) -> TransportResult<GradientMap> {
        self.compartment().neumann(&self.interior_concentration(), c_ext, r_ext)
    }

    /// Flux `-D grad + v c` towards an external concentration
    fn cauchy(&self, c_ext: &ConcentrationMap, r_ext: f64) -> TransportResult<FluxMap> {
        let gradient = self.neumann(c_ext, r_ext)?;
        self.compartment().cauchy(&gradient, &self.dirichlet())
    }

    /// Boundary value selected by kind
    fn boundary(&self, kind: BoundaryKind, c_ext: &ConcentrationMap, r_ext: f64) -> TransportResult<BoundaryCondition> {
        Ok(match kind {
            BoundaryKind::Dirichlet => BoundaryCondition::Dirichlet(self.dirichlet()),
            BoundaryKind::Neumann => BoundaryCondition::Neumann(self.neumann(c_ext, r_ext)?),
            BoundaryKind::Cauchy => BoundaryCondition::Cauchy(self.cauchy(c_ext, r_ext)?),
        })
    }

    /// Concentration inside the cell at its radial midpoint
    fn interior_concentration(&self) -> ConcentrationMap {
        self.dirichlet()
    }

    /// Mass per isotope this cell would take up from `daughter` in one
    /// coupling pass, before any cap
    ///
    /// Defaults to everything the daughter offers.
    fn uptake_demand(&self, daughter: &dyn NuclideModel) -> TransportResult<IsotopeMap> {
        Ok(daughter.source_term().0.masses().clone())
    }

    /// Timestep of the latest history entry
    fn last_updated(&self) -> Timestep {
        self.compartment().history().last_updated()
    }

    /// Mass currently held in the ledger \[kg\]
    fn contained_mass(&self) -> f64 {
        self.compartment().ledger().total_mass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_condition_kind() {
        let values = IsotopeMap::from_pairs([(92235, 1.0)]);

        let dirichlet = BoundaryCondition::Dirichlet(values.clone());
        let cauchy = BoundaryCondition::Cauchy(values.clone());

        assert_eq!(dirichlet.kind(), BoundaryKind::Dirichlet);
        assert_eq!(cauchy.kind(), BoundaryKind::Cauchy);
        assert_eq!(cauchy.values(), &values);
    }

    #[test]
    fn test_model_kind_names() {
        assert_eq!(NuclideModelKind::OneDimPpm.to_string(), "OneDimPPM");
        assert_eq!(NuclideModelKind::DegRate.name(), "DegRate");
        assert_eq!(NuclideModelKind::MixedCell.name(), "MixedCell");
    }
}
