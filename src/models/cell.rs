//! Closed set of cell strategies

use crate::error::TransportResult;
use crate::models::{Compartment, DegRate, MixedCell, OneDimPpm};
use crate::physics::{
    ConcentrationMap, IsoVector, IsotopeMap, MaterialParcel, NuclideModel, NuclideModelKind, Timestep,
};

/// Any disposal-system cell
///
/// Dispatches every [`NuclideModel`] call to the wrapped strategy, so a
/// system can hold cells of different kinds in one arena.
#[derive(Debug, Clone)]
pub enum NuclideCell {
    OneDimPpm(OneDimPpm),
    DegRate(DegRate),
    MixedCell(MixedCell),
}

impl NuclideCell {
    fn model(&self) -> &dyn NuclideModel {
        match self {
            NuclideCell::OneDimPpm(cell) => cell,
            NuclideCell::DegRate(cell) => cell,
            NuclideCell::MixedCell(cell) => cell,
        }
    }

    fn model_mut(&mut self) -> &mut dyn NuclideModel {
        match self {
            NuclideCell::OneDimPpm(cell) => cell,
            NuclideCell::DegRate(cell) => cell,
            NuclideCell::MixedCell(cell) => cell,
        }
    }
}

impl NuclideModel for NuclideCell {
    fn compartment(&self) -> &Compartment {
        self.model().compartment()
    }

    fn compartment_mut(&mut self) -> &mut Compartment {
        self.model_mut().compartment_mut()
    }

    fn kind(&self) -> NuclideModelKind {
        self.model().kind()
    }

    fn transport_step(&mut self, time: Timestep) -> TransportResult<()> {
        self.model_mut().transport_step(time)
    }

    fn absorb(&mut self, parcel: MaterialParcel) {
        self.model_mut().absorb(parcel)
    }

    fn extract(&mut self, composition: &IsotopeMap, mass: f64) -> TransportResult<MaterialParcel> {
        self.model_mut().extract(composition, mass)
    }

    fn source_term(&self) -> (IsoVector, f64) {
        self.model().source_term()
    }

    fn interior_concentration(&self) -> ConcentrationMap {
        self.model().interior_concentration()
    }

    fn uptake_demand(&self, daughter: &dyn NuclideModel) -> TransportResult<IsotopeMap> {
        self.model().uptake_demand(daughter)
    }
}

impl From<OneDimPpm> for NuclideCell {
    fn from(cell: OneDimPpm) -> Self {
        NuclideCell::OneDimPpm(cell)
    }
}

impl From<DegRate> for NuclideCell {
    fn from(cell: DegRate) -> Self {
        NuclideCell::DegRate(cell)
    }
}

impl From<MixedCell> for NuclideCell {
    fn from(cell: MixedCell) -> Self {
        NuclideCell::MixedCell(cell)
    }
}
