//! Instantaneously mixed cell
//!
//! The whole pore volume is one well-stirred reservoir: the concentration is
//! the ledger contents divided by the pore volume, everywhere in the cell and
//! at its boundary.

use log::debug;

use crate::error::TransportResult;
use crate::models::Compartment;
use crate::physics::{ConcentrationMap, IsoVector, NuclideModel, NuclideModelKind, Timestep};

/// Mixed-cell release
#[derive(Debug, Clone)]
pub struct MixedCell {
    compartment: Compartment,
}

impl MixedCell {
    pub fn new(compartment: Compartment) -> Self {
        Self { compartment }
    }
}

impl NuclideModel for MixedCell {
    fn compartment(&self) -> &Compartment {
        &self.compartment
    }

    fn compartment_mut(&mut self) -> &mut Compartment {
        &mut self.compartment
    }

    fn kind(&self) -> NuclideModelKind {
        NuclideModelKind::MixedCell
    }

    fn transport_step(&mut self, time: Timestep) -> TransportResult<()> {
        self.compartment.history().check_time(time)?;

        let concentration = self.compartment.bulk_concentration();
        debug!("[{}] mixed t={} c={}", self.compartment.name(), time, concentration);
        self.compartment.record(time, concentration)
    }

    /// The whole inventory recorded at the last update is at the boundary,
    /// capped by what the ledger still holds
    ///
    /// Material absorbed after the update is not offered until the next
    /// `transport_step`.
    fn source_term(&self) -> (IsoVector, f64) {
        let recorded = self.compartment.history().latest_inventory();
        let held = self.compartment.ledger().sum();
        let offered = IsoVector::new(recorded.masses().min(held.masses()).positive_part());
        let mass = offered.total_mass();
        (offered, mass)
    }

    /// Flat profile: the bulk concentration
    fn interior_concentration(&self) -> ConcentrationMap {
        self.compartment.bulk_concentration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::models::TransportParameters;
    use crate::physics::{ChemProperty, Geometry, InMemoryMaterialTable, IsotopeMap, MaterialParcel};

    fn cell() -> MixedCell {
        let table = InMemoryMaterialTable::new()
            .with("glass", 92, ChemProperty::Dispersion, 1e-3)
            .into_shared();
        // pore volume = π * 4 * 1 * 0.25 = π
        MixedCell::new(Compartment::new(
            "waste form",
            "glass",
            Geometry::new(0.0, 2.0, 1.0).unwrap(),
            TransportParameters::new(0.25, 2500.0, 0.01).unwrap(),
            table,
            0,
        ))
    }

    #[test]
    fn test_bulk_concentration_at_boundary() {
        let mut cell = cell();
        cell.absorb(MaterialParcel::single(92235, 2.0 * std::f64::consts::PI, 0).unwrap());
        cell.transport_step(1).unwrap();

        assert_relative_eq!(cell.dirichlet_of(92235), 2.0, max_relative = 1e-12);
        assert_eq!(cell.source_term().1, 2.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_flat_profile_gradient_and_flux() {
        let mut cell = cell();
        cell.absorb(MaterialParcel::single(92235, 2.0 * std::f64::consts::PI, 0).unwrap());
        cell.transport_step(1).unwrap();

        // midpoint at r = 1, neighbour at r = 2 holding nothing
        let gradient = cell.neumann(&IsotopeMap::new(), 2.0).unwrap();
        assert_relative_eq!(gradient.get(92235), -2.0, max_relative = 1e-12);

        let flux = cell.cauchy(&IsotopeMap::new(), 2.0).unwrap();
        assert_relative_eq!(flux.get(92235), 1e-3 * 2.0 + 0.01 * 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_offer_follows_last_update() {
        let mut cell = cell();
        cell.absorb(MaterialParcel::single(92235, 3.0, 0).unwrap());
        cell.transport_step(1).unwrap();

        // absorbed after the update: not offered yet
        cell.absorb(MaterialParcel::single(92235, 2.0, 1).unwrap());
        assert_eq!(cell.source_term().1, 3.0);

        // partly drained: offer shrinks to what is held of the recorded isotopes
        cell.extract(&IsotopeMap::from_pairs([(92235, 1.0)]), 4.0).unwrap();
        assert_eq!(cell.source_term().1, 1.0);

        cell.transport_step(2).unwrap();
        assert_eq!(cell.source_term().1, 1.0);
    }

    #[test]
    fn test_empty_cell() {
        let mut cell = cell();
        cell.transport_step(3).unwrap();

        assert!(cell.dirichlet().is_empty());
        assert_eq!(cell.source_term().1, 0.0);
        assert_eq!(cell.last_updated(), 3);
    }
}
