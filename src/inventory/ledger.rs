//! Inventory ledger: the material a cell currently holds
//!
//! The ledger is the single source of truth for mass. Parcels are appended
//! whole on absorb and drawn down oldest-first on extract, so the ledger
//! total is always `Σ absorbed − Σ extracted` and never negative.

use std::collections::VecDeque;

use log::debug;

use crate::error::{TransportError, TransportResult};
use crate::physics::{ConcentrationMap, IsoVector, IsotopeMap, MaterialParcel};

/// Relative slack allowed when comparing a demand against the available mass
const MASS_TOLERANCE: f64 = 1e-12;

/// Ordered collection of parcels held by one cell
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    parcels: VecDeque<MaterialParcel>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parcel; no merging, no validation
    pub fn absorb(&mut self, parcel: MaterialParcel) {
        debug!("ledger absorbing {:.6e} kg created at t={}", parcel.total_mass(), parcel.created());
        self.parcels.push_back(parcel);
    }

    /// Remove exactly `mass` kg split according to `composition`
    ///
    /// `composition` is normalised internally, so either mass fractions or
    /// absolute masses may be passed. Parcels are consumed oldest-first and
    /// the last one touched is split at the boundary of the request.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Range`] if `mass` is negative or non-finite, or the
    ///   composition is empty while `mass > 0`
    /// - [`TransportError::InsufficientInventory`] if any isotope's demand
    ///   exceeds what the ledger holds; the ledger is left untouched
    ///
    /// # Example
    ///
    /// ```rust
    /// use nuclide_rs::inventory::InventoryLedger;
    /// use nuclide_rs::physics::{IsotopeMap, MaterialParcel};
    ///
    /// let mut ledger = InventoryLedger::new();
    /// ledger.absorb(MaterialParcel::single(92235, 10.0, 0).unwrap());
    ///
    /// let taken = ledger.extract(&IsotopeMap::from_pairs([(92235, 1.0)]), 4.0).unwrap();
    /// assert_eq!(taken.total_mass(), 4.0);
    /// assert_eq!(ledger.total_mass(), 6.0);
    /// ```
    pub fn extract(&mut self, composition: &IsotopeMap, mass: f64) -> TransportResult<MaterialParcel> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(TransportError::range("extracted mass", mass, "must be finite and non-negative"));
        }

        let fractions = IsoVector::new(composition.clone()).fractions();
        if fractions.is_empty() {
            if mass > 0.0 {
                return Err(TransportError::range(
                    "extracted mass",
                    mass,
                    "cannot extract mass with an empty composition",
                ));
            }
            return MaterialParcel::new(IsotopeMap::new(), self.oldest_creation());
        }

        let demand = fractions.scale(mass);
        let available = self.sum();

        // Validate every isotope before touching a single parcel
        for (iso, requested) in demand.iter() {
            let held = available.mass_of(iso);
            if requested > held + MASS_TOLERANCE * held.max(1.0) {
                return Err(TransportError::InsufficientInventory {
                    iso,
                    requested,
                    available: held,
                });
            }
        }

        let created = self.oldest_creation();
        let mut removed = IsotopeMap::new();

        for (iso, requested) in demand.iter() {
            let mut remaining = requested.min(available.mass_of(iso));
            let mut taken_total = 0.0;

            for parcel in self.parcels.iter_mut() {
                if remaining <= 0.0 {
                    break;
                }
                let taken = parcel.take(iso, remaining);
                remaining -= taken;
                taken_total += taken;
            }

            removed = removed.with(iso, taken_total);
        }

        self.parcels.retain(|parcel| !parcel.is_empty());

        debug!("ledger extracted {:.6e} kg, {:.6e} kg remain", removed.total(), self.total_mass());
        MaterialParcel::new(removed, created)
    }

    /// Summed composition of every parcel
    pub fn sum(&self) -> IsoVector {
        IsoVector::new(
            self.parcels
                .iter()
                .fold(IsotopeMap::new(), |acc, parcel| acc.add(parcel.masses())),
        )
    }

    /// Total mass held \[kg\]
    pub fn total_mass(&self) -> f64 {
        self.parcels.iter().map(MaterialParcel::total_mass).sum()
    }

    /// Concentration of the whole inventory dissolved in `pore_volume`
    pub fn concentration(&self, pore_volume: f64) -> ConcentrationMap {
        self.sum().concentration(pore_volume)
    }

    pub fn parcels(&self) -> impl Iterator<Item = &MaterialParcel> {
        self.parcels.iter()
    }

    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    fn oldest_creation(&self) -> u64 {
        self.parcels.front().map(MaterialParcel::created).unwrap_or(0)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn u235(mass: f64, created: u64) -> MaterialParcel {
        MaterialParcel::single(92235, mass, created).unwrap()
    }

    #[test]
    fn test_absorb_appends_without_merging() {
        let mut ledger = InventoryLedger::new();
        ledger.absorb(u235(1.0, 0));
        ledger.absorb(u235(2.0, 1));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.total_mass(), 3.0);
    }

    #[test]
    fn test_extract_oldest_first_with_split() {
        let mut ledger = InventoryLedger::new();
        ledger.absorb(u235(1.0, 0));
        ledger.absorb(u235(2.0, 5));

        let taken = ledger.extract(&IsotopeMap::from_pairs([(92235, 1.0)]), 1.5).unwrap();

        assert_relative_eq!(taken.total_mass(), 1.5);
        assert_eq!(taken.created(), 0);
        // first parcel consumed entirely, second split
        assert_eq!(ledger.len(), 1);
        let rest: Vec<_> = ledger.parcels().collect();
        assert_eq!(rest[0].created(), 5);
        assert_relative_eq!(rest[0].total_mass(), 1.5);
    }

    #[test]
    fn test_extract_proportioned_by_composition() {
        let mut ledger = InventoryLedger::new();
        ledger.absorb(MaterialParcel::new(IsotopeMap::from_pairs([(92235, 4.0), (94239, 4.0)]), 0).unwrap());

        let taken = ledger
            .extract(&IsotopeMap::from_pairs([(92235, 0.25), (94239, 0.75)]), 4.0)
            .unwrap();

        assert_relative_eq!(taken.mass_of(92235), 1.0);
        assert_relative_eq!(taken.mass_of(94239), 3.0);
        assert_relative_eq!(ledger.sum().mass_of(92235), 3.0);
        assert_relative_eq!(ledger.sum().mass_of(94239), 1.0);
    }

    #[test]
    fn test_insufficient_inventory_leaves_ledger_untouched() {
        let mut ledger = InventoryLedger::new();
        ledger.absorb(MaterialParcel::new(IsotopeMap::from_pairs([(92235, 4.0), (94239, 1.0)]), 0).unwrap());

        let result = ledger.extract(&IsotopeMap::from_pairs([(92235, 0.5), (94239, 0.5)]), 4.0);

        assert!(matches!(
            result,
            Err(TransportError::InsufficientInventory { iso: 94239, .. })
        ));
        assert_eq!(ledger.total_mass(), 5.0);
    }

    #[test]
    fn test_extract_everything() {
        let mut ledger = InventoryLedger::new();
        ledger.absorb(u235(10.0, 0));

        let taken = ledger.extract(&IsotopeMap::from_pairs([(92235, 1.0)]), 10.0).unwrap();

        assert_eq!(taken.total_mass(), 10.0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_mass(), 0.0);
    }

    #[test]
    fn test_extract_zero_mass() {
        let mut ledger = InventoryLedger::new();
        let taken = ledger.extract(&IsotopeMap::new(), 0.0).unwrap();
        assert!(taken.is_empty());

        assert!(ledger.extract(&IsotopeMap::new(), 1.0).is_err());
        assert!(ledger.extract(&IsotopeMap::from_pairs([(92235, 1.0)]), -1.0).is_err());
    }

    #[test]
    fn test_concentration() {
        let mut ledger = InventoryLedger::new();
        ledger.absorb(u235(10.0, 0));

        assert_relative_eq!(ledger.concentration(5.0).get(92235), 2.0);
    }
}
