//! Material parcels
//!
//! A parcel is a quantity of contaminated material: a mass per isotope plus
//! the timestep at which it was created. Parcels move between cells whole
//! (absorb) or split (extract); a parcel is owned by exactly one ledger at a
//! time.

use crate::error::{TransportError, TransportResult};
use crate::physics::{IsoVector, Iso, IsotopeMap, Timestep};

/// Isotope masses \[kg\] created at a given timestep
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialParcel {
    masses: IsotopeMap,
    created: Timestep,
}

impl MaterialParcel {
    /// Create a parcel, rejecting negative or non-finite masses
    ///
    /// # Example
    ///
    /// ```rust
    /// use nuclide_rs::physics::{IsotopeMap, MaterialParcel};
    ///
    /// let parcel = MaterialParcel::new(IsotopeMap::from_pairs([(92235, 10.0)]), 0).unwrap();
    /// assert_eq!(parcel.total_mass(), 10.0);
    ///
    /// assert!(MaterialParcel::new(IsotopeMap::from_pairs([(92235, -1.0)]), 0).is_err());
    /// ```
    pub fn new(masses: IsotopeMap, created: Timestep) -> TransportResult<Self> {
        if let Some((iso, mass)) = masses.iter().find(|(_, mass)| !mass.is_finite() || *mass < 0.0) {
            return Err(TransportError::range(
                "parcel mass",
                mass,
                format!("mass of isotope {} must be finite and non-negative", iso),
            ));
        }

        Ok(Self { masses, created })
    }

    /// Parcel of a single isotope
    pub fn single(iso: Iso, mass: f64, created: Timestep) -> TransportResult<Self> {
        Self::new(IsotopeMap::from_pairs([(iso, mass)]), created)
    }

    pub fn masses(&self) -> &IsotopeMap {
        &self.masses
    }

    pub fn mass_of(&self, iso: Iso) -> f64 {
        self.masses.get(iso)
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.total()
    }

    pub fn created(&self) -> Timestep {
        self.created
    }

    /// Composition of this parcel
    pub fn composition(&self) -> IsoVector {
        IsoVector::new(self.masses.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.total_mass() <= 0.0
    }

    /// Remove up to `mass` kg of one isotope, returning what was taken
    pub(crate) fn take(&mut self, iso: Iso, mass: f64) -> f64 {
        let held = self.masses.get(iso);
        let taken = held.min(mass).max(0.0);
        let remaining = held - taken;

        self.masses = if remaining > 0.0 {
            self.masses.clone().with(iso, remaining)
        } else {
            self.masses.iter().filter(|(i, _)| *i != iso).collect()
        };

        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite_mass() {
        let result = MaterialParcel::single(92235, f64::NAN, 0);
        assert!(matches!(result, Err(TransportError::Range { .. })));
    }

    #[test]
    fn test_take_splits_parcel() {
        let mut parcel = MaterialParcel::new(IsotopeMap::from_pairs([(92235, 4.0), (94239, 1.0)]), 3).unwrap();

        assert_eq!(parcel.take(92235, 1.5), 1.5);
        assert_eq!(parcel.mass_of(92235), 2.5);

        // asking for more than held only yields what is there
        assert_eq!(parcel.take(94239, 5.0), 1.0);
        assert!(!parcel.masses().contains(94239));
        assert_eq!(parcel.total_mass(), 2.5);
        assert_eq!(parcel.created(), 3);
    }
}
