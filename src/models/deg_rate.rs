//! Fixed-rate degradation release
//!
//! The waste matrix degrades by a constant fraction of its original extent
//! every step. Whatever the cell holds in the degraded part of the matrix is
//! released and offered at the boundary:
//!
//! ```text
//! degraded(t) = min(1, deg_rate (t - t_created))
//! released(t) = contained(t) degraded(t)
//! ```
//!
//! With 10 kg and `deg_rate = 0.5` the offers are 5 kg, then (once those
//! have been taken) 5 kg, then nothing.

use log::debug;

use crate::error::TransportResult;
use crate::models::Compartment;
use crate::models::parameters::rejected;
use crate::physics::{IsoVector, IsotopeMap, MaterialParcel, NuclideModel, NuclideModelKind, Timestep};

/// Rate-release cell
#[derive(Debug, Clone)]
pub struct DegRate {
    compartment: Compartment,

    /// Fraction of the matrix degraded per step, in [0, 1]
    deg_rate: f64,
    /// Degraded fraction at the last update
    degraded: f64,
    /// Material released at the last update
    released: IsoVector,
}

impl DegRate {
    /// Create a cell degrading at `deg_rate` per step
    ///
    /// # Errors
    ///
    /// `Range` when `deg_rate` lies outside `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nuclide_rs::models::{Compartment, DegRate, TransportParameters};
    /// use nuclide_rs::physics::{Geometry, InMemoryMaterialTable, MaterialParcel, NuclideModel};
    ///
    /// let compartment = Compartment::new(
    ///     "waste form",
    ///     "glass",
    ///     Geometry::new(0.0, 0.5, 1.0).unwrap(),
    ///     TransportParameters::new(0.1, 2500.0, 0.0).unwrap(),
    ///     InMemoryMaterialTable::new().into_shared(),
    ///     0,
    /// );
    /// let mut cell = DegRate::new(compartment, 0.5).unwrap();
    /// cell.absorb(MaterialParcel::single(92235, 10.0, 0).unwrap());
    ///
    /// cell.transport_step(1).unwrap();
    /// assert_eq!(cell.source_term().1, 5.0);
    /// ```
    pub fn new(compartment: Compartment, deg_rate: f64) -> TransportResult<Self> {
        let mut cell = Self {
            compartment,
            deg_rate: 0.0,
            degraded: 0.0,
            released: IsoVector::default(),
        };
        cell.set_deg_rate(deg_rate)?;
        Ok(cell)
    }

    pub fn deg_rate(&self) -> f64 {
        self.deg_rate
    }

    pub fn set_deg_rate(&mut self, deg_rate: f64) -> TransportResult<()> {
        if !(0.0..=1.0).contains(&deg_rate) {
            return Err(rejected("deg_rate", deg_rate, "must lie in [0, 1]"));
        }
        self.deg_rate = deg_rate;
        Ok(())
    }

    /// Degraded fraction of the matrix at the last update
    pub fn degraded_fraction(&self) -> f64 {
        self.degraded
    }
}

impl NuclideModel for DegRate {
    fn compartment(&self) -> &Compartment {
        &self.compartment
    }

    fn compartment_mut(&mut self) -> &mut Compartment {
        &mut self.compartment
    }

    fn kind(&self) -> NuclideModelKind {
        NuclideModelKind::DegRate
    }

    fn transport_step(&mut self, time: Timestep) -> TransportResult<()> {
        let history = self.compartment.history();
        history.check_time(time)?;

        // a repeated step keeps what is left of the release already made
        let (degraded, released) = if history.at(time).is_some() {
            (self.degraded, self.released.clone())
        } else {
            let steps = time.saturating_sub(self.compartment.created()) as f64;
            let degraded = (self.deg_rate * steps).min(1.0);
            let released = IsoVector::new(self.compartment.ledger().sum().masses().scale(degraded));
            (degraded, released)
        };
        let concentration = released.concentration(self.compartment.pore_volume());

        self.compartment.record(time, concentration)?;
        debug!(
            "[{}] degraded {:.3} of matrix at t={}, {:.6e} kg released",
            self.compartment.name(),
            degraded,
            time,
            released.total_mass()
        );

        self.degraded = degraded;
        self.released = released;
        Ok(())
    }

    /// Taken material no longer counts as released
    fn extract(&mut self, composition: &IsotopeMap, mass: f64) -> TransportResult<MaterialParcel> {
        let parcel = self.compartment.extract(composition, mass)?;
        self.released = IsoVector::new(self.released.masses().subtract(parcel.masses()).positive_part());
        Ok(parcel)
    }

    /// Exactly the released material, not the rounded concentration times
    /// pore volume
    fn source_term(&self) -> (IsoVector, f64) {
        let mass = self.released.total_mass();
        (self.released.clone(), mass)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
