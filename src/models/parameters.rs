//! Physical parameters shared by every release strategy
//!
//! Values are validated eagerly: a setter that rejects its argument leaves
//! the previous value in place and reports a [`TransportError::Range`].

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};

/// Porous-medium transport parameters of one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportParameters {
    /// Porosity ε in (0, 1]
    porosity: f64,

    /// Bulk density ρ_b \[kg/m³\]
    bulk_density: f64,

    /// Advective pore velocity v \[m/s\]
    advective_velocity: f64,
}

impl TransportParameters {
    /// Validated constructor
    ///
    /// # Example
    ///
    /// ```rust
    /// use nuclide_rs::models::TransportParameters;
    ///
    /// let params = TransportParameters::new(0.3, 1600.0, 1e-9).unwrap();
    /// assert_eq!(params.retardation(), 1.0);
    ///
    /// assert!(TransportParameters::new(0.0, 1600.0, 1e-9).is_err());
    /// ```
    pub fn new(porosity: f64, bulk_density: f64, advective_velocity: f64) -> TransportResult<Self> {
        let mut params = Self {
            porosity: 1.0,
            bulk_density: 1.0,
            advective_velocity: 0.0,
        };
        params.set_porosity(porosity)?;
        params.set_bulk_density(bulk_density)?;
        params.set_advective_velocity(advective_velocity)?;
        Ok(params)
    }

    pub fn porosity(&self) -> f64 {
        self.porosity
    }

    pub fn bulk_density(&self) -> f64 {
        self.bulk_density
    }

    pub fn advective_velocity(&self) -> f64 {
        self.advective_velocity
    }

    /// Retardation factor R, fixed at 1
    pub fn retardation(&self) -> f64 {
        1.0
    }

    pub fn set_porosity(&mut self, porosity: f64) -> TransportResult<()> {
        if !porosity.is_finite() || porosity <= 0.0 || porosity > 1.0 {
            return Err(rejected("porosity", porosity, "must lie in (0, 1]"));
        }
        self.porosity = porosity;
        Ok(())
    }

    pub fn set_bulk_density(&mut self, bulk_density: f64) -> TransportResult<()> {
        if !bulk_density.is_finite() || bulk_density <= 0.0 {
            return Err(rejected("bulk_density", bulk_density, "must be positive"));
        }
        self.bulk_density = bulk_density;
        Ok(())
    }

    pub fn set_advective_velocity(&mut self, advective_velocity: f64) -> TransportResult<()> {
        if !advective_velocity.is_finite() {
            return Err(rejected("advective_velocity", advective_velocity, "must be finite"));
        }
        self.advective_velocity = advective_velocity;
        Ok(())
    }
}

impl Default for TransportParameters {
    fn default() -> Self {
        Self {
            porosity: 1.0,
            bulk_density: 1.0,
            advective_velocity: 0.0,
        }
    }
}

/// Log and build a range error
pub(crate) fn rejected(quantity: &'static str, value: f64, message: &str) -> TransportError {
    error!("rejected {} = {}: {}", quantity, value, message);
    TransportError::range(quantity, value, message)
}
