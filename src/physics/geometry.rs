//! Annular cylinder geometry of a disposal-system component

use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};

/// Hollow cylinder between `inner_radius` and `outer_radius` \[m\], `length` \[m\] long
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    inner_radius: f64,
    outer_radius: f64,
    length: f64,
}

impl Geometry {
    /// Validated constructor
    ///
    /// Radii must be finite with `0 <= inner_radius <= outer_radius`, and the
    /// length finite and non-negative.
    pub fn new(inner_radius: f64, outer_radius: f64, length: f64) -> TransportResult<Self> {
        if !inner_radius.is_finite() || inner_radius < 0.0 {
            return Err(TransportError::range("inner radius", inner_radius, "must be finite and >= 0"));
        }
        if !outer_radius.is_finite() || outer_radius < inner_radius {
            return Err(TransportError::range("outer radius", outer_radius, "must be finite and >= inner radius"));
        }
        if !length.is_finite() || length < 0.0 {
            return Err(TransportError::range("length", length, "must be finite and >= 0"));
        }

        Ok(Self { inner_radius, outer_radius, length })
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Radial thickness of the annulus
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Radius halfway between the inner and outer surfaces
    pub fn radial_midpoint(&self) -> f64 {
        0.5 * (self.inner_radius + self.outer_radius)
    }

    /// Distance from the inner surface to `radius`, clamped at zero
    pub fn depth_of(&self, radius: f64) -> f64 {
        (radius - self.inner_radius).max(0.0)
    }

    /// Total volume π(r_o² - r_i²)L \[m³\]
    pub fn volume(&self) -> f64 {
        std::f64::consts::PI
            * (self.outer_radius * self.outer_radius - self.inner_radius * self.inner_radius)
            * self.length
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self { inner_radius: 0.0, outer_radius: 0.0, length: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_volume_and_midpoint() {
        let geometry = Geometry::new(4.0, 5.0, 5.0).unwrap();

        assert_relative_eq!(geometry.volume(), std::f64::consts::PI * 9.0 * 5.0);
        assert_eq!(geometry.radial_midpoint(), 4.5);
        assert_eq!(geometry.thickness(), 1.0);
        assert_eq!(geometry.depth_of(4.5), 0.5);
        assert_eq!(geometry.depth_of(3.0), 0.0);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(Geometry::new(-1.0, 5.0, 1.0).is_err());
        assert!(Geometry::new(5.0, 4.0, 1.0).is_err());
        assert!(Geometry::new(1.0, 2.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Geometry::default().volume(), 0.0);
        assert_eq!(Geometry::default().length(), 0.0);
    }
}
