//! Isotope-keyed value maps
//!
//! Concentrations, gradients, fluxes and compositions are all maps from an
//! isotope identifier to a scalar. [`IsotopeMap`] is an immutable value type:
//! every transform (`scale`, `add`, `subtract`, ...) returns a new map, which
//! keeps the arithmetic free of the stateful history it feeds.
//!
//! Isotopes are identified by their `ZZZAAA` number (`92235` is U-235). The
//! element, which selects per-material transport coefficients, is
//! `iso / 1000`.
//!
//! # Example
//!
//! ```rust
//! use nuclide_rs::physics::IsotopeMap;
//!
//! let a = IsotopeMap::from_pairs([(92235, 1.0), (94239, 2.0)]);
//! let b = IsotopeMap::from_pairs([(92235, 0.5)]);
//!
//! let sum = &a + &b;
//! assert_eq!(sum.get(92235), 1.5);
//! assert_eq!(sum.get(94239), 2.0);
//! assert_eq!(a.get(92235), 1.0); // untouched
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Isotope identifier in `ZZZAAA` form
pub type Iso = u32;

/// Element (isotope family) identifier, the `ZZZ` part of an [`Iso`]
pub type Element = u32;

/// Element of an isotope
#[inline]
pub fn element_of(iso: Iso) -> Element {
    iso / 1000
}

// =================================================================================================
// Isotope Map
// =================================================================================================

/// Immutable isotope-to-value mapping
///
/// Missing isotopes read as zero. Iteration order is ascending isotope id,
/// so every derived quantity is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsotopeMap {
    values: BTreeMap<Iso, f64>,
}

/// Concentration per isotope \[kg/m³\]
pub type ConcentrationMap = IsotopeMap;

/// Concentration gradient per isotope \[kg/m⁴\]
pub type GradientMap = IsotopeMap;

/// Solute flux per isotope \[kg/m²/s\]
pub type FluxMap = IsotopeMap;

impl IsotopeMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(isotope, value)` pairs; later duplicates overwrite earlier ones
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Iso, f64)>,
    {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// Copy of this map with one entry set
    pub fn with(mut self, iso: Iso, value: f64) -> Self {
        self.values.insert(iso, value);
        self
    }

    /// Value for an isotope, zero when absent
    pub fn get(&self, iso: Iso) -> f64 {
        self.values.get(&iso).copied().unwrap_or(0.0)
    }

    /// Whether the isotope has an entry (even a zero one)
    pub fn contains(&self, iso: Iso) -> bool {
        self.values.contains_key(&iso)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Isotopes in ascending order
    pub fn isotopes(&self) -> impl Iterator<Item = Iso> + '_ {
        self.values.keys().copied()
    }

    /// `(isotope, value)` pairs in ascending isotope order
    pub fn iter(&self) -> impl Iterator<Item = (Iso, f64)> + '_ {
        self.values.iter().map(|(iso, value)| (*iso, *value))
    }

    /// Union of the isotopes of two maps
    pub fn union_isotopes(&self, other: &IsotopeMap) -> BTreeSet<Iso> {
        self.values.keys().chain(other.values.keys()).copied().collect()
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// Every value multiplied by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        self.map_values(|value| value * factor)
    }

    /// Element-wise sum over the union of isotopes
    pub fn add(&self, other: &IsotopeMap) -> Self {
        self.combine(other, |a, b| a + b)
    }

    /// Element-wise difference over the union of isotopes (may go negative)
    pub fn subtract(&self, other: &IsotopeMap) -> Self {
        self.combine(other, |a, b| a - b)
    }

    /// Element-wise minimum over the union of isotopes
    pub fn min(&self, other: &IsotopeMap) -> Self {
        self.combine(other, f64::min)
    }

    /// Only the strictly positive entries
    pub fn positive_part(&self) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|(_, value)| **value > 0.0)
                .map(|(iso, value)| (*iso, *value))
                .collect(),
        }
    }

    /// Same isotopes, negative values raised to zero
    pub fn clamp_non_negative(&self) -> Self {
        self.map_values(|value| value.max(0.0))
    }

    /// Whether every value is finite and `>= 0`
    pub fn is_non_negative(&self) -> bool {
        self.values.values().all(|value| value.is_finite() && *value >= 0.0)
    }

    /// Whether every value is finite
    pub fn is_finite(&self) -> bool {
        self.values.values().all(|value| value.is_finite())
    }

    /// Apply `f` to every value, keeping the isotopes
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            values: self.values.iter().map(|(iso, value)| (*iso, f(*value))).collect(),
        }
    }

    fn combine<F>(&self, other: &IsotopeMap, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        Self {
            values: self
                .union_isotopes(other)
                .into_iter()
                .map(|iso| (iso, f(self.get(iso), other.get(iso))))
                .collect(),
        }
    }
}

impl FromIterator<(Iso, f64)> for IsotopeMap {
    fn from_iter<I: IntoIterator<Item = (Iso, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl fmt::Display for IsotopeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (iso, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:e}", iso, value)?;
        }
        write!(f, "}}")
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for &IsotopeMap {
    type Output = IsotopeMap;

    fn add(self, rhs: Self) -> Self::Output {
        IsotopeMap::add(self, rhs)
    }
}

impl std::ops::Sub for &IsotopeMap {
    type Output = IsotopeMap;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl std::ops::Mul<f64> for &IsotopeMap {
    type Output = IsotopeMap;

    fn mul(self, scalar: f64) -> Self::Output {
        self.scale(scalar)
    }
}

// =================================================================================================
// Isotope Vector
// =================================================================================================

/// Mass composition of a quantity of material
///
/// Holds the mass of every isotope \[kg\]; the total mass is the sum.
/// [`fractions`](IsoVector::fractions) gives the normalised composition used
/// when extracting material from a ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoVector {
    masses: IsotopeMap,
}

impl IsoVector {
    pub fn new(masses: IsotopeMap) -> Self {
        Self { masses }
    }

    /// Mass held in a volume at the given concentrations
    pub fn from_concentration(concentration: &ConcentrationMap, volume: f64) -> Self {
        Self::new(concentration.scale(volume))
    }

    pub fn masses(&self) -> &IsotopeMap {
        &self.masses
    }

    /// Mass of one isotope \[kg\]
    pub fn mass_of(&self, iso: Iso) -> f64 {
        self.masses.get(iso)
    }

    /// Total mass \[kg\]
    pub fn total_mass(&self) -> f64 {
        self.masses.total()
    }

    /// Concentration of this material dissolved in `volume`
    pub fn concentration(&self, volume: f64) -> ConcentrationMap {
        if volume > 0.0 {
            self.masses.scale(1.0 / volume)
        } else {
            self.masses.map_values(|_| 0.0)
        }
    }

    /// Mass fractions, empty when there is no mass
    pub fn fractions(&self) -> IsotopeMap {
        let total = self.total_mass();
        if total > 0.0 {
            self.masses.positive_part().scale(1.0 / total)
        } else {
            IsotopeMap::new()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_mass() <= 0.0
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_element_of() {
        assert_eq!(element_of(92235), 92);
        assert_eq!(element_of(94239), 94);
        assert_eq!(element_of(1003), 1);
    }

    #[test]
    fn test_missing_isotope_reads_zero() {
        let map = IsotopeMap::from_pairs([(92235, 1.0)]);
        assert_eq!(map.get(92238), 0.0);
        assert!(!map.contains(92238));
    }

    #[test]
    fn test_transforms_do_not_mutate() {
        let a = IsotopeMap::from_pairs([(92235, 2.0), (94239, 4.0)]);
        let scaled = a.scale(0.5);

        assert_eq!(scaled.get(92235), 1.0);
        assert_eq!(scaled.get(94239), 2.0);
        assert_eq!(a.get(92235), 2.0);
    }

    #[test]
    fn test_subtract_over_union() {
        let a = IsotopeMap::from_pairs([(92235, 2.0)]);
        let b = IsotopeMap::from_pairs([(92235, 0.5), (55137, 1.0)]);
        let diff = &a - &b;

        assert_eq!(diff.get(92235), 1.5);
        assert_eq!(diff.get(55137), -1.0);
        assert_eq!(diff.positive_part().len(), 1);
        assert_eq!(diff.clamp_non_negative().get(55137), 0.0);
    }

    #[test]
    fn test_min() {
        let a = IsotopeMap::from_pairs([(92235, 2.0), (94239, 1.0)]);
        let b = IsotopeMap::from_pairs([(92235, 0.5), (94239, 3.0)]);
        let low = a.min(&b);

        assert_eq!(low.get(92235), 0.5);
        assert_eq!(low.get(94239), 1.0);
    }

    #[test]
    fn test_isovector_fractions() {
        let vector = IsoVector::new(IsotopeMap::from_pairs([(92235, 1.0), (94239, 3.0)]));

        assert_eq!(vector.total_mass(), 4.0);
        let fractions = vector.fractions();
        assert_relative_eq!(fractions.get(92235), 0.25);
        assert_relative_eq!(fractions.get(94239), 0.75);
        assert_relative_eq!(fractions.total(), 1.0);
    }

    #[test]
    fn test_isovector_concentration_roundtrip() {
        let conc = IsotopeMap::from_pairs([(92235, 0.2)]);
        let vector = IsoVector::from_concentration(&conc, 10.0);

        assert_relative_eq!(vector.mass_of(92235), 2.0);
        assert_relative_eq!(vector.concentration(10.0).get(92235), 0.2);
        assert_eq!(vector.concentration(0.0).get(92235), 0.0);
    }

    #[test]
    fn test_empty_isovector_has_no_fractions() {
        assert!(IsoVector::default().fractions().is_empty());
        assert!(IsoVector::default().is_empty());
    }
}
