//! Per-material transport coefficients
//!
//! Dispersion, distribution and solubility coefficients depend on the
//! material a component is made of and on the element being transported.
//! Cells never hold these numbers themselves: they ask a [`MaterialTable`]
//! at the moment a formula needs one, so new materials or isotopes need no
//! change to the kinetics.
//!
//! The table is read-only after construction and is shared between every
//! cell through an `Arc`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};
use crate::physics::{Element, Iso, element_of};

/// Chemical property stored per (material, element)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChemProperty {
    /// Dispersion coefficient D \[m²/s\]
    Dispersion,
    /// Distribution coefficient K_d \[kg/kg\]
    Distribution,
    /// Solubility limit \[kg/m³\]
    Solubility,
}

impl fmt::Display for ChemProperty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChemProperty::Dispersion => write!(f, "dispersion"),
            ChemProperty::Distribution => write!(f, "distribution"),
            ChemProperty::Solubility => write!(f, "solubility"),
        }
    }
}

/// Read-only property lookup
pub trait MaterialTable: Send + Sync + fmt::Debug {
    /// Value of `property` for `element` in `material`
    ///
    /// # Errors
    ///
    /// [`TransportError::Lookup`] when the row is absent.
    fn lookup(&self, material: &str, element: Element, property: ChemProperty) -> TransportResult<f64>;

    /// Dispersion coefficient for the element of `iso`
    fn dispersion(&self, material: &str, iso: Iso) -> TransportResult<f64> {
        self.lookup(material, element_of(iso), ChemProperty::Dispersion)
    }
}

/// Shared handle used by cells
pub type SharedMaterialTable = Arc<dyn MaterialTable>;

/// One row of property data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub material: String,
    pub element: Element,
    pub property: ChemProperty,
    pub value: f64,
}

/// Hash-map backed [`MaterialTable`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaterialTable {
    rows: HashMap<(String, Element, ChemProperty), f64>,
}

impl InMemoryMaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add a row
    pub fn with(mut self, material: &str, element: Element, property: ChemProperty, value: f64) -> Self {
        self.insert(material, element, property, value);
        self
    }

    /// Add or replace a row
    pub fn insert(&mut self, material: &str, element: Element, property: ChemProperty, value: f64) {
        self.rows.insert((material.to_string(), element, property), value);
    }

    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a MaterialRow>,
    {
        let mut table = Self::new();
        for row in rows {
            table.insert(&row.material, row.element, row.property, row.value);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_shared(self) -> SharedMaterialTable {
        Arc::new(self)
    }
}

impl MaterialTable for InMemoryMaterialTable {
    fn lookup(&self, material: &str, element: Element, property: ChemProperty) -> TransportResult<f64> {
        self.rows
            .get(&(material.to_string(), element, property))
            .copied()
            .ok_or_else(|| TransportError::Lookup {
                material: material.to_string(),
                element,
                property: property.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let table = InMemoryMaterialTable::new()
            .with("clay", 92, ChemProperty::Dispersion, 1e-9)
            .with("clay", 92, ChemProperty::Solubility, 3e-4);

        assert_eq!(table.lookup("clay", 92, ChemProperty::Dispersion).unwrap(), 1e-9);
        assert_eq!(table.dispersion("clay", 92235).unwrap(), 1e-9);
        assert_eq!(table.len(), 2);

        let miss = table.lookup("granite", 92, ChemProperty::Dispersion);
        assert!(matches!(miss, Err(TransportError::Lookup { element: 92, .. })));
        assert!(table.lookup("clay", 94, ChemProperty::Dispersion).is_err());
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![MaterialRow {
            material: "clay".into(),
            element: 55,
            property: ChemProperty::Distribution,
            value: 0.5,
        }];
        let table = InMemoryMaterialTable::from_rows(&rows);

        assert_eq!(table.lookup("clay", 55, ChemProperty::Distribution).unwrap(), 0.5);
    }
}
