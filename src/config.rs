//! TOML description of a disposal system
//!
//! A configuration lists material property rows and cells; `build` turns it
//! into a linked [`DisposalSystem`].
//!
//! ```toml
//! [[materials]]
//! material = "clay"
//! element = 92
//! property = "dispersion"
//! value = 1e-9
//!
//! [[cells]]
//! name = "waste"
//! kind = "deg_rate"
//! material = "glass"
//! inner_radius = 0.0
//! outer_radius = 0.5
//! length = 1.0
//! porosity = 0.1
//! bulk_density = 2500.0
//! deg_rate = 0.01
//! parent = "buffer"
//!
//! [[cells.inventory]]
//! iso = 92235
//! mass = 10.0
//!
//! [[cells]]
//! name = "buffer"
//! kind = "one_dim_ppm"
//! material = "clay"
//! inner_radius = 0.5
//! outer_radius = 1.5
//! length = 1.0
//! porosity = 0.4
//! bulk_density = 1600.0
//! advective_velocity = 1e-10
//! step_length = 3.15e7
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};
use crate::models::{
    Compartment, DEFAULT_QUADRATURE_POINTS, DegRate, MixedCell, NuclideCell, OneDimPpm, TransportParameters,
};
use crate::physics::{
    Geometry, InMemoryMaterialTable, Iso, MaterialParcel, MaterialRow, NuclideModel, NuclideModelKind,
    SharedMaterialTable, Timestep,
};
use crate::system::DisposalSystem;

/// Whole-system configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub materials: Vec<MaterialRow>,
    #[serde(default)]
    pub cells: Vec<CellConfig>,
}

/// One cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellConfig {
    pub name: String,
    pub kind: NuclideModelKind,
    pub material: String,

    pub inner_radius: f64,
    pub outer_radius: f64,
    pub length: f64,

    pub porosity: f64,
    pub bulk_density: f64,
    #[serde(default)]
    pub advective_velocity: f64,

    /// Required for `deg_rate` cells
    pub deg_rate: Option<f64>,
    /// Seconds per timestep for `one_dim_ppm` cells, defaults to 1
    pub step_length: Option<f64>,
    /// Seconds the source is held for `one_dim_ppm` cells, unbounded when omitted
    pub source_duration: Option<f64>,
    /// Transect sub-intervals for `one_dim_ppm` cells
    pub quadrature_points: Option<usize>,

    /// Name of the cell that takes up material from this one
    pub parent: Option<String>,
    /// Creation timestep
    #[serde(default)]
    pub created: Timestep,
    /// Initial ledger contents
    #[serde(default)]
    pub inventory: Vec<InventoryConfig>,
}

/// Initial mass of one isotope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub iso: Iso,
    pub mass: f64,
}

impl SystemConfig {
    pub fn from_toml_str(content: &str) -> TransportResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> TransportResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Property table built from the `materials` rows
    pub fn material_table(&self) -> SharedMaterialTable {
        InMemoryMaterialTable::from_rows(&self.materials).into_shared()
    }

    /// Build and link every cell
    ///
    /// # Errors
    ///
    /// - [`TransportError::Config`] for duplicate names, unknown parents,
    ///   a `deg_rate` cell without a rate, or an invalid topology
    /// - [`TransportError::Range`] for out-of-range parameters
    pub fn build(&self) -> TransportResult<DisposalSystem> {
        let table = self.material_table();
        let mut system = DisposalSystem::new();
        let mut ids = HashMap::new();

        for config in &self.cells {
            if ids.contains_key(config.name.as_str()) {
                return Err(TransportError::Config(format!("duplicate cell name '{}'", config.name)));
            }
            let cell = config.build(table.clone())?;
            ids.insert(config.name.as_str(), system.add_cell(cell));
        }

        for config in &self.cells {
            if let Some(parent) = &config.parent {
                let parent_id = ids.get(parent.as_str()).ok_or_else(|| {
                    TransportError::Config(format!("cell '{}' names unknown parent '{}'", config.name, parent))
                })?;
                system.link(*parent_id, ids[config.name.as_str()])?;
            }
        }

        info!(
            "built system of {} cells holding {:.6e} kg",
            system.len(),
            system.total_mass()
        );
        Ok(system)
    }
}

impl CellConfig {
    /// Build the cell with its initial inventory
    pub fn build(&self, table: SharedMaterialTable) -> TransportResult<NuclideCell> {
        let compartment = Compartment::new(
            self.name.as_str(),
            self.material.as_str(),
            Geometry::new(self.inner_radius, self.outer_radius, self.length)?,
            TransportParameters::new(self.porosity, self.bulk_density, self.advective_velocity)?,
            table,
            self.created,
        );

        if self.kind != NuclideModelKind::DegRate && self.deg_rate.is_some() {
            warn!("cell '{}' is {}; deg_rate ignored", self.name, self.kind);
        }

        let mut cell: NuclideCell = match self.kind {
            NuclideModelKind::OneDimPpm => OneDimPpm::new(
                compartment,
                self.step_length.unwrap_or(1.0),
                self.source_duration.unwrap_or(f64::INFINITY),
                self.quadrature_points.unwrap_or(DEFAULT_QUADRATURE_POINTS),
            )?
            .into(),
            NuclideModelKind::DegRate => {
                let deg_rate = self.deg_rate.ok_or_else(|| {
                    TransportError::Config(format!("deg_rate cell '{}' needs a deg_rate", self.name))
                })?;
                DegRate::new(compartment, deg_rate)?.into()
            }
            NuclideModelKind::MixedCell => MixedCell::new(compartment).into(),
        };

        for entry in &self.inventory {
            cell.absorb(MaterialParcel::single(entry.iso, entry.mass, self.created)?);
        }

        Ok(cell)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ChemProperty;

    const SYSTEM: &str = r#"
        [[materials]]
        material = "clay"
        element = 92
        property = "dispersion"
        value = 1e-9

        [[cells]]
        name = "waste"
        kind = "deg_rate"
        material = "glass"
        inner_radius = 0.0
        outer_radius = 0.5
        length = 1.0
        porosity = 0.1
        bulk_density = 2500.0
        deg_rate = 0.25
        parent = "buffer"

        [[cells.inventory]]
        iso = 92235
        mass = 10.0

        [[cells]]
        name = "buffer"
        kind = "one_dim_ppm"
        material = "clay"
        inner_radius = 0.5
        outer_radius = 1.5
        length = 1.0
        porosity = 0.4
        bulk_density = 1600.0
        advective_velocity = 1e-10
        step_length = 3.15e7
        quadrature_points = 4
    "#;

    #[test]
    fn test_parse_and_build() {
        let config = SystemConfig::from_toml_str(SYSTEM).unwrap();

        assert_eq!(config.materials.len(), 1);
        assert_eq!(config.materials[0].property, ChemProperty::Dispersion);
        assert_eq!(config.cells.len(), 2);
        assert_eq!(config.cells[0].kind, NuclideModelKind::DegRate);

        let system = config.build().unwrap();
        let waste = system.find("waste").unwrap();
        let buffer = system.find("buffer").unwrap();

        assert_eq!(system.parent(waste), Some(buffer));
        assert_eq!(system.total_mass(), 10.0);
        assert_eq!(system.cell(buffer).unwrap().kind(), NuclideModelKind::OneDimPpm);
    }

    #[test]
    fn test_deg_rate_required() {
        let content = SYSTEM.replace("deg_rate = 0.25", "");
        let result = SystemConfig::from_toml_str(&content).unwrap().build();

        assert!(matches!(result, Err(TransportError::Config(_))));
    }

    #[test]
    fn test_unknown_parent() {
        let content = SYSTEM.replace("parent = \"buffer\"", "parent = \"rock\"");
        let result = SystemConfig::from_toml_str(&content).unwrap().build();

        assert!(matches!(result, Err(TransportError::Config(_))));
    }

    #[test]
    fn test_out_of_range_parameter() {
        let content = SYSTEM.replace("deg_rate = 0.25", "deg_rate = 2.0");
        let result = SystemConfig::from_toml_str(&content).unwrap().build();

        assert!(matches!(result, Err(TransportError::Range { quantity: "deg_rate", .. })));
    }

    #[test]
    fn test_malformed_toml() {
        let result = SystemConfig::from_toml_str("[[cells]]\nname = 3");
        assert!(matches!(result, Err(TransportError::Config(_))));
    }
}
