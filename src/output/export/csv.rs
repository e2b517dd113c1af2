//! CSV export of cell histories
//!
//! This module writes a cell's concentration history (and the inventory
//! recorded alongside it) to CSV, which is readable by spreadsheets, Python
//! pandas, MATLAB, and most data analysis tools.
//!
//! # Features
//!
//! - **One column per isotope**: the union of every isotope seen in the history
//! - **Metadata support**: optional `#` header with cell parameters
//! - **Customizable**: delimiter, precision, decimal separator
//! - **Validation**: empty histories and non-finite values are rejected
//!
//! # Quick Examples
//!
//! ```rust,ignore
//! use nuclide_rs::output::export::{export_history_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_cell(&cell));
//! export_history_csv(cell.compartment().history(), "buffer.csv", Some(&config))?;
//! ```
//!
//! **Output** (`buffer.csv`):
//! ```csv
//! # Nuclide Transport Data
//! # Generated: 2026-02-11T15:30:00Z
//! # Cell: buffer
//! # Model: OneDimPPM
//! #
//! Timestep,92235 (kg/m3),94239 (kg/m3)
//! 1,0.000000,0.000000
//! 2,0.012500,0.000310
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{TransportError, TransportResult};
use crate::inventory::ConcentrationHistory;
use crate::physics::NuclideModel;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use nuclide_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "Timestep")
    pub time_header: String,

    /// Unit appended to every isotope column (default: "kg/m3")
    pub unit: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Timestep".to_string(),
            unit: "kg/m3".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Scientific precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Cell instance name
    pub cell_name: Option<String>,

    /// Release strategy
    pub model_name: Option<String>,

    /// Material name
    pub material: Option<String>,

    /// Porosity ε
    pub porosity: Option<f64>,

    /// Advective velocity v (m/s)
    pub velocity: Option<f64>,

    /// Pore volume (m³)
    pub pore_volume: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing a cell
    pub fn from_cell(cell: &dyn NuclideModel) -> Self {
        let compartment = cell.compartment();
        Self {
            cell_name: Some(cell.name().to_string()),
            model_name: Some(cell.kind().to_string()),
            material: Some(compartment.material().to_string()),
            porosity: Some(compartment.parameters().porosity()),
            velocity: Some(compartment.parameters().advective_velocity()),
            pore_volume: Some(compartment.pore_volume()),
            custom: Vec::new(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> TransportResult<()> {
    writeln!(out, "# Nuclide Transport Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(cell) = &metadata.cell_name {
        writeln!(out, "# Cell: {}", cell)?;
    }
    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {}", model)?;
    }
    if let Some(material) = &metadata.material {
        writeln!(out, "# Material: {}", material)?;
    }
    if let Some(eps) = metadata.porosity {
        writeln!(out, "# Porosity: {}", eps)?;
    }
    if let Some(v) = metadata.velocity {
        writeln!(out, "# Velocity: {} m/s", v)?;
    }
    if let Some(volume) = metadata.pore_volume {
        writeln!(out, "# Pore Volume: {} m3", volume)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn create(path: &Path) -> TransportResult<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export the concentration history to CSV
///
/// One row per recorded timestep, one column per isotope. Isotopes absent
/// from a snapshot are written as zero.
///
/// # Errors
///
/// - [`TransportError::Precondition`] for an empty history
/// - [`TransportError::NumericDomain`] if a stored value is not finite
/// - [`TransportError::Io`] on file errors
pub fn export_history_csv<P: AsRef<Path>>(
    history: &ConcentrationHistory,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> TransportResult<()> {

    // ============================= Validation =============================

    if history.is_empty() {
        return Err(TransportError::Precondition("history is empty: nothing to export".to_string()));
    }
    if history.iter().any(|(_, snapshot)| !snapshot.is_finite()) {
        return Err(TransportError::NumericDomain("non-finite concentration in history".into()));
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let isotopes = history.isotopes();

    // ============================= Write =============================

    let mut out = create(output_path.as_ref())?;

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(&mut out, metadata)?;
    }

    write!(out, "{}", configuration.time_header)?;
    for iso in &isotopes {
        write!(out, "{}{} ({})", configuration.delimiter, iso, configuration.unit)?;
    }
    writeln!(out)?;

    for (time, snapshot) in history.iter() {
        write!(out, "{}", time)?;
        for iso in &isotopes {
            write!(out, "{}{}", configuration.delimiter, format_number(snapshot.get(*iso), configuration))?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    debug!("exported {} rows to {}", history.len(), output_path.as_ref().display());
    Ok(())
}

/// Export the inventory recorded at each timestep to CSV
///
/// Columns: timestep, total mass, then one mass column per isotope (kg).
pub fn export_inventory_csv<P: AsRef<Path>>(
    history: &ConcentrationHistory,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> TransportResult<()> {
    if history.is_empty() {
        return Err(TransportError::Precondition("history is empty: nothing to export".to_string()));
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let isotopes: std::collections::BTreeSet<_> = history
        .inventories()
        .flat_map(|(_, inventory)| inventory.masses().isotopes().collect::<Vec<_>>())
        .collect();

    let mut out = create(output_path.as_ref())?;

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(&mut out, metadata)?;
    }

    write!(out, "{}{}Total (kg)", configuration.time_header, configuration.delimiter)?;
    for iso in &isotopes {
        write!(out, "{}{} (kg)", configuration.delimiter, iso)?;
    }
    writeln!(out)?;

    for (time, inventory) in history.inventories() {
        write!(
            out,
            "{}{}{}",
            time,
            configuration.delimiter,
            format_number(inventory.total_mass(), configuration)
        )?;
        for iso in &isotopes {
            write!(out, "{}{}", configuration.delimiter, format_number(inventory.mass_of(*iso), configuration))?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;
    use crate::physics::{IsoVector, IsotopeMap};

    fn history() -> ConcentrationHistory {
        let mut history = ConcentrationHistory::new(0);
        history
            .update(1, IsotopeMap::from_pairs([(92235, 0.5)]), IsoVector::new(IsotopeMap::from_pairs([(92235, 2.0)])))
            .unwrap();
        history
            .update(2, IsotopeMap::from_pairs([(92235, 0.25), (94239, 1.0)]), IsoVector::default())
            .unwrap();
        history
    }

    #[test]
    fn test_export_history_columns() {
        let file = NamedTempFile::new().unwrap();
        export_history_csv(&history(), file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Timestep,92235 (kg/m3),94239 (kg/m3)");
        assert_eq!(lines[1], "1,0.500000,0.000000");
        assert_eq!(lines[2], "2,0.250000,1.000000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_european_with_metadata() {
        let file = NamedTempFile::new().unwrap();
        let mut metadata = CsvMetadata {
            cell_name: Some("buffer".into()),
            ..Default::default()
        };
        metadata.add_custom("Run".into(), "reference".into());
        let config = CsvConfig::european().precision(2).with_metadata(metadata);

        export_history_csv(&history(), file.path(), Some(&config)).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();

        assert!(content.starts_with("# Nuclide Transport Data"));
        assert!(content.contains("# Cell: buffer"));
        assert!(content.contains("# Run: reference"));
        assert!(content.contains("1;0,50;0,00"));
    }

    #[test]
    fn test_export_inventory() {
        let file = NamedTempFile::new().unwrap();
        export_inventory_csv(&history(), file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Timestep,Total (kg),92235 (kg)");
        assert_eq!(lines[1], "1,2.000000,2.000000");
        assert_eq!(lines[2], "2,0.000000,0.000000");
    }

    #[test]
    fn test_empty_history_rejected() {
        let file = NamedTempFile::new().unwrap();
        let result = export_history_csv(&ConcentrationHistory::new(0), file.path(), None);
        assert!(matches!(result, Err(TransportError::Precondition(_))));

        let result = export_inventory_csv(&ConcentrationHistory::new(0), file.path(), None);
        assert!(matches!(result, Err(TransportError::Precondition(_))));
    }
}
