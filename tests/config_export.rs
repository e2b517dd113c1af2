//! From a TOML description to exported results

use std::fs;

use tempfile::{NamedTempFile, TempDir};

use nuclide_rs::config::SystemConfig;
use nuclide_rs::error::TransportError;
use nuclide_rs::output::{CsvConfig, CsvMetadata, export_history_csv, export_inventory_csv};
use nuclide_rs::physics::{NuclideModel, NuclideModelKind};

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
deg_rate = 0.5
parent = "buffer"

[[cells.inventory]]
iso = 92235
mass = 10.0

[[cells]]
name = "buffer"
kind = "mixed_cell"
material = "clay"
inner_radius = 0.5
outer_radius = 1.5
length = 1.0
porosity = 0.4
bulk_density = 1600.0
"#;

#[test]
fn test_toml_file_to_inventory_csv() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("system.toml");
    fs::write(&config_path, SYSTEM).unwrap();

    let mut system = SystemConfig::from_path(&config_path).unwrap().build().unwrap();
    let buffer = system.find("buffer").unwrap();
    for t in 1..=3 {
        system.step(t).unwrap();
    }

    let cell = system.cell(buffer).unwrap();
    assert_eq!(cell.kind(), NuclideModelKind::MixedCell);

    let output = dir.path().join("buffer_inventory.csv");
    export_inventory_csv(cell.compartment().history(), &output, None).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines[0], "Timestep,Total (kg),92235 (kg)");
    assert_eq!(lines[1], "1,5.000000,5.000000");
    assert_eq!(lines[2], "2,10.000000,10.000000");
    assert_eq!(lines[3], "3,10.000000,10.000000");
}

#[test]
fn test_history_csv_with_cell_metadata() {
    let mut system = SystemConfig::from_toml_str(SYSTEM).unwrap().build().unwrap();
    let waste = system.find("waste").unwrap();
    system.step(1).unwrap();

    let cell = system.cell(waste).unwrap();
    let config = CsvConfig::high_precision().with_metadata(CsvMetadata::from_cell(cell));

    let file = NamedTempFile::new().unwrap();
    export_history_csv(cell.compartment().history(), file.path(), Some(&config)).unwrap();

    let content = fs::read_to_string(file.path()).unwrap();
    assert!(content.contains("# Cell: waste"));
    assert!(content.contains("# Model: DegRate"));
    assert!(content.contains("# Material: glass"));
    assert!(content.contains("Timestep,92235 (kg/m3)"));
}

#[test]
fn test_cycle_in_configuration_rejected() {
    let content = SYSTEM.replace(
        "porosity = 0.4\n",
        "porosity = 0.4\nparent = \"waste\"\n",
    );
    let result = SystemConfig::from_toml_str(&content).unwrap().build();

    assert!(matches!(result, Err(TransportError::Config(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = SystemConfig::from_path(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(TransportError::Io(_))));
}
