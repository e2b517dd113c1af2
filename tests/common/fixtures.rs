//! Ready-made cells and systems for integration tests

use nuclide_rs::models::{Compartment, DegRate, MixedCell, OneDimPpm, TransportParameters};
use nuclide_rs::physics::{
    ChemProperty, Geometry, InMemoryMaterialTable, MaterialParcel, NuclideModel, SharedMaterialTable,
};
use nuclide_rs::system::{CellId, DisposalSystem};

/// Dispersion coefficients for uranium and plutonium in clay and glass
pub fn material_table() -> SharedMaterialTable {
    InMemoryMaterialTable::new()
        .with("clay", 92, ChemProperty::Dispersion, 1e-6)
        .with("clay", 94, ChemProperty::Dispersion, 5e-7)
        .with("glass", 92, ChemProperty::Dispersion, 1e-9)
        .with("glass", 94, ChemProperty::Dispersion, 1e-9)
        .into_shared()
}

/// Compartment created at t = 0
pub fn compartment(name: &str, material: &str, inner: f64, outer: f64, porosity: f64, velocity: f64) -> Compartment {
    Compartment::new(
        name,
        material,
        Geometry::new(inner, outer, 1.0).unwrap(),
        TransportParameters::new(porosity, 2000.0, velocity).unwrap(),
        material_table(),
        0,
    )
}

/// Waste form holding `mass` kg of U-235
pub fn deg_rate_cell(deg_rate: f64, mass: f64) -> DegRate {
    let mut cell = DegRate::new(compartment("waste", "glass", 0.0, 0.5, 0.1, 0.0), deg_rate).unwrap();
    if mass > 0.0 {
        cell.absorb(MaterialParcel::single(92235, mass, 0).unwrap());
    }
    cell
}

/// Empty analytic buffer around the waste form
pub fn buffer_cell(velocity: f64, step_length: f64) -> OneDimPpm {
    OneDimPpm::new(
        compartment("buffer", "clay", 0.5, 1.5, 0.4, velocity),
        step_length,
        f64::INFINITY,
        8,
    )
    .unwrap()
}

/// Empty well-mixed cell
pub fn mixed_cell(name: &str, inner: f64, outer: f64) -> MixedCell {
    MixedCell::new(compartment(name, "clay", inner, outer, 0.3, 0.0))
}

/// Waste form linked under a well-mixed buffer
pub fn waste_buffer_system(deg_rate: f64, mass: f64) -> (DisposalSystem, CellId, CellId) {
    let mut system = DisposalSystem::new();
    let waste = system.add_cell(deg_rate_cell(deg_rate, mass));
    let buffer = system.add_cell(mixed_cell("buffer", 0.5, 1.5));
    system.link(buffer, waste).unwrap();
    (system, waste, buffer)
}
