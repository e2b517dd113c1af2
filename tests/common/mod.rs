//! Common utilities for integration tests
#![allow(dead_code)]

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{buffer_cell, compartment, deg_rate_cell, material_table, mixed_cell, waste_buffer_system};
pub use test_helpers::{assert_maps_close, relative_error};
