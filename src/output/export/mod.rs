//! Export module for cell histories.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use nuclide_rs::output::export::{export_history_csv, export_inventory_csv};
//!
//! let history = system.cell(buffer).unwrap().compartment().history();
//! export_history_csv(history, "buffer_concentration.csv", None)?;
//! export_inventory_csv(history, "buffer_inventory.csv", None)?;
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvMetadata, export_history_csv, export_inventory_csv};
