//! Output of simulation results
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV files for external analysis
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   └── breakthrough.rs
//! └── export/             ← Data export
//!     └── csv.rs
//! ```
//!
//! Both sub-modules read a cell's [`ConcentrationHistory`](crate::inventory::ConcentrationHistory)
//! and never touch live cell state.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use nuclide_rs::output::{export_history_csv, plot_breakthrough};
//!
//! let history = system.cell(buffer).unwrap().compartment().history();
//! plot_breakthrough(history, "buffer.png", None)?;
//! export_history_csv(history, "buffer.csv", None)?;
//! ```

pub mod export;
pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{PlotConfig, plot_breakthrough, plot_inventory};

pub use export::{CsvConfig, CsvMetadata, export_history_csv, export_inventory_csv};
