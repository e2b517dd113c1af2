//! Visualization of cell histories
//!
//! This module renders recorded histories with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **breakthrough**: Temporal plots (boundary concentration or ledger mass vs timestep)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use nuclide_rs::output::visualization::{plot_breakthrough, plot_inventory, PlotConfig};
//!
//! let history = system.cell(buffer).unwrap().compartment().history();
//!
//! // Default config
//! plot_breakthrough(history, "buffer.png", None)?;
//!
//! // Custom config
//! let mut config = PlotConfig::inventory("Buffer inventory");
//! config.line_width = 3;
//! plot_inventory(history, "buffer_inventory.svg", Some(&config))?;
//! ```
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Concentration offered at the boundary | `plot_breakthrough` |
//! | Mass held in the ledger | `plot_inventory` |

pub mod breakthrough;
pub mod config;

pub use breakthrough::{plot_breakthrough, plot_inventory};
pub use config::PlotConfig;
