//! Material held by a cell and its record over time
//!
//! - **`ledger`**: the parcels a cell currently owns (`InventoryLedger`)
//! - **`history`**: concentration snapshots per timestep
//!   (`ConcentrationHistory`)

pub mod history;
pub mod ledger;

pub use history::ConcentrationHistory;
pub use ledger::InventoryLedger;
