//! Time-indexed concentration and inventory history
//!
//! Every transport step records one concentration snapshot per cell. Keys
//! never go backwards: an update earlier than the last one is a
//! precondition violation, while an update at the same timestep replaces the
//! stored entry (last write wins).

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::error::{TransportError, TransportResult};
use crate::physics::{ConcentrationMap, Iso, IsoVector, Timestep};

/// Concentration snapshots and inventory totals keyed by timestep
#[derive(Debug, Clone)]
pub struct ConcentrationHistory {
    /// Concentration per isotope at each recorded timestep
    snapshots: BTreeMap<Timestep, ConcentrationMap>,

    /// Summed ledger contents at each recorded timestep
    inventories: BTreeMap<Timestep, IsoVector>,

    /// Creation time of the owning cell
    created: Timestep,

    last_updated: Timestep,
}

impl ConcentrationHistory {
    /// Empty history for a cell created at `created`
    pub fn new(created: Timestep) -> Self {
        Self {
            snapshots: BTreeMap::new(),
            inventories: BTreeMap::new(),
            created,
            last_updated: created,
        }
    }

    /// Fail unless `time` is at or after the last update
    pub fn check_time(&self, time: Timestep) -> TransportResult<()> {
        if time < self.last_updated {
            return Err(TransportError::Precondition(format!(
                "history update at t={} precedes last update at t={}",
                time, self.last_updated
            )));
        }
        Ok(())
    }

    /// Record the state at `time`
    ///
    /// Round-off negatives in `concentration` are clamped to zero before
    /// storage. Non-finite values are rejected.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Precondition`] if `time` precedes the last update
    /// - [`TransportError::NumericDomain`] if any concentration is not finite
    pub fn update(&mut self, time: Timestep, concentration: ConcentrationMap, inventory: IsoVector) -> TransportResult<()> {
        self.check_time(time)?;

        if !concentration.is_finite() {
            return Err(TransportError::NumericDomain(format!(
                "non-finite concentration recorded at t={}: {}",
                time, concentration
            )));
        }

        let replaced = self.snapshots.insert(time, concentration.clamp_non_negative()).is_some();
        self.inventories.insert(time, inventory);
        self.last_updated = time;

        debug!("history {} t={}", if replaced { "replaced" } else { "appended" }, time);
        Ok(())
    }

    /// Replace the inventory recorded at the last update
    ///
    /// The concentration snapshot at `time` is kept. Used when mass leaves a
    /// cell after its transport step without a new solve.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Precondition`] unless `time` is the last update
    ///   and a snapshot exists there
    pub fn update_inventory(&mut self, time: Timestep, inventory: IsoVector) -> TransportResult<()> {
        if time != self.last_updated || !self.snapshots.contains_key(&time) {
            return Err(TransportError::Precondition(format!(
                "no snapshot at t={} to attach an inventory to (last update t={})",
                time, self.last_updated
            )));
        }
        self.inventories.insert(time, inventory);
        Ok(())
    }

    /// Snapshot recorded exactly at `time`
    pub fn at(&self, time: Timestep) -> Option<&ConcentrationMap> {
        self.snapshots.get(&time)
    }

    /// Snapshot at the last update, empty before the first one
    pub fn latest(&self) -> ConcentrationMap {
        self.snapshots.get(&self.last_updated).cloned().unwrap_or_default()
    }

    /// Latest snapshot recorded strictly before `time`
    pub fn before(&self, time: Timestep) -> Option<(Timestep, &ConcentrationMap)> {
        self.snapshots.range(..time).next_back().map(|(t, c)| (*t, c))
    }

    /// Ledger contents recorded at `time`
    pub fn inventory_at(&self, time: Timestep) -> Option<&IsoVector> {
        self.inventories.get(&time)
    }

    /// Ledger contents recorded at the last update
    pub fn latest_inventory(&self) -> IsoVector {
        self.inventories.get(&self.last_updated).cloned().unwrap_or_default()
    }

    pub fn created(&self) -> Timestep {
        self.created
    }

    pub fn last_updated(&self) -> Timestep {
        self.last_updated
    }

    /// `(timestep, snapshot)` pairs in time order
    pub fn iter(&self) -> impl Iterator<Item = (Timestep, &ConcentrationMap)> {
        self.snapshots.iter().map(|(t, c)| (*t, c))
    }

    /// `(timestep, inventory)` pairs in time order
    pub fn inventories(&self) -> impl Iterator<Item = (Timestep, &IsoVector)> {
        self.inventories.iter().map(|(t, v)| (*t, v))
    }

    pub fn times(&self) -> Vec<Timestep> {
        self.snapshots.keys().copied().collect()
    }

    /// Every isotope appearing in any snapshot
    pub fn isotopes(&self) -> BTreeSet<Iso> {
        self.snapshots.values().flat_map(|c| c.isotopes()).collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
