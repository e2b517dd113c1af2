//! Disposal system: an arena of linked cells
//!
//! Cells are stored in one arena and addressed by a stable [`CellId`]. A
//! parent is the outer component that takes up material from its
//! daughters (a buffer around a waste form, host rock around a buffer).
//!
//! # Stepping
//!
//! [`DisposalSystem::step`] advances every cell to the same timestep:
//!
//! 1. every cell runs `transport_step(t)`, daughters before parents
//! 2. every parent takes up material from each of its daughters, capped by
//!    what the daughter offered after step 1
//! 3. every parent that absorbed material steps again at `t`; a daughter that
//!    only lost material re-records its inventory and keeps its snapshot
//!
//! Material therefore crosses at most one link per step.
//!
//! A transfer is one transaction: the daughter's `extract` validates the
//! whole demand before mutating anything and the parent only absorbs what
//! was actually extracted, so the system total mass never changes.
//!
//! # Example
//!
//! ```rust
//! use nuclide_rs::models::{Compartment, DegRate, MixedCell, TransportParameters};
//! use nuclide_rs::physics::{Geometry, InMemoryMaterialTable, MaterialParcel, NuclideModel};
//! use nuclide_rs::system::DisposalSystem;
//!
//! let table = InMemoryMaterialTable::new().into_shared();
//! let compartment = |name: &str, inner: f64, outer: f64| {
//!     Compartment::new(
//!         name,
//!         "glass",
//!         Geometry::new(inner, outer, 1.0).unwrap(),
//!         TransportParameters::new(0.3, 2500.0, 0.0).unwrap(),
//!         table.clone(),
//!         0,
//!     )
//! };
//!
//! let mut system = DisposalSystem::new();
//! let waste = system.add_cell(DegRate::new(compartment("waste", 0.0, 0.5), 0.5).unwrap());
//! let buffer = system.add_cell(MixedCell::new(compartment("buffer", 0.5, 1.0)));
//! system.link(buffer, waste).unwrap();
//!
//! system.cell_mut(waste).unwrap().absorb(MaterialParcel::single(92235, 10.0, 0).unwrap());
//! system.step(1).unwrap();
//!
//! assert_eq!(system.cell(buffer).unwrap().contained_mass(), 5.0);
//! assert_eq!(system.total_mass(), 10.0);
//! ```

use std::fmt;

use log::{debug, info, warn};

use crate::error::{TransportError, TransportResult};
use crate::models::NuclideCell;
use crate::physics::{IsotopeMap, NuclideModel, Timestep};

// =================================================================================================
// Identifiers
// =================================================================================================

/// Stable index of a cell in a [`DisposalSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Material moved from a daughter to its parent during one step
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub time: Timestep,
    pub from: CellId,
    pub to: CellId,
    pub masses: IsotopeMap,
}

impl Transfer {
    pub fn total_mass(&self) -> f64 {
        self.masses.total()
    }
}

#[derive(Debug, Clone)]
struct Node {
    cell: NuclideCell,
    parent: Option<CellId>,
    daughters: Vec<CellId>,
}

// =================================================================================================
// Disposal System
// =================================================================================================

#[derive(Debug, Clone, Default)]
pub struct DisposalSystem {
    nodes: Vec<Node>,
    last_step: Option<Timestep>,
}

impl DisposalSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unlinked cell
    pub fn add_cell(&mut self, cell: impl Into<NuclideCell>) -> CellId {
        let id = CellId(self.nodes.len());
        let cell = cell.into();
        debug!("adding {} cell '{}' as {}", cell.kind(), cell.name(), id);

        self.nodes.push(Node {
            cell,
            parent: None,
            daughters: Vec::new(),
        });
        id
    }

    /// Make `parent` take up material from `daughter`
    ///
    /// # Errors
    ///
    /// [`TransportError::Config`] for an unknown id, a self-link, a daughter
    /// that already has a parent, or a link that would close a cycle.
    pub fn link(&mut self, parent: CellId, daughter: CellId) -> TransportResult<()> {
        self.node(parent)?;
        self.node(daughter)?;

        if parent == daughter {
            return Err(TransportError::Config(format!("cell {} cannot be its own parent", parent)));
        }
        if let Some(existing) = self.nodes[daughter.0].parent {
            return Err(TransportError::Config(format!(
                "cell {} already has parent {}",
                daughter, existing
            )));
        }

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == daughter {
                return Err(TransportError::Config(format!(
                    "linking {} under {} would create a cycle",
                    daughter, parent
                )));
            }
            ancestor = self.nodes[id.0].parent;
        }

        self.nodes[daughter.0].parent = Some(parent);
        self.nodes[parent.0].daughters.push(daughter);
        Ok(())
    }

    pub fn cell(&self, id: CellId) -> Option<&NuclideCell> {
        self.nodes.get(id.0).map(|node| &node.cell)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut NuclideCell> {
        self.nodes.get_mut(id.0).map(|node| &mut node.cell)
    }

    /// Id of the first cell called `name`
    pub fn find(&self, name: &str) -> Option<CellId> {
        self.nodes.iter().position(|node| node.cell.name() == name).map(CellId)
    }

    pub fn parent(&self, id: CellId) -> Option<CellId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    pub fn daughters(&self, id: CellId) -> &[CellId] {
        self.nodes.get(id.0).map(|node| node.daughters.as_slice()).unwrap_or(&[])
    }

    /// `(id, cell)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &NuclideCell)> {
        self.nodes.iter().enumerate().map(|(index, node)| (CellId(index), &node.cell))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn last_step(&self) -> Option<Timestep> {
        self.last_step
    }

    /// Mass held by every cell together \[kg\]
    pub fn total_mass(&self) -> f64 {
        self.nodes.iter().map(|node| node.cell.contained_mass()).sum()
    }

    /// Advance the whole system to `time`
    ///
    /// Returns the transfers performed, in the order they happened.
    ///
    /// # Errors
    ///
    /// [`TransportError::Precondition`] if any cell has already been
    /// updated past `time` (checked before any cell is touched), or the
    /// first error raised by a cell or a transfer.
    pub fn step(&mut self, time: Timestep) -> TransportResult<Vec<Transfer>> {
        for node in &self.nodes {
            node.cell.compartment().history().check_time(time)?;
        }

        let order = self.daughters_first();
        let mass_before = self.total_mass();

        for &id in &order {
            self.nodes[id.0].cell.transport_step(time)?;
        }

        // offers are fixed before any transfer so material crosses one link per step
        let offers: Vec<IsotopeMap> = self
            .nodes
            .iter()
            .map(|node| node.cell.source_term().0.masses().clone())
            .collect();

        let mut transfers = Vec::new();
        let mut absorbed = vec![false; self.nodes.len()];
        let mut extracted = vec![false; self.nodes.len()];
        for &parent in &order {
            for daughter in self.nodes[parent.0].daughters.clone() {
                if let Some(transfer) = self.transfer(parent, daughter, &offers[daughter.0], time)? {
                    absorbed[parent.0] = true;
                    extracted[daughter.0] = true;
                    transfers.push(transfer);
                }
            }
        }

        for &id in &order {
            let cell = &mut self.nodes[id.0].cell;
            if absorbed[id.0] {
                cell.transport_step(time)?;
            } else if extracted[id.0] {
                cell.compartment_mut().record_inventory(time)?;
            }
        }

        self.last_step = Some(time);
        info!(
            "step t={}: {} transfers, system mass {:.6e} kg (was {:.6e} kg)",
            time,
            transfers.len(),
            self.total_mass(),
            mass_before
        );
        Ok(transfers)
    }

    /// Move what `parent` demands from `daughter`, capped by what the
    /// daughter offers and holds
    ///
    /// Returns `None` when nothing moves.
    pub fn couple(&mut self, parent: CellId, daughter: CellId, time: Timestep) -> TransportResult<Option<Transfer>> {
        let (offered, _) = self.node(daughter)?.cell.source_term();
        self.transfer(parent, daughter, offered.masses(), time)
    }

    fn transfer(
        &mut self,
        parent: CellId,
        daughter: CellId,
        offered: &IsotopeMap,
        time: Timestep,
    ) -> TransportResult<Option<Transfer>> {
        let (demand, capped) = {
            let parent_cell = &self.node(parent)?.cell;
            let daughter_cell = &self.node(daughter)?.cell;

            let demand = parent_cell.uptake_demand(daughter_cell)?;
            let held = daughter_cell.compartment().ledger().sum();

            let capped = demand.min(offered).min(held.masses()).positive_part();
            (demand, capped)
        };

        if capped != demand.positive_part() {
            warn!(
                "demand of {} on {} capped from {} to {}",
                parent, daughter, demand, capped
            );
        }

        let mass = capped.total();
        if mass <= 0.0 {
            return Ok(None);
        }

        let parcel = self.nodes[daughter.0].cell.extract(&capped, mass)?;
        let masses = parcel.masses().clone();
        self.nodes[parent.0].cell.absorb(parcel);

        info!(
            "t={}: moved {:.6e} kg from '{}' to '{}'",
            time,
            mass,
            self.nodes[daughter.0].cell.name(),
            self.nodes[parent.0].cell.name()
        );

        Ok(Some(Transfer {
            time,
            from: daughter,
            to: parent,
            masses,
        }))
    }

    fn node(&self, id: CellId) -> TransportResult<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| TransportError::Config(format!("unknown cell {}", id)))
    }

    /// Post-order over every tree: each daughter precedes its parent
    fn daughters_first(&self) -> Vec<CellId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let roots = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| CellId(index));

        for root in roots {
            let mut stack = vec![(root, false)];
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    order.push(id);
                } else {
                    stack.push((id, true));
                    for &daughter in self.nodes[id.0].daughters.iter().rev() {
                        stack.push((daughter, false));
                    }
                }
            }
        }
        order
    }
}

// =================================================================================================
// Tests
// =================================================================================================
