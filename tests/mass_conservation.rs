//! Mass conservation across ledgers and coupled systems
//!
//! Material is only ever moved: every absorb is matched by an extract
//! elsewhere, and failed extracts leave the ledger as it was.

use approx::assert_relative_eq;
use proptest::prelude::*;

use nuclide_rs::error::TransportError;
use nuclide_rs::inventory::InventoryLedger;
use nuclide_rs::physics::{IsotopeMap, MaterialParcel, NuclideModel};
use nuclide_rs::system::DisposalSystem;

mod common;
use common::{buffer_cell, deg_rate_cell, mixed_cell, waste_buffer_system};

fn isotope(index: usize) -> u32 {
    [92235, 92238, 94239][index % 3]
}

proptest! {
    #[test]
    fn prop_ledger_extract_conserves_mass(
        masses in prop::collection::vec(0.1f64..100.0, 1..10),
        fraction in 0.0f64..=1.0,
    ) {
        let mut ledger = InventoryLedger::new();
        for (t, &mass) in masses.iter().enumerate() {
            ledger.absorb(MaterialParcel::single(isotope(t), mass, t as u64).unwrap());
        }
        let absorbed: f64 = masses.iter().sum();

        let composition = ledger.sum().masses().clone();
        let taken = ledger.extract(&composition, absorbed * fraction).unwrap();

        prop_assert!((ledger.total_mass() + taken.total_mass() - absorbed).abs() <= 1e-9 * absorbed);
        prop_assert!(ledger.sum().masses().is_non_negative());
        prop_assert_eq!(taken.created(), 0);
    }

    #[test]
    fn prop_system_step_conserves_mass(
        deg_rate in 0.0f64..=1.0,
        mass in 0.1f64..1000.0,
        steps in 1u64..15,
    ) {
        let (mut system, _, _) = waste_buffer_system(deg_rate, mass);

        for t in 1..=steps {
            system.step(t).unwrap();
            prop_assert!((system.total_mass() - mass).abs() <= 1e-9 * mass);
        }
    }
}

#[test]
fn test_failed_extract_leaves_ledger_untouched() {
    let mut ledger = InventoryLedger::new();
    ledger.absorb(MaterialParcel::single(92235, 2.0, 0).unwrap());
    ledger.absorb(MaterialParcel::single(94239, 1.0, 1).unwrap());

    // 94239 share of the request exceeds its 1 kg
    let composition = IsotopeMap::from_pairs([(92235, 0.5), (94239, 0.5)]);
    let result = ledger.extract(&composition, 3.0);

    assert!(matches!(
        result,
        Err(TransportError::InsufficientInventory { iso: 94239, .. })
    ));
    assert_eq!(ledger.total_mass(), 3.0);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn test_transfers_account_for_parent_inventory() {
    let (mut system, waste, buffer) = waste_buffer_system(0.2, 10.0);

    let mut moved = 0.0;
    for t in 1..=10 {
        moved += system.step(t).unwrap().iter().map(|transfer| transfer.total_mass()).sum::<f64>();
    }

    let buffer_mass = system.cell(buffer).unwrap().contained_mass();
    let waste_mass = system.cell(waste).unwrap().contained_mass();

    assert_relative_eq!(moved, buffer_mass, max_relative = 1e-12);
    assert_relative_eq!(waste_mass + buffer_mass, 10.0, max_relative = 1e-12);
}

#[test]
fn test_chain_with_analytic_buffer_conserves_mass() {
    let mut system = DisposalSystem::new();
    let waste = system.add_cell(deg_rate_cell(0.25, 10.0));
    let buffer = system.add_cell(buffer_cell(1e-9, 3.15e7));
    let rock = system.add_cell(mixed_cell("rock", 1.5, 5.0));
    system.link(buffer, waste).unwrap();
    system.link(rock, buffer).unwrap();

    for t in 1..=8 {
        system.step(t).unwrap();

        assert_relative_eq!(system.total_mass(), 10.0, max_relative = 1e-9);
        for (_, cell) in system.iter() {
            assert!(cell.compartment().ledger().sum().masses().is_non_negative());
        }
    }

    assert_eq!(system.last_step(), Some(8));
}
