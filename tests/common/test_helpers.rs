//! Helper functions for integration tests

use nuclide_rs::physics::IsotopeMap;

/// Assert that two isotope maps agree on every isotope either one holds
pub fn assert_maps_close(actual: &IsotopeMap, expected: &IsotopeMap, tolerance: f64, message: &str) {
    for iso in actual.union_isotopes(expected) {
        let diff = (actual.get(iso) - expected.get(iso)).abs();
        assert!(
            diff < tolerance,
            "{}: isotope {} differs by {} (tolerance {})",
            message, iso, diff, tolerance
        );
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
