//! Boundary-coupling formulas shared by every cell
//!
//! # Design Philosophy
//!
//! Neighbouring cells exchange material through three boundary values:
//!
//! - **Dirichlet**: the concentration at the boundary
//! - **Neumann**: the gradient between the cell interior and a neighbour
//! - **Cauchy**: the total flux `-D grad + v c`
//!
//! These functions only do the arithmetic; the cells decide which interior
//! concentration and radius they represent themselves with.

use log::trace;

use crate::error::{TransportError, TransportResult};
use crate::physics::{ConcentrationMap, FluxMap, GradientMap, Iso, IsoVector};

/// Gradient `(c_ext - c_int) / (r_ext - r_int)` over the union of isotopes
///
/// Isotopes absent on one side count as zero there.
///
/// # Errors
///
/// When `r_ext == r_int` the gradient of an isotope whose two
/// concentrations agree is zero; any other isotope is a
/// [`TransportError::NumericDomain`].
///
/// # Example
///
/// ```rust
/// use nuclide_rs::physics::IsotopeMap;
/// use nuclide_rs::solver::boundary::neumann;
///
/// let inside = IsotopeMap::from_pairs([(92235, 1.0)]);
/// let outside = IsotopeMap::from_pairs([(92235, 3.0)]);
///
/// let gradient = neumann(&inside, 1.0, &outside, 2.0).unwrap();
/// assert_eq!(gradient.get(92235), 2.0);
/// ```
pub fn neumann(c_int: &ConcentrationMap, r_int: f64, c_ext: &ConcentrationMap, r_ext: f64) -> TransportResult<GradientMap> {
    let distance = r_ext - r_int;

    c_int
        .union_isotopes(c_ext)
        .into_iter()
        .map(|iso| {
            let difference = c_ext.get(iso) - c_int.get(iso);

            if distance == 0.0 {
                if difference == 0.0 {
                    return Ok((iso, 0.0));
                }
                return Err(TransportError::NumericDomain(format!(
                    "gradient of isotope {} across zero distance at r = {} (difference {})",
                    iso, r_int, difference
                )));
            }

            Ok((iso, difference / distance))
        })
        .collect::<TransportResult<GradientMap>>()
}

/// Flux `-D grad + v c` for every isotope in `gradient` or `concentration`
///
/// `dispersion` resolves the coefficient of each isotope; lookup failures
/// propagate.
pub fn cauchy<F>(
    gradient: &GradientMap,
    concentration: &ConcentrationMap,
    velocity: f64,
    mut dispersion: F,
) -> TransportResult<FluxMap>
where
    F: FnMut(Iso) -> TransportResult<f64>,
{
    gradient
        .union_isotopes(concentration)
        .into_iter()
        .map(|iso| {
            let d = dispersion(iso)?;
            let flux = -d * gradient.get(iso) + velocity * concentration.get(iso);
            trace!("cauchy flux iso={} D={:e} flux={:e}", iso, d, flux);
            Ok((iso, flux))
        })
        .collect::<TransportResult<FluxMap>>()
}

/// Mass offered at the boundary: concentration times pore volume
pub fn source_term(concentration: &ConcentrationMap, pore_volume: f64) -> (IsoVector, f64) {
    let offered = IsoVector::from_concentration(concentration, pore_volume.max(0.0));
    let mass = offered.total_mass();
    (offered, mass)
}

// =================================================================================================
// Tests
// =================================================================================================
