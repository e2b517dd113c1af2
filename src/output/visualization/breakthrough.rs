//! Breakthrough curves: per-isotope values against timestep
//!
//! # Available functions
//!
//! - [`plot_breakthrough`]: boundary concentration of every isotope
//! - [`plot_inventory`]: ledger mass of every isotope
//!
//! The backend follows the file extension: `.svg` renders SVG, anything
//! else PNG.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nuclide_rs::output::visualization::{plot_breakthrough, PlotConfig};
//!
//! let history = system.cell(buffer).unwrap().compartment().history();
//! plot_breakthrough(history, "buffer.png", Some(&PlotConfig::breakthrough("Buffer")))?;
//! ```

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::PlotConfig;
use crate::error::{TransportError, TransportResult};
use crate::inventory::ConcentrationHistory;
use crate::physics::Iso;

/// One curve: isotope and its `(timestep, value)` points
type Curve = (Iso, Vec<(f64, f64)>);

// =================================================================================================
// Helper Functions
// =================================================================================================

fn concentration_curves(history: &ConcentrationHistory) -> Vec<Curve> {
    history
        .isotopes()
        .into_iter()
        .map(|iso| {
            let points = history
                .iter()
                .map(|(time, snapshot)| (time as f64, snapshot.get(iso)))
                .collect();
            (iso, points)
        })
        .collect()
}

fn inventory_curves(history: &ConcentrationHistory) -> Vec<Curve> {
    let isotopes: std::collections::BTreeSet<Iso> = history
        .inventories()
        .flat_map(|(_, inventory)| inventory.masses().isotopes().collect::<Vec<_>>())
        .collect();

    isotopes
        .into_iter()
        .map(|iso| {
            let points = history
                .inventories()
                .map(|(time, inventory)| (time as f64, inventory.mass_of(iso)))
                .collect();
            (iso, points)
        })
        .collect()
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot the boundary concentration of every isotope against timestep
///
/// # Errors
///
/// - [`TransportError::Precondition`] for an empty history
/// - [`TransportError::Io`] if the backend fails
pub fn plot_breakthrough<P: AsRef<Path>>(
    history: &ConcentrationHistory,
    output_path: P,
    config: Option<&PlotConfig>,
) -> TransportResult<()> {
    let default_config = PlotConfig::breakthrough("Breakthrough");
    render(&concentration_curves(history), output_path.as_ref(), config.unwrap_or(&default_config))
}

/// Plot the ledger mass of every isotope against timestep
pub fn plot_inventory<P: AsRef<Path>>(
    history: &ConcentrationHistory,
    output_path: P,
    config: Option<&PlotConfig>,
) -> TransportResult<()> {
    let default_config = PlotConfig::inventory("Inventory");
    render(&inventory_curves(history), output_path.as_ref(), config.unwrap_or(&default_config))
}

fn render(curves: &[Curve], output_path: &Path, config: &PlotConfig) -> TransportResult<()> {
    if curves.is_empty() || curves[0].1.is_empty() {
        return Err(TransportError::Precondition("history is empty: nothing to plot".to_string()));
    }

    let points = || curves.iter().flat_map(|(_, points)| points.iter());
    let min_time = points().map(|(t, _)| *t).fold(f64::INFINITY, f64::min);
    let max_time = points().map(|(t, _)| *t).fold(f64::NEG_INFINITY, f64::max).max(min_time + 1.0);
    let max_value = points().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max).max(1e-30);

    let ext = output_path.extension().and_then(|s| s.to_str()).unwrap_or("png");

    let result = match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_curves_impl(backend, curves, config, (min_time, max_time), max_value)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_curves_impl(backend, curves, config, (min_time, max_time), max_value)
        }
    };

    result.map_err(|e| TransportError::Io(format!("plotting {} failed: {}", output_path.display(), e)))
}

fn plot_curves_impl<DB: DrawingBackend>(
    backend: DB,
    curves: &[Curve],
    config: &PlotConfig,
    time_range: (f64, f64),
    max_value: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(time_range.0..time_range.1, 0.0..(max_value * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.2e}", y))
            .draw()?;
    }

    for (index, (iso, points)) in curves.iter().enumerate() {
        let color = config.isotope_color(index);

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(iso.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
