//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust,ignore
/// use nuclide_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::breakthrough("Buffer outlet");
/// config.width = 1920;
/// config.height = 1080;
/// config.isotope_colors = Some(vec![RED, BLUE]);
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Timestep")
    pub xlabel: String,

    /// Y-axis label (default: "Concentration (kg/m3)")
    pub ylabel: String,

    /// Optional colors, one per isotope in ascending isotope order
    ///
    /// If None, uses default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    pub isotope_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "Timestep".to_string(),
            ylabel: "Concentration (kg/m3)".to_string(),
            isotope_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

impl PlotConfig {
    /// Boundary concentration against time
    pub fn breakthrough(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Ledger mass against time
    pub fn inventory(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ylabel: "Mass (kg)".to_string(),
            ..Default::default()
        }
    }

    /// Color for the isotope at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn isotope_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.isotope_colors
            && index < colors.len()
        {
            return colors[index];
        }

        let palette = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),   // Orange
            RGBColor(128, 0, 128),   // Purple
            RGBColor(255, 192, 203), // Pink
            RGBColor(165, 42, 42),   // Brown
        ];

        palette[index % palette.len()]
    }
}
