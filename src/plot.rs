//! Rendering-surface boundary.
//!
//! The actual map drawing (shaded county patches, color bar, hover tips)
//! belongs to an external plotting collaborator; this module specifies only
//! the contract: a fixed style table keyed by statistic, a `RenderSurface`
//! trait the controller publishes through, and a thin figure shell whose
//! dataset handle is replaced in place — the figure itself is never
//! reconstructed across selections.

use geojson::FeatureCollection;

use crate::assemble::payload_string;
use crate::model::StatKind;

// ---------------------------------------------------------------------------
// Style table
// ---------------------------------------------------------------------------

/// Color-scale and labeling parameters for one statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    /// Property the color mapper reads from each feature (TMAX/TMIN).
    pub field: &'static str,
    /// Lower bound of the color-scale domain, °F.
    pub range_min: f64,
    /// Upper bound of the color-scale domain, °F.
    pub range_max: f64,
    /// Numeral format for the color-bar ticks.
    pub tick_format: &'static str,
    /// Legend/selection label.
    pub text: &'static str,
}

impl PlotStyle {
    /// Title rendered above the map.
    pub fn figure_title(&self) -> String {
        format!("{} by California County - 2016 to 2020 (°F)", self.text)
    }
}

/// The two supported statistics and their display parameters. Both share
/// the 0–130 °F domain so switching statistics recolors without rescaling
/// the legend.
pub static PLOT_STYLES: &[(StatKind, PlotStyle)] = &[
    (
        StatKind::Max,
        PlotStyle {
            field: "TMAX",
            range_min: 0.0,
            range_max: 130.0,
            tick_format: "0,0",
            text: "Average Maximum Temperature",
        },
    ),
    (
        StatKind::Min,
        PlotStyle {
            field: "TMIN",
            range_min: 0.0,
            range_max: 130.0,
            tick_format: "0,0",
            text: "Average Minimum Temperature",
        },
    ),
];

/// Fixed lookup: statistic → display parameters.
pub fn style_for(stat: StatKind) -> &'static PlotStyle {
    PLOT_STYLES
        .iter()
        .find(|(kind, _)| *kind == stat)
        .map(|(_, style)| style)
        .unwrap_or(&PLOT_STYLES[0].1)
}

// ---------------------------------------------------------------------------
// Render surface
// ---------------------------------------------------------------------------

/// Where the controller pushes refreshed datasets.
///
/// `publish` delivers the dataset and its styling as one atomic update:
/// implementations must never expose a state where the figure styling and
/// the dataset belong to different selections.
pub trait RenderSurface {
    fn publish(&mut self, dataset: FeatureCollection, style: &'static PlotStyle);
}

/// Minimal figure shell bound to a live dataset handle.
///
/// Stands in for the external plotting library's figure object: constructed
/// once per session, then fed replacement datasets/styles for the rest of
/// its life. The serialized GeoJSON string is the dataset handle's content.
#[derive(Debug)]
pub struct MapFigure {
    dataset_geojson: Option<String>,
    style: &'static PlotStyle,
}

/// Builds a figure shell configured for the given statistic. The shell
/// carries no data until the controller publishes the first dataset.
pub fn make_figure(stat: StatKind) -> MapFigure {
    MapFigure {
        dataset_geojson: None,
        style: style_for(stat),
    }
}

impl MapFigure {
    /// Current dataset handle content, if anything has been published yet.
    pub fn dataset_geojson(&self) -> Option<&str> {
        self.dataset_geojson.as_deref()
    }

    /// Styling currently applied to the figure.
    pub fn style(&self) -> &'static PlotStyle {
        self.style
    }
}

impl RenderSurface for MapFigure {
    fn publish(&mut self, dataset: FeatureCollection, style: &'static PlotStyle) {
        // Dataset and style swap together; the shell persists.
        self.dataset_geojson = Some(payload_string(dataset));
        self.style = style;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
