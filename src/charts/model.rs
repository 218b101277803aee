//! Chart Model Module
//! Backend-neutral chart description drawn by both the interactive and static renderers.

use crate::charts::{ChartKind, ThemeSpec};
use crate::data::HexColor;
use crate::stats::{BoxStats, HistogramBin};
use std::ops::Range;

/// Color of the smoothing overlay line.
pub const OVERLAY_COLOR: HexColor = HexColor::new(231, 76, 60);

/// One x-axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub color: HexColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarShape {
    /// Center of the bar.
    pub x: f64,
    pub height: f64,
    pub width: f64,
    pub color: HexColor,
    /// Legend swatch text for this bar.
    pub legend: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
    /// Anchor the text below `y` instead of above it.
    pub below: bool,
}

/// A drawable element of a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Line {
        points: Vec<(f64, f64)>,
        color: HexColor,
        dashed: bool,
        legend: Option<String>,
    },
    Markers(Vec<Marker>),
    Bars(Vec<BarShape>),
    Area {
        points: Vec<(f64, f64)>,
        fill: HexColor,
        outline: HexColor,
    },
    Histogram {
        bins: Vec<HistogramBin>,
        color: HexColor,
    },
    Box {
        x: f64,
        width: f64,
        stats: BoxStats,
        color: HexColor,
    },
    Labels(Vec<TextLabel>),
}

impl Layer {
    /// Vertical extent covered by this layer.
    fn y_extent(&self) -> Option<(f64, f64)> {
        match self {
            Layer::Line { points, .. } => min_max(points.iter().map(|p| p.1)),
            Layer::Markers(markers) => min_max(markers.iter().map(|m| m.y)),
            Layer::Bars(bars) => min_max(bars.iter().map(|b| b.height).chain([0.0])),
            Layer::Area { points, .. } => min_max(points.iter().map(|p| p.1).chain([0.0])),
            Layer::Histogram { bins, .. } => {
                min_max(bins.iter().map(|b| b.count as f64).chain([0.0]))
            }
            Layer::Box { stats, .. } => Some((stats.min, stats.max)),
            Layer::Labels(labels) => min_max(labels.iter().map(|l| l.y)),
        }
    }

    /// Horizontal extent for layers not placed on index slots.
    fn x_extent(&self) -> Option<(f64, f64)> {
        match self {
            Layer::Histogram { bins, .. } => {
                Some((bins.first()?.start, bins.last()?.end))
            }
            Layer::Box { x, width, .. } => Some((x - width, x + width)),
            _ => None,
        }
    }

    pub fn legend(&self) -> Option<&str> {
        match self {
            Layer::Line { legend, .. } => legend.as_deref(),
            _ => None,
        }
    }
}

/// Complete chart produced by one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
    pub theme: ThemeSpec,
    pub layers: Vec<Layer>,
    /// Category ticks for index-based kinds.
    pub x_ticks: Option<Vec<Tick>>,
    pub x_label: String,
    pub y_label: String,
    pub axis_label_size: u32,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl Chart {
    #[cfg(test)]
    pub fn has_overlay(&self) -> bool {
        self.layers
            .iter()
            .any(|l| matches!(l, Layer::Line { dashed: true, .. }))
    }

    /// True when any layer contributes a legend entry.
    pub fn has_legend(&self) -> bool {
        self.layers.iter().any(|l| match l {
            Layer::Bars(bars) => bars.iter().any(|b| b.legend.is_some()),
            other => other.legend().is_some(),
        })
    }

    #[cfg(test)]
    pub fn tick_labels(&self) -> Vec<&str> {
        self.x_ticks
            .iter()
            .flatten()
            .map(|t| t.label.as_str())
            .collect()
    }

    /// Label shown at an x position, empty between ticks.
    pub fn tick_label_at(&self, x: f64) -> String {
        self.x_ticks
            .iter()
            .flatten()
            .find(|t| (t.position - x).abs() < 1e-6)
            .map(|t| t.label.clone())
            .unwrap_or_default()
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    })
}

/// X range: index slots for categorical kinds, otherwise the union of layer extents.
pub(crate) fn x_range(kind: ChartKind, points: usize, layers: &[Layer]) -> Range<f64> {
    if kind.is_categorical() {
        return -0.5..(points.max(1) as f64 - 0.5);
    }

    let (lo, hi) = layers
        .iter()
        .filter_map(Layer::x_extent)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    if lo.is_finite() && hi > lo {
        lo..hi
    } else {
        0.0..1.0
    }
}

/// Y range covering every layer with padding, widened when flat.
/// Fixed bounds replace the computed ends; the result may be empty or non-finite.
pub(crate) fn y_range(layers: &[Layer], y_min: Option<f64>, y_max: Option<f64>) -> Range<f64> {
    let auto = data_y_range(layers);
    y_min.unwrap_or(auto.start)..y_max.unwrap_or(auto.end)
}

fn data_y_range(layers: &[Layer]) -> Range<f64> {
    let (mut lo, mut hi) = layers
        .iter()
        .filter_map(Layer::y_extent)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }

    // value labels need room above the tallest bar
    let headroom = if layers.iter().any(|l| matches!(l, Layer::Labels(_))) {
        0.12
    } else {
        0.05
    };
    let pad = (hi - lo) * headroom;
    // bars and areas sit on zero without a gap
    let lo = if lo == 0.0 { 0.0 } else { lo - pad };
    let hi = if hi == 0.0 { 0.0 } else { hi + pad };
    lo..hi
}
