//! Chart Options Module
//! Chart kinds, display options and style themes.

use crate::data::HexColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which chart to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Scatter,
    Area,
    Histogram,
    BoxPlot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Area,
        ChartKind::Histogram,
        ChartKind::BoxPlot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
            ChartKind::Scatter => "Scatter",
            ChartKind::Area => "Area",
            ChartKind::Histogram => "Histogram",
            ChartKind::BoxPlot => "BoxPlot",
        }
    }

    /// Kinds drawn over index categories (one x slot per point).
    pub fn is_categorical(self) -> bool {
        matches!(
            self,
            ChartKind::Line | ChartKind::Bar | ChartKind::Scatter | ChartKind::Area
        )
    }

    /// Only Line and Area get the smoothing overlay.
    pub fn supports_smoothing(self) -> bool {
        matches!(self, ChartKind::Line | ChartKind::Area)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StyleTheme {
    #[default]
    Default,
    WhiteGrid,
    DarkGrid,
    Ticks,
    Minimal,
}

/// Grid line appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub color: HexColor,
    pub dashed: bool,
    /// Draw vertical grid lines as well as horizontal ones.
    pub vertical: bool,
}

/// Resolved visual defaults of a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSpec {
    pub background: HexColor,
    pub plot_background: HexColor,
    pub grid: Option<GridStyle>,
    /// Top and right spines; left and bottom are always drawn.
    pub box_spines: bool,
    pub axis_color: HexColor,
}

impl StyleTheme {
    pub const ALL: [StyleTheme; 5] = [
        StyleTheme::Default,
        StyleTheme::WhiteGrid,
        StyleTheme::DarkGrid,
        StyleTheme::Ticks,
        StyleTheme::Minimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleTheme::Default => "Default",
            StyleTheme::WhiteGrid => "White Grid",
            StyleTheme::DarkGrid => "Dark Grid",
            StyleTheme::Ticks => "Ticks",
            StyleTheme::Minimal => "Minimal",
        }
    }

    pub fn spec(self) -> ThemeSpec {
        let white = HexColor::WHITE;
        let dark_axis = HexColor::new(51, 51, 51);
        match self {
            StyleTheme::Default => ThemeSpec {
                background: white,
                plot_background: white,
                grid: Some(GridStyle {
                    color: HexColor::new(224, 224, 224),
                    dashed: true,
                    vertical: true,
                }),
                box_spines: true,
                axis_color: dark_axis,
            },
            StyleTheme::WhiteGrid => ThemeSpec {
                background: white,
                plot_background: white,
                grid: Some(GridStyle {
                    color: HexColor::new(204, 204, 204),
                    dashed: false,
                    vertical: false,
                }),
                box_spines: true,
                axis_color: dark_axis,
            },
            StyleTheme::DarkGrid => ThemeSpec {
                background: white,
                plot_background: HexColor::new(234, 234, 242),
                grid: Some(GridStyle {
                    color: white,
                    dashed: false,
                    vertical: true,
                }),
                box_spines: false,
                axis_color: HexColor::new(120, 120, 120),
            },
            StyleTheme::Ticks => ThemeSpec {
                background: white,
                plot_background: white,
                grid: None,
                box_spines: false,
                axis_color: dark_axis,
            },
            StyleTheme::Minimal => ThemeSpec {
                background: white,
                plot_background: white,
                grid: Some(GridStyle {
                    color: HexColor::new(238, 238, 238),
                    dashed: false,
                    vertical: false,
                }),
                box_spines: false,
                axis_color: HexColor::new(150, 150, 150),
            },
        }
    }
}

impl fmt::Display for StyleTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display options for one render cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub kind: ChartKind,
    /// Pixels.
    pub width: u32,
    pub height: u32,
    /// Gaussian sigma for the smoothing overlay, 0 disables it.
    pub smoothing: f64,
    pub style: StyleTheme,
    /// Fraction of the category slot, in (0, 1].
    pub bar_width: f64,
    pub show_value_labels: bool,
    /// Bar charts only: one swatch per point, labeled with its category.
    #[serde(default = "enabled")]
    pub show_legend: bool,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    /// Font size of the axis captions, in points.
    #[serde(default = "default_axis_label_size")]
    pub axis_label_size: u32,
    /// Fixed lower y bound; computed from the data when unset.
    #[serde(default)]
    pub y_min: Option<f64>,
    /// Fixed upper y bound; computed from the data when unset.
    #[serde(default)]
    pub y_max: Option<f64>,
}

fn default_axis_label_size() -> u32 {
    14
}

fn enabled() -> bool {
    true
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Line,
            width: 800,
            height: 500,
            smoothing: 0.0,
            style: StyleTheme::Default,
            bar_width: 0.8,
            show_value_labels: false,
            show_legend: true,
            x_label: String::new(),
            y_label: String::new(),
            axis_label_size: default_axis_label_size(),
            y_min: None,
            y_max: None,
        }
    }
}
