//! Charts module - Chart construction and rendering

mod builder;
mod kinds;
mod model;
mod options;
mod plotter;
mod renderer;

pub use builder::{BuildError, ChartBuilder, RenderOutcome};
pub use model::Chart;
pub use options::{ChartKind, ChartOptions, StyleTheme, ThemeSpec};
pub use plotter::ChartPlotter;
pub use renderer::{ExportFormat, StaticChartRenderer};
