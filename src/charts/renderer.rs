//! Static Chart Renderer
//! Draws a built chart with plotters for PNG, JPG and SVG export.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. Plot area in the theme's background, with grid and spines per theme
//! 3. Layers in build order (raw series first, smoothing overlay last)
//! 4. Legend in the upper right for the smoothing overlay or bar swatches

use crate::charts::model::{Chart, Layer};
use crate::data::HexColor;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Debug;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported export format '{0}' (use png, jpg or svg)")]
    UnsupportedFormat(String),
    #[error("Failed to prepare output location: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chart drawing failed: {0}")]
    Backend(String),
    #[error("Chart has no drawable axis range")]
    InvalidRange,
}

/// Supported output formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpg,
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Jpg, ExportFormat::Svg];

    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            "svg" => Ok(ExportFormat::Svg),
            _ => Err(ExportError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }
}

fn backend_error<E: Debug>(e: E) -> ExportError {
    ExportError::Backend(format!("{:?}", e))
}

fn rgb(color: HexColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart to `path`, format taken from the extension.
    pub fn render_to_file(chart: &Chart, path: &Path) -> Result<ExportFormat, ExportError> {
        let format = ExportFormat::from_path(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let size = (chart.width, chart.height);
        match format {
            ExportFormat::Svg => std::fs::write(path, Self::render_svg(chart)?)?,
            ExportFormat::Png | ExportFormat::Jpg => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw(&root, chart)?;
            }
        }

        info!(path = %path.display(), format = format.extension(), "Chart exported");
        Ok(format)
    }

    /// Render the chart to an in-memory SVG document.
    pub fn render_svg(chart: &Chart) -> Result<String, ExportError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (chart.width, chart.height))
                .into_drawing_area();
            Self::draw(&root, chart)?;
        }
        Ok(svg)
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &Chart,
    ) -> Result<(), ExportError> {
        let drawable = |r: &std::ops::Range<f64>| {
            r.start.is_finite() && r.end.is_finite() && r.start < r.end
        };
        if !drawable(&chart.x_range) || !drawable(&chart.y_range) {
            return Err(ExportError::InvalidRange);
        }

        let theme = &chart.theme;
        let axis_color = rgb(theme.axis_color);

        root.fill(&rgb(theme.background)).map_err(backend_error)?;

        let mut ctx = ChartBuilder::on(root)
            .margin(16)
            .caption(&chart.title, (FONT, 22))
            .x_label_area_size(if chart.x_label.is_empty() { 36 } else { 52 })
            .y_label_area_size(if chart.y_label.is_empty() { 56 } else { 72 })
            .build_cartesian_2d(chart.x_range.clone(), chart.y_range.clone())
            .map_err(backend_error)?;

        ctx.plotting_area()
            .fill(&rgb(theme.plot_background))
            .map_err(backend_error)?;

        let tick_formatter = |x: &f64| chart.tick_label_at(*x);
        let value_formatter = |v: &f64| format!("{:.2}", v);

        {
            let mut mesh = ctx.configure_mesh();
            mesh.axis_style(ShapeStyle::from(&axis_color).stroke_width(1))
                .label_style((FONT, 12).into_font().color(&axis_color))
                .axis_desc_style((FONT, chart.axis_label_size).into_font().color(&axis_color))
                .y_labels(8)
                .y_label_formatter(&value_formatter)
                .light_line_style(&WHITE.mix(0.0));

            if let Some(ticks) = &chart.x_ticks {
                // one label slot per index
                mesh.x_labels(ticks.len() + 1)
                    .x_label_formatter(&tick_formatter);
            } else {
                mesh.x_label_formatter(&value_formatter);
            }

            match theme.grid {
                Some(grid) => {
                    let alpha = if grid.dashed { 0.6 } else { 1.0 };
                    mesh.bold_line_style(&rgb(grid.color).mix(alpha));
                    if !grid.vertical {
                        mesh.disable_x_mesh();
                    }
                }
                None => {
                    mesh.disable_mesh();
                }
            }

            if !chart.x_label.is_empty() {
                mesh.x_desc(chart.x_label.as_str());
            }
            if !chart.y_label.is_empty() {
                mesh.y_desc(chart.y_label.as_str());
            }
            mesh.draw().map_err(backend_error)?;
        }

        for layer in &chart.layers {
            Self::draw_layer(&mut ctx, layer, &axis_color)?;
        }

        if theme.box_spines {
            let (x0, x1) = (chart.x_range.start, chart.x_range.end);
            let (y0, y1) = (chart.y_range.start, chart.y_range.end);
            ctx.draw_series(std::iter::once(PathElement::new(
                vec![(x0, y1), (x1, y1), (x1, y0)],
                axis_color.stroke_width(1),
            )))
            .map_err(backend_error)?;
        }

        if chart.has_legend() {
            ctx.configure_series_labels()
                .border_style(&axis_color)
                .background_style(&WHITE.mix(0.85))
                .position(SeriesLabelPosition::UpperRight)
                .label_font((FONT, 13))
                .draw()
                .map_err(backend_error)?;
        }

        root.present().map_err(backend_error)?;
        Ok(())
    }

    fn draw_layer<DB: DrawingBackend>(
        ctx: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
        layer: &Layer,
        axis_color: &RGBColor,
    ) -> Result<(), ExportError> {
        match layer {
            Layer::Line {
                points,
                color,
                dashed,
                legend,
            } => {
                let color = rgb(*color);
                let style = color.stroke_width(2);
                let anno = if *dashed {
                    ctx.draw_series(DashedLineSeries::new(points.iter().copied(), 8, 5, style))
                        .map_err(backend_error)?
                } else {
                    ctx.draw_series(LineSeries::new(points.iter().copied(), style))
                        .map_err(backend_error)?
                };
                if let Some(text) = legend {
                    anno.label(text.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
            Layer::Markers(markers) => {
                ctx.draw_series(
                    markers
                        .iter()
                        .map(|m| Circle::new((m.x, m.y), 4, rgb(m.color).filled())),
                )
                .map_err(backend_error)?;
            }
            Layer::Bars(bars) => {
                // one series per bar so each can carry its own swatch
                for b in bars {
                    let half = b.width / 2.0;
                    let color = rgb(b.color);
                    let anno = ctx
                        .draw_series(std::iter::once(Rectangle::new(
                            [(b.x - half, b.height.min(0.0)), (b.x + half, b.height.max(0.0))],
                            color.filled(),
                        )))
                        .map_err(backend_error)?;
                    if let Some(text) = &b.legend {
                        anno.label(text.as_str()).legend(move |(x, y)| {
                            Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
                        });
                    }
                }
            }
            Layer::Area {
                points,
                fill,
                outline,
            } => {
                ctx.draw_series(
                    AreaSeries::new(points.iter().copied(), 0.0, rgb(*fill).mix(0.8).filled())
                        .border_style(rgb(*outline).stroke_width(2)),
                )
                .map_err(backend_error)?;
            }
            Layer::Histogram { bins, color } => {
                let fill = rgb(*color);
                ctx.draw_series(bins.iter().map(|b| {
                    Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], fill.filled())
                }))
                .map_err(backend_error)?;
                ctx.draw_series(bins.iter().map(|b| {
                    Rectangle::new(
                        [(b.start, 0.0), (b.end, b.count as f64)],
                        WHITE.stroke_width(1),
                    )
                }))
                .map_err(backend_error)?;
            }
            Layer::Box {
                x,
                width,
                stats,
                color,
            } => {
                let half = width / 2.0;
                let cap = width / 4.0;
                let edge = axis_color.stroke_width(1);
                let body = [(x - half, stats.q1), (x + half, stats.q3)];
                ctx.draw_series([
                    Rectangle::new(body, rgb(*color).mix(0.7).filled()),
                    Rectangle::new(body, edge),
                ])
                .map_err(backend_error)?;

                let segment = |x0: f64, y0: f64, x1: f64, y1: f64, style: ShapeStyle| {
                    PathElement::new(vec![(x0, y0), (x1, y1)], style)
                };
                ctx.draw_series([
                    segment(x - half, stats.median, x + half, stats.median, axis_color.stroke_width(2)),
                    segment(*x, stats.q1, *x, stats.whisker_low, edge),
                    segment(*x, stats.q3, *x, stats.whisker_high, edge),
                    segment(x - cap, stats.whisker_low, x + cap, stats.whisker_low, edge),
                    segment(x - cap, stats.whisker_high, x + cap, stats.whisker_high, edge),
                ])
                .map_err(backend_error)?;
                ctx.draw_series(
                    stats
                        .outliers
                        .iter()
                        .map(|&v| Circle::new((*x, v), 4, axis_color.stroke_width(1))),
                )
                .map_err(backend_error)?;
            }
            Layer::Labels(labels) => {
                let font = (FONT, 12).into_font().color(axis_color);
                ctx.draw_series(labels.iter().map(|l| {
                    let (anchor, dy) = if l.below {
                        (VPos::Top, 4)
                    } else {
                        (VPos::Bottom, -4)
                    };
                    EmptyElement::at((l.x, l.y))
                        + Text::new(
                            l.text.clone(),
                            (0, dy),
                            font.clone().pos(Pos::new(HPos::Center, anchor)),
                        )
                }))
                .map_err(backend_error)?;
            }
        }
        Ok(())
    }
}
