//! Chart Plotter Module
//! Draws built charts interactively using egui_plot.

use crate::charts::model::{Chart, Layer};
use crate::data::HexColor;
use crate::stats::SeriesSummary;
use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, LineStyle, Plot,
    PlotPoint, PlotPoints, Points, Text,
};

/// Converts a parsed hex color for egui.
pub fn color32(color: HexColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Creates interactive chart views using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the chart at its configured size.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &Chart) {
        let theme = &chart.theme;
        let axis_color = color32(theme.axis_color);

        ui.label(RichText::new(&chart.title).size(18.0).strong());
        ui.add_space(6.0);

        let spine = if theme.box_spines {
            Stroke::new(1.0, axis_color)
        } else {
            Stroke::NONE
        };

        egui::Frame::none()
            .fill(color32(theme.plot_background))
            .stroke(spine)
            .show(ui, |ui| {
                let ticks = chart.x_ticks.clone();
                let formatter_chart = chart.clone();
                let x_range = chart.x_range.clone();
                let y_range = chart.y_range.clone();

                let mut plot = Plot::new(format!("chart_{}", chart.kind))
                    .width(chart.width as f32)
                    .height(chart.height as f32)
                    .show_grid(theme.grid.is_some())
                    .show_background(false)
                    .allow_scroll(false)
                    .include_x(x_range.start)
                    .include_x(x_range.end)
                    .include_y(y_range.start)
                    .include_y(y_range.end);

                if chart.has_legend() {
                    plot = plot.legend(Legend::default().position(egui_plot::Corner::RightTop));
                }

                let caption_size = chart.axis_label_size as f32;
                if !chart.x_label.is_empty() {
                    plot = plot.x_axis_label(RichText::new(&chart.x_label).size(caption_size));
                }
                if !chart.y_label.is_empty() {
                    plot = plot.y_axis_label(RichText::new(&chart.y_label).size(caption_size));
                }

                if let Some(ticks) = ticks {
                    // Force one grid mark per category index
                    plot = plot
                        .x_grid_spacer(move |_input| {
                            ticks
                                .iter()
                                .map(|t| GridMark {
                                    value: t.position,
                                    step_size: 1.0,
                                })
                                .collect()
                        })
                        .x_axis_formatter(move |mark, _range| {
                            formatter_chart.tick_label_at(mark.value)
                        });
                }

                plot.show(ui, |plot_ui| {
                    for layer in &chart.layers {
                        Self::draw_layer(plot_ui, layer, axis_color);
                    }
                });
            });
    }

    fn draw_layer(plot_ui: &mut egui_plot::PlotUi, layer: &Layer, axis_color: Color32) {
        match layer {
            Layer::Line {
                points,
                color,
                dashed,
                legend,
            } => {
                let pts: PlotPoints = points.iter().map(|&(x, y)| [x, y]).collect();
                let mut line = Line::new(pts).color(color32(*color)).width(2.0);
                if *dashed {
                    line = line.style(LineStyle::dashed_loose());
                }
                if let Some(name) = legend {
                    line = line.name(name);
                }
                plot_ui.line(line);
            }
            Layer::Markers(markers) => {
                // egui_plot colors a Points item as a whole
                for m in markers {
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter([[m.x, m.y]]))
                            .radius(4.0)
                            .color(color32(m.color)),
                    );
                }
            }
            Layer::Bars(bars) => {
                // a chart per bar gives every swatch its own legend row
                for b in bars {
                    let bar = Bar::new(b.x, b.height)
                        .width(b.width)
                        .fill(color32(b.color))
                        .stroke(Stroke::NONE);
                    let mut chart = BarChart::new(vec![bar]).color(color32(b.color));
                    if let Some(name) = &b.legend {
                        chart = chart.name(name);
                    }
                    plot_ui.bar_chart(chart);
                }
            }
            Layer::Area {
                points,
                fill,
                outline,
            } => {
                let fill_pts: PlotPoints = points.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(
                    Line::new(fill_pts)
                        .color(color32(*fill))
                        .fill(0.0)
                        .width(0.0),
                );
                let outline_pts: PlotPoints = points.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.line(Line::new(outline_pts).color(color32(*outline)).width(2.0));
            }
            Layer::Histogram { bins, color } => {
                let bars = bins
                    .iter()
                    .map(|b| {
                        Bar::new((b.start + b.end) / 2.0, b.count as f64)
                            .width(b.end - b.start)
                            .fill(color32(*color))
                            .stroke(Stroke::new(1.0, Color32::WHITE))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            }
            Layer::Box {
                x,
                width,
                stats,
                color,
            } => {
                let color = color32(*color);
                let elem = BoxElem::new(
                    *x,
                    BoxSpread::new(
                        stats.whisker_low,
                        stats.q1,
                        stats.median,
                        stats.q3,
                        stats.whisker_high,
                    ),
                )
                .box_width(*width)
                .whisker_width(width / 2.0)
                .fill(color.gamma_multiply(0.7))
                .stroke(Stroke::new(1.5, axis_color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]));

                if !stats.outliers.is_empty() {
                    let outliers: PlotPoints = stats.outliers.iter().map(|&v| [*x, v]).collect();
                    plot_ui.points(
                        Points::new(outliers)
                            .radius(4.0)
                            .filled(false)
                            .color(axis_color),
                    );
                }
            }
            Layer::Labels(labels) => {
                for l in labels {
                    let anchor = if l.below {
                        Align2::CENTER_TOP
                    } else {
                        Align2::CENTER_BOTTOM
                    };
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(l.x, l.y),
                            RichText::new(&l.text).size(12.0),
                        )
                        .anchor(anchor)
                        .color(axis_color),
                    );
                }
            }
        }
    }

    /// Empty frame of the configured size shown when there is nothing to plot.
    pub fn draw_placeholder(ui: &mut egui::Ui, width: u32, height: u32) {
        let size = egui::vec2(width as f32, height as f32);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        ui.painter().rect(
            rect,
            4.0,
            ui.visuals().extreme_bg_color,
            Stroke::new(1.0, Color32::GRAY),
        );
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            format!("Enter values to plot ({} x {})", width, height),
            egui::FontId::proportional(16.0),
            Color32::GRAY,
        );
    }

    /// Draw series statistics table
    pub fn draw_summary_table(ui: &mut egui::Ui, summary: &SeriesSummary) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("series_summary")
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["N", "Mean", "Median", "Std", "Min", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        ui.label(RichText::new(summary.count.to_string()).size(11.0));
                        for v in [
                            summary.mean,
                            summary.median,
                            summary.std,
                            summary.min,
                            summary.max,
                        ] {
                            ui.label(RichText::new(format!("{:.3}", v)).size(11.0));
                        }
                        ui.end_row();
                    });
            });
    }
}
