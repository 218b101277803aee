//! Chart Kind Handlers
//! One renderer per chart kind, each turning a series into drawable layers.

use crate::charts::model::{BarShape, Layer, Marker, TextLabel, OVERLAY_COLOR};
use crate::charts::{BuildError, ChartKind, ChartOptions};
use crate::data::{HexColor, Series};
use crate::stats::StatsCalculator;

/// Box width as a fraction of the single category slot.
const BOX_WIDTH: f64 = 0.5;

/// Common contract of every chart kind.
pub trait KindRenderer {
    fn render(&self, series: &Series, options: &ChartOptions) -> Result<Vec<Layer>, BuildError>;
}

pub struct LineChart;
pub struct BarChart;
pub struct ScatterChart;
pub struct AreaChart;
pub struct HistogramChart;
pub struct BoxPlotChart;

impl ChartKind {
    pub fn renderer(self) -> &'static dyn KindRenderer {
        match self {
            ChartKind::Line => &LineChart,
            ChartKind::Bar => &BarChart,
            ChartKind::Scatter => &ScatterChart,
            ChartKind::Area => &AreaChart,
            ChartKind::Histogram => &HistogramChart,
            ChartKind::BoxPlot => &BoxPlotChart,
        }
    }
}

fn parse_color(series: &Series, index: usize) -> Result<HexColor, BuildError> {
    let text = series
        .points
        .get(index)
        .map(|p| p.color.as_str())
        .ok_or(BuildError::EmptySeries)?;
    HexColor::parse(text).ok_or_else(|| BuildError::InvalidColor {
        index,
        value: text.to_string(),
    })
}

fn point_colors(series: &Series) -> Result<Vec<HexColor>, BuildError> {
    (0..series.len()).map(|i| parse_color(series, i)).collect()
}

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// Dashed Gaussian-smoothed line, present only for a positive sigma.
fn smoothing_overlay(series: &Series, sigma: f64) -> Option<Layer> {
    if sigma <= 0.0 {
        return None;
    }

    let smoothed = StatsCalculator::gaussian_smooth(&series.values(), sigma);
    Some(Layer::Line {
        points: indexed(&smoothed),
        color: OVERLAY_COLOR,
        dashed: true,
        legend: Some(format!("Smoothed (σ={:.1})", sigma)),
    })
}

impl KindRenderer for LineChart {
    fn render(&self, series: &Series, options: &ChartOptions) -> Result<Vec<Layer>, BuildError> {
        let colors = point_colors(series)?;
        let line_color = colors.first().copied().ok_or(BuildError::EmptySeries)?;
        let values = series.values();

        let mut layers = vec![
            Layer::Line {
                points: indexed(&values),
                color: line_color,
                dashed: false,
                legend: None,
            },
            Layer::Markers(
                values
                    .iter()
                    .zip(&colors)
                    .enumerate()
                    .map(|(i, (&y, &color))| Marker {
                        x: i as f64,
                        y,
                        color,
                    })
                    .collect(),
            ),
        ];
        layers.extend(smoothing_overlay(series, options.smoothing));
        Ok(layers)
    }
}

impl KindRenderer for BarChart {
    fn render(&self, series: &Series, options: &ChartOptions) -> Result<Vec<Layer>, BuildError> {
        let colors = point_colors(series)?;

        let bars = series
            .points
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(i, (p, color))| BarShape {
                x: i as f64,
                height: p.value,
                width: options.bar_width,
                color,
                legend: options.show_legend.then(|| p.label.clone()),
            })
            .collect();
        let mut layers = vec![Layer::Bars(bars)];

        if options.show_value_labels {
            let labels = series
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| TextLabel {
                    x: i as f64,
                    y: p.value,
                    text: format!("{:.1}", p.value),
                    below: p.value < 0.0,
                })
                .collect();
            layers.push(Layer::Labels(labels));
        }

        Ok(layers)
    }
}

impl KindRenderer for ScatterChart {
    fn render(&self, series: &Series, _options: &ChartOptions) -> Result<Vec<Layer>, BuildError> {
        let colors = point_colors(series)?;
        let markers = series
            .points
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(i, (p, color))| Marker {
                x: i as f64,
                y: p.value,
                color,
            })
            .collect();
        Ok(vec![Layer::Markers(markers)])
    }
}

impl KindRenderer for AreaChart {
    fn render(&self, series: &Series, options: &ChartOptions) -> Result<Vec<Layer>, BuildError> {
        let mut layers = vec![Layer::Area {
            points: indexed(&series.values()),
            fill: parse_color(series, 0)?,
            outline: HexColor::WHITE,
        }];
        layers.extend(smoothing_overlay(series, options.smoothing));
        Ok(layers)
    }
}

impl KindRenderer for HistogramChart {
    fn render(&self, series: &Series, _options: &ChartOptions) -> Result<Vec<Layer>, BuildError> {
        let values = series.values();
        let bins = StatsCalculator::histogram(
            &values,
            StatsCalculator::histogram_bin_count(values.len()),
        );
        Ok(vec![Layer::Histogram {
            bins,
            color: parse_color(series, 0)?,
        }])
    }
}

impl KindRenderer for BoxPlotChart {
    fn render(&self, series: &Series, _options: &ChartOptions) -> Result<Vec<Layer>, BuildError> {
        let stats = StatsCalculator::box_stats(&series.values()).ok_or(BuildError::EmptySeries)?;
        Ok(vec![Layer::Box {
            x: 1.0,
            width: BOX_WIDTH,
            stats,
            color: parse_color(series, 0)?,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Series {
        Series::assemble(values, &[], &[])
    }

    fn options(kind: ChartKind) -> ChartOptions {
        ChartOptions {
            kind,
            ..ChartOptions::default()
        }
    }

    #[test]
    fn line_has_line_and_markers() {
        let layers = LineChart
            .render(&series(&[1.0, 2.0, 3.0]), &options(ChartKind::Line))
            .unwrap();
        assert_eq!(layers.len(), 2);
        match &layers[1] {
            Layer::Markers(markers) => {
                assert_eq!(markers.len(), 3);
                assert_eq!(markers[1].color, HexColor::new(0x33, 0xFF, 0x57));
            }
            other => panic!("expected markers, got {:?}", other),
        }
    }

    #[test]
    fn line_overlay_legend_encodes_sigma() {
        let mut opts = options(ChartKind::Line);
        opts.smoothing = 2.0;
        let layers = LineChart.render(&series(&[1.0, 4.0, 2.0, 8.0]), &opts).unwrap();
        let overlay = layers.last().unwrap();
        assert_eq!(overlay.legend(), Some("Smoothed (σ=2.0)"));
        assert!(matches!(
            overlay,
            Layer::Line {
                dashed: true,
                color: OVERLAY_COLOR,
                ..
            }
        ));
    }

    #[test]
    fn bar_labels_have_one_decimal() {
        let mut opts = options(ChartKind::Bar);
        opts.show_value_labels = true;
        opts.bar_width = 0.5;
        let layers = BarChart.render(&series(&[1.0, 2.24, -3.0]), &opts).unwrap();

        match &layers[0] {
            Layer::Bars(bars) => assert!(bars.iter().all(|b| b.width == 0.5)),
            other => panic!("expected bars, got {:?}", other),
        }
        match &layers[1] {
            Layer::Labels(labels) => {
                let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
                assert_eq!(texts, vec!["1.0", "2.2", "-3.0"]);
                assert!(labels[2].below);
            }
            other => panic!("expected labels, got {:?}", other),
        }
    }

    #[test]
    fn bar_legend_pairs_labels_with_colors() {
        let s = Series::assemble(
            &[3.0, 4.0],
            &["North".to_string(), "South".to_string()],
            &["#112233".to_string()],
        );
        let layers = BarChart.render(&s, &options(ChartKind::Bar)).unwrap();
        match &layers[0] {
            Layer::Bars(bars) => {
                let entries: Vec<(Option<&str>, String)> = bars
                    .iter()
                    .map(|b| (b.legend.as_deref(), b.color.to_string()))
                    .collect();
                assert_eq!(
                    entries,
                    vec![
                        (Some("North"), "#112233".to_string()),
                        (Some("South"), "#33FF57".to_string()),
                    ]
                );
            }
            other => panic!("expected bars, got {:?}", other),
        }

        let mut opts = options(ChartKind::Bar);
        opts.show_legend = false;
        match &BarChart.render(&s, &opts).unwrap()[0] {
            Layer::Bars(bars) => assert!(bars.iter().all(|b| b.legend.is_none())),
            other => panic!("expected bars, got {:?}", other),
        }
    }

    #[test]
    fn bar_without_labels_is_single_layer() {
        let layers = BarChart
            .render(&series(&[1.0]), &options(ChartKind::Bar))
            .unwrap();
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn area_uses_first_color_and_white_outline() {
        let s = Series::assemble(&[1.0, 2.0], &[], &["#010203".to_string()]);
        let layers = AreaChart.render(&s, &options(ChartKind::Area)).unwrap();
        assert_eq!(
            layers[0],
            Layer::Area {
                points: vec![(0.0, 1.0), (1.0, 2.0)],
                fill: HexColor::new(1, 2, 3),
                outline: HexColor::WHITE,
            }
        );
    }

    #[test]
    fn invalid_color_is_reported_with_index() {
        let s = Series::assemble(&[1.0, 2.0], &[], &["#000".to_string(), "blue".to_string()]);
        let err = ScatterChart.render(&s, &options(ChartKind::Scatter)).unwrap_err();
        assert!(matches!(err, BuildError::InvalidColor { index: 1, .. }));
    }

    #[test]
    fn histogram_bins_match_length() {
        let layers = HistogramChart
            .render(&series(&[1.0, 2.0, 2.0, 5.0]), &options(ChartKind::Histogram))
            .unwrap();
        match &layers[0] {
            Layer::Histogram { bins, .. } => assert_eq!(bins.len(), 4),
            other => panic!("expected histogram, got {:?}", other),
        }
    }

    #[test]
    fn renderer_dispatch_matches_kind() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        let layers = ChartKind::BoxPlot
            .renderer()
            .render(&s, &options(ChartKind::BoxPlot))
            .unwrap();
        match &layers[0] {
            Layer::Box { stats, .. } => assert_eq!(stats.outliers, vec![100.0]),
            other => panic!("expected box, got {:?}", other),
        }
    }
}
