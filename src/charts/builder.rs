//! Chart Builder Module
//! Validates options, dispatches on chart kind and assembles the chart artifact.

use crate::charts::model::{self, Chart, Tick};
use crate::charts::ChartOptions;
use crate::data::{InputDocument, ParseWarning, Series};
use crate::stats::{SeriesSummary, StatsCalculator, MAX_SMOOTHING_SIGMA};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("No data to plot")]
    EmptySeries,
    #[error("Value #{} is not a finite number", .index + 1)]
    NonFiniteValue { index: usize },
    #[error("Invalid color '{value}' for point #{}", .index + 1)]
    InvalidColor { index: usize, value: String },
    #[error("Invalid option {name}: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("Values span too wide a range to plot")]
    RangeOverflow,
}

/// Result of one full render cycle over the input document.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Nothing parsed; show a placeholder of the configured size.
    NoData { width: u32, height: u32 },
    Ready {
        chart: Chart,
        summary: SeriesSummary,
        warnings: Vec<ParseWarning>,
    },
    Failed {
        error: BuildError,
        warnings: Vec<ParseWarning>,
    },
}

impl RenderOutcome {
    pub fn chart(&self) -> Option<&Chart> {
        match self {
            RenderOutcome::Ready { chart, .. } => Some(chart),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&SeriesSummary> {
        match self {
            RenderOutcome::Ready { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        match self {
            RenderOutcome::Ready { warnings, .. } | RenderOutcome::Failed { warnings, .. } => {
                warnings
            }
            RenderOutcome::NoData { .. } => &[],
        }
    }
}

/// Stateless builder from (series, options) to a chart.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Parse the document once, assemble the series and build its chart.
    pub fn render_cycle(doc: &InputDocument) -> RenderOutcome {
        let parsed = doc.parse();
        let options = &doc.options;

        for w in &parsed.values.warnings {
            warn!("Skipped value {}", w);
        }

        if parsed.values.is_empty() {
            return RenderOutcome::NoData {
                width: options.width,
                height: options.height,
            };
        }

        let series = Series::assemble(&parsed.values.values, &parsed.labels, &parsed.colors);
        let warnings = parsed.values.warnings;

        let built = Self::build(&series, options).and_then(|chart| {
            StatsCalculator::summarize(&parsed.values.values)
                .map(|summary| (chart, summary))
                .ok_or(BuildError::EmptySeries)
        });

        match built {
            Ok((chart, summary)) => RenderOutcome::Ready {
                chart,
                summary,
                warnings,
            },
            Err(error) => {
                warn!(kind = %options.kind, "Chart build failed: {}", error);
                RenderOutcome::Failed { error, warnings }
            }
        }
    }

    pub fn build(series: &Series, options: &ChartOptions) -> Result<Chart, BuildError> {
        Self::validate(series, options)?;
        debug!(kind = %options.kind, points = series.len(), "Building chart");

        let layers = options.kind.renderer().render(series, options)?;

        let x_ticks = options.kind.is_categorical().then(|| Self::ticks(series));
        let x_range = model::x_range(options.kind, series.len(), &layers);
        let y_range = model::y_range(&layers, options.y_min, options.y_max);
        let finite = |r: &std::ops::Range<f64>| r.start.is_finite() && r.end.is_finite();
        if !finite(&x_range) || !finite(&y_range) {
            return Err(BuildError::RangeOverflow);
        }
        if y_range.start >= y_range.end {
            return Err(BuildError::InvalidOption {
                name: "y bounds",
                reason: format!("{}..{} is empty", y_range.start, y_range.end),
            });
        }

        Ok(Chart {
            title: format!("{} - BenchGraph", options.kind),
            kind: options.kind,
            width: options.width,
            height: options.height,
            theme: options.style.spec(),
            layers,
            x_ticks,
            x_label: options.x_label.trim().to_string(),
            y_label: options.y_label.trim().to_string(),
            axis_label_size: options.axis_label_size,
            x_range,
            y_range,
        })
    }

    /// One tick per index, labeled only when every point has a user label.
    fn ticks(series: &Series) -> Vec<Tick> {
        let labels = series.tick_labels();
        (0..series.len())
            .map(|i| Tick {
                position: i as f64,
                label: labels
                    .as_ref()
                    .map_or_else(|| i.to_string(), |l| l[i].clone()),
            })
            .collect()
    }

    fn validate(series: &Series, options: &ChartOptions) -> Result<(), BuildError> {
        if series.is_empty() {
            return Err(BuildError::EmptySeries);
        }
        if let Some(index) = series.points.iter().position(|p| !p.value.is_finite()) {
            return Err(BuildError::NonFiniteValue { index });
        }
        let (lo, hi) = series
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.value), hi.max(p.value))
            });
        if !(hi - lo).is_finite() {
            return Err(BuildError::RangeOverflow);
        }
        if options.width == 0 || options.height == 0 {
            return Err(BuildError::InvalidOption {
                name: "size",
                reason: format!("{}x{} has a zero side", options.width, options.height),
            });
        }
        if !(options.bar_width > 0.0 && options.bar_width <= 1.0) {
            return Err(BuildError::InvalidOption {
                name: "bar_width",
                reason: format!("{} is outside (0, 1]", options.bar_width),
            });
        }
        if !(0.0..=MAX_SMOOTHING_SIGMA).contains(&options.smoothing) {
            return Err(BuildError::InvalidOption {
                name: "smoothing",
                reason: format!(
                    "{} is outside [0, {}]",
                    options.smoothing, MAX_SMOOTHING_SIGMA
                ),
            });
        }
        if options.axis_label_size == 0 {
            return Err(BuildError::InvalidOption {
                name: "axis_label_size",
                reason: "must be at least 1".to_string(),
            });
        }
        for (name, bound) in [("y_min", options.y_min), ("y_max", options.y_max)] {
            if bound.is_some_and(|v| !v.is_finite()) {
                return Err(BuildError::InvalidOption {
                    name,
                    reason: "must be a finite number".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::model::Layer;
    use crate::charts::{ChartKind, StyleTheme};

    fn doc(values: &str, labels: &str, colors: &str, kind: ChartKind) -> InputDocument {
        InputDocument::new(
            values,
            labels,
            colors,
            ChartOptions {
                kind,
                ..ChartOptions::default()
            },
        )
    }

    fn ready(outcome: RenderOutcome) -> Chart {
        match outcome {
            RenderOutcome::Ready { chart, .. } => chart,
            other => panic!("expected a chart, got {:?}", other),
        }
    }

    #[test]
    fn bar_scenario_with_labels() {
        let chart = ready(ChartBuilder::render_cycle(&doc(
            "1\n2\n3",
            "A\nB\nC",
            "",
            ChartKind::Bar,
        )));

        assert_eq!(chart.title, "Bar - BenchGraph");
        assert_eq!(chart.tick_labels(), vec!["A", "B", "C"]);
        match &chart.layers[0] {
            Layer::Bars(bars) => {
                let heights: Vec<f64> = bars.iter().map(|b| b.height).collect();
                let colors: Vec<String> = bars.iter().map(|b| b.color.to_string()).collect();
                assert_eq!(heights, vec![1.0, 2.0, 3.0]);
                assert_eq!(colors, vec!["#FF5733", "#33FF57", "#3357FF"]);
            }
            other => panic!("expected bars, got {:?}", other),
        }
    }

    #[test]
    fn mismatched_labels_fall_back_to_indices() {
        for labels in ["A\nB", "A\nB\nC\nD"] {
            let chart = ready(ChartBuilder::render_cycle(&doc(
                "1\n2\n3",
                labels,
                "",
                ChartKind::Line,
            )));
            assert_eq!(chart.tick_labels(), vec!["0", "1", "2"]);
        }
    }

    #[test]
    fn skipped_lines_surface_as_warnings() {
        let outcome = ChartBuilder::render_cycle(&doc("1\nabc\n3", "", "", ChartKind::Scatter));
        assert_eq!(outcome.warnings().len(), 1);
        let chart = ready(outcome);
        match &chart.layers[0] {
            Layer::Markers(markers) => assert_eq!(markers.len(), 2),
            other => panic!("expected markers, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_no_data_with_configured_size() {
        let mut d = doc("", "A", "", ChartKind::Line);
        d.options.width = 640;
        d.options.height = 360;
        assert_eq!(
            ChartBuilder::render_cycle(&d),
            RenderOutcome::NoData {
                width: 640,
                height: 360
            }
        );

        let only_text = doc("abc\n\nxyz", "", "", ChartKind::Bar);
        assert!(matches!(
            ChartBuilder::render_cycle(&only_text),
            RenderOutcome::NoData { .. }
        ));
    }

    #[test]
    fn smoothing_only_overlays_line_and_area() {
        for kind in ChartKind::ALL {
            let mut d = doc("1\n5\n2\n8\n3", "", "", kind);
            d.options.smoothing = 1.5;
            let chart = ready(ChartBuilder::render_cycle(&d));
            assert_eq!(chart.has_overlay(), kind.supports_smoothing(), "{}", kind);

            d.options.smoothing = 0.0;
            let chart = ready(ChartBuilder::render_cycle(&d));
            assert!(!chart.has_overlay(), "{}", kind);
        }
    }

    #[test]
    fn histogram_bins_are_min_of_ten_and_length() {
        for n in [1usize, 3, 10, 37] {
            let values: Vec<String> = (0..n).map(|v| (v * v).to_string()).collect();
            let chart = ready(ChartBuilder::render_cycle(&doc(
                &values.join("\n"),
                "",
                "",
                ChartKind::Histogram,
            )));
            match &chart.layers[0] {
                Layer::Histogram { bins, .. } => assert_eq!(bins.len(), n.min(10)),
                other => panic!("expected histogram, got {:?}", other),
            }
            assert!(chart.x_ticks.is_none());
        }
    }

    #[test]
    fn box_plot_covers_all_values() {
        let chart = ready(ChartBuilder::render_cycle(&doc(
            "1\n2\n3\n4\n100",
            "",
            "",
            ChartKind::BoxPlot,
        )));
        match &chart.layers[0] {
            Layer::Box { stats, .. } => {
                assert_eq!(stats.median, 3.0);
                assert_eq!(stats.max, 100.0);
                assert_eq!(stats.outliers, vec![100.0]);
            }
            other => panic!("expected box, got {:?}", other),
        }
        assert!(chart.y_range.end > 100.0);
    }

    #[test]
    fn invalid_color_fails_the_build() {
        let outcome = ChartBuilder::render_cycle(&doc("1\n2", "", "#zzz", ChartKind::Bar));
        match outcome {
            RenderOutcome::Failed { error, .. } => {
                assert_eq!(error.to_string(), "Invalid color '#zzz' for point #1");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn invalid_options_fail_the_build() {
        let series = Series::assemble(&[1.0], &[], &[]);
        let bad_width = ChartOptions {
            bar_width: 0.0,
            ..ChartOptions::default()
        };
        let bad_sigma = ChartOptions {
            smoothing: -1.0,
            ..ChartOptions::default()
        };
        let bad_size = ChartOptions {
            height: 0,
            ..ChartOptions::default()
        };
        for options in [bad_width, bad_sigma, bad_size] {
            assert!(matches!(
                ChartBuilder::build(&series, &options),
                Err(BuildError::InvalidOption { .. })
            ));
        }
        assert_eq!(
            ChartBuilder::build(&Series::default(), &ChartOptions::default()),
            Err(BuildError::EmptySeries)
        );
    }

    #[test]
    fn extreme_span_is_a_build_failure() {
        let outcome = ChartBuilder::render_cycle(&doc("1e308\n-1e308", "", "", ChartKind::Line));
        match outcome {
            RenderOutcome::Failed { error, .. } => assert_eq!(error, BuildError::RangeOverflow),
            other => panic!("expected failure, got {:?}", other),
        }

        // span fits, but padding the top does not
        let series = Series::assemble(&[1.7e308, 0.0], &[], &[]);
        let options = ChartOptions {
            kind: ChartKind::Bar,
            show_value_labels: true,
            ..ChartOptions::default()
        };
        assert_eq!(
            ChartBuilder::build(&series, &options),
            Err(BuildError::RangeOverflow)
        );
    }

    #[test]
    fn oversized_sigma_is_rejected() {
        let series = Series::assemble(&[1.0, 2.0], &[], &[]);
        for smoothing in [1e12, f64::INFINITY, f64::NAN] {
            let options = ChartOptions {
                smoothing,
                ..ChartOptions::default()
            };
            assert!(matches!(
                ChartBuilder::build(&series, &options),
                Err(BuildError::InvalidOption {
                    name: "smoothing",
                    ..
                })
            ));
        }
        let at_cap = ChartOptions {
            smoothing: MAX_SMOOTHING_SIGMA,
            ..ChartOptions::default()
        };
        assert!(ChartBuilder::build(&series, &at_cap).is_ok());
    }

    #[test]
    fn fixed_y_bounds_are_applied_and_checked() {
        let mut d = doc("10\n20\n30", "", "", ChartKind::Bar);
        d.options.y_min = Some(0.0);
        d.options.y_max = Some(100.0);
        let chart = ready(ChartBuilder::render_cycle(&d));
        assert_eq!(chart.y_range, 0.0..100.0);

        d.options.y_min = Some(500.0);
        d.options.y_max = None;
        assert!(matches!(
            ChartBuilder::render_cycle(&d),
            RenderOutcome::Failed {
                error: BuildError::InvalidOption { .. },
                ..
            }
        ));

        d.options.y_min = Some(f64::NAN);
        assert!(matches!(
            ChartBuilder::render_cycle(&d),
            RenderOutcome::Failed {
                error: BuildError::InvalidOption { name: "y_min", .. },
                ..
            }
        ));
    }

    #[test]
    fn ready_outcome_carries_the_summary() {
        let outcome = ChartBuilder::render_cycle(&doc("4\nx\n6", "a\nb", "", ChartKind::Area));
        let summary = outcome.summary().unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 5.0);

        let failed = ChartBuilder::render_cycle(&doc("1", "", "bad", ChartKind::Area));
        assert!(failed.summary().is_none());
    }

    #[test]
    fn theme_and_axis_captions_are_attached() {
        let mut d = doc("1\n2", "", "", ChartKind::Scatter);
        d.options.style = StyleTheme::Ticks;
        d.options.x_label = " Run ".to_string();
        d.options.y_label = "ms".to_string();
        let chart = ready(ChartBuilder::render_cycle(&d));
        assert_eq!(chart.theme, StyleTheme::Ticks.spec());
        assert_eq!(chart.x_label, "Run");
        assert_eq!(chart.y_label, "ms");
        assert_eq!(chart.x_range, -0.5..1.5);
    }
}
