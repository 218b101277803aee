//! Chart Viewer Widget
//! Central panel showing the chart built from the current document.

use crate::charts::{ChartBuilder, ChartPlotter, RenderOutcome};
use crate::data::InputDocument;
use egui::{Color32, RichText, ScrollArea};

/// Scrollable chart display area.
/// Rebuilds the chart whenever the input document changes.
pub struct ChartViewer {
    /// Outcome of the last render cycle
    pub outcome: RenderOutcome,
    rendered: Option<InputDocument>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        let options = InputDocument::default().options;
        Self {
            outcome: RenderOutcome::NoData {
                width: options.width,
                height: options.height,
            },
            rendered: None,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a render cycle if the document differs from the last one drawn.
    /// Returns true when the chart was rebuilt.
    pub fn refresh(&mut self, doc: &InputDocument) -> bool {
        if self.rendered.as_ref() == Some(doc) {
            return false;
        }

        self.outcome = ChartBuilder::render_cycle(doc);
        self.rendered = Some(doc.clone());
        true
    }

    pub fn has_chart(&self) -> bool {
        self.outcome.chart().is_some()
    }

    /// Draw the chart, placeholder or error for the last render cycle
    pub fn show(&mut self, ui: &mut egui::Ui) {
        ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            match &self.outcome {
                RenderOutcome::NoData { width, height } => {
                    ChartPlotter::draw_placeholder(ui, *width, *height);
                }
                RenderOutcome::Ready { chart, .. } => {
                    ChartPlotter::draw_chart(ui, chart);
                }
                RenderOutcome::Failed { error, .. } => {
                    ui.label(
                        RichText::new(format!("⚠ Could not build chart: {}", error))
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new("Check the values and colors in the Data section.")
                            .color(Color32::GRAY),
                    );
                }
            }

            let warnings = self.outcome.warnings();
            if !warnings.is_empty() {
                ui.add_space(8.0);
                ui.collapsing(format!("{} line(s) skipped", warnings.len()), |ui| {
                    for w in warnings {
                        ui.label(RichText::new(w.to_string()).size(11.0));
                    }
                });
            }

            if let Some(summary) = self.outcome.summary() {
                ui.add_space(10.0);
                ui.label(RichText::new("Data Statistics").size(14.0).strong());
                ChartPlotter::draw_summary_table(ui, summary);
            }
        });
    }
}
