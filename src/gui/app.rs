//! BenchGraph Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{Chart, ExportFormat, StaticChartRenderer};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::{Context, Result};
use egui::SidePanel;
use std::path::PathBuf;
use tracing::{error, info};

/// Main application window.
pub struct BenchGraphApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl BenchGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        }
    }

    /// Ask for a target file and write the current chart to it.
    fn handle_export(&mut self) {
        let Some(chart) = self.chart_viewer.outcome.chart() else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let mut dialog = rfd::FileDialog::new().set_file_name("chart.png");
        for format in ExportFormat::ALL {
            dialog = dialog.add_filter(format.extension().to_uppercase(), &[format.extension()]);
        }
        let Some(path) = dialog.save_file() else {
            return; // User cancelled
        };

        match Self::export_to(chart, path) {
            Ok(path) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!("Export failed: {:#}", e);
                self.control_panel.set_status(&format!("Error: {:#}", e));
            }
        }
    }

    fn export_to(chart: &Chart, path: PathBuf) -> Result<PathBuf> {
        StaticChartRenderer::render_to_file(chart, &path)
            .with_context(|| format!("Exporting chart to {}", path.display()))?;
        Ok(path)
    }
}

impl eframe::App for BenchGraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::ExportChart => self.handle_export(),
                        ControlPanelAction::ResetOptions => {
                            info!("Chart options reset to defaults");
                            self.control_panel.reset_options();
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Rebuild from the current form state
        self.chart_viewer
            .refresh(&self.control_panel.settings.document);
        self.control_panel.export_enabled = self.chart_viewer.has_chart();

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
