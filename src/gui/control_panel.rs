//! Control Panel Widget
//! Left side panel with the data entry blocks and chart options.

use crate::charts::{ChartKind, ChartOptions, StyleTheme};
use crate::data::InputDocument;
use egui::{Color32, ComboBox, RichText};

/// Upper bound of the smoothing sigma slider.
const MAX_SMOOTHING: f64 = 10.0;

/// User settings: the document the chart is built from.
#[derive(Default, Clone)]
pub struct UserSettings {
    pub document: InputDocument,
}

/// Left side control panel with data entry and chart options.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn section(ui: &mut egui::Ui, title: &str) {
        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);
        ui.label(RichText::new(title).size(14.0).strong());
        ui.add_space(5.0);
    }

    fn text_block(ui: &mut egui::Ui, label: &str, hint: &str, text: &mut String) {
        ui.label(label);
        ui.add(
            egui::TextEdit::multiline(text)
                .hint_text(hint)
                .desired_rows(5)
                .desired_width(f32::INFINITY)
                .code_editor(),
        );
        ui.add_space(5.0);
    }

    /// Optional axis bound: a checkbox to fix it, then a drag value.
    fn axis_bound(ui: &mut egui::Ui, label: &str, bound: &mut Option<f64>, initial: f64) {
        ui.horizontal(|ui| {
            let mut fixed = bound.is_some();
            if ui.checkbox(&mut fixed, label).changed() {
                *bound = fixed.then_some(initial);
            }
            match bound {
                Some(value) => {
                    ui.add(egui::DragValue::new(value).speed(0.5));
                }
                None => {
                    ui.label(RichText::new("auto").color(Color32::GRAY));
                }
            }
        });
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 BenchGraph")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("One value per line")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Section =====
        ui.label(RichText::new("📁 Data").size(14.0).strong());
        ui.add_space(5.0);

        let doc = &mut self.settings.document;
        Self::text_block(ui, "Values", "12.5\n14\n9.8", &mut doc.values_text);
        Self::text_block(ui, "Labels (optional)", "Run A\nRun B\nRun C", &mut doc.labels_text);
        Self::text_block(ui, "Colors (optional)", "#FF5733\n#33FF57", &mut doc.colors_text);

        // ===== Chart Section =====
        Self::section(ui, "⚙️ Chart");
        let options = &mut doc.options;
        let label_width = 110.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Chart Type:"));
            ComboBox::from_id_salt("chart_kind")
                .width(combo_width)
                .selected_text(options.kind.name())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut options.kind, kind, kind.name());
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Style:"));
            ComboBox::from_id_salt("style_theme")
                .width(combo_width)
                .selected_text(options.style.name())
                .show_ui(ui, |ui| {
                    for style in StyleTheme::ALL {
                        ui.selectable_value(&mut options.style, style, style.name());
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Size (px):"));
            ui.add(egui::DragValue::new(&mut options.width).range(200..=2400));
            ui.label("×");
            ui.add(egui::DragValue::new(&mut options.height).range(150..=1600));
        });

        // ===== Options Section =====
        Self::section(ui, "🔧 Options");

        ui.add_enabled_ui(options.kind.supports_smoothing(), |ui| {
            ui.add(
                egui::Slider::new(&mut options.smoothing, 0.0..=MAX_SMOOTHING)
                    .text("Smoothing σ")
                    .step_by(0.1),
            );
        });
        ui.add_enabled_ui(options.kind == ChartKind::Bar, |ui| {
            ui.add(
                egui::Slider::new(&mut options.bar_width, 0.1..=1.0)
                    .text("Bar width")
                    .step_by(0.05),
            );
            ui.checkbox(&mut options.show_value_labels, "Show value labels");
            ui.checkbox(&mut options.show_legend, "Show legend");
        });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("X axis label:"));
            ui.text_edit_singleline(&mut options.x_label);
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Y axis label:"));
            ui.text_edit_singleline(&mut options.y_label);
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Caption size:"));
            ui.add(egui::DragValue::new(&mut options.axis_label_size).range(8..=48));
        });

        ui.add_space(5.0);
        Self::axis_bound(ui, "Y min", &mut options.y_min, 0.0);
        Self::axis_bound(ui, "Y max", &mut options.y_max, 100.0);

        // ===== Action Buttons =====
        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Chart").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportChart;
                }
            });

            ui.add_space(8.0);

            if ui.button("↺ Reset Options").clicked() {
                action = ControlPanelAction::ResetOptions;
            }
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn reset_options(&mut self) {
        self.settings.document.options = ChartOptions::default();
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ExportChart,
    ResetOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_default_options_only() {
        let mut panel = ControlPanel::new();
        panel.settings.document.values_text = "1\n2".to_string();
        panel.settings.document.options.kind = ChartKind::Histogram;
        panel.settings.document.options.smoothing = 3.0;

        panel.reset_options();

        assert_eq!(panel.settings.document.options, ChartOptions::default());
        assert_eq!(panel.settings.document.values_text, "1\n2");
    }

    #[test]
    fn reset_clears_fixed_axis_bounds() {
        let mut panel = ControlPanel::new();
        panel.settings.document.options.y_min = Some(0.0);
        panel.settings.document.options.y_max = Some(100.0);

        panel.reset_options();

        assert_eq!(panel.settings.document.options.y_min, None);
        assert_eq!(panel.settings.document.options.y_max, None);
    }
}
