//! Control Panel Widget
//! Left side panel with the selection slider and export controls.

use crate::binder::{Layout, SliderSpec};
use egui::{Color32, RichText};

/// Left side control panel driving the selection.
pub struct ControlPanel {
    pub heading: String,
    pub prompt: String,
    pub slider: SliderSpec,
    pub selection: usize,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(layout: &Layout) -> Self {
        Self {
            heading: layout.heading.to_string(),
            prompt: layout.prompt.to_string(),
            slider: layout.slider.clone(),
            selection: layout.slider.value,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let before = self.selection;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new(&self.heading)
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Selection Section =====
        ui.label(RichText::new(&self.prompt).size(14.0).strong());
        ui.add_space(8.0);

        ui.add(
            egui::Slider::new(&mut self.selection, self.slider.min..=self.slider.max)
                .integer()
                .text("ligas"),
        );

        ui.add_space(5.0);

        // Marks double as shortcuts
        ui.horizontal_wrapped(|ui| {
            for (value, label) in &self.slider.marks {
                if ui
                    .selectable_label(self.selection == *value, RichText::new(label).size(11.0))
                    .clicked()
                {
                    self.selection = *value;
                }
            }
        });

        self.selection = self.slider.clamp(self.selection);
        if self.selection != before {
            action = ControlPanelAction::SelectionChanged(self.selection);
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
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

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged(usize),
    ExportPng,
}
