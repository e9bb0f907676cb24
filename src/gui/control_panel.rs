//! Control Panel Widget
//! Left side panel with the data source, mode, topic and threshold controls.

use crate::data::{Mode, Scope};
use egui::{Color32, ComboBox, RichText};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Selections that survive restarts through eframe persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub data_dir: PathBuf,
    pub mode: Mode,
    pub scope: Scope,
    /// Slider position, 0..=100.
    pub threshold: u8,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            mode: Mode::default(),
            scope: Scope::default(),
            threshold: 0,
        }
    }
}

impl UserSettings {
    /// Minimum similarity for a visible network edge.
    pub fn min_similarity(&self) -> f64 {
        f64::from(self.threshold.min(100)) / 100.0
    }

    pub fn threshold_label(&self) -> String {
        format!("Min Edge Sim: {:.2}", self.min_similarity())
    }
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub topics: Vec<String>,
    pub status: String,
    pub is_loading: bool,
}

impl ControlPanel {
    pub fn new(settings: UserSettings) -> Self {
        Self {
            settings,
            topics: vec![crate::data::GLOBAL_LABEL.to_string()],
            status: "Ready".to_string(),
            is_loading: false,
        }
    }

    /// Replace the topic list after a reload, keeping the selection when possible.
    pub fn update_topics(&mut self, topics: Vec<String>) {
        self.topics = topics;
        self.settings.scope =
            crate::data::DataProcessor::resolve_scope(&self.topics, &self.settings.scope);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌐 Language Proximity")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Explorer").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(self.settings.data_dir.display().to_string())
                        .size(12.0)
                        .color(Color32::WHITE),
                );
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!self.is_loading, |ui| {
                        if ui.button("📂 Data Folder").clicked() {
                            action = ControlPanelAction::PickDataFolder;
                        }
                        if ui.button("⟳ Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Analysis =====
        ui.label(RichText::new("⚙️ Analysis").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 95.0;
        let combo_width = 190.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Analysis Mode:"));
            ui.add_enabled_ui(!self.is_loading, |ui| {
                ComboBox::from_id_salt("analysis_mode")
                    .width(combo_width)
                    .selected_text(self.settings.mode.label())
                    .show_ui(ui, |ui| {
                        for mode in Mode::ALL {
                            if ui
                                .selectable_label(self.settings.mode == mode, mode.label())
                                .clicked()
                                && self.settings.mode != mode
                            {
                                self.settings.mode = mode;
                                action = ControlPanelAction::ModeChanged;
                            }
                        }
                    });
            });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Topic Scope:"));
            ComboBox::from_id_salt("topic_scope")
                .width(combo_width)
                .selected_text(self.settings.scope.label())
                .show_ui(ui, |ui| {
                    for topic in &self.topics {
                        let selected = self.settings.scope.label() == topic;
                        if ui.selectable_label(selected, topic).clicked() && !selected {
                            self.settings.scope = Scope::from_label(topic);
                            action = ControlPanelAction::ScopeChanged;
                        }
                    }
                });
        });

        ui.add_space(12.0);

        ui.label(RichText::new(self.settings.threshold_label()).size(12.0));
        let slider = egui::Slider::new(&mut self.settings.threshold, 0..=100)
            .show_value(false)
            .step_by(1.0);
        if ui.add(slider).changed() {
            action = ControlPanelAction::ThresholdChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if self.is_loading {
                ui.spinner();
            }
            let status_color = if self.status.contains("Error") || self.status.contains("failed") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Loaded") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.add(
                egui::Label::new(RichText::new(&self.status).size(11.0).color(status_color))
                    .wrap(),
            );
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    PickDataFolder,
    Reload,
    ModeChanged,
    ScopeChanged,
    ThresholdChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_maps_to_two_decimals() {
        let mut s = UserSettings::default();
        assert_eq!(s.threshold_label(), "Min Edge Sim: 0.00");
        s.threshold = 45;
        assert!((s.min_similarity() - 0.45).abs() < 1e-12);
        assert_eq!(s.threshold_label(), "Min Edge Sim: 0.45");
    }

    #[test]
    fn update_topics_keeps_or_resets_scope() {
        let mut panel = ControlPanel::new(UserSettings {
            scope: Scope::Topic("food".into()),
            ..UserSettings::default()
        });
        panel.update_topics(vec!["Global".into(), "animals".into(), "food".into()]);
        assert_eq!(panel.settings.scope, Scope::Topic("food".into()));
        panel.update_topics(vec!["Global".into(), "animals".into()]);
        assert_eq!(panel.settings.scope, Scope::Global);
    }
}
