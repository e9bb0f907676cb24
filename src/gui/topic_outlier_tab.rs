//! Topic Outliers tab: deviation heatmap, star graph and the outlier table.

use crate::charts::{draw_deviation_grid, ChartPlotter, ForceGraph, LinkSpec, NodeSpec};
use crate::data::{DataProcessor, DataSet, Scope, TopicOutlierRecord};
use crate::gui::control_panel::UserSettings;
use crate::gui::widgets::{info_panel, OutlierTable};
use crate::stats::{DeviationGrid, OutlierStats, StarView};
use egui::{Color32, RichText, Stroke};

const CENTER_ID: &str = "CENTER";
const CENTER_COLOR: Color32 = Color32::from_rgb(0xF1, 0xC4, 0x0F);
const SATELLITE_COLOR: Color32 = Color32::from_rgb(0xEC, 0xF0, 0xF1);
const SELECTED_COLOR: Color32 = Color32::from_rgb(0x34, 0x98, 0xDB);
const INSIGHT_BG: Color32 = Color32::from_rgb(60, 63, 65);

pub struct TopicOutlierTab {
    grid: DeviationGrid,
    star: ForceGraph,
    insight: String,
    table: OutlierTable,
}

impl TopicOutlierTab {
    pub fn new() -> Self {
        Self {
            grid: DeviationGrid::default(),
            star: ForceGraph::new("topic_star"),
            insight: "Select a topic to see analysis.".to_string(),
            table: OutlierTable::new("topic_outlier_table"),
        }
    }

    pub fn refresh(&mut self, ds: &DataSet, settings: &UserSettings) {
        let rows = DataProcessor::topic_outliers_for(ds, &settings.scope);
        self.grid = OutlierStats::deviation_grid(&rows);
        self.insight = OutlierStats::insight(&rows, &settings.scope);
        self.apply_star(OutlierStats::star_view(&rows, &settings.scope, None));
        self.table.clear_selection();
    }

    /// Star for the topic of a clicked row, highlighting that row's pair.
    fn select_row(&mut self, rows: &[&TopicOutlierRecord], picked: &TopicOutlierRecord) {
        let same_topic: Vec<&TopicOutlierRecord> = rows
            .iter()
            .copied()
            .filter(|r| r.topic == picked.topic)
            .collect();
        let pair = picked.pair_id();
        self.apply_star(OutlierStats::star_view(
            &same_topic,
            &Scope::Topic(picked.topic.clone()),
            Some(&pair),
        ));
    }

    fn apply_star(&mut self, view: StarView) {
        match view {
            StarView::Message(message) => {
                self.star.clear();
                self.star.set_message(Some(message));
            }
            StarView::Star {
                center_label,
                satellites,
            } => {
                let mut nodes = vec![NodeSpec::new(CENTER_ID, center_label, CENTER_COLOR, 20.0)
                    .pinned()
                    .outline(Stroke::new(2.0, Color32::WHITE))];
                let mut links = Vec::with_capacity(satellites.len());
                for sat in &satellites {
                    let node = if sat.selected {
                        NodeSpec::new(sat.pair_id.as_str(), sat.label.as_str(), SELECTED_COLOR, 17.0)
                            .outline(Stroke::new(4.0, CENTER_COLOR))
                    } else {
                        NodeSpec::new(sat.pair_id.as_str(), sat.label.as_str(), SATELLITE_COLOR, 10.0)
                    };
                    nodes.push(node);
                    links.push(LinkSpec {
                        a: CENTER_ID.to_string(),
                        b: sat.pair_id.clone(),
                        color: ChartPlotter::kind_color(sat.difference > 0.0),
                        width: sat.edge_width(),
                        label: Some(sat.edge_label()),
                        visible: true,
                    });
                }
                self.star.set_nodes(nodes);
                self.star.set_links(links);
                self.star.set_message(None);
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, ds: &DataSet, settings: &UserSettings) {
        egui::TopBottomPanel::top("topic_outlier_heatmap")
            .resizable(true)
            .default_height(320.0)
            .show_inside(ui, |ui| {
                ui.label(RichText::new("Outlier Heatmap").strong());
                egui::SidePanel::right("heatmap_legend")
                    .resizable(false)
                    .exact_width(200.0)
                    .show_inside(ui, |ui| {
                        info_panel(
                            ui,
                            "Heatmap Legend",
                            "GREEN: Positive Anomaly (Closer than usual)\n\
                             RED: Negative Anomaly (More distant than usual)",
                        );
                    });
                egui::CentralPanel::default().show_inside(ui, |ui| {
                    draw_deviation_grid(ui, &self.grid);
                });
            });

        egui::SidePanel::left("topic_star_graph")
            .resizable(true)
            .default_width(600.0)
            .show_inside(ui, |ui| {
                ui.label(RichText::new("Star Graph: Topic Deviation").strong());
                egui::Frame::none()
                    .fill(INSIGHT_BG)
                    .inner_margin(5.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            RichText::new(&self.insight)
                                .monospace()
                                .strong()
                                .color(ChartPlotter::kind_color(true)),
                        );
                    });
                egui::TopBottomPanel::bottom("star_legend")
                    .resizable(false)
                    .show_inside(ui, |ui| {
                        info_panel(ui, "Graph Legend", "Center: Avg Global Sim. Satellites: Pairs.");
                    });
                egui::CentralPanel::default().show_inside(ui, |ui| {
                    self.star.show(ui);
                });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            egui::TopBottomPanel::bottom("topic_table_legend")
                .resizable(false)
                .show_inside(ui, |ui| {
                    info_panel(ui, "Table Legend", "Z-SCORE: Measures statistical significance.");
                });
            egui::CentralPanel::default().show_inside(ui, |ui| {
                let rows = DataProcessor::topic_outliers_for(ds, &settings.scope);
                let clicked = self.table.show(
                    ui,
                    &rows,
                    |r| ChartPlotter::kind_color(r.kind.is_positive()),
                    |_, _| None,
                );
                if let Some(idx) = clicked {
                    self.select_row(&rows, rows[idx]);
                }
            });
        });
    }
}
