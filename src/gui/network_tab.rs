//! Network Graph tab: languages as nodes, proximity as edges.

use crate::charts::{ChartPlotter, ForceGraph, LinkSpec, NodeSpec};
use crate::data::languages::full_name;
use crate::data::{DataProcessor, DataSet};
use crate::gui::control_panel::UserSettings;
use crate::gui::widgets::info_panel;
use egui::Color32;

const NODE_COLOR: Color32 = Color32::from_gray(0x88);

const LEGEND: &str = "NODES: Languages.\n\n\
COLOR SCALE: Red/Orange indicates high similarity. \
Green/Blue (< 0.50) indicates distinct languages.\n\n\
INTERPRETATION: Clusters of nodes represent language families.";

pub struct NetworkTab {
    graph: ForceGraph,
}

impl NetworkTab {
    pub fn new() -> Self {
        Self {
            graph: ForceGraph::new("proximity_network"),
        }
    }

    /// Rebuild nodes and edges. Edges below the threshold stay in the
    /// layout but are not painted.
    pub fn refresh(&mut self, ds: &DataSet, settings: &UserSettings) {
        let nodes = DataProcessor::graph_nodes(ds);
        self.graph.set_nodes(
            nodes
                .iter()
                .map(|code| NodeSpec::new(code.as_str(), full_name(code), NODE_COLOR, 10.0))
                .collect(),
        );

        let map = DataProcessor::similarity_for(ds, &settings.scope);
        let links = DataProcessor::graph_edges(map, &nodes, settings.min_similarity())
            .into_iter()
            .map(|edge| {
                let band = edge.band();
                LinkSpec {
                    color: ChartPlotter::band_color(band),
                    width: band.width(),
                    label: edge.label(),
                    visible: edge.visible,
                    a: edge.a,
                    b: edge.b,
                }
            })
            .collect();
        self.graph.set_links(links);
        self.graph.set_message(
            (self.graph.node_count() == 0).then(|| "No languages loaded".to_string()),
        );
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        egui::SidePanel::right("network_legend")
            .resizable(false)
            .exact_width(220.0)
            .show_inside(ui, |ui| {
                info_panel(ui, "Network Legend", LEGEND);
            });
        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{} languages, {} edges shown",
                    self.graph.node_count(),
                    self.graph.visible_link_count()
                ))
                .color(Color32::GRAY),
            );
            self.graph.show(ui);
        });
    }
}
