//! Communities & Clusters tab: language community graph and the semantic
//! topic tree.

use crate::charts::{ChartPlotter, ForceGraph, LinkSpec, NodeSpec};
use crate::data::languages::full_name;
use crate::data::{DataProcessor, DataSet, Scope, TopicGroup};
use crate::gui::control_panel::UserSettings;
use crate::gui::widgets::info_panel;
use egui::{Color32, RichText};

const EDGE_COLOR: Color32 = Color32::from_gray(0x55);

const GRAPH_LEGEND: &str = "NODES = Languages\n\
COLORS = Detected Families (Communities)\n\
EDGES = Direct Similarity\n\
THICKNESS = Stronger relationship\n\
USE CASE: Verify if the model correctly identified groupings like 'Romance', 'Slavic', or 'Germanic'.";

const TREE_LEGEND: &str = "SEMANTIC COHESION: This tree groups Topics that share similar linguistic patterns.\n\
MEANING: If topics are in the same folder, it means languages tend to borrow/evolve \
words in these fields in the exact same way.";

pub struct CommunityTab {
    graph: ForceGraph,
    groups: Vec<TopicGroup>,
}

impl CommunityTab {
    pub fn new() -> Self {
        Self {
            graph: ForceGraph::new("language_clusters"),
            groups: Vec::new(),
        }
    }

    pub fn refresh(&mut self, ds: &DataSet, settings: &UserSettings) {
        self.groups = DataProcessor::topic_tree(ds, &settings.scope);

        let Some(communities) = DataProcessor::communities_for(ds, &settings.scope)
            .filter(|c| !c.is_empty())
        else {
            self.graph.clear();
            self.graph.set_message(Some(format!(
                "No community data for {}",
                settings.scope.label()
            )));
            return;
        };

        self.graph.set_nodes(
            communities
                .iter()
                .map(|(lang, &id)| {
                    NodeSpec::new(
                        lang.as_str(),
                        full_name(lang),
                        ChartPlotter::community_color(id),
                        14.0,
                    )
                    .outline(egui::Stroke::new(1.0, Color32::from_gray(0x22)))
                })
                .collect(),
        );

        let map = DataProcessor::similarity_for(ds, &settings.scope);
        self.graph.set_links(
            DataProcessor::cluster_edges(communities, map)
                .into_iter()
                .map(|edge| LinkSpec {
                    color: EDGE_COLOR,
                    width: edge.width(),
                    label: None,
                    visible: true,
                    a: edge.a,
                    b: edge.b,
                })
                .collect(),
        );
        self.graph.set_message(None);
    }

    /// Returns a topic picked from the tree.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<Scope> {
        let mut picked = None;

        egui::SidePanel::right("topic_tree")
            .resizable(true)
            .default_width(ui.available_width() / 2.0)
            .show_inside(ui, |ui| {
                ui.label(RichText::new("Semantic Topic Groups").strong());
                egui::TopBottomPanel::bottom("tree_legend")
                    .resizable(false)
                    .show_inside(ui, |ui| {
                        info_panel(ui, "Semantic Groups", TREE_LEGEND);
                    });
                egui::CentralPanel::default().show_inside(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            egui::CollapsingHeader::new("All Topics")
                                .default_open(true)
                                .show(ui, |ui| {
                                    for group in &self.groups {
                                        let mut title = RichText::new(&group.label);
                                        if group.is_current {
                                            title = title.strong().color(Color32::YELLOW);
                                        }
                                        egui::CollapsingHeader::new(title)
                                            .id_salt(("semantic_group", group.id))
                                            .default_open(true)
                                            .show(ui, |ui| {
                                                for topic in &group.topics {
                                                    if ui.selectable_label(false, topic).clicked() {
                                                        picked = Some(Scope::Topic(topic.clone()));
                                                    }
                                                }
                                            });
                                    }
                                });
                        });
                });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.label(RichText::new("Language Communities").strong());
            egui::TopBottomPanel::bottom("cluster_legend")
                .resizable(false)
                .show_inside(ui, |ui| {
                    info_panel(ui, "How to read this graph?", GRAPH_LEGEND);
                });
            egui::CentralPanel::default().show_inside(ui, |ui| {
                self.graph.show(ui);
            });
        });

        picked
    }
}
