//! Similarity Matrix tab.

use crate::charts::draw_similarity_matrix;
use crate::data::{DataProcessor, DataSet, SimilarityMatrix};
use crate::gui::control_panel::UserSettings;
use crate::gui::widgets::info_panel;

const LEGEND: &str = "THE METRIC: Normalized Levenshtein Distance (0.0 = Totally Different, 1.0 = Identical).\n\
HOW TO READ: Find the intersection of two languages.\n \
• Red/Orange: High lexical/phonetic similarity (likely same family).\n \
• Blue/Dark: Low similarity (unrelated languages).\n\
USE CASE: Quickly identifying the closest relative of a specific language.";

#[derive(Default)]
pub struct MatrixTab {
    matrix: SimilarityMatrix,
}

impl MatrixTab {
    pub fn refresh(&mut self, ds: &DataSet, settings: &UserSettings) {
        let map = DataProcessor::similarity_for(ds, &settings.scope);
        self.matrix = DataProcessor::similarity_matrix(map);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        egui::TopBottomPanel::bottom("matrix_legend")
            .resizable(false)
            .show_inside(ui, |ui| {
                info_panel(ui, "Matrix Legend", LEGEND);
            });
        egui::CentralPanel::default().show_inside(ui, |ui| {
            draw_similarity_matrix(ui, &self.matrix);
        });
    }
}
