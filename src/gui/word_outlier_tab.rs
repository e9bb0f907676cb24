//! Word Outliers tab: per-pair bar chart above the word table.

use crate::charts::ChartPlotter;
use crate::data::{DataProcessor, DataSet, WordOutlierRecord};
use crate::gui::control_panel::UserSettings;
use crate::gui::widgets::{info_panel, OutlierTable};
use crate::stats::{OutlierStats, PairCount};
use egui::RichText;

const CHART_LEGEND: &str = "GREEN: 'Unexpectedly Similar' - words that look/sound alike in languages \
that are usually different. Likely indicates Loanwords or ancient cognates.\n\n\
RED: 'Unexpectedly Different' - words that are totally different in languages that are \
usually similar. Indicates irregular vocabulary or false friends.";

const TABLE_LEGEND: &str = "CONCEPT: The original English word.\n\
SIMILARITY: 0.0 to 1.0 score for this specific word pair.\n\
Z-SCORE: How shocking is this similarity? A high score means this word \
is an exception to the rule for these two languages.";

/// Hover text for one cell of the word table.
pub fn word_tooltip(rec: &WordOutlierRecord, column: usize) -> String {
    match column {
        6 => "Z-Score: High value = Strong Anomaly.".to_string(),
        5 => "Similarity: 1.0 = Identical, 0.0 = Different.".to_string(),
        _ => format!(
            "{} (Topic: {})\nMean Sim: {:.3}\nStd Dev: {:.3}\nZ-Score: {:.3}",
            rec.source_word, rec.topic, rec.mean, rec.std_dev, rec.z_score
        ),
    }
}

pub struct WordOutlierTab {
    counts: Vec<PairCount>,
    table: OutlierTable,
}

impl WordOutlierTab {
    pub fn new() -> Self {
        Self {
            counts: Vec::new(),
            table: OutlierTable::new("word_outlier_table"),
        }
    }

    pub fn refresh(&mut self, ds: &DataSet, settings: &UserSettings) {
        let rows = DataProcessor::word_outliers_for(ds, &settings.scope);
        self.counts = OutlierStats::pair_counts(&rows);
        self.table.clear_selection();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, ds: &DataSet, settings: &UserSettings) {
        egui::TopBottomPanel::top("word_outlier_chart")
            .resizable(true)
            .default_height(330.0)
            .show_inside(ui, |ui| {
                ui.label(RichText::new("Outliers by Language Pair").strong());
                egui::SidePanel::right("word_chart_legend")
                    .resizable(false)
                    .exact_width(240.0)
                    .show_inside(ui, |ui| {
                        info_panel(ui, "Chart Legend", CHART_LEGEND);
                    });
                egui::CentralPanel::default().show_inside(ui, |ui| {
                    ChartPlotter::draw_pair_bar_chart(ui, &self.counts);
                });
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            egui::TopBottomPanel::bottom("word_table_legend")
                .resizable(false)
                .show_inside(ui, |ui| {
                    info_panel(ui, "List Legend", TABLE_LEGEND);
                });
            egui::CentralPanel::default().show_inside(ui, |ui| {
                let rows = DataProcessor::word_outliers_for(ds, &settings.scope);
                self.table.show(
                    ui,
                    &rows,
                    |r| ChartPlotter::kind_color(r.kind.is_positive()),
                    |r, col| Some(word_tooltip(r, col)),
                );
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OutlierKind;

    #[test]
    fn tooltip_describes_record() {
        let rec = WordOutlierRecord {
            topic: "food".into(),
            source_word: "bread".into(),
            lang_a: "en".into(),
            lang_b: "de".into(),
            word_a: "bread".into(),
            word_b: "brot".into(),
            similarity: 0.6,
            mean: 0.25,
            std_dev: 0.0834,
            z_score: 4.19674,
            kind: OutlierKind::Positive,
        };
        assert_eq!(
            word_tooltip(&rec, 0),
            "bread (Topic: food)\nMean Sim: 0.250\nStd Dev: 0.083\nZ-Score: 4.197"
        );
        assert!(word_tooltip(&rec, 6).starts_with("Z-Score"));
        assert!(word_tooltip(&rec, 5).starts_with("Similarity"));
    }
}
