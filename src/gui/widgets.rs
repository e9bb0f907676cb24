//! Shared widgets: legend boxes and the filterable outlier table.

use crate::charts::SELECTED_BG;
use crate::data::{visible_rows, SortOrder, TableRow, TextFilter};
use egui::{Color32, RichText, ScrollArea, Sense};

const INFO_BG: Color32 = Color32::from_rgb(50, 53, 55);
const INFO_TITLE: Color32 = Color32::from_rgb(100, 180, 220);
const INFO_TEXT: Color32 = Color32::from_rgb(200, 200, 200);

/// Titled legend box shown beside each view.
pub fn info_panel(ui: &mut egui::Ui, title: &str, text: &str) {
    egui::Frame::none()
        .fill(INFO_BG)
        .rounding(4.0)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).size(11.0).strong().color(INFO_TITLE));
            ui.add(egui::Label::new(RichText::new(text).size(10.5).color(INFO_TEXT)).wrap());
        });
}

/// Sortable, filterable table of outlier rows.
pub struct OutlierTable {
    id: &'static str,
    filter_text: String,
    filter: TextFilter,
    sort: Option<SortOrder>,
    selected: Option<usize>,
}

impl OutlierTable {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            filter_text: String::new(),
            filter: TextFilter::All,
            sort: None,
            selected: None,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Search field followed by the table. `color` picks each row's text
    /// color, `tooltip` the hover text for a (row, column) cell.
    ///
    /// Returns the index of a row clicked this frame.
    pub fn show<R: TableRow>(
        &mut self,
        ui: &mut egui::Ui,
        rows: &[R],
        color: impl Fn(&R) -> Color32,
        tooltip: impl Fn(&R, usize) -> Option<String>,
    ) -> Option<usize> {
        ui.horizontal(|ui| {
            ui.label("🔍 Search:");
            let edit = egui::TextEdit::singleline(&mut self.filter_text).desired_width(220.0);
            if ui.add(edit).changed() {
                self.filter = TextFilter::new(&self.filter_text);
            }
            ui.label(RichText::new(format!("{} rows", rows.len())).color(Color32::GRAY));
        });
        ui.add_space(4.0);

        let order = visible_rows(rows, &self.filter, self.sort);
        let mut clicked = None;

        ScrollArea::both()
            .id_salt(self.id)
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                egui::Grid::new(self.id)
                    .striped(true)
                    .num_columns(R::COLUMNS.len())
                    .spacing([14.0, 6.0])
                    .show(ui, |ui| {
                        for (col, name) in R::COLUMNS.iter().enumerate() {
                            let arrow = match self.sort {
                                Some(s) if s.column == col && s.ascending => " ▲",
                                Some(s) if s.column == col => " ▼",
                                _ => "",
                            };
                            let header = egui::Button::new(
                                RichText::new(format!("{name}{arrow}")).strong(),
                            )
                            .frame(false);
                            if ui.add(header).clicked() {
                                self.sort = SortOrder::toggle(self.sort, col);
                            }
                        }
                        ui.end_row();

                        for &idx in &order {
                            let row = &rows[idx];
                            let is_selected = self.selected == Some(idx);
                            let fg = if is_selected { Color32::WHITE } else { color(row) };
                            for (col, cell) in row.cells().into_iter().enumerate() {
                                let mut text = RichText::new(cell).color(fg);
                                if is_selected {
                                    text = text.background_color(SELECTED_BG);
                                }
                                let mut response = ui.add(egui::Label::new(text).sense(Sense::click()));
                                if let Some(tip) = tooltip(row, col) {
                                    response = response.on_hover_text(tip);
                                }
                                if response.clicked() {
                                    self.selected = Some(idx);
                                    clicked = Some(idx);
                                }
                            }
                            ui.end_row();
                        }
                    });
            });

        clicked
    }
}
