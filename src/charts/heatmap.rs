//! Painted heatmaps: the language similarity matrix and the
//! topic x language-pair deviation grid.

use crate::charts::plotter::{ChartPlotter, PANEL_BG};
use crate::data::languages::full_name;
use crate::data::SimilarityMatrix;
use crate::stats::{DeviationGrid, DEVIATION_LABEL_MIN};
use egui::epaint::TextShape;
use egui::{pos2, vec2, Align2, Color32, FontId, Rect, Sense, Stroke, Vec2};

/// Fixed geometry of a painted grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub left_margin: f32,
    pub top_margin: f32,
    pub cell: Vec2,
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub const DEVIATION: GridLayout = GridLayout {
        left_margin: 160.0,
        top_margin: 140.0,
        cell: Vec2::new(60.0, 25.0),
        rows: 0,
        cols: 0,
    };

    pub const MATRIX: GridLayout = GridLayout {
        left_margin: 110.0,
        top_margin: 30.0,
        cell: Vec2::new(72.0, 28.0),
        rows: 0,
        cols: 0,
    };

    pub fn sized(self, rows: usize, cols: usize) -> Self {
        Self { rows, cols, ..self }
    }

    pub fn total_size(&self) -> Vec2 {
        vec2(
            self.left_margin + self.cols as f32 * self.cell.x + 50.0,
            self.top_margin + self.rows as f32 * self.cell.y + 50.0,
        )
    }

    /// Cell under `offset`, measured from the grid's top-left corner.
    pub fn cell_at(&self, offset: Vec2) -> Option<(usize, usize)> {
        let x = offset.x - self.left_margin;
        let y = offset.y - self.top_margin;
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell.x) as usize;
        let row = (y / self.cell.y) as usize;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    fn cell_rect(&self, origin: egui::Pos2, row: usize, col: usize) -> Rect {
        let min = origin
            + vec2(
                self.left_margin + col as f32 * self.cell.x,
                self.top_margin + row as f32 * self.cell.y,
            );
        Rect::from_min_size(min, self.cell - vec2(1.0, 1.0))
    }
}

/// Text for a deviation cell, `None` when the value is too small to label.
pub fn deviation_text(value: f64) -> Option<String> {
    (value.abs() > DEVIATION_LABEL_MIN).then(|| format!("{value:+.2}"))
}

/// Fill, text and text color of one similarity matrix cell.
#[derive(Debug, Clone, PartialEq)]
struct CellStyle {
    fill: Color32,
    text: String,
    text_color: Color32,
}

fn matrix_cell(matrix: &SimilarityMatrix, row: usize, col: usize) -> CellStyle {
    if matrix.is_missing(row, col) {
        return CellStyle {
            fill: Color32::from_gray(50),
            text: "-".to_string(),
            text_color: Color32::GRAY,
        };
    }
    let value = matrix.cell(row, col);
    CellStyle {
        fill: ChartPlotter::similarity_cell_color(value),
        text: format!("{value:.2}"),
        text_color: Color32::BLACK,
    }
}

fn empty_notice(ui: &mut egui::Ui, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(egui::RichText::new(text).color(Color32::WHITE));
    });
}

/// Language x language similarity matrix.
pub fn draw_similarity_matrix(ui: &mut egui::Ui, matrix: &SimilarityMatrix) {
    let n = matrix.languages.len();
    if n == 0 {
        empty_notice(ui, "No similarity data for this selection");
        return;
    }
    let layout = GridLayout::MATRIX.sized(n, n);

    egui::ScrollArea::both().auto_shrink([false; 2]).show(ui, |ui| {
        let (rect, _) = ui.allocate_exact_size(layout.total_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, PANEL_BG);
        let font = FontId::proportional(12.0);

        for (i, code) in matrix.languages.iter().enumerate() {
            let header = layout.cell_rect(rect.min, 0, i);
            painter.text(
                pos2(header.center().x, rect.min.y + layout.top_margin / 2.0),
                Align2::CENTER_CENTER,
                full_name(code),
                font.clone(),
                Color32::LIGHT_GRAY,
            );
            let row = layout.cell_rect(rect.min, i, 0);
            painter.text(
                pos2(rect.min.x + layout.left_margin - 8.0, row.center().y),
                Align2::RIGHT_CENTER,
                full_name(code),
                font.clone(),
                Color32::LIGHT_GRAY,
            );
        }

        for row in 0..n {
            for col in 0..n {
                let cell = layout.cell_rect(rect.min, row, col);
                let style = matrix_cell(matrix, row, col);
                painter.rect_filled(cell, 0.0, style.fill);
                painter.text(
                    cell.center(),
                    Align2::CENTER_CENTER,
                    style.text,
                    font.clone(),
                    style.text_color,
                );
            }
        }
    });
}

/// Topic x language-pair deviation heatmap. The hovered cell is outlined
/// and its topic, pair and value are shown in a tooltip.
pub fn draw_deviation_grid(ui: &mut egui::Ui, grid: &DeviationGrid) {
    if grid.is_empty() {
        empty_notice(ui, "No data available to display heatmap");
        return;
    }
    let layout = GridLayout::DEVIATION.sized(grid.topics.len(), grid.pairs.len());

    egui::ScrollArea::both().auto_shrink([false; 2]).show(ui, |ui| {
        let (rect, response) = ui.allocate_exact_size(layout.total_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, PANEL_BG);
        let font = FontId::proportional(12.0);

        let hovered = response
            .hover_pos()
            .and_then(|p| layout.cell_at(p - rect.min));

        for col in 0..grid.pairs.len() {
            let x = rect.min.x + layout.left_margin + col as f32 * layout.cell.x + layout.cell.x / 2.0;
            let y = rect.min.y + layout.top_margin - 10.0;
            let galley = painter.layout_no_wrap(grid.pair_label(col), font.clone(), Color32::LIGHT_GRAY);
            painter.add(
                TextShape::new(pos2(x, y), galley, Color32::LIGHT_GRAY)
                    .with_angle(-std::f32::consts::FRAC_PI_4),
            );
        }

        for (row, topic) in grid.topics.iter().enumerate() {
            let label_rect = layout.cell_rect(rect.min, row, 0);
            painter.text(
                pos2(rect.min.x + 10.0, label_rect.center().y),
                Align2::LEFT_CENTER,
                topic,
                font.clone(),
                Color32::WHITE,
            );

            for col in 0..grid.pairs.len() {
                let cell = layout.cell_rect(rect.min, row, col);
                match grid.get(row, col) {
                    Some(value) => {
                        painter.rect_filled(cell, 0.0, ChartPlotter::deviation_color(value));
                        if let Some(text) = deviation_text(value) {
                            painter.text(
                                cell.center(),
                                Align2::CENTER_CENTER,
                                text,
                                font.clone(),
                                Color32::WHITE,
                            );
                        }
                    }
                    None => {
                        painter.rect_stroke(cell, 0.0, Stroke::new(1.0, Color32::from_gray(50)));
                        painter.text(
                            cell.center(),
                            Align2::CENTER_CENTER,
                            "-",
                            font.clone(),
                            Color32::from_gray(70),
                        );
                    }
                }
                if hovered == Some((row, col)) {
                    painter.rect_stroke(cell, 0.0, Stroke::new(2.0, Color32::YELLOW));
                }
            }
        }

        if let Some((row, col)) = hovered {
            let value = grid
                .get(row, col)
                .map_or_else(|| "-".to_string(), |v| format!("{v:+.3}"));
            response.on_hover_text(format!(
                "{}\n{}\nΔ {}",
                grid.topics[row],
                grid.pair_label(col),
                value
            ));
        }
    });
}
