//! Chart Plotter Module
//! Color palettes and the egui_plot outlier bar chart.

use crate::data::SimilarityBand;
use crate::stats::PairCount;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot};

/// Gamma-space hue/saturation/brightness to an opaque color.
fn hsb_color(hue: f32, saturation: f32, brightness: f32) -> Color32 {
    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match h.floor() as u8 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };
    let channel = |v: f32| (v * 255.0 + 0.5) as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}

/// Positive anomaly (closer than usual).
pub const POSITIVE_COLOR: Color32 = Color32::from_rgb(46, 204, 113);
/// Negative anomaly (more distant than usual).
pub const NEGATIVE_COLOR: Color32 = Color32::from_rgb(231, 76, 60);

pub const PANEL_BG: Color32 = Color32::from_rgb(43, 43, 43);
pub const SELECTED_BG: Color32 = Color32::from_rgb(52, 73, 94);

/// Node colors for detected communities, indexed by `id % len`.
pub const COMMUNITY_COLORS: [Color32; 15] = [
    Color32::from_rgb(230, 25, 75),
    Color32::from_rgb(60, 180, 75),
    Color32::from_rgb(255, 225, 25),
    Color32::from_rgb(0, 130, 200),
    Color32::from_rgb(245, 130, 48),
    Color32::from_rgb(145, 30, 180),
    Color32::from_rgb(70, 240, 240),
    Color32::from_rgb(240, 50, 230),
    Color32::from_rgb(210, 245, 60),
    Color32::from_rgb(250, 190, 212),
    Color32::from_rgb(0, 128, 128),
    Color32::from_rgb(220, 190, 255),
    Color32::from_rgb(170, 110, 40),
    Color32::from_rgb(255, 250, 200),
    Color32::from_rgb(128, 0, 0),
];

/// Creates colors and charts for the outlier views.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn community_color(id: u32) -> Color32 {
        COMMUNITY_COLORS[id as usize % COMMUNITY_COLORS.len()]
    }

    /// Edge color of the proximity network.
    pub fn band_color(band: SimilarityBand) -> Color32 {
        match band {
            SimilarityBand::VeryHigh => Color32::from_rgb(0xe7, 0x4c, 0x3c),
            SimilarityBand::High => Color32::from_rgb(0xe6, 0x7e, 0x22),
            SimilarityBand::Medium => Color32::from_rgb(0xf1, 0xc4, 0x0f),
            SimilarityBand::Low => Color32::from_rgb(0x2e, 0xcc, 0x71),
            SimilarityBand::Distinct => Color32::from_rgb(0x34, 0x98, 0xdb),
        }
    }

    /// Row text color by outlier direction.
    pub fn kind_color(positive: bool) -> Color32 {
        if positive {
            POSITIVE_COLOR
        } else {
            NEGATIVE_COLOR
        }
    }

    /// Similarity matrix cell: blue (0.0) through red (1.0).
    pub fn similarity_cell_color(value: f64) -> Color32 {
        let hue = if value == 0.0 {
            0.66
        } else {
            (0.7 - value * 0.7) as f32
        };
        hsb_color(hue, 0.7, 0.8)
    }

    /// Deviation heatmap cell: gray fading to green (positive) or red (negative).
    pub fn deviation_color(value: f64) -> Color32 {
        let intensity = (value.abs() / 0.5).min(1.0);
        let target = if value > 0.0 {
            POSITIVE_COLOR
        } else {
            NEGATIVE_COLOR
        };
        let lerp = |to: u8| (60.0 + (to as f64 - 60.0) * intensity) as u8;
        Color32::from_rgb(lerp(target.r()), lerp(target.g()), lerp(target.b()))
    }

    /// Stacked bar chart of outliers per language pair:
    /// negative at the bottom, positive on top.
    pub fn draw_pair_bar_chart(ui: &mut egui::Ui, counts: &[PairCount]) {
        if counts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(16.0));
            });
            return;
        }

        let labels: Vec<String> = counts.iter().map(|c| c.label.clone()).collect();

        let negative: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.negative as f64)
                    .width(0.6)
                    .name(&c.label)
                    .fill(NEGATIVE_COLOR)
            })
            .collect();
        let positive: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new(i as f64, c.positive as f64)
                    .width(0.6)
                    .name(&c.label)
                    .fill(POSITIVE_COLOR)
            })
            .collect();

        let negative_chart = BarChart::new(negative)
            .color(NEGATIVE_COLOR)
            .name("Unexpectedly Different");
        let positive_chart = BarChart::new(positive)
            .color(POSITIVE_COLOR)
            .name("Unexpectedly Similar")
            .stack_on(&[&negative_chart]);

        Plot::new("word_outlier_pairs")
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label("Outliers")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(negative_chart);
                plot_ui.bar_chart(positive_chart);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn community_colors_wrap() {
        assert_eq!(ChartPlotter::community_color(0), COMMUNITY_COLORS[0]);
        assert_eq!(ChartPlotter::community_color(16), COMMUNITY_COLORS[1]);
    }

    #[test]
    fn deviation_color_saturates() {
        assert_eq!(
            ChartPlotter::deviation_color(0.0),
            Color32::from_rgb(60, 60, 60)
        );
        assert_eq!(ChartPlotter::deviation_color(0.9), POSITIVE_COLOR);
        assert_eq!(ChartPlotter::deviation_color(-0.5), NEGATIVE_COLOR);
    }

    #[test]
    fn similarity_cells_run_blue_to_red() {
        let low = ChartPlotter::similarity_cell_color(0.05);
        let high = ChartPlotter::similarity_cell_color(0.98);
        assert!(low.b() > low.r());
        assert!(high.r() > high.b());
    }

    #[test]
    fn similarity_cells_use_gamma_space_hsb() {
        assert_eq!(
            ChartPlotter::similarity_cell_color(1.0),
            Color32::from_rgb(204, 61, 61)
        );
        assert_eq!(
            ChartPlotter::similarity_cell_color(0.5),
            Color32::from_rgb(61, 204, 75)
        );
        assert_eq!(
            ChartPlotter::similarity_cell_color(0.0),
            Color32::from_rgb(61, 67, 204)
        );
    }
}
