//! Charts module - Chart rendering

mod heatmap;
mod network;
mod plotter;

pub use heatmap::{draw_deviation_grid, draw_similarity_matrix};
pub use network::{ForceGraph, LinkSpec, NodeSpec};
pub use plotter::{ChartPlotter, SELECTED_BG};
