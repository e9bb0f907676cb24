//! GUI module - User interface components

mod app;
mod community_tab;
mod control_panel;
mod matrix_tab;
mod network_tab;
mod topic_outlier_tab;
mod widgets;
mod word_outlier_tab;

pub use app::ExplorerApp;
pub use control_panel::UserSettings;
