//! Language Proximity Explorer Main Application
//! Main window with control panel and the five analysis tabs.

use crate::config::AppConfig;
use crate::data::{DataLoader, DataProcessor, DataSet, LoadReport, Mode};
use crate::gui::community_tab::CommunityTab;
use crate::gui::control_panel::{ControlPanel, ControlPanelAction, UserSettings};
use crate::gui::matrix_tab::MatrixTab;
use crate::gui::network_tab::NetworkTab;
use crate::gui::topic_outlier_tab::TopicOutlierTab;
use crate::gui::word_outlier_tab::WordOutlierTab;
use egui::{RichText, SidePanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::info;

/// Data loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        dataset: DataSet,
        report: LoadReport,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Network,
    Matrix,
    TopicOutliers,
    WordOutliers,
    Communities,
}

impl Tab {
    const ALL: [Tab; 5] = [
        Tab::Network,
        Tab::Matrix,
        Tab::TopicOutliers,
        Tab::WordOutliers,
        Tab::Communities,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Network => " 1. Network Graph ",
            Tab::Matrix => " 2. Similarity Matrix ",
            Tab::TopicOutliers => " 3. Topic Outliers ",
            Tab::WordOutliers => " 4. Word Outliers ",
            Tab::Communities => " 5. Communities & Clusters ",
        }
    }
}

/// Text of the warning shown when a load finds no global proximity data.
pub fn empty_data_warning(mode: Mode, data_dir: &std::path::Path) -> String {
    format!(
        "CRITICAL WARNING: No data loaded.\n\n\
         Ensure the '{}' folder exists\n\
         and filenames match pattern: *_lexical.csv / *_phonetic.csv\n\
         (current mode: {})",
        data_dir.display(),
        mode
    )
}

/// Main application window.
pub struct ExplorerApp {
    control_panel: ControlPanel,
    dataset: DataSet,
    active_tab: Tab,

    network: NetworkTab,
    matrix: MatrixTab,
    topic_outliers: TopicOutlierTab,
    word_outliers: WordOutlierTab,
    communities: CommunityTab,

    // Async data loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    warning: Option<String>,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        let mut settings: UserSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        config.apply(&mut settings);

        let mut app = Self {
            control_panel: ControlPanel::new(settings),
            dataset: DataSet::default(),
            active_tab: Tab::Network,
            network: NetworkTab::new(),
            matrix: MatrixTab::default(),
            topic_outliers: TopicOutlierTab::new(),
            word_outliers: WordOutlierTab::new(),
            communities: CommunityTab::new(),
            load_rx: None,
            is_loading: false,
            warning: None,
        };
        app.start_load();
        app
    }

    /// Reload every file for the current mode and folder in a background
    /// thread. A load already in flight is superseded: its receiver is
    /// dropped and its result discarded.
    fn start_load(&mut self) {
        let settings = &self.control_panel.settings;
        let loader = DataLoader::new(settings.data_dir.clone());
        let mode = settings.mode;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.control_panel.is_loading = true;
        self.control_panel
            .set_status(format!("Loading {} data...", mode));

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!(
                "Reading {} files...",
                mode
            )));
            let (dataset, report) = loader.load(mode);
            let _ = tx.send(LoadResult::Complete { dataset, report });
        });
    }

    /// Check for data loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(status);
                    }
                    LoadResult::Complete { dataset, report } => {
                        self.finish_load(dataset, &report);
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            } else {
                self.is_loading = false;
                self.control_panel.is_loading = false;
            }
        }
    }

    fn finish_load(&mut self, dataset: DataSet, report: &LoadReport) {
        let mut status = report.summary();
        let failed = report.failures().count();
        if failed > 0 {
            status.push_str(&format!(", {failed} failed"));
        }
        self.control_panel.set_status(status);

        if dataset.is_empty() {
            self.warning = Some(empty_data_warning(dataset.mode(), &report.data_dir));
        } else {
            self.warning = None;
        }

        self.control_panel
            .update_topics(DataProcessor::topic_choices(&dataset));
        self.dataset = dataset;
        self.refresh_views();
    }

    /// Recompute every tab's derived view after a selection change.
    fn refresh_views(&mut self) {
        let settings = &self.control_panel.settings;
        self.network.refresh(&self.dataset, settings);
        self.matrix.refresh(&self.dataset, settings);
        self.topic_outliers.refresh(&self.dataset, settings);
        self.word_outliers.refresh(&self.dataset, settings);
        self.communities.refresh(&self.dataset, settings);
    }

    fn handle_pick_folder(&mut self) {
        let current: PathBuf = self.control_panel.settings.data_dir.clone();
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Select data folder")
            .set_directory(&current)
            .pick_folder()
        {
            self.control_panel.settings.data_dir = path;
            self.start_load();
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::PickDataFolder => self.handle_pick_folder(),
            ControlPanelAction::Reload => self.start_load(),
            ControlPanelAction::ModeChanged => {
                info!(mode = %self.control_panel.settings.mode, "switching mode");
                self.start_load();
            }
            ControlPanelAction::ScopeChanged => self.refresh_views(),
            ControlPanelAction::ThresholdChanged => {
                self.network
                    .refresh(&self.dataset, &self.control_panel.settings);
            }
            ControlPanelAction::None => {}
        }
    }

    fn show_warning(&mut self, ctx: &egui::Context) {
        let Some(text) = &self.warning else {
            return;
        };
        let mut close = false;
        egui::Window::new("Data Load Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(text).color(egui::Color32::from_rgb(231, 76, 60)));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.warning = None;
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(
                        &mut self.active_tab,
                        tab,
                        RichText::new(tab.title()).size(14.0).strong(),
                    );
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let settings = &self.control_panel.settings;
            match self.active_tab {
                Tab::Network => self.network.show(ui),
                Tab::Matrix => self.matrix.show(ui),
                Tab::TopicOutliers => self.topic_outliers.show(ui, &self.dataset, settings),
                Tab::WordOutliers => self.word_outliers.show(ui, &self.dataset, settings),
                Tab::Communities => {
                    if let Some(scope) = self.communities.show(ui) {
                        if self.control_panel.topics.iter().any(|t| t == scope.label()) {
                            self.control_panel.settings.scope = scope;
                            self.refresh_views();
                        }
                    }
                }
            }
        });

        self.show_warning(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.control_panel.settings);
    }
}
