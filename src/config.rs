//! Application configuration from CLI flags and environment.

use crate::data::Mode;
use crate::gui::UserSettings;
use clap::Parser;
use std::path::PathBuf;

/// Language Proximity Explorer: browse precomputed language similarity data.
#[derive(Parser, Debug, Default)]
#[command(name = "proximity_explorer", version, about)]
pub struct AppConfig {
    /// Directory holding the proximity, outlier and community CSV files.
    /// Falls back to the last used folder, then `data`.
    #[arg(long, env = "LANGPROX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Initial analysis mode: lexical or phonetic.
    #[arg(long)]
    pub mode: Option<Mode>,

    /// Initial minimum edge similarity, in percent (0-100).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Overlay explicitly given flags on restored settings.
    pub fn apply(&self, settings: &mut UserSettings) {
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_restored_settings() {
        let config = AppConfig::try_parse_from([
            "proximity_explorer",
            "--mode",
            "phonetic",
            "--threshold",
            "60",
            "--data-dir",
            "/tmp/prox",
        ])
        .unwrap();
        let mut settings = UserSettings {
            threshold: 10,
            ..UserSettings::default()
        };
        config.apply(&mut settings);
        assert_eq!(settings.mode, Mode::Phonetic);
        assert_eq!(settings.threshold, 60);
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/prox"));
    }

    #[test]
    fn absent_flags_keep_restored_settings() {
        let config = AppConfig::default();
        let mut settings = UserSettings {
            mode: Mode::Phonetic,
            threshold: 25,
            ..UserSettings::default()
        };
        let before = settings.clone();
        config.apply(&mut settings);
        assert_eq!(settings, before);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(AppConfig::try_parse_from(["proximity_explorer", "--threshold", "101"]).is_err());
        assert!(AppConfig::try_parse_from(["proximity_explorer", "--mode", "semantic"]).is_err());
    }
}
