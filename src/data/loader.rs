//! CSV Data Loader Module
//! Reads the per-mode proximity, outlier and community files into an
//! immutable [`DataSet`] using Polars.

use crate::data::records::{parse_f64_or_zero, TopicOutlierRecord, WordOutlierRecord};
use crate::data::similarity::SimilarityMap;
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModeParseError {
    #[error("unknown analysis mode '{0}' (expected 'lexical' or 'phonetic')")]
    Unknown(String),
}

/// Analysis mode, selecting which family of files is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Spelling-based comparison.
    #[default]
    Lexical,
    /// IPA/sound-based comparison.
    Phonetic,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Lexical, Mode::Phonetic];

    /// Filename suffix, e.g. `_lexical`.
    pub fn suffix(self) -> &'static str {
        match self {
            Mode::Lexical => "_lexical",
            Mode::Phonetic => "_phonetic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Lexical => "Lexical Comparison (Spelling)",
            Mode::Phonetic => "Phonetic Comparison (IPA/Sound)",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix().trim_start_matches('_'))
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" | "_lexical" => Ok(Mode::Lexical),
            "phonetic" | "_phonetic" => Ok(Mode::Phonetic),
            other => Err(ModeParseError::Unknown(other.to_string())),
        }
    }
}

/// The fixed set of files read for each mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    GlobalProximity,
    TopicProximity,
    WordOutliers,
    TopicOutliers,
    LanguageCommunities,
    TopicCommunities,
}

impl DataFile {
    pub const ALL: [DataFile; 6] = [
        DataFile::GlobalProximity,
        DataFile::TopicProximity,
        DataFile::WordOutliers,
        DataFile::TopicOutliers,
        DataFile::LanguageCommunities,
        DataFile::TopicCommunities,
    ];

    fn stem(self) -> &'static str {
        match self {
            DataFile::GlobalProximity => "language_proximity_global",
            DataFile::TopicProximity => "language_proximity_by_topic",
            DataFile::WordOutliers => "outliers_words",
            DataFile::TopicOutliers => "outliers_topics",
            DataFile::LanguageCommunities => "language_communities",
            DataFile::TopicCommunities => "topic_communities",
        }
    }

    /// Rows with fewer fields than this are skipped.
    pub fn min_fields(self) -> usize {
        match self {
            DataFile::GlobalProximity => 3,
            DataFile::TopicProximity => 4,
            DataFile::WordOutliers => WordOutlierRecord::MIN_FIELDS,
            DataFile::TopicOutliers => TopicOutlierRecord::MIN_FIELDS,
            DataFile::LanguageCommunities => 3,
            DataFile::TopicCommunities => 2,
        }
    }

    pub fn file_name(self, mode: Mode) -> String {
        format!("{}{}.csv", self.stem(), mode.suffix())
    }
}

/// Outcome of reading one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub file_name: String,
    /// Accepted row count, or the error that left the dataset empty.
    pub result: Result<usize, String>,
}

/// Per-file summary of one reload.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub mode: Mode,
    pub data_dir: PathBuf,
    pub files: Vec<FileOutcome>,
}

impl LoadReport {
    pub fn total_rows(&self) -> usize {
        self.files.iter().filter_map(|f| f.result.as_ref().ok()).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.result.is_err())
    }

    pub fn summary(&self) -> String {
        let loaded = self.files.iter().filter(|f| f.result.is_ok()).count();
        format!(
            "Loaded {}/{} {} files ({} rows)",
            loaded,
            self.files.len(),
            self.mode,
            self.total_rows()
        )
    }
}

/// Everything read for one mode. Built once per reload and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    mode: Mode,
    global: SimilarityMap,
    by_topic: BTreeMap<String, SimilarityMap>,
    word_outliers: BTreeMap<String, Vec<WordOutlierRecord>>,
    topic_outliers: Vec<TopicOutlierRecord>,
    communities: HashMap<String, BTreeMap<String, u32>>,
    topic_meta_clusters: HashMap<String, u32>,
    meta_cluster_members: BTreeMap<u32, Vec<String>>,
}

impl DataSet {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn global(&self) -> &SimilarityMap {
        &self.global
    }

    pub fn by_topic(&self) -> &BTreeMap<String, SimilarityMap> {
        &self.by_topic
    }

    pub fn word_outliers(&self) -> &BTreeMap<String, Vec<WordOutlierRecord>> {
        &self.word_outliers
    }

    pub fn topic_outliers(&self) -> &[TopicOutlierRecord] {
        &self.topic_outliers
    }

    pub fn communities(&self) -> &HashMap<String, BTreeMap<String, u32>> {
        &self.communities
    }

    pub fn meta_cluster_of(&self, topic: &str) -> Option<u32> {
        self.topic_meta_clusters.get(topic).copied()
    }

    pub fn meta_cluster_members(&self) -> &BTreeMap<u32, Vec<String>> {
        &self.meta_cluster_members
    }

    /// True when the primary (global proximity) dataset is absent.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty()
    }

    /// Fold parsed rows of one file into the dataset. Returns the number of
    /// rows accepted.
    fn ingest(&mut self, file: DataFile, rows: Vec<Vec<String>>) -> usize {
        let min = file.min_fields();
        let mut accepted = 0;

        for d in rows {
            if d.len() < min {
                continue;
            }
            let ok = match file {
                DataFile::GlobalProximity => {
                    if d[0].is_empty() || d[1].is_empty() {
                        false
                    } else {
                        self.global.insert(&d[0], &d[1], parse_f64_or_zero(&d[2]));
                        true
                    }
                }
                DataFile::TopicProximity => {
                    if d[0].is_empty() || d[1].is_empty() || d[2].is_empty() {
                        false
                    } else {
                        self.by_topic.entry(d[0].clone()).or_default().insert(
                            &d[1],
                            &d[2],
                            parse_f64_or_zero(&d[3]),
                        );
                        true
                    }
                }
                DataFile::WordOutliers => match WordOutlierRecord::from_fields(&d) {
                    Some(rec) => {
                        self.word_outliers
                            .entry(rec.topic.clone())
                            .or_default()
                            .push(rec);
                        true
                    }
                    None => false,
                },
                DataFile::TopicOutliers => match TopicOutlierRecord::from_fields(&d) {
                    Some(rec) => {
                        self.topic_outliers.push(rec);
                        true
                    }
                    None => false,
                },
                DataFile::LanguageCommunities => match d[2].parse::<u32>() {
                    Ok(id) => {
                        self.communities
                            .entry(d[0].clone())
                            .or_default()
                            .insert(d[1].clone(), id);
                        true
                    }
                    Err(_) => {
                        debug!(row = ?d, "skipping community row with malformed id");
                        false
                    }
                },
                DataFile::TopicCommunities => match d[1].parse::<u32>() {
                    Ok(id) => {
                        self.topic_meta_clusters.insert(d[0].clone(), id);
                        self.meta_cluster_members
                            .entry(id)
                            .or_default()
                            .push(d[0].clone());
                        true
                    }
                    Err(_) => {
                        debug!(row = ?d, "skipping topic cluster row with malformed id");
                        false
                    }
                },
            };
            if ok {
                accepted += 1;
            }
        }

        accepted
    }
}

/// Strip every quote character and surrounding whitespace from a field.
fn clean_field(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

/// Handles loading the data directory with Polars.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_dir: PathBuf,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, file: DataFile, mode: Mode) -> PathBuf {
        self.data_dir.join(file.file_name(mode))
    }

    /// Read one CSV file into rows of cleaned string fields, header skipped.
    ///
    /// Every column is read as text so that numeric parsing stays lenient.
    /// Invalid UTF-8 is replaced rather than failing the file. Trailing
    /// missing fields are dropped, so a short line yields a short row.
    pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_encoding(CsvEncoding::LossyUtf8)
            .with_ignore_errors(true)
            .with_truncate_ragged_lines(true)
            .finish()?
            .collect()?;

        let columns = df
            .get_columns()
            .iter()
            .map(|col| col.cast(&DataType::String))
            .collect::<PolarsResult<Vec<Column>>>()?;
        let strings = columns
            .iter()
            .map(|col| col.as_materialized_series().str().cloned())
            .collect::<PolarsResult<Vec<StringChunked>>>()?;

        let rows = (0..df.height())
            .map(|i| {
                let fields: Vec<Option<&str>> = strings.iter().map(|ca| ca.get(i)).collect();
                let width = fields.iter().rposition(Option::is_some).map_or(0, |last| last + 1);
                fields[..width]
                    .iter()
                    .map(|f| f.map(clean_field).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(rows)
    }

    /// Load every file for `mode`. Never fails: a file that cannot be read
    /// is logged and its dataset left empty.
    pub fn load(&self, mode: Mode) -> (DataSet, LoadReport) {
        info!(mode = %mode, dir = %self.data_dir.display(), "reloading data");

        let results: Vec<(DataFile, Result<Vec<Vec<String>>, LoaderError>)> = DataFile::ALL
            .par_iter()
            .map(|&file| (file, Self::read_rows(&self.path_for(file, mode))))
            .collect();

        let mut dataset = DataSet {
            mode,
            ..DataSet::default()
        };
        let mut files = Vec::with_capacity(results.len());

        for (file, result) in results {
            let file_name = file.file_name(mode);
            let result = match result {
                Ok(rows) => {
                    let total = rows.len();
                    let accepted = dataset.ingest(file, rows);
                    if accepted < total {
                        debug!(file = %file_name, skipped = total - accepted, "skipped rows");
                    }
                    Ok(accepted)
                }
                Err(e) => {
                    warn!(file = %file_name, error = %e, "could not load file");
                    Err(e.to_string())
                }
            };
            files.push(FileOutcome { file_name, result });
        }

        let report = LoadReport {
            mode,
            data_dir: self.data_dir.clone(),
            files,
        };
        info!(pairs = dataset.global.len(), "{}", report.summary());
        if dataset.is_empty() {
            warn!(dir = %self.data_dir.display(), "no global proximity data loaded");
        }

        (dataset, report)
    }
}
