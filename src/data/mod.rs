//! Data module - CSV loading and derived views

pub mod languages;
mod loader;
mod processor;
mod records;
mod similarity;
mod table;

pub use loader::{DataLoader, DataSet, LoadReport, Mode};
pub use processor::{
    DataProcessor, Scope, SimilarityBand, SimilarityMatrix, TopicGroup, GLOBAL_LABEL,
};
pub use records::{OutlierKind, TopicOutlierRecord, WordOutlierRecord};
pub use table::{visible_rows, SortOrder, TableRow, TextFilter};
