//! Stats module - outlier aggregations

mod outliers;

pub use outliers::{DeviationGrid, OutlierStats, PairCount, StarView, DEVIATION_LABEL_MIN};
