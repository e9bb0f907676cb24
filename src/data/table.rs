//! Table rows for the outlier tables, with free-text filtering and
//! column sorting.

use crate::data::processor::DataProcessor;
use crate::data::records::{TopicOutlierRecord, WordOutlierRecord};
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

/// A record that can be shown as a table row.
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    /// Display text for every column, in order.
    fn cells(&self) -> Vec<String>;

    /// Ordering of two rows by one column.
    fn compare(&self, other: &Self, column: usize) -> Ordering;
}

impl<T: TableRow> TableRow for &T {
    const COLUMNS: &'static [&'static str] = T::COLUMNS;

    fn cells(&self) -> Vec<String> {
        (**self).cells()
    }

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        (**self).compare(other, column)
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl TableRow for WordOutlierRecord {
    const COLUMNS: &'static [&'static str] =
        &["Type", "Topic", "Concept", "Lang Pair", "Words", "Sim", "Z-Score"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.kind.label().to_string(),
            self.topic.clone(),
            self.source_word.clone(),
            DataProcessor::pair_label(&self.lang_a, &self.lang_b, " - "),
            format!("{} / {}", self.word_a, self.word_b),
            format!("{:.2}", self.similarity),
            format!("{:.2}", self.z_score),
        ]
    }

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match column {
            5 => cmp_f64(self.similarity, other.similarity),
            6 => cmp_f64(self.z_score, other.z_score),
            c => self.cells()[c].cmp(&other.cells()[c]),
        }
    }
}

impl TableRow for TopicOutlierRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Topic",
        "Language Pair",
        "Topic Sim",
        "Global Sim",
        "Δ Diff",
        "Z-Score",
        "Type",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.topic.clone(),
            DataProcessor::pair_label(&self.lang_a, &self.lang_b, " ↔ "),
            format!("{:+.3}", self.topic_sim),
            format!("{:+.3}", self.global_sim),
            format!("{:+.3}", self.difference),
            format!("{:+.3}", self.z_score),
            self.kind.label().to_string(),
        ]
    }

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match column {
            2 => cmp_f64(self.topic_sim, other.topic_sim),
            3 => cmp_f64(self.global_sim, other.global_sim),
            4 => cmp_f64(self.difference, other.difference),
            5 => cmp_f64(self.z_score, other.z_score),
            c => self.cells()[c].cmp(&other.cells()[c]),
        }
    }
}

/// Case-insensitive row filter from the search box.
///
/// Blank text matches everything. Text that is not a valid regex is
/// matched as a plain substring.
#[derive(Debug, Clone)]
pub enum TextFilter {
    All,
    Pattern(Regex),
    Substring(String),
}

impl TextFilter {
    pub fn new(text: &str) -> Self {
        if text.trim().is_empty() {
            return TextFilter::All;
        }
        match RegexBuilder::new(text).case_insensitive(true).build() {
            Ok(re) => TextFilter::Pattern(re),
            Err(_) => TextFilter::Substring(text.to_lowercase()),
        }
    }

    pub fn matches(&self, cells: &[String]) -> bool {
        match self {
            TextFilter::All => true,
            TextFilter::Pattern(re) => cells.iter().any(|c| re.is_match(c)),
            TextFilter::Substring(needle) => {
                cells.iter().any(|c| c.to_lowercase().contains(needle))
            }
        }
    }
}

/// Sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: usize,
    pub ascending: bool,
}

impl SortOrder {
    /// Next state after a header click: ascending, then descending, then unsorted.
    pub fn toggle(current: Option<SortOrder>, column: usize) -> Option<SortOrder> {
        match current {
            Some(s) if s.column == column && s.ascending => Some(SortOrder {
                column,
                ascending: false,
            }),
            Some(s) if s.column == column => None,
            _ => Some(SortOrder {
                column,
                ascending: true,
            }),
        }
    }
}

/// Indices of the rows passing `filter`, in display order.
pub fn visible_rows<R: TableRow>(
    rows: &[R],
    filter: &TextFilter,
    sort: Option<SortOrder>,
) -> Vec<usize> {
    let mut indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(&r.cells()))
        .map(|(i, _)| i)
        .collect();

    if let Some(order) = sort {
        indices.sort_by(|&a, &b| {
            let o = rows[a].compare(&rows[b], order.column);
            if order.ascending {
                o
            } else {
                o.reverse()
            }
        });
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::OutlierKind;

    fn word(topic: &str, src: &str, sim: f64, z: f64, kind: OutlierKind) -> WordOutlierRecord {
        WordOutlierRecord {
            topic: topic.into(),
            source_word: src.into(),
            lang_a: "en".into(),
            lang_b: "de".into(),
            word_a: src.into(),
            word_b: format!("{src}-de"),
            similarity: sim,
            mean: 0.5,
            std_dev: 0.1,
            z_score: z,
            kind,
        }
    }

    fn rows() -> Vec<WordOutlierRecord> {
        vec![
            word("food", "bread", 0.4, 4.0, OutlierKind::Positive),
            word("animals", "dog", 0.1, -6.0, OutlierKind::Negative),
            word("animals", "cat", 0.3, -3.0, OutlierKind::Negative),
        ]
    }

    #[test]
    fn word_cells_use_display_names() {
        let cells = rows()[0].cells();
        assert_eq!(cells[0], "Positive");
        assert_eq!(cells[3], "English - German");
        assert_eq!(cells[4], "bread / bread-de");
        assert_eq!(cells[5], "0.40");
        assert_eq!(cells.len(), WordOutlierRecord::COLUMNS.len());
    }

    #[test]
    fn topic_cells_are_signed() {
        let rec = TopicOutlierRecord {
            topic: "food".into(),
            lang_a: "es".into(),
            lang_b: "it".into(),
            topic_sim: 0.4,
            global_sim: 0.61,
            difference: -0.21,
            z_score: -4.2,
            kind: OutlierKind::Negative,
        };
        let cells = rec.cells();
        assert_eq!(cells[1], "Spanish ↔ Italian");
        assert_eq!(cells[2], "+0.400");
        assert_eq!(cells[4], "-0.210");
    }

    #[test]
    fn blank_filter_matches_all() {
        let rows = rows();
        assert_eq!(visible_rows(&rows, &TextFilter::new("   "), None), vec![0, 1, 2]);
    }

    #[test]
    fn regex_filter_is_case_insensitive() {
        let rows = rows();
        assert_eq!(visible_rows(&rows, &TextFilter::new("ANIMALS"), None), vec![1, 2]);
        assert_eq!(visible_rows(&rows, &TextFilter::new("^(dog|bread)$"), None), vec![0, 1]);
    }

    #[test]
    fn invalid_regex_falls_back_to_substring() {
        let rows = vec![word("food", "a(b", 0.1, 1.0, OutlierKind::Positive)];
        let filter = TextFilter::new("A(");
        assert!(matches!(filter, TextFilter::Substring(_)));
        assert_eq!(visible_rows(&rows, &filter, None), vec![0]);
    }

    #[test]
    fn sort_by_numeric_column() {
        let rows = rows();
        let asc = Some(SortOrder {
            column: 6,
            ascending: true,
        });
        assert_eq!(visible_rows(&rows, &TextFilter::All, asc), vec![1, 2, 0]);
        let desc = SortOrder::toggle(asc, 6);
        assert_eq!(visible_rows(&rows, &TextFilter::All, desc), vec![0, 2, 1]);
        assert_eq!(SortOrder::toggle(desc, 6), None);
    }
}
