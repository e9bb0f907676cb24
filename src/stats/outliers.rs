//! Outlier Statistics Module
//! Aggregations behind the outlier charts: per-pair counts, the
//! topic x pair deviation grid, star graph selection and insight text.

use crate::data::languages::{abbreviate, clip, full_name};
use crate::data::{OutlierKind, Scope, TopicOutlierRecord, WordOutlierRecord};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Maximum number of language pairs shown in the word outlier bar chart.
pub const MAX_CHART_PAIRS: usize = 15;

/// Maximum number of satellites around the star graph centre.
pub const MAX_STAR_SATELLITES: usize = 30;

/// Deviations at or below this magnitude are drawn without a value label.
pub const DEVIATION_LABEL_MIN: f64 = 0.05;

/// Outlier counts for one unordered language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCount {
    /// `Name A / Name B`, names in alphabetical order.
    pub label: String,
    pub positive: usize,
    pub negative: usize,
}

impl PairCount {
    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

/// Topic x language-pair grid of topic-vs-global differences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviationGrid {
    pub topics: Vec<String>,
    /// Pair ids in file orientation, `a|b`, sorted.
    pub pairs: Vec<String>,
    values: HashMap<(usize, usize), f64>,
}

impl DeviationGrid {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(&(row, col)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Column header with each name clipped to 10 characters.
    pub fn pair_label(&self, col: usize) -> String {
        let Some(pair) = self.pairs.get(col) else {
            return String::new();
        };
        let (a, b) = pair.split_once('|').unwrap_or((pair.as_str(), ""));
        format!("{} / {}", clip(full_name(a), 10), clip(full_name(b), 10))
    }
}

/// One satellite node of the star graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    pub pair_id: String,
    pub label: String,
    pub difference: f64,
    pub selected: bool,
}

impl Satellite {
    pub fn edge_label(&self) -> String {
        format!("{:+.2}", self.difference)
    }

    pub fn edge_width(&self) -> f32 {
        ((self.difference.abs() * 20.0).floor() as f32).max(2.0)
    }
}

/// Content of the star graph panel.
#[derive(Debug, Clone, PartialEq)]
pub enum StarView {
    Message(String),
    Star {
        center_label: String,
        satellites: Vec<Satellite>,
    },
}

/// Handles outlier aggregations.
pub struct OutlierStats;

impl OutlierStats {
    /// Positive/other counts per language pair, busiest first, top 15.
    pub fn pair_counts(records: &[&WordOutlierRecord]) -> Vec<PairCount> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for rec in records {
            let n1 = full_name(&rec.lang_a);
            let n2 = full_name(&rec.lang_b);
            let label = if n1 < n2 {
                format!("{n1} / {n2}")
            } else {
                format!("{n2} / {n1}")
            };
            let entry = counts.entry(label).or_default();
            if rec.kind.is_positive() {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }

        let mut pairs: Vec<PairCount> = counts
            .into_iter()
            .map(|(label, (positive, negative))| PairCount {
                label,
                positive,
                negative,
            })
            .collect();
        pairs.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.label.cmp(&b.label)));
        pairs.truncate(MAX_CHART_PAIRS);
        pairs
    }

    pub fn deviation_grid(records: &[&TopicOutlierRecord]) -> DeviationGrid {
        let topics: Vec<String> = records
            .iter()
            .map(|r| r.topic.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let pairs: Vec<String> = records
            .iter()
            .map(|r| r.pair_id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut values = HashMap::new();
        for rec in records {
            if let (Ok(row), Ok(col)) = (
                topics.binary_search(&rec.topic),
                pairs.binary_search(&rec.pair_id()),
            ) {
                values.insert((row, col), rec.difference);
            }
        }

        DeviationGrid {
            topics,
            pairs,
            values,
        }
    }

    /// Star graph for the current scope.
    ///
    /// Satellites are the pairs with the largest absolute difference;
    /// repeated pair ids are skipped.
    pub fn star_view(
        records: &[&TopicOutlierRecord],
        scope: &Scope,
        selected_pair: Option<&str>,
    ) -> StarView {
        let topic = match scope {
            Scope::Global => {
                return StarView::Message("Select a row from the table to view graph".into())
            }
            Scope::Topic(t) => t,
        };
        if records.is_empty() {
            return StarView::Message(format!("No significant outliers found for {topic}"));
        }

        let mut sorted: Vec<&TopicOutlierRecord> = records.to_vec();
        sorted.sort_by(|a, b| {
            b.difference
                .abs()
                .partial_cmp(&a.difference.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut seen = HashSet::new();
        let satellites = sorted
            .into_iter()
            .filter(|rec| seen.insert(rec.pair_id()))
            .take(MAX_STAR_SATELLITES)
            .map(|rec| {
                let pair_id = rec.pair_id();
                Satellite {
                    selected: selected_pair == Some(pair_id.as_str()),
                    label: format!(
                        "{}/{}",
                        abbreviate(full_name(&rec.lang_a), 3),
                        abbreviate(full_name(&rec.lang_b), 3)
                    ),
                    difference: rec.difference,
                    pair_id,
                }
            })
            .collect();

        StarView::Star {
            center_label: format!("Global Avg ({topic})"),
            satellites,
        }
    }

    /// Text shown above the star graph.
    pub fn insight(records: &[&TopicOutlierRecord], scope: &Scope) -> String {
        match scope {
            Scope::Global => "GLOBAL VIEW: Select a specific topic to see anomalies.".to_string(),
            Scope::Topic(topic) => {
                let found = records
                    .iter()
                    .filter(|r| matches!(r.kind, OutlierKind::Positive | OutlierKind::Negative))
                    .count();
                format!("Topic: {}\nFound {} outliers.", topic.to_uppercase(), found)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(a: &str, b: &str, kind: OutlierKind) -> WordOutlierRecord {
        WordOutlierRecord {
            topic: "food".into(),
            source_word: "bread".into(),
            lang_a: a.into(),
            lang_b: b.into(),
            word_a: "x".into(),
            word_b: "y".into(),
            similarity: 0.5,
            mean: 0.4,
            std_dev: 0.1,
            z_score: 1.0,
            kind,
        }
    }

    fn topic(t: &str, a: &str, b: &str, diff: f64, kind: OutlierKind) -> TopicOutlierRecord {
        TopicOutlierRecord {
            topic: t.into(),
            lang_a: a.into(),
            lang_b: b.into(),
            topic_sim: 0.5 + diff,
            global_sim: 0.5,
            difference: diff,
            z_score: diff * 10.0,
            kind,
        }
    }

    #[test]
    fn pair_counts_merge_orientations() {
        let recs = vec![
            word("en", "de", OutlierKind::Positive),
            word("de", "en", OutlierKind::Negative),
            word("de", "en", OutlierKind::Other("Mixed".into())),
            word("es", "it", OutlierKind::Positive),
        ];
        let refs: Vec<&WordOutlierRecord> = recs.iter().collect();
        let counts = OutlierStats::pair_counts(&refs);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].label, "English / German");
        assert_eq!(counts[0].positive, 1);
        assert_eq!(counts[0].negative, 2);
        assert_eq!(counts[1].label, "Italian / Spanish");
    }

    #[test]
    fn pair_counts_keep_top_fifteen() {
        let langs: Vec<String> = (0..20).map(|i| format!("x{i:02}")).collect();
        let recs: Vec<WordOutlierRecord> = langs
            .iter()
            .enumerate()
            .flat_map(|(i, l)| (0..=i).map(move |_| word("en", l, OutlierKind::Positive)))
            .collect();
        let refs: Vec<&WordOutlierRecord> = recs.iter().collect();
        let counts = OutlierStats::pair_counts(&refs);
        assert_eq!(counts.len(), MAX_CHART_PAIRS);
        assert_eq!(counts[0].total(), 20);
        assert!(counts.windows(2).all(|w| w[0].total() >= w[1].total()));
    }

    #[test]
    fn deviation_grid_places_values() {
        let recs = vec![
            topic("food", "en", "de", -0.21, OutlierKind::Negative),
            topic("animals", "en", "de", 0.09, OutlierKind::Positive),
            topic("animals", "es", "it", 0.3, OutlierKind::Positive),
        ];
        let refs: Vec<&TopicOutlierRecord> = recs.iter().collect();
        let grid = OutlierStats::deviation_grid(&refs);
        assert_eq!(grid.topics, vec!["animals", "food"]);
        assert_eq!(grid.pairs, vec!["en|de", "es|it"]);
        assert_eq!(grid.get(1, 0), Some(-0.21));
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid.pair_label(1), "Spanish / Italian");
    }

    #[test]
    fn star_view_orders_by_magnitude() {
        let recs = vec![
            topic("food", "en", "de", -0.05, OutlierKind::Negative),
            topic("food", "es", "it", 0.4, OutlierKind::Positive),
            topic("food", "fr", "es", -0.3, OutlierKind::Negative),
        ];
        let refs: Vec<&TopicOutlierRecord> = recs.iter().collect();
        let view = OutlierStats::star_view(&refs, &Scope::Topic("food".into()), Some("fr|es"));
        let StarView::Star {
            center_label,
            satellites,
        } = view
        else {
            panic!("expected a star");
        };
        assert_eq!(center_label, "Global Avg (food)");
        let ids: Vec<&str> = satellites.iter().map(|s| s.pair_id.as_str()).collect();
        assert_eq!(ids, vec!["es|it", "fr|es", "en|de"]);
        assert!(satellites[1].selected);
        assert_eq!(satellites[0].label, "Spa/Ita");
        assert_eq!(satellites[0].edge_label(), "+0.40");
        assert_eq!(satellites[0].edge_width(), 8.0);
        assert_eq!(satellites[2].edge_width(), 2.0);
    }

    #[test]
    fn star_view_messages() {
        assert_eq!(
            OutlierStats::star_view(&[], &Scope::Global, None),
            StarView::Message("Select a row from the table to view graph".into())
        );
        assert_eq!(
            OutlierStats::star_view(&[], &Scope::Topic("food".into()), None),
            StarView::Message("No significant outliers found for food".into())
        );
    }

    #[test]
    fn insight_counts_outliers() {
        let recs = vec![
            topic("food", "en", "de", -0.2, OutlierKind::Negative),
            topic("food", "es", "it", 0.4, OutlierKind::Positive),
            topic("food", "fr", "es", 0.1, OutlierKind::Other("n/a".into())),
        ];
        let refs: Vec<&TopicOutlierRecord> = recs.iter().collect();
        assert_eq!(
            OutlierStats::insight(&refs, &Scope::Topic("food".into())),
            "Topic: FOOD\nFound 2 outliers."
        );
        assert!(OutlierStats::insight(&refs, &Scope::Global).starts_with("GLOBAL VIEW"));
    }
}
