//! Data Processor Module
//! Derives scope-dependent views (graph edges, matrices, filtered records,
//! cluster trees) from a loaded [`DataSet`].

use crate::data::languages::full_name;
use crate::data::loader::DataSet;
use crate::data::records::{TopicOutlierRecord, WordOutlierRecord};
use crate::data::similarity::SimilarityMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Label used for the all-topics scope in selectors and community files.
pub const GLOBAL_LABEL: &str = "Global";

static EMPTY_SIMILARITY: SimilarityMap = SimilarityMap::new();

/// Topic scope selected by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Global,
    Topic(String),
}

impl Scope {
    pub fn from_label(label: &str) -> Self {
        if label == GLOBAL_LABEL {
            Scope::Global
        } else {
            Scope::Topic(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Scope::Global => GLOBAL_LABEL,
            Scope::Topic(t) => t,
        }
    }
}

/// Visual band of a graph edge, from its similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityBand {
    VeryHigh,
    High,
    Medium,
    Low,
    Distinct,
}

impl SimilarityBand {
    pub fn of(sim: f64) -> Self {
        if sim > 0.90 {
            SimilarityBand::VeryHigh
        } else if sim > 0.75 {
            SimilarityBand::High
        } else if sim > 0.60 {
            SimilarityBand::Medium
        } else if sim > 0.45 {
            SimilarityBand::Low
        } else {
            SimilarityBand::Distinct
        }
    }

    /// Stroke width in pixels.
    pub fn width(self) -> f32 {
        match self {
            SimilarityBand::VeryHigh => 4.0,
            SimilarityBand::High => 3.0,
            _ => 2.0,
        }
    }
}

/// One undirected edge of the proximity network.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub a: String,
    pub b: String,
    pub similarity: f64,
    /// At or above the current threshold.
    pub visible: bool,
}

impl GraphEdge {
    pub fn band(&self) -> SimilarityBand {
        SimilarityBand::of(self.similarity)
    }

    pub fn label(&self) -> Option<String> {
        self.visible.then(|| format!("{:.2}", self.similarity))
    }
}

/// Square language x language similarity matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    pub languages: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.values
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0.0)
    }

    /// A zero off the diagonal means "no data" rather than "no similarity".
    pub fn is_missing(&self, row: usize, col: usize) -> bool {
        row != col && self.cell(row, col) == 0.0
    }
}

/// One folder of the semantic topic tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicGroup {
    pub id: u32,
    pub label: String,
    pub topics: Vec<String>,
    pub is_current: bool,
}

/// Edge of the community graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterEdge {
    pub a: String,
    pub b: String,
    pub weight: f64,
}

impl ClusterEdge {
    pub fn width(&self) -> f32 {
        (self.weight * 5.0).floor() as f32
    }
}

/// Minimum weight for an edge to appear in the community graph.
pub const CLUSTER_EDGE_MIN_WEIGHT: f64 = 0.25;

/// Handles derivation of render-ready views from a dataset.
pub struct DataProcessor;

impl DataProcessor {
    /// `"Global"` followed by every topic, sorted.
    pub fn topic_choices(ds: &DataSet) -> Vec<String> {
        std::iter::once(GLOBAL_LABEL.to_string())
            .chain(ds.by_topic().keys().cloned())
            .collect()
    }

    /// Keep the previous selection if it still exists, else fall back to Global.
    pub fn resolve_scope(choices: &[String], previous: &Scope) -> Scope {
        if choices.iter().any(|c| c == previous.label()) {
            previous.clone()
        } else {
            Scope::Global
        }
    }

    pub fn similarity_for<'a>(ds: &'a DataSet, scope: &Scope) -> &'a SimilarityMap {
        match scope {
            Scope::Global => ds.global(),
            Scope::Topic(t) => ds.by_topic().get(t).unwrap_or(&EMPTY_SIMILARITY),
        }
    }

    /// Word outliers for a scope. Global concatenates every topic once.
    pub fn word_outliers_for<'a>(ds: &'a DataSet, scope: &Scope) -> Vec<&'a WordOutlierRecord> {
        match scope {
            Scope::Global => ds.word_outliers().values().flatten().collect(),
            Scope::Topic(t) => ds
                .word_outliers()
                .get(t)
                .map(|v| v.iter().collect())
                .unwrap_or_default(),
        }
    }

    pub fn topic_outliers_for<'a>(ds: &'a DataSet, scope: &Scope) -> Vec<&'a TopicOutlierRecord> {
        ds.topic_outliers()
            .iter()
            .filter(|r| match scope {
                Scope::Global => true,
                Scope::Topic(t) => &r.topic == t,
            })
            .collect()
    }

    /// Every language appearing in the global map or any topic map.
    pub fn graph_nodes(ds: &DataSet) -> BTreeSet<String> {
        let mut nodes = ds.global().languages();
        for map in ds.by_topic().values() {
            nodes.extend(map.languages());
        }
        nodes
    }

    /// Network edges for the scoped map; pairs with unknown languages are dropped.
    pub fn graph_edges(
        map: &SimilarityMap,
        nodes: &BTreeSet<String>,
        threshold: f64,
    ) -> Vec<GraphEdge> {
        map.pairs()
            .filter(|(a, b, _)| nodes.contains(*a) && nodes.contains(*b))
            .map(|(a, b, s)| GraphEdge {
                a: a.to_string(),
                b: b.to_string(),
                similarity: s,
                visible: s >= threshold,
            })
            .collect()
    }

    pub fn similarity_matrix(map: &SimilarityMap) -> SimilarityMatrix {
        let languages: Vec<String> = map.languages().into_iter().collect();
        let values = languages
            .iter()
            .map(|row| {
                languages
                    .iter()
                    .map(|col| {
                        if row == col {
                            1.0
                        } else {
                            map.get(row, col).unwrap_or(0.0)
                        }
                    })
                    .collect()
            })
            .collect();
        SimilarityMatrix { languages, values }
    }

    pub fn communities_for<'a>(ds: &'a DataSet, scope: &Scope) -> Option<&'a BTreeMap<String, u32>> {
        ds.communities().get(scope.label())
    }

    /// Edges between clustered languages above [`CLUSTER_EDGE_MIN_WEIGHT`].
    pub fn cluster_edges(
        communities: &BTreeMap<String, u32>,
        map: &SimilarityMap,
    ) -> Vec<ClusterEdge> {
        map.pairs()
            .filter(|(a, b, w)| {
                communities.contains_key(*a)
                    && communities.contains_key(*b)
                    && *w > CLUSTER_EDGE_MIN_WEIGHT
            })
            .map(|(a, b, w)| ClusterEdge {
                a: a.to_string(),
                b: b.to_string(),
                weight: w,
            })
            .collect()
    }

    /// Semantic topic groups ordered by id, members sorted.
    pub fn topic_tree(ds: &DataSet, selected: &Scope) -> Vec<TopicGroup> {
        ds.meta_cluster_members()
            .iter()
            .map(|(&id, members)| {
                let mut topics = members.clone();
                topics.sort();
                let is_current = match selected {
                    Scope::Topic(t) => ds.meta_cluster_of(t) == Some(id),
                    Scope::Global => false,
                };
                let mut label = format!("Semantic Group {} ({})", id, topics.len());
                if is_current {
                    label.push_str(" [CURRENT]");
                }
                TopicGroup {
                    id,
                    label,
                    topics,
                    is_current,
                }
            })
            .collect()
    }

    /// `Full A <sep> Full B` display label for a language pair.
    pub fn pair_label(a: &str, b: &str, sep: &str) -> String {
        format!("{}{}{}", full_name(a), sep, full_name(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{DataLoader, Mode};
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn dataset() -> (TempDir, DataSet) {
        let dir = TempDir::new().unwrap();
        let files = [
            (
                "language_proximity_global_lexical.csv",
                "a,b,s\nen,de,0.61\nes,it,0.92\nfr,es,0.2\n",
            ),
            (
                "language_proximity_by_topic_lexical.csv",
                "t,a,b,s\nfood,en,de,0.4\nanimals,es,pt,0.8\n",
            ),
            (
                "outliers_words_lexical.csv",
                "topic,word,l1,l2,w1,w2,sim,mean,std,z,type\nfood,bread,en,de,bread,brot,0.4,0.2,0.05,4.0,Positive\n\
                 animals,dog,en,de,dog,hund,0.0,0.6,0.1,-6.0,Negative\n\
                 animals,cat,en,de,cat,katze,0.3,0.6,0.1,-3.0,Negative\n",
            ),
            (
                "outliers_topics_lexical.csv",
                "topic,l1,l2,ts,gs,diff,m,s,z,type\nanimals,en,de,0.7,0.61,0.09,0,0,3.0,Positive\nfood,en,de,0.4,0.61,-0.21,0,0,-4.2,Negative\n",
            ),
            (
                "language_communities_lexical.csv",
                "t,l,c\nGlobal,en,0\nGlobal,de,0\nGlobal,es,1\nfood,en,3\n",
            ),
            ("topic_communities_lexical.csv", "t,c\nfood,1\nanimals,0\nplants,1\n"),
        ];
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let (ds, _) = DataLoader::new(dir.path()).load(Mode::Lexical);
        (dir, ds)
    }

    #[test]
    fn topic_choices_start_with_global() {
        let (_dir, ds) = dataset();
        assert_eq!(
            DataProcessor::topic_choices(&ds),
            vec!["Global", "animals", "food"]
        );
    }

    #[test]
    fn resolve_scope_keeps_existing_selection() {
        let choices = vec!["Global".to_string(), "food".to_string()];
        let food = Scope::Topic("food".into());
        assert_eq!(DataProcessor::resolve_scope(&choices, &food), food);
        assert_eq!(
            DataProcessor::resolve_scope(&choices, &Scope::Topic("gone".into())),
            Scope::Global
        );
    }

    #[test]
    fn global_word_outliers_aggregate_without_duplicates() {
        let (_dir, ds) = dataset();
        let all = DataProcessor::word_outliers_for(&ds, &Scope::Global);
        let per_topic: usize = ds.word_outliers().values().map(Vec::len).sum();
        assert_eq!(all.len(), per_topic);
        assert_eq!(all.len(), 3);

        let animals = DataProcessor::word_outliers_for(&ds, &Scope::Topic("animals".into()));
        assert_eq!(animals.len(), 2);
        assert!(DataProcessor::word_outliers_for(&ds, &Scope::Topic("none".into())).is_empty());
    }

    #[test]
    fn topic_outliers_filter_by_scope() {
        let (_dir, ds) = dataset();
        assert_eq!(DataProcessor::topic_outliers_for(&ds, &Scope::Global).len(), 2);
        let food = DataProcessor::topic_outliers_for(&ds, &Scope::Topic("food".into()));
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].difference, -0.21);
    }

    #[test]
    fn graph_edges_respect_threshold() {
        let (_dir, ds) = dataset();
        let nodes = DataProcessor::graph_nodes(&ds);
        assert!(nodes.contains("pt"));
        let edges = DataProcessor::graph_edges(ds.global(), &nodes, 0.61);
        assert_eq!(edges.len(), 3);
        for e in &edges {
            assert_eq!(e.visible, e.similarity >= 0.61);
        }
        let en_de = edges.iter().find(|e| e.a == "de" && e.b == "en").unwrap();
        assert!(en_de.visible);
        assert_eq!(en_de.label().as_deref(), Some("0.61"));
        assert_eq!(en_de.band(), SimilarityBand::Medium);
    }

    #[test]
    fn unknown_topic_yields_empty_similarity() {
        let (_dir, ds) = dataset();
        assert!(DataProcessor::similarity_for(&ds, &Scope::Topic("x".into())).is_empty());
    }

    #[test]
    fn bands_match_thresholds() {
        assert_eq!(SimilarityBand::of(0.95), SimilarityBand::VeryHigh);
        assert_eq!(SimilarityBand::of(0.90), SimilarityBand::High);
        assert_eq!(SimilarityBand::of(0.5), SimilarityBand::Low);
        assert_eq!(SimilarityBand::of(0.45), SimilarityBand::Distinct);
        assert_eq!(SimilarityBand::VeryHigh.width(), 4.0);
        assert_eq!(SimilarityBand::Low.width(), 2.0);
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let (_dir, ds) = dataset();
        let m = DataProcessor::similarity_matrix(ds.global());
        assert_eq!(m.languages, vec!["de", "en", "es", "fr", "it"]);
        for i in 0..m.languages.len() {
            assert_eq!(m.cell(i, i), 1.0);
            for j in 0..m.languages.len() {
                assert_eq!(m.cell(i, j), m.cell(j, i));
            }
        }
        assert_eq!(m.cell(0, 1), 0.61);
        assert!(m.is_missing(0, 2));
        assert!(!m.is_missing(1, 1));
    }

    #[test]
    fn cluster_edges_need_both_languages_and_weight() {
        let (_dir, ds) = dataset();
        let comms = DataProcessor::communities_for(&ds, &Scope::Global).unwrap();
        let edges = DataProcessor::cluster_edges(comms, ds.global());
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].width(), 3.0);
        assert!(DataProcessor::communities_for(&ds, &Scope::Topic("animals".into())).is_none());
    }

    #[test]
    fn topic_tree_marks_current_group() {
        let (_dir, ds) = dataset();
        let tree = DataProcessor::topic_tree(&ds, &Scope::Topic("plants".into()));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].label, "Semantic Group 0 (1)");
        assert_eq!(tree[1].label, "Semantic Group 1 (2) [CURRENT]");
        assert_eq!(tree[1].topics, vec!["food", "plants"]);
    }

    proptest! {
        #[test]
        fn threshold_splits_edges(
            scores in proptest::collection::vec(0.0f64..=1.0, 1..20),
            threshold in 0.0f64..=1.0,
        ) {
            let mut map = SimilarityMap::new();
            for (i, s) in scores.iter().enumerate() {
                map.insert(&format!("l{i:02}"), "base", *s);
            }
            let nodes = map.languages();
            let edges = DataProcessor::graph_edges(&map, &nodes, threshold);
            prop_assert_eq!(edges.len(), scores.len());
            let visible: Vec<&GraphEdge> = edges.iter().filter(|e| e.visible).collect();
            prop_assert!(visible.iter().all(|e| e.similarity >= threshold));
            prop_assert!(edges.iter().filter(|e| !e.visible).all(|e| e.similarity < threshold));
            let expected = scores.iter().filter(|s| **s >= threshold).count();
            prop_assert_eq!(visible.len(), expected);
        }
    }
}
