//! Symmetric language-pair similarity map.

use std::collections::{BTreeMap, BTreeSet};

/// Undirected (language, language) -> similarity map.
///
/// Pairs are stored under a canonical ordering so that `get(a, b)` and
/// `get(b, a)` always resolve to the same value. A later insert for the
/// same unordered pair replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMap {
    scores: BTreeMap<(String, String), f64>,
}

fn canonical(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl SimilarityMap {
    pub const fn new() -> Self {
        Self {
            scores: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, a: &str, b: &str, score: f64) {
        self.scores.insert(canonical(a, b), score);
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.scores.get(&canonical(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// All pairs in canonical order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.scores
            .iter()
            .map(|((a, b), s)| (a.as_str(), b.as_str(), *s))
    }

    /// Every language code mentioned by any pair.
    pub fn languages(&self) -> BTreeSet<String> {
        self.scores
            .keys()
            .flat_map(|(a, b)| [a.clone(), b.clone()])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lookup_is_symmetric() {
        let mut map = SimilarityMap::new();
        map.insert("en", "de", 0.62);
        assert_eq!(map.get("en", "de"), Some(0.62));
        assert_eq!(map.get("de", "en"), Some(0.62));
        assert_eq!(map.get("en", "fr"), None);
    }

    #[test]
    fn reverse_insert_replaces_pair() {
        let mut map = SimilarityMap::new();
        map.insert("en", "de", 0.62);
        map.insert("de", "en", 0.70);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("en", "de"), Some(0.70));
    }

    #[test]
    fn languages_are_sorted_and_unique() {
        let mut map = SimilarityMap::new();
        map.insert("fr", "es", 0.7);
        map.insert("es", "it", 0.8);
        let langs: Vec<String> = map.languages().into_iter().collect();
        assert_eq!(langs, vec!["es", "fr", "it"]);
    }

    proptest! {
        #[test]
        fn symmetric_for_any_pair(a in "[a-z]{2}", b in "[a-z]{2}", s in 0.0f64..=1.0) {
            let mut map = SimilarityMap::new();
            map.insert(&a, &b, s);
            prop_assert_eq!(map.get(&a, &b), map.get(&b, &a));
            prop_assert_eq!(map.get(&b, &a), Some(s));
        }
    }
}
