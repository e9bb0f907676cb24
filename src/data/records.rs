//! Outlier record types parsed from the outlier CSV files.

/// Parse a float field, falling back to 0.0 for anything malformed.
pub fn parse_f64_or_zero(field: &str) -> f64 {
    field.trim().parse::<f64>().unwrap_or(0.0)
}

/// Direction of an outlier relative to its expected similarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlierKind {
    /// Closer than usual.
    Positive,
    /// More distant than usual.
    Negative,
    Other(String),
}

impl OutlierKind {
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.eq_ignore_ascii_case("positive") {
            OutlierKind::Positive
        } else if trimmed.eq_ignore_ascii_case("negative") {
            OutlierKind::Negative
        } else {
            OutlierKind::Other(trimmed.to_string())
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, OutlierKind::Positive)
    }

    pub fn label(&self) -> &str {
        match self {
            OutlierKind::Positive => "Positive",
            OutlierKind::Negative => "Negative",
            OutlierKind::Other(s) => s,
        }
    }
}

/// A single lexical anomaly observation for one word in one language pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WordOutlierRecord {
    pub topic: String,
    pub source_word: String,
    pub lang_a: String,
    pub lang_b: String,
    pub word_a: String,
    pub word_b: String,
    pub similarity: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub z_score: f64,
    pub kind: OutlierKind,
}

impl WordOutlierRecord {
    pub const MIN_FIELDS: usize = 11;

    /// Build a record from positional CSV fields. Returns `None` for short rows.
    pub fn from_fields(d: &[String]) -> Option<Self> {
        if d.len() < Self::MIN_FIELDS {
            return None;
        }
        Some(Self {
            topic: d[0].clone(),
            source_word: d[1].clone(),
            lang_a: d[2].clone(),
            lang_b: d[3].clone(),
            word_a: d[4].clone(),
            word_b: d[5].clone(),
            similarity: parse_f64_or_zero(&d[6]),
            mean: parse_f64_or_zero(&d[7]),
            std_dev: parse_f64_or_zero(&d[8]),
            z_score: parse_f64_or_zero(&d[9]),
            kind: OutlierKind::parse(&d[10]),
        })
    }
}

/// A single topic-level deviation of a language pair from its global similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicOutlierRecord {
    pub topic: String,
    pub lang_a: String,
    pub lang_b: String,
    pub topic_sim: f64,
    pub global_sim: f64,
    pub difference: f64,
    pub z_score: f64,
    pub kind: OutlierKind,
}

impl TopicOutlierRecord {
    pub const MIN_FIELDS: usize = 10;

    /// Build a record from positional CSV fields. Columns 6 and 7 carry
    /// upstream intermediate statistics and are not used.
    pub fn from_fields(d: &[String]) -> Option<Self> {
        if d.len() < Self::MIN_FIELDS {
            return None;
        }
        Some(Self {
            topic: d[0].clone(),
            lang_a: d[1].clone(),
            lang_b: d[2].clone(),
            topic_sim: parse_f64_or_zero(&d[3]),
            global_sim: parse_f64_or_zero(&d[4]),
            difference: parse_f64_or_zero(&d[5]),
            z_score: parse_f64_or_zero(&d[8]),
            kind: OutlierKind::parse(&d[9]),
        })
    }

    /// Pair identifier in file orientation, `a|b`.
    pub fn pair_id(&self) -> String {
        format!("{}|{}", self.lang_a, self.lang_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(s: &str) -> Vec<String> {
        s.split(',').map(str::to_string).collect()
    }

    #[test]
    fn numeric_fields_parse_or_default() {
        assert_eq!(parse_f64_or_zero("0.125"), 0.125);
        assert_eq!(parse_f64_or_zero(" -1.5 "), -1.5);
        assert_eq!(parse_f64_or_zero("n/a"), 0.0);
        assert_eq!(parse_f64_or_zero(""), 0.0);
    }

    #[test]
    fn outlier_kind_is_case_insensitive() {
        assert_eq!(OutlierKind::parse("POSITIVE"), OutlierKind::Positive);
        assert_eq!(OutlierKind::parse("negative"), OutlierKind::Negative);
        assert_eq!(
            OutlierKind::parse("Mixed"),
            OutlierKind::Other("Mixed".to_string())
        );
        assert_eq!(OutlierKind::parse("Mixed").label(), "Mixed");
    }

    #[test]
    fn word_record_from_fields() {
        let rec = WordOutlierRecord::from_fields(&fields(
            "food,bread,en,de,bread,brot,0.4,0.2,0.05,4.0,Positive",
        ))
        .unwrap();
        assert_eq!(rec.topic, "food");
        assert_eq!(rec.word_b, "brot");
        assert_eq!(rec.similarity, 0.4);
        assert_eq!(rec.z_score, 4.0);
        assert!(rec.kind.is_positive());
    }

    #[test]
    fn word_record_malformed_numbers_are_zero() {
        let rec = WordOutlierRecord::from_fields(&fields(
            "food,bread,en,de,bread,brot,abc,0.2,,4.0,Negative",
        ))
        .unwrap();
        assert_eq!(rec.similarity, 0.0);
        assert_eq!(rec.std_dev, 0.0);
        assert_eq!(rec.kind, OutlierKind::Negative);
    }

    #[test]
    fn short_rows_are_rejected() {
        assert!(WordOutlierRecord::from_fields(&fields("a,b,c")).is_none());
        assert!(TopicOutlierRecord::from_fields(&fields("a,b,c,1,2,3,4,5,6")).is_none());
    }

    #[test]
    fn topic_record_skips_intermediate_columns() {
        let rec = TopicOutlierRecord::from_fields(&fields(
            "animals,en,de,0.8,0.5,0.3,0.1,0.05,2.5,Positive",
        ))
        .unwrap();
        assert_eq!(rec.topic_sim, 0.8);
        assert_eq!(rec.global_sim, 0.5);
        assert_eq!(rec.difference, 0.3);
        assert_eq!(rec.z_score, 2.5);
        assert_eq!(rec.pair_id(), "en|de");
    }
}
