//! Domain data shapes shared across the pipeline layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Three-way label derived from a review's polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Every label, in the order they are reported
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Apply the sign rule: positive polarity is Positive, exactly zero is Neutral,
    /// anything below zero is Negative.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity == 0.0 {
            Sentiment::Neutral
        } else {
            Sentiment::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the review table. Immutable once loaded; `sentiment` is computed
/// from `review_text` by the loader and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub restaurant_name: String,
    pub city: String,
    pub cuisine: String,
    pub rating: f64,
    pub votes: u64,
    pub cost_for_two: f64,
    pub review_text: String,
    pub sentiment: Sentiment,
}

/// The full review table plus where and when it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ReviewRecord>,
    pub source: PathBuf,
    pub loaded_at: DateTime<Utc>,
    /// Review cells that were missing or not valid UTF-8 and were read as empty text
    pub coerced_reviews: usize,
}

impl Dataset {
    pub fn new(records: Vec<ReviewRecord>, source: PathBuf, coerced_reviews: usize) -> Self {
        Self {
            records,
            source,
            loaded_at: Utc::now(),
            coerced_reviews,
        }
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A filtered, order-preserving borrow of the dataset produced by one selection.
#[derive(Debug, Clone, Default)]
pub struct WorkingView<'a> {
    records: Vec<&'a ReviewRecord>,
}

impl<'a> WorkingView<'a> {
    pub fn new(records: Vec<&'a ReviewRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a ReviewRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ReviewRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> FromIterator<&'a ReviewRecord> for WorkingView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a ReviewRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_sign_rule() {
        assert_eq!(Sentiment::from_polarity(0.0001), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.5), Sentiment::Negative);
    }

    #[test]
    fn labels_match_display() {
        for sentiment in Sentiment::ALL {
            assert_eq!(sentiment.to_string(), sentiment.as_str());
        }
    }
}
