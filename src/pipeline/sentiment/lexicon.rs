//! Restaurant review polarity lexicon.
//!
//! Word scores sit in [-1, 1]. Intensifiers scale the score of the word that
//! immediately follows them; negations damp and flip the next scored word.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Multiplier applied to a scored word that follows a negation
pub const NEGATION_FACTOR: f64 = -0.5;

/// How many tokens back a negation still reaches ("not very good")
pub const NEGATION_WINDOW: usize = 2;

const WORD_SCORES: &[(&str, f64)] = &[
    // Food and experience, positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("loved", 0.7),
    ("love", 0.5),
    ("lovely", 0.5),
    ("delicious", 1.0),
    ("tasty", 0.6),
    ("flavorful", 0.6),
    ("flavourful", 0.6),
    ("fresh", 0.3),
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("perfect", 1.0),
    ("superb", 1.0),
    ("outstanding", 0.5),
    ("nice", 0.6),
    ("pleasant", 0.7),
    ("enjoyed", 0.5),
    ("enjoy", 0.4),
    ("friendly", 0.4),
    ("polite", 0.5),
    ("helpful", 0.5),
    ("attentive", 0.4),
    ("quick", 0.3),
    ("fast", 0.2),
    ("clean", 0.4),
    ("cozy", 0.5),
    ("authentic", 0.5),
    ("recommended", 0.4),
    ("recommend", 0.4),
    ("worth", 0.3),
    ("affordable", 0.4),
    ("reasonable", 0.2),
    ("generous", 0.5),
    ("happy", 0.8),
    ("satisfied", 0.5),
    ("impressive", 1.0),
    ("beautiful", 0.85),
    ("welcoming", 0.5),
    ("yummy", 0.8),
    ("crispy", 0.3),
    ("hot", 0.25),
    ("decent", 0.17),
    ("okay", 0.5),
    ("ok", 0.5),
    // Food and experience, negative
    ("bad", -0.7),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("horrible", -1.0),
    ("awful", -1.0),
    ("disgusting", -1.0),
    ("poor", -0.4),
    ("slow", -0.3),
    ("expensive", -0.5),
    ("overpriced", -0.6),
    ("rude", -0.3),
    ("cold", -0.6),
    ("stale", -0.5),
    ("bland", -0.5),
    ("tasteless", -0.6),
    ("dirty", -0.6),
    ("noisy", -0.3),
    ("crowded", -0.2),
    ("greasy", -0.4),
    ("oily", -0.3),
    ("salty", -0.3),
    ("soggy", -0.5),
    ("undercooked", -0.5),
    ("overcooked", -0.4),
    ("burnt", -0.5),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("mediocre", -0.4),
    ("average", -0.15),
    ("unfriendly", -0.5),
    ("unhelpful", -0.5),
    ("careless", -0.5),
    ("wrong", -0.5),
    ("late", -0.3),
    ("small", -0.25),
    ("sad", -0.5),
    ("angry", -0.5),
    ("hate", -0.8),
    ("waste", -0.2),
    ("sick", -0.7),
    ("unacceptable", -0.8),
    ("unhygienic", -0.7),
    ("worse", -0.4),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.4),
    ("so", 1.2),
    ("too", 1.3),
    ("quite", 1.1),
    ("absolutely", 1.5),
    ("truly", 1.3),
    ("highly", 1.3),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("bit", 0.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "hardly", "barely", "cannot", "cant", "can't", "dont",
    "don't", "didnt", "didn't", "doesnt", "doesn't", "isnt", "isn't", "wasnt", "wasn't", "arent",
    "aren't", "werent", "weren't", "wont", "won't", "wouldnt", "wouldn't", "couldnt", "couldn't",
    "neither", "nor",
];

static SCORES: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| WORD_SCORES.iter().copied().collect());

static INTENSITY: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| INTENSIFIERS.iter().copied().collect());

static NEGATION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATIONS.iter().copied().collect());

/// Polarity of a single lowercase token, if the lexicon knows it
pub fn word_score(token: &str) -> Option<f64> {
    SCORES.get(token).copied()
}

/// Multiplier for an intensifying or diminishing modifier
pub fn intensifier(token: &str) -> Option<f64> {
    INTENSITY.get(token).copied()
}

pub fn is_negation(token: &str) -> bool {
    NEGATION_SET.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scores_within_unit_range() {
        for (word, score) in WORD_SCORES {
            assert!((-1.0..=1.0).contains(score), "{word} out of range");
        }
    }

    #[test]
    fn keyword_polarities() {
        assert!(word_score("amazing").unwrap() > 0.0);
        assert!(word_score("delicious").unwrap() > 0.0);
        assert!(word_score("slow").unwrap() < 0.0);
        assert!(word_score("expensive").unwrap() < 0.0);
        assert!(word_score("rude").unwrap() < 0.0);
    }

    #[test]
    fn negations_are_not_scored_words() {
        for word in NEGATIONS {
            assert!(word_score(word).is_none(), "{word} should only act as a negation");
        }
    }

    #[test]
    fn modifiers() {
        assert_eq!(intensifier("very"), Some(1.3));
        assert!(intensifier("food").is_none());
        assert!(is_negation("didn't"));
        assert!(!is_negation("food"));
    }
}
