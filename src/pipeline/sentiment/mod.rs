//! Sentiment classification: a polarity score in [-1, 1] thresholded into
//! Positive / Neutral / Negative.

pub mod lexicon;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Sentiment;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("token pattern is valid"));

/// Split text into lowercase word tokens. Punctuation and symbols are dropped;
/// apostrophes inside a word are kept so contractions stay whole.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Anything that can estimate the polarity of a piece of text.
pub trait PolarityScorer: Send + Sync {
    /// Polarity in [-1, 1]; 0.0 when nothing in the text carries sentiment
    fn polarity(&self, text: &str) -> f64;
}

/// A scored token and the contribution it made after modifiers
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredToken {
    pub token: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolarityReport {
    pub polarity: f64,
    pub scored: Vec<ScoredToken>,
}

/// Rule-based scorer over the built-in restaurant review lexicon.
///
/// The polarity is the mean of the scored words. A word right after an
/// intensifier is scaled by it, and a negation up to two tokens earlier
/// multiplies the word by -0.5. Unknown tokens contribute nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score `text` and keep track of which tokens contributed.
    pub fn analyze(&self, text: &str) -> PolarityReport {
        let tokens = tokenize(text);
        let mut scored = Vec::new();
        let mut negation_at: Option<usize> = None;
        let mut intensity: Option<(usize, f64)> = None;

        for (idx, token) in tokens.iter().enumerate() {
            if lexicon::is_negation(token) {
                negation_at = Some(idx);
                continue;
            }
            if let Some(mult) = lexicon::intensifier(token) {
                intensity = Some((idx, mult));
                continue;
            }

            let Some(mut score) = lexicon::word_score(token) else {
                continue;
            };

            if let Some((at, mult)) = intensity.take() {
                if at + 1 == idx {
                    score = (score * mult).clamp(-1.0, 1.0);
                }
            }
            if let Some(at) = negation_at.take() {
                if idx - at <= lexicon::NEGATION_WINDOW {
                    score *= lexicon::NEGATION_FACTOR;
                }
            }

            scored.push(ScoredToken {
                token: token.clone(),
                score,
            });
        }

        let polarity = if scored.is_empty() {
            0.0
        } else {
            let sum: f64 = scored.iter().map(|s| s.score).sum();
            (sum / scored.len() as f64).clamp(-1.0, 1.0)
        };

        PolarityReport { polarity, scored }
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        self.analyze(text).polarity
    }
}

/// Maps review text to a three-way label through a polarity scorer.
pub struct SentimentClassifier<S: PolarityScorer = LexiconScorer> {
    scorer: S,
}

/// The classifier applied to every review at load time
pub type ReviewClassifier = SentimentClassifier<LexiconScorer>;

impl Default for ReviewClassifier {
    fn default() -> Self {
        Self::new(LexiconScorer::new())
    }
}

impl<S: PolarityScorer> SentimentClassifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::Neutral;
        }
        Sentiment::from_polarity(self.scorer.polarity(text))
    }
}
