//! Advisory rules: canned improvement suggestions triggered by keywords in the
//! reviews or by a low mean rating. Every rule is evaluated independently.

use serde::Serialize;
use tracing::debug;

use crate::config::InsightConfig;
use crate::domain::WorkingView;

/// How an advisory should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdvisoryTone {
    Warning,
    Info,
    Success,
}

impl AdvisoryTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryTone::Warning => "warning",
            AdvisoryTone::Info => "info",
            AdvisoryTone::Success => "success",
        }
    }
}

/// The rule that produced an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AdvisoryRule {
    LowRating,
    Slow,
    Expensive,
    Rude,
    Amazing,
    Delicious,
}

impl AdvisoryRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryRule::LowRating => "low_rating",
            AdvisoryRule::Slow => "slow",
            AdvisoryRule::Expensive => "expensive",
            AdvisoryRule::Rude => "rude",
            AdvisoryRule::Amazing => "amazing",
            AdvisoryRule::Delicious => "delicious",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub rule: AdvisoryRule,
    pub tone: AdvisoryTone,
    pub message: &'static str,
}

struct KeywordRule {
    keyword: &'static str,
    rule: AdvisoryRule,
    tone: AdvisoryTone,
    message: &'static str,
}

const LOW_RATING_MESSAGE: &str = "Your rating is low. Focus on improving food quality and service.";

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        keyword: "slow",
        rule: AdvisoryRule::Slow,
        tone: AdvisoryTone::Info,
        message: "Customers mention slow service. Improve service speed.",
    },
    KeywordRule {
        keyword: "expensive",
        rule: AdvisoryRule::Expensive,
        tone: AdvisoryTone::Info,
        message: "Customers feel pricing is high. Review your pricing strategy.",
    },
    KeywordRule {
        keyword: "rude",
        rule: AdvisoryRule::Rude,
        tone: AdvisoryTone::Info,
        message: "Train staff to improve customer interaction.",
    },
    KeywordRule {
        keyword: "amazing",
        rule: AdvisoryRule::Amazing,
        tone: AdvisoryTone::Success,
        message: "Customers love your food quality. Maintain consistency!",
    },
    KeywordRule {
        keyword: "delicious",
        rule: AdvisoryRule::Delicious,
        tone: AdvisoryTone::Success,
        message: "Customers call your dishes delicious. Keep the recipes consistent!",
    },
];

/// Evaluate every advisory rule against the view.
///
/// The low-rating rule comes first and fires only when a mean rating exists and
/// is below the configured threshold. Keyword rules match case-insensitive
/// substrings of the space-joined review texts, so "slowly" fires "slow".
pub fn advisories(
    view: &WorkingView<'_>,
    mean_rating: Option<f64>,
    config: &InsightConfig,
) -> Vec<Advisory> {
    let mut fired = Vec::new();

    if mean_rating.is_some_and(|mean| mean < config.low_rating_threshold) {
        fired.push(Advisory {
            rule: AdvisoryRule::LowRating,
            tone: AdvisoryTone::Warning,
            message: LOW_RATING_MESSAGE,
        });
    }

    let corpus = view
        .iter()
        .map(|r| r.review_text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    fired.extend(
        KEYWORD_RULES
            .iter()
            .filter(|k| corpus.contains(k.keyword))
            .map(|k| Advisory {
                rule: k.rule,
                tone: k.tone,
                message: k.message,
            }),
    );

    debug!(fired = fired.len(), "Evaluated advisory rules");
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReviewRecord, Sentiment};

    fn record(rating: f64, text: &str) -> ReviewRecord {
        ReviewRecord {
            restaurant_name: "Cafe Luna".to_string(),
            city: "Delhi".to_string(),
            cuisine: "Italian".to_string(),
            rating,
            votes: 1,
            cost_for_two: 500.0,
            review_text: text.to_string(),
            sentiment: Sentiment::Neutral,
        }
    }

    fn rules(fired: &[Advisory]) -> Vec<AdvisoryRule> {
        fired.iter().map(|a| a.rule).collect()
    }

    #[test]
    fn keywords_fire_independently() {
        let records = vec![
            record(4.0, "Service was slow but food amazing"),
            record(4.0, "too expensive"),
        ];
        let view: WorkingView = records.iter().collect();
        let fired = advisories(&view, Some(4.0), &InsightConfig::default());
        assert_eq!(
            rules(&fired),
            vec![AdvisoryRule::Slow, AdvisoryRule::Expensive, AdvisoryRule::Amazing]
        );
    }

    #[test]
    fn low_rating_is_separate_from_keywords() {
        let records = vec![
            record(2.0, "Service was slow but food amazing"),
            record(3.0, "too expensive"),
        ];
        let view: WorkingView = records.iter().collect();
        let fired = advisories(&view, Some(2.5), &InsightConfig::default());
        assert_eq!(fired.len(), 4);
        assert_eq!(fired[0].rule, AdvisoryRule::LowRating);
        assert_eq!(fired[0].tone, AdvisoryTone::Warning);
    }

    #[test]
    fn low_rating_threshold_is_strict() {
        let view = WorkingView::default();
        assert!(advisories(&view, Some(3.0), &InsightConfig::default()).is_empty());
        assert_eq!(advisories(&view, Some(2.99), &InsightConfig::default()).len(), 1);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let records = vec![record(4.0, "SLOWLY served, RUDELY handled, DELICIOUS though")];
        let view: WorkingView = records.iter().collect();
        let fired = advisories(&view, Some(4.0), &InsightConfig::default());
        assert_eq!(
            rules(&fired),
            vec![AdvisoryRule::Slow, AdvisoryRule::Rude, AdvisoryRule::Delicious]
        );
    }

    #[test]
    fn keywords_do_not_match_across_review_boundaries_without_space() {
        let records = vec![record(4.0, "sl"), record(4.0, "ow")];
        let view: WorkingView = records.iter().collect();
        assert!(advisories(&view, Some(4.0), &InsightConfig::default()).is_empty());
    }

    #[test]
    fn empty_view_fires_nothing() {
        let view = WorkingView::default();
        assert!(advisories(&view, None, &InsightConfig::default()).is_empty());
    }

    #[test]
    fn all_six_can_fire_together() {
        let records = vec![record(1.0, "slow expensive rude amazing delicious")];
        let view: WorkingView = records.iter().collect();
        assert_eq!(advisories(&view, Some(1.0), &InsightConfig::default()).len(), 6);
    }
}
