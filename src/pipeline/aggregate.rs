//! Pure aggregations over a working view: scalar metrics, health status,
//! sentiment distribution, group rollups, excerpt lists and chart points.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::InsightConfig;
use crate::constants::NO_DATA;
use crate::domain::{Sentiment, WorkingView};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalarMetrics {
    pub review_count: usize,
    /// `None` when the view is empty; never reported as zero
    pub mean_rating: Option<f64>,
    pub total_votes: u64,
}

impl ScalarMetrics {
    pub fn mean_rating_display(&self) -> String {
        match self.mean_rating {
            Some(mean) => format!("{mean:.2}"),
            None => NO_DATA.to_string(),
        }
    }
}

pub fn scalar_metrics(view: &WorkingView<'_>) -> ScalarMetrics {
    ScalarMetrics {
        review_count: view.len(),
        mean_rating: mean(view.iter().map(|r| r.rating)),
        total_votes: view.iter().fold(0u64, |total, r| total.saturating_add(r.votes)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Three-tier classification of a restaurant's mean rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Excellent,
    NeedsImprovement,
    AtRisk,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::NeedsImprovement => "Needs Improvement",
            HealthStatus::AtRisk => "At Risk",
        }
    }

    /// Traffic-light colour used by the dashboard
    pub fn indicator(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "green",
            HealthStatus::NeedsImprovement => "yellow",
            HealthStatus::AtRisk => "red",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Undefined (`None`) when there is no mean rating to classify.
pub fn health_status(mean_rating: Option<f64>, config: &InsightConfig) -> Option<HealthStatus> {
    let mean = mean_rating?;
    Some(if mean >= config.excellent_min_rating {
        HealthStatus::Excellent
    } else if mean >= config.needs_improvement_min_rating {
        HealthStatus::NeedsImprovement
    } else {
        HealthStatus::AtRisk
    })
}

/// Record counts per sentiment label; every label is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    /// (label, count) for all three labels in reporting order, zeros included
    pub fn entries(&self) -> Vec<(Sentiment, usize)> {
        Sentiment::ALL.iter().map(|s| (*s, self.count(*s))).collect()
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

pub fn sentiment_distribution(view: &WorkingView<'_>) -> SentimentDistribution {
    view.iter()
        .fold(SentimentDistribution::default(), |mut dist, r| {
            match r.sentiment {
                Sentiment::Positive => dist.positive += 1,
                Sentiment::Neutral => dist.neutral += 1,
                Sentiment::Negative => dist.negative += 1,
            }
            dist
        })
}

/// One row of a group-by rollup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRollup {
    pub key: String,
    pub value: f64,
    pub members: usize,
}

/// Mean rating per city, sorted by city. Only cities present in the view appear.
pub fn mean_rating_by_city(view: &WorkingView<'_>) -> Vec<GroupRollup> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in view.iter() {
        let entry = groups.entry(r.city.as_str()).or_insert((0.0, 0));
        entry.0 += r.rating;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(city, (sum, members))| GroupRollup {
            key: city.to_string(),
            value: sum / members as f64,
            members,
        })
        .collect()
}

/// Total votes per cuisine, sorted by cuisine. Only cuisines present in the view appear.
pub fn total_votes_by_cuisine(view: &WorkingView<'_>) -> Vec<GroupRollup> {
    let mut groups: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for r in view.iter() {
        let entry = groups.entry(r.cuisine.as_str()).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(r.votes);
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(cuisine, (votes, members))| GroupRollup {
            key: cuisine.to_string(),
            value: votes as f64,
            members,
        })
        .collect()
}

/// The first `limit` review texts with the given label, in dataset order.
/// `None` means the bucket is empty ("no data"), which is not an error.
pub fn review_excerpts(
    view: &WorkingView<'_>,
    sentiment: Sentiment,
    limit: usize,
) -> Option<Vec<String>> {
    let excerpts: Vec<String> = view
        .iter()
        .filter(|r| r.sentiment == sentiment)
        .take(limit)
        .map(|r| r.review_text.clone())
        .collect();
    (!excerpts.is_empty()).then_some(excerpts)
}

/// One point of the price vs. rating scatter; `votes` sizes the marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub cost_for_two: f64,
    pub rating: f64,
    pub votes: u64,
}

pub fn price_points(view: &WorkingView<'_>) -> Vec<PricePoint> {
    view.iter()
        .map(|r| PricePoint {
            cost_for_two: r.cost_for_two,
            rating: r.rating,
            votes: r.votes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReviewRecord;

    fn record(
        city: &str,
        cuisine: &str,
        rating: f64,
        votes: u64,
        text: &str,
        sentiment: Sentiment,
    ) -> ReviewRecord {
        ReviewRecord {
            restaurant_name: "Cafe Luna".to_string(),
            city: city.to_string(),
            cuisine: cuisine.to_string(),
            rating,
            votes,
            cost_for_two: 700.0,
            review_text: text.to_string(),
            sentiment,
        }
    }

    #[test]
    fn cafe_luna_needs_improvement() {
        let records = vec![
            record("Delhi", "Italian", 5.0, 10, "a", Sentiment::Positive),
            record("Delhi", "Italian", 4.0, 20, "b", Sentiment::Positive),
            record("Delhi", "Italian", 2.0, 5, "c", Sentiment::Negative),
        ];
        let view: WorkingView = records.iter().collect();
        let metrics = scalar_metrics(&view);

        assert_eq!(metrics.review_count, 3);
        assert_eq!(metrics.total_votes, 35);
        assert_eq!(metrics.mean_rating_display(), "3.67");
        assert_eq!(
            health_status(metrics.mean_rating, &InsightConfig::default()),
            Some(HealthStatus::NeedsImprovement)
        );
    }

    #[test]
    fn health_boundaries_are_inclusive_below() {
        let config = InsightConfig::default();
        assert_eq!(health_status(Some(4.0), &config), Some(HealthStatus::Excellent));
        assert_eq!(health_status(Some(3.0), &config), Some(HealthStatus::NeedsImprovement));
        assert_eq!(health_status(Some(2.99), &config), Some(HealthStatus::AtRisk));
        assert_eq!(health_status(None, &config), None);
    }

    #[test]
    fn health_follows_configured_thresholds() {
        let config = InsightConfig {
            excellent_min_rating: 4.5,
            needs_improvement_min_rating: 2.0,
            ..InsightConfig::default()
        };
        assert_eq!(health_status(Some(4.2), &config), Some(HealthStatus::NeedsImprovement));
        assert_eq!(health_status(Some(2.5), &config), Some(HealthStatus::NeedsImprovement));
    }

    #[test]
    fn empty_view_reports_no_data() {
        let view = WorkingView::default();
        let metrics = scalar_metrics(&view);
        assert_eq!(metrics.review_count, 0);
        assert_eq!(metrics.total_votes, 0);
        assert_eq!(metrics.mean_rating, None);
        assert_eq!(metrics.mean_rating_display(), NO_DATA);
        assert_eq!(sentiment_distribution(&view), SentimentDistribution::default());
        assert!(review_excerpts(&view, Sentiment::Negative, 5).is_none());
        assert!(mean_rating_by_city(&view).is_empty());
    }

    #[test]
    fn distribution_is_zero_filled_and_sums_to_count() {
        let records = vec![
            record("Delhi", "Italian", 4.0, 1, "a", Sentiment::Positive),
            record("Delhi", "Italian", 4.0, 1, "b", Sentiment::Positive),
        ];
        let view: WorkingView = records.iter().collect();
        let dist = sentiment_distribution(&view);
        let entries = dist.entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], (Sentiment::Neutral, 0));
        assert_eq!(entries[2], (Sentiment::Negative, 0));
        assert_eq!(dist.total(), view.len());
    }

    #[test]
    fn rollups_omit_absent_groups() {
        let records = vec![
            record("Delhi", "Italian", 4.0, 10, "a", Sentiment::Neutral),
            record("Delhi", "Indian", 3.0, 5, "b", Sentiment::Neutral),
        ];
        let view: WorkingView = records.iter().collect();

        let by_city = mean_rating_by_city(&view);
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].key, "Delhi");
        assert_eq!(by_city[0].value, 3.5);
        assert_eq!(by_city[0].members, 2);
        assert!(by_city.iter().all(|g| g.key != "Mumbai"));

        let by_cuisine = total_votes_by_cuisine(&view);
        let keys: Vec<&str> = by_cuisine.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Indian", "Italian"]);
        assert_eq!(by_cuisine[1].value, 10.0);
    }

    #[test]
    fn excerpts_take_first_five_in_order() {
        let records: Vec<ReviewRecord> = (0..7)
            .map(|i| record("Delhi", "Italian", 1.0, 1, &format!("bad {i}"), Sentiment::Negative))
            .collect();
        let view: WorkingView = records.iter().collect();

        let complaints = review_excerpts(&view, Sentiment::Negative, 5).unwrap();
        assert_eq!(complaints, vec!["bad 0", "bad 1", "bad 2", "bad 3", "bad 4"]);
        assert!(review_excerpts(&view, Sentiment::Positive, 5).is_none());
        assert_eq!(review_excerpts(&view, Sentiment::Negative, 10).unwrap().len(), 7);
    }

    #[test]
    fn price_points_follow_view() {
        let records = vec![record("Delhi", "Italian", 3.5, 42, "a", Sentiment::Neutral)];
        let view: WorkingView = records.iter().collect();
        assert_eq!(
            price_points(&view),
            vec![PricePoint { cost_for_two: 700.0, rating: 3.5, votes: 42 }]
        );
    }

    #[test]
    fn vote_totals_saturate_instead_of_overflowing() {
        let records = vec![
            record("Delhi", "Italian", 4.0, u64::MAX, "a", Sentiment::Neutral),
            record("Delhi", "Italian", 3.0, 1, "b", Sentiment::Neutral),
        ];
        let view: WorkingView = records.iter().collect();

        assert_eq!(scalar_metrics(&view).total_votes, u64::MAX);
        let rollups = total_votes_by_cuisine(&view);
        assert_eq!(rollups.len(), 1);
        assert_eq!(rollups[0].value, u64::MAX as f64);
        assert_eq!(rollups[0].members, 2);
    }
}
