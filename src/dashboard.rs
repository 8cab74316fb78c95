//! One dashboard core for both presentation modes.
//!
//! A [`Selection`] picks the working view (one restaurant, or city/cuisine
//! facets); [`build_report`] runs every aggregation over it and returns a
//! [`DashboardReport`] that the web pages, the JSON API and the CLI all render.

use serde::Serialize;
use std::time::Instant;
use tracing::{info, info_span};

use crate::config::InsightConfig;
use crate::domain::{Dataset, ReviewRecord, Sentiment, WorkingView};
use crate::observability::metrics;
use crate::pipeline::aggregate::{
    self, GroupRollup, HealthStatus, PricePoint, ScalarMetrics, SentimentDistribution,
};
use crate::pipeline::filter::{self, FacetSelection};
use crate::pipeline::insights::{self, Advisory};
use crate::pipeline::wordcloud::{self, WordFrequency};

/// What the user picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Selection {
    /// Single restaurant ("Restaurant Login")
    Restaurant { name: String },
    /// Cities and cuisines
    Facets(FacetSelection),
}

impl Selection {
    pub fn restaurant(name: impl Into<String>) -> Self {
        Selection::Restaurant { name: name.into() }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Selection::Restaurant { .. } => "restaurant",
            Selection::Facets(_) => "facets",
        }
    }

    /// Apply the selection to the dataset
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> WorkingView<'a> {
        match self {
            Selection::Restaurant { name } => filter::select_restaurant(dataset, name),
            Selection::Facets(facets) => filter::select_facets(dataset, facets),
        }
    }
}

/// Group rollups shown in facet mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rollups {
    pub mean_rating_by_city: Vec<GroupRollup>,
    pub total_votes_by_cuisine: Vec<GroupRollup>,
}

/// Everything the dashboard shows for one selection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub selection: Selection,
    pub metrics: ScalarMetrics,
    /// Restaurant mode only; `None` there means no data
    pub health: Option<HealthStatus>,
    pub sentiment: SentimentDistribution,
    /// Facet mode only
    pub rollups: Option<Rollups>,
    pub price_points: Vec<PricePoint>,
    pub word_cloud: Vec<WordFrequency>,
    /// First few negative reviews; `None` when there are none
    pub complaints: Option<Vec<String>>,
    /// First few positive reviews; `None` when there are none
    pub praise: Option<Vec<String>>,
    pub advisories: Vec<Advisory>,
    pub records: Vec<ReviewRecord>,
}

impl DashboardReport {
    pub fn is_empty(&self) -> bool {
        self.metrics.review_count == 0
    }

    /// Sentiment counts paired with their label, for charts and tables
    pub fn sentiment_entries(&self) -> Vec<(Sentiment, usize)> {
        self.sentiment.entries()
    }
}

/// Run the selection and every aggregation over the resulting view.
pub fn build_report(
    dataset: &Dataset,
    selection: &Selection,
    config: &InsightConfig,
) -> DashboardReport {
    let span = info_span!("build_report", mode = selection.mode());
    let _enter = span.enter();
    let started = Instant::now();

    let view = selection.apply(dataset);
    let report = report_for_view(&view, selection, config);

    if report.is_empty() {
        metrics::dashboard::empty_view(selection.mode());
    }
    for advisory in &report.advisories {
        metrics::dashboard::advisory_fired(advisory.rule.as_str());
    }
    metrics::dashboard::report_built(selection.mode(), started.elapsed().as_secs_f64());

    info!(
        reviews = report.metrics.review_count,
        advisories = report.advisories.len(),
        "Built dashboard report"
    );
    report
}

/// Aggregate an already-selected view. Records no metrics and does no I/O.
pub fn report_for_view(
    view: &WorkingView<'_>,
    selection: &Selection,
    config: &InsightConfig,
) -> DashboardReport {
    let metrics = aggregate::scalar_metrics(view);

    let (health, rollups) = match selection {
        Selection::Restaurant { .. } => {
            (aggregate::health_status(metrics.mean_rating, config), None)
        }
        Selection::Facets(_) => (
            None,
            Some(Rollups {
                mean_rating_by_city: aggregate::mean_rating_by_city(view),
                total_votes_by_cuisine: aggregate::total_votes_by_cuisine(view),
            }),
        ),
    };

    DashboardReport {
        selection: selection.clone(),
        metrics,
        health,
        sentiment: aggregate::sentiment_distribution(view),
        rollups,
        price_points: aggregate::price_points(view),
        word_cloud: wordcloud::word_frequencies(view, config.word_cloud_max_words),
        complaints: aggregate::review_excerpts(view, Sentiment::Negative, config.excerpt_limit),
        praise: aggregate::review_excerpts(view, Sentiment::Positive, config.excerpt_limit),
        advisories: insights::advisories(view, metrics.mean_rating, config),
        records: view.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::filter::FacetFilter;
    use crate::pipeline::insights::AdvisoryRule;
    use std::path::PathBuf;

    fn record(
        name: &str,
        city: &str,
        cuisine: &str,
        rating: f64,
        text: &str,
        sentiment: Sentiment,
    ) -> ReviewRecord {
        ReviewRecord {
            restaurant_name: name.to_string(),
            city: city.to_string(),
            cuisine: cuisine.to_string(),
            rating,
            votes: 10,
            cost_for_two: 600.0,
            review_text: text.to_string(),
            sentiment,
        }
    }

    const POS: Sentiment = Sentiment::Positive;
    const NEG: Sentiment = Sentiment::Negative;

    fn config() -> InsightConfig {
        InsightConfig::default()
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                record("Cafe Luna", "Delhi", "Italian", 5.0, "Delicious pasta", POS),
                record("Cafe Luna", "Delhi", "Italian", 4.0, "Good but slow", POS),
                record("Cafe Luna", "Delhi", "Italian", 2.0, "Rude staff", NEG),
                record("Spice Route", "Mumbai", "Indian", 2.5, "Too expensive", NEG),
            ],
            PathBuf::from("test.csv"),
            0,
        )
    }

    #[test]
    fn restaurant_mode_has_health_but_no_rollups() {
        let data = dataset();
        let report = build_report(&data, &Selection::restaurant("Cafe Luna"), &config());

        assert_eq!(report.metrics.review_count, 3);
        assert_eq!(report.health, Some(HealthStatus::NeedsImprovement));
        assert!(report.rollups.is_none());
        assert_eq!(report.complaints, Some(vec!["Rude staff".to_string()]));
        assert_eq!(report.praise.as_ref().map(Vec::len), Some(2));
        let rules: Vec<AdvisoryRule> = report.advisories.iter().map(|a| a.rule).collect();
        assert_eq!(rules, vec![AdvisoryRule::Slow, AdvisoryRule::Rude, AdvisoryRule::Delicious]);
        assert_eq!(report.records.len(), 3);
    }

    #[test]
    fn facet_mode_has_rollups_but_no_health() {
        let data = dataset();
        let report = build_report(&data, &Selection::Facets(FacetSelection::default()), &config());

        assert!(report.health.is_none());
        let rollups = report.rollups.expect("facet mode rollups");
        assert_eq!(rollups.mean_rating_by_city.len(), 2);
        assert_eq!(rollups.total_votes_by_cuisine.len(), 2);
        assert_eq!(report.sentiment.total(), 4);
    }

    #[test]
    fn unknown_restaurant_degrades_to_no_data() {
        let data = dataset();
        let report = build_report(&data, &Selection::restaurant("Nowhere"), &config());

        assert!(report.is_empty());
        assert_eq!(report.metrics.mean_rating, None);
        assert_eq!(report.health, None);
        assert_eq!(report.sentiment.total(), 0);
        assert_eq!(report.sentiment_entries().len(), 3);
        assert!(report.complaints.is_none());
        assert!(report.praise.is_none());
        assert!(report.advisories.is_empty());
        assert!(report.word_cloud.is_empty());
    }

    #[test]
    fn distribution_matches_count_for_every_selection() {
        let data = dataset();
        let selections = vec![
            Selection::restaurant("Cafe Luna"),
            Selection::restaurant("Spice Route"),
            Selection::restaurant("Nowhere"),
            Selection::Facets(FacetSelection::default()),
            Selection::Facets(FacetSelection::new(FacetFilter::only(["Delhi"]), FacetFilter::All)),
            Selection::Facets(FacetSelection::new(FacetFilter::none(), FacetFilter::All)),
            Selection::Facets(FacetSelection::new(FacetFilter::All, FacetFilter::only(["Thai"]))),
        ];
        for selection in selections {
            let report = build_report(&data, &selection, &config());
            assert_eq!(report.sentiment.total(), report.metrics.review_count, "{selection:?}");
        }
    }

    #[test]
    fn low_rating_advisory_uses_configured_threshold() {
        let data = dataset();
        let config = InsightConfig {
            low_rating_threshold: 4.0,
            ..InsightConfig::default()
        };
        let report = build_report(&data, &Selection::restaurant("Cafe Luna"), &config);
        assert_eq!(report.advisories[0].rule, AdvisoryRule::LowRating);
    }

    #[test]
    fn selection_serializes_with_mode_tag() {
        let json = serde_json::to_value(Selection::restaurant("Cafe Luna")).unwrap();
        assert_eq!(json["mode"], "restaurant");
        assert_eq!(json["name"], "Cafe Luna");
    }
}
