// Query parameters and view models for the dashboard pages
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::NO_DATA;
use crate::dashboard::DashboardReport;
use crate::pipeline::aggregate::GroupRollup;
use crate::pipeline::filter::{FacetFilter, FacetSelection};

/// Marker field sent by the facet form so an unselected facet means "none"
pub const FACETS_SUBMITTED_KEY: &str = "facets";
pub const CITY_KEY: &str = "city";
pub const CUISINE_KEY: &str = "cuisine";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RestaurantQuery {
    pub name: Option<String>,
}

/// Build a facet selection from repeated query pairs (`city=A&city=B&cuisine=C`).
///
/// A facet key that is present selects exactly its non-blank values. An absent
/// key means all values, unless the facet form was submitted (`facets=1`), in
/// which case an absent key means nothing is selected.
pub fn facet_selection_from_pairs(pairs: &[(String, String)]) -> FacetSelection {
    let submitted = pairs.iter().any(|(k, _)| k == FACETS_SUBMITTED_KEY);
    let facet = |key: &str| -> FacetFilter {
        let present = pairs.iter().any(|(k, _)| k == key);
        if !present {
            return if submitted { FacetFilter::none() } else { FacetFilter::All };
        }
        let values: BTreeSet<String> = pairs
            .iter()
            .filter(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_string())
            .collect();
        FacetFilter::Only(values)
    };
    FacetSelection::new(facet(CITY_KEY), facet(CUISINE_KEY))
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn list(values: &[String], is_selected: impl Fn(&str) -> bool) -> Vec<SelectOption> {
        values
            .iter()
            .map(|v| SelectOption {
                value: v.clone(),
                selected: is_selected(v),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct AdvisoryView {
    pub tone: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct WordView {
    pub word: String,
    pub count: usize,
    pub font_px: u32,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub restaurant_name: String,
    pub city: String,
    pub cuisine: String,
    pub rating: String,
    pub votes: u64,
    pub cost_for_two: String,
    pub review_text: String,
    pub sentiment: &'static str,
}

/// Series handed to the client-side chart library
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub sentiment_labels: Vec<&'static str>,
    pub sentiment_counts: Vec<usize>,
    pub cost_for_two: Vec<f64>,
    pub rating: Vec<f64>,
    pub votes: Vec<u64>,
    pub city_labels: Vec<String>,
    pub city_mean_rating: Vec<f64>,
    pub cuisine_labels: Vec<String>,
    pub cuisine_votes: Vec<f64>,
}

/// Display-ready projection of a [`DashboardReport`]; every undefined value
/// is already turned into the "no data" label.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub is_empty: bool,
    pub review_count: usize,
    pub total_votes: u64,
    pub mean_rating: String,
    pub health_label: String,
    pub health_indicator: &'static str,
    pub complaints: Vec<String>,
    pub praise: Vec<String>,
    pub advisories: Vec<AdvisoryView>,
    pub words: Vec<WordView>,
    pub rows: Vec<RowView>,
    pub has_rollups: bool,
    pub chart_json: String,
}

const MIN_WORD_PX: f64 = 12.0;
const MAX_WORD_PX: f64 = 48.0;

impl DashboardView {
    pub fn from_report(report: &DashboardReport) -> Self {
        let (health_label, health_indicator) = match report.health {
            Some(status) => (status.label().to_string(), status.indicator()),
            None => (NO_DATA.to_string(), "grey"),
        };

        let (city, cuisine): (&[GroupRollup], &[GroupRollup]) = match &report.rollups {
            Some(r) => (r.mean_rating_by_city.as_slice(), r.total_votes_by_cuisine.as_slice()),
            None => (&[][..], &[][..]),
        };

        let entries = report.sentiment_entries();
        let charts = ChartData {
            sentiment_labels: entries.iter().map(|(s, _)| s.as_str()).collect(),
            sentiment_counts: entries.iter().map(|(_, c)| *c).collect(),
            cost_for_two: report.price_points.iter().map(|p| p.cost_for_two).collect(),
            rating: report.price_points.iter().map(|p| p.rating).collect(),
            votes: report.price_points.iter().map(|p| p.votes).collect(),
            city_labels: city.iter().map(|g| g.key.clone()).collect(),
            city_mean_rating: city.iter().map(|g| g.value).collect(),
            cuisine_labels: cuisine.iter().map(|g| g.key.clone()).collect(),
            cuisine_votes: cuisine.iter().map(|g| g.value).collect(),
        };

        Self {
            is_empty: report.is_empty(),
            review_count: report.metrics.review_count,
            total_votes: report.metrics.total_votes,
            mean_rating: report.metrics.mean_rating_display(),
            health_label,
            health_indicator,
            complaints: report.complaints.clone().unwrap_or_default(),
            praise: report.praise.clone().unwrap_or_default(),
            advisories: report
                .advisories
                .iter()
                .map(|a| AdvisoryView {
                    tone: a.tone.as_str(),
                    message: a.message,
                })
                .collect(),
            words: report
                .word_cloud
                .iter()
                .map(|w| WordView {
                    word: w.word.clone(),
                    count: w.count,
                    font_px: (MIN_WORD_PX + w.weight * (MAX_WORD_PX - MIN_WORD_PX)).round() as u32,
                })
                .collect(),
            rows: report
                .records
                .iter()
                .map(|r| RowView {
                    restaurant_name: r.restaurant_name.clone(),
                    city: r.city.clone(),
                    cuisine: r.cuisine.clone(),
                    rating: format!("{:.1}", r.rating),
                    votes: r.votes,
                    cost_for_two: format!("{:.0}", r.cost_for_two),
                    review_text: r.review_text.clone(),
                    sentiment: r.sentiment.as_str(),
                })
                .collect(),
            has_rollups: report.rollups.is_some(),
            chart_json: script_safe_json(&charts),
        }
    }
}

/// JSON that can be embedded inside a `<script>` element
fn script_safe_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn no_params_defaults_to_all() {
        assert_eq!(facet_selection_from_pairs(&[]), FacetSelection::default());
    }

    #[test]
    fn repeated_keys_collect_values() {
        let query = pairs(&[("city", "Delhi"), ("city", "Mumbai")]);
        let selection = facet_selection_from_pairs(&query);
        assert_eq!(selection.cities, FacetFilter::only(["Delhi", "Mumbai"]));
        assert_eq!(selection.cuisines, FacetFilter::All);
    }

    #[test]
    fn submitted_form_without_cities_selects_none() {
        let query = pairs(&[("facets", "1"), ("cuisine", "Indian")]);
        let selection = facet_selection_from_pairs(&query);
        assert_eq!(selection.cities, FacetFilter::none());
        assert_eq!(selection.cuisines, FacetFilter::only(["Indian"]));
    }

    #[test]
    fn blank_values_select_nothing() {
        let selection = facet_selection_from_pairs(&pairs(&[("city", " ")]));
        assert_eq!(selection.cities, FacetFilter::none());
    }

    #[test]
    fn embedded_json_cannot_close_script() {
        let json = script_safe_json(&vec!["</script><b>"]);
        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
    }
}
