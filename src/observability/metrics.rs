//! Simple metrics module for the review dashboard
//!
//! Records through the `metrics` facade using Prometheus naming conventions.
//! Without an installed recorder every call is a no-op, so library code and
//! tests can record freely.

use std::fmt;
use std::sync::OnceLock;
use tracing::{info, warn};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Every metric name used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Loader metrics
    LoaderRecordsLoaded,
    LoaderReviewsCoerced,
    LoaderSentimentLabels,

    // Dashboard metrics
    DashboardReportsBuilt,
    DashboardEmptyViews,
    DashboardBuildDuration,
    DashboardAdvisoriesFired,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::LoaderRecordsLoaded => "vod_loader_records_loaded_total",
            MetricName::LoaderReviewsCoerced => "vod_loader_reviews_coerced_total",
            MetricName::LoaderSentimentLabels => "vod_loader_sentiment_labels_total",
            MetricName::DashboardReportsBuilt => "vod_dashboard_reports_built_total",
            MetricName::DashboardEmptyViews => "vod_dashboard_empty_views_total",
            MetricName::DashboardBuildDuration => "vod_dashboard_build_duration_seconds",
            MetricName::DashboardAdvisoriesFired => "vod_dashboard_advisories_fired_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Idempotent; failures are logged, not fatal.
pub fn init() {
    if HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_ok() {
                info!("Prometheus recorder installed");
            }
        }
        Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Render the current metrics in Prometheus text format, if a recorder is installed
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Loader Metrics
// ============================================================================

pub mod loader {
    use super::MetricName;
    use crate::domain::Sentiment;

    pub fn records_loaded(count: u64) {
        ::metrics::counter!(MetricName::LoaderRecordsLoaded.as_str()).increment(count);
    }

    pub fn reviews_coerced(count: u64) {
        ::metrics::counter!(MetricName::LoaderReviewsCoerced.as_str()).increment(count);
    }

    pub fn sentiment_labelled(sentiment: Sentiment, count: u64) {
        ::metrics::counter!(
            MetricName::LoaderSentimentLabels.as_str(),
            "sentiment" => sentiment.as_str()
        )
        .increment(count);
    }
}

// ============================================================================
// Dashboard Metrics
// ============================================================================

pub mod dashboard {
    use super::MetricName;

    pub fn report_built(mode: &'static str, secs: f64) {
        ::metrics::counter!(MetricName::DashboardReportsBuilt.as_str(), "mode" => mode)
            .increment(1);
        ::metrics::histogram!(MetricName::DashboardBuildDuration.as_str(), "mode" => mode)
            .record(secs);
    }

    pub fn empty_view(mode: &'static str) {
        ::metrics::counter!(MetricName::DashboardEmptyViews.as_str(), "mode" => mode).increment(1);
    }

    pub fn advisory_fired(rule: &'static str) {
        ::metrics::counter!(MetricName::DashboardAdvisoriesFired.as_str(), "rule" => rule)
            .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_follow_prometheus_conventions() {
        let names = [
            MetricName::LoaderRecordsLoaded,
            MetricName::LoaderReviewsCoerced,
            MetricName::LoaderSentimentLabels,
            MetricName::DashboardReportsBuilt,
            MetricName::DashboardEmptyViews,
            MetricName::DashboardBuildDuration,
            MetricName::DashboardAdvisoriesFired,
        ];
        for name in names {
            let s = name.to_string();
            assert!(s.starts_with("vod_"));
            assert!(s.ends_with("_total") || s.ends_with("_seconds"), "{s}");
        }
    }

    #[test]
    fn recording_without_recorder_is_a_noop() {
        loader::records_loaded(3);
        dashboard::report_built("restaurant", 0.01);
        dashboard::advisory_fired("slow");
    }
}
