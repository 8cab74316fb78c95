use crate::config::InsightConfig;
use crate::domain::Dataset;

/// Shared state handed to every handler. The dataset is the process-wide,
/// read-only table, so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub dataset: &'static Dataset,
    pub insights: InsightConfig,
}

impl AppState {
    pub fn new(dataset: &'static Dataset, insights: InsightConfig) -> Self {
        Self { dataset, insights }
    }
}
