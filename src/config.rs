use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub insights: InsightConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Thresholds and sizes used by the aggregation and insight layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Mean rating at or above which a restaurant is Excellent
    pub excellent_min_rating: f64,
    /// Mean rating at or above which a restaurant Needs Improvement (below is At Risk)
    pub needs_improvement_min_rating: f64,
    /// Mean rating strictly below which the low-rating advisory fires
    pub low_rating_threshold: f64,
    /// Review excerpts listed per sentiment bucket
    pub excerpt_limit: usize,
    /// Words kept for the word cloud
    pub word_cloud_max_words: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_DATA_PATH),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            excellent_min_rating: constants::EXCELLENT_MIN_RATING,
            needs_improvement_min_rating: constants::NEEDS_IMPROVEMENT_MIN_RATING,
            low_rating_threshold: constants::LOW_RATING_THRESHOLD,
            excerpt_limit: constants::EXCERPT_LIMIT,
            word_cloud_max_words: constants::WORD_CLOUD_MAX_WORDS,
        }
    }
}

impl InsightConfig {
    fn validate(&self) -> Result<()> {
        if self.needs_improvement_min_rating > self.excellent_min_rating {
            return Err(DashboardError::Config(format!(
                "needs_improvement_min_rating ({}) must not exceed excellent_min_rating ({})",
                self.needs_improvement_min_rating, self.excellent_min_rating
            )));
        }
        if self.excerpt_limit == 0 {
            return Err(DashboardError::Config("excerpt_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file yields the defaults;
    /// environment variables are applied on top either way.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut config = if config_path.exists() {
            let config_content = fs::read_to_string(config_path).map_err(|e| {
                DashboardError::Config(format!(
                    "Failed to read config file '{}': {}",
                    config_path.display(),
                    e
                ))
            })?;
            info!(path = %config_path.display(), "Loaded configuration file");
            Self::from_toml_str(&config_content)?
        } else {
            debug!(path = %config_path.display(), "No configuration file, using defaults");
            Self::default()
        };

        config.apply_env();
        config.insights.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.insights.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(constants::ENV_DATA_PATH) {
            self.data.path = PathBuf::from(path);
        }
        if let Ok(host) = std::env::var(constants::ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = std::env::var(constants::ENV_PORT)
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.server.port = port;
        }
    }
}
