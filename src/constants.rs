/// Column names and default thresholds shared across the pipeline.
/// Thresholds here are defaults only; `config.toml` can override them under `[insights]`.

// Required CSV header columns (exact, case-sensitive)
pub const COL_RESTAURANT_NAME: &str = "Restaurant_Name";
pub const COL_CITY: &str = "City";
pub const COL_CUISINE: &str = "Cuisine";
pub const COL_RATING: &str = "Rating";
pub const COL_VOTES: &str = "Votes";
pub const COL_COST_FOR_TWO: &str = "Cost_for_Two";
pub const COL_REVIEW: &str = "Review";

pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_RESTAURANT_NAME,
    COL_CITY,
    COL_CUISINE,
    COL_RATING,
    COL_VOTES,
    COL_COST_FOR_TWO,
    COL_REVIEW,
];

// Health status thresholds on mean rating
pub const EXCELLENT_MIN_RATING: f64 = 4.0;
pub const NEEDS_IMPROVEMENT_MIN_RATING: f64 = 3.0;

// Low-rating advisory fires strictly below this mean rating
pub const LOW_RATING_THRESHOLD: f64 = 3.0;

// Excerpts shown per sentiment bucket
pub const EXCERPT_LIMIT: usize = 5;

// Words kept for the word cloud
pub const WORD_CLOUD_MAX_WORDS: usize = 100;

// Expected rating bounds; values outside are kept and logged
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

// Defaults for locating inputs and serving
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_DATA_PATH: &str = "synthetic_restaurant_reviews_500.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8501;

// Environment overrides
pub const ENV_DATA_PATH: &str = "VOD_DATA_PATH";
pub const ENV_HOST: &str = "VOD_HOST";
pub const ENV_PORT: &str = "PORT";

/// Label shown wherever an aggregate is undefined for an empty view
pub const NO_DATA: &str = "no data";
