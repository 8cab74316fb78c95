//! Record loader: reads the fixed-schema review CSV into a typed [`Dataset`],
//! classifying every review exactly once on the way in.

use csv::{ByteRecord, ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::constants::{self, REQUIRED_COLUMNS};
use crate::domain::{Dataset, ReviewRecord, Sentiment};
use crate::error::DataLoadError;
use crate::observability::metrics;
use crate::pipeline::sentiment::ReviewClassifier;

/// Positions of the required columns within the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    restaurant_name: usize,
    city: usize,
    cuisine: usize,
    rating: usize,
    votes: usize,
    cost_for_two: usize,
    review: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &ByteRecord, source_label: &str) -> Result<Self, DataLoadError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();
        let position = |column: &str| names.iter().position(|n| n.as_str() == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| position(**c).is_none())
            .map(|c| (*c).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns {
                source_label: source_label.to_string(),
                missing,
            });
        }

        // All present, checked above
        let at = |column: &str| position(column).unwrap_or_default();
        Ok(Self {
            restaurant_name: at(constants::COL_RESTAURANT_NAME),
            city: at(constants::COL_CITY),
            cuisine: at(constants::COL_CUISINE),
            rating: at(constants::COL_RATING),
            votes: at(constants::COL_VOTES),
            cost_for_two: at(constants::COL_COST_FOR_TWO),
            review: at(constants::COL_REVIEW),
        })
    }
}

/// Load the review table from a CSV file on disk.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DataLoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataLoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| DataLoadError::Unreadable {
        source_label: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_from_reader(file, path)
}

/// Load the review table from any CSV byte stream. `source` is only used for
/// labelling the dataset and error messages.
pub fn load_from_reader<R: Read>(
    reader: R,
    source: impl Into<PathBuf>,
) -> Result<Dataset, DataLoadError> {
    let started = Instant::now();
    let source = source.into();
    let source_label = source.display().to_string();

    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .byte_headers()
        .map_err(|e| DataLoadError::Unreadable {
            source_label: source_label.clone(),
            message: e.to_string(),
        })?
        .clone();
    let columns = ColumnIndex::from_headers(&headers, &source_label)?;

    let classifier = ReviewClassifier::default();
    let mut records = Vec::new();
    let mut coerced_reviews = 0usize;

    for row in csv_reader.byte_records() {
        let row = row.map_err(|e| DataLoadError::Unreadable {
            source_label: source_label.clone(),
            message: e.to_string(),
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        let review_text = match row.get(columns.review) {
            Some(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => text.to_string(),
                Err(_) => {
                    debug!(line, "Review cell is not valid UTF-8, replacing invalid bytes");
                    coerced_reviews += 1;
                    String::from_utf8_lossy(bytes).into_owned()
                }
            },
            None => {
                debug!(line, "Review cell missing, treating as empty");
                coerced_reviews += 1;
                String::new()
            }
        };

        let rating = parse_rating(&row, columns.rating, line)?;
        if !(constants::MIN_RATING..=constants::MAX_RATING).contains(&rating) {
            warn!(line, rating, "Rating outside the expected 0-5 range");
        }

        let sentiment = classifier.classify(&review_text);
        records.push(ReviewRecord {
            restaurant_name: text_field(
                &row,
                columns.restaurant_name,
                constants::COL_RESTAURANT_NAME,
                line,
            )?,
            city: text_field(&row, columns.city, constants::COL_CITY, line)?,
            cuisine: text_field(&row, columns.cuisine, constants::COL_CUISINE, line)?,
            rating,
            votes: parse_votes(&row, columns.votes, line)?,
            cost_for_two: parse_cost(&row, columns.cost_for_two, line)?,
            review_text,
            sentiment,
        });
    }

    if coerced_reviews > 0 {
        warn!(
            coerced_reviews,
            source = %source_label,
            "Some review cells were missing or not valid UTF-8"
        );
    }

    for label in Sentiment::ALL {
        let count = records.iter().filter(|r| r.sentiment == label).count();
        metrics::loader::sentiment_labelled(label, count as u64);
    }
    metrics::loader::records_loaded(records.len() as u64);
    metrics::loader::reviews_coerced(coerced_reviews as u64);

    info!(
        source = %source_label,
        records = records.len(),
        coerced_reviews,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded review dataset"
    );

    Ok(Dataset::new(records, source, coerced_reviews))
}

fn invalid(line: u64, column: &str, value: &[u8]) -> DataLoadError {
    DataLoadError::InvalidRow {
        line,
        column: column.to_string(),
        value: String::from_utf8_lossy(value).into_owned(),
    }
}

fn raw_cell<'r>(
    row: &'r ByteRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<&'r str, DataLoadError> {
    let bytes = row.get(idx).ok_or_else(|| invalid(line, column, b""))?;
    std::str::from_utf8(bytes).map_err(|_| invalid(line, column, bytes))
}

fn text_field(
    row: &ByteRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<String, DataLoadError> {
    let value = raw_cell(row, idx, column, line)?;
    if value.is_empty() {
        return Err(invalid(line, column, b""));
    }
    Ok(value.to_string())
}

fn parse_rating(row: &ByteRecord, idx: usize, line: u64) -> Result<f64, DataLoadError> {
    let raw = raw_cell(row, idx, constants::COL_RATING, line)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid(line, constants::COL_RATING, raw.as_bytes())),
    }
}

fn parse_votes(row: &ByteRecord, idx: usize, line: u64) -> Result<u64, DataLoadError> {
    let raw = raw_cell(row, idx, constants::COL_VOTES, line)?;
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    // Exported tables sometimes write integer columns as "120.0"
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v < u64::MAX as f64 && v.fract() == 0.0 => Ok(v as u64),
        _ => Err(invalid(line, constants::COL_VOTES, raw.as_bytes())),
    }
}

fn parse_cost(row: &ByteRecord, idx: usize, line: u64) -> Result<f64, DataLoadError> {
    let raw = raw_cell(row, idx, constants::COL_COST_FOR_TWO, line)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(invalid(line, constants::COL_COST_FOR_TWO, raw.as_bytes())),
    }
}
