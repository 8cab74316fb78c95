//! Process-wide review dataset.
//!
//! Loaded exactly once, on first access, and read-only afterwards. Holds no
//! external resources, so there is no teardown. Concurrent readers share the
//! `&'static Dataset` without locking.

use once_cell::sync::OnceCell;
use std::path::Path;
use tracing::debug;

use crate::domain::Dataset;
use crate::error::DataLoadError;
use crate::pipeline::loader;

static DATASET: OnceCell<Dataset> = OnceCell::new();

/// Load the dataset from `path` on first call and return it. Later calls
/// return the already loaded dataset and ignore `path`. A failed load leaves
/// the cell empty so the caller can report the error and exit.
pub fn get_or_load(path: impl AsRef<Path>) -> Result<&'static Dataset, DataLoadError> {
    load_once(&DATASET, path)
}

fn load_once(
    cell: &'static OnceCell<Dataset>,
    path: impl AsRef<Path>,
) -> Result<&'static Dataset, DataLoadError> {
    cell.get_or_try_init(|| {
        debug!(path = %path.as_ref().display(), "Initializing global dataset");
        loader::load_dataset(path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/reviews.csv")
    }

    #[test]
    fn second_call_returns_the_first_dataset() {
        static CELL: OnceCell<Dataset> = OnceCell::new();

        let first = load_once(&CELL, fixture()).unwrap();
        assert_eq!(first.len(), 6);

        let again = load_once(&CELL, "/definitely/not/here/reviews.csv").unwrap();
        assert!(std::ptr::eq(first, again));
        assert_eq!(again.source, fixture());
    }

    #[test]
    fn failed_load_leaves_cell_empty() {
        static CELL: OnceCell<Dataset> = OnceCell::new();

        let err = load_once(&CELL, "/definitely/not/here/reviews.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::NotFound { .. }));
        assert!(CELL.get().is_none());

        let loaded = load_once(&CELL, fixture()).unwrap();
        assert_eq!(loaded.len(), 6);
        assert!(std::ptr::eq(CELL.get().unwrap(), loaded));
    }
}
