//! The review transform pipeline, leaf-first:
//! load -> classify -> filter -> aggregate / insights / word cloud.

pub mod aggregate;
pub mod filter;
pub mod insights;
pub mod loader;
pub mod sentiment;
pub mod wordcloud;

pub use filter::{FacetFilter, FacetSelection};
pub use loader::{load_dataset, load_from_reader};
