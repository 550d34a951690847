//! Catalog filtering and fuzzy search.

pub mod filters;
pub mod fuzzy;

pub use filters::{apply_filters, apply_filters_with, FilterState};
pub use fuzzy::{FuzzyMatcher, DEFAULT_THRESHOLD};
