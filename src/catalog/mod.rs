//! Exercise catalog.
//!
//! Loads variant records from JSON, merges imports and builds the enriched,
//! risk-annotated index the search engine and plan builder work from.

pub mod index;
pub mod loader;
pub mod types;

pub use index::{build_index, CatalogIndex, EnrichedExercise};
pub use loader::{Catalog, CatalogError};
pub use types::{
    ExerciseVariant, Intensity, JordanOption, Naturaleza, NateraOption, PiaType, Rating,
    ThreatLevel,
};
