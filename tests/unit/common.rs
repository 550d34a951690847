//! Shared fixtures for unit tests.

use std::sync::Arc;

use microcycle::catalog::{build_index, EnrichedExercise, ExerciseVariant};
use microcycle::Catalog;

pub const CATALOG_JSON: &str = include_str!("../fixtures/catalog.json");

pub fn fixture_index() -> Vec<Arc<EnrichedExercise>> {
    let catalog = Catalog::from_json(CATALOG_JSON).expect("fixture catalog parses");
    build_index(catalog.variants())
}

pub fn exercise(id: &str) -> Arc<EnrichedExercise> {
    Arc::new(EnrichedExercise::new(ExerciseVariant::new(id, id)))
}
