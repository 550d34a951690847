//! Risk-enriched catalog index.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::loader::Catalog;
use super::types::ExerciseVariant;
use crate::risk::{derive_risk_flags, RiskFlags};

/// A catalog variant together with its derived flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedExercise {
    #[serde(flatten)]
    pub variant: ExerciseVariant,
    pub flags: RiskFlags,
}

impl EnrichedExercise {
    /// Enrich a single variant.
    pub fn new(variant: ExerciseVariant) -> Self {
        let flags = derive_risk_flags(&variant);
        Self { variant, flags }
    }
}

impl std::ops::Deref for EnrichedExercise {
    type Target = ExerciseVariant;

    fn deref(&self) -> &Self::Target {
        &self.variant
    }
}

/// Enrich every variant, preserving input order.
pub fn build_index(variants: &[ExerciseVariant]) -> Vec<Arc<EnrichedExercise>> {
    variants
        .iter()
        .cloned()
        .map(|v| Arc::new(EnrichedExercise::new(v)))
        .collect()
}

/// Queryable enriched catalog.
///
/// Entries are shared snapshots: plan entries keep their `Arc` even after the
/// index is rebuilt from a newer catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: Vec<Arc<EnrichedExercise>>,
}

impl CatalogIndex {
    /// Build the index for a catalog.
    pub fn build(catalog: &Catalog) -> Self {
        Self {
            entries: build_index(catalog.variants()),
        }
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[Arc<EnrichedExercise>] {
        &self.entries
    }

    /// Get an entry by exercise id.
    pub fn get(&self, id: &str) -> Option<&Arc<EnrichedExercise>> {
        self.entries.iter().find(|e| e.variant.id == id)
    }

    /// Distinct archetype tags, sorted.
    pub fn archetypes(&self) -> Vec<String> {
        collect_facet(&self.entries, |e| &e.variant.arquetipos)
    }

    /// Distinct primary targets, sorted.
    pub fn primary_targets(&self) -> Vec<String> {
        collect_facet(&self.entries, |e| &e.variant.target_primarios)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn collect_facet<F>(entries: &[Arc<EnrichedExercise>], field: F) -> Vec<String>
where
    F: Fn(&EnrichedExercise) -> &Vec<String>,
{
    entries
        .iter()
        .flat_map(|e| field(e).iter())
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
