//! Structured filters and fuzzy search over the catalog index.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use super::fuzzy::FuzzyMatcher;
use crate::catalog::{EnrichedExercise, ThreatLevel};

/// Session filter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Free-text fuzzy query
    pub search: String,
    /// Archetype filter, `None` for all
    #[serde(deserialize_with = "deserialize_facet")]
    pub arquetipo: Option<String>,
    /// Primary target filter, `None` for all
    #[serde(deserialize_with = "deserialize_facet")]
    pub target: Option<String>,
    pub only_vbt: bool,
    pub low_risk: bool,
}

impl FilterState {
    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Restrict to one archetype.
    pub fn with_arquetipo(mut self, arquetipo: impl Into<String>) -> Self {
        self.arquetipo = normalize_facet(arquetipo.into());
        self
    }

    /// Restrict to one primary target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = normalize_facet(target.into());
        self
    }

    /// Keep only VBT-ready variants.
    pub fn only_vbt(mut self) -> Self {
        self.only_vbt = true;
        self
    }

    /// Keep only low-threat variants.
    pub fn low_risk(mut self) -> Self {
        self.low_risk = true;
        self
    }
}

fn normalize_facet(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn deserialize_facet<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(normalize_facet))
}

/// Apply filters with the default fuzzy threshold.
pub fn apply_filters(
    index: &[Arc<EnrichedExercise>],
    filters: &FilterState,
) -> Vec<Arc<EnrichedExercise>> {
    apply_filters_with(index, filters, &FuzzyMatcher::default())
}

/// Apply filters in their fixed order, ranking by search text last.
///
/// Without search text the catalog order is kept; with it, results are
/// ordered best match first (ties keep catalog order).
pub fn apply_filters_with(
    index: &[Arc<EnrichedExercise>],
    filters: &FilterState,
    matcher: &FuzzyMatcher,
) -> Vec<Arc<EnrichedExercise>> {
    let mut result: Vec<Arc<EnrichedExercise>> = index.to_vec();

    if let Some(arquetipo) = &filters.arquetipo {
        result.retain(|e| any_tag_equals(&e.variant.arquetipos, arquetipo));
    }

    if let Some(target) = &filters.target {
        result.retain(|e| any_tag_equals(&e.variant.target_primarios, target));
    }

    if filters.only_vbt {
        result.retain(|e| e.variant.vbt_ready);
    }

    if filters.low_risk {
        result.retain(|e| e.variant.amenaza_potencial == ThreatLevel::Bajo);
    }

    let query = filters.search.trim();
    if query.is_empty() {
        return result;
    }

    let mut ranked: Vec<(f64, Arc<EnrichedExercise>)> = result
        .into_iter()
        .filter_map(|e| {
            let score = matcher.best_match(query, searchable_fields(&e))?;
            Some((score, e))
        })
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().map(|(_, e)| e).collect()
}

fn any_tag_equals(tags: &[String], wanted: &str) -> bool {
    let wanted = wanted.to_lowercase();
    tags.iter().any(|tag| tag.to_lowercase() == wanted)
}

fn searchable_fields(exercise: &EnrichedExercise) -> Vec<&str> {
    let variant = &exercise.variant;
    std::iter::once(variant.nombre_tecnico.as_str())
        .chain(variant.arquetipos.iter().map(String::as_str))
        .chain(variant.target_primarios.iter().map(String::as_str))
        .chain(variant.limiting_factor.iter().map(String::as_str))
        .collect()
}
