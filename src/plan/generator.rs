//! Auto-generation of a training day from catalog criteria.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::aggregate::PlanAggregate;
use super::types::DayId;
use crate::catalog::{EnrichedExercise, Rating};

/// ROI restriction for the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoiFilter {
    #[default]
    Any,
    Only(Rating),
}

impl RoiFilter {
    /// Parse "Alto"/"Bajo" or a wildcard ("Cualquiera", "any", "*").
    pub fn parse(value: &str) -> Result<Self, GeneratorError> {
        if let Some(rating) = Rating::parse(value) {
            return Ok(RoiFilter::Only(rating));
        }

        match value.trim().to_lowercase().as_str() {
            "cualquiera" | "any" | "*" => Ok(RoiFilter::Any),
            _ => Err(GeneratorError::UnknownRoi(value.to_string())),
        }
    }

    pub fn matches(&self, roi: Rating) -> bool {
        match self {
            RoiFilter::Any => true,
            RoiFilter::Only(wanted) => *wanted == roi,
        }
    }
}

impl std::fmt::Display for RoiFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoiFilter::Any => write!(f, "Cualquiera"),
            RoiFilter::Only(rating) => write!(f, "{}", rating),
        }
    }
}

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCriteria {
    /// Case-insensitive substring of a primary target
    pub target_substring: String,
    pub roi: RoiFilter,
    /// Number of picks, with replacement
    pub count: usize,
}

/// Generator failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("No exercises for target '{target}' with ROI {roi}")]
    EmptyPool { target: String, roi: RoiFilter },

    #[error("Unknown ROI '{0}' (expected Alto, Bajo or Cualquiera)")]
    UnknownRoi(String),
}

/// Catalog entries eligible for the criteria.
pub fn candidate_pool(
    index: &[Arc<EnrichedExercise>],
    criteria: &GeneratorCriteria,
) -> Vec<Arc<EnrichedExercise>> {
    let term = criteria.target_substring.to_lowercase();

    index
        .iter()
        .filter(|e| {
            e.variant
                .target_primarios
                .iter()
                .any(|t| t.to_lowercase().contains(&term))
        })
        .filter(|e| criteria.roi.matches(e.variant.roi))
        .cloned()
        .collect()
}

/// Add a new day filled with random picks from the matching pool.
///
/// Picks are sampled with replacement, so the same exercise can appear more
/// than once. Fails without touching the plan when nothing matches.
pub fn auto_generate<R: Rng + ?Sized>(
    plan: &mut PlanAggregate,
    index: &[Arc<EnrichedExercise>],
    criteria: &GeneratorCriteria,
    rng: &mut R,
) -> Result<DayId, GeneratorError> {
    let pool = candidate_pool(index, criteria);

    if pool.is_empty() {
        return Err(GeneratorError::EmptyPool {
            target: criteria.target_substring.clone(),
            roi: criteria.roi,
        });
    }

    let picks: Vec<Arc<EnrichedExercise>> = (0..criteria.count)
        .filter_map(|_| pool.choose(&mut *rng).cloned())
        .collect();

    let day_id = plan.add_day();
    for exercise in picks {
        plan.add_exercise(exercise, &day_id);
    }

    tracing::info!(
        "Generated day {} with {} picks from a pool of {} (target '{}', ROI {})",
        day_id,
        criteria.count,
        pool.len(),
        criteria.target_substring,
        criteria.roi
    );

    Ok(day_id)
}
