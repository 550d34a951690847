//! Microcycle plans.
//!
//! Manages the coach's weekly plan:
//! - Ordered days of exercises and separators with typed dosages
//! - A command API for adding, moving, duplicating and removing items
//! - Random day generation from catalog criteria
//! - Load summaries for review

pub mod aggregate;
pub mod generator;
pub mod summary;
pub mod types;

// Re-exports for convenience
pub use aggregate::PlanAggregate;
pub use generator::{auto_generate, GeneratorCriteria, GeneratorError, RoiFilter};
pub use summary::{PlanSummary, RiskAlert, TargetVolume};
pub use types::{
    DayId, Dosage, DosageKind, ExerciseEntry, ItemId, ItemUpdate, Plan, PlanDay, PlanItem,
    Prescription, Separator,
};
