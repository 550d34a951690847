//! Microcycle - Strength & Conditioning Plan Builder
//!
//! Screens a catalog of exercise variants for biomechanical and clinical risk,
//! searches it with typo-tolerant filters, and assembles weekly training plans
//! of ordered days, exercises and separators with typed dosages.

pub mod catalog;
pub mod plan;
pub mod risk;
pub mod search;
pub mod storage;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogIndex, EnrichedExercise, ExerciseVariant};
pub use plan::PlanAggregate;
pub use risk::{derive_risk_flags, RiskFlags};
pub use search::{apply_filters, FilterState};
pub use storage::config::AppConfig;
