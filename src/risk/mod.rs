//! Risk screening for exercise variants.
//!
//! Derives three flags from a variant's raw attributes:
//! - hypertrophy advantage (limiting factor matches the target muscle)
//! - online coaching risk (stability, dynamics and axial load)
//! - pelvic-floor risk (intra-abdominal pressure, impact and axial load)

pub mod flags;

pub use flags::{derive_risk_flags, OnlineRisk, PfRisk, RiskFlags};
