//! Safety flags derived from an exercise variant's attributes.
//!
//! The derivation is a pure function: no state, no randomness, identical
//! variants always produce identical flags.

use serde::{Deserialize, Serialize};

use crate::catalog::types::{ExerciseVariant, Naturaleza, PiaType};

/// Reason attached to a contraindicated pelvic-floor rating.
pub const PF_REASON_CONTRAINDICATED: &str = "Alta Carga Axial + Hiperpresión/Impacto";

/// Reason attached to a cautionary pelvic-floor rating.
pub const PF_REASON_CAUTION: &str = "Impacto o Presión Intra-abdominal";

/// Suitability for remote (unsupervised) coaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnlineRisk {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Precaución")]
    Precaucion,
    Prohibido,
}

impl OnlineRisk {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            OnlineRisk::Ok => "OK",
            OnlineRisk::Precaucion => "Precaución",
            OnlineRisk::Prohibido => "Prohibido",
        }
    }
}

impl std::fmt::Display for OnlineRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Pelvic-floor risk rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PfRisk {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Precaución")]
    Precaucion,
    Contraindicado,
}

impl PfRisk {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PfRisk::Ok => "OK",
            PfRisk::Precaucion => "Precaución",
            PfRisk::Contraindicado => "Contraindicado",
        }
    }
}

impl std::fmt::Display for PfRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Flags computed for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlags {
    /// Primary limiting factor corresponds to the primary target
    #[serde(rename = "HYP_ADV")]
    pub hyp_adv: bool,
    #[serde(rename = "ONLINE_RISK")]
    pub online_risk: OnlineRisk,
    #[serde(rename = "PF_RISK")]
    pub pf_risk: PfRisk,
    #[serde(rename = "pfRiskReason", skip_serializing_if = "Option::is_none", default)]
    pub pf_risk_reason: Option<String>,
}

impl Default for RiskFlags {
    fn default() -> Self {
        Self {
            hyp_adv: true,
            online_risk: OnlineRisk::Ok,
            pf_risk: PfRisk::Ok,
            pf_risk_reason: None,
        }
    }
}

/// Derive every flag for a variant.
pub fn derive_risk_flags(variant: &ExerciseVariant) -> RiskFlags {
    let (pf_risk, pf_risk_reason) = pelvic_floor_risk(variant);

    RiskFlags {
        hyp_adv: hypertrophy_advantage(variant),
        online_risk: online_risk(variant),
        pf_risk,
        pf_risk_reason: pf_risk_reason.map(str::to_string),
    }
}

/// Whether the dominant limiting factor matches the dominant target.
///
/// Only a definite mismatch (both present, neither a substring of the other
/// after lowercasing) yields `false`.
pub fn hypertrophy_advantage(variant: &ExerciseVariant) -> bool {
    match (variant.primary_limiting_factor(), variant.primary_target()) {
        (Some(limiter), Some(target)) => {
            let limiter = limiter.to_lowercase();
            let target = target.to_lowercase();
            limiter.contains(&target) || target.contains(&limiter)
        }
        _ => true,
    }
}

/// Suitability of the variant for unsupervised online coaching.
pub fn online_risk(variant: &ExerciseVariant) -> OnlineRisk {
    let low_stability = variant.estabilidad_externa <= 2;
    let dynamic_or_impactful = variant.naturaleza != Naturaleza::Grind || variant.impacto >= 2;
    let max_axial = variant.carga_axial == 3;

    if low_stability && dynamic_or_impactful {
        if max_axial {
            OnlineRisk::Prohibido
        } else {
            OnlineRisk::Precaucion
        }
    } else {
        OnlineRisk::Ok
    }
}

/// Pelvic-floor rating and its reason.
pub fn pelvic_floor_risk(variant: &ExerciseVariant) -> (PfRisk, Option<&'static str>) {
    let hiperpresivo = variant.pia_conservador == PiaType::Hiperpresivo;
    let high_impact = variant.impacto >= 2;

    if !(hiperpresivo || high_impact) {
        return (PfRisk::Ok, None);
    }

    if variant.carga_axial == 3 {
        (PfRisk::Contraindicado, Some(PF_REASON_CONTRAINDICATED))
    } else {
        (PfRisk::Precaucion, Some(PF_REASON_CAUTION))
    }
}
