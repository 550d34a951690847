//! Load summary of a plan: volume per target, intensity profile and risk alerts.

use serde::Serialize;

use super::types::{ExerciseEntry, Plan};
use crate::catalog::{Naturaleza, ThreatLevel};
use crate::risk::{OnlineRisk, PfRisk};

/// Sets accumulated for one primary target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetVolume {
    pub target: String,
    pub sets: u32,
}

/// An entry that deserves the coach's attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAlert {
    pub item_id: String,
    pub day_label: String,
    pub exercise: String,
    /// Set when the threat level is not low
    pub threat: Option<ThreatLevel>,
    pub online_prohibited: bool,
    pub pelvic_floor_contraindicated: bool,
}

/// Aggregated load figures for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub day_count: usize,
    pub exercise_count: usize,
    /// Highest volume first
    pub volume_by_target: Vec<TargetVolume>,
    pub grind_sets: u32,
    pub semi_ballistic_sets: u32,
    pub ballistic_sets: u32,
    pub alerts: Vec<RiskAlert>,
}

impl PlanSummary {
    /// Summarize a plan, walking days in display order.
    pub fn from_plan(plan: &Plan) -> Self {
        let mut summary = Self {
            day_count: plan.day_count(),
            exercise_count: 0,
            volume_by_target: Vec::new(),
            grind_sets: 0,
            semi_ballistic_sets: 0,
            ballistic_sets: 0,
            alerts: Vec::new(),
        };

        for day in plan.ordered_days() {
            for entry in day.exercises() {
                summary.exercise_count += 1;
                summary.add_volume(entry);

                if let Some(alert) = risk_alert(entry, &day.label) {
                    summary.alerts.push(alert);
                }
            }
        }

        // stable: equal volumes keep first-seen order
        summary
            .volume_by_target
            .sort_by(|a, b| b.sets.cmp(&a.sets));

        summary
    }

    /// Sets on ballistic and semi-ballistic work combined.
    pub fn explosive_sets(&self) -> u32 {
        self.ballistic_sets + self.semi_ballistic_sets
    }

    fn add_volume(&mut self, entry: &ExerciseEntry) {
        let sets = entry.dosage.sets;

        for target in &entry.variant.variant.target_primarios {
            match self.volume_by_target.iter_mut().find(|v| &v.target == target) {
                Some(volume) => volume.sets += sets,
                None => self.volume_by_target.push(TargetVolume {
                    target: target.clone(),
                    sets,
                }),
            }
        }

        match entry.variant.variant.naturaleza {
            Naturaleza::Grind => self.grind_sets += sets,
            Naturaleza::SemiBallistic => self.semi_ballistic_sets += sets,
            Naturaleza::Ballistic => self.ballistic_sets += sets,
        }
    }
}

fn risk_alert(entry: &ExerciseEntry, day_label: &str) -> Option<RiskAlert> {
    let variant = &entry.variant.variant;
    let flags = &entry.variant.flags;

    let threat = (variant.amenaza_potencial != ThreatLevel::Bajo).then_some(variant.amenaza_potencial);
    let online_prohibited = flags.online_risk == OnlineRisk::Prohibido;
    let pelvic_floor_contraindicated = flags.pf_risk == PfRisk::Contraindicado;

    if threat.is_none() && !online_prohibited && !pelvic_floor_contraindicated {
        return None;
    }

    Some(RiskAlert {
        item_id: entry.id.clone(),
        day_label: day_label.to_string(),
        exercise: variant.nombre_tecnico.clone(),
        threat,
        online_prohibited,
        pelvic_floor_contraindicated,
    })
}
