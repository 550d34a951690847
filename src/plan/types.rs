//! Microcycle plan types.
//!
//! A plan owns its days and their items; exercise entries hold a shared,
//! read-only snapshot of the catalog entry they were created from.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::EnrichedExercise;

pub type DayId = String;
pub type ItemId = String;

/// Name given to new and cleared plans.
pub const DEFAULT_PLAN_NAME: &str = "Nuevo Microciclo";

/// Id of the day present in a fresh plan.
pub const DEFAULT_DAY_ID: &str = "day-1";

/// Title given to new separators.
pub const DEFAULT_SEPARATOR_TITLE: &str = "Bloque";

/// Label for the day at 1-based position `n`.
pub fn day_label(n: usize) -> String {
    format!("Día {}", n)
}

pub(crate) fn new_item_id() -> ItemId {
    Uuid::new_v4().to_string()
}

pub(crate) fn new_day_id() -> DayId {
    format!("day-{}", Uuid::new_v4().simple())
}

/// Training modality of a dosage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DosageKind {
    Strength,
    Plyo,
    Isometric,
    Rehab,
    Cardio,
}

/// Modality-specific prescription fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Prescription {
    Strength {
        #[serde(default)]
        reps: String,
        #[serde(default)]
        rir: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<String>,
    },
    Plyo {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        contacts: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<String>,
    },
    Isometric {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intensity: Option<String>,
    },
    Rehab {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quality: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pain: Option<String>,
    },
    Cardio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intensity: Option<String>,
    },
}

impl Prescription {
    /// Empty prescription for a modality.
    pub fn for_kind(kind: DosageKind) -> Self {
        match kind {
            DosageKind::Strength => Prescription::Strength {
                reps: "8-12".to_string(),
                rir: "2".to_string(),
                weight: None,
            },
            DosageKind::Plyo => Prescription::Plyo {
                contacts: None,
                distance: None,
                height: None,
            },
            DosageKind::Isometric => Prescription::Isometric {
                duration: None,
                intensity: None,
            },
            DosageKind::Rehab => Prescription::Rehab {
                quality: None,
                pain: None,
            },
            DosageKind::Cardio => Prescription::Cardio {
                duration: None,
                intensity: None,
            },
        }
    }

    pub fn kind(&self) -> DosageKind {
        match self {
            Prescription::Strength { .. } => DosageKind::Strength,
            Prescription::Plyo { .. } => DosageKind::Plyo,
            Prescription::Isometric { .. } => DosageKind::Isometric,
            Prescription::Rehab { .. } => DosageKind::Rehab,
            Prescription::Cardio { .. } => DosageKind::Cardio,
        }
    }
}

/// Prescribed volume and intensity for one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosage {
    pub sets: u32,
    #[serde(flatten)]
    pub prescription: Prescription,
}

impl Default for Dosage {
    fn default() -> Self {
        Self {
            sets: 3,
            prescription: Prescription::for_kind(DosageKind::Strength),
        }
    }
}

impl Dosage {
    /// Switch modality, keeping sets and resetting modality fields.
    pub fn switch_kind(&mut self, kind: DosageKind) {
        if self.prescription.kind() != kind {
            self.prescription = Prescription::for_kind(kind);
        }
    }
}

/// An exercise placed in a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    /// Instance id, unique within the plan
    pub id: ItemId,
    pub exercise_id: String,
    /// Catalog snapshot at insertion time
    pub variant: Arc<EnrichedExercise>,
    #[serde(default)]
    pub dosage: Dosage,
    #[serde(default)]
    pub notes: String,
}

/// Organizational marker inside a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separator {
    pub id: ItemId,
    pub title: String,
}

/// One element of a day's ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlanItem {
    Exercise(ExerciseEntry),
    Separator(Separator),
}

impl PlanItem {
    pub fn id(&self) -> &str {
        match self {
            PlanItem::Exercise(entry) => &entry.id,
            PlanItem::Separator(separator) => &separator.id,
        }
    }

    pub fn as_exercise(&self) -> Option<&ExerciseEntry> {
        match self {
            PlanItem::Exercise(entry) => Some(entry),
            PlanItem::Separator(_) => None,
        }
    }

    /// Copy with a fresh instance id.
    pub(crate) fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        match &mut copy {
            PlanItem::Exercise(entry) => entry.id = new_item_id(),
            PlanItem::Separator(separator) => separator.id = new_item_id(),
        }
        copy
    }
}

/// Shallow field update for an item.
///
/// Fields that do not apply to the item's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub notes: Option<String>,
    pub sets: Option<u32>,
    /// Switch modality before applying `prescription`
    pub kind: Option<DosageKind>,
    pub prescription: Option<Prescription>,
    /// Separator title
    pub title: Option<String>,
}

impl ItemUpdate {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Default::default()
        }
    }

    pub fn sets(sets: u32) -> Self {
        Self {
            sets: Some(sets),
            ..Default::default()
        }
    }

    pub fn kind(kind: DosageKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn prescription(prescription: Prescription) -> Self {
        Self {
            prescription: Some(prescription),
            ..Default::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Merge into an item.
    pub(crate) fn apply(self, item: &mut PlanItem) {
        match item {
            PlanItem::Exercise(entry) => {
                if let Some(notes) = self.notes {
                    entry.notes = notes;
                }
                if let Some(sets) = self.sets {
                    entry.dosage.sets = sets;
                }
                if let Some(kind) = self.kind {
                    entry.dosage.switch_kind(kind);
                }
                if let Some(prescription) = self.prescription {
                    entry.dosage.prescription = prescription;
                }
            }
            PlanItem::Separator(separator) => {
                if let Some(title) = self.title {
                    separator.title = title;
                }
            }
        }
    }
}

/// One training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub id: DayId,
    pub label: String,
    #[serde(rename = "exercises", alias = "items", default)]
    pub items: Vec<PlanItem>,
}

impl PlanDay {
    pub fn new(id: impl Into<DayId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            items: Vec::new(),
        }
    }

    /// Exercise entries, skipping separators.
    pub fn exercises(&self) -> impl Iterator<Item = &ExerciseEntry> {
        self.items.iter().filter_map(PlanItem::as_exercise)
    }

    pub(crate) fn position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == item_id)
    }
}

/// A microcycle: named days in a user-controlled order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub name: String,
    pub days: BTreeMap<DayId, PlanDay>,
    /// Sole source of truth for day sequence
    pub day_order: Vec<DayId>,
}

impl Default for Plan {
    fn default() -> Self {
        Self::with_name(DEFAULT_PLAN_NAME)
    }
}

impl Plan {
    /// A plan with a single empty day.
    pub fn with_name(name: impl Into<String>) -> Self {
        let day = PlanDay::new(DEFAULT_DAY_ID, day_label(1));
        let mut days = BTreeMap::new();
        days.insert(day.id.clone(), day);

        Self {
            name: name.into(),
            days,
            day_order: vec![DEFAULT_DAY_ID.to_string()],
        }
    }

    /// Days in display order.
    pub fn ordered_days(&self) -> impl Iterator<Item = &PlanDay> {
        self.day_order.iter().filter_map(|id| self.days.get(id))
    }

    pub fn day_count(&self) -> usize {
        self.day_order.len()
    }

    /// Repair a plan whose day mapping and order disagree.
    ///
    /// Returns `true` if anything changed.
    pub(crate) fn normalize(&mut self) -> bool {
        let mut changed = false;

        let mut seen = std::collections::BTreeSet::new();
        let before = self.day_order.len();
        let days = &self.days;
        self.day_order
            .retain(|id| days.contains_key(id) && seen.insert(id.clone()));
        changed |= self.day_order.len() != before;

        for id in self.days.keys() {
            if !seen.contains(id) {
                self.day_order.push(id.clone());
                changed = true;
            }
        }

        for (key, day) in self.days.iter_mut() {
            if &day.id != key {
                day.id = key.clone();
                changed = true;
            }
        }

        if self.day_order.is_empty() {
            let name = std::mem::take(&mut self.name);
            *self = Plan::with_name(name);
            changed = true;
        }

        changed
    }
}
