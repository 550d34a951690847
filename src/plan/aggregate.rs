//! Plan aggregate: the command API over a microcycle.
//!
//! Every command keeps the plan invariants intact (at least one day, every id
//! in `day_order` has a day) and persists the resulting snapshot. References
//! to unknown days or items are no-ops, reported through the return value.
//! A failed save is logged and remembered; the in-memory plan stays
//! authoritative.

use std::sync::Arc;

use super::types::{
    day_label, new_day_id, new_item_id, DayId, Dosage, ExerciseEntry, ItemId, ItemUpdate, Plan,
    PlanDay, PlanItem, Separator, DEFAULT_PLAN_NAME, DEFAULT_SEPARATOR_TITLE,
};
use crate::catalog::EnrichedExercise;
use crate::storage::store::{SnapshotStore, StoreError};
use crate::storage::config::DEFAULT_STORAGE_KEY;

/// Owner of the plan and its persistence.
pub struct PlanAggregate {
    plan: Plan,
    default_name: String,
    store: Option<Box<dyn SnapshotStore>>,
    storage_key: String,
    last_persist_error: Option<StoreError>,
}

impl Default for PlanAggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlanAggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanAggregate")
            .field("plan", &self.plan)
            .field("storage_key", &self.storage_key)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl PlanAggregate {
    /// A fresh plan with no persistence.
    pub fn new() -> Self {
        Self {
            plan: Plan::default(),
            default_name: DEFAULT_PLAN_NAME.to_string(),
            store: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            last_persist_error: None,
        }
    }

    /// Restore from `store` under `key`, or start fresh.
    ///
    /// An unreadable snapshot is logged and replaced by a fresh plan.
    pub fn open(store: Box<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        let mut aggregate = Self {
            store: Some(store),
            storage_key: key.into(),
            ..Self::new()
        };

        if let Some(plan) = aggregate.load_snapshot() {
            aggregate.restore(plan);
        }

        aggregate
    }

    /// Name used for new and cleared plans.
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if self.plan == Plan::with_name(self.default_name.clone()) {
            self.plan.name = name.clone();
        }
        self.default_name = name;
        self
    }

    fn load_snapshot(&self) -> Option<Plan> {
        let store = self.store.as_ref()?;

        let raw = match store.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read plan snapshot: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Plan>(&raw) {
            Ok(plan) => Some(plan),
            Err(e) => {
                tracing::warn!("Discarding unreadable plan snapshot: {}", e);
                None
            }
        }
    }

    // ========== Read access ==========

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn day(&self, day_id: &str) -> Option<&PlanDay> {
        self.plan.days.get(day_id)
    }

    /// Days in display order.
    pub fn days(&self) -> impl Iterator<Item = &PlanDay> {
        self.plan.ordered_days()
    }

    pub fn day_count(&self) -> usize {
        self.plan.day_count()
    }

    /// First day in order, the fallback cursor after a removal.
    pub fn first_day_id(&self) -> &str {
        self.plan
            .day_order
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn find_item(&self, item_id: &str, day_id: &str) -> Option<&PlanItem> {
        let day = self.plan.days.get(day_id)?;
        day.items.iter().find(|item| item.id() == item_id)
    }

    /// Error from the most recent save, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&StoreError> {
        self.last_persist_error.as_ref()
    }

    // ========== Snapshots ==========

    /// Plain serializable form of the plan.
    pub fn serialize(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.plan)
    }

    /// Replace the plan with a snapshot, repairing broken day ordering.
    ///
    /// Nothing is persisted.
    pub fn restore(&mut self, mut snapshot: Plan) {
        if snapshot.normalize() {
            tracing::warn!("Repaired inconsistent plan snapshot '{}'", snapshot.name);
        }
        self.plan = snapshot;
    }

    /// Restore from a JSON value.
    pub fn restore_json(&mut self, value: serde_json::Value) -> Result<(), serde_json::Error> {
        let plan: Plan = serde_json::from_value(value)?;
        self.restore(plan);
        Ok(())
    }

    // ========== Day commands ==========

    /// Append a new empty day and return its id.
    pub fn add_day(&mut self) -> DayId {
        let mut id = new_day_id();
        while self.plan.days.contains_key(&id) {
            id = new_day_id();
        }

        let label = day_label(self.plan.day_count() + 1);
        self.plan
            .days
            .insert(id.clone(), PlanDay::new(id.clone(), label));
        self.plan.day_order.push(id.clone());

        self.commit("add_day");
        id
    }

    /// Delete a day unless it is the last one.
    pub fn remove_day(&mut self, day_id: &str) -> bool {
        if self.plan.day_count() <= 1 || !self.plan.days.contains_key(day_id) {
            return false;
        }

        self.plan.days.remove(day_id);
        self.plan.day_order.retain(|id| id != day_id);

        self.commit("remove_day");
        true
    }

    /// Rename the plan.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.plan.name = name.into();
        self.commit("rename");
    }

    /// Reset to a single empty day.
    pub fn clear(&mut self) {
        self.plan = Plan::with_name(self.default_name.clone());
        self.commit("clear");
    }

    // ========== Item commands ==========

    /// Append a separator to a day.
    pub fn add_separator(&mut self, day_id: &str) -> Option<ItemId> {
        let day = self.plan.days.get_mut(day_id)?;

        let id = new_item_id();
        day.items.push(PlanItem::Separator(Separator {
            id: id.clone(),
            title: DEFAULT_SEPARATOR_TITLE.to_string(),
        }));

        self.commit("add_separator");
        Some(id)
    }

    /// Append an exercise with the default dosage.
    pub fn add_exercise(
        &mut self,
        exercise: Arc<EnrichedExercise>,
        day_id: &str,
    ) -> Option<ItemId> {
        let day = self.plan.days.get_mut(day_id)?;

        let id = new_item_id();
        day.items.push(PlanItem::Exercise(ExerciseEntry {
            id: id.clone(),
            exercise_id: exercise.variant.id.clone(),
            variant: exercise,
            dosage: Dosage::default(),
            notes: String::new(),
        }));

        self.commit("add_exercise");
        Some(id)
    }

    /// Clone an item right after the original.
    pub fn duplicate_item(&mut self, item_id: &str, day_id: &str) -> Option<ItemId> {
        let day = self.plan.days.get_mut(day_id)?;
        let position = day.position(item_id)?;

        let copy = day.items[position].duplicate();
        let id = copy.id().to_string();
        day.items.insert(position + 1, copy);

        self.commit("duplicate_item");
        Some(id)
    }

    pub fn remove_item(&mut self, item_id: &str, day_id: &str) -> bool {
        let Some(day) = self.plan.days.get_mut(day_id) else {
            return false;
        };
        let Some(position) = day.position(item_id) else {
            return false;
        };

        day.items.remove(position);
        self.commit("remove_item");
        true
    }

    /// Merge field updates into an item.
    pub fn update_item(&mut self, item_id: &str, day_id: &str, update: ItemUpdate) -> bool {
        let Some(item) = self
            .plan
            .days
            .get_mut(day_id)
            .and_then(|day| day.items.iter_mut().find(|item| item.id() == item_id))
        else {
            return false;
        };

        update.apply(item);
        self.commit("update_item");
        true
    }

    /// Move an item to `target_index` of another (or the same) day.
    ///
    /// The index is a drop position in the target sequence as it was before
    /// the move; `None` or an index past the end appends.
    pub fn move_item(
        &mut self,
        item_id: &str,
        source_day_id: &str,
        target_day_id: &str,
        target_index: Option<usize>,
    ) -> bool {
        if !self.plan.days.contains_key(target_day_id) {
            return false;
        }

        let Some(source) = self.plan.days.get_mut(source_day_id) else {
            return false;
        };
        let Some(from) = source.position(item_id) else {
            return false;
        };
        let item = source.items.remove(from);

        let Some(target) = self.plan.days.get_mut(target_day_id) else {
            return false;
        };

        let mut index = target_index.unwrap_or(usize::MAX);
        if source_day_id == target_day_id && from < index {
            index -= 1;
        }
        let index = index.min(target.items.len());
        target.items.insert(index, item);

        self.commit("move_item");
        true
    }

    fn commit(&mut self, operation: &str) {
        tracing::debug!(
            "Plan '{}' {} ({} days)",
            self.plan.name,
            operation,
            self.plan.day_count()
        );

        let Some(store) = self.store.as_mut() else {
            return;
        };

        let result = serde_json::to_string(&self.plan)
            .map_err(StoreError::from)
            .and_then(|json| store.put(&self.storage_key, &json));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!("Failed to persist plan after {}: {}", operation, e);
                self.last_persist_error = Some(e);
            }
        }
    }
}
