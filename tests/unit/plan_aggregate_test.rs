//! Unit tests for the plan aggregate command API.

use microcycle::plan::{
    auto_generate, DosageKind, GeneratorCriteria, GeneratorError, ItemUpdate, PlanAggregate,
    PlanItem, RoiFilter,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use microcycle::catalog::{Catalog, CatalogIndex};

use crate::common::{exercise, fixture_index, CATALOG_JSON};

fn ids(plan: &PlanAggregate, day_id: &str) -> Vec<String> {
    plan.day(day_id)
        .unwrap()
        .items
        .iter()
        .map(|item| item.id().to_string())
        .collect()
}

#[test]
fn test_add_day_twice_yields_distinct_ids() {
    let mut plan = PlanAggregate::new();
    let before = plan.plan().day_order.len();

    let first = plan.add_day();
    let second = plan.add_day();

    assert_ne!(first, second);
    assert_eq!(plan.plan().day_order.len(), before + 2);
    assert_eq!(plan.day(&second).unwrap().label, "Día 3");
}

#[test]
fn test_remove_last_day_is_noop() {
    let mut plan = PlanAggregate::new();

    assert!(!plan.remove_day("day-1"));
    assert_eq!(plan.day_count(), 1);
}

#[test]
fn test_remove_day_drops_order_entry() {
    let mut plan = PlanAggregate::new();
    let extra = plan.add_day();

    assert!(plan.remove_day(&extra));
    assert_eq!(plan.plan().day_order, vec!["day-1"]);
    assert!(plan.day(&extra).is_none());
}

#[test]
fn test_move_round_trip_restores_sequence() {
    let mut plan = PlanAggregate::new();
    let day_b = plan.add_day();
    plan.add_exercise(exercise("a1"), "day-1");
    plan.add_separator("day-1");
    plan.add_exercise(exercise("a3"), "day-1");
    plan.add_exercise(exercise("b1"), &day_b);

    let original_a = ids(&plan, "day-1");
    let original_b = ids(&plan, &day_b);
    let moved = original_a[0].clone();

    assert!(plan.move_item(&moved, "day-1", &day_b, Some(0)));
    assert_eq!(ids(&plan, &day_b)[0], moved);
    assert_eq!(ids(&plan, "day-1").len(), 2);

    assert!(plan.move_item(&moved, &day_b, "day-1", Some(0)));
    assert_eq!(ids(&plan, "day-1"), original_a);
    assert_eq!(ids(&plan, &day_b), original_b);
}

#[test]
fn test_move_same_day_accounts_for_removal() {
    let mut plan = PlanAggregate::new();
    let a = plan.add_exercise(exercise("a"), "day-1").unwrap();
    let b = plan.add_exercise(exercise("b"), "day-1").unwrap();
    let c = plan.add_exercise(exercise("c"), "day-1").unwrap();
    let d = plan.add_exercise(exercise("d"), "day-1").unwrap();

    // drop b before d
    assert!(plan.move_item(&b, "day-1", "day-1", Some(3)));
    assert_eq!(ids(&plan, "day-1"), vec![a.clone(), c.clone(), b.clone(), d.clone()]);

    // no index appends
    assert!(plan.move_item(&a, "day-1", "day-1", None));
    assert_eq!(ids(&plan, "day-1"), vec![c, b, d, a]);
}

#[test]
fn test_move_unknown_item_is_noop() {
    let mut plan = PlanAggregate::new();
    let other = plan.add_day();
    assert!(!plan.move_item("ghost", "day-1", &other, Some(0)));
    assert!(!plan.move_item("ghost", "nowhere", &other, Some(0)));
}

#[test]
fn test_duplicate_item_inserted_after_original() {
    let mut plan = PlanAggregate::new();
    let first = plan.add_exercise(exercise("a"), "day-1").unwrap();
    let last = plan.add_exercise(exercise("b"), "day-1").unwrap();
    plan.update_item(&first, "day-1", ItemUpdate::notes("tempo 3-1-1"));
    plan.update_item(&first, "day-1", ItemUpdate::kind(DosageKind::Isometric));

    let copy = plan.duplicate_item(&first, "day-1").unwrap();

    assert_ne!(copy, first);
    assert_eq!(ids(&plan, "day-1"), vec![first.clone(), copy.clone(), last]);

    let original = plan.find_item(&first, "day-1").unwrap().as_exercise().unwrap();
    let duplicate = plan.find_item(&copy, "day-1").unwrap().as_exercise().unwrap();
    assert_eq!(duplicate.dosage, original.dosage);
    assert_eq!(duplicate.notes, original.notes);
    assert_eq!(duplicate.exercise_id, original.exercise_id);
}

#[test]
fn test_duplicate_separator() {
    let mut plan = PlanAggregate::new();
    let separator = plan.add_separator("day-1").unwrap();
    plan.update_item(&separator, "day-1", ItemUpdate::title("Fuerza"));

    let copy = plan.duplicate_item(&separator, "day-1").unwrap();

    match plan.find_item(&copy, "day-1") {
        Some(PlanItem::Separator(s)) => assert_eq!(s.title, "Fuerza"),
        other => panic!("unexpected item: {:?}", other),
    }
}

#[test]
fn test_remove_item() {
    let mut plan = PlanAggregate::new();
    let a = plan.add_exercise(exercise("a"), "day-1").unwrap();

    assert!(plan.remove_item(&a, "day-1"));
    assert!(!plan.remove_item(&a, "day-1"));
    assert!(plan.day("day-1").unwrap().items.is_empty());
}

#[test]
fn test_entry_snapshot_is_frozen() {
    let mut catalog = Catalog::from_json(CATALOG_JSON).unwrap();
    let index = CatalogIndex::build(&catalog);
    let mut plan = PlanAggregate::new();
    let id = plan
        .add_exercise(index.get("hip-thrust-barra").unwrap().clone(), "day-1")
        .unwrap();

    let mut renamed = catalog.get("hip-thrust-barra").unwrap().clone();
    renamed.nombre_tecnico = "Hip Thrust en Máquina".to_string();
    renamed.carga_axial = 3;
    assert_eq!(catalog.merge(Catalog::new(vec![renamed])), 0);
    let rebuilt = CatalogIndex::build(&catalog);

    let entry = plan.find_item(&id, "day-1").unwrap().as_exercise().unwrap();
    assert_eq!(
        rebuilt.get("hip-thrust-barra").unwrap().variant.nombre_tecnico,
        "Hip Thrust en Máquina"
    );
    assert_eq!(entry.variant.variant.nombre_tecnico, "Hip Thrust con Barra");
    assert_eq!(entry.variant.variant.carga_axial, 1);
}

#[test]
fn test_serialize_shape() {
    let mut plan = PlanAggregate::new();
    let day_b = plan.add_day();
    let thrust = plan.add_exercise(exercise("hip-thrust"), "day-1").unwrap();
    plan.add_separator("day-1");
    plan.update_item(&thrust, "day-1", ItemUpdate::sets(4));
    let plank = plan.add_exercise(exercise("plank"), &day_b).unwrap();
    plan.update_item(&plank, &day_b, ItemUpdate::kind(DosageKind::Isometric));

    let value = plan.serialize().unwrap();

    assert_eq!(value["name"], "Nuevo Microciclo");
    assert_eq!(value["dayOrder"], serde_json::json!(["day-1", day_b.clone()]));

    let day_one = &value["days"]["day-1"]["exercises"];
    assert_eq!(day_one[0]["type"], "exercise");
    assert_eq!(day_one[0]["id"], thrust.as_str());
    assert_eq!(day_one[0]["exerciseId"], "hip-thrust");
    assert_eq!(day_one[0]["dosage"]["type"], "Strength");
    assert_eq!(day_one[0]["dosage"]["sets"], 4);
    assert_eq!(day_one[1]["type"], "separator");
    assert_eq!(day_one[1]["title"], "Bloque");

    let day_two = &value["days"][day_b.as_str()]["exercises"];
    assert_eq!(day_two[0]["dosage"]["type"], "Isometric");
    assert_eq!(day_two[0]["dosage"]["sets"], 3);

    let mut restored = PlanAggregate::new();
    restored.restore_json(value).unwrap();
    assert_eq!(restored.plan(), plan.plan());
}

#[test]
fn test_auto_generate_empty_pool_keeps_day_count() {
    let mut plan = PlanAggregate::new();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let criteria = GeneratorCriteria {
        target_substring: "Deltoides".to_string(),
        roi: RoiFilter::Any,
        count: 4,
    };

    let result = auto_generate(&mut plan, &fixture_index(), &criteria, &mut rng);

    assert!(matches!(result, Err(GeneratorError::EmptyPool { .. })));
    assert_eq!(plan.day_count(), 1);
}

#[test]
fn test_auto_generate_fills_new_day() {
    let mut plan = PlanAggregate::new();
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let criteria = GeneratorCriteria {
        target_substring: "glúteo".to_string(),
        roi: RoiFilter::parse("Alto").unwrap(),
        count: 4,
    };

    let day_id = auto_generate(&mut plan, &fixture_index(), &criteria, &mut rng).unwrap();
    let day = plan.day(&day_id).unwrap();

    assert_eq!(plan.day_count(), 2);
    assert_eq!(day.items.len(), 4);
    for entry in day.exercises() {
        assert!(entry.variant.variant.target_primarios.iter().any(|t| t.contains("Glúteo")));
        assert_eq!(entry.variant.variant.roi.display_name(), "Alto");
    }
}
