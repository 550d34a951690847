//! Unit tests for risk flag derivation.

use microcycle::catalog::{ExerciseVariant, Naturaleza, PiaType};
use microcycle::risk::{derive_risk_flags, OnlineRisk, PfRisk};

use crate::common::fixture_index;

fn variant(estabilidad: u8, naturaleza: Naturaleza, carga_axial: u8) -> ExerciseVariant {
    ExerciseVariant {
        estabilidad_externa: estabilidad,
        naturaleza,
        carga_axial,
        ..ExerciseVariant::new("v", "Variant")
    }
}

#[test]
fn test_flags_are_deterministic() {
    for entry in fixture_index() {
        let first = derive_risk_flags(&entry.variant);
        let second = derive_risk_flags(&entry.variant);
        assert_eq!(first, second);
        assert_eq!(first, entry.flags);
    }
}

#[test]
fn test_online_prohibited_with_max_axial_load() {
    let flags = derive_risk_flags(&variant(2, Naturaleza::Ballistic, 3));
    assert_eq!(flags.online_risk, OnlineRisk::Prohibido);
}

#[test]
fn test_online_caution_below_max_axial_load() {
    let flags = derive_risk_flags(&variant(2, Naturaleza::Ballistic, 2));
    assert_eq!(flags.online_risk, OnlineRisk::Precaucion);
}

#[test]
fn test_online_ok_with_stable_setup() {
    for naturaleza in Naturaleza::all() {
        for carga_axial in 0..=3 {
            let flags = derive_risk_flags(&variant(4, naturaleza, carga_axial));
            assert_eq!(flags.online_risk, OnlineRisk::Ok);
        }
    }
}

#[test]
fn test_online_ok_for_low_stability_grind() {
    let flags = derive_risk_flags(&variant(1, Naturaleza::Grind, 3));
    assert_eq!(flags.online_risk, OnlineRisk::Ok);
}

#[test]
fn test_pf_contraindicated_when_hiperpresivo_and_max_axial() {
    let mut v = variant(4, Naturaleza::Grind, 3);
    v.pia_conservador = PiaType::Hiperpresivo;

    let flags = derive_risk_flags(&v);
    assert_eq!(flags.pf_risk, PfRisk::Contraindicado);
    assert_eq!(
        flags.pf_risk_reason.as_deref(),
        Some("Alta Carga Axial + Hiperpresión/Impacto")
    );
}

#[test]
fn test_pf_caution_when_hiperpresivo_without_axial() {
    let mut v = variant(4, Naturaleza::Grind, 1);
    v.pia_conservador = PiaType::Hiperpresivo;

    let flags = derive_risk_flags(&v);
    assert_eq!(flags.pf_risk, PfRisk::Precaucion);
    assert_eq!(
        flags.pf_risk_reason.as_deref(),
        Some("Impacto o Presión Intra-abdominal")
    );
}

#[test]
fn test_pf_ok_has_no_reason() {
    let flags = derive_risk_flags(&variant(4, Naturaleza::Grind, 3));
    assert_eq!(flags.pf_risk, PfRisk::Ok);
    assert!(flags.pf_risk_reason.is_none());
}

#[test]
fn test_hyp_adv_false_without_overlap() {
    let mut v = variant(4, Naturaleza::Grind, 0);
    v.limiting_factor = vec!["Cuádriceps".to_string()];
    v.target_primarios = vec!["Rodilla".to_string()];

    assert!(!derive_risk_flags(&v).hyp_adv);
}

#[test]
fn test_hyp_adv_uses_only_primary_entries() {
    let mut v = variant(4, Naturaleza::Grind, 0);
    v.limiting_factor = vec!["Agarre".to_string(), "Glúteo Mayor".to_string()];
    v.target_primarios = vec!["Glúteo Mayor".to_string()];

    assert!(!derive_risk_flags(&v).hyp_adv);
}

#[test]
fn test_fixture_flags() {
    let index = fixture_index();
    let jump = index.iter().find(|e| e.variant.id == "jump-squat-barra").unwrap();

    assert!(!jump.flags.hyp_adv);
    assert_eq!(jump.flags.online_risk, OnlineRisk::Prohibido);
    assert_eq!(jump.flags.pf_risk, PfRisk::Contraindicado);
}
