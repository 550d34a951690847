//! Configuration file handling.

use microcycle::plan::RoiFilter;
use microcycle::catalog::Rating;
use microcycle::storage::config::{load_config_from, save_config_to, DEFAULT_STORAGE_KEY};
use microcycle::storage::{AppConfig, ConfigError};
use tempfile::TempDir;

#[test]
fn test_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config_from(&dir.path().join("config.toml")).unwrap();

    assert_eq!(config.plan.default_name, "Nuevo Microciclo");
    assert_eq!(config.plan.storage_key, DEFAULT_STORAGE_KEY);
    assert!((config.search.threshold - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.data_dir, dir.path());
    assert_eq!(config.database_path(), dir.path().join("microcycle.db"));
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.search.threshold = 0.2;
    config.plan.default_name = "Mesociclo".to_string();
    config.generator.target = "Isquio".to_string();
    config.generator.roi = "Alto".to_string();
    config.generator.count = 5;
    save_config_to(&path, &config).unwrap();

    let loaded = load_config_from(&path).unwrap();
    let criteria = loaded.generator.criteria().unwrap();

    assert!((loaded.search.threshold - 0.2).abs() < f64::EPSILON);
    assert_eq!(loaded.plan.default_name, "Mesociclo");
    assert_eq!(criteria.target_substring, "Isquio");
    assert_eq!(criteria.roi, RoiFilter::Only(Rating::Alto));
    assert_eq!(criteria.count, 5);
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[search]\nthreshold = 0.1\n").unwrap();

    let config = load_config_from(&path).unwrap();

    assert!((config.search.threshold - 0.1).abs() < f64::EPSILON);
    assert_eq!(config.plan.default_name, "Nuevo Microciclo");
}

#[test]
fn test_invalid_config_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "search = [").unwrap();

    assert!(matches!(load_config_from(&path), Err(ConfigError::ParseError(_))));
}
