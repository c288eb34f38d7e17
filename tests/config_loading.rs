//! Configuration file loading.

use delve::{DelveError, DelveResult, EntityKind, GameConfig, GameState};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_saved_config_loads_back() -> DelveResult<()> {
    let mut config = GameConfig::new(404);
    config.simulation.reeval_interval = 4;
    config.generation.max_attempts = 20;

    let file = write_config(&config.to_json()?);
    let loaded = GameConfig::load_from_file(file.path())?;

    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn test_optional_sections_use_defaults() -> DelveResult<()> {
    let file = write_config(
        r#"{
            "generation": {
                "seed": 9,
                "width": 24,
                "height": 14,
                "max_attempts": 30,
                "min_cluster_size": 2,
                "max_cluster_size": 4
            }
        }"#,
    );

    let config = GameConfig::load_from_file(file.path())?;
    assert_eq!(config.simulation.reeval_interval, 10);
    assert_eq!(config.simulation.hostile_update_interval_ms, 300);
    assert_eq!(config.generation.requested_entities(), 20);

    let state = GameState::new(config)?;
    assert_eq!(state.grid.width(), 24);
    assert_eq!(state.registry.count_of(EntityKind::Boss), 5);
    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_config(
        r#"{
            "generation": {
                "seed": 1,
                "width": 8,
                "height": 8,
                "max_attempts": 10,
                "min_cluster_size": 4,
                "max_cluster_size": 6
            }
        }"#,
    );

    assert!(matches!(
        GameConfig::load_from_file(file.path()),
        Err(DelveError::InvalidConfig(_))
    ));
}

#[test]
fn test_malformed_json_is_a_serde_error() {
    let file = write_config("{ \"generation\": ");
    assert!(matches!(
        GameConfig::load_from_file(file.path()),
        Err(DelveError::Serde(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(
        GameConfig::load_from_file(path),
        Err(DelveError::Io(_))
    ));
}
