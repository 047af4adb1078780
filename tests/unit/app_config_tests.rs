/*!
 * Tests for application configuration
 */

use anyhow::Result;
use std::path::PathBuf;

use signgloss::app_config::{Config, ExporterKind, LogLevel};
use signgloss::gloss::{LetterSelection, ScorerKind};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert!((config.engine.coverage_threshold - 0.97).abs() < 1e-6);
    assert!((config.engine.fuzzy_cutoff - 0.87).abs() < 1e-6);
    assert_eq!(config.engine.scorer, ScorerKind::Sequence);
    assert_eq!(config.export.exporter, ExporterKind::Ffmpeg);
    assert_eq!(config.export.output_dir, PathBuf::from("asl_outputs"));
    assert_eq!(config.export.fps, 25);
    assert_eq!(config.batch.concurrent_translations, 4);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config
        .dataset
        .root
        .ends_with(".cache/kagglehub/datasets/risangbaskoro/wlasl-processed/versions/5"));
    assert!(config.validate().is_ok());
}

/// Partial JSON falls back to defaults for every missing field
#[test]
fn test_deserialize_partialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "dataset": { "root": "/data/wlasl", "letter_selection": "random" },
        "engine": { "scorer": "jarowinkler" },
        "export": { "exporter": "manifest" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.dataset.root, PathBuf::from("/data/wlasl"));
    assert_eq!(config.dataset.letter_selection, LetterSelection::Random);
    assert_eq!(config.dataset.class_list, PathBuf::from("wlasl_class_list.txt"));
    assert_eq!(config.engine.scorer, ScorerKind::JaroWinkler);
    assert!((config.engine.coverage_threshold - 0.97).abs() < 1e-6);
    assert_eq!(config.export.exporter, ExporterKind::Manifest);
    assert_eq!(config.export.codec, "libx264");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_validate_outOfRangeValues_shouldFail() {
    let mut config = Config::default();
    config.engine.coverage_threshold = 1.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.engine.fuzzy_cutoff = -0.1;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.export.fps = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.export.image_duration_secs = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.batch.concurrent_translations = 0;
    assert!(config.validate().is_err());
}

/// A missing config file is created with defaults and can be read back
#[test]
fn test_loadOrCreate_missingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let mut changed = created.clone();
    changed.batch.concurrent_translations = 9;
    changed.save(&path)?;

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.batch.concurrent_translations, 9);
    Ok(())
}

#[test]
fn test_loadOrCreate_invalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ nope")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_engineConfig_fuzzyMatcher_shouldFollowSettings() {
    let mut config = Config::default();
    config.engine.scorer = ScorerKind::Levenshtein;
    config.engine.fuzzy_cutoff = 0.75;

    let matcher = config.engine.fuzzy_matcher();

    assert_eq!(matcher.scorer_name(), "levenshtein");
    assert!((matcher.cutoff() - 0.75).abs() < 1e-6);
}
