//! Detector behavior around the supervised external classifier

mod common;

use common::{seed_builder, FailingRestartSpawner, FakeSpawner};
use glossa_engine::supervisor::external_confidence;
use glossa_engine::{ClassifierHealth, DetectionRequest, EngineError, LanguageDetector};

const LONG_GERMAN: &str =
    "Am Abend fällt das Licht langsam über die Felder und die Vögel kehren in die Bäume zurück.";

#[test]
fn test_external_is_primary_for_long_text() {
    let spawner = FakeSpawner::always("__label__de 0.97 __label__en 0.02", 1);
    let detector = seed_builder()
        .external_spawner(spawner.clone(), 10)
        .build()
        .unwrap();

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert_eq!(result.language(), Some("de"));
    assert_eq!(result.source, "fasttext");
    assert_eq!(result.confidence, external_confidence(LONG_GERMAN.chars().count()));

    let sent = spawner.lines.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], LONG_GERMAN.to_lowercase());
}

#[test]
fn test_short_text_uses_ngram_when_available() {
    let spawner = FakeSpawner::always("__label__en 0.99", 5);
    let detector = seed_builder()
        .external_spawner(spawner.clone(), 10)
        .build()
        .unwrap();

    let result = detector
        .detect(&DetectionRequest::new("Das ist ein deutscher Text"))
        .unwrap();
    assert_eq!(result.language(), Some("de"));
    assert!(result.source.starts_with("ngram"));
    assert!(spawner.lines.lock().unwrap().is_empty());
}

#[test]
fn test_short_text_uses_external_without_ngram() {
    let spawner = FakeSpawner::always("__label__de 0.8", 1);
    let detector = LanguageDetector::builder()
        .external_spawner(spawner, 10)
        .build()
        .unwrap();

    let result = detector.detect(&DetectionRequest::new("Guten Tag")).unwrap();
    assert_eq!(result.language(), Some("de"));
    assert_eq!(result.source, "fasttext");
    assert!((result.confidence - 0.99 * 9.0 / 30.0).abs() < 1e-9);
}

#[test]
fn test_external_low_score_gets_common_words() {
    let spawner = FakeSpawner::always("__label__nl 0.5 __label__de 0.4", 1);
    let detector = seed_builder()
        .external_spawner(spawner, 10)
        .build()
        .unwrap();

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert_eq!(result.language(), Some("de"));
    assert_eq!(result.source, "fasttext+commonwords");
}

#[test]
fn test_transient_failure_falls_back_and_recovers() {
    let spawner = FakeSpawner::with_script(vec![None, Some("__label__de 0.9")]);
    let detector = seed_builder()
        .external_spawner(spawner.clone(), 10)
        .build()
        .unwrap();

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert_eq!(result.language(), Some("de"));
    assert!(result.source.starts_with("fasttext+fallback+ngram"));
    assert_eq!(detector.external_health(), Some(ClassifierHealth::Recovering(1)));
    assert_eq!(spawner.spawn_count(), 2);

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert_eq!(result.source, "fasttext");
    assert_eq!(detector.external_health(), Some(ClassifierHealth::Healthy));
    assert_eq!(detector.external_restart_count(), Some(1));
}

#[test]
fn test_eleven_failures_disable_external() {
    let spawner = FakeSpawner::default();
    let detector = seed_builder()
        .external_spawner(spawner.clone(), 10)
        .build()
        .unwrap();

    for _ in 0..11 {
        let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
        assert!(result.source.contains("fallback"));
        assert_eq!(result.language(), Some("de"));
    }
    assert_eq!(detector.external_health(), Some(ClassifierHealth::Disabled));
    assert_eq!(spawner.spawn_count(), 11);

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert_eq!(result.source, "fasttext+fallback+ngram");
    assert_eq!(result.language(), Some("de"));
    assert_eq!(spawner.lines.lock().unwrap().len(), 11);
    assert_eq!(spawner.spawn_count(), 11);
}

#[test]
fn test_failed_restart_disables_immediately() {
    let spawner = FailingRestartSpawner::new(FakeSpawner::default());
    let detector = seed_builder().external_spawner(spawner, 10).build().unwrap();

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert!(result.source.contains("fallback"));
    assert_eq!(detector.external_health(), Some(ClassifierHealth::Disabled));
    assert_eq!(detector.external_restart_count(), Some(0));
}

#[test]
fn test_disabled_without_ngram_falls_back_to_dictionary() {
    let spawner = FailingRestartSpawner::new(FakeSpawner::default());
    let detector = LanguageDetector::builder()
        .external_spawner(spawner, 10)
        .build()
        .unwrap();

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert_eq!(result.source, "fasttext+fallback+dictionary");
    assert_eq!(detector.external_health(), Some(ClassifierHealth::Disabled));

    let result = detector.detect(&DetectionRequest::new(LONG_GERMAN)).unwrap();
    assert_eq!(result.source, "fasttext+fallback+dictionary");
    assert_eq!(detector.external_health(), Some(ClassifierHealth::Disabled));
}

#[test]
fn test_initial_spawn_failure_is_configuration_error() {
    let result = LanguageDetector::builder()
        .fasttext("/nonexistent/fasttext", "/nonexistent/lid.176.bin")
        .build();
    assert!(matches!(result, Err(EngineError::Config(msg)) if msg.contains("external")));
}
