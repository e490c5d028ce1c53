//! Supervision of the external classifier process
//!
//! The external classifier is the most accurate strategy for longer texts
//! but also the only one that can fail at runtime. Each failure kills the
//! process and starts a new one. After `max_restarts` restarts, or as soon
//! as a restart itself fails, the classifier is disabled for the lifetime of
//! the supervisor and callers fall back to the in-process scorers.

use crate::process::{parse_predictions, ClassifierProcess, ProcessSpawner};
use glossa_core::language::{base_code, LanguageCatalog};
use glossa_core::{LanguageScorer, LanguageScores, ScorerError};
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Input length at which external confidence saturates
const CONFIDENCE_SATURATION_CHARS: usize = 30;

/// Observable health of the external classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierHealth {
    /// Last call succeeded
    Healthy,
    /// Last call failed and the process was restarted `n` times in total
    Recovering(u32),
    /// Switched off for good
    Disabled,
}

impl fmt::Display for ClassifierHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierHealth::Healthy => write!(f, "healthy"),
            ClassifierHealth::Recovering(n) => write!(f, "recovering ({n} restarts)"),
            ClassifierHealth::Disabled => write!(f, "disabled"),
        }
    }
}

/// Confidence assigned to external classifier results.
///
/// The classifier's own probability is unreliable on short input, so the
/// confidence only depends on how much text it saw.
pub fn external_confidence(text_chars: usize) -> f64 {
    let seen = text_chars.min(CONFIDENCE_SATURATION_CHARS) as f64;
    (0.99 * seen / CONFIDENCE_SATURATION_CHARS as f64).min(1.0)
}

/// Supervised external classifier
pub struct ExternalClassifier {
    spawner: Box<dyn ProcessSpawner>,
    process: Mutex<Option<Box<dyn ClassifierProcess>>>,
    restarts: AtomicU32,
    recovering: AtomicBool,
    disabled: AtomicBool,
    max_restarts: u32,
    catalog: LanguageCatalog,
}

impl fmt::Debug for ExternalClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalClassifier")
            .field("health", &self.health())
            .field("max_restarts", &self.max_restarts)
            .finish()
    }
}

impl ExternalClassifier {
    /// Spawn the first process; failure here is a configuration problem
    pub fn new(
        spawner: Box<dyn ProcessSpawner>,
        max_restarts: u32,
        catalog: LanguageCatalog,
    ) -> io::Result<Self> {
        let process = spawner.spawn()?;
        Ok(Self {
            spawner,
            process: Mutex::new(Some(process)),
            restarts: AtomicU32::new(0),
            recovering: AtomicBool::new(false),
            disabled: AtomicBool::new(false),
            max_restarts,
            catalog,
        })
    }

    /// Current health
    pub fn health(&self) -> ClassifierHealth {
        if self.disabled.load(Ordering::Acquire) {
            ClassifierHealth::Disabled
        } else if self.recovering.load(Ordering::Acquire) {
            ClassifierHealth::Recovering(self.restart_count())
        } else {
            ClassifierHealth::Healthy
        }
    }

    /// Restarts performed so far; never decreases
    pub fn restart_count(&self) -> u32 {
        self.restarts.load(Ordering::Acquire)
    }

    /// True once the classifier has been switched off
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    /// Classify one line of text.
    ///
    /// On failure the process is restarted before returning, so the next
    /// call talks to a fresh process.
    pub fn classify(
        &self,
        text: &str,
        additional: &[String],
    ) -> std::result::Result<LanguageScores, ScorerError> {
        if self.is_disabled() {
            return Err(ScorerError::Disabled);
        }

        let mut slot = self.lock_process();
        let outcome = match slot.as_mut() {
            Some(process) => round_trip(process.as_mut(), text),
            None => Err("no running process".to_string()),
        };

        match outcome {
            Ok(predictions) => {
                if self.recovering.swap(false, Ordering::AcqRel) {
                    log::info!("External classifier recovered");
                }
                Ok(self.to_scores(predictions, additional))
            }
            Err(reason) => {
                log::warn!("External classifier failed: {reason}");
                self.restart(&mut slot);
                Err(ScorerError::Transient(reason))
            }
        }
    }

    fn lock_process(&self) -> MutexGuard<'_, Option<Box<dyn ClassifierProcess>>> {
        // a panic mid-call leaves at worst a broken process, which the
        // failure path replaces
        self.process.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn restart(&self, slot: &mut Option<Box<dyn ClassifierProcess>>) {
        if let Some(mut old) = slot.take() {
            old.kill();
        }

        let next = self.restart_count() + 1;
        if next > self.max_restarts {
            self.disable(&format!("restart limit of {} reached", self.max_restarts));
            return;
        }

        match self.spawner.spawn() {
            Ok(process) => {
                *slot = Some(process);
                let count = self.restarts.fetch_add(1, Ordering::AcqRel) + 1;
                self.recovering.store(true, Ordering::Release);
                log::warn!(
                    "Restarted external classifier ({count}/{})",
                    self.max_restarts
                );
            }
            Err(e) => self.disable(&format!("restart failed: {e}")),
        }
    }

    fn disable(&self, reason: &str) {
        if !self.disabled.swap(true, Ordering::AcqRel) {
            log::error!("Disabling external classifier: {reason}");
        }
        self.recovering.store(false, Ordering::Release);
    }

    fn to_scores(&self, predictions: Vec<(String, f64)>, additional: &[String]) -> LanguageScores {
        let mut scores = LanguageScores::new();
        for (label, prob) in predictions {
            let code = base_code(&label);
            if self.catalog.is_supported(&code) || additional.contains(&code) {
                scores.add(code, prob);
            } else {
                log::trace!("Dropping external label {label}");
            }
        }
        if scores.is_empty() {
            LanguageScores::unknown()
        } else {
            scores
        }
    }
}

impl Drop for ExternalClassifier {
    fn drop(&mut self) {
        let slot = self.process.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(mut process) = slot.take() {
            process.kill();
        }
    }
}

impl LanguageScorer for ExternalClassifier {
    fn name(&self) -> &'static str {
        "fasttext"
    }

    fn score(
        &self,
        text: &str,
        additional: &[String],
    ) -> std::result::Result<LanguageScores, ScorerError> {
        self.classify(text, additional)
    }
}

fn round_trip(
    process: &mut dyn ClassifierProcess,
    text: &str,
) -> std::result::Result<Vec<(String, f64)>, String> {
    let line = text.replace(['\n', '\r'], " ").to_lowercase();
    process
        .write_line(&line)
        .map_err(|e| format!("write failed: {e}"))?;
    let response = process
        .read_line()
        .map_err(|e| format!("read failed: {e}"))?
        .ok_or_else(|| "process closed its output".to_string())?;
    parse_predictions(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::language::builtin_catalog;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Scripted process: pops one response per call, `None` means EOF
    struct ScriptedProcess {
        responses: Arc<Mutex<VecDeque<Option<String>>>>,
    }

    impl ClassifierProcess for ScriptedProcess {
        fn write_line(&mut self, _line: &str) -> io::Result<()> {
            Ok(())
        }

        fn read_line(&mut self) -> io::Result<Option<String>> {
            Ok(self.responses.lock().unwrap().pop_front().flatten())
        }

        fn kill(&mut self) {}
    }

    struct ScriptedSpawner {
        responses: Arc<Mutex<VecDeque<Option<String>>>>,
        spawn_budget: Arc<Mutex<Option<u32>>>,
    }

    impl ProcessSpawner for ScriptedSpawner {
        fn spawn(&self) -> io::Result<Box<dyn ClassifierProcess>> {
            let mut budget = self.spawn_budget.lock().unwrap();
            if let Some(left) = budget.as_mut() {
                if *left == 0 {
                    return Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
                }
                *left -= 1;
            }
            Ok(Box::new(ScriptedProcess {
                responses: Arc::clone(&self.responses),
            }))
        }
    }

    fn classifier(responses: Vec<Option<&str>>, spawn_budget: Option<u32>) -> ExternalClassifier {
        let spawner = ScriptedSpawner {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(|r| r.map(String::from)).collect(),
            )),
            spawn_budget: Arc::new(Mutex::new(spawn_budget)),
        };
        ExternalClassifier::new(Box::new(spawner), 10, builtin_catalog().clone()).unwrap()
    }

    #[test]
    fn test_successful_call() {
        let ext = classifier(vec![Some("__label__de 0.9 __label__en 0.1")], None);
        let scores = ext.classify("Das ist ein Test", &[]).unwrap();
        assert_eq!(scores.top(), Some(("de", 0.9)));
        assert_eq!(ext.health(), ClassifierHealth::Healthy);
    }

    #[test]
    fn test_unsupported_labels_dropped_and_variants_collapsed() {
        let ext = classifier(
            vec![Some("__label__th 0.5 __label__zh-tw 0.3 __label__zh-cn 0.1")],
            None,
        );
        let scores = ext.classify("text", &[]).unwrap();
        assert!(!scores.contains("th"));
        let zh = scores.get("zh").unwrap();
        assert!((zh - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_additional_codes_are_kept() {
        let ext = classifier(vec![Some("__label__hi 0.8")], None);
        let scores = ext.classify("text", &["hi".to_string()]).unwrap();
        assert_eq!(scores.top(), Some(("hi", 0.8)));
    }

    #[test]
    fn test_failure_restarts_and_recovers() {
        let ext = classifier(vec![None, Some("__label__en 1.0")], None);

        let err = ext.classify("hello", &[]).unwrap_err();
        assert!(matches!(err, ScorerError::Transient(_)));
        assert_eq!(ext.health(), ClassifierHealth::Recovering(1));

        ext.classify("hello", &[]).unwrap();
        assert_eq!(ext.health(), ClassifierHealth::Healthy);
        assert_eq!(ext.restart_count(), 1);
    }

    #[test]
    fn test_malformed_response_is_a_failure() {
        let ext = classifier(vec![Some("__label__en")], None);
        assert!(ext.classify("hello", &[]).is_err());
        assert_eq!(ext.health(), ClassifierHealth::Recovering(1));
    }

    #[test]
    fn test_eleven_failures_disable() {
        let ext = classifier(vec![None; 11], None);
        for expected in 1..=10 {
            assert!(ext.classify("hello", &[]).is_err());
            assert_eq!(ext.health(), ClassifierHealth::Recovering(expected));
        }
        assert!(ext.classify("hello", &[]).is_err());
        assert_eq!(ext.health(), ClassifierHealth::Disabled);
        assert_eq!(ext.restart_count(), 10);

        assert_eq!(ext.classify("hello", &[]), Err(ScorerError::Disabled));
        assert_eq!(ext.health(), ClassifierHealth::Disabled);
    }

    #[test]
    fn test_failed_restart_disables_without_counting() {
        // initial spawn uses the only budget entry
        let ext = classifier(vec![None], Some(1));
        assert!(ext.classify("hello", &[]).is_err());
        assert_eq!(ext.health(), ClassifierHealth::Disabled);
        assert_eq!(ext.restart_count(), 0);
    }

    #[test]
    fn test_initial_spawn_failure() {
        let spawner = ScriptedSpawner {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            spawn_budget: Arc::new(Mutex::new(Some(0))),
        };
        let result = ExternalClassifier::new(Box::new(spawner), 10, builtin_catalog().clone());
        assert!(result.is_err());
    }

    #[test]
    fn test_external_confidence() {
        assert_eq!(external_confidence(0), 0.0);
        assert!((external_confidence(15) - 0.495).abs() < 1e-9);
        assert!((external_confidence(30) - 0.99).abs() < 1e-9);
        assert!((external_confidence(500) - 0.99).abs() < 1e-9);
    }
}
