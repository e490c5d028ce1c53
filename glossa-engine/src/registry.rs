//! Detector registry
//!
//! Building a detector loads profiles and may start a subprocess, so callers
//! keep one instance per slot and share it. The registry is a plain value:
//! create one at startup and hand it to whoever needs a detector.

use crate::config::EngineConfig;
use crate::detector::LanguageDetector;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Named registry slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Full detector used for checking documents
    Default,
    /// Lightweight detector for callers that only need a quick guess
    Simple,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Default => write!(f, "default"),
            Slot::Simple => write!(f, "simple"),
        }
    }
}

type Entry = (EngineConfig, Arc<LanguageDetector>);

/// At most one detector per [`Slot`]
#[derive(Debug, Default)]
pub struct DetectorRegistry {
    slots: Mutex<HashMap<Slot, Entry>>,
}

impl DetectorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector for `slot`, built from `config` on first use
    pub fn get_or_create(&self, slot: Slot, config: &EngineConfig) -> Result<Arc<LanguageDetector>> {
        self.get_or_create_with(slot, config, LanguageDetector::from_config)
    }

    /// Like [`get_or_create`](Self::get_or_create) with a custom constructor.
    ///
    /// The constructor runs under the registry lock, so concurrent first
    /// calls for the same slot build exactly one detector. A later call
    /// with a different configuration is rejected.
    pub fn get_or_create_with<F>(
        &self,
        slot: Slot,
        config: &EngineConfig,
        build: F,
    ) -> Result<Arc<LanguageDetector>>
    where
        F: FnOnce(&EngineConfig) -> Result<LanguageDetector>,
    {
        let mut slots = self.lock();
        if let Some((existing, detector)) = slots.get(&slot) {
            if existing != config {
                return Err(EngineError::ConflictingConfiguration { slot });
            }
            return Ok(Arc::clone(detector));
        }

        log::debug!("Creating detector for slot {slot}");
        let detector = Arc::new(build(config)?);
        slots.insert(slot, (config.clone(), Arc::clone(&detector)));
        Ok(detector)
    }

    /// Detector for `slot` if one has been created
    pub fn get(&self, slot: Slot) -> Option<Arc<LanguageDetector>> {
        self.lock().get(&slot).map(|(_, d)| Arc::clone(d))
    }

    /// Forget the detector in `slot`, returning it
    #[cfg(any(test, feature = "test-util"))]
    pub fn reset(&self, slot: Slot) -> Option<Arc<LanguageDetector>> {
        self.lock().remove(&slot).map(|(_, d)| d)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Slot, Entry>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn build_counting(counter: &AtomicUsize) -> impl FnOnce(&EngineConfig) -> Result<LanguageDetector> + '_ {
        move |config| {
            counter.fetch_add(1, Ordering::SeqCst);
            LanguageDetector::from_config(config)
        }
    }

    #[test]
    fn test_same_config_returns_cached_instance() {
        let registry = DetectorRegistry::new();
        let config = EngineConfig::default();

        let first = registry.get_or_create(Slot::Default, &config).unwrap();
        let second = registry.get_or_create(Slot::Default, &config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_slots_are_independent() {
        let registry = DetectorRegistry::new();
        let config = EngineConfig::default();

        let default = registry.get_or_create(Slot::Default, &config).unwrap();
        assert!(registry.get(Slot::Simple).is_none());
        let simple = registry.get_or_create(Slot::Simple, &config).unwrap();
        assert!(!Arc::ptr_eq(&default, &simple));
    }

    #[test]
    fn test_conflicting_configuration() {
        let registry = DetectorRegistry::new();
        registry
            .get_or_create(Slot::Default, &EngineConfig::default())
            .unwrap();

        let other = EngineConfig {
            max_length: 500,
            ..Default::default()
        };
        match registry.get_or_create(Slot::Default, &other) {
            Err(EngineError::ConflictingConfiguration { slot }) => assert_eq!(slot, Slot::Default),
            other => panic!("Expected ConflictingConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_build_leaves_slot_empty() {
        let registry = DetectorRegistry::new();
        let bad = EngineConfig {
            max_length: 3,
            ..Default::default()
        };
        assert!(registry.get_or_create(Slot::Default, &bad).is_err());
        assert!(registry.get(Slot::Default).is_none());
    }

    #[test]
    fn test_reset_allows_new_configuration() {
        let registry = DetectorRegistry::new();
        let first = registry
            .get_or_create(Slot::Default, &EngineConfig::default())
            .unwrap();

        assert!(registry.reset(Slot::Default).is_some());
        let other = EngineConfig {
            max_length: 500,
            ..Default::default()
        };
        let second = registry.get_or_create(Slot::Default, &other).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(registry.reset(Slot::Simple).is_none());
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let registry = DetectorRegistry::new();
        let config = EngineConfig::default();
        let builds = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    registry
                        .get_or_create_with(Slot::Default, &config, build_counting(&builds))
                        .unwrap();
                });
            }
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }
}
