//! Engine configuration
//!
//! Loaded from TOML. Every section is optional; a missing section disables
//! the strategy it configures. Relative paths in a file are resolved
//! against the directory holding that file.

use crate::error::{EngineError, Result};
use glossa_core::language::{builtin_catalog, has_variant, load_catalog};
use glossa_core::normalize::MIN_MAX_LENGTH;
use glossa_core::script::DEFAULT_MAX_CHECK_CHARS;
use glossa_core::LanguageCatalog;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default maximum number of characters inspected per request
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// Default number of labels requested from the external classifier
pub const DEFAULT_TOP_K: usize = 5;

/// Default number of restarts before the external classifier is disabled
pub const DEFAULT_MAX_RESTARTS: u32 = 10;

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Characters kept after truncation
    pub max_length: usize,

    /// Characters inspected by the script profiler
    pub script_check_chars: usize,

    /// Custom catalog file; the embedded catalog is used when absent
    pub catalog: Option<PathBuf>,

    /// Narrow the catalog to these codes (empty keeps every language)
    pub supported: Vec<String>,

    /// N-gram classifier settings
    pub ngram: NgramSection,

    /// Common-word correction settings
    pub common_words: CommonWordsSection,

    /// Dictionary-coverage scorer settings
    pub dictionary: DictionarySection,

    /// External classifier process, disabled when absent
    pub external: Option<ExternalSection>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            script_check_chars: DEFAULT_MAX_CHECK_CHARS,
            catalog: None,
            supported: Vec::new(),
            ngram: NgramSection::default(),
            common_words: CommonWordsSection::default(),
            dictionary: DictionarySection::default(),
            external: None,
        }
    }
}

/// `[ngram]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NgramSection {
    /// Directory of JSON profiles
    pub profiles: Option<PathBuf>,
}

/// `[common_words]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonWordsSection {
    /// Directory of `<code>.txt` word lists
    pub directory: Option<PathBuf>,
}

/// `[dictionary]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySection {
    /// Directory of `<code>.txt` word lists used as spellers
    pub word_lists: Option<PathBuf>,
}

/// `[external]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSection {
    /// fastText-compatible executable
    pub binary: PathBuf,

    /// Model file passed to `predict-prob`
    pub model: PathBuf,

    /// Number of labels requested per line
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Restarts allowed before the classifier is disabled
    #[serde(default = "default_max_restarts")]
    pub max_restarts: u32,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_max_restarts() -> u32 {
    DEFAULT_MAX_RESTARTS
}

impl ExternalSection {
    /// External classifier with default `top_k` and restart bound
    pub fn new(binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            model: model.into(),
            top_k: DEFAULT_TOP_K,
            max_restarts: DEFAULT_MAX_RESTARTS,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| EngineError::Config(format!("failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, resolving relative paths against its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        log::debug!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("failed to serialize configuration: {e}")))
    }

    /// Check values that TOML parsing cannot
    pub fn validate(&self) -> Result<()> {
        if self.max_length < MIN_MAX_LENGTH {
            return Err(EngineError::Config(format!(
                "max_length must be >= {MIN_MAX_LENGTH}, got {}",
                self.max_length
            )));
        }
        if self.script_check_chars == 0 {
            return Err(EngineError::Config(
                "script_check_chars must be positive".to_string(),
            ));
        }
        if let Some(code) = self.supported.iter().find(|c| has_variant(c)) {
            return Err(EngineError::Config(format!(
                "supported language '{code}' must be a base code"
            )));
        }
        if let Some(external) = &self.external {
            if external.top_k == 0 {
                return Err(EngineError::Config(
                    "external.top_k must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Resolve the supported catalog: custom or embedded, then narrowed
    pub fn load_catalog(&self) -> Result<LanguageCatalog> {
        let catalog = match &self.catalog {
            Some(path) => load_catalog(path)?,
            None => builtin_catalog().clone(),
        };
        if self.supported.is_empty() {
            Ok(catalog)
        } else {
            Ok(catalog.restricted_to(&self.supported)?)
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(p) = self.catalog.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.ngram.profiles.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.common_words.directory.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.dictionary.word_lists.as_mut() {
            resolve(p);
        }
        if let Some(external) = self.external.as_mut() {
            resolve(&mut external.model);
            // bare executable names are looked up on PATH
            if external.binary.components().count() > 1 {
                resolve(&mut external.binary);
            }
        }
    }
}
