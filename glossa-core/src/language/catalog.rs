//! Supported language catalog

use super::code::has_variant;
use crate::error::{CoreError, Result};
use crate::script::Script;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One supported language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Base language code
    pub code: String,
    /// English display name
    pub name: String,
    /// Writing system the language is normally written in
    pub script: Script,
}

/// On-disk shape of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CatalogFile {
    #[serde(rename = "language", default)]
    pub languages: Vec<LanguageInfo>,
}

/// Set of languages the engine is allowed to return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: BTreeMap<String, LanguageInfo>,
}

impl LanguageCatalog {
    /// Build a catalog, rejecting empty, duplicate or variant codes
    pub fn from_languages(languages: impl IntoIterator<Item = LanguageInfo>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for info in languages {
            if info.code.is_empty() {
                return Err(CoreError::Catalog("empty language code".to_string()));
            }
            if has_variant(&info.code) {
                return Err(CoreError::Catalog(format!(
                    "'{}' is not a base language code",
                    info.code
                )));
            }
            if map.contains_key(&info.code) {
                return Err(CoreError::Catalog(format!(
                    "duplicate language code '{}'",
                    info.code
                )));
            }
            map.insert(info.code.clone(), info);
        }

        if map.is_empty() {
            return Err(CoreError::Catalog("catalog lists no languages".to_string()));
        }

        Ok(Self { languages: map })
    }

    /// Parse a catalog from TOML (`[[language]]` tables)
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(toml_str).map_err(|e| CoreError::Catalog(e.to_string()))?;
        Self::from_languages(file.languages)
    }

    /// Narrow the catalog to `codes`; every code must already be present
    pub fn restricted_to<S: AsRef<str>>(&self, codes: &[S]) -> Result<Self> {
        let mut selected = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref();
            let info = self
                .languages
                .get(code)
                .ok_or_else(|| CoreError::Catalog(format!("unknown language code '{code}'")))?;
            selected.push(info.clone());
        }
        Self::from_languages(selected)
    }

    /// Whether the engine may return `code`
    pub fn is_supported(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Look up a language
    pub fn get(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages.get(code)
    }

    /// Supported codes in ascending order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Supported languages in code order
    pub fn iter(&self) -> impl Iterator<Item = &LanguageInfo> {
        self.languages.values()
    }

    /// Number of languages
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
