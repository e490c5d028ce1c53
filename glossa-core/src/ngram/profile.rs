//! N-gram frequency profiles
//!
//! The on-disk format is the JSON layout used by langdetect profile
//! directories: one document per language with the language name, the raw
//! count of every 1-3 character gram and the total number of grams of each
//! length.

use super::extract::{extract_ngrams, gram_len, MAX_NGRAM};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Character n-gram counts for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramProfile {
    /// Language code, possibly with a variant suffix (`zh-cn`)
    pub name: String,
    /// Count of each gram
    pub freq: BTreeMap<String, u64>,
    /// Total number of 1-, 2- and 3-grams seen
    pub n_words: [u64; MAX_NGRAM],
}

impl NgramProfile {
    /// Empty profile for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            freq: BTreeMap::new(),
            n_words: [0; MAX_NGRAM],
        }
    }

    /// Build a profile from a training corpus
    pub fn train(name: impl Into<String>, corpus: &str) -> Self {
        let mut profile = Self::new(name);
        profile.add_text(corpus);
        profile
    }

    /// Count the grams of `text` into this profile
    pub fn add_text(&mut self, text: &str) {
        for gram in extract_ngrams(text) {
            let len = gram_len(&gram);
            self.n_words[len - 1] += 1;
            *self.freq.entry(gram).or_insert(0) += 1;
        }
    }

    /// Drop grams seen fewer than `min_count` times.
    ///
    /// Totals are left untouched so relative frequencies stay comparable
    /// with the unpruned profile.
    pub fn prune(&mut self, min_count: u64) {
        self.freq.retain(|_, count| *count >= min_count);
    }

    /// Whether the profile has counted anything
    pub fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    /// Check that every gram is 1 to 3 characters long
    pub fn check_grams(&self) -> std::result::Result<(), String> {
        match self
            .freq
            .keys()
            .find(|gram| !(1..=MAX_NGRAM).contains(&gram_len(gram)))
        {
            Some(gram) => Err(format!(
                "gram '{gram}' of profile '{}' must have 1 to {MAX_NGRAM} characters",
                self.name
            )),
            None => Ok(()),
        }
    }

    /// Read a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::ProfileIo {
            path: path.to_path_buf(),
            source,
        })?;
        let profile: Self =
            serde_json::from_str(&content).map_err(|e| CoreError::ProfileFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if profile.name.trim().is_empty() {
            return Err(CoreError::ProfileFormat {
                path: path.to_path_buf(),
                reason: "profile has an empty name".to_string(),
            });
        }
        profile
            .check_grams()
            .map_err(|reason| CoreError::ProfileFormat {
                path: path.to_path_buf(),
                reason,
            })?;
        Ok(profile)
    }

    /// Write the profile as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self).map_err(|e| CoreError::ProfileFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(|source| CoreError::ProfileIo {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load every profile in a directory.
///
/// Files with a `.json` extension or no extension at all are treated as
/// profiles; anything else is skipped. Profiles are returned in file name
/// order.
pub fn load_profile_dir(dir: &Path) -> Result<Vec<NgramProfile>> {
    let entries = fs::read_dir(dir).map_err(|source| CoreError::ProfileIo {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CoreError::ProfileIo {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match path.extension().and_then(|e| e.to_str()) {
            None | Some("json") => paths.push(path),
            Some(_) => log::trace!("Skipping non-profile file {}", path.display()),
        }
    }
    paths.sort();

    let profiles = paths
        .iter()
        .map(|path| NgramProfile::load(path))
        .collect::<Result<Vec<_>>>()?;

    if profiles.is_empty() {
        return Err(CoreError::NoProfiles(dir.to_path_buf()));
    }
    log::debug!("Loaded {} n-gram profiles from {}", profiles.len(), dir.display());
    Ok(profiles)
}
