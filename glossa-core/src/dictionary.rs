//! Dictionary-coverage scoring
//!
//! Scores each candidate language by the share of words its speller accepts.
//! Spelling dictionaries live outside this crate; anything implementing
//! [`Speller`] can be plugged in. [`WordListSpeller`] is a plain word-list
//! adapter used by the CLI and tests.

use crate::common_words::parse_word_list;
use crate::error::{CoreError, Result, ScorerError};
use crate::language::LanguageCatalog;
use crate::scorer::LanguageScorer;
use crate::scores::LanguageScores;
use crate::script::{Script, ScriptProfiler};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Counts words a language's spell checker rejects
pub trait Speller: Send + Sync {
    /// Number of `words` not recognized as correctly spelled
    fn count_misspelled(&self, words: &[&str]) -> usize;
}

/// Speller accepting exactly the words of a list (case-insensitive)
#[derive(Debug, Clone, Default)]
pub struct WordListSpeller {
    words: HashSet<String>,
}

impl WordListSpeller {
    /// Build from a word iterator
    pub fn from_words<W: AsRef<str>>(words: impl IntoIterator<Item = W>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Read a one-word-per-line file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::WordListIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            words: parse_word_list(&content),
        })
    }

    /// Number of accepted words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the list is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Speller for WordListSpeller {
    fn count_misspelled(&self, words: &[&str]) -> usize {
        words
            .iter()
            .filter(|w| !self.words.contains(&w.to_lowercase()))
            .count()
    }
}

/// Spellers keyed by language code
pub type SpellerMap = BTreeMap<String, Arc<dyn Speller>>;

/// Load a [`WordListSpeller`] for every `<code>.txt` in `dir`
pub fn load_word_list_spellers(dir: &Path) -> Result<SpellerMap> {
    let entries = fs::read_dir(dir).map_err(|source| CoreError::WordListIo {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut spellers: SpellerMap = BTreeMap::new();
    for entry in entries {
        let path = entry
            .map_err(|source| CoreError::WordListIo {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        if let Some(code) = path.file_stem().and_then(|s| s.to_str()) {
            let speller = WordListSpeller::from_file(&path)?;
            spellers.insert(code.to_string(), Arc::new(speller));
        }
    }
    Ok(spellers)
}

/// Scores languages by `1 - misspelled / total`
#[derive(Clone)]
pub struct DictionaryCoverageScorer {
    spellers: SpellerMap,
    catalog: LanguageCatalog,
    profiler: ScriptProfiler,
}

impl std::fmt::Debug for DictionaryCoverageScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryCoverageScorer")
            .field("languages", &self.spellers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DictionaryCoverageScorer {
    /// Create a scorer over `spellers`
    pub fn new(spellers: SpellerMap, catalog: LanguageCatalog, profiler: ScriptProfiler) -> Self {
        Self {
            spellers,
            catalog,
            profiler,
        }
    }

    /// Languages with a registered speller
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.spellers.keys().map(String::as_str)
    }

    /// Coverage per qualifying language; `{zz: 1.0}` when nothing qualifies
    pub fn coverage(&self, text: &str, additional: &[String]) -> LanguageScores {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return LanguageScores::unknown();
        }

        let dominant = self.profiler.dominant(text);
        let mut scores = LanguageScores::new();
        for (code, speller) in &self.spellers {
            let known = self.catalog.is_supported(code) || additional.contains(code);
            if !known {
                continue;
            }
            let qualifies = if dominant.is_empty() {
                self.catalog
                    .get(code)
                    .is_some_and(|info| info.script == Script::Latin)
            } else {
                dominant.contains(code)
            };
            if !qualifies {
                continue;
            }

            let misspelled = speller.count_misspelled(&words).min(words.len());
            let coverage = 1.0 - misspelled as f64 / words.len() as f64;
            log::trace!("Dictionary coverage {code}: {coverage:.3}");
            scores.insert(code.clone(), coverage);
        }

        if scores.is_empty() {
            LanguageScores::unknown()
        } else {
            scores
        }
    }
}

impl LanguageScorer for DictionaryCoverageScorer {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn score(
        &self,
        text: &str,
        additional: &[String],
    ) -> std::result::Result<LanguageScores, ScorerError> {
        Ok(self.coverage(text, additional))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{builtin_catalog, UNKNOWN};
    use tempfile::TempDir;

    fn scorer() -> DictionaryCoverageScorer {
        let mut spellers: SpellerMap = BTreeMap::new();
        spellers.insert(
            "en".to_string(),
            Arc::new(WordListSpeller::from_words(["this", "is", "a", "house"])),
        );
        spellers.insert(
            "de".to_string(),
            Arc::new(WordListSpeller::from_words(["das", "ist", "ein", "haus"])),
        );
        spellers.insert(
            "ru".to_string(),
            Arc::new(WordListSpeller::from_words(["это", "дом"])),
        );
        DictionaryCoverageScorer::new(
            spellers,
            builtin_catalog().clone(),
            ScriptProfiler::default(),
        )
    }

    #[test]
    fn test_word_list_speller() {
        let speller = WordListSpeller::from_words(["Haus", "ist"]);
        assert_eq!(speller.count_misspelled(&["haus", "IST", "house"]), 1);
    }

    #[test]
    fn test_latin_text_scores_latin_languages() {
        let scores = scorer().coverage("Das ist ein Haus", &[]);
        assert_eq!(scores.get("de"), Some(1.0));
        assert_eq!(scores.get("en"), Some(0.0));
        assert!(!scores.contains("ru"));
        assert_eq!(scores.top().unwrap().0, "de");
    }

    #[test]
    fn test_dominant_script_restricts_languages() {
        let scores = scorer().coverage("это дом", &[]);
        assert_eq!(scores.top(), Some(("ru", 1.0)));
        assert!(!scores.contains("en"));
    }

    #[test]
    fn test_nothing_to_score() {
        assert_eq!(scorer().coverage("   ", &[]).top(), Some((UNKNOWN, 1.0)));
        assert_eq!(scorer().coverage("ΕΛΛΑΔΑ", &[]).top(), Some((UNKNOWN, 1.0)));
    }

    #[test]
    fn test_load_word_list_spellers() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sv.txt"), "och\natt\n").unwrap();
        let spellers = load_word_list_spellers(dir.path()).unwrap();
        assert_eq!(spellers.len(), 1);
        assert_eq!(spellers["sv"].count_misspelled(&["och", "und"]), 1);
    }
}
