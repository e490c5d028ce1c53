//! Naive-Bayes classifier over character n-gram profiles

use super::extract::{extract_ngrams, gram_len, MAX_NGRAM};
use super::profile::{load_profile_dir, NgramProfile};
use crate::error::{CoreError, Result, ScorerError};
use crate::language::{base_code, LanguageCatalog};
use crate::scorer::LanguageScorer;
use crate::scores::LanguageScores;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Log probabilities precomputed from one profile
#[derive(Debug, Clone)]
struct ScoringTable {
    code: String,
    log_probs: HashMap<String, f64>,
    unseen: [f64; MAX_NGRAM],
}

impl ScoringTable {
    fn from_profile(profile: &NgramProfile) -> Self {
        let mut vocab = [0u64; MAX_NGRAM];
        for gram in profile.freq.keys() {
            vocab[gram_len(gram) - 1] += 1;
        }

        // add-one smoothing per gram length
        let denom: Vec<f64> = (0..MAX_NGRAM)
            .map(|i| (profile.n_words[i] + vocab[i] + 1) as f64)
            .collect();

        let log_probs = profile
            .freq
            .iter()
            .map(|(gram, &count)| {
                let d = denom[gram_len(gram) - 1];
                (gram.clone(), ((count + 1) as f64 / d).ln())
            })
            .collect();

        let mut unseen = [0.0; MAX_NGRAM];
        for (slot, d) in unseen.iter_mut().zip(&denom) {
            *slot = (1.0 / d).ln();
        }

        Self {
            code: base_code(&profile.name),
            log_probs,
            unseen,
        }
    }

    fn log_prob(&self, gram: &str) -> f64 {
        self.log_probs
            .get(gram)
            .copied()
            .unwrap_or_else(|| self.unseen[gram_len(gram) - 1])
    }

    fn knows(&self, gram: &str) -> bool {
        self.log_probs.contains_key(gram)
    }
}

/// Statistical language classifier.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct NgramClassifier {
    tables: Vec<ScoringTable>,
    catalog: LanguageCatalog,
}

impl NgramClassifier {
    /// Build a classifier from in-memory profiles
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = NgramProfile>,
        catalog: LanguageCatalog,
    ) -> Result<Self> {
        let mut tables = Vec::new();
        for profile in profiles.into_iter().filter(|p| !p.is_empty()) {
            profile
                .check_grams()
                .map_err(|reason| CoreError::ProfileFormat {
                    path: PathBuf::from(&profile.name),
                    reason,
                })?;
            tables.push(ScoringTable::from_profile(&profile));
        }

        if tables.is_empty() {
            return Err(CoreError::NoProfiles(Default::default()));
        }
        Ok(Self { tables, catalog })
    }

    /// Load every profile in `dir`
    pub fn from_dir(dir: &Path, catalog: LanguageCatalog) -> Result<Self> {
        let profiles = load_profile_dir(dir)?;
        Self::from_profiles(profiles, catalog).map_err(|e| match e {
            CoreError::NoProfiles(_) => CoreError::NoProfiles(dir.to_path_buf()),
            other => other,
        })
    }

    /// Base codes of the loaded profiles, deduplicated and sorted
    pub fn profile_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.tables.iter().map(|t| t.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// Posterior probability per base code; `{zz: 1.0}` when nothing usable
    pub fn classify(&self, text: &str, additional: &[String]) -> LanguageScores {
        let candidates: Vec<&ScoringTable> = self
            .tables
            .iter()
            .filter(|t| self.catalog.is_supported(&t.code) || additional.contains(&t.code))
            .collect();
        if candidates.is_empty() {
            log::trace!("No n-gram profile is eligible for this call");
            return LanguageScores::unknown();
        }

        let grams: Vec<String> = extract_ngrams(text)
            .into_iter()
            .filter(|g| candidates.iter().any(|t| t.knows(g)))
            .collect();
        if grams.is_empty() {
            log::trace!("No known n-grams in text");
            return LanguageScores::unknown();
        }

        let log_likelihoods: Vec<f64> = candidates
            .iter()
            .map(|t| grams.iter().map(|g| t.log_prob(g)).sum())
            .collect();

        let max = log_likelihoods
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = log_likelihoods.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = weights.iter().sum();

        let mut posteriors: BTreeMap<&str, f64> = BTreeMap::new();
        for (table, weight) in candidates.iter().zip(&weights) {
            *posteriors.entry(table.code.as_str()).or_insert(0.0) += weight / total;
        }

        posteriors.into_iter().collect()
    }
}

impl LanguageScorer for NgramClassifier {
    fn name(&self) -> &'static str {
        "ngram"
    }

    fn score(
        &self,
        text: &str,
        additional: &[String],
    ) -> std::result::Result<LanguageScores, ScorerError> {
        Ok(self.classify(text, additional))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{LanguageInfo, UNKNOWN};
    use crate::script::Script;

    fn catalog(codes: &[&str]) -> LanguageCatalog {
        LanguageCatalog::from_languages(codes.iter().map(|c| LanguageInfo {
            code: c.to_string(),
            name: c.to_string(),
            script: Script::Latin,
        }))
        .unwrap()
    }

    fn classifier() -> NgramClassifier {
        let profiles = vec![
            NgramProfile::train("en", "the cat and the dog with the hat in the house"),
            NgramProfile::train("de", "der hund und die katze mit dem hut im haus"),
        ];
        NgramClassifier::from_profiles(profiles, catalog(&["de", "en"])).unwrap()
    }

    #[test]
    fn test_classify_prefers_matching_profile() {
        let scores = classifier().classify("the hat and the cat", &[]);
        assert_eq!(scores.top().unwrap().0, "en");

        let scores = classifier().classify("die katze und der hund", &[]);
        assert_eq!(scores.top().unwrap().0, "de");
    }

    #[test]
    fn test_posteriors_sum_to_one() {
        let scores = classifier().classify("the house", &[]);
        let sum: f64 = scores.iter().map(|(_, s)| s).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_letters_is_unknown() {
        let scores = classifier().classify("1234 !!", &[]);
        assert_eq!(scores.top(), Some((UNKNOWN, 1.0)));
        assert_eq!(classifier().classify("", &[]).top(), Some((UNKNOWN, 1.0)));
    }

    #[test]
    fn test_unsupported_profiles_are_ignored_unless_additional() {
        let profiles = vec![
            NgramProfile::train("en", "the cat and the dog"),
            NgramProfile::train("ru", "кот и собака в доме"),
        ];
        let classifier = NgramClassifier::from_profiles(profiles, catalog(&["en"])).unwrap();

        let scores = classifier.classify("собака", &[]);
        assert!(!scores.contains("ru"));

        let scores = classifier.classify("собака", &["ru".to_string()]);
        assert_eq!(scores.top().unwrap().0, "ru");
    }

    #[test]
    fn test_variants_collapse_to_base_code() {
        let profiles = vec![
            NgramProfile::train("zh-cn", "我们的国家"),
            NgramProfile::train("zh-tw", "我們的國家"),
            NgramProfile::train("en", "the cat"),
        ];
        let classifier =
            NgramClassifier::from_profiles(profiles, catalog(&["en", "zh"])).unwrap();

        let scores = classifier.classify("我们的", &[]);
        assert_eq!(scores.top().unwrap().0, "zh");
        assert!(!scores.iter().any(|(code, _)| code.contains('-')));
        assert_eq!(classifier.profile_codes(), vec!["en", "zh"]);
    }

    #[test]
    fn test_empty_profiles_rejected() {
        let result = NgramClassifier::from_profiles(vec![NgramProfile::new("en")], catalog(&["en"]));
        assert!(matches!(result, Err(CoreError::NoProfiles(_))));
    }

    #[test]
    fn test_out_of_range_gram_is_format_error() {
        let mut profile = NgramProfile::new("en");
        profile.freq.insert("abcd".to_string(), 3);
        profile.n_words = [3, 0, 0];

        match NgramClassifier::from_profiles(vec![profile], catalog(&["en"])) {
            Err(CoreError::ProfileFormat { path, reason }) => {
                assert_eq!(path, PathBuf::from("en"));
                assert!(reason.contains("abcd"));
            }
            other => panic!("Expected ProfileFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_scorer_name() {
        assert_eq!(classifier().name(), "ngram");
    }
}
