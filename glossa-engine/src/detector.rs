//! Ensemble language detector and builder
//!
//! [`LanguageDetector`] runs the arbitration pipeline: normalize, profile
//! the script, score with the best available primary strategy, then apply
//! the common-word correction and the caller's bias lists before mapping
//! the winner onto the supported catalog.

use crate::config::{EngineConfig, DEFAULT_MAX_LENGTH, DEFAULT_MAX_RESTARTS};
use crate::error::{EngineError, Result};
use crate::process::{FastTextSpawner, ProcessSpawner};
use crate::request::DetectionRequest;
use crate::result::{DetectionResult, SourceTrace};
use crate::supervisor::{external_confidence, ClassifierHealth, ExternalClassifier};
use glossa_core::language::{base_code, builtin_catalog, has_variant, normalize_bias_code};
use glossa_core::script::DEFAULT_MAX_CHECK_CHARS;
use glossa_core::{
    load_word_list_spellers, CommonWordCounter, CommonWords, DictionaryCoverageScorer,
    LanguageCatalog, LanguageScorer, LanguageScores, NgramClassifier, NgramProfile, Speller,
    SpellerMap, ScriptProfiler, TextNormalizer, UNKNOWN,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Texts shorter than this (in characters) are treated as short
pub const SHORT_TEXT_CHARS: usize = 50;

/// Top scores below this trigger the common-word correction
pub const LOW_CONFIDENCE: f64 = 0.85;

/// Confidence reported when falling back to the first preferred language
pub const PREFERRED_FALLBACK_CONFIDENCE: f64 = 0.1;

/// Preferred languages that disable script-based candidate expansion
const SCRIPT_AWARE_CODES: [&str; 6] = ["ru", "uk", "be", "zh", "hi", "mr"];

/// Ensemble language detector.
///
/// Shared between threads behind an `Arc`; only the external classifier
/// holds mutable state.
pub struct LanguageDetector {
    normalizer: TextNormalizer,
    profiler: ScriptProfiler,
    catalog: LanguageCatalog,
    ngram: Option<NgramClassifier>,
    dictionary: DictionaryCoverageScorer,
    external: Option<ExternalClassifier>,
    common_words: Option<Arc<dyn CommonWordCounter>>,
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector")
            .field("max_length", &self.normalizer.max_length())
            .field("languages", &self.catalog.len())
            .field("ngram", &self.ngram.is_some())
            .field("external", &self.external)
            .field("common_words", &self.common_words.is_some())
            .finish()
    }
}

/// Bias lists after parsing
struct Bias {
    noop: Vec<String>,
    preferred: Vec<String>,
    additional: Vec<String>,
}

impl LanguageDetector {
    /// Start building a detector
    pub fn builder() -> LanguageDetectorBuilder {
        LanguageDetectorBuilder::new()
    }

    /// Build a detector from a configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::builder()
            .max_length(config.max_length)
            .script_check_chars(config.script_check_chars)
            .catalog(config.load_catalog()?);

        if let Some(dir) = &config.ngram.profiles {
            builder = builder.ngram_profile_dir(dir.clone());
        }
        if let Some(dir) = &config.common_words.directory {
            builder = builder.common_words(Arc::new(CommonWords::from_dir(dir)?));
        }
        if let Some(dir) = &config.dictionary.word_lists {
            builder = builder.spellers(load_word_list_spellers(dir)?);
        }
        if let Some(external) = &config.external {
            builder = builder.external_spawner(
                FastTextSpawner::new(&external.binary, &external.model, external.top_k),
                external.max_restarts,
            );
        }

        builder.build()
    }

    /// Supported languages
    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// Health of the external classifier, `None` when not configured
    pub fn external_health(&self) -> Option<ClassifierHealth> {
        self.external.as_ref().map(ExternalClassifier::health)
    }

    /// Restarts of the external classifier so far, `None` when not configured
    pub fn external_restart_count(&self) -> Option<u32> {
        self.external.as_ref().map(ExternalClassifier::restart_count)
    }

    /// Whether an n-gram classifier is loaded
    pub fn has_ngram(&self) -> bool {
        self.ngram.is_some()
    }

    /// Normalized form of `text` as seen by the classifiers
    pub fn clean_text(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Detect with empty bias lists and return only the code
    pub fn detect_text(&self, text: &str) -> Option<String> {
        match self.detect(&DetectionRequest::new(text)) {
            Ok(result) => result.language,
            Err(e) => {
                log::debug!("Detection failed: {e}");
                None
            }
        }
    }

    /// Run the full arbitration pipeline.
    ///
    /// Only malformed bias lists produce an error; classifier failures are
    /// absorbed by falling back to the in-process scorers.
    pub fn detect(&self, request: &DetectionRequest) -> Result<DetectionResult> {
        let text = self.normalizer.normalize(&request.text);
        let text_chars = text.chars().count();
        let dominant = self.profiler.dominant(&text);

        if dominant.is_unsupported() {
            log::debug!("Unsupported script {:?}", dominant.script());
            return Ok(DetectionResult::unsupported_script());
        }

        let bias = self.parse_bias(request, dominant.codes())?;
        let mut trace = SourceTrace::new();
        let (mut scores, from_external) =
            self.primary_scores(&text, text_chars, &bias.additional, &mut trace);
        log::trace!("Primary scores: {scores:?}");

        if self.apply_common_words(&text, &bias.additional, &mut scores) {
            trace.push("commonwords");
        }

        if bias.preferred.iter().any(|c| c == "no") && !bias.preferred.iter().any(|c| c == "da") {
            scores.remove("da");
        }

        if request.limit_to_preferred && !bias.preferred.is_empty() {
            scores.retain(|code| bias.preferred.iter().any(|p| p == code));
            trace.push("prefLangOnly");
        }

        if text_chars < SHORT_TEXT_CHARS && !bias.preferred.is_empty() {
            scores.retain(|code| bias.preferred.iter().any(|p| p == code));
            trace.push("prefLang");
        }

        let top = scores.top().map(|(code, score)| (code.to_string(), score));
        let confidence = match &top {
            Some(_) if from_external => external_confidence(text_chars),
            Some((_, score)) => score.clamp(0.0, 1.0),
            None => 0.0,
        };

        let result = self.finalize(top, confidence, &bias, trace);
        log::debug!("Detected {result}");
        Ok(result)
    }

    fn parse_bias(&self, request: &DetectionRequest, dominant: &[&str]) -> Result<Bias> {
        let mut noop: Vec<String> = Vec::new();
        for code in &request.noop_languages {
            let code = normalize_bias_code(code);
            if !code.is_empty() && !noop.contains(&code) {
                noop.push(code);
            }
        }

        let mut preferred: Vec<String> = Vec::new();
        for code in &request.preferred_languages {
            let code = normalize_bias_code(code);
            if has_variant(&code) {
                return Err(EngineError::InvalidArgument(format!(
                    "preferred language '{code}' must not have a region or script subtag"
                )));
            }
            if !code.is_empty() && !preferred.contains(&code) {
                preferred.push(code);
            }
        }

        let mut additional = noop.clone();
        let script_aware = preferred
            .iter()
            .any(|c| SCRIPT_AWARE_CODES.contains(&c.as_str()));
        if !script_aware {
            for code in dominant {
                if !additional.iter().any(|c| c == code) {
                    additional.push(code.to_string());
                }
                if !preferred.iter().any(|c| c == code) {
                    preferred.push(code.to_string());
                }
            }
        }

        Ok(Bias {
            noop,
            preferred,
            additional,
        })
    }

    fn primary_scores(
        &self,
        text: &str,
        text_chars: usize,
        additional: &[String],
        trace: &mut SourceTrace,
    ) -> (LanguageScores, bool) {
        // disabled classifiers stay selected; their calls are traced as fallbacks
        let external = self
            .external
            .as_ref()
            .filter(|_| text_chars > SHORT_TEXT_CHARS || self.ngram.is_none());

        match external {
            Some(ext) => {
                trace.push(ext.name());
                match ext.score(text, additional) {
                    Ok(scores) => (scores, true),
                    Err(e) => {
                        log::debug!("External classifier unavailable ({e}), falling back");
                        trace.push("fallback");
                        (self.local_scores(text, additional, trace), false)
                    }
                }
            }
            None => (self.local_scores(text, additional, trace), false),
        }
    }

    fn local_scores(
        &self,
        text: &str,
        additional: &[String],
        trace: &mut SourceTrace,
    ) -> LanguageScores {
        let scorer: &dyn LanguageScorer = match &self.ngram {
            Some(ngram) => ngram,
            None => &self.dictionary,
        };
        trace.push(scorer.name());
        scorer.score(text, additional).unwrap_or_else(|e| {
            log::warn!("{} scorer failed: {e}", scorer.name());
            LanguageScores::unknown()
        })
    }

    /// Add common-word counts when the primary result is weak
    fn apply_common_words(
        &self,
        text: &str,
        additional: &[String],
        scores: &mut LanguageScores,
    ) -> bool {
        let Some(counter) = &self.common_words else {
            return false;
        };
        let weak = match scores.top() {
            Some((code, score)) => code == UNKNOWN || score < LOW_CONFIDENCE,
            None => true,
        };
        if !weak {
            return false;
        }

        let mut seen = HashSet::new();
        let mut applied = false;
        for (code, count) in counter.known_words_per_language(text) {
            let base = base_code(&code);
            if !seen.insert(base.clone()) {
                continue;
            }
            if !self.catalog.is_supported(&base) && !additional.contains(&base) {
                log::trace!("Ignoring common words for unsupported {base}");
                continue;
            }
            log::trace!("Common words {base}: {count}");
            scores.add(base, count as f64);
            applied = true;
        }
        applied
    }

    fn finalize(
        &self,
        top: Option<(String, f64)>,
        confidence: f64,
        bias: &Bias,
        mut trace: SourceTrace,
    ) -> DetectionResult {
        if let Some((code, _)) = &top {
            if self.catalog.is_supported(code) {
                return DetectionResult {
                    language: Some(code.clone()),
                    confidence,
                    source: trace.to_string(),
                    noop: false,
                };
            }
            if bias.additional.contains(code) {
                return DetectionResult {
                    language: Some(code.clone()),
                    confidence,
                    source: trace.to_string(),
                    noop: true,
                };
            }
        }

        match bias.preferred.first() {
            Some(first) if self.catalog.is_supported(first) => {
                trace.push("fallbackToPrefLang");
                DetectionResult {
                    language: Some(first.clone()),
                    confidence: PREFERRED_FALLBACK_CONFIDENCE,
                    source: trace.to_string(),
                    noop: false,
                }
            }
            _ => DetectionResult {
                language: None,
                confidence: 0.0,
                source: trace.to_string(),
                noop: false,
            },
        }
    }
}

enum NgramSource {
    Profiles(Vec<NgramProfile>),
    Directory(PathBuf),
    Classifier(NgramClassifier),
}

struct ExternalSource {
    spawner: Box<dyn ProcessSpawner>,
    max_restarts: u32,
}

/// Builder for [`LanguageDetector`]
pub struct LanguageDetectorBuilder {
    max_length: usize,
    script_check_chars: usize,
    catalog: Option<LanguageCatalog>,
    ngram: Option<NgramSource>,
    external: Option<ExternalSource>,
    common_words: Option<Arc<dyn CommonWordCounter>>,
    spellers: SpellerMap,
}

impl Default for LanguageDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetectorBuilder {
    /// Builder with default limits and no strategies beyond dictionary coverage
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            script_check_chars: DEFAULT_MAX_CHECK_CHARS,
            catalog: None,
            ngram: None,
            external: None,
            common_words: None,
            spellers: SpellerMap::new(),
        }
    }

    /// Maximum number of characters inspected (at least 10)
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Characters examined by the script profiler
    pub fn script_check_chars(mut self, chars: usize) -> Self {
        self.script_check_chars = chars;
        self
    }

    /// Supported catalog; defaults to the embedded one
    pub fn catalog(mut self, catalog: LanguageCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use in-memory n-gram profiles
    pub fn ngram_profiles(mut self, profiles: Vec<NgramProfile>) -> Self {
        self.ngram = Some(NgramSource::Profiles(profiles));
        self
    }

    /// Load n-gram profiles from a directory at build time
    pub fn ngram_profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ngram = Some(NgramSource::Directory(dir.into()));
        self
    }

    /// Use an already constructed classifier
    pub fn ngram_classifier(mut self, classifier: NgramClassifier) -> Self {
        self.ngram = Some(NgramSource::Classifier(classifier));
        self
    }

    /// Supervise an external classifier created by `spawner`
    pub fn external_spawner(
        mut self,
        spawner: impl ProcessSpawner + 'static,
        max_restarts: u32,
    ) -> Self {
        self.external = Some(ExternalSource {
            spawner: Box::new(spawner),
            max_restarts,
        });
        self
    }

    /// fastText binary and model with default `top_k` and restart bound
    pub fn fasttext(self, binary: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        self.external_spawner(
            FastTextSpawner::new(binary, model, crate::config::DEFAULT_TOP_K),
            DEFAULT_MAX_RESTARTS,
        )
    }

    /// Common-word lists for low-confidence correction
    pub fn common_words(mut self, counter: Arc<dyn CommonWordCounter>) -> Self {
        self.common_words = Some(counter);
        self
    }

    /// Register a speller for dictionary coverage
    pub fn speller(mut self, code: impl Into<String>, speller: Arc<dyn Speller>) -> Self {
        self.spellers.insert(code.into(), speller);
        self
    }

    /// Register several spellers
    pub fn spellers(mut self, spellers: SpellerMap) -> Self {
        self.spellers.extend(spellers);
        self
    }

    /// Construct the detector, loading profiles and starting the external
    /// classifier
    pub fn build(self) -> Result<LanguageDetector> {
        let normalizer =
            TextNormalizer::new(self.max_length).map_err(|e| EngineError::Config(e.to_string()))?;
        if self.script_check_chars == 0 {
            return Err(EngineError::Config(
                "script_check_chars must be positive".to_string(),
            ));
        }
        let profiler = ScriptProfiler::new(self.script_check_chars);
        let catalog = self
            .catalog
            .unwrap_or_else(|| builtin_catalog().clone());

        let ngram = match self.ngram {
            Some(NgramSource::Profiles(profiles)) => {
                Some(NgramClassifier::from_profiles(profiles, catalog.clone())?)
            }
            Some(NgramSource::Directory(dir)) => {
                Some(NgramClassifier::from_dir(&dir, catalog.clone())?)
            }
            Some(NgramSource::Classifier(classifier)) => Some(classifier),
            None => None,
        };

        let external = match self.external {
            Some(source) => {
                let classifier =
                    ExternalClassifier::new(source.spawner, source.max_restarts, catalog.clone())
                        .map_err(|e| {
                        EngineError::Config(format!("failed to start external classifier: {e}"))
                    })?;
                Some(classifier)
            }
            None => None,
        };

        let dictionary = DictionaryCoverageScorer::new(self.spellers, catalog.clone(), profiler);

        log::info!(
            "Language detector ready: {} languages, ngram={}, external={}, common_words={}",
            catalog.len(),
            ngram.is_some(),
            external.is_some(),
            self.common_words.is_some()
        );

        Ok(LanguageDetector {
            normalizer,
            profiler,
            catalog,
            ngram,
            dictionary,
            external,
            common_words: self.common_words,
        })
    }
}
