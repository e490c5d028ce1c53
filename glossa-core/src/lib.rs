//! Language identification primitives
//!
//! This crate holds the pure, immutable building blocks of the glossa
//! ensemble detector:
//!
//! - **Text normalization**: strips URLs, e-mail addresses, mentions,
//!   signatures and invisible characters before classification
//! - **Script profiling**: narrows the candidate set from the writing system
//! - **N-gram classification**: naive-Bayes scoring over character 1-3 gram
//!   profiles
//! - **Common words** and **dictionary coverage**: word-level scorers used to
//!   correct or replace the statistical classifier
//!
//! Every component is `Send + Sync` and never changes after construction.
//! Orchestration, process supervision and configuration live in
//! `glossa-engine`.
//!
//! # Example
//!
//! ```rust
//! use glossa_core::language::builtin_catalog;
//! use glossa_core::ngram::{NgramClassifier, NgramProfile};
//!
//! let profiles = vec![
//!     NgramProfile::train("en", "the house is on the hill and the dog is in the house"),
//!     NgramProfile::train("de", "das haus ist auf dem berg und der hund ist im haus"),
//! ];
//! let classifier = NgramClassifier::from_profiles(profiles, builtin_catalog().clone()).unwrap();
//!
//! let scores = classifier.classify("der hund ist im haus", &[]);
//! assert_eq!(scores.top().unwrap().0, "de");
//! ```

#![warn(missing_docs)]

pub mod common_words;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod ngram;
pub mod normalize;
pub mod scorer;
pub mod scores;
pub mod script;

pub use common_words::{split_words, CommonWordCounter, CommonWords};
pub use dictionary::{
    load_word_list_spellers, DictionaryCoverageScorer, Speller, SpellerMap, WordListSpeller,
};
pub use error::{CoreError, Result, ScorerError};
pub use language::{LanguageCatalog, LanguageInfo, UNKNOWN};
pub use ngram::{NgramClassifier, NgramProfile};
pub use normalize::TextNormalizer;
pub use scorer::LanguageScorer;
pub use scores::LanguageScores;
pub use script::{DominantScripts, Script, ScriptProfiler};
