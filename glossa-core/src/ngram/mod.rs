//! Character n-gram language profiles and the statistical classifier

pub mod classifier;
pub mod extract;
pub mod profile;

pub use classifier::NgramClassifier;
pub use extract::{extract_ngrams, letter_words, MAX_NGRAM};
pub use profile::{load_profile_dir, NgramProfile};
