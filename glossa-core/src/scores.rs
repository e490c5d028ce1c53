//! Per-language score maps
//!
//! Scores are non-negative and only meaningful relative to each other within
//! one detection call; they are not required to sum to one.

use crate::language::UNKNOWN;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from base language code to a non-negative score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageScores {
    scores: BTreeMap<String, f64>,
}

impl LanguageScores {
    /// Empty score map
    pub fn new() -> Self {
        Self::default()
    }

    /// `{zz: 1.0}`: nothing could be scored
    pub fn unknown() -> Self {
        let mut scores = Self::new();
        scores.insert(UNKNOWN, 1.0);
        scores
    }

    /// Set the score of `code`; negative and NaN scores are stored as 0
    pub fn insert(&mut self, code: impl Into<String>, score: f64) {
        self.scores.insert(code.into(), sanitize(score));
    }

    /// Add `delta` to the score of `code`, inserting it when absent
    pub fn add(&mut self, code: impl Into<String>, delta: f64) {
        let entry = self.scores.entry(code.into()).or_insert(0.0);
        *entry = sanitize(*entry + delta);
    }

    /// Score of `code`
    pub fn get(&self, code: &str) -> Option<f64> {
        self.scores.get(code).copied()
    }

    /// Whether `code` has a score
    pub fn contains(&self, code: &str) -> bool {
        self.scores.contains_key(code)
    }

    /// Drop `code` from the map
    pub fn remove(&mut self, code: &str) -> Option<f64> {
        self.scores.remove(code)
    }

    /// Keep only the codes for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.scores.retain(|code, _| keep(code));
    }

    /// Highest-scoring entry; ties go to the lexicographically smaller code
    pub fn top(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (code, &score) in &self.scores {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((code.as_str(), score)),
            }
        }
        best
    }

    /// Number of scored languages
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True when nothing is scored
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(code, &score)| (code.as_str(), score))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for LanguageScores {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (code, score) in iter {
            scores.insert(code, score);
        }
        scores
    }
}

fn sanitize(score: f64) -> f64 {
    if score.is_nan() || score < 0.0 {
        0.0
    } else {
        score
    }
}
