//! Scoring strategy abstraction

use crate::error::ScorerError;
use crate::scores::LanguageScores;

/// A strategy that turns text into per-language scores.
///
/// `additional` lists codes that may be scored even when they are not in the
/// supported catalog (typically the codes suggested by the script profiler).
pub trait LanguageScorer: Send + Sync {
    /// Short name used in the detection source trace
    fn name(&self) -> &'static str;

    /// Score `text`
    fn score(
        &self,
        text: &str,
        additional: &[String],
    ) -> std::result::Result<LanguageScores, ScorerError>;
}
