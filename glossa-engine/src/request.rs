//! Detection requests

use serde::{Deserialize, Serialize};

/// One detection call: the text plus the caller's bias lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRequest {
    /// Raw text
    pub text: String,

    /// Codes for which the caller wants a do-nothing answer instead of
    /// "unknown" (languages it recognizes but does not check)
    #[serde(default)]
    pub noop_languages: Vec<String>,

    /// Languages the user is known to write in; base codes only
    #[serde(default)]
    pub preferred_languages: Vec<String>,

    /// Restrict the answer to the preferred languages whatever the length
    #[serde(default)]
    pub limit_to_preferred: bool,
}

impl DetectionRequest {
    /// Request without bias lists
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the noop languages
    pub fn with_noop_languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.noop_languages = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preferred languages
    pub fn with_preferred_languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_languages = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Only return preferred languages
    pub fn limit_to_preferred(mut self, limit: bool) -> Self {
        self.limit_to_preferred = limit;
        self
    }
}
