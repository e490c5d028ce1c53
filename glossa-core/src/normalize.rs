//! Text normalization ahead of language detection
//!
//! Strips the parts of user text that carry no language signal (links,
//! addresses, handles, signatures) and bounds the amount of text that the
//! classifiers have to look at.

use crate::error::{CoreError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Smallest accepted maximum length
pub const MIN_MAX_LENGTH: usize = 10;

/// Maximum lengths below this still work but give poor results
pub const RECOMMENDED_MIN_MAX_LENGTH: usize = 100;

struct Patterns {
    zero_width: Regex,
    url: Regex,
    email: Regex,
    signature: Regex,
    mention: Regex,
    non_breaking_space: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        zero_width: Regex::new(r"[\u{200B}-\u{200D}\u{2060}\u{FEFF}]+").expect("valid regex"),
        url: Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("valid regex"),
        email: Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").expect("valid regex"),
        signature: Regex::new(r"(?s)(?:^|\n)-- \r?\n.*").expect("valid regex"),
        mention: Regex::new(r"@[A-Za-z0-9_]+").expect("valid regex"),
        non_breaking_space: Regex::new(r"[\u{00A0}\u{202F}]").expect("valid regex"),
    })
}

/// Cleans and truncates text before detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextNormalizer {
    max_length: usize,
}

impl TextNormalizer {
    /// Create a normalizer keeping at most `max_length` characters.
    ///
    /// Fails for lengths below [`MIN_MAX_LENGTH`].
    pub fn new(max_length: usize) -> Result<Self> {
        if max_length < MIN_MAX_LENGTH {
            return Err(CoreError::InvalidMaxLength {
                given: max_length,
                min: MIN_MAX_LENGTH,
            });
        }
        if max_length <= RECOMMENDED_MIN_MAX_LENGTH {
            log::warn!(
                "max length {max_length} is very small, values > {RECOMMENDED_MIN_MAX_LENGTH} are recommended"
            );
        }
        Ok(Self { max_length })
    }

    /// Configured maximum length in characters
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Truncate and strip noise from `text`
    pub fn normalize(&self, text: &str) -> String {
        let p = patterns();
        let short = truncate_chars(text, self.max_length);

        let cleaned = p.zero_width.replace_all(short, " ");
        let cleaned = p.url.replace_all(&cleaned, " ");
        let cleaned = p.email.replace_all(&cleaned, " ");
        let cleaned = p.signature.replace_all(&cleaned, "");
        let cleaned = p.mention.replace_all(&cleaned, "");
        let cleaned = p.non_breaking_space.replace_all(&cleaned, " ");

        cleaned.into_owned()
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_pos, _)) => &text[..byte_pos],
        None => text,
    }
}
