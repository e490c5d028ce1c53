//! Script profiling
//!
//! Guesses candidate languages from the Unicode script of a text alone.
//! Scripts that are used by one or a handful of languages (Cyrillic, Greek,
//! Han, ...) are distinctive enough to narrow detection down before any
//! statistical classifier runs.

use serde::{Deserialize, Serialize};

/// Default number of leading characters inspected by the profiler
pub const DEFAULT_MAX_CHECK_CHARS: usize = 50;

/// Writing systems the profiler distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin alphabet (including extended blocks)
    Latin,
    /// Cyrillic
    Cyrillic,
    /// Greek and Greek extended
    Greek,
    /// Arabic
    Arabic,
    /// CJK unified ideographs
    Han,
    /// Hiragana and katakana
    Kana,
    /// Khmer
    Khmer,
    /// Tamil
    Tamil,
    /// Devanagari
    Devanagari,
    /// Thai
    Thai,
    /// Hebrew
    Hebrew,
    /// Hangul syllables and jamo
    Hangul,
}

impl Script {
    /// Classify a single character, `None` for digits, punctuation and
    /// scripts the profiler does not track.
    pub fn of(ch: char) -> Option<Script> {
        let cp = ch as u32;
        let script = match cp {
            0x0041..=0x005A | 0x0061..=0x007A => Script::Latin,
            0x00C0..=0x024F if cp != 0x00D7 && cp != 0x00F7 => Script::Latin,
            0x1E00..=0x1EFF => Script::Latin,
            0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
            0x0400..=0x052F => Script::Cyrillic,
            0x0590..=0x05FF | 0xFB1D..=0xFB4F => Script::Hebrew,
            0x0600..=0x06FF | 0x0750..=0x077F => Script::Arabic,
            0x0900..=0x097F => Script::Devanagari,
            0x0B80..=0x0BFF => Script::Tamil,
            0x0E00..=0x0E7F => Script::Thai,
            0x1100..=0x11FF | 0x3130..=0x318F | 0xAC00..=0xD7AF => Script::Hangul,
            0x1780..=0x17FF => Script::Khmer,
            0x3040..=0x30FF => Script::Kana,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF => Script::Han,
            _ => return None,
        };
        Some(script)
    }

    /// Language codes suggested by a text dominated by this script.
    ///
    /// Latin is shared by too many languages to suggest anything.
    pub fn language_codes(self) -> &'static [&'static str] {
        match self {
            Script::Latin => &[],
            Script::Cyrillic => &["ru", "uk", "be"],
            Script::Greek => &["el"],
            Script::Arabic => &["ar", "fa"],
            Script::Han => &["zh", "ja"],
            Script::Kana => &["ja"],
            Script::Khmer => &["km"],
            Script::Tamil => &["ta"],
            Script::Devanagari => &["hi", "mr"],
            Script::Thai => &["th"],
            Script::Hebrew => &["he"],
            Script::Hangul => &["ko"],
        }
    }
}

/// Result of profiling a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DominantScripts {
    script: Option<Script>,
}

impl DominantScripts {
    /// Script covering more than half of the letters, if any
    pub fn script(&self) -> Option<Script> {
        self.script
    }

    /// Candidate language codes (empty when no distinctive script dominates)
    pub fn codes(&self) -> &'static [&'static str] {
        self.script.map(Script::language_codes).unwrap_or(&[])
    }

    /// True when no candidate codes were derived
    pub fn is_empty(&self) -> bool {
        self.codes().is_empty()
    }

    /// Whether `code` is one of the candidate codes
    pub fn contains(&self, code: &str) -> bool {
        self.codes().contains(&code)
    }

    /// True for scripts none of the configured classifiers can handle:
    /// Thai, Hebrew, Korean and Devanagari (Hindi/Marathi).
    pub fn is_unsupported(&self) -> bool {
        matches!(self.codes(), ["th"] | ["he"] | ["ko"] | ["hi", "mr"])
    }
}

/// Counts letters per script over the head of a text
#[derive(Debug, Clone, Copy)]
pub struct ScriptProfiler {
    max_check_chars: usize,
}

impl Default for ScriptProfiler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHECK_CHARS)
    }
}

impl ScriptProfiler {
    /// Create a profiler inspecting at most `max_check_chars` characters
    pub fn new(max_check_chars: usize) -> Self {
        Self { max_check_chars }
    }

    /// Find the script accounting for the majority of letters
    pub fn dominant(&self, text: &str) -> DominantScripts {
        let mut counts: [usize; 12] = [0; 12];
        let mut letters = 0usize;

        for ch in text.chars().take(self.max_check_chars) {
            if !ch.is_alphabetic() {
                continue;
            }
            letters += 1;
            if let Some(script) = Script::of(ch) {
                counts[script_index(script)] += 1;
            }
        }

        if letters == 0 {
            return DominantScripts::default();
        }

        let script = ALL_SCRIPTS
            .iter()
            .copied()
            .find(|s| counts[script_index(*s)] * 2 > letters);

        log::trace!("dominant script of {letters} letters: {script:?}");
        DominantScripts { script }
    }
}

const ALL_SCRIPTS: [Script; 12] = [
    Script::Latin,
    Script::Cyrillic,
    Script::Greek,
    Script::Arabic,
    Script::Han,
    Script::Kana,
    Script::Khmer,
    Script::Tamil,
    Script::Devanagari,
    Script::Thai,
    Script::Hebrew,
    Script::Hangul,
];

fn script_index(script: Script) -> usize {
    script as usize
}
