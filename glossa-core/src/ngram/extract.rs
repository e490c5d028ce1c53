//! Character n-gram extraction

/// Longest n-gram stored in a profile
pub const MAX_NGRAM: usize = 3;

/// Split text into lower-cased words; anything that is not a letter
/// separates words.
pub fn letter_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// All 1..=3 character n-grams of `text`.
///
/// Each word is padded with one space on both sides so that word-initial
/// and word-final grams are distinct. A bare space is not a gram.
pub fn extract_ngrams(text: &str) -> Vec<String> {
    let mut grams = Vec::new();
    for word in letter_words(text) {
        let mut chars = Vec::with_capacity(word.chars().count() + 2);
        chars.push(' ');
        chars.extend(word.chars());
        chars.push(' ');

        for n in 1..=MAX_NGRAM {
            for window in chars.windows(n) {
                if n == 1 && window[0] == ' ' {
                    continue;
                }
                grams.push(window.iter().collect());
            }
        }
    }
    grams
}

/// Length of a gram in characters
pub(crate) fn gram_len(gram: &str) -> usize {
    gram.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_words() {
        let words: Vec<String> = letter_words("Hello, World! 42 naïve").collect();
        assert_eq!(words, vec!["hello", "world", "naïve"]);
    }

    #[test]
    fn test_extract_single_word() {
        let grams = extract_ngrams("ab");
        assert_eq!(grams, vec!["a", "b", " a", "ab", "b ", " ab", "ab "]);
    }

    #[test]
    fn test_extract_ignores_punctuation_and_digits() {
        assert!(extract_ngrams("123 !!! ...").is_empty());
        assert_eq!(extract_ngrams("a1a"), extract_ngrams("a a"));
    }

    #[test]
    fn test_extract_lowercases() {
        assert_eq!(extract_ngrams("ABC"), extract_ngrams("abc"));
    }

    #[test]
    fn test_extract_multibyte() {
        let grams = extract_ngrams("дом");
        assert!(grams.contains(&"до".to_string()));
        assert!(grams.contains(&" до".to_string()));
        assert!(grams.contains(&"ом ".to_string()));
    }
}
