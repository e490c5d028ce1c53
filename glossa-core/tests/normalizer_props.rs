//! Property tests for text normalization

use glossa_core::TextNormalizer;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_output_never_exceeds_max_length(text in "\\PC{0,400}", max in 10usize..200) {
        let normalizer = TextNormalizer::new(max).unwrap();
        prop_assert!(normalizer.normalize(&text).chars().count() <= max);
    }

    #[test]
    fn prop_invisible_characters_removed(
        parts in proptest::collection::vec("[a-z]{1,8}", 1..10),
        sep in prop::sample::select(vec!['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}', '\u{00A0}', '\u{202F}']),
    ) {
        let text = parts.join(&sep.to_string());
        let cleaned = TextNormalizer::new(1000).unwrap().normalize(&text);
        prop_assert!(!cleaned.contains(sep));
        prop_assert_eq!(cleaned.split(' ').count(), parts.len());
    }

    #[test]
    fn prop_normalize_is_deterministic(text in "\\PC{0,200}") {
        let normalizer = TextNormalizer::new(100).unwrap();
        prop_assert_eq!(normalizer.normalize(&text), normalizer.normalize(&text));
    }
}
