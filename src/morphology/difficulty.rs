//! Word difficulty scoring.
//!
//! Two deliberately separate formulas live here and are allowed to disagree:
//!
//! - [`score_word`] drives pre-reading primer selection. It weighs syllable
//!   count, length, irregular spelling patterns, academic-vocabulary
//!   membership, and morpheme complexity from a base of 1.
//! - [`score_entry`] drives general lexical mapping. It starts from a
//!   neutral base of 5 and adjusts for length, morpheme count, classical
//!   origins, and morphemes with no known meaning.
//!
//! Both are pure functions of their inputs and clamp to the 1..=10 scale.
//! Merging them would silently change which words the primer picks versus
//! how the vocabulary map tiers words, so they stay distinct.

use crate::lexical::types::{MorphemeInfo, WordEntry};
use crate::morphology::syllable::estimate_syllables;
use crate::morphology::tables::{has_irregular_pattern, is_academic_word};

/// Score a word's reading difficulty on a 1-10 scale for primer selection.
///
/// When a [`WordEntry`] is supplied, its syllable breakdown and morphemes
/// refine the score; otherwise the vowel-group heuristic estimates the
/// syllable count and morpheme factors are skipped.
pub fn score_word(word: &str, entry: Option<&WordEntry>) -> u8 {
    let mut score = 1.0f64;

    // Syllable count factor
    let syllable_count = match entry {
        Some(entry) => entry.syllables.len(),
        None => estimate_syllables(word),
    };
    if syllable_count >= 4 {
        score += 3.0;
    } else if syllable_count >= 3 {
        score += 2.0;
    } else if syllable_count >= 2 {
        score += 1.0;
    }

    // Length factor
    let length = word.chars().count();
    if length > 10 {
        score += 1.5;
    } else if length > 7 {
        score += 0.5;
    }

    // Irregular phonetics, counted once no matter how many patterns match
    if has_irregular_pattern(word) {
        score += 1.5;
    }

    // Academic vocabulary factor
    if is_academic_word(word) {
        score += 2.0;
    }

    // Morpheme complexity, when analysis is available
    if let Some(entry) = entry
        && !entry.morphemes.is_empty()
    {
        if entry.morphemes.len() >= 3 {
            score += 1.0;
        }
        for morpheme in &entry.morphemes {
            if morpheme.origin == "Greek" || morpheme.origin == "Latin" {
                score += 0.3;
            }
        }
    }

    clamp_score(score)
}

/// Score a word's difficulty on a 1-10 scale for general lexical mapping.
///
/// Used when building the vocabulary map without a dedicated difficulty
/// analysis pass. Distinct from [`score_word`] by design.
pub fn score_entry(word: &str, morphemes: &[MorphemeInfo]) -> u8 {
    let mut difficulty = 5.0f64;

    // Length factor
    let length = word.chars().count();
    if length > 10 {
        difficulty += 1.0;
    }
    if length > 14 {
        difficulty += 1.0;
    }

    // Morpheme complexity
    if morphemes.len() > 3 {
        difficulty += 1.0;
    }

    // Classical origins tend to be harder
    for morpheme in morphemes {
        if morpheme.origin == "Greek" {
            difficulty += 0.5;
        } else if morpheme.origin == "Latin" {
            difficulty += 0.3;
        }
    }

    // Morphemes with no known meaning are harder
    let unknown = morphemes.iter().filter(|m| m.meaning.is_empty()).count();
    difficulty += unknown as f64 * 0.5;

    clamp_score(difficulty)
}

fn clamp_score(score: f64) -> u8 {
    (score.floor() as i64).clamp(1, 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::types::{MorphemeInfo, MorphemeType};

    fn morpheme(text: &str, meaning: &str, origin: &str, kind: MorphemeType) -> MorphemeInfo {
        MorphemeInfo {
            text: text.to_string(),
            meaning: meaning.to_string(),
            origin: origin.to_string(),
            morpheme_type: kind,
        }
    }

    #[test]
    fn test_score_word_simple_word_is_easy() {
        assert!(score_word("cat", None) <= 3);
        assert!(score_word("dog", None) <= 3);
    }

    #[test]
    fn test_score_word_long_word_is_hard() {
        assert!(score_word("incomprehensibility", None) >= 5);
    }

    #[test]
    fn test_score_word_academic_bonus() {
        let plain = score_word("terrace", None);
        let academic = score_word("analyze", None);
        assert!(academic > plain);
    }

    #[test]
    fn test_score_word_irregular_pattern_counted_once() {
        // "knight" matches both "kn" and "ight"; the irregular bonus applies
        // a single time: 1 base + 0 (one syllable) + 0 (short) + 1.5 = 2.
        assert_eq!(score_word("knight", None), 2);
    }

    #[test]
    fn test_score_word_uses_entry_syllables() {
        let entry = WordEntry {
            word: "hypothesis".to_string(),
            root: "soph".to_string(),
            morphemes: vec![
                morpheme("hypo", "under, below", "Greek", MorphemeType::Prefix),
                morpheme("thesis", "a placing", "Greek", MorphemeType::Root),
            ],
            syllables: vec![
                "hy".to_string(),
                "po".to_string(),
                "the".to_string(),
                "sis".to_string(),
            ],
            frequency: 1,
            difficulty_score: 5,
            first_occurrence: 0,
        };

        // 1 base + 3 (4 syllables) + 0.5 (len 10 > 7) + 2 (academic)
        // + 0.6 (two Greek morphemes) = 7.1 -> 7
        assert_eq!(score_word("hypothesis", Some(&entry)), 7);
    }

    #[test]
    fn test_score_word_clamped_to_scale() {
        let score = score_word("incomprehensibility", None);
        assert!((1..=10).contains(&score));
        assert_eq!(score_word("a", None), 1);
    }

    #[test]
    fn test_score_entry_base_is_medium() {
        assert_eq!(score_entry("happy", &[]), 5);
    }

    #[test]
    fn test_score_entry_length_factors() {
        assert_eq!(score_entry("understanding", &[]), 6);
        assert_eq!(score_entry("incomprehensibility", &[]), 7);
    }

    #[test]
    fn test_score_entry_unknown_morphemes() {
        let morphemes = vec![
            morpheme("zyx", "", "", MorphemeType::Root),
            morpheme("ment", "act/state of", "Latin", MorphemeType::Suffix),
        ];
        // 5 base + 0.3 Latin + 0.5 unknown = 5.8 -> 5
        assert_eq!(score_entry("zyxment", &morphemes), 5);
    }

    #[test]
    fn test_scorers_may_disagree() {
        // The primer scorer rates a short common word 1; the mapping scorer
        // starts at 5. The divergence is intentional.
        assert_ne!(score_word("cat", None), score_entry("cat", &[]));
    }
}
