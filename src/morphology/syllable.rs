//! Syllable estimation and morphological syllabification.
//!
//! Two distinct operations live here:
//!
//! - [`estimate_syllables`] - a fast vowel-group heuristic used to filter
//!   candidate words during extraction and as the scorer fallback. It only
//!   counts; it does not produce boundaries.
//! - [`split_syllables`] - the morphological syllabifier. Morphology wins
//!   over phonetics: known prefixes are peeled off the front, one known
//!   suffix is reserved at the back, and only the remaining middle is split
//!   by vowel-group (VCV/VCCV) rules.
//!
//! Concatenating the result of [`split_syllables`] reconstructs the
//! lowercased input exactly; no characters are dropped or invented.
//!
//! # Examples
//!
//! ```
//! use lexibridge::morphology::syllable::{estimate_syllables, split_syllables};
//!
//! assert_eq!(split_syllables("react"), vec!["re", "act"]);
//! assert_eq!(split_syllables("unhappy"), vec!["un", "happy"]);
//! assert_eq!(estimate_syllables("philosophy"), 4);
//! ```

use crate::morphology::tables::{COMMON_PREFIXES, COMMON_SUFFIXES};

/// Vowels for syllable purposes, `y` included.
fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimate the syllable count of a word using vowel groups.
///
/// Counts transitions into a vowel group, subtracts one for a trailing
/// silent `e`, and adds one back for consonant-`le` endings (bottle,
/// simple). A heuristic, not a dictionary lookup; always at least 1.
pub fn estimate_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0usize;
    let mut prev_vowel = false;

    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    // Silent e
    if word.ends_with('e') && count > 1 {
        count -= 1;
    }

    // Consonant-le endings keep their own syllable
    if word.ends_with("le") && word.len() > 2 {
        let chars: Vec<char> = word.chars().collect();
        if !is_vowel(chars[chars.len() - 3]) {
            count += 1;
        }
    }

    count.max(1)
}

/// Split a word into syllable-like units, preferring morpheme boundaries.
///
/// Known prefixes are emitted as leading syllables (peeled repeatedly while
/// the rest stays long enough to be a word), then the first matching suffix
/// in table-priority order is reserved as the final syllable, and the middle
/// is split phonetically. A word with no recognized affixes falls through to
/// the pure phonetic split. The affix guards require the string to be longer
/// than `affix_len + 2` before stripping, so short words are never reduced
/// to an affix plus residue.
///
/// Returns lowercase, non-empty syllables; empty input yields an empty list.
pub fn split_syllables(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    if word.is_empty() {
        return Vec::new();
    }

    let mut syllables: Vec<String> = Vec::new();
    let mut rest = word;

    // Peel known prefixes off the front.
    'peel: loop {
        for (prefix, _, _) in COMMON_PREFIXES {
            if rest.starts_with(prefix) && rest.len() > prefix.len() + 2 {
                syllables.push((*prefix).to_string());
                rest = rest.split_off(prefix.len());
                continue 'peel;
            }
        }
        break;
    }

    // Reserve at most one suffix for the tail; first table match wins.
    let mut tail: Option<&'static str> = None;
    for (suffix, _, _) in COMMON_SUFFIXES {
        if rest.ends_with(suffix) && rest.len() > suffix.len() + 2 {
            rest.truncate(rest.len() - suffix.len());
            tail = Some(*suffix);
            break;
        }
    }

    syllables.extend(phonetic_split(&rest));
    if let Some(suffix) = tail {
        syllables.push(suffix.to_string());
    }

    syllables
}

/// Pure vowel-group splitting of a (sub)word.
///
/// Scans left to right; after a vowel, a VCCV pattern breaks between the two
/// consonants and a VCV pattern breaks before the single consonant. A
/// trailing fragment shorter than three characters is merged into the
/// preceding syllable unless it is a recognized short ending (`ed`, `er`,
/// `ly`).
fn phonetic_split(word: &str) -> Vec<String> {
    if word.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = word.chars().collect();
    let mut syllables: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut i = 0;
    while i < chars.len() {
        current.push(chars[i]);

        if is_vowel(chars[i]) && i + 1 < chars.len() {
            let next = chars[i + 1];
            if !is_vowel(next) {
                if i + 2 < chars.len() && !is_vowel(chars[i + 2]) {
                    // VCCV: break between the consonants (hap-py)
                    current.push(next);
                    syllables.push(std::mem::take(&mut current));
                    i += 1;
                } else {
                    // VCV: break before the consonant (o-pen)
                    syllables.push(std::mem::take(&mut current));
                }
            }
        }

        i += 1;
    }

    if !current.is_empty() {
        match syllables.last_mut() {
            Some(last) if current.len() <= 2 && !matches!(current.as_str(), "ed" | "er" | "ly") => {
                last.push_str(&current);
            }
            _ => syllables.push(current),
        }
    }

    if syllables.is_empty() {
        vec![word.to_string()]
    } else {
        syllables
    }
}
