//! Static morpheme reference tables.
//!
//! Curated prefix/suffix/root tables with meanings and language origins,
//! the academic word list, and the irregular English spelling patterns used
//! by the difficulty scorers. The affix tables are *priority lists*: callers
//! scan them front to back and take the first match, so longer affixes are
//! listed before any affix they start or end with (`under` before `un`,
//! `ious` before `ous`). Iteration order is part of the contract.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common prefixes as `(text, meaning, origin)`, in match-priority order.
pub const COMMON_PREFIXES: &[(&str, &str, &str)] = &[
    ("under", "below", "Germanic"),
    ("un", "not", "Germanic"),
    ("re", "again, back", "Latin"),
    ("pre", "before", "Latin"),
    ("dis", "not, opposite", "Latin"),
    ("mis", "wrongly", "Germanic"),
    ("over", "too much", "Germanic"),
    ("sub", "under", "Latin"),
    ("super", "above", "Latin"),
    ("inter", "between", "Latin"),
    ("trans", "across", "Latin"),
    ("anti", "against", "Greek"),
    ("auto", "self", "Greek"),
    ("bi", "two", "Latin"),
    ("tri", "three", "Latin/Greek"),
    ("multi", "many", "Latin"),
    ("semi", "half", "Latin"),
    ("hypo", "under, below", "Greek"),
    ("hyper", "over, above", "Greek"),
    ("ex", "out, former", "Latin"),
    ("im", "not", "Latin"),
    ("ir", "not", "Latin"),
    ("il", "not", "Latin"),
    ("in", "not, into", "Latin"),
    ("non", "not", "Latin"),
    ("con", "together", "Latin"),
    ("com", "together", "Latin"),
    ("co", "together", "Latin"),
    ("de", "down, from", "Latin"),
    ("pro", "forward, for", "Latin"),
    ("post", "after", "Latin"),
];

/// Common suffixes as `(text, meaning, origin)`, in match-priority order.
pub const COMMON_SUFFIXES: &[(&str, &str, &str)] = &[
    ("tion", "act/state of", "Latin"),
    ("sion", "act/state of", "Latin"),
    ("ment", "act/state of", "Latin"),
    ("ness", "state of being", "Germanic"),
    ("able", "capable of", "Latin"),
    ("ible", "capable of", "Latin"),
    ("ful", "full of", "Germanic"),
    ("less", "without", "Germanic"),
    ("ly", "in manner of", "Germanic"),
    ("ing", "ongoing action", "Germanic"),
    ("er", "one who", "Germanic"),
    ("or", "one who", "Latin"),
    ("ist", "one who", "Greek"),
    ("ism", "belief/practice", "Greek"),
    ("ity", "state of", "Latin"),
    ("ty", "state of", "Latin"),
    ("ious", "full of", "Latin"),
    ("eous", "full of", "Latin"),
    ("ous", "full of", "Latin"),
    ("ial", "relating to", "Latin"),
    ("al", "relating to", "Latin"),
    ("ative", "tending to", "Latin"),
    ("ive", "tending to", "Latin"),
    ("ize", "to make", "Greek"),
    ("ise", "to make", "Greek"),
    ("en", "to make", "Germanic"),
    ("ate", "to make, having", "Latin"),
    ("ify", "to make", "Latin"),
    ("ward", "direction", "Germanic"),
    ("wise", "manner", "Germanic"),
    ("dom", "state, realm", "Germanic"),
    ("ship", "state, skill", "Germanic"),
    ("hood", "state, condition", "Germanic"),
];

/// Common roots as `(text, meaning, origin)`, in match-priority order.
///
/// A partial list; an external text-generation pass supplies richer roots.
pub const COMMON_ROOTS: &[(&str, &str, &str)] = &[
    ("dict", "say, speak", "Latin"),
    ("script", "write", "Latin"),
    ("scrib", "write", "Latin"),
    ("port", "carry", "Latin"),
    ("ject", "throw", "Latin"),
    ("duct", "lead", "Latin"),
    ("struct", "build", "Latin"),
    ("tract", "pull, draw", "Latin"),
    ("spect", "see, look", "Latin"),
    ("spec", "see, look", "Latin"),
    ("vid", "see", "Latin"),
    ("vis", "see", "Latin"),
    ("aud", "hear", "Latin"),
    ("phon", "sound", "Greek"),
    ("graph", "write", "Greek"),
    ("gram", "write, record", "Greek"),
    ("logy", "study of", "Greek"),
    ("log", "word, study", "Greek"),
    ("bio", "life", "Greek"),
    ("geo", "earth", "Greek"),
    ("chron", "time", "Greek"),
    ("tele", "far", "Greek"),
    ("micro", "small", "Greek"),
    ("macro", "large", "Greek"),
    ("morph", "form, shape", "Greek"),
    ("path", "feeling, disease", "Greek"),
    ("phil", "love", "Greek"),
    ("phob", "fear", "Greek"),
    ("psych", "mind", "Greek"),
    ("soph", "wisdom", "Greek"),
    ("theo", "god", "Greek"),
];

/// Academic vocabulary commonly difficult in educational texts.
pub const ACADEMIC_WORDS: &[&str] = &[
    "analyze",
    "approach",
    "area",
    "assess",
    "assume",
    "authority",
    "available",
    "benefit",
    "concept",
    "consist",
    "constitute",
    "context",
    "contract",
    "create",
    "data",
    "define",
    "derive",
    "distribute",
    "economy",
    "environment",
    "establish",
    "estimate",
    "evident",
    "export",
    "factor",
    "finance",
    "formula",
    "function",
    "identify",
    "income",
    "indicate",
    "individual",
    "interpret",
    "involve",
    "issue",
    "labor",
    "legal",
    "legislate",
    "major",
    "method",
    "occur",
    "percent",
    "period",
    "policy",
    "principle",
    "proceed",
    "process",
    "require",
    "research",
    "respond",
    "role",
    "section",
    "sector",
    "significant",
    "similar",
    "source",
    "specific",
    "structure",
    "theory",
    "vary",
    "hypothesis",
    "phenomenon",
    "paradigm",
    "methodology",
    "synthesis",
    "correlation",
    "comprehensive",
    "fundamental",
];

/// Irregular phonetic patterns that make words harder to decode.
pub const IRREGULAR_PATTERNS: &[&str] = &[
    "ough",  // through, though, thought, rough
    "tion",  // nation (sounds like "shun")
    "sion",  // vision, tension
    "ight",  // light, night
    "eigh",  // weigh, neighbor
    "augh",  // caught, daughter
    "ious",  // various, curious
    "eous",  // gorgeous, courageous
    "ible",  // possible, terrible
    "able",  // when pronunciation varies
    "ture",  // nature, creature
    "sure",  // measure, treasure
    "que",   // technique, unique
    "gue",   // dialogue, catalogue
    "ph",    // phone, graph
    "psy",   // psychology
    "pneum", // pneumonia
    "kn",    // know, knife
    "wr",    // write, wrong
    "gn",    // sign, gnaw
    "mb",    // climb, thumb
    "bt",    // doubt, subtle
];

static ACADEMIC_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ACADEMIC_WORDS.iter().copied().collect());

/// Check whether a word is in the academic vocabulary list.
///
/// Matching is case-insensitive.
pub fn is_academic_word(word: &str) -> bool {
    ACADEMIC_WORD_SET.contains(word.to_lowercase().as_str())
}

/// Check whether a word contains any irregular spelling pattern.
///
/// Matching is case-insensitive.
pub fn has_irregular_pattern(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    IRREGULAR_PATTERNS
        .iter()
        .any(|pattern| word_lower.contains(pattern))
}

/// Look up a prefix by text, returning `(meaning, origin)` if known.
pub fn prefix_info(text: &str) -> Option<(&'static str, &'static str)> {
    COMMON_PREFIXES
        .iter()
        .find(|(prefix, _, _)| *prefix == text)
        .map(|(_, meaning, origin)| (*meaning, *origin))
}

/// Look up a suffix by text, returning `(meaning, origin)` if known.
pub fn suffix_info(text: &str) -> Option<(&'static str, &'static str)> {
    COMMON_SUFFIXES
        .iter()
        .find(|(suffix, _, _)| *suffix == text)
        .map(|(_, meaning, origin)| (*meaning, *origin))
}
