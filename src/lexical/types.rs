//! Core data types for the vocabulary map.
//!
//! A [`LexicalMap`] is the per-document aggregate the analyzer produces:
//! unique word entries keyed case-insensitively, difficulty tier buckets
//! assigned at insertion time, and on-demand derivation of root-morpheme
//! families. Consumers (guide, primer, renderers) only read it.
//!
//! # Examples
//!
//! ```
//! use lexibridge::lexical::types::{LexicalMap, WordEntry};
//!
//! let mut map = LexicalMap::new();
//! map.add_word(WordEntry::new("predict").with_root("dict"));
//! map.add_word(WordEntry::new("dictate").with_root("dict"));
//!
//! let families = map.root_families();
//! assert_eq!(families.len(), 1);
//! assert_eq!(families[0].root.text, "dict");
//! assert_eq!(families[0].words.len(), 2);
//! ```

use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Classification of a morpheme within a word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphemeType {
    /// Leading bound morpheme (un-, re-, hypo-).
    Prefix,
    /// The core meaning-carrying part.
    #[default]
    Root,
    /// Trailing bound morpheme (-tion, -ness, -ing).
    Suffix,
}

impl fmt::Display for MorphemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MorphemeType::Prefix => "prefix",
            MorphemeType::Root => "root",
            MorphemeType::Suffix => "suffix",
        };
        write!(f, "{name}")
    }
}

/// Information about a single morpheme (root, prefix, or suffix).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphemeInfo {
    /// The morpheme text (e.g., "dict" for "predict").
    pub text: String,
    /// The meaning of this morpheme; empty when unknown.
    #[serde(default)]
    pub meaning: String,
    /// Language of origin (Latin, Greek, Germanic, ...); empty when unknown.
    #[serde(default)]
    pub origin: String,
    /// Whether this is a prefix, root, or suffix.
    #[serde(default, rename = "type")]
    pub morpheme_type: MorphemeType,
}

impl MorphemeInfo {
    /// Create a morpheme with known meaning and origin.
    pub fn new<S: Into<String>>(text: S, meaning: S, origin: S, morpheme_type: MorphemeType) -> Self {
        MorphemeInfo {
            text: text.into(),
            meaning: meaning.into(),
            origin: origin.into(),
            morpheme_type,
        }
    }

    /// Create a root morpheme with no known meaning.
    pub fn unknown_root<S: Into<String>>(text: S) -> Self {
        MorphemeInfo {
            text: text.into(),
            meaning: String::new(),
            origin: String::new(),
            morpheme_type: MorphemeType::Root,
        }
    }
}

/// One distinct word found in a document.
///
/// The surface form keeps the casing of the first occurrence; map keys are
/// always the lowercased form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The word as it first appears in the text.
    pub word: String,
    /// Best-guess root text; may be empty when analysis found none.
    #[serde(default)]
    pub root: String,
    /// Morphemes in left-to-right order: prefix(es), root, suffix(es).
    #[serde(default)]
    pub morphemes: Vec<MorphemeInfo>,
    /// Syllable breakdown; concatenation reconstructs the word.
    #[serde(default)]
    pub syllables: Vec<String>,
    /// Occurrences across the analyzed document.
    #[serde(default = "default_frequency")]
    pub frequency: u64,
    /// Estimated reading difficulty, 1-10.
    #[serde(default = "default_difficulty")]
    pub difficulty_score: u8,
    /// Index of the first document block containing this word.
    #[serde(default)]
    pub first_occurrence: usize,
}

fn default_frequency() -> u64 {
    1
}

fn default_difficulty() -> u8 {
    5
}

impl WordEntry {
    /// Create an entry for a word with default analysis fields.
    pub fn new<S: Into<String>>(word: S) -> Self {
        WordEntry {
            word: word.into(),
            root: String::new(),
            morphemes: Vec::new(),
            syllables: Vec::new(),
            frequency: 1,
            difficulty_score: 5,
            first_occurrence: 0,
        }
    }

    /// Set the root text.
    pub fn with_root<S: Into<String>>(mut self, root: S) -> Self {
        self.root = root.into();
        self
    }

    /// Set the morpheme breakdown.
    pub fn with_morphemes(mut self, morphemes: Vec<MorphemeInfo>) -> Self {
        self.morphemes = morphemes;
        self
    }

    /// Set the syllable breakdown.
    pub fn with_syllables(mut self, syllables: Vec<String>) -> Self {
        self.syllables = syllables;
        self
    }

    /// Set the difficulty score.
    pub fn with_difficulty(mut self, score: u8) -> Self {
        self.difficulty_score = score;
        self
    }

    /// The word with syllable-dot separators, or the plain word when no
    /// breakdown is available.
    pub fn syllable_text(&self) -> String {
        if self.syllables.is_empty() {
            self.word.clone()
        } else {
            self.syllables.join("\u{b7}")
        }
    }
}

/// A family of words sharing a common root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MorphemeFamily {
    /// The shared root, enriched with meaning/origin when any member knows it.
    pub root: MorphemeInfo,
    /// Member entries; always two or more.
    pub words: Vec<WordEntry>,
}

/// Difficulty tier buckets for map entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    /// Scores 1-3.
    Easy,
    /// Scores 4-6.
    Medium,
    /// Scores 7-10.
    Challenging,
}

impl DifficultyTier {
    /// Bucket a difficulty score.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => DifficultyTier::Easy,
            4..=6 => DifficultyTier::Medium,
            _ => DifficultyTier::Challenging,
        }
    }
}

/// Word keys grouped by difficulty tier, in insertion order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DifficultyTiers {
    /// Keys of easy words (scores 1-3).
    pub easy: Vec<String>,
    /// Keys of medium words (scores 4-6).
    pub medium: Vec<String>,
    /// Keys of challenging words (scores 7-10).
    pub challenging: Vec<String>,
}

impl DifficultyTiers {
    /// The keys in a given tier, in insertion order.
    pub fn tier(&self, tier: DifficultyTier) -> &[String] {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Challenging => &self.challenging,
        }
    }

    fn tier_mut(&mut self, tier: DifficultyTier) -> &mut Vec<String> {
        match tier {
            DifficultyTier::Easy => &mut self.easy,
            DifficultyTier::Medium => &mut self.medium,
            DifficultyTier::Challenging => &mut self.challenging,
        }
    }
}

/// Complete lexical analysis of one document.
///
/// Created once per analysis pass and populated through [`add_word`];
/// afterwards it is read-only. Tier placement happens at first insertion and
/// never moves, even if a later duplicate carries a different score — only
/// `frequency` changes on duplicates.
///
/// [`add_word`]: LexicalMap::add_word
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LexicalMap {
    words: AHashMap<String, WordEntry>,
    /// Lowercased keys in first-insertion order; hash maps do not preserve
    /// it, and family derivation needs a deterministic scan order.
    insertion_order: Vec<String>,
    difficulty_tiers: DifficultyTiers,
    total_unique_words: usize,
}

impl LexicalMap {
    /// Create an empty map.
    pub fn new() -> Self {
        LexicalMap::default()
    }

    /// Add or update a word entry.
    ///
    /// A repeat insert (same lowercased word) only increments the stored
    /// entry's frequency; the incoming analysis fields are ignored.
    pub fn add_word(&mut self, entry: WordEntry) {
        let key = entry.word.to_lowercase();
        if let Some(existing) = self.words.get_mut(&key) {
            existing.frequency += 1;
        } else {
            let tier = DifficultyTier::from_score(entry.difficulty_score);
            self.difficulty_tiers.tier_mut(tier).push(key.clone());
            self.insertion_order.push(key.clone());
            self.words.insert(key, entry);
            self.total_unique_words += 1;
        }
    }

    /// Look up an entry case-insensitively.
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.words.get(&word.to_lowercase())
    }

    /// Check whether a word is tracked.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Iterate entries in first-insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &WordEntry> {
        self.insertion_order
            .iter()
            .filter_map(|key| self.words.get(key))
    }

    /// The difficulty tier buckets.
    pub fn difficulty_tiers(&self) -> &DifficultyTiers {
        &self.difficulty_tiers
    }

    /// Count of distinct words ever inserted.
    pub fn total_unique_words(&self) -> usize {
        self.total_unique_words
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.total_unique_words == 0
    }

    /// Group current words by their normalized root text.
    ///
    /// Only entries with a non-empty root participate, and a root shared by
    /// a single word never forms a family. The family root is enriched with
    /// the first member morpheme matching the root text that carries a
    /// meaning. Families are sorted by descending member count; ties keep
    /// first-encountered-root order. Computed on demand, never cached.
    pub fn root_families(&self) -> Vec<MorphemeFamily> {
        let mut groups: Vec<(String, Vec<&WordEntry>)> = Vec::new();
        let mut index: AHashMap<String, usize> = AHashMap::new();

        for entry in self.entries() {
            if entry.root.is_empty() {
                continue;
            }
            let root_key = entry.root.to_lowercase();
            match index.get(&root_key) {
                Some(&i) => groups[i].1.push(entry),
                None => {
                    index.insert(root_key.clone(), groups.len());
                    groups.push((root_key, vec![entry]));
                }
            }
        }

        let mut families: Vec<MorphemeFamily> = groups
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .map(|(root_text, members)| {
                let mut root = MorphemeInfo::unknown_root(root_text.clone());
                'enrich: for member in &members {
                    for morpheme in &member.morphemes {
                        if morpheme.text.to_lowercase() == root_text && !morpheme.meaning.is_empty()
                        {
                            root.meaning = morpheme.meaning.clone();
                            root.origin = morpheme.origin.clone();
                            break 'enrich;
                        }
                    }
                }
                MorphemeFamily {
                    root,
                    words: members.into_iter().cloned().collect(),
                }
            })
            .collect();

        families.sort_by_key(|family| std::cmp::Reverse(family.words.len()));
        families
    }
}
