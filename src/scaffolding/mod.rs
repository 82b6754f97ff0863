//! Adaptive scaffolding: per-word exposure tracking and support fading.
//!
//! A [`ScaffoldingContext`] is the reader's "memory" for one document. Fed
//! each chunk of source text in reading order, it accumulates how often
//! every trackable word has been seen. Once a word crosses the exposure
//! threshold it is considered mastered, and later passes should render it
//! without formatting support — the context emits the instruction block
//! listing those words for the external transformation prompt.
//!
//! The context is a single-owner, strictly sequential structure: one
//! context per document, [`update_exposure`](ScaffoldingContext::update_exposure)
//! called exactly once per chunk in order, no synchronization provided.
//!
//! # Examples
//!
//! ```
//! use lexibridge::scaffolding::{FadingProfile, ScaffoldingContext};
//!
//! let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 2);
//! context.update_exposure("philosophy philosophy scientist");
//!
//! assert!(context.is_mastered("philosophy"));
//! assert!(!context.is_mastered("scientist"));
//! assert_eq!(context.stats().total_exposures, 3);
//! ```

use std::sync::LazyLock;

use ahash::{AHashMap, AHashSet};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Only track words with at least this many characters.
const MIN_TRACKED_WORD_LEN: usize = 4;

/// Cap on how many mastered words the exclusion prompt lists.
const EXCLUSION_PROMPT_LIMIT: usize = 50;

/// Formatting markers stripped before word extraction: syllable dots,
/// emphasis asterisks, brackets, and parentheses.
static MARKER_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{b7}*\[\]()]").expect("marker pattern should be valid"));

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern should be valid"));

/// How aggressively to fade scaffolding support.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadingProfile {
    /// No fading - same support throughout.
    Static,
    /// Slow fading - 5 exposures before fade.
    Gentle,
    /// Standard fading - 3 exposures before fade.
    #[default]
    Adaptive,
    /// Fast fading - 2 exposures before fade.
    Aggressive,
}

impl FadingProfile {
    /// The default exposure threshold for this profile.
    ///
    /// `Static` never fades; its threshold is `u64::MAX`, unreachable by any
    /// realistic exposure count.
    pub fn default_threshold(&self) -> u64 {
        match self {
            FadingProfile::Static => u64::MAX,
            FadingProfile::Gentle => 5,
            FadingProfile::Adaptive => 3,
            FadingProfile::Aggressive => 2,
        }
    }

    /// The profile's lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            FadingProfile::Static => "static",
            FadingProfile::Gentle => "gentle",
            FadingProfile::Adaptive => "adaptive",
            FadingProfile::Aggressive => "aggressive",
        }
    }
}

/// Exposure data for a single tracked word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordExposure {
    /// The tracked word, lowercased.
    pub word: String,
    /// Cumulative occurrences across all chunks.
    pub count: u64,
    /// Chunk index of the first sighting.
    pub first_chunk: usize,
    /// Chunk index of the most recent sighting.
    pub last_chunk: usize,
    /// Times the word was actually shown with formatting.
    pub formatted_count: u64,
}

/// Snapshot of a context's state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldingStats {
    /// The active fading profile.
    pub profile: FadingProfile,
    /// The exposure threshold in effect.
    pub threshold: u64,
    /// Distinct words tracked so far.
    pub total_unique_words: usize,
    /// Words at or past the threshold.
    pub mastered_words: usize,
    /// Sum of all exposure counts.
    pub total_exposures: u64,
    /// Chunks processed so far.
    pub chunks_processed: usize,
    /// `mastered_words / total_unique_words`, 0 when nothing is tracked.
    pub mastery_rate: f64,
}

/// Tracks word exposure and decides which formatting support to fade.
#[derive(Clone, Debug)]
pub struct ScaffoldingContext {
    profile: FadingProfile,
    threshold: u64,
    word_exposures: AHashMap<String, WordExposure>,
    /// Tracked words in first-seen order; tie-break for the exclusion
    /// prompt, which hash-map iteration cannot provide deterministically.
    insertion_order: Vec<String>,
    current_chunk: usize,
}

impl Default for ScaffoldingContext {
    fn default() -> Self {
        ScaffoldingContext::new(FadingProfile::default())
    }
}

impl ScaffoldingContext {
    /// Create a context with the profile's default threshold.
    pub fn new(profile: FadingProfile) -> Self {
        ScaffoldingContext {
            profile,
            threshold: profile.default_threshold(),
            word_exposures: AHashMap::new(),
            insertion_order: Vec::new(),
            current_chunk: 0,
        }
    }

    /// Create a context with an explicit exposure threshold.
    pub fn with_threshold(profile: FadingProfile, threshold: u64) -> Self {
        ScaffoldingContext {
            threshold,
            ..ScaffoldingContext::new(profile)
        }
    }

    /// The active fading profile.
    pub fn profile(&self) -> FadingProfile {
        self.profile
    }

    /// The exposure threshold in effect.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Index of the next chunk to be processed.
    pub fn current_chunk(&self) -> usize {
        self.current_chunk
    }

    /// Extract trackable words from text.
    ///
    /// Formatting markers (syllable dots, asterisks, brackets, parentheses)
    /// are replaced with spaces, alphabetic runs are extracted, and only
    /// words of four or more characters survive, lowercased.
    pub fn extract_words(&self, text: &str) -> Vec<String> {
        let clean = MARKER_CHARS.replace_all(text, " ");
        WORD_PATTERN
            .find_iter(&clean)
            .filter(|m| m.as_str().len() >= MIN_TRACKED_WORD_LEN)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Record the words of one chunk and advance the chunk counter.
    ///
    /// Must be called exactly once per chunk, in document order; the
    /// context offers no reordering protection. Overlapping chunk text
    /// simply adds to the counts. Empty or unqualifying text is a no-op
    /// apart from the counter advance.
    pub fn update_exposure(&mut self, text: &str) {
        // Multiset of this chunk's words, in first-occurrence order.
        let mut counts: Vec<(String, u64)> = Vec::new();
        let mut index: AHashMap<String, usize> = AHashMap::new();
        for word in self.extract_words(text) {
            match index.get(&word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(word.clone(), counts.len());
                    counts.push((word, 1));
                }
            }
        }

        for (word, count) in counts {
            match self.word_exposures.get_mut(&word) {
                Some(exposure) => {
                    exposure.count += count;
                    exposure.last_chunk = self.current_chunk;
                }
                None => {
                    self.insertion_order.push(word.clone());
                    self.word_exposures.insert(
                        word.clone(),
                        WordExposure {
                            word,
                            count,
                            first_chunk: self.current_chunk,
                            last_chunk: self.current_chunk,
                            formatted_count: 0,
                        },
                    );
                }
            }
        }

        self.current_chunk += 1;
    }

    /// Check if a word has been seen enough times to be mastered.
    ///
    /// Exact threshold equality counts as mastery. Unknown words are never
    /// mastered. Case-insensitive.
    pub fn is_mastered(&self, word: &str) -> bool {
        self.word_exposures
            .get(&word.to_lowercase())
            .is_some_and(|exposure| exposure.count >= self.threshold)
    }

    /// The number of times a word has been seen, 0 if never.
    pub fn exposure_count(&self, word: &str) -> u64 {
        self.word_exposures
            .get(&word.to_lowercase())
            .map_or(0, |exposure| exposure.count)
    }

    /// Exposure data for a word, if tracked.
    pub fn exposure(&self, word: &str) -> Option<&WordExposure> {
        self.word_exposures.get(&word.to_lowercase())
    }

    /// Record that a word was shown with formatting support.
    pub fn mark_formatted(&mut self, word: &str) {
        if let Some(exposure) = self.word_exposures.get_mut(&word.to_lowercase()) {
            exposure.formatted_count += 1;
        }
    }

    /// Words whose formatting support should be withdrawn.
    ///
    /// Always empty under the `Static` profile, regardless of counts.
    pub fn faded_words(&self) -> AHashSet<String> {
        if self.profile == FadingProfile::Static {
            return AHashSet::new();
        }

        self.word_exposures
            .values()
            .filter(|exposure| exposure.count >= self.threshold)
            .map(|exposure| exposure.word.clone())
            .collect()
    }

    /// Build the prompt fragment instructing the transformer to leave
    /// mastered words unformatted.
    ///
    /// Empty when nothing has faded. Lists at most the 50 most-seen faded
    /// words, sorted by descending count with ties in first-seen order.
    pub fn format_exclusion_prompt(&self) -> String {
        let faded = self.faded_words();
        if faded.is_empty() {
            return String::new();
        }

        let mut ranked: Vec<&WordExposure> = self
            .insertion_order
            .iter()
            .filter(|word| faded.contains(*word))
            .filter_map(|word| self.word_exposures.get(word))
            .collect();
        ranked.sort_by_key(|exposure| std::cmp::Reverse(exposure.count));

        let word_list = ranked
            .iter()
            .take(EXCLUSION_PROMPT_LIMIT)
            .map(|exposure| exposure.word.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "\n\n## MASTERED WORDS (Do NOT format these - write them normally):\n\
             The reader has seen these words multiple times and should decode them independently.\n\
             Do NOT apply syllable dots, bold roots, or other formatting to: {word_list}\n"
        )
    }

    /// Snapshot the current scaffolding state.
    pub fn stats(&self) -> ScaffoldingStats {
        let total_unique_words = self.word_exposures.len();
        let mastered_words = self.faded_words().len();
        let total_exposures = self.word_exposures.values().map(|e| e.count).sum();

        ScaffoldingStats {
            profile: self.profile,
            threshold: self.threshold,
            total_unique_words,
            mastered_words,
            total_exposures,
            chunks_processed: self.current_chunk,
            mastery_rate: if total_unique_words > 0 {
                mastered_words as f64 / total_unique_words as f64
            } else {
                0.0
            },
        }
    }

    /// Clear all exposure data for reuse on a new document.
    pub fn reset(&mut self) {
        self.word_exposures.clear();
        self.insertion_order.clear();
        self.current_chunk = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_default_thresholds() {
        assert_eq!(FadingProfile::Static.default_threshold(), u64::MAX);
        assert_eq!(FadingProfile::Gentle.default_threshold(), 5);
        assert_eq!(FadingProfile::Adaptive.default_threshold(), 3);
        assert_eq!(FadingProfile::Aggressive.default_threshold(), 2);
    }

    #[test]
    fn test_default_context() {
        let context = ScaffoldingContext::default();
        assert_eq!(context.profile(), FadingProfile::Adaptive);
        assert_eq!(context.threshold(), 3);
        assert_eq!(context.current_chunk(), 0);
    }

    #[test]
    fn test_custom_threshold() {
        let context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 7);
        assert_eq!(context.threshold(), 7);
    }

    #[test]
    fn test_extract_words_filters_short_words() {
        let context = ScaffoldingContext::default();
        let words = context.extract_words("The scientists hypothesized.");
        assert!(words.contains(&"scientists".to_string()));
        assert!(words.contains(&"hypothesized".to_string()));
        assert!(!words.contains(&"the".to_string()));
    }

    #[test]
    fn test_extract_words_strips_formatting_markers() {
        let context = ScaffoldingContext::default();
        let words = context.extract_words("**bolding** *italics* (aside)");
        assert!(words.contains(&"bolding".to_string()));
        assert!(words.contains(&"italics".to_string()));
        assert!(words.contains(&"aside".to_string()));
    }

    #[test]
    fn test_extract_words_decoder_check_markers() {
        let context = ScaffoldingContext::default();
        let words = context.extract_words("[Decoder Check: philosophy?] (hypothesis)");
        assert!(words.contains(&"philosophy".to_string()));
        assert!(words.contains(&"hypothesis".to_string()));
        assert!(words.contains(&"decoder".to_string()));
    }

    #[test]
    fn test_update_exposure_counts_and_chunks() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("philosophy philosophy philosophy");
        assert_eq!(context.exposure_count("philosophy"), 3);
        assert_eq!(context.current_chunk(), 1);

        context.update_exposure("second chunk text");
        assert_eq!(context.current_chunk(), 2);
    }

    #[test]
    fn test_case_insensitive_tracking() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("Philosophy PHILOSOPHY philosophy");
        assert_eq!(context.exposure_count("philosophy"), 3);
        assert_eq!(context.exposure_count("PHILOSOPHY"), 3);
    }

    #[test]
    fn test_threshold_boundary() {
        let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 3);
        context.update_exposure("philosophy philosophy");
        assert!(!context.is_mastered("philosophy"));

        context.update_exposure("philosophy");
        assert!(context.is_mastered("philosophy"));
    }

    #[test]
    fn test_unknown_word_never_mastered() {
        let context = ScaffoldingContext::default();
        assert!(!context.is_mastered("unknown"));
    }

    #[test]
    fn test_static_profile_never_fades() {
        let mut context = ScaffoldingContext::new(FadingProfile::Static);
        context.update_exposure("word word word word word");
        assert!(context.faded_words().is_empty());
    }

    #[test]
    fn test_aggressive_profile_fades_quickly() {
        let mut context = ScaffoldingContext::new(FadingProfile::Aggressive);
        assert_eq!(context.threshold(), 2);
        context.update_exposure("philosophy philosophy");
        assert!(context.is_mastered("philosophy"));
    }

    #[test]
    fn test_faded_words_returns_mastered_only() {
        let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 2);
        context.update_exposure("philosophy philosophy scientist");
        let faded = context.faded_words();
        assert!(faded.contains("philosophy"));
        assert!(!faded.contains("scientist"));
    }

    #[test]
    fn test_mastery_is_monotonic() {
        let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 2);
        context.update_exposure("philosophy philosophy");
        assert!(context.is_mastered("philosophy"));

        // Further chunks never un-master a word.
        context.update_exposure("completely unrelated content");
        context.update_exposure("philosophy");
        assert!(context.is_mastered("philosophy"));
    }

    #[test]
    fn test_mark_formatted() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("philosophy");
        context.mark_formatted("Philosophy");
        assert_eq!(context.exposure("philosophy").unwrap().formatted_count, 1);
    }

    #[test]
    fn test_first_and_last_chunk_tracked() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("philosophy in chunk zero");
        let exposure = context.exposure("philosophy").unwrap();
        assert_eq!((exposure.first_chunk, exposure.last_chunk), (0, 0));

        context.update_exposure("some other text");
        context.update_exposure("philosophy again in chunk two");
        let exposure = context.exposure("philosophy").unwrap();
        assert_eq!((exposure.first_chunk, exposure.last_chunk), (0, 2));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("philosophy philosophy philosophy");
        context.reset();
        assert_eq!(context.exposure_count("philosophy"), 0);
        assert_eq!(context.current_chunk(), 0);
        assert_eq!(context.stats().total_unique_words, 0);
    }

    #[test]
    fn test_stats() {
        let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 2);
        context.update_exposure("philosophy philosophy science");
        let stats = context.stats();

        assert_eq!(stats.profile, FadingProfile::Adaptive);
        assert_eq!(stats.threshold, 2);
        assert_eq!(stats.total_unique_words, 2);
        assert_eq!(stats.mastered_words, 1);
        assert_eq!(stats.total_exposures, 3);
        assert_eq!(stats.chunks_processed, 1);
        assert!((stats.mastery_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty_context_has_zero_rate() {
        let context = ScaffoldingContext::default();
        assert_eq!(context.stats().mastery_rate, 0.0);
    }

    #[test]
    fn test_empty_text_is_noop() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("");
        assert_eq!(context.stats().total_unique_words, 0);
        // The chunk counter still advances; a chunk was processed.
        assert_eq!(context.current_chunk(), 1);
    }

    #[test]
    fn test_short_words_ignored() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("the cat sat on a mat");
        assert_eq!(context.stats().total_unique_words, 0);
    }

    #[test]
    fn test_exclusion_prompt_empty_without_mastery() {
        let mut context = ScaffoldingContext::default();
        context.update_exposure("philosophy");
        assert_eq!(context.format_exclusion_prompt(), "");
    }

    #[test]
    fn test_exclusion_prompt_lists_mastered_words() {
        let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 2);
        context.update_exposure("philosophy philosophy hypothesis hypothesis");
        let prompt = context.format_exclusion_prompt();

        assert!(prompt.contains("MASTERED WORDS"));
        assert!(prompt.contains("philosophy"));
        assert!(prompt.contains("hypothesis"));
    }

    #[test]
    fn test_exclusion_prompt_orders_by_count_then_first_seen() {
        let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 1);
        context.update_exposure("alpha beta beta gamma");
        let prompt = context.format_exclusion_prompt();

        let list = prompt.rsplit(": ").next().unwrap().trim();
        assert_eq!(list, "beta, alpha, gamma");
    }

    #[test]
    fn test_exclusion_prompt_limits_to_fifty_words() {
        let mut context = ScaffoldingContext::with_threshold(FadingProfile::Adaptive, 1);
        let alpha = "abcdefghijklmnopqrstuvwxyz".as_bytes();
        let words: Vec<String> = (0..100)
            .map(|i| {
                format!(
                    "test{}{}{}{}",
                    alpha[i % 26] as char,
                    alpha[(i + 5) % 26] as char,
                    alpha[(i + 10) % 26] as char,
                    alpha[(i + 15) % 26] as char,
                )
            })
            .collect();
        context.update_exposure(&words.join(" "));

        let prompt = context.format_exclusion_prompt();
        let list = prompt.rsplit(": ").next().unwrap().trim();
        assert_eq!(list.split(", ").count(), 50);
    }
}
