//! Vocabulary extraction and analysis over whole documents.
//!
//! The [`LexicalAnalyzer`] extracts multisyllabic candidate words from a
//! document, decomposes each into morphemes - locally against the static
//! tables, or through an external [`TextGenerator`] for deeper breakdowns -
//! and assembles the per-document [`LexicalMap`].
//!
//! Generation failures never surface here: any call error or unparseable
//! response silently degrades the whole batch to local analysis. Partial,
//! lower-fidelity vocabulary data is preferred over a failed document
//! transformation.
//!
//! # Examples
//!
//! ```
//! use lexibridge::lexical::analyzer::{LexicalAnalyzer, LexicalAnalyzerConfig};
//!
//! let analyzer = LexicalAnalyzer::new(LexicalAnalyzerConfig::default());
//! let words = analyzer.extract_words("The scientists hypothesized about philosophy.");
//!
//! assert_eq!(words, vec!["scientists", "hypothesized", "about", "philosophy"]);
//! ```

use std::sync::{Arc, LazyLock};

use ahash::AHashSet;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::FormattedDocument;
use crate::lexical::types::{LexicalMap, MorphemeInfo, MorphemeType, WordEntry};
use crate::llm::prompts::ANALYSIS_PROMPT;
use crate::llm::{TextGenerator, parse_word_analyses};
use crate::morphology::difficulty::score_entry;
use crate::morphology::syllable::{estimate_syllables, split_syllables};
use crate::morphology::tables::{COMMON_PREFIXES, COMMON_ROOTS, COMMON_SUFFIXES};

static EMPHASIS_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*+").expect("emphasis pattern should be valid"));

static SYLLABLE_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{b7}").expect("dot pattern should be valid"));

static DECODER_CHECKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Decoder Check:.*?\]").expect("check pattern should be valid"));

static CANDIDATE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z']+").expect("candidate pattern should be valid"));

/// Configuration for [`LexicalAnalyzer`], injected at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LexicalAnalyzerConfig {
    /// Minimum estimated syllables for a word to be analyzed.
    pub min_syllables: usize,
    /// Maximum words sent to the generator in one batch.
    pub max_batch_size: usize,
    /// Whether to use the generator when one is attached.
    pub use_generator: bool,
}

impl Default for LexicalAnalyzerConfig {
    fn default() -> Self {
        Self {
            min_syllables: 2,
            max_batch_size: 50,
            use_generator: true,
        }
    }
}

/// Analyzes vocabulary in documents to create a lexical map.
pub struct LexicalAnalyzer {
    config: LexicalAnalyzerConfig,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl LexicalAnalyzer {
    /// Create an analyzer that only uses local heuristics.
    pub fn new(config: LexicalAnalyzerConfig) -> Self {
        LexicalAnalyzer {
            config,
            generator: None,
        }
    }

    /// Create an analyzer backed by an external text generator.
    pub fn with_generator(config: LexicalAnalyzerConfig, generator: Arc<dyn TextGenerator>) -> Self {
        LexicalAnalyzer {
            config,
            generator: Some(generator),
        }
    }

    /// The analyzer's configuration.
    pub fn config(&self) -> &LexicalAnalyzerConfig {
        &self.config
    }

    /// Extract multisyllabic words from text, in first-occurrence order.
    ///
    /// Formatting markers (emphasis asterisks, syllable dots, inline
    /// decoder-check annotations) are stripped first. Deduplication is
    /// case-insensitive; the surface form of the first occurrence is kept.
    pub fn extract_words(&self, text: &str) -> Vec<String> {
        let clean = EMPHASIS_MARKERS.replace_all(text, "");
        let clean = SYLLABLE_DOTS.replace_all(&clean, "");
        let clean = DECODER_CHECKS.replace_all(&clean, "");

        let mut seen: AHashSet<String> = AHashSet::new();
        let mut result = Vec::new();
        for m in CANDIDATE_WORDS.find_iter(&clean) {
            let word = m.as_str();
            let key = word.to_lowercase();
            if !seen.contains(&key) && estimate_syllables(word) >= self.config.min_syllables {
                seen.insert(key);
                result.push(word.to_string());
            }
        }

        result
    }

    /// Analyze a word against the static morpheme tables.
    ///
    /// At most one prefix and one suffix are stripped (first table match
    /// wins), a known root is searched by containment in what remains, and
    /// the full remainder becomes an unmeaning-ascribed root when no table
    /// root is found. Pure string processing; never fails.
    pub fn analyze_word_locally(&self, word: &str) -> WordEntry {
        let word_lower = word.to_lowercase();
        let mut morphemes: Vec<MorphemeInfo> = Vec::new();
        let mut remaining = word_lower;
        let mut root = String::new();

        for (prefix, meaning, origin) in COMMON_PREFIXES {
            if remaining.starts_with(prefix) && remaining.len() > prefix.len() + 2 {
                morphemes.push(MorphemeInfo::new(*prefix, *meaning, *origin, MorphemeType::Prefix));
                remaining = remaining.split_off(prefix.len());
                break;
            }
        }

        let mut suffix_morpheme: Option<MorphemeInfo> = None;
        for (suffix, meaning, origin) in COMMON_SUFFIXES {
            if remaining.ends_with(suffix) && remaining.len() > suffix.len() + 2 {
                suffix_morpheme = Some(MorphemeInfo::new(
                    *suffix,
                    *meaning,
                    *origin,
                    MorphemeType::Suffix,
                ));
                remaining.truncate(remaining.len() - suffix.len());
                break;
            }
        }

        for (root_text, meaning, origin) in COMMON_ROOTS {
            if remaining.contains(root_text) {
                root = (*root_text).to_string();
                morphemes.push(MorphemeInfo::new(*root_text, *meaning, *origin, MorphemeType::Root));
                break;
            }
        }

        if root.is_empty() && !remaining.is_empty() {
            root = remaining.clone();
            morphemes.push(MorphemeInfo::unknown_root(remaining));
        }

        if let Some(suffix) = suffix_morpheme {
            morphemes.push(suffix);
        }

        let syllables = split_syllables(word);
        let difficulty = score_entry(word, &morphemes);

        WordEntry {
            word: word.to_string(),
            root,
            morphemes,
            syllables,
            frequency: 1,
            difficulty_score: difficulty,
            first_occurrence: 0,
        }
    }

    /// Analyze a list of words, via the generator when one is attached.
    ///
    /// Guarantees one entry per input word: words missing from a parsed
    /// generator response are analyzed locally and appended, and any call
    /// or parse failure analyzes the whole list locally.
    pub fn analyze_words(&self, words: &[String]) -> Vec<WordEntry> {
        if words.is_empty() {
            return Vec::new();
        }

        match &self.generator {
            Some(generator) if self.config.use_generator => {
                self.analyze_words_with_generator(generator.as_ref(), words)
            }
            _ => self.analyze_words_locally(words),
        }
    }

    fn analyze_words_locally(&self, words: &[String]) -> Vec<WordEntry> {
        // Entries are independent; only map insertion needs a single writer.
        words
            .par_iter()
            .map(|word| self.analyze_word_locally(word))
            .collect()
    }

    fn analyze_words_with_generator(
        &self,
        generator: &dyn TextGenerator,
        words: &[String],
    ) -> Vec<WordEntry> {
        let batch: Vec<&str> = words
            .iter()
            .take(self.config.max_batch_size)
            .map(String::as_str)
            .collect();
        let prompt = format!("{}{}", ANALYSIS_PROMPT, batch.join("\n"));
        debug!(batch_size = batch.len(), generator = generator.name(), "requesting morpheme analysis");

        let parsed = generator
            .generate(&prompt)
            .and_then(|response| parse_word_analyses(&response));

        match parsed {
            Ok(analyses) => {
                let mut entries: Vec<WordEntry> =
                    analyses.into_iter().map(|raw| raw.into_entry()).collect();

                // Guarantee one entry per input word.
                let analyzed: AHashSet<String> =
                    entries.iter().map(|e| e.word.to_lowercase()).collect();
                for word in words {
                    if !analyzed.contains(&word.to_lowercase()) {
                        entries.push(self.analyze_word_locally(word));
                    }
                }

                entries
            }
            Err(error) => {
                warn!(%error, "generator analysis failed, falling back to local analysis");
                self.analyze_words_locally(words)
            }
        }
    }

    /// Analyze all vocabulary in a document.
    ///
    /// Extracts candidate words from the full plain text, analyzes them,
    /// records each entry's first containing block, and builds a fresh
    /// [`LexicalMap`].
    pub fn analyze_document(&self, doc: &FormattedDocument) -> LexicalMap {
        let text = doc.plain_text();
        let words = self.extract_words(&text);
        debug!(candidates = words.len(), "extracted candidate words");

        let mut entries = self.analyze_words(&words);

        let blocks_lower: Vec<String> = doc
            .blocks
            .iter()
            .map(|block| block.plain_text().to_lowercase())
            .collect();
        for entry in &mut entries {
            let word_lower = entry.word.to_lowercase();
            if let Some(index) = blocks_lower.iter().position(|b| b.contains(&word_lower)) {
                entry.first_occurrence = index;
            }
        }

        let mut map = LexicalMap::new();
        for entry in entries {
            map.add_word(entry);
        }
        map
    }

    /// Analyze a document and attach the results to its vocabulary metadata.
    ///
    /// Also selects the ten hardest words (descending difficulty, earliest
    /// first occurrence breaking ties) as pre-reading words.
    pub fn enhance_document(&self, doc: &mut FormattedDocument) {
        let map = self.analyze_document(doc);

        let mut difficult: Vec<WordEntry> = map.entries().cloned().collect();
        difficult.sort_by(|a, b| {
            b.difficulty_score
                .cmp(&a.difficulty_score)
                .then(a.first_occurrence.cmp(&b.first_occurrence))
        });
        difficult.truncate(10);

        let vocabulary = doc.vocabulary_mut();
        vocabulary.lexical_map = Some(map);
        vocabulary.pre_reading_words = difficult;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LexiBridgeError, Result};

    struct CannedGenerator {
        response: &'static str,
    }

    impl TextGenerator for CannedGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.response.to_string())
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String> {
            Err(LexiBridgeError::generation("model unavailable"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn local_analyzer() -> LexicalAnalyzer {
        LexicalAnalyzer::new(LexicalAnalyzerConfig::default())
    }

    #[test]
    fn test_extract_words_keeps_first_occurrence_order_and_case() {
        let analyzer = local_analyzer();
        let words = analyzer.extract_words("Philosophy concerns PHILOSOPHY and concerns.");
        assert_eq!(words, vec!["Philosophy", "concerns"]);
    }

    #[test]
    fn test_extract_words_filters_monosyllables() {
        let analyzer = local_analyzer();
        let words = analyzer.extract_words("The cat chased a hypothesis.");
        assert_eq!(words, vec!["chased", "hypothesis"]);
    }

    #[test]
    fn test_extract_words_strips_formatting() {
        let analyzer = local_analyzer();
        let words =
            analyzer.extract_words("**phi\u{b7}los\u{b7}o\u{b7}phy** [Decoder Check: what word?]");
        assert_eq!(words, vec!["philosophy"]);
    }

    #[test]
    fn test_analyze_word_locally_known_root() {
        let analyzer = local_analyzer();
        let entry = analyzer.analyze_word_locally("predict");

        assert_eq!(entry.root, "dict");
        assert_eq!(entry.morphemes.len(), 2);
        assert_eq!(entry.morphemes[0].text, "pre");
        assert_eq!(entry.morphemes[0].morpheme_type, MorphemeType::Prefix);
        assert_eq!(entry.morphemes[1].text, "dict");
        assert_eq!(entry.morphemes[1].morpheme_type, MorphemeType::Root);
    }

    #[test]
    fn test_analyze_word_locally_unknown_root() {
        let analyzer = local_analyzer();
        let entry = analyzer.analyze_word_locally("unhappy");

        assert_eq!(entry.root, "happy");
        assert!(entry.morphemes.iter().any(|m| m.text == "un"));
        let root = entry
            .morphemes
            .iter()
            .find(|m| m.morpheme_type == MorphemeType::Root)
            .unwrap();
        assert!(root.meaning.is_empty());
    }

    #[test]
    fn test_analyze_word_locally_strips_one_suffix() {
        let analyzer = local_analyzer();
        let entry = analyzer.analyze_word_locally("dictation");

        assert_eq!(entry.root, "dict");
        let suffixes: Vec<&str> = entry
            .morphemes
            .iter()
            .filter(|m| m.morpheme_type == MorphemeType::Suffix)
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(suffixes, vec!["tion"]);
        // Suffix comes after the root in left-to-right order.
        assert_eq!(entry.morphemes.last().unwrap().text, "tion");
    }

    #[test]
    fn test_analyze_word_locally_short_word_untouched() {
        let analyzer = local_analyzer();
        let entry = analyzer.analyze_word_locally("ring");
        // Too short to strip "ing": 4 > 3 + 2 is false.
        assert_eq!(entry.root, "ring");
    }

    #[test]
    fn test_analyze_words_empty_input() {
        let analyzer = local_analyzer();
        assert!(analyzer.analyze_words(&[]).is_empty());
    }

    #[test]
    fn test_generator_path_parses_response() {
        let analyzer = LexicalAnalyzer::with_generator(
            LexicalAnalyzerConfig::default(),
            Arc::new(CannedGenerator {
                response: r#"[{"word": "predict", "root": "dict", "syllables": ["pre", "dict"], "difficulty": 4}]"#,
            }),
        );

        let entries = analyzer.analyze_words(&["predict".to_string()]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].difficulty_score, 4);
        assert_eq!(entries[0].syllables, vec!["pre", "dict"]);
    }

    #[test]
    fn test_generator_path_fills_missing_words_locally() {
        let analyzer = LexicalAnalyzer::with_generator(
            LexicalAnalyzerConfig::default(),
            Arc::new(CannedGenerator {
                response: r#"[{"word": "predict", "root": "dict"}]"#,
            }),
        );

        let entries = analyzer.analyze_words(&["predict".to_string(), "transport".to_string()]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].word, "transport");
        assert_eq!(entries[1].root, "port");
    }

    #[test]
    fn test_generator_failure_falls_back_to_local() {
        let analyzer = LexicalAnalyzer::with_generator(
            LexicalAnalyzerConfig::default(),
            Arc::new(FailingGenerator),
        );

        let entries = analyzer.analyze_words(&["predict".to_string()]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].root, "dict");
    }

    #[test]
    fn test_unparseable_response_falls_back_to_local() {
        let analyzer = LexicalAnalyzer::with_generator(
            LexicalAnalyzerConfig::default(),
            Arc::new(CannedGenerator {
                response: "I cannot analyze these words.",
            }),
        );

        let entries = analyzer.analyze_words(&["predict".to_string()]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].root, "dict");
    }

    #[test]
    fn test_generator_disabled_by_config() {
        let config = LexicalAnalyzerConfig {
            use_generator: false,
            ..LexicalAnalyzerConfig::default()
        };
        let analyzer = LexicalAnalyzer::with_generator(
            config,
            Arc::new(CannedGenerator {
                response: r#"[{"word": "predict", "difficulty": 9}]"#,
            }),
        );

        let entries = analyzer.analyze_words(&["predict".to_string()]);
        // Local analysis, not the canned difficulty.
        assert_eq!(entries[0].root, "dict");
        assert_ne!(entries[0].difficulty_score, 9);
    }

    #[test]
    fn test_analyze_document_records_first_occurrence() {
        let analyzer = local_analyzer();
        let doc = FormattedDocument::from_paragraphs(vec![
            "A simple opening paragraph.",
            "The scientists hypothesized.",
        ]);

        let map = analyzer.analyze_document(&doc);
        assert_eq!(map.get("hypothesized").unwrap().first_occurrence, 1);
        assert_eq!(map.get("simple").unwrap().first_occurrence, 0);
    }

    #[test]
    fn test_analyze_document_counts_frequency() {
        let analyzer = local_analyzer();
        let doc = FormattedDocument::from_paragraphs(vec!["Philosophy and philosophy again."]);

        let map = analyzer.analyze_document(&doc);
        // Extraction dedupes, so the map sees each word once.
        assert_eq!(map.get("philosophy").unwrap().frequency, 1);
        assert_eq!(map.total_unique_words(), 2);
    }

    #[test]
    fn test_enhance_document_attaches_vocabulary() {
        let analyzer = local_analyzer();
        let mut doc = FormattedDocument::from_paragraphs(vec![
            "The scientists hypothesized about incomprehensibility.",
        ]);

        analyzer.enhance_document(&mut doc);
        let vocabulary = doc.vocabulary.as_ref().unwrap();
        assert!(vocabulary.lexical_map.is_some());
        assert!(!vocabulary.pre_reading_words.is_empty());

        let scores: Vec<u8> = vocabulary
            .pre_reading_words
            .iter()
            .map(|w| w.difficulty_score)
            .collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }
}
