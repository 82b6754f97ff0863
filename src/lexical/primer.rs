//! Pre-reading primer generation.
//!
//! The primer is a warm-up section prepended to a transformed document: the
//! most difficult words, each with a pronunciation guide and a short
//! definition, plus a quick syllable-counting exercise. Word selection uses
//! the primer difficulty formula ([`score_word`]), not the mapping formula,
//! so the hardest-to-decode words surface even when the vocabulary map
//! tiers them mildly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::{FormattedDocument, TextBlock, TextStyle};
use crate::lexical::analyzer::{LexicalAnalyzer, LexicalAnalyzerConfig};
use crate::lexical::types::WordEntry;
use crate::llm::prompts::PRIMER_PROMPT;
use crate::llm::{TextGenerator, strip_code_fences};
use crate::morphology::difficulty::score_word;

/// One primer entry: pronunciation and meaning for a difficult word.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WordDefinition {
    /// The word being defined.
    #[serde(default)]
    pub word: String,
    /// Hyphenated pronunciation with the stressed syllable in caps.
    #[serde(default)]
    pub pronunciation: String,
    /// A one-sentence definition.
    #[serde(default)]
    pub definition: String,
    /// A short example sentence.
    #[serde(default)]
    pub example: String,
}

/// Configuration for [`PrimerGenerator`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrimerConfig {
    /// How many difficult words the primer covers.
    pub word_count: usize,
    /// Minimum difficulty score for a word to qualify.
    pub min_difficulty: u8,
}

impl Default for PrimerConfig {
    fn default() -> Self {
        Self {
            word_count: 5,
            min_difficulty: 5,
        }
    }
}

/// Generates pre-reading primer sections.
pub struct PrimerGenerator {
    config: PrimerConfig,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl PrimerGenerator {
    /// Create a primer generator using only local definitions.
    pub fn new(config: PrimerConfig) -> Self {
        PrimerGenerator {
            config,
            generator: None,
        }
    }

    /// Create a primer generator with external definition support.
    pub fn with_generator(config: PrimerConfig, generator: Arc<dyn TextGenerator>) -> Self {
        PrimerGenerator {
            config,
            generator: Some(generator),
        }
    }

    /// Extract the most difficult words from text, hardest first.
    ///
    /// Words are analyzed locally, re-scored with the primer formula, and
    /// filtered by the configured minimum difficulty.
    pub fn difficult_words(&self, text: &str) -> Vec<WordEntry> {
        let analyzer = LexicalAnalyzer::new(LexicalAnalyzerConfig {
            use_generator: false,
            ..LexicalAnalyzerConfig::default()
        });

        let mut entries: Vec<WordEntry> = analyzer
            .extract_words(text)
            .iter()
            .map(|word| {
                let mut entry = analyzer.analyze_word_locally(word);
                entry.difficulty_score = score_word(word, Some(&entry));
                entry
            })
            .filter(|entry| entry.difficulty_score >= self.config.min_difficulty)
            .collect();

        entries.sort_by(|a, b| b.difficulty_score.cmp(&a.difficulty_score));
        entries.truncate(self.config.word_count);
        entries
    }

    /// Generate primer blocks for a document's text.
    ///
    /// Empty when no word clears the difficulty cutoff.
    pub fn generate_primer(&self, text: &str) -> Vec<TextBlock> {
        let difficult = self.difficult_words(text);
        if difficult.is_empty() {
            return Vec::new();
        }

        let mut blocks: Vec<TextBlock> = Vec::new();

        let mut header = TextBlock::new();
        header.append("WARM-UP: Preview These Words", TextStyle::BOLD);
        blocks.push(header);

        let mut intro = TextBlock::new();
        intro.append(
            "Before reading, practice these challenging words. \
             Say each word aloud, breaking it into syllables.",
            TextStyle::NONE,
        );
        blocks.push(intro);

        let definitions = match &self.generator {
            Some(generator) => self.definitions_from_generator(generator.as_ref(), &difficult),
            None => self.definitions_local(&difficult),
        };

        for (entry, definition) in difficult.iter().zip(&definitions) {
            blocks.extend(format_word_entry(entry, definition));
        }

        blocks.extend(practice_section(&difficult));

        let mut separator = TextBlock::new();
        separator.append("\u{2500}".repeat(40), TextStyle::NONE);
        blocks.push(separator);

        blocks
    }

    fn definitions_from_generator(
        &self,
        generator: &dyn TextGenerator,
        words: &[WordEntry],
    ) -> Vec<WordDefinition> {
        let word_list = words
            .iter()
            .map(|entry| entry.word.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!("{PRIMER_PROMPT}{word_list}");

        let parsed = generator.generate(&prompt).and_then(|response| {
            serde_json::from_str::<Vec<WordDefinition>>(strip_code_fences(&response))
                .map_err(Into::into)
        });

        match parsed {
            Ok(definitions) => definitions,
            Err(error) => {
                warn!(%error, "definition generation failed, using local definitions");
                self.definitions_local(words)
            }
        }
    }

    fn definitions_local(&self, words: &[WordEntry]) -> Vec<WordDefinition> {
        words
            .iter()
            .map(|entry| {
                let mut syllables = if entry.syllables.is_empty() {
                    vec![entry.word.clone()]
                } else {
                    entry.syllables.clone()
                };

                // Stress the penultimate syllable, the usual English default.
                if syllables.len() > 1 {
                    let stress = syllables.len() - 2;
                    syllables[stress] = syllables[stress].to_uppercase();
                }
                let pronunciation = syllables.join("-");

                let meanings: Vec<&str> = entry
                    .morphemes
                    .iter()
                    .filter(|m| !m.meaning.is_empty())
                    .map(|m| m.meaning.as_str())
                    .collect();
                let definition = if !entry.morphemes.is_empty() {
                    if meanings.is_empty() {
                        format!("A {}-syllable word", entry.syllables.len())
                    } else {
                        format!("Related to: {}", meanings.join(", "))
                    }
                } else {
                    format!("A {}-syllable word to practice", syllables.len())
                };

                WordDefinition {
                    word: entry.word.clone(),
                    pronunciation,
                    definition,
                    example: format!("Practice saying: {}", entry.word),
                }
            })
            .collect()
    }

    /// Prepend a primer to the document and record the pre-reading words.
    pub fn enhance_document(&self, doc: &mut FormattedDocument) {
        let text = doc.plain_text();
        let primer_blocks = self.generate_primer(&text);

        if !primer_blocks.is_empty() {
            let mut blocks = primer_blocks;
            blocks.append(&mut doc.blocks);
            doc.blocks = blocks;

            doc.vocabulary_mut().pre_reading_words = self.difficult_words(&text);
        }
    }
}

fn format_word_entry(entry: &WordEntry, definition: &WordDefinition) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();

    let mut word_block = TextBlock::new();
    word_block.append(entry.syllable_text(), TextStyle::BOLD);
    word_block.append(
        format!("  [{}]", definition.pronunciation),
        TextStyle::ITALIC,
    );
    blocks.push(word_block);

    let mut def_block = TextBlock::new();
    def_block.append(format!("  {}", definition.definition), TextStyle::NONE);
    blocks.push(def_block);

    if !definition.example.is_empty() {
        let mut example_block = TextBlock::new();
        example_block.append(
            format!("  Example: \"{}\"", definition.example),
            TextStyle::ITALIC,
        );
        blocks.push(example_block);
    }

    blocks
}

fn practice_section(words: &[WordEntry]) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();

    let mut header = TextBlock::new();
    header.append("Quick Practice", TextStyle::BOLD);
    blocks.push(header);

    let mut count_block = TextBlock::new();
    count_block.append("Count the syllables in each word:", TextStyle::NONE);
    blocks.push(count_block);

    for entry in words.iter().take(3) {
        let mut line = TextBlock::new();
        line.append(format!("  {}: ____ syllables", entry.word), TextStyle::NONE);
        blocks.push(line);
    }

    let answers = words
        .iter()
        .take(3)
        .map(|entry| format!("{}={}", entry.word, entry.syllables.len()))
        .collect::<Vec<_>>()
        .join(", ");
    let mut answer_block = TextBlock::new();
    answer_block.append(format!("(Answers: {answers})"), TextStyle::ITALIC);
    blocks.push(answer_block);

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

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

    const HARD_TEXT: &str =
        "The scientists hypothesized that the phenomenon was incomprehensible. \
         Their methodology established a comprehensive correlation.";

    #[test]
    fn test_difficult_words_sorted_hardest_first() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        let words = primer.difficult_words(HARD_TEXT);

        assert!(!words.is_empty());
        assert!(words.len() <= 5);
        for pair in words.windows(2) {
            assert!(pair[0].difficulty_score >= pair[1].difficulty_score);
        }
        for entry in &words {
            assert!(entry.difficulty_score >= 5);
        }
    }

    #[test]
    fn test_difficult_words_empty_for_easy_text() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        let words = primer.difficult_words("The cat sat on the mat.");
        assert!(words.is_empty());
    }

    #[test]
    fn test_generate_primer_structure() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        let blocks = primer.generate_primer(HARD_TEXT);

        assert!(!blocks.is_empty());
        assert_eq!(blocks[0].plain_text(), "WARM-UP: Preview These Words");
        assert!(blocks[0].runs[0].style.bold());

        let all_text: String = blocks
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(all_text.contains("Quick Practice"));
        assert!(all_text.contains("____ syllables"));
        assert!(all_text.contains("(Answers:"));
    }

    #[test]
    fn test_generate_primer_empty_for_easy_text() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        assert!(primer.generate_primer("The cat sat.").is_empty());
    }

    #[test]
    fn test_local_definitions_stress_penultimate() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        let entry = WordEntry::new("hypothesis").with_syllables(vec![
            "hy".to_string(),
            "po".to_string(),
            "the".to_string(),
            "sis".to_string(),
        ]);

        let definitions = primer.definitions_local(std::slice::from_ref(&entry));
        assert_eq!(definitions[0].pronunciation, "hy-po-THE-sis");
    }

    #[test]
    fn test_local_definitions_use_morpheme_meanings() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        let analyzer = LexicalAnalyzer::new(LexicalAnalyzerConfig::default());
        let entry = analyzer.analyze_word_locally("predict");

        let definitions = primer.definitions_local(std::slice::from_ref(&entry));
        assert!(definitions[0].definition.starts_with("Related to:"));
        assert!(definitions[0].definition.contains("say, speak"));
    }

    #[test]
    fn test_generator_definitions_parsed() {
        let primer = PrimerGenerator::with_generator(
            PrimerConfig::default(),
            Arc::new(CannedGenerator {
                response: r#"```json
                [{"word": "hypothesized", "pronunciation": "hy-POTH-eh-sized",
                  "definition": "proposed an explanation",
                  "example": "They hypothesized a cause."}]
                ```"#,
            }),
        );

        let blocks = primer.generate_primer(HARD_TEXT);
        let all_text: String = blocks
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(all_text.contains("hy-POTH-eh-sized"));
    }

    #[test]
    fn test_generator_garbage_falls_back_locally() {
        let primer = PrimerGenerator::with_generator(
            PrimerConfig::default(),
            Arc::new(CannedGenerator {
                response: "no json here",
            }),
        );

        let blocks = primer.generate_primer(HARD_TEXT);
        let all_text: String = blocks
            .iter()
            .map(|b| b.plain_text())
            .collect::<Vec<_>>()
            .join("\n");
        // Local fallback produces its practice-prompt examples.
        assert!(all_text.contains("Practice saying:"));
    }

    #[test]
    fn test_enhance_document_prepends_primer() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        let mut doc = FormattedDocument::from_paragraphs(vec![HARD_TEXT]);
        let original_len = doc.blocks.len();

        primer.enhance_document(&mut doc);
        assert!(doc.blocks.len() > original_len);
        assert_eq!(doc.blocks[0].plain_text(), "WARM-UP: Preview These Words");
        assert!(!doc.vocabulary.as_ref().unwrap().pre_reading_words.is_empty());

        // The original content is still at the end.
        let last = doc.blocks.last().unwrap().plain_text();
        assert!(last.contains("correlation"));
    }

    #[test]
    fn test_enhance_document_noop_for_easy_text() {
        let primer = PrimerGenerator::new(PrimerConfig::default());
        let mut doc = FormattedDocument::from_paragraphs(vec!["The cat sat."]);

        primer.enhance_document(&mut doc);
        assert_eq!(doc.blocks.len(), 1);
        assert!(doc.vocabulary.is_none());
    }
}
