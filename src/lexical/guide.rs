//! Companion vocabulary guide generation.
//!
//! Renders a [`LexicalMap`] into a standalone guide document: words grouped
//! by difficulty tier, a "Root Key" of morpheme families, optional practice
//! exercises, and a complete alphabetical word list. Output is the document
//! IR plus a plain-text rendering; concrete file formats stay outside this
//! crate.

use crate::document::{FormattedDocument, TextBlock, TextStyle};
use crate::lexical::types::{LexicalMap, MorphemeFamily, WordEntry};

const MAX_CHALLENGING_ENTRIES: usize = 15;
const MAX_TIER_LINE_WORDS: usize = 20;
const MAX_FAMILIES: usize = 10;
const MAX_FAMILY_WORDS: usize = 8;

/// Generates a companion vocabulary guide from lexical analysis.
pub struct CompanionGuideGenerator {
    include_exercises: bool,
}

impl Default for CompanionGuideGenerator {
    fn default() -> Self {
        CompanionGuideGenerator::new(true)
    }
}

impl CompanionGuideGenerator {
    /// Create a guide generator.
    pub fn new(include_exercises: bool) -> Self {
        CompanionGuideGenerator { include_exercises }
    }

    /// Generate a companion guide document for a lexical map.
    pub fn generate(&self, lexical_map: &LexicalMap, source_title: &str) -> FormattedDocument {
        let mut blocks: Vec<TextBlock> = Vec::new();

        let mut title = TextBlock::new();
        title.append(format!("Vocabulary Guide: {source_title}"), TextStyle::BOLD);
        blocks.push(title);

        let mut intro = TextBlock::new();
        intro.append(
            format!(
                "This guide contains {} vocabulary words organized by difficulty and \
                 root families. Use it to preview challenging words before reading \
                 or to review afterward.",
                lexical_map.total_unique_words()
            ),
            TextStyle::NONE,
        );
        blocks.push(intro);

        blocks.extend(self.difficulty_section(lexical_map));
        blocks.extend(self.root_key_section(lexical_map));
        if self.include_exercises {
            blocks.extend(self.exercises_section(lexical_map));
        }
        blocks.extend(self.word_list_section(lexical_map));

        let mut doc = FormattedDocument {
            blocks,
            ..FormattedDocument::new()
        };
        doc.metadata
            .insert("type".to_string(), "companion_guide".to_string());
        doc.metadata
            .insert("source".to_string(), source_title.to_string());
        doc
    }

    fn difficulty_section(&self, lexical_map: &LexicalMap) -> Vec<TextBlock> {
        let mut blocks: Vec<TextBlock> = Vec::new();
        let tiers = lexical_map.difficulty_tiers();

        let mut header = TextBlock::new();
        header.append("Words by Difficulty", TextStyle::BOLD);
        blocks.push(header);

        if !tiers.challenging.is_empty() {
            let mut tier_block = TextBlock::new();
            tier_block.append(
                "Challenging Words (Preview These First)",
                TextStyle::BOLD | TextStyle::ITALIC,
            );
            blocks.push(tier_block);

            for key in tiers.challenging.iter().take(MAX_CHALLENGING_ENTRIES) {
                if let Some(entry) = lexical_map.get(key) {
                    blocks.push(format_word_entry(entry));
                }
            }
        }

        if !tiers.medium.is_empty() {
            let mut tier_block = TextBlock::new();
            tier_block.append("Medium Difficulty", TextStyle::BOLD);
            blocks.push(tier_block);
            blocks.push(tier_word_line(lexical_map, &tiers.medium));
        }

        if !tiers.easy.is_empty() {
            let mut tier_block = TextBlock::new();
            tier_block.append("Easier Words", TextStyle::BOLD);
            blocks.push(tier_block);
            blocks.push(tier_word_line(lexical_map, &tiers.easy));
        }

        blocks
    }

    fn root_key_section(&self, lexical_map: &LexicalMap) -> Vec<TextBlock> {
        let mut blocks: Vec<TextBlock> = Vec::new();

        let mut header = TextBlock::new();
        header.append("Root Key: Word Families", TextStyle::BOLD);
        blocks.push(header);

        let mut intro = TextBlock::new();
        intro.append(
            "Words that share a root have related meanings. Learning one root \
             helps you decode many words!",
            TextStyle::NONE,
        );
        blocks.push(intro);

        for family in lexical_map.root_families().iter().take(MAX_FAMILIES) {
            blocks.extend(format_family(family));
        }

        blocks
    }

    fn exercises_section(&self, lexical_map: &LexicalMap) -> Vec<TextBlock> {
        let mut blocks: Vec<TextBlock> = Vec::new();

        let mut header = TextBlock::new();
        header.append("Practice Exercises", TextStyle::BOLD);
        blocks.push(header);

        let mut ex1_header = TextBlock::new();
        ex1_header.append("1. Match the Root", TextStyle::BOLD);
        blocks.push(ex1_header);

        let families = lexical_map.root_families();
        if !families.is_empty() {
            let mut ex1_intro = TextBlock::new();
            ex1_intro.append(
                "Draw lines to connect words with their root meaning:",
                TextStyle::NONE,
            );
            blocks.push(ex1_intro);

            for family in families.iter().take(5) {
                if let Some(first) = family.words.first() {
                    let mut line = TextBlock::new();
                    line.append(
                        format!("  {}  \u{2192}  ____{}____", first.word, family.root.meaning),
                        TextStyle::NONE,
                    );
                    blocks.push(line);
                }
            }
        }

        let mut ex2_header = TextBlock::new();
        ex2_header.append("2. Count the Syllables", TextStyle::BOLD);
        blocks.push(ex2_header);

        let challenging: Vec<&WordEntry> = lexical_map
            .difficulty_tiers()
            .challenging
            .iter()
            .take(5)
            .filter_map(|key| lexical_map.get(key))
            .collect();
        if !challenging.is_empty() {
            for entry in &challenging {
                let mut line = TextBlock::new();
                line.append(format!("  {}: ____ syllables", entry.word), TextStyle::NONE);
                blocks.push(line);
            }

            let answers = challenging
                .iter()
                .map(|entry| format!("{}={}", entry.word, entry.syllables.len()))
                .collect::<Vec<_>>()
                .join(", ");
            let mut answer_block = TextBlock::new();
            answer_block.append(format!("Answers: {answers}"), TextStyle::ITALIC);
            blocks.push(answer_block);
        }

        blocks
    }

    fn word_list_section(&self, lexical_map: &LexicalMap) -> Vec<TextBlock> {
        let mut blocks: Vec<TextBlock> = Vec::new();

        let mut header = TextBlock::new();
        header.append("Complete Word List", TextStyle::BOLD);
        blocks.push(header);

        let mut sorted: Vec<&WordEntry> = lexical_map.entries().collect();
        sorted.sort_by_key(|entry| entry.word.to_lowercase());

        let mut current_letter: Option<char> = None;
        let mut current_words: Vec<String> = Vec::new();
        for entry in sorted {
            let first = entry
                .word
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('?');
            if Some(first) != current_letter {
                if !current_words.is_empty() {
                    let mut word_block = TextBlock::new();
                    word_block.append(current_words.join(", "), TextStyle::NONE);
                    blocks.push(word_block);
                    current_words = Vec::new();
                }
                current_letter = Some(first);
                let mut letter_block = TextBlock::new();
                letter_block.append(first.to_string(), TextStyle::BOLD);
                blocks.push(letter_block);
            }
            current_words.push(entry.syllable_text());
        }
        if !current_words.is_empty() {
            let mut word_block = TextBlock::new();
            word_block.append(current_words.join(", "), TextStyle::NONE);
            blocks.push(word_block);
        }

        blocks
    }
}

fn tier_word_line(lexical_map: &LexicalMap, keys: &[String]) -> TextBlock {
    let words: Vec<&str> = keys
        .iter()
        .take(MAX_TIER_LINE_WORDS)
        .filter_map(|key| lexical_map.get(key))
        .map(|entry| entry.word.as_str())
        .collect();
    let mut line = TextBlock::new();
    line.append(words.join(" \u{b7} "), TextStyle::NONE);
    line
}

fn format_word_entry(entry: &WordEntry) -> TextBlock {
    let mut block = TextBlock::new();
    block.append(entry.syllable_text(), TextStyle::BOLD);

    let morpheme_parts: Vec<String> = entry
        .morphemes
        .iter()
        .filter(|m| !m.meaning.is_empty())
        .map(|m| format!("{} ({})", m.text, m.meaning))
        .collect();
    if !morpheme_parts.is_empty() {
        block.append(format!(" = {}", morpheme_parts.join(" + ")), TextStyle::NONE);
    }

    block
}

fn format_family(family: &MorphemeFamily) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();

    let mut root_block = TextBlock::new();
    root_block.append(family.root.text.to_uppercase(), TextStyle::BOLD);
    if !family.root.meaning.is_empty() {
        root_block.append(format!(" = {}", family.root.meaning), TextStyle::NONE);
    }
    if !family.root.origin.is_empty() {
        root_block.append(format!(" ({})", family.root.origin), TextStyle::ITALIC);
    }
    blocks.push(root_block);

    let word_texts: Vec<String> = family
        .words
        .iter()
        .take(MAX_FAMILY_WORDS)
        .map(|entry| entry.syllable_text())
        .collect();
    let mut words_block = TextBlock::new();
    words_block.append(
        format!("  \u{2192} {}", word_texts.join(", ")),
        TextStyle::NONE,
    );
    blocks.push(words_block);

    blocks
}

/// Render a document as plain text with markdown-style emphasis markers.
///
/// Blocks are separated by blank lines; bold runs become `**text**`, italic
/// runs `*text*`, and combined runs `***text***`.
pub fn render_text(doc: &FormattedDocument) -> String {
    let lines: Vec<String> = doc
        .blocks
        .iter()
        .map(|block| {
            block
                .runs
                .iter()
                .map(|run| {
                    if run.style.bold() && run.style.italic() {
                        format!("***{}***", run.text)
                    } else if run.style.bold() {
                        format!("**{}**", run.text)
                    } else if run.style.italic() {
                        format!("*{}*", run.text)
                    } else {
                        run.text.clone()
                    }
                })
                .collect()
        })
        .collect();

    lines.join("\n\n")
}
