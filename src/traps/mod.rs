//! Enhanced decoder traps.
//!
//! A decoder trap is an inline comprehension question that can only be
//! answered by actually decoding a specific word. Enhanced traps add
//! multiple-choice options whose distractors are *lookalikes* - words with
//! the same first letters, length, and visual shape - to catch readers who
//! guess from word shape instead of reading.
//!
//! Trap generation needs the external text generator for good distractors;
//! on any failure it degrades to simple traps carrying just the existing
//! inline questions. The pure [`generate_lookalikes`] heuristic is available
//! independently of any generator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::FormattedDocument;
use crate::llm::prompts::TRAP_GENERATOR_PROMPT;
use crate::llm::{TextGenerator, strip_code_fences};

/// A single option in a decoder trap question.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrapOption {
    /// The option text (e.g., "hypothesized").
    pub text: String,
    /// Whether this is the correct answer.
    pub is_correct: bool,
    /// Whether this is a visually similar distractor.
    pub is_lookalike: bool,
}

/// An enhanced decoder trap with multiple-choice options.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DecoderTrap {
    /// The comprehension question.
    pub question: String,
    /// The word being tested.
    pub target_word: String,
    /// Answer options: the correct answer plus distractors.
    pub options: Vec<TrapOption>,
    /// Index of the paragraph this trap follows.
    pub paragraph_index: usize,
    /// Optional explanation for the correct answer.
    pub explanation: String,
}

impl DecoderTrap {
    /// The correct answer text, if any option is marked correct.
    pub fn correct_answer(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.is_correct)
            .map(|option| option.text.as_str())
    }

    /// Render as the simple inline `[Decoder Check: ...]` form.
    pub fn to_simple_text(&self) -> String {
        format!("[Decoder Check: {}]", self.question)
    }
}

/// A paragraph that should receive an enhanced trap.
#[derive(Clone, Debug)]
struct TrapTarget {
    paragraph_index: usize,
    paragraph_text: String,
    existing_question: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDistractor {
    Tagged {
        #[serde(default)]
        word: String,
        #[serde(default)]
        is_lookalike: bool,
    },
    Plain(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawTrap {
    #[serde(default)]
    paragraph_index: usize,
    #[serde(default)]
    question: String,
    #[serde(default)]
    target_word: String,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    distractors: Vec<RawDistractor>,
    #[serde(default)]
    explanation: String,
}

/// Generates enhanced decoder traps with lookalike distractors.
pub struct TrapGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl TrapGenerator {
    /// Create a trap generator backed by an external text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        TrapGenerator { generator }
    }

    /// Generate enhanced traps for a document's decoder-check blocks.
    ///
    /// Returns simple traps (question only, no options) when the generator
    /// fails or its response cannot be parsed.
    pub fn generate_traps(&self, doc: &FormattedDocument) -> Vec<DecoderTrap> {
        let targets = extract_targets(doc);
        if targets.is_empty() {
            return Vec::new();
        }

        let prompt = build_prompt(&targets);
        match self.generator.generate(&prompt) {
            Ok(response) => parse_response(&response, &targets),
            Err(error) => {
                warn!(%error, "trap generation failed, using simple traps");
                fallback_simple_traps(&targets)
            }
        }
    }

    /// Generate traps and attach them to the document's vocabulary metadata.
    pub fn enhance_document(&self, doc: &mut FormattedDocument) {
        let traps = self.generate_traps(doc);
        doc.vocabulary_mut().traps = traps;
    }
}

fn extract_targets(doc: &FormattedDocument) -> Vec<TrapTarget> {
    let mut targets = Vec::new();
    let mut paragraphs_seen = 0usize;

    for (i, block) in doc.blocks.iter().enumerate() {
        if block.is_decoder_trap {
            // A trap before any paragraph has nothing to test.
            if paragraphs_seen > 0 {
                let para_blocks: Vec<&crate::document::TextBlock> = doc.blocks[..i]
                    .iter()
                    .filter(|b| !b.is_decoder_trap)
                    .collect();
                if let Some(last) = para_blocks.last() {
                    targets.push(TrapTarget {
                        paragraph_index: para_blocks.len() - 1,
                        paragraph_text: last.plain_text(),
                        existing_question: block.plain_text(),
                    });
                }
            }
        } else {
            paragraphs_seen += 1;
        }
    }

    targets
}

fn build_prompt(targets: &[TrapTarget]) -> String {
    let mut parts = vec![
        TRAP_GENERATOR_PROMPT.to_string(),
        "\nGenerate enhanced decoder traps for these paragraphs:\n".to_string(),
    ];

    for (i, target) in targets.iter().enumerate() {
        parts.push(format!("\n--- Paragraph {i} ---"));
        parts.push(target.paragraph_text.clone());
        parts.push(format!("\nExisting question: {}", target.existing_question));
    }

    parts.push("\n\nReturn JSON array of enhanced traps.".to_string());
    parts.join("\n")
}

fn parse_response(response: &str, targets: &[TrapTarget]) -> Vec<DecoderTrap> {
    let payload = strip_code_fences(response);
    let raw: Vec<RawTrap> = match serde_json::from_str(payload) {
        Ok(serde_json::Value::Object(_)) => {
            // Single object where an array was asked for.
            match serde_json::from_str::<RawTrap>(payload) {
                Ok(trap) => vec![trap],
                Err(_) => return fallback_simple_traps(targets),
            }
        }
        Ok(serde_json::Value::Array(_)) => match serde_json::from_str(payload) {
            Ok(traps) => traps,
            Err(_) => return fallback_simple_traps(targets),
        },
        _ => return fallback_simple_traps(targets),
    };

    raw.into_iter()
        .map(|item| {
            let mut options = vec![TrapOption {
                text: item
                    .correct_answer
                    .clone()
                    .unwrap_or_else(|| item.target_word.clone()),
                is_correct: true,
                is_lookalike: false,
            }];

            for distractor in item.distractors {
                let (text, is_lookalike) = match distractor {
                    RawDistractor::Tagged { word, is_lookalike } => (word, is_lookalike),
                    RawDistractor::Plain(word) => (word, false),
                };
                options.push(TrapOption {
                    text,
                    is_correct: false,
                    is_lookalike,
                });
            }

            DecoderTrap {
                question: item.question,
                target_word: item.target_word,
                options,
                paragraph_index: item.paragraph_index,
                explanation: item.explanation,
            }
        })
        .collect()
}

fn fallback_simple_traps(targets: &[TrapTarget]) -> Vec<DecoderTrap> {
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let question = target
                .existing_question
                .trim_start_matches("[Decoder Check:")
                .trim_start()
                .trim_end_matches(']')
                .to_string();

            DecoderTrap {
                question,
                target_word: String::new(),
                options: Vec::new(),
                paragraph_index: i,
                explanation: String::new(),
            }
        })
        .collect()
}

/// Prefix substitutions producing plausible lookalikes.
const PREFIX_SUBS: &[(&str, &[&str])] = &[
    ("pre", &["pro", "per", "pri"]),
    ("con", &["com", "can", "cen"]),
    ("dis", &["des", "das", "dys"]),
    ("un", &["in", "on", "an"]),
    ("hypo", &["hyper", "hospi", "hippo"]),
    ("inter", &["intra", "intro", "enter"]),
    ("trans", &["trance", "train", "tract"]),
    ("super", &["supper", "supra", "souper"]),
];

/// Suffix substitutions producing plausible lookalikes.
const SUFFIX_SUBS: &[(&str, &[&str])] = &[
    ("tion", &["sion", "cion", "tian"]),
    ("ment", &["mint", "meant", "mont"]),
    ("able", &["ible", "uble", "ably"]),
    ("ness", &["niss", "nous"]),
    ("ize", &["ise", "aze", "ice"]),
];

/// Visually confusable letter pairs for the fallback substitution.
const SIMILAR_LETTERS: &[(char, &[char])] = &[
    ('a', &['o', 'e']),
    ('e', &['a', 'o']),
    ('i', &['l', 'j']),
    ('o', &['a', 'e']),
    ('u', &['v', 'n']),
    ('n', &['m', 'u']),
    ('m', &['n', 'w']),
    ('b', &['d', 'p']),
    ('d', &['b', 'p']),
    ('p', &['b', 'd', 'q']),
    ('q', &['p', 'g']),
];

/// Generate lookalike words for a target word.
///
/// A heuristic for common affix patterns; the generator-backed path in
/// [`TrapGenerator`] produces richer distractors. Tries prefix
/// substitution, then suffix substitution, then swaps of visually similar
/// letters near the word start.
pub fn generate_lookalikes(word: &str, count: usize) -> Vec<String> {
    let word_lower = word.to_lowercase();
    let mut lookalikes: Vec<String> = Vec::new();

    for (prefix, subs) in PREFIX_SUBS {
        if word_lower.starts_with(prefix) {
            for sub in subs.iter().take(count) {
                let lookalike = format!("{}{}", sub, &word[prefix.len()..]);
                if lookalike.to_lowercase() != word_lower {
                    lookalikes.push(lookalike);
                }
                if lookalikes.len() >= count {
                    return lookalikes;
                }
            }
        }
    }

    for (suffix, subs) in SUFFIX_SUBS {
        if word_lower.ends_with(suffix) {
            for sub in subs.iter().take(count) {
                let stem = &word[..word.len() - suffix.len()];
                let lookalike = format!("{stem}{sub}");
                if lookalike.to_lowercase() != word_lower {
                    lookalikes.push(lookalike);
                }
                if lookalikes.len() >= count {
                    return lookalikes;
                }
            }
        }
    }

    // Fallback: swap a similar-looking letter near the word start.
    if word.len() > 3 && lookalikes.len() < count {
        let chars: Vec<char> = word.chars().collect();
        for pos in [2usize, 3, 1] {
            if pos < chars.len() {
                let c = chars[pos].to_ascii_lowercase();
                if let Some((_, replacements)) =
                    SIMILAR_LETTERS.iter().find(|(letter, _)| *letter == c)
                {
                    for replacement in *replacements {
                        let mut swapped = chars.clone();
                        swapped[pos] = *replacement;
                        let lookalike: String = swapped.into_iter().collect();
                        if lookalike.to_lowercase() != word_lower {
                            lookalikes.push(lookalike);
                        }
                        if lookalikes.len() >= count {
                            return lookalikes;
                        }
                    }
                }
            }
        }
    }

    lookalikes.truncate(count);
    lookalikes
}
