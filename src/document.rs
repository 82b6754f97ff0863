//! Minimal styled-document structures shared across the engine.
//!
//! These types are the in-process boundary between the analysis core and the
//! (external) format handlers and renderers: a document is an ordered list of
//! [`TextBlock`]s, each a list of styled [`TextRun`]s. The engine only reads
//! plain text out of them and attaches [`VocabularyMetadata`]; it never
//! renders to any concrete file format.
//!
//! # Examples
//!
//! ```
//! use lexibridge::document::{FormattedDocument, TextBlock, TextStyle};
//!
//! let mut block = TextBlock::new();
//! block.append("The scientists ", TextStyle::NONE);
//! block.append("hypothesized", TextStyle::BOLD);
//! block.append(".", TextStyle::NONE);
//!
//! let mut doc = FormattedDocument::new();
//! doc.add_block(block);
//!
//! assert_eq!(doc.plain_text(), "The scientists hypothesized.");
//! ```

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::lexical::types::{LexicalMap, WordEntry};
use crate::traps::DecoderTrap;

/// Combinable text styling flags, stored as a small bitset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle(u8);

impl TextStyle {
    /// No styling.
    pub const NONE: TextStyle = TextStyle(0);
    /// Bold text.
    pub const BOLD: TextStyle = TextStyle(1);
    /// Italic text.
    pub const ITALIC: TextStyle = TextStyle(1 << 1);

    /// Check whether all flags in `other` are set on this style.
    pub fn contains(&self, other: TextStyle) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check if the bold flag is set.
    pub fn bold(&self) -> bool {
        self.contains(TextStyle::BOLD)
    }

    /// Check if the italic flag is set.
    pub fn italic(&self) -> bool {
        self.contains(TextStyle::ITALIC)
    }
}

impl BitOr for TextStyle {
    type Output = TextStyle;

    fn bitor(self, rhs: TextStyle) -> TextStyle {
        TextStyle(self.0 | rhs.0)
    }
}

impl BitOrAssign for TextStyle {
    fn bitor_assign(&mut self, rhs: TextStyle) {
        self.0 |= rhs.0;
    }
}

/// A contiguous run of text with consistent styling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content.
    pub text: String,
    /// Combined style flags.
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new run with the given text and style.
    pub fn new<S: Into<String>>(text: S, style: TextStyle) -> Self {
        TextRun {
            text: text.into(),
            style,
        }
    }
}

impl fmt::Display for TextRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A paragraph-level block of text containing styled runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The runs making up this block, in order.
    pub runs: Vec<TextRun>,
    /// Whether this block is an inline decoder-check question.
    pub is_decoder_trap: bool,
}

impl TextBlock {
    /// Create a new empty block.
    pub fn new() -> Self {
        TextBlock::default()
    }

    /// Append a new run to this block.
    pub fn append<S: Into<String>>(&mut self, text: S, style: TextStyle) {
        self.runs.push(TextRun::new(text, style));
    }

    /// Get the plain text content without styling.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain_text())
    }
}

/// Scaffolding levels for graduated reading support.
///
/// Level 1 is maximal support (all formatting, syllable breaks, decoder
/// traps); level 5 is near-plain text. Out-of-range values are clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScaffoldLevel(u8);

impl Default for ScaffoldLevel {
    fn default() -> Self {
        ScaffoldLevel::MAX
    }
}

impl ScaffoldLevel {
    /// Full support.
    pub const MAX: ScaffoldLevel = ScaffoldLevel(1);
    /// Minimal support.
    pub const MIN: ScaffoldLevel = ScaffoldLevel(5);

    /// Create a level from a raw value, clamping into the valid 1..=5 range.
    pub fn new(level: u8) -> Self {
        ScaffoldLevel(level.clamp(Self::MAX.0, Self::MIN.0))
    }

    /// The numeric level (1 = max support, 5 = min support).
    pub fn level(&self) -> u8 {
        self.0
    }
}

/// Vocabulary analysis attached to a document by the engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VocabularyMetadata {
    /// The complete lexical analysis, if performed.
    pub lexical_map: Option<LexicalMap>,
    /// Enhanced decoder traps for the document.
    pub traps: Vec<DecoderTrap>,
    /// Words selected for the pre-reading primer section.
    pub pre_reading_words: Vec<WordEntry>,
    /// Current scaffolding level.
    pub scaffold_level: ScaffoldLevel,
}

impl VocabularyMetadata {
    /// Create empty metadata at maximal scaffolding.
    pub fn new() -> Self {
        VocabularyMetadata {
            lexical_map: None,
            traps: Vec::new(),
            pre_reading_words: Vec::new(),
            scaffold_level: ScaffoldLevel::MAX,
        }
    }
}

/// A complete formatted document flowing through the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormattedDocument {
    /// Text blocks (paragraphs) in reading order.
    pub blocks: Vec<TextBlock>,
    /// Free-form metadata from the original document.
    pub metadata: ahash::AHashMap<String, String>,
    /// Vocabulary analysis, populated by the engine when requested.
    pub vocabulary: Option<VocabularyMetadata>,
}

impl FormattedDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        FormattedDocument::default()
    }

    /// Build a document from plain paragraph texts.
    pub fn from_paragraphs<S: Into<String>>(paragraphs: Vec<S>) -> Self {
        let mut doc = FormattedDocument::new();
        for text in paragraphs {
            let mut block = TextBlock::new();
            block.append(text, TextStyle::NONE);
            doc.add_block(block);
        }
        doc
    }

    /// Add a text block to the document.
    pub fn add_block(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    /// Get all text content without styling, blocks joined by blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the document contains a decoder-check block.
    pub fn has_decoder_trap(&self) -> bool {
        self.blocks.iter().any(|block| block.is_decoder_trap)
    }

    /// Get the vocabulary metadata, creating it if absent.
    pub fn vocabulary_mut(&mut self) -> &mut VocabularyMetadata {
        self.vocabulary.get_or_insert_with(VocabularyMetadata::new)
    }
}
