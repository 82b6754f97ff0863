//! Boundary to the external text-generation collaborator.
//!
//! The engine treats language models as an opaque capability: given a
//! prompt, return transformed text, or fail. Implementations of
//! [`TextGenerator`] live outside this crate (HTTP clients, test doubles);
//! the crate only defines the trait, the fixed prompt templates, and the
//! lenient response parsing that converts a model's JSON into typed
//! analysis data. Every caller of this boundary degrades to local analysis
//! on failure instead of propagating errors.

pub mod prompts;

use serde::Deserialize;

use crate::error::Result;
use crate::lexical::types::{MorphemeInfo, MorphemeType, WordEntry};

/// An external text-generation capability.
///
/// The call may block; timeout and retry policy belong to the
/// implementation, not to this crate. Implementations must be shareable
/// across the engine's components.
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the given prompt.
    fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the name of this generator.
    fn name(&self) -> &'static str;
}

/// Strip a wrapping markdown code fence from a model response, if present.
pub fn strip_code_fences(response: &str) -> &str {
    let mut text = response.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (e.g. "json") up to the first newline.
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest,
        };
        text = text.trim_end();
        if let Some(inner) = text.strip_suffix("```") {
            text = inner.trim_end();
        }
    }
    text
}

/// A JSON payload that may be a single object where an array was asked for.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// One morpheme as described by a model response; every field optional.
#[derive(Debug, Default, Deserialize)]
pub struct RawMorpheme {
    #[serde(default)]
    text: String,
    #[serde(default)]
    meaning: String,
    #[serde(default)]
    origin: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl RawMorpheme {
    fn into_info(self) -> MorphemeInfo {
        let morpheme_type = match self.kind.as_deref() {
            Some("prefix") => MorphemeType::Prefix,
            Some("suffix") => MorphemeType::Suffix,
            _ => MorphemeType::Root,
        };
        MorphemeInfo {
            text: self.text,
            meaning: self.meaning,
            origin: self.origin,
            morpheme_type,
        }
    }
}

/// One word analysis as described by a model response.
#[derive(Debug, Default, Deserialize)]
pub struct RawWordAnalysis {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    root: String,
    #[serde(default)]
    morphemes: Vec<RawMorpheme>,
    #[serde(default)]
    syllables: Vec<String>,
    #[serde(default)]
    difficulty: Option<f64>,
}

impl RawWordAnalysis {
    /// Convert into a [`WordEntry`], clamping the reported difficulty into
    /// the 1-10 scale (missing difficulty defaults to 5).
    pub fn into_entry(self) -> WordEntry {
        let difficulty = self
            .difficulty
            .map(|d| (d.round() as i64).clamp(1, 10) as u8)
            .unwrap_or(5);
        WordEntry {
            word: self.word,
            root: self.root,
            morphemes: self.morphemes.into_iter().map(RawMorpheme::into_info).collect(),
            syllables: self.syllables,
            frequency: 1,
            difficulty_score: difficulty,
            first_occurrence: 0,
        }
    }
}

/// Parse a morpheme-analysis response into raw word analyses.
///
/// Accepts a fenced or bare JSON array, or a single object. Any shape this
/// cannot digest is an error, and the caller falls back to local analysis.
pub fn parse_word_analyses(response: &str) -> Result<Vec<RawWordAnalysis>> {
    let payload = strip_code_fences(response);
    let parsed: OneOrMany<RawWordAnalysis> = serde_json::from_str(payload)?;
    Ok(parsed.into_vec())
}
