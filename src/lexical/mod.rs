//! Lexical cartography: vocabulary extraction, analysis, and consumers.
//!
//! The [`analyzer`] builds a per-document [`LexicalMap`](types::LexicalMap)
//! - unique words with morpheme breakdowns, syllables, difficulty tiers,
//! and root families. The [`guide`] and [`primer`] modules are its thin
//! consumers: the companion vocabulary guide and the pre-reading warm-up
//! section.

pub mod analyzer;
pub mod guide;
pub mod primer;
pub mod types;

pub use analyzer::{LexicalAnalyzer, LexicalAnalyzerConfig};
pub use guide::CompanionGuideGenerator;
pub use primer::{PrimerConfig, PrimerGenerator};
pub use types::{
    DifficultyTier, DifficultyTiers, LexicalMap, MorphemeFamily, MorphemeInfo, MorphemeType,
    WordEntry,
};
