//! # lexibridge
//!
//! Adaptive scaffolding and lexical analysis for phonics-oriented reading
//! support. lexibridge is the engine behind a graduated reading-support
//! pipeline: it tracks per-word exposure across a document, scores word
//! difficulty from morphological structure, decides which formatting
//! support to fade as words become mastered, and builds the vocabulary map
//! (morpheme families, difficulty tiers) that downstream renderers consume.
//!
//! ## Components
//!
//! - [`morphology`] - static morpheme dictionaries, syllabification, and
//!   difficulty scoring
//! - [`lexical`] - word extraction, morpheme analysis, the per-document
//!   lexical map, and its guide/primer consumers
//! - [`scaffolding`] - the exposure tracker that decides when support fades
//! - [`traps`] - enhanced decoder-trap generation with lookalike distractors
//! - [`llm`] - the boundary trait for the external text-generation
//!   collaborator; all failures degrade to local analysis
//! - [`document`] - the minimal styled-document structures shared at the
//!   engine boundary
//!
//! Document format handlers, the model client itself, and the CLI live
//! outside this crate; they compose these components and never reach into
//! their internals.

pub mod document;
pub mod error;
pub mod lexical;
pub mod llm;
pub mod morphology;
pub mod scaffolding;
pub mod traps;

pub mod prelude {
    //! Convenience re-exports for typical engine usage.

    pub use crate::document::{FormattedDocument, TextBlock, TextStyle};
    pub use crate::error::{LexiBridgeError, Result};
    pub use crate::lexical::{
        LexicalAnalyzer, LexicalAnalyzerConfig, LexicalMap, WordEntry,
    };
    pub use crate::llm::TextGenerator;
    pub use crate::scaffolding::{FadingProfile, ScaffoldingContext};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
