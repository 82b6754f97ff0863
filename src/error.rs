//! Error types for the lexibridge library.
//!
//! All fallible operations in lexibridge return [`Result`], whose error type
//! is the [`LexiBridgeError`] enum. Local text computation (syllabification,
//! scoring, extraction) is total and never fails; errors arise only at the
//! external text-generation boundary and when interpreting its responses.
//!
//! # Examples
//!
//! ```
//! use lexibridge::error::{LexiBridgeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LexiBridgeError::generation("model unavailable"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for lexibridge operations.
#[derive(Error, Debug)]
pub enum LexiBridgeError {
    /// Lexical analysis errors (extraction, mapping).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// External text-generation errors (call failures, timeouts).
    ///
    /// These never escape the document-level analysis operations; they exist
    /// so a [`TextGenerator`](crate::llm::TextGenerator) implementation has a
    /// typed failure to return.
    #[error("Generation error: {0}")]
    Generation(String),

    /// A generator response that could not be interpreted.
    #[error("Response error: {0}")]
    Response(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`LexiBridgeError`].
pub type Result<T> = std::result::Result<T, LexiBridgeError>;

impl LexiBridgeError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LexiBridgeError::Analysis(msg.into())
    }

    /// Create a new generation error.
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        LexiBridgeError::Generation(msg.into())
    }

    /// Create a new response error.
    pub fn response<S: Into<String>>(msg: S) -> Self {
        LexiBridgeError::Response(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LexiBridgeError::Other(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        LexiBridgeError::Generation(format!("Timeout: {}", msg.into()))
    }
}
