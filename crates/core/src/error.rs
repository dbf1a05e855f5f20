//! Error types for Lingua operations.
//!
//! This module defines the main error type [`LinguaError`] which represents
//! every hard failure that can occur while fetching, parsing or rendering an
//! entry. A lookup that simply finds nothing is *not* an error: the pipeline
//! returns `Ok(None)` and the caller decides how to report it.
//!
//! # Example
//!
//! ```rust
//! use lingua_core::{LinguaError, Result};
//!
//! fn normalize(word: &str) -> Result<String> {
//!     if word.trim().is_empty() {
//!         return Err(LinguaError::MalformedInput("empty word".to_string()));
//!     }
//!     Ok(word.trim().to_lowercase())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lookup operations.
#[derive(Error, Debug)]
pub enum LinguaError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL built or provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The input cannot be processed at all (empty document, empty word).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A CSS selector from the extraction rules failed to parse.
    ///
    /// This is a defect in the rules, not a "no match" outcome.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A text pattern could not be compiled.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// No entry could be found for the requested word.
    ///
    /// Only produced by callers that ask for a required entry; the pipeline
    /// itself reports absence as `None`.
    #[error("Definition not found for '{0}'")]
    NotFound(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Extraction rules could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON (de)serialization failures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for LinguaError.
pub type Result<T> = std::result::Result<T, LinguaError>;
