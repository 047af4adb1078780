/*!
 * Error types for the signgloss application.
 *
 * This module contains custom error types for the different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the sign vocabulary
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// A metadata source is missing, unreadable or malformed
    #[error("Configuration error for {path:?}: {reason}")]
    Configuration {
        /// Path of the offending source
        path: PathBuf,
        /// What went wrong with it
        reason: String,
    },

    /// The sources were read successfully but produced no entries
    #[error("Vocabulary built from {root:?} contains no entries")]
    Empty {
        /// Directory the assets were expected in
        root: PathBuf,
    },
}

impl VocabularyError {
    /// Shorthand for a configuration error
    pub fn configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a clip exporter (the concatenation collaborator)
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to export
    #[error("No assets to export")]
    NoAssets,

    /// Filesystem failure while preparing or writing the artifact
    #[error("I/O error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external tool could not be started
    #[error("Failed to start {tool}: {message}")]
    Spawn {
        tool: String,
        message: String,
    },

    /// The external tool ran and reported failure
    #[error("{tool} failed with status {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: i32,
        stderr: String,
    },

    /// The external tool did not finish in time
    #[error("{tool} timed out after {secs} seconds")]
    Timeout {
        tool: String,
        secs: u64,
    },

    /// The export manifest could not be serialized
    #[error("Failed to serialize export manifest: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Non-fatal signal that a translation resolved fewer glosses than expected
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Coverage {:.1}% is below the {:.0}% threshold", .coverage * 100.0, .threshold * 100.0)]
pub struct PartialCoverageWarning {
    /// Fraction of glosses that were fully resolved
    pub coverage: f32,
    /// Threshold the coverage was checked against
    pub threshold: f32,
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The vocabulary could not be built
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// The engine was handed a vocabulary without entries
    #[error("Cannot translate with an empty vocabulary")]
    EmptyVocabulary,

    /// The phrase produced no glosses
    #[error("No glosses to translate in {phrase:?}")]
    EmptyInput {
        phrase: String,
    },

    /// Every gloss failed resolution, fingerspelling included
    #[error("No renderable content for glosses: {}", .glosses.join(" "))]
    UnresolvableContent {
        glosses: Vec<String>,
    },

    /// The export collaborator failed; surfaced unchanged
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from vocabulary construction
    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
