/*!
 * # signgloss - English to sign-language gloss translation
 *
 * A Rust library that turns English phrases into sign-language gloss
 * sequences and renders them from a clip dataset.
 *
 * ## Features
 *
 * - Vocabulary index built from a class list, a clip association table,
 *   manually named clips and per-letter images
 * - Vocabulary-aware normalization: contractions, numerals, inflections,
 *   aliases and fuzzy matching
 * - Greedy multi-word matching and heuristic gloss reordering
 * - Fingerspelling fallback with a coverage report
 * - Export through ffmpeg or as a JSON clip manifest
 * - Concurrent batch translation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `gloss`: The translation pipeline:
 *   - `gloss::vocabulary` / `gloss::store`: Phrase → asset index
 *   - `gloss::normalizer`: Lexical normalization
 *   - `gloss::matcher`: Tokenization and n-gram matching
 *   - `gloss::reorder`: Gloss ordering
 *   - `gloss::resolver`: Asset resolution and coverage
 *   - `gloss::engine` / `gloss::batch`: Orchestration
 * - `export`: Clip exporters (ffmpeg, manifest)
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod gloss;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ExportError, PartialCoverageWarning, TranslationError, VocabularyError};
pub use export::{ClipExporter, FfmpegExporter, ManifestExporter};
pub use gloss::{translate, CoverageReport, GlossEngine, TranslationOutcome, Vocabulary};
