/*!
 * # vttedit - editor for WebVTT-like caption files
 *
 * A Rust library for loading, editing and exporting caption files that use
 * WebVTT-style cue blocks with an optional YAML front matter header.
 *
 * ## Features
 *
 * - Parse cue blocks (timestamp line, `#tag` lines, free text)
 * - Capture the YAML header verbatim
 * - Edit tags and text of any block
 * - Merge a contiguous selection of blocks into one
 * - Add tags to the selected block
 * - Export back to text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `vtt_document`: Parsing, merging and serialization of documents
 * - `selection`: Selected block indices and merge eligibility
 * - `view_model`: Pure rendering of editor state for front ends
 * - `app_controller`: Controller owning all editor state
 * - `prompt`: Operator input capability
 * - `session`: Line-oriented terminal front end
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod prompt;
pub mod selection;
pub mod session;
pub mod view_model;
pub mod vtt_document;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, EditEvent};
pub use errors::EditorError;
pub use prompt::OperatorPrompt;
pub use selection::Selection;
pub use view_model::{BlockView, EditorView};
pub use vtt_document::{Block, VttDocument};
